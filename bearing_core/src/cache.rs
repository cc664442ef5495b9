//! # Factor Cache
//!
//! Optional memoisation of Nc, Nq and Nγ keyed by method and friction angle.
//!
//! The cache is an explicit value owned by the caller and handed to
//! [`UltimateBearingCapacity::bearing_capacity_with_cache`]; nothing in the
//! engine reads it implicitly. A process-wide instance is available through
//! [`FactorCache::global`]. It is unbounded (one entry per distinct method and
//! friction angle seen) and can be emptied with [`FactorCache::clear`].
//!
//! [`UltimateBearingCapacity::bearing_capacity_with_cache`]:
//!     crate::ultimate::UltimateBearingCapacity::bearing_capacity_with_cache
//!
//! ## Example
//!
//! ```rust
//! use bearing_core::cache::FactorCache;
//! use bearing_core::ultimate::{BearingCapacityMethod, Hansen};
//!
//! let cache = FactorCache::new();
//! let first = cache.get_or_compute(&Hansen, 20.0);
//! let second = cache.get_or_compute(&Hansen, 20.0);
//! assert_eq!(first, second);
//! assert_eq!(first, Hansen.bearing_capacity_factors(20.0));
//! assert_eq!(cache.len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use log::trace;
use once_cell::sync::Lazy;

use crate::ultimate::{BearingCapacityFactors, BearingCapacityMethod, TerzaghiVariant};

static GLOBAL_CACHE: Lazy<FactorCache> = Lazy::new(FactorCache::new);

/// Identifies which formulation produced a set of factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorKey {
    Terzaghi(TerzaghiVariant),
    Hansen,
    Vesic,
}

/// Read-mostly, append-only store of bearing capacity factors.
#[derive(Debug, Default)]
pub struct FactorCache {
    entries: RwLock<HashMap<(FactorKey, u64), BearingCapacityFactors>>,
}

impl FactorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache, created on first use
    pub fn global() -> &'static FactorCache {
        &GLOBAL_CACHE
    }

    /// Cached factors for `friction_angle`, computing and storing them on a miss.
    pub fn get_or_compute<M>(&self, method: &M, friction_angle: f64) -> BearingCapacityFactors
    where
        M: BearingCapacityMethod + ?Sized,
    {
        // -0.0 and 0.0 share an entry
        let key = (method.factor_key(), (friction_angle + 0.0).to_bits());

        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .copied();
        if let Some(factors) = cached {
            trace!("event=factor_cache status=hit method={} phi={}", method.name(), friction_angle);
            return factors;
        }

        let factors = method.bearing_capacity_factors(friction_angle);
        trace!("event=factor_cache status=miss method={} phi={}", method.name(), friction_angle);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(factors);
        factors
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ultimate::{Hansen, Terzaghi, Vesic};

    #[test]
    fn test_cache_hit_returns_same_factors() {
        let cache = FactorCache::new();
        let a = cache.get_or_compute(&Vesic, 30.0);
        let b = cache.get_or_compute(&Vesic, 30.0);
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_methods_do_not_share_entries() {
        let cache = FactorCache::new();
        let hansen = cache.get_or_compute(&Hansen, 20.0);
        let vesic = cache.get_or_compute(&Vesic, 20.0);
        let terzaghi = cache.get_or_compute(&Terzaghi::new(TerzaghiVariant::Hansen), 20.0);
        let meyerhof = cache.get_or_compute(&Terzaghi::new(TerzaghiVariant::Meyerhof), 20.0);
        assert_eq!(cache.len(), 4);
        assert_eq!(hansen.n_c, vesic.n_c);
        assert_ne!(hansen.n_gamma, vesic.n_gamma);
        assert_ne!(terzaghi.n_gamma, meyerhof.n_gamma);
    }

    #[test]
    fn test_signed_zero_shares_entry() {
        let cache = FactorCache::new();
        cache.get_or_compute(&Hansen, 0.0);
        cache.get_or_compute(&Hansen, -0.0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let cache = FactorCache::new();
        cache.get_or_compute(&Hansen, 25.0);
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_global_cache_is_shared() {
        let a = FactorCache::global() as *const FactorCache;
        let b = FactorCache::global() as *const FactorCache;
        assert_eq!(a, b);
    }

    #[test]
    fn test_cache_is_sync() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<FactorCache>();
    }
}
