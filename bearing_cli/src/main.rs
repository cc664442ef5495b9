//! # Bearing CLI
//!
//! Runs a single bearing capacity analysis described in JSON.
//!
//! ```text
//! bearing_cli [--verbose] [PATH]
//! ```
//!
//! The request is read from the given file, or from stdin when no path is
//! given. A short summary is printed followed by the JSON report.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bearing_core::calculations::{AllowableCapacityReport, BearingCapacityReport};
use bearing_core::{AnalysisReport, AnalysisRequest, BearingError};
use clap::Parser;
use flexi_logger::{Logger, LoggerHandle};
use log::{error, info};

/// Run a bearing capacity analysis described in JSON
#[derive(Parser, Debug)]
#[command(name = "bearing_cli", version, about = "Soil bearing capacity calculator")]
struct Args {
    /// Log at debug level (`RUST_LOG` still takes precedence)
    #[arg(short, long)]
    verbose: bool,

    /// JSON request file; reads stdin when omitted
    path: Option<PathBuf>,
}

/// `RUST_LOG` overrides the level chosen from the flags.
fn init_logging(verbose: bool) -> Option<LoggerHandle> {
    let level = if verbose { "debug" } else { "warn" };
    match Logger::try_with_env_or_str(level).and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Logger init failed: {}", e);
            None
        }
    }
}

fn read_request(path: Option<&Path>) -> Result<String, BearingError> {
    let read = match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut json = String::new();
            io::stdin().read_to_string(&mut json).map(|_| json)
        }
    };
    read.map_err(|e| {
        let source = path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
        BearingError::invalid_input("request", source, e.to_string())
    })
}

fn run(path: Option<&Path>) -> Result<AnalysisReport, BearingError> {
    let json = read_request(path)?;
    let request = AnalysisRequest::from_json(&json)?;
    info!("event=request_parsed type={} label={:?}", request.calc_type(), request.label());
    request.run()
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _logger = init_logging(args.verbose);

    println!("Bearing CLI - Soil Bearing Capacity Calculator");
    println!("==============================================");
    println!();

    match run(args.path.as_deref()) {
        Ok(report) => {
            info!("event=analysis_complete capacity_kpa={}", report.capacity());
            match &report {
                AnalysisReport::Ultimate(r) => print_ultimate(r),
                AnalysisReport::Allowable(r) => print_allowable(r),
            }

            println!();
            println!("JSON Output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&report) {
                println!("{}", json);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("event=analysis_failed code={} error={}", e.error_code(), e);
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn print_ultimate(r: &BearingCapacityReport) {
    let f = &r.factors;
    println!("═══════════════════════════════════════");
    println!("  ULTIMATE BEARING CAPACITY ({})", r.method.to_uppercase());
    println!("═══════════════════════════════════════");
    println!();
    if !r.label.is_empty() {
        println!("Footing:  {}", r.label);
    }
    println!("Shape:    {} (B' = {:.2} m)", r.effective_shape, r.effective_width);
    println!();
    println!("Factors:      c        q        γ");
    println!("  N     {:>8.2} {:>8.2} {:>8.2}", f.bearing.n_c, f.bearing.n_q, f.bearing.n_gamma);
    println!("  s     {:>8.2} {:>8.2} {:>8.2}", f.shape.c, f.shape.q, f.shape.gamma);
    println!("  d     {:>8.2} {:>8.2} {:>8.2}", f.depth.c, f.depth.q, f.depth.gamma);
    println!("  i     {:>8.2} {:>8.2} {:>8.2}", f.inclination.c, f.inclination.q, f.inclination.gamma);
    println!("  w              {:>8.2} {:>8.2}", f.water.surcharge, f.water.embedment);
    println!();
    println!("Terms:");
    println!("  Cohesion:  {:.2} kPa", f.cohesion_term);
    println!("  Surcharge: {:.2} kPa", f.surcharge_term);
    println!("  Embedment: {:.2} kPa", f.embedment_term);
    println!();
    println!("═══════════════════════════════════════");
    println!("  q_ult = {:.2} kPa", r.ultimate_capacity);
    println!("═══════════════════════════════════════");
}

fn print_allowable(r: &AllowableCapacityReport) {
    println!("═══════════════════════════════════════");
    println!("  ALLOWABLE BEARING CAPACITY ({})", r.method);
    println!("═══════════════════════════════════════");
    println!();
    if !r.label.is_empty() {
        println!("Footing:  {}", r.label);
    }
    println!("Type:     {}", r.foundation_type);
    println!("N design: {:.0}", r.design_spt_number);
    println!();
    println!("Settlement ratio: {:.3}", r.settlement_ratio);
    println!("Depth factor:     {:.3}", r.depth_factor);
    println!("Water correction: {:.3}", r.water_correction);
    println!();
    println!("═══════════════════════════════════════");
    println!("  q_a = {:.2} kPa", r.allowable_capacity);
    println!("═══════════════════════════════════════");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["bearing_cli", "-v", "request.json"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.path, Some(PathBuf::from("request.json")));

        let args = Args::try_parse_from(["bearing_cli"]).unwrap();
        assert!(!args.verbose);
        assert!(args.path.is_none());
    }

    #[test]
    fn test_verbose_long_form() {
        let args = Args::try_parse_from(["bearing_cli", "--verbose", "in.json"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Args::try_parse_from(["bearing_cli", "--bogus"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
