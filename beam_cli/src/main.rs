//! # Beamcalc CLI Application
//!
//! Analyses a beam model file, or the built-in demo beams when run without
//! arguments.
//!
//! ```text
//! beam_cli                                  # run the demo beams
//! beam_cli model.json [--csv out.csv] [--json out.json]
//! ```
//!
//! Set `RUST_LOG=debug` to trace the solver.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use beam_core::file_io::{load_model, save_report, write_diagram_csv};
use beam_core::model::{BeamModel, BeamReport, LoadSpec, SupportSpec, DEFAULT_SAMPLES};
use beam_core::supports::SupportKind;
use beam_core::units::UnitValue;
use beam_core::{BeamType, CalcError};
use log::{debug, error};

const USAGE: &str = "Usage: beam_cli [<model.json> [--csv <path>] [--json <path>]]";

#[derive(Debug, Default)]
struct Args {
    model: Option<PathBuf>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--csv" | "--json" => {
                let value = raw
                    .next()
                    .ok_or_else(|| format!("{} requires a path", arg))?;
                if arg == "--csv" {
                    args.csv = Some(PathBuf::from(value));
                } else {
                    args.json = Some(PathBuf::from(value));
                }
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if other.starts_with("--") => {
                return Err(format!("Unknown option '{}'\n{}", other, USAGE));
            }
            other => {
                if args.model.is_some() {
                    return Err(format!("Unexpected argument '{}'\n{}", other, USAGE));
                }
                args.model = Some(PathBuf::from(other));
            }
        }
    }
    if args.model.is_none() && (args.csv.is_some() || args.json.is_some()) {
        return Err(format!("--csv and --json need a model file\n{}", USAGE));
    }
    Ok(args)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };
    debug!("{:?}", args);

    println!("Beamcalc CLI - Beam Reaction & Diagram Calculator");
    println!("=================================================");
    println!();

    let result = match &args.model {
        Some(path) => run_model_file(path, &args),
        None => run_demos(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("analysis failed: {}", e.error_code());
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

fn run_model_file(path: &Path, args: &Args) -> Result<(), CalcError> {
    let model = load_model(path)?;
    let report = model.analyse()?;
    print_report(&report);

    println!();
    println!("JSON Output:");
    println!("{}", report.to_json()?);

    if let Some(csv) = &args.csv {
        write_diagram_csv(&report.diagrams, csv)?;
        println!();
        println!("Diagrams written to {}", csv.display());
    }
    if let Some(json) = &args.json {
        save_report(&report, json)?;
        println!("Report written to {}", json.display());
    }
    Ok(())
}

fn run_demos() -> Result<(), CalcError> {
    println!("No model file given. Running demo beams...");
    println!();
    for model in demo_models() {
        let report = model.analyse()?;
        print_report(&report);
        println!();
    }
    Ok(())
}

fn print_report(report: &BeamReport) {
    println!("═══════════════════════════════════════");
    println!("  {} ({})", report.label, report.beam_type.display_name());
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Length:     {}", report.length);
    println!("  Total load: {:.2} {}", report.total_load.value, report.total_load.unit);
    println!();
    println!("Reactions:");
    for line in report.reaction_lines() {
        println!("  {}", line);
    }
    println!();
    let d = &report.diagrams;
    println!("Diagrams ({} samples):", d.points.len());
    println!("  V_max  = {:.2} N at {:.1} mm", d.max_shear, d.max_shear_position);
    println!(
        "  M_max+ = {:.2} N*mm at {:.1} mm",
        d.max_positive_moment, d.max_positive_moment_position
    );
    println!(
        "  M_max- = {:.2} N*mm at {:.1} mm",
        d.max_negative_moment, d.max_negative_moment_position
    );
    println!();
    println!(
        "Equilibrium: ΣF = {:.3e} N, ΣM = {:.3e} N*mm",
        report.equilibrium.force, report.equilibrium.moment
    );
}

fn mm(value: f64) -> UnitValue {
    UnitValue::mm(value)
}

fn support(position: f64, kind: SupportKind) -> SupportSpec {
    SupportSpec {
        position: mm(position),
        kind,
    }
}

fn full_span_udl(w: f64, length: f64) -> LoadSpec {
    LoadSpec::Udl {
        magnitude: UnitValue::n_per_mm(w),
        start: mm(0.0),
        end: mm(length),
    }
}

fn demo(label: &str, length: f64, beam_type: BeamType) -> BeamModel {
    BeamModel {
        label: label.to_string(),
        length: mm(length),
        beam_type,
        supports: Vec::new(),
        loads: Vec::new(),
        samples: DEFAULT_SAMPLES,
        integration_segments: None,
    }
}

/// Simply supported, cantilever, fixed-fixed and propped cantilever demos
fn demo_models() -> Vec<BeamModel> {
    let mut simply_supported = demo("Demo: simply supported", 5000.0, BeamType::SimplySupported);
    simply_supported.supports = vec![
        support(0.0, SupportKind::Pinned),
        support(5000.0, SupportKind::Roller),
    ];
    simply_supported.loads = vec![
        LoadSpec::Point {
            magnitude: UnitValue::newtons(1000.0),
            position: mm(2000.0),
            angle_deg: 90.0,
        },
        full_span_udl(0.2, 5000.0),
    ];

    let mut cantilever = demo("Demo: cantilever", 3000.0, BeamType::Cantilever);
    cantilever.supports = vec![support(0.0, SupportKind::Fixed)];
    cantilever.loads = vec![
        LoadSpec::Point {
            magnitude: UnitValue::newtons(500.0),
            position: mm(1500.0),
            angle_deg: 90.0,
        },
        LoadSpec::Moment {
            magnitude: UnitValue::n_mm(1000.0),
            position: mm(3000.0),
        },
    ];

    let mut fixed = demo("Demo: fixed-fixed", 6000.0, BeamType::Fixed);
    fixed.supports = vec![
        support(0.0, SupportKind::Fixed),
        support(6000.0, SupportKind::Fixed),
    ];
    fixed.loads = vec![full_span_udl(0.5, 6000.0)];

    let mut propped = demo("Demo: propped cantilever", 4000.0, BeamType::ProppedCantilever);
    propped.supports = vec![
        support(0.0, SupportKind::Fixed),
        support(4000.0, SupportKind::Roller),
    ];
    propped.loads = vec![full_span_udl(1.0, 4000.0)];

    vec![simply_supported, cantilever, fixed, propped]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args_runs_demos() {
        let parsed = args(&[]).unwrap();
        assert!(parsed.model.is_none());
    }

    #[test]
    fn test_model_with_outputs() {
        let parsed = args(&["beam.json", "--csv", "d.csv", "--json", "r.json"]).unwrap();
        assert_eq!(parsed.model, Some(PathBuf::from("beam.json")));
        assert_eq!(parsed.csv, Some(PathBuf::from("d.csv")));
        assert_eq!(parsed.json, Some(PathBuf::from("r.json")));
    }

    #[test]
    fn test_bad_args() {
        assert!(args(&["--csv"]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
        assert!(args(&["a.json", "--pdf", "x"]).is_err());
        assert!(args(&["--csv", "d.csv"]).is_err());
    }

    #[test]
    fn test_demo_models_solve() {
        let models = demo_models();
        assert_eq!(models.len(), 4);
        for model in models {
            let report = model.analyse().unwrap();
            assert!(report.equilibrium.force.abs() < 1e-6, "{}", report.label);
            assert!(report.equilibrium.moment.abs() < 1e-3, "{}", report.label);
        }
    }
}
