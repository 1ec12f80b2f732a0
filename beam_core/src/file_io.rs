//! # File I/O Module
//!
//! Reads beam models and writes analysis output:
//! - **Model files**: JSON [`BeamModel`] documents
//! - **Reports**: pretty JSON [`BeamReport`]
//! - **Diagram export**: CSV with columns `x_mm,shear_n,moment_nmm`
//!
//! Every write is atomic: contents go to a `.tmp` sibling first, which is held
//! under an exclusive lock, synced, then renamed over the target.
//!
//! ## Example
//!
//! ```rust,no_run
//! use beam_core::file_io::{load_model, save_report, write_diagram_csv};
//! use std::path::Path;
//!
//! let model = load_model(Path::new("beam.json"))?;
//! let report = model.analyse()?;
//! save_report(&report, Path::new("beam_report.json"))?;
//! write_diagram_csv(&report.diagrams, Path::new("beam_diagrams.csv"))?;
//! # Ok::<(), beam_core::errors::CalcError>(())
//! ```

use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[cfg(not(target_arch = "wasm32"))]
use fs2::FileExt;
use log::debug;

use crate::calculations::BeamDiagrams;
use crate::errors::{CalcError, CalcResult};
use crate::model::{BeamModel, BeamReport};

/// Header row of the diagram CSV
pub const CSV_HEADER: &str = "x_mm,shear_n,moment_nmm";

/// Load a beam model from a JSON file.
///
/// # Returns
///
/// * `Ok(BeamModel)` - Parsed model (not yet built or solved)
/// * `Err(CalcError::SerializationError)` - Invalid JSON or unknown field values
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_model(path: &Path) -> CalcResult<BeamModel> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid model in {}: {}", path.display(), e),
    })
}

/// Save a report as pretty JSON with atomic write semantics
pub fn save_report(report: &BeamReport, path: &Path) -> CalcResult<()> {
    let json = report.to_json()?;
    write_atomic(path, json.as_bytes())
}

/// Render sampled diagrams as CSV text
pub fn diagram_csv(diagrams: &BeamDiagrams) -> String {
    let mut csv = String::with_capacity(32 * (diagrams.points.len() + 1));
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    for p in &diagrams.points {
        // Writing to a String cannot fail
        let _ = writeln!(csv, "{},{},{}", p.x, p.shear, p.moment);
    }
    csv
}

/// Write sampled diagrams as CSV with atomic write semantics
pub fn write_diagram_csv(diagrams: &BeamDiagrams, path: &Path) -> CalcResult<()> {
    write_atomic(path, diagram_csv(diagrams).as_bytes())
}

/// Temp sibling used while writing `path`, e.g. `report.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let extension = tmp
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp.set_extension(extension);
    tmp
}

/// Write to `<path>.tmp`, sync, then rename over `path`
fn write_atomic(path: &Path, contents: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);
    debug!("writing {} bytes to {}", contents.len(), path.display());

    let mut tmp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&tmp_path)
        .map_err(|e| {
            CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
        })?;

    // Another writer targeting the same file holds the temp file
    #[cfg(not(target_arch = "wasm32"))]
    tmp_file.try_lock_exclusive().map_err(|e| {
        CalcError::file_error("lock temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    let written = tmp_file
        .set_len(0)
        .and_then(|_| tmp_file.write_all(contents))
        .and_then(|_| tmp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(CalcError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        ));
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("beamcalc_test_{}_{}", std::process::id(), name))
    }

    const MODEL: &str = r#"{
        "label": "file-io",
        "length": { "value": 4, "unit": "m" },
        "beam_type": "simply_supported",
        "supports": [
            { "position": { "value": 0, "unit": "m" }, "kind": "pinned" },
            { "position": { "value": 4, "unit": "m" }, "kind": "roller" }
        ],
        "loads": [
            { "type": "point", "magnitude": { "value": 1000, "unit": "N" },
              "position": { "value": 2, "unit": "m" } }
        ],
        "samples": 5
    }"#;

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/out/report.json")),
            Path::new("/out/report.json.tmp")
        );
        assert_eq!(tmp_path_for(Path::new("/out/report")), Path::new("/out/report.tmp"));
    }

    #[test]
    fn test_load_model() {
        let path = temp_path("model.json");
        fs::write(&path, MODEL).unwrap();

        let model = load_model(&path).unwrap();
        assert_eq!(model.label, "file-io");
        assert_eq!(model.samples, 5);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_model() {
        let err = load_model(&temp_path("does_not_exist.json")).unwrap_err();
        assert!(matches!(err, CalcError::FileError { ref operation, .. } if operation == "open"));
    }

    #[test]
    fn test_load_invalid_model() {
        let path = temp_path("invalid.json");
        fs::write(&path, "{ \"length\": 5 }").unwrap();
        assert!(matches!(load_model(&path), Err(CalcError::SerializationError { .. })));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_report_atomic() {
        let path = temp_path("report.json");
        let report = BeamModel::from_json(MODEL).unwrap().analyse().unwrap();

        save_report(&report, &path).unwrap();
        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());

        let saved: BeamReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.label, "file-io");
        assert_eq!(saved.reactions.len(), 2);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_diagram_csv() {
        let report = BeamModel::from_json(MODEL).unwrap().analyse().unwrap();
        let csv = diagram_csv(&report.diagrams);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "0,500,0");
        assert!(lines[3].starts_with("2000,-500,"));

        let path = temp_path("diagrams.csv");
        write_diagram_csv(&report.diagrams, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), csv);
        let _ = fs::remove_file(&path);
    }
}
