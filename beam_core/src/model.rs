//! # Beam Models
//!
//! JSON description of a beam with unit-tagged values, and the report produced
//! by analysing it.
//!
//! ```json
//! {
//!   "label": "SS-1",
//!   "length": { "value": 5.0, "unit": "m" },
//!   "beam_type": "simply_supported",
//!   "supports": [
//!     { "position": { "value": 0, "unit": "mm" }, "kind": "pinned" },
//!     { "position": { "value": 5, "unit": "m" }, "kind": "roller" }
//!   ],
//!   "loads": [
//!     { "type": "point", "magnitude": { "value": 1, "unit": "kN" },
//!       "position": { "value": 2000, "unit": "mm" } }
//!   ],
//!   "samples": 101
//! }
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use crate::calculations::{Beam, BeamDiagrams, BeamType, SupportReaction};
use crate::errors::{CalcError, CalcResult};
use crate::loads::Load;
use crate::supports::{Support, SupportKind};
use crate::units::{UnitValue, FORCE_UNIT, LENGTH_UNIT, MOMENT_UNIT};

/// Default number of diagram samples
pub const DEFAULT_SAMPLES: usize = 101;

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

fn default_angle() -> f64 {
    90.0
}

/// Support entry in a model file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportSpec {
    pub position: UnitValue,
    #[serde(default)]
    pub kind: SupportKind,
}

/// Load entry in a model file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoadSpec {
    Point {
        magnitude: UnitValue,
        position: UnitValue,
        #[serde(default = "default_angle")]
        angle_deg: f64,
    },
    Udl {
        magnitude: UnitValue,
        start: UnitValue,
        end: UnitValue,
    },
    Uvl {
        start_magnitude: UnitValue,
        end_magnitude: UnitValue,
        start: UnitValue,
        end: UnitValue,
    },
    Moment {
        magnitude: UnitValue,
        position: UnitValue,
    },
}

impl LoadSpec {
    /// Convert to a [`Load`] in internal units
    pub fn to_load(&self) -> CalcResult<Load> {
        match self {
            LoadSpec::Point {
                magnitude,
                position,
                angle_deg,
            } => Ok(Load::point_units(magnitude, position)?.with_angle(*angle_deg)),
            LoadSpec::Udl { magnitude, start, end } => Load::udl_units(magnitude, start, end),
            LoadSpec::Uvl {
                start_magnitude,
                end_magnitude,
                start,
                end,
            } => Load::uvl_units(start_magnitude, end_magnitude, start, end),
            LoadSpec::Moment { magnitude, position } => Load::moment_units(magnitude, position),
        }
    }
}

/// A beam as described in a model file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamModel {
    #[serde(default)]
    pub label: String,
    pub length: UnitValue,
    pub beam_type: BeamType,
    #[serde(default)]
    pub supports: Vec<SupportSpec>,
    #[serde(default)]
    pub loads: Vec<LoadSpec>,
    /// Diagram samples from 0 to length (minimum 2)
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Overrides the grid used for point moment queries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_segments: Option<usize>,
}

impl BeamModel {
    /// Parse a model from JSON text
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the model back to pretty JSON
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build an unsolved [`Beam`], converting every value to internal units
    pub fn build(&self) -> CalcResult<Beam> {
        let mut beam = Beam::with_units(&self.length, self.beam_type)?.with_label(self.label.clone());
        if let Some(segments) = self.integration_segments {
            beam = beam.with_integration_segments(segments);
        }
        for spec in &self.supports {
            beam.add_support(Support::with_units(&spec.position, spec.kind)?)?;
        }
        for spec in &self.loads {
            beam.add_load(spec.to_load()?)?;
        }
        Ok(beam)
    }

    /// Build, solve and sample the beam
    pub fn analyse(&self) -> CalcResult<BeamReport> {
        if self.samples < 2 {
            return Err(CalcError::invalid_input(
                "samples",
                self.samples.to_string(),
                "At least 2 samples are needed to cover both ends",
            ));
        }
        let mut beam = self.build()?;
        beam.calculate_reactions()?;
        let report = BeamReport::from_beam(&beam, self.samples)?;
        info!(
            "analysed '{}': {} reactions, max moment {:.0} N*mm",
            report.label,
            report.reactions.len(),
            report.diagrams.max_positive_moment
        );
        Ok(report)
    }
}

/// Force and moment residuals of a solved beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    /// ΣF (N)
    pub force: f64,
    /// ΣM about the left end (N*mm)
    pub moment: f64,
}

/// Output of a beam analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamReport {
    pub label: String,
    pub beam_type: BeamType,
    pub length: UnitValue,
    pub total_load: UnitValue,
    pub reactions: Vec<SupportReaction>,
    pub equilibrium: Equilibrium,
    pub diagrams: BeamDiagrams,
}

impl BeamReport {
    /// Report a solved beam, sampling its field at `samples` points
    pub fn from_beam(beam: &Beam, samples: usize) -> CalcResult<Self> {
        let solved = beam.reactions().ok_or(CalcError::NotSolved)?;
        let (force, moment) = beam.equilibrium_residual(0.0)?;
        Ok(BeamReport {
            label: beam.label().to_string(),
            beam_type: beam.beam_type(),
            length: UnitValue::new(beam.length(), LENGTH_UNIT),
            total_load: UnitValue::new(beam.total_load(), FORCE_UNIT),
            reactions: solved.reactions.clone(),
            equilibrium: Equilibrium { force, moment },
            diagrams: beam.sample_field(samples)?,
        })
    }

    /// One line per reaction, e.g. `fixed@0mm: R = 500.00 N, M = -751000.00 N*mm`
    pub fn reaction_lines(&self) -> Vec<String> {
        self.reactions
            .iter()
            .map(|r| match r.moment {
                Some(m) => format!(
                    "{}: R = {:.2} {}, M = {:.2} {}",
                    r.descriptor(),
                    r.force,
                    FORCE_UNIT,
                    m,
                    MOMENT_UNIT
                ),
                None => format!("{}: R = {:.2} {}", r.descriptor(), r.force, FORCE_UNIT),
            })
            .collect()
    }

    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
