//! # Beam
//!
//! The beam entity: a length, a beam type, and the supports and loads attached
//! to it. Everything is held in internal units (mm, N, N/mm, N*mm).
//!
//! ## Lifecycle
//!
//! 1. Build: [`Beam::new`], then [`Beam::add_support`] / [`Beam::add_load`].
//!    Positions outside `[0, length]` are rejected as they are attached.
//! 2. Solve: [`Beam::calculate_reactions`] runs once. Later calls return the
//!    cached result, and the beam no longer accepts supports or loads.
//! 3. Query: [`Beam::shear_at`], [`Beam::moment_at`], [`Beam::sample_field`].
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::{Beam, BeamType};
//! use beam_core::loads::Load;
//! use beam_core::supports::Support;
//!
//! let mut beam = Beam::new(5000.0, BeamType::SimplySupported).unwrap();
//! beam.add_support(Support::pinned(0.0).unwrap()).unwrap();
//! beam.add_support(Support::roller(5000.0).unwrap()).unwrap();
//! beam.add_load(Load::point(1000.0, 2000.0).unwrap()).unwrap();
//! beam.add_load(Load::udl(0.2, 0.0, 5000.0).unwrap()).unwrap();
//!
//! let reactions = beam.calculate_reactions().unwrap();
//! assert!((reactions.total_force() - 2000.0).abs() < 1e-9);
//!
//! let diagrams = beam.sample_field(101).unwrap();
//! println!("Max moment: {:.0} N*mm", diagrams.max_positive_moment);
//! ```

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::diagrams::{self, BeamDiagrams, FieldPoint};
use super::reactions::{self, beam_end, BeamEnd, SolvedReactions};
use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::loads::Load;
use crate::supports::Support;
use crate::units::UnitValue;

/// Default number of grid cells used when integrating shear for a point query
pub const DEFAULT_INTEGRATION_SEGMENTS: usize = 1000;

// =============================================================================
// BEAM TYPE
// =============================================================================

/// Structural configuration, which selects the reaction-solving strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeamType {
    /// Two vertical supports at the ends
    SimplySupported,
    /// Single fixed support at the left end
    Cantilever,
    /// Fixed at both ends (single full-span UDL only)
    Fixed,
    /// Multi-span continuous beam (not solved)
    Continuous,
    /// Fixed at the left end, roller at the right (single full-span UDL only)
    ProppedCantilever,
    /// Two vertical supports anywhere along the beam
    Overhanging,
}

impl BeamType {
    pub const ALL: [BeamType; 6] = [
        BeamType::SimplySupported,
        BeamType::Cantilever,
        BeamType::Fixed,
        BeamType::Continuous,
        BeamType::ProppedCantilever,
        BeamType::Overhanging,
    ];

    /// Name used in model files and error messages
    pub fn code(&self) -> &'static str {
        match self {
            BeamType::SimplySupported => "simply_supported",
            BeamType::Cantilever => "cantilever",
            BeamType::Fixed => "fixed",
            BeamType::Continuous => "continuous",
            BeamType::ProppedCantilever => "propped_cantilever",
            BeamType::Overhanging => "overhanging",
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            BeamType::SimplySupported => "Simply Supported",
            BeamType::Cantilever => "Cantilever",
            BeamType::Fixed => "Fixed-Fixed",
            BeamType::Continuous => "Continuous",
            BeamType::ProppedCantilever => "Propped Cantilever",
            BeamType::Overhanging => "Overhanging",
        }
    }

    /// True if reactions come from equilibrium alone
    pub fn is_determinate(&self) -> bool {
        matches!(
            self,
            BeamType::SimplySupported | BeamType::Cantilever | BeamType::Overhanging
        )
    }
}

impl fmt::Display for BeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for BeamType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeamType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == s)
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "beam_type",
                    s,
                    "Expected one of: simply_supported, cantilever, fixed, continuous, \
                     propped_cantilever, overhanging",
                )
            })
    }
}

// =============================================================================
// BEAM
// =============================================================================

/// A beam with its supports, loads and (once solved) reactions
#[derive(Debug, Clone, Serialize)]
pub struct Beam {
    label: String,
    /// Length (mm)
    length: f64,
    beam_type: BeamType,
    supports: Vec<Support>,
    loads: Vec<Load>,
    #[serde(skip)]
    integration_segments: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<SolvedReactions>,
}

impl Beam {
    /// Create a beam of `length` mm
    pub fn new(length: f64, beam_type: BeamType) -> CalcResult<Self> {
        let length = ensure_finite("length", length)?;
        if length <= 0.0 {
            return Err(CalcError::invalid_input(
                "length",
                length.to_string(),
                "Beam length must be positive",
            ));
        }
        Ok(Beam {
            label: String::new(),
            length,
            beam_type,
            supports: Vec::new(),
            loads: Vec::new(),
            integration_segments: DEFAULT_INTEGRATION_SEGMENTS,
            solution: None,
        })
    }

    /// Create a beam from a unit-tagged length
    pub fn with_units(length: &UnitValue, beam_type: BeamType) -> CalcResult<Self> {
        Self::new(length.to_length()?, beam_type)
    }

    /// Set a user label (builder pattern)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Grid cells used by [`Beam::moment_at`] to integrate shear (minimum 1)
    pub fn with_integration_segments(mut self, segments: usize) -> Self {
        self.integration_segments = segments.max(1);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Length (mm)
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn beam_type(&self) -> BeamType {
        self.beam_type
    }

    /// Supports in insertion order (reactions filled in once solved)
    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    /// Loads in insertion order
    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    /// Sum of all load resultants (N)
    pub fn total_load(&self) -> f64 {
        self.loads.iter().map(Load::total_force).sum()
    }

    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Cached solve result, if any
    pub fn reactions(&self) -> Option<&SolvedReactions> {
        self.solution.as_ref()
    }

    fn ensure_editable(&self) -> CalcResult<()> {
        if self.is_solved() {
            return Err(CalcError::invalid_configuration(
                self.beam_type.code(),
                "Beam has already been solved and can no longer be modified",
            ));
        }
        Ok(())
    }

    fn ensure_on_beam(&self, field: &str, position: f64) -> CalcResult<()> {
        if !(0.0..=self.length).contains(&position) {
            return Err(CalcError::out_of_range(field, position, 0.0, self.length));
        }
        Ok(())
    }

    /// Position on the beam, with values within tolerance of an end moved onto it
    fn snap_to_beam(&self, field: &str, position: f64) -> CalcResult<f64> {
        let position = ensure_finite(field, position)?;
        let snapped = match beam_end(position, self.length) {
            Some(BeamEnd::Left) => 0.0,
            Some(BeamEnd::Right) => self.length,
            None => position,
        };
        self.ensure_on_beam(field, snapped)?;
        Ok(snapped)
    }

    /// Attach a support; returns its index
    pub fn add_support(&mut self, support: Support) -> CalcResult<usize> {
        self.ensure_editable()?;
        let position = self.snap_to_beam("support.position", support.position())?;
        let support = support.placed_at(position);
        debug!("attaching support {}", support.descriptor());
        self.supports.push(support);
        Ok(self.supports.len() - 1)
    }

    /// Attach a load; returns its index
    pub fn add_load(&mut self, load: Load) -> CalcResult<usize> {
        self.ensure_editable()?;
        load.validate()?;
        let load = load.map_positions(|field, value| self.snap_to_beam(field, value))?;
        let (start, end) = load.extent();
        debug!("attaching {} load over [{}, {}]mm", load.display_name(), start, end);
        self.loads.push(load);
        Ok(self.loads.len() - 1)
    }

    /// Solve support reactions.
    ///
    /// The first successful call solves and stores the result on the supports;
    /// every later call returns that cached result untouched. A failed solve
    /// changes nothing.
    pub fn calculate_reactions(&mut self) -> CalcResult<&SolvedReactions> {
        if self.solution.is_some() {
            debug!("reactions already solved for '{}', returning cached result", self.label);
        } else {
            let solved = reactions::solve(self.beam_type, self.length, &self.supports, &self.loads)?;
            for (support, reaction) in self.supports.iter_mut().zip(&solved.reactions) {
                support.apply_reaction(reaction.force, reaction.moment.unwrap_or(0.0));
            }
            self.solution = Some(solved);
        }
        self.solution.as_ref().ok_or(CalcError::NotSolved)
    }

    fn ensure_solved(&self) -> CalcResult<()> {
        if self.is_solved() {
            Ok(())
        } else {
            Err(CalcError::NotSolved)
        }
    }

    fn ensure_query(&self, x: f64) -> CalcResult<()> {
        self.ensure_solved()?;
        ensure_finite("x", x)?;
        self.ensure_on_beam("x", x)
    }

    /// Shear force at `x` mm (N)
    pub fn shear_at(&self, x: f64) -> CalcResult<f64> {
        self.ensure_query(x)?;
        Ok(diagrams::shear_at(&self.supports, &self.loads, x))
    }

    /// Bending moment at `x` mm (N*mm)
    pub fn moment_at(&self, x: f64) -> CalcResult<f64> {
        self.ensure_query(x)?;
        let segments = ((self.integration_segments as f64) * x / self.length).ceil() as usize;
        Ok(diagrams::moment_at(&self.supports, &self.loads, self.length, x, segments))
    }

    /// Shear and moment at `x` mm
    pub fn field_at(&self, x: f64) -> CalcResult<FieldPoint> {
        Ok(FieldPoint {
            x,
            shear: self.shear_at(x)?,
            moment: self.moment_at(x)?,
        })
    }

    /// Shear and moment at `samples` uniformly spaced positions from 0 to length
    pub fn sample_field(&self, samples: usize) -> CalcResult<BeamDiagrams> {
        self.ensure_solved()?;
        if samples < 2 {
            return Err(CalcError::invalid_input(
                "samples",
                samples.to_string(),
                "At least 2 samples are needed to cover both ends",
            ));
        }
        Ok(diagrams::sample(&self.supports, &self.loads, self.length, samples))
    }

    /// `(force, moment)` equilibrium residuals with moments about `reference` mm
    pub fn equilibrium_residual(&self, reference: f64) -> CalcResult<(f64, f64)> {
        let solved = self.solution.as_ref().ok_or(CalcError::NotSolved)?;
        Ok(solved.equilibrium_residual(&self.loads, reference))
    }
}
