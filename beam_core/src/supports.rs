//! # Supports
//!
//! Boundary conditions along the beam. A support is a value type: position and
//! kind are fixed at construction, and the reaction fields start at zero until
//! the owning [`Beam`](crate::calculations::Beam) applies a solve result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::units::UnitValue;

/// Support condition at a point on the beam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SupportKind {
    /// Pinned/hinged support - restrains vertical displacement, allows rotation
    #[default]
    Pinned,

    /// Roller support - same as pinned for vertical beam analysis
    Roller,

    /// Fixed support - restrains both displacement and rotation
    ///
    /// Carries a moment reaction in addition to the vertical force.
    Fixed,
}

impl SupportKind {
    /// All support kinds
    pub const ALL: [SupportKind; 3] = [SupportKind::Pinned, SupportKind::Roller, SupportKind::Fixed];

    /// Returns true if this support restrains rotation
    pub fn restrains_rotation(&self) -> bool {
        matches!(self, SupportKind::Fixed)
    }

    /// Lower-case name used in model files and descriptors
    pub fn code(&self) -> &'static str {
        match self {
            SupportKind::Pinned => "pinned",
            SupportKind::Roller => "roller",
            SupportKind::Fixed => "fixed",
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportKind::Pinned => "Pinned",
            SupportKind::Roller => "Roller",
            SupportKind::Fixed => "Fixed",
        }
    }
}

impl fmt::Display for SupportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for SupportKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SupportKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.code() == s)
            .ok_or_else(|| {
                CalcError::invalid_input("kind", s, "Expected one of: pinned, roller, fixed")
            })
    }
}

/// A support at a position along the beam (mm) with its solved reactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Support {
    position: f64,
    kind: SupportKind,
    /// Upward reaction force (N)
    reaction_force: f64,
    /// End bending moment (N*mm); always zero unless `kind` is fixed
    reaction_moment: f64,
}

impl Support {
    /// Create a support at `position` mm
    pub fn new(position: f64, kind: SupportKind) -> CalcResult<Self> {
        Ok(Support {
            position: ensure_finite("position", position)?,
            kind,
            reaction_force: 0.0,
            reaction_moment: 0.0,
        })
    }

    /// Create a support from a unit-tagged position
    pub fn with_units(position: &UnitValue, kind: SupportKind) -> CalcResult<Self> {
        Self::new(position.to_length()?, kind)
    }

    /// Pinned support at `position` mm
    pub fn pinned(position: f64) -> CalcResult<Self> {
        Self::new(position, SupportKind::Pinned)
    }

    /// Roller support at `position` mm
    pub fn roller(position: f64) -> CalcResult<Self> {
        Self::new(position, SupportKind::Roller)
    }

    /// Fixed support at `position` mm
    pub fn fixed(position: f64) -> CalcResult<Self> {
        Self::new(position, SupportKind::Fixed)
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn kind(&self) -> SupportKind {
        self.kind
    }

    /// Solved reaction force (N), zero before solving
    pub fn reaction_force(&self) -> f64 {
        self.reaction_force
    }

    /// Solved end moment (N*mm), zero before solving and for non-fixed kinds
    pub fn reaction_moment(&self) -> f64 {
        self.reaction_moment
    }

    /// Identifies the support in reaction reports, e.g. `fixed@0mm`
    pub fn descriptor(&self) -> String {
        format!("{}@{}mm", self.kind, self.position)
    }

    /// Same support moved to `position`, with reactions cleared
    pub(crate) fn placed_at(self, position: f64) -> Self {
        Support {
            position,
            kind: self.kind,
            reaction_force: 0.0,
            reaction_moment: 0.0,
        }
    }

    pub(crate) fn apply_reaction(&mut self, force: f64, moment: f64) {
        self.reaction_force = force;
        self.reaction_moment = if self.kind.restrains_rotation() { moment } else { 0.0 };
    }
}
