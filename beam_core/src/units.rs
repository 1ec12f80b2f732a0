//! # Unit Conversion
//!
//! Scalar unit conversion against a fixed factor table. The engine works in a
//! single internal unit system and every input is converted once, at the API
//! boundary:
//!
//! - Length / position: millimetres (`mm`)
//! - Force: newtons (`N`)
//! - Distributed load: newtons per millimetre (`N/mm`)
//! - Moment: newton-millimetres (`N*mm`)
//!
//! ## Lookup Rules
//!
//! Each factor is tabulated for one ordered pair `from -> to`. A lookup tries the
//! direct pair first (multiply), then the inverse pair (divide). There is no
//! chaining: `in -> mm` and `mm -> m` are tabulated, but `in -> m` is not, and
//! asking for it is an [`CalcError::UnsupportedConversion`].
//!
//! ## Example
//!
//! ```rust
//! use beam_core::units::{convert, UnitValue};
//!
//! assert_eq!(convert(2.5, "m", "mm").unwrap(), 2500.0);
//! assert_eq!(convert(2500.0, "mm", "m").unwrap(), 2.5);
//! assert!(convert(1.0, "in", "m").is_err());
//!
//! let load = UnitValue::new(1.5, "kN");
//! assert_eq!(load.to("N").unwrap(), 1500.0);
//! ```

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Internal length unit
pub const LENGTH_UNIT: &str = "mm";
/// Internal force unit
pub const FORCE_UNIT: &str = "N";
/// Internal distributed-load unit
pub const LINE_LOAD_UNIT: &str = "N/mm";
/// Internal moment unit
pub const MOMENT_UNIT: &str = "N*mm";

// ============================================================================
// Factor Table
// ============================================================================

/// `(from, to, factor)` such that `value_to = value_from * factor`.
const FACTORS: &[(&str, &str, f64)] = &[
    // Length
    ("m", "mm", 1000.0),
    ("cm", "mm", 10.0),
    ("in", "mm", 25.4),
    ("ft", "mm", 304.8),
    ("ft", "m", 0.3048),
    ("in", "cm", 2.54),
    // Mass
    ("lb", "kg", 0.453_592_37),
    // Force
    ("kN", "N", 1000.0),
    ("lbf", "N", 4.448_221_615_260_5),
    ("kip", "N", 4_448.221_615_260_5),
    // Distributed load
    ("kN/m", "N/mm", 1.0),
    ("N/m", "N/mm", 0.001),
    ("lbf/ft", "N/mm", 0.014_593_902_937_206_363),
    ("lbf/in", "N/mm", 0.175_126_835_246_476_38),
    ("kip/ft", "N/mm", 14.593_902_937_206_364),
    // Moment
    ("N*m", "N*mm", 1000.0),
    ("kN*m", "N*mm", 1.0e6),
    ("lbf*in", "N*mm", 112.984_829_027_616_68),
    ("lbf*ft", "N*mm", 1_355.817_948_331_400_4),
    ("kip*ft", "N*mm", 1_355_817.948_331_400_3),
    // Stress / pressure
    ("kPa", "Pa", 1000.0),
    ("MPa", "Pa", 1.0e6),
    // Area, volume, section modulus, second moment of area
    ("ft2", "m2", 0.092_903_04),
    ("ft3", "m3", 0.028_316_846_592),
    ("in3", "mm3", 16_387.064),
    ("in4", "mm4", 416_231.425_6),
    ("ft4", "mm4", 8_630_974_841.241_602),
    ("m4", "mm4", 1.0e12),
];

static CONVERSION_TABLE: Lazy<HashMap<(&'static str, &'static str), f64>> = Lazy::new(|| {
    FACTORS
        .iter()
        .map(|&(from, to, factor)| ((from, to), factor))
        .collect()
});

/// Convert `value` from unit `from` to unit `to`.
///
/// Identical symbols return the value unchanged, even for symbols the table
/// does not know about.
pub fn convert(value: f64, from: &str, to: &str) -> CalcResult<f64> {
    if from == to {
        return Ok(value);
    }
    if let Some(factor) = CONVERSION_TABLE.get(&(from, to)) {
        return Ok(value * factor);
    }
    if let Some(factor) = CONVERSION_TABLE.get(&(to, from)) {
        return Ok(value / factor);
    }
    Err(CalcError::unsupported_conversion(from, to))
}

/// Whether `from -> to` resolves, directly or through the inverse entry.
pub fn is_supported(from: &str, to: &str) -> bool {
    from == to
        || CONVERSION_TABLE.contains_key(&(from, to))
        || CONVERSION_TABLE.contains_key(&(to, from))
}

/// Every tabulated `(from, to)` pair (direct entries only).
pub fn tabulated_pairs() -> impl Iterator<Item = (&'static str, &'static str)> {
    FACTORS.iter().map(|&(from, to, _)| (from, to))
}

// ============================================================================
// Unit-Tagged Values
// ============================================================================

/// A scalar paired with its unit symbol.
///
/// This is the shape inputs take at the API boundary (and in model files):
///
/// ```json
/// { "value": 5.0, "unit": "m" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitValue {
    pub value: f64,
    pub unit: String,
}

impl UnitValue {
    /// Create a unit-tagged value
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        UnitValue {
            value,
            unit: unit.into(),
        }
    }

    /// Length in millimetres
    pub fn mm(value: f64) -> Self {
        Self::new(value, LENGTH_UNIT)
    }

    /// Force in newtons
    pub fn newtons(value: f64) -> Self {
        Self::new(value, FORCE_UNIT)
    }

    /// Distributed load in N/mm
    pub fn n_per_mm(value: f64) -> Self {
        Self::new(value, LINE_LOAD_UNIT)
    }

    /// Moment in N*mm
    pub fn n_mm(value: f64) -> Self {
        Self::new(value, MOMENT_UNIT)
    }

    /// Convert to the target unit
    pub fn to(&self, unit: &str) -> CalcResult<f64> {
        convert(self.value, &self.unit, unit)
    }

    pub(crate) fn to_length(&self) -> CalcResult<f64> {
        self.to(LENGTH_UNIT)
    }

    pub(crate) fn to_force(&self) -> CalcResult<f64> {
        self.to(FORCE_UNIT)
    }

    pub(crate) fn to_line_load(&self) -> CalcResult<f64> {
        self.to(LINE_LOAD_UNIT)
    }

    pub(crate) fn to_moment(&self) -> CalcResult<f64> {
        self.to(MOMENT_UNIT)
    }
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
