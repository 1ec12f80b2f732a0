//! # Beam Loads
//!
//! The closed set of loads a beam can carry. Every variant answers the same four
//! questions the solver and the diagram builder ask:
//!
//! - [`Load::total_force`] - resultant vertical force
//! - [`Load::moment_about`] - moment of that force about a reference position
//! - [`Load::cumulative_force`] - force applied between the left end and `x`
//! - [`Load::cumulative_moment`] - applied couples between the left end and `x`
//!
//! ## Sign Convention
//!
//! - Forces: downward positive
//! - Moments: clockwise positive about the reference point
//!
//! All values are stored in internal units (mm, N, N/mm, N*mm). The `*_units`
//! constructors convert unit-tagged inputs once, at construction.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::loads::Load;
//! use beam_core::units::UnitValue;
//!
//! let point = Load::point(1000.0, 2000.0).unwrap();
//! assert_eq!(point.total_force(), 1000.0);
//! assert_eq!(point.moment_about(0.0), 2_000_000.0);
//!
//! let udl = Load::udl_units(
//!     &UnitValue::new(0.2, "kN/m"),
//!     &UnitValue::new(0.0, "m"),
//!     &UnitValue::new(5.0, "m"),
//! ).unwrap();
//! assert!((udl.total_force() - 1000.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::units::UnitValue;

/// A load applied to the beam (internal units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Load {
    /// Concentrated force (N) at a position (mm)
    Point {
        magnitude: f64,
        position: f64,
        /// Clockwise angle to the beam axis (degrees). Recorded for reporting;
        /// the load is always resolved as vertical.
        #[serde(default = "vertical_angle")]
        angle_deg: f64,
    },

    /// Constant intensity (N/mm) between `start` and `end` (mm)
    UniformDistributed { magnitude: f64, start: f64, end: f64 },

    /// Intensity ramping linearly from `start_magnitude` at `start` to
    /// `end_magnitude` at `end` (N/mm, mm)
    UniformVarying {
        start_magnitude: f64,
        end_magnitude: f64,
        start: f64,
        end: f64,
    },

    /// Pure couple (N*mm) at a position (mm)
    Moment { magnitude: f64, position: f64 },
}

fn vertical_angle() -> f64 {
    90.0
}

fn ensure_ordered(start: f64, end: f64) -> CalcResult<()> {
    if start > end {
        return Err(CalcError::invalid_input(
            "start",
            start.to_string(),
            format!("Load start must not be past its end ({})", end),
        ));
    }
    Ok(())
}

impl Load {
    // ------------------------------------------------------------------
    // Constructors (internal units)
    // ------------------------------------------------------------------

    /// Point load of `magnitude` N at `position` mm
    pub fn point(magnitude: f64, position: f64) -> CalcResult<Self> {
        Ok(Load::Point {
            magnitude: ensure_finite("magnitude", magnitude)?,
            position: ensure_finite("position", position)?,
            angle_deg: vertical_angle(),
        })
    }

    /// Uniformly distributed load of `magnitude` N/mm over `[start, end]` mm
    pub fn udl(magnitude: f64, start: f64, end: f64) -> CalcResult<Self> {
        let magnitude = ensure_finite("magnitude", magnitude)?;
        let start = ensure_finite("start", start)?;
        let end = ensure_finite("end", end)?;
        ensure_ordered(start, end)?;
        Ok(Load::UniformDistributed { magnitude, start, end })
    }

    /// Linearly varying load from `start_magnitude` to `end_magnitude` N/mm
    pub fn uvl(start_magnitude: f64, end_magnitude: f64, start: f64, end: f64) -> CalcResult<Self> {
        let start_magnitude = ensure_finite("start_magnitude", start_magnitude)?;
        let end_magnitude = ensure_finite("end_magnitude", end_magnitude)?;
        let start = ensure_finite("start", start)?;
        let end = ensure_finite("end", end)?;
        ensure_ordered(start, end)?;
        Ok(Load::UniformVarying {
            start_magnitude,
            end_magnitude,
            start,
            end,
        })
    }

    /// Applied couple of `magnitude` N*mm at `position` mm
    pub fn moment(magnitude: f64, position: f64) -> CalcResult<Self> {
        Ok(Load::Moment {
            magnitude: ensure_finite("magnitude", magnitude)?,
            position: ensure_finite("position", position)?,
        })
    }

    /// Set the recorded angle of a point load (no effect on other variants)
    pub fn with_angle(mut self, angle: f64) -> Self {
        if let Load::Point { angle_deg, .. } = &mut self {
            *angle_deg = angle;
        }
        self
    }

    // ------------------------------------------------------------------
    // Constructors (unit-tagged)
    // ------------------------------------------------------------------

    /// Point load from unit-tagged force and position
    pub fn point_units(magnitude: &UnitValue, position: &UnitValue) -> CalcResult<Self> {
        Self::point(magnitude.to_force()?, position.to_length()?)
    }

    /// UDL from unit-tagged intensity and extent
    pub fn udl_units(magnitude: &UnitValue, start: &UnitValue, end: &UnitValue) -> CalcResult<Self> {
        Self::udl(magnitude.to_line_load()?, start.to_length()?, end.to_length()?)
    }

    /// UVL from unit-tagged intensities and extent
    pub fn uvl_units(
        start_magnitude: &UnitValue,
        end_magnitude: &UnitValue,
        start: &UnitValue,
        end: &UnitValue,
    ) -> CalcResult<Self> {
        Self::uvl(
            start_magnitude.to_line_load()?,
            end_magnitude.to_line_load()?,
            start.to_length()?,
            end.to_length()?,
        )
    }

    /// Applied couple from unit-tagged moment and position
    pub fn moment_units(magnitude: &UnitValue, position: &UnitValue) -> CalcResult<Self> {
        Self::moment(magnitude.to_moment()?, position.to_length()?)
    }

    // ------------------------------------------------------------------
    // Statics
    // ------------------------------------------------------------------

    /// Resultant vertical force (N)
    pub fn total_force(&self) -> f64 {
        match *self {
            Load::Point { magnitude, .. } => magnitude,
            Load::UniformDistributed { magnitude, start, end } => magnitude * (end - start),
            Load::UniformVarying {
                start_magnitude,
                end_magnitude,
                start,
                end,
            } => (start_magnitude + end_magnitude) / 2.0 * (end - start),
            Load::Moment { .. } => 0.0,
        }
    }

    /// Clockwise moment about `reference` (N*mm).
    ///
    /// A couple contributes its own magnitude regardless of the reference.
    pub fn moment_about(&self, reference: f64) -> f64 {
        match *self {
            Load::Point { magnitude, position, .. } => magnitude * (position - reference),
            Load::UniformDistributed { start, end, .. } => {
                self.total_force() * ((start + end) / 2.0 - reference)
            }
            Load::UniformVarying {
                start_magnitude,
                end_magnitude,
                start,
                end,
            } => {
                // First moment of the ramp about its start: L²(w0 + 2·w1)/6.
                // Equal to total·(centroid - start) whenever a centroid exists,
                // and still defined when w0 + w1 = 0.
                let span = end - start;
                let first_moment = span * span * (start_magnitude + 2.0 * end_magnitude) / 6.0;
                self.total_force() * (start - reference) + first_moment
            }
            Load::Moment { magnitude, .. } => magnitude,
        }
    }

    /// Force applied between the left end and `x` (N)
    pub fn cumulative_force(&self, x: f64) -> f64 {
        match *self {
            Load::Point { magnitude, position, .. } => {
                if x >= position {
                    magnitude
                } else {
                    0.0
                }
            }
            Load::UniformDistributed { magnitude, start, end } => {
                if x <= start {
                    0.0
                } else if x >= end {
                    magnitude * (end - start)
                } else {
                    magnitude * (x - start)
                }
            }
            Load::UniformVarying {
                start_magnitude,
                end_magnitude,
                start,
                end,
            } => {
                if x <= start || end <= start {
                    return 0.0;
                }
                let slope = (end_magnitude - start_magnitude) / (end - start);
                let covered = x.min(end) - start;
                start_magnitude * covered + 0.5 * slope * covered * covered
            }
            Load::Moment { .. } => 0.0,
        }
    }

    /// Applied couples between the left end and `x` (N*mm)
    pub fn cumulative_moment(&self, x: f64) -> f64 {
        match *self {
            Load::Moment { magnitude, position } if x >= position => magnitude,
            _ => 0.0,
        }
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// `(start, end)` of the loaded region; point-like loads return `(p, p)`
    pub fn extent(&self) -> (f64, f64) {
        match *self {
            Load::Point { position, .. } | Load::Moment { position, .. } => (position, position),
            Load::UniformDistributed { start, end, .. } | Load::UniformVarying { start, end, .. } => {
                (start, end)
            }
        }
    }

    /// Position where the resultant acts, if the load has a resultant force
    pub fn centroid(&self) -> Option<f64> {
        match *self {
            Load::Point { position, .. } => Some(position),
            Load::UniformDistributed { start, end, .. } => Some((start + end) / 2.0),
            Load::UniformVarying {
                start_magnitude,
                end_magnitude,
                start,
                end,
            } => {
                let span = end - start;
                if start_magnitude == end_magnitude {
                    Some(start + span / 2.0)
                } else if start_magnitude + end_magnitude == 0.0 {
                    None
                } else {
                    Some(
                        start
                            + span * (2.0 * end_magnitude + start_magnitude)
                                / (3.0 * (start_magnitude + end_magnitude)),
                    )
                }
            }
            Load::Moment { .. } => None,
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Load::Point { .. } => "Point",
            Load::UniformDistributed { .. } => "Uniform Distributed",
            Load::UniformVarying { .. } => "Uniformly Varying",
            Load::Moment { .. } => "Moment",
        }
    }

    /// Intensity of a UDL covering `[0, length]`, within `tolerance` mm
    pub(crate) fn full_span_udl(&self, length: f64, tolerance: f64) -> Option<f64> {
        match *self {
            Load::UniformDistributed { magnitude, start, end }
                if start.abs() <= tolerance && (end - length).abs() <= tolerance =>
            {
                Some(magnitude)
            }
            _ => None,
        }
    }

    /// Re-check what the constructors enforce: finite values, `start <= end`.
    ///
    /// Variant fields are public and loads deserialize directly, so a `Load`
    /// can exist without passing through a constructor.
    pub fn validate(&self) -> CalcResult<()> {
        match *self {
            Load::Point {
                magnitude,
                position,
                angle_deg,
            } => {
                ensure_finite("magnitude", magnitude)?;
                ensure_finite("position", position)?;
                ensure_finite("angle_deg", angle_deg)?;
            }
            Load::UniformDistributed { magnitude, start, end } => {
                ensure_finite("magnitude", magnitude)?;
                ensure_ordered(ensure_finite("start", start)?, ensure_finite("end", end)?)?;
            }
            Load::UniformVarying {
                start_magnitude,
                end_magnitude,
                start,
                end,
            } => {
                ensure_finite("start_magnitude", start_magnitude)?;
                ensure_finite("end_magnitude", end_magnitude)?;
                ensure_ordered(ensure_finite("start", start)?, ensure_finite("end", end)?)?;
            }
            Load::Moment { magnitude, position } => {
                ensure_finite("magnitude", magnitude)?;
                ensure_finite("position", position)?;
            }
        }
        Ok(())
    }

    /// Rewrite every position through `f`, which receives a field name and value
    pub(crate) fn map_positions(
        self,
        mut f: impl FnMut(&str, f64) -> CalcResult<f64>,
    ) -> CalcResult<Self> {
        Ok(match self {
            Load::Point {
                magnitude,
                position,
                angle_deg,
            } => Load::Point {
                magnitude,
                position: f("load.position", position)?,
                angle_deg,
            },
            Load::UniformDistributed { magnitude, start, end } => Load::UniformDistributed {
                magnitude,
                start: f("load.start", start)?,
                end: f("load.end", end)?,
            },
            Load::UniformVarying {
                start_magnitude,
                end_magnitude,
                start,
                end,
            } => Load::UniformVarying {
                start_magnitude,
                end_magnitude,
                start: f("load.start", start)?,
                end: f("load.end", end)?,
            },
            Load::Moment { magnitude, position } => Load::Moment {
                magnitude,
                position: f("load.position", position)?,
            },
        })
    }
}
