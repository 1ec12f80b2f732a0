//! # Reaction Solving
//!
//! One solving strategy per [`BeamType`], selected by an exhaustive `match`.
//! Each strategy checks its structural preconditions (support count, kind and
//! position, and for the indeterminate cases the load set) before computing
//! anything, then returns a [`SolvedReactions`] value. Nothing here mutates the
//! beam; [`Beam`](super::Beam) applies the result to its supports.
//!
//! ## Determinate Cases
//!
//! Two-support beams (simply supported, overhanging) use the two equilibrium
//! equations with moments taken about the left support A:
//!
//! ```text
//! R_B = ΣM_A / (x_B - x_A)
//! R_A = ΣF - R_B
//! ```
//!
//! A cantilever carries everything at its fixed end: `R = ΣF`, `M = -ΣM_0`.
//!
//! ## Indeterminate Special Cases
//!
//! Only a single full-span UDL `w` is handled, using the standard closed forms:
//!
//! | Beam | Reactions | End moments |
//! |---|---|---|
//! | Fixed-fixed | `wL/2` each | `-wL²/12` each |
//! | Propped cantilever | `5wL/8` fixed, `3wL/8` prop | `-wL²/8` at the fixed end |
//!
//! ## Reported Moments
//!
//! `moment` is the end bending moment at the support (hogging negative). The
//! couple the support exerts on the beam is `+moment` at the left end and
//! `-moment` at the right end; [`SupportReaction::couple_on_beam`] applies that
//! orientation for equilibrium checks.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::beam::BeamType;
use crate::errors::{CalcError, CalcResult};
use crate::loads::Load;
use crate::supports::{Support, SupportKind};

/// Prop reaction coefficient for a propped cantilever under full-span UDL.
pub const PROP_REACTION_COEFFICIENT: f64 = 3.0 / 8.0;

/// Solved reactions for a single support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportReaction {
    /// Index of the support in the beam's insertion order
    pub index: usize,
    /// Support position (mm)
    pub position: f64,
    pub kind: SupportKind,
    /// Upward reaction force (N)
    pub force: f64,
    /// End bending moment (N*mm); `None` unless the support is fixed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moment: Option<f64>,
}

impl SupportReaction {
    /// Identifies the support in reports, e.g. `roller@5000mm`
    pub fn descriptor(&self) -> String {
        format!("{}@{}mm", self.kind, self.position)
    }

    /// Clockwise couple this support applies to a beam of `length` mm
    pub fn couple_on_beam(&self, length: f64) -> f64 {
        let moment = self.moment.unwrap_or(0.0);
        match beam_end(self.position, length) {
            Some(BeamEnd::Right) => -moment,
            _ => moment,
        }
    }
}

/// Result of a reaction solve, one entry per support in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedReactions {
    pub beam_type: BeamType,
    /// Beam length (mm)
    pub length: f64,
    pub reactions: Vec<SupportReaction>,
}

impl SolvedReactions {
    /// Iterate reactions in support insertion order
    pub fn iter(&self) -> impl Iterator<Item = &SupportReaction> {
        self.reactions.iter()
    }

    /// Reaction for the support at `index`
    pub fn get(&self, index: usize) -> Option<&SupportReaction> {
        self.reactions.get(index)
    }

    /// Reaction for the support with the given descriptor (e.g. `fixed@0mm`)
    pub fn by_descriptor(&self, descriptor: &str) -> Option<&SupportReaction> {
        self.reactions.iter().find(|r| r.descriptor() == descriptor)
    }

    /// Reactions keyed by support descriptor
    pub fn to_map(&self) -> BTreeMap<String, SupportReaction> {
        self.reactions
            .iter()
            .map(|r| (r.descriptor(), r.clone()))
            .collect()
    }

    /// Sum of all reaction forces (N)
    pub fn total_force(&self) -> f64 {
        self.reactions.iter().map(|r| r.force).sum()
    }

    /// Force and moment residuals of reactions plus `loads`, with moments taken
    /// about `reference` (mm). Both are zero for a beam in equilibrium.
    pub fn equilibrium_residual(&self, loads: &[Load], reference: f64) -> (f64, f64) {
        let applied_force: f64 = loads.iter().map(Load::total_force).sum();
        let applied_moment: f64 = loads.iter().map(|l| l.moment_about(reference)).sum();
        let reaction_moment: f64 = self
            .reactions
            .iter()
            .map(|r| -r.force * (r.position - reference) + r.couple_on_beam(self.length))
            .sum();
        (
            self.total_force() - applied_force,
            applied_moment + reaction_moment,
        )
    }
}

pub(crate) fn position_tolerance(length: f64) -> f64 {
    length.abs().max(1.0) * 1e-9
}

/// End of the beam a position sits at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BeamEnd {
    Left,
    Right,
}

/// Which end `position` lies on, within [`position_tolerance`]; the left end wins
/// on a beam too short to tell them apart
pub(crate) fn beam_end(position: f64, length: f64) -> Option<BeamEnd> {
    let tolerance = position_tolerance(length);
    if position.abs() <= tolerance {
        Some(BeamEnd::Left)
    } else if (position - length).abs() <= tolerance {
        Some(BeamEnd::Right)
    } else {
        None
    }
}

/// Solve support reactions for `beam_type`.
///
/// Pure function of its inputs; a failure leaves the caller's state untouched.
pub fn solve(
    beam_type: BeamType,
    length: f64,
    supports: &[Support],
    loads: &[Load],
) -> CalcResult<SolvedReactions> {
    debug!(
        "solving {} beam: length={}mm, {} supports, {} loads",
        beam_type,
        length,
        supports.len(),
        loads.len()
    );

    let check = Preconditions {
        beam_type,
        length,
        supports,
    };

    let values = match beam_type {
        BeamType::SimplySupported => simply_supported(&check, loads)?,
        BeamType::Cantilever => cantilever(&check, loads)?,
        BeamType::Fixed => fixed_fixed(&check, loads)?,
        BeamType::Continuous => {
            return Err(CalcError::not_implemented(
                "continuous beams require a moment distribution solver",
            ))
        }
        BeamType::ProppedCantilever => propped_cantilever(&check, loads)?,
        BeamType::Overhanging => overhanging(&check, loads)?,
    };

    let reactions = supports
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (support, (force, moment)))| SupportReaction {
            index,
            position: support.position(),
            kind: support.kind(),
            force,
            moment: support.kind().restrains_rotation().then_some(moment),
        })
        .collect();

    Ok(SolvedReactions {
        beam_type,
        length,
        reactions,
    })
}

// =============================================================================
// PRECONDITIONS
// =============================================================================

/// Structural checks shared by the strategies
struct Preconditions<'a> {
    beam_type: BeamType,
    length: f64,
    supports: &'a [Support],
}

impl Preconditions<'_> {
    fn fail(&self, reason: impl Into<String>) -> CalcError {
        CalcError::invalid_configuration(self.beam_type.code(), reason)
    }

    fn support_count(&self, expected: usize) -> CalcResult<()> {
        if self.supports.len() != expected {
            return Err(self.fail(format!(
                "Expected exactly {} support(s), found {}",
                expected,
                self.supports.len()
            )));
        }
        Ok(())
    }

    /// Support indices sorted by position (left to right)
    fn sorted(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.supports.len()).collect();
        order.sort_by(|&a, &b| {
            self.supports[a]
                .position()
                .total_cmp(&self.supports[b].position())
        });
        order
    }

    fn at(&self, index: usize, target: f64, label: &str) -> CalcResult<()> {
        let support = &self.supports[index];
        if (support.position() - target).abs() > position_tolerance(self.length) {
            return Err(self.fail(format!(
                "{} support must be at {}mm, found {}",
                label,
                target,
                support.descriptor()
            )));
        }
        Ok(())
    }

    fn kind(&self, index: usize, kind: SupportKind, label: &str) -> CalcResult<()> {
        let support = &self.supports[index];
        if support.kind() != kind {
            return Err(self.fail(format!(
                "{} support must be {}, found {}",
                label,
                kind,
                support.descriptor()
            )));
        }
        Ok(())
    }

    fn vertical_only(&self) -> CalcResult<()> {
        if let Some(support) = self.supports.iter().find(|s| s.kind().restrains_rotation()) {
            return Err(self.fail(format!(
                "Supports must provide vertical reaction only, found {}",
                support.descriptor()
            )));
        }
        Ok(())
    }

    /// Intensity of the single full-span UDL the closed forms require
    fn single_full_span_udl(&self, loads: &[Load]) -> CalcResult<f64> {
        if loads.len() != 1 {
            return Err(self.fail(format!(
                "Closed-form solution needs exactly one full-span UDL, found {} load(s)",
                loads.len()
            )));
        }
        loads[0]
            .full_span_udl(self.length, position_tolerance(self.length))
            .ok_or_else(|| {
                self.fail(format!(
                    "Closed-form solution needs a UDL spanning [0, {}], found {} load",
                    self.length,
                    loads[0].display_name()
                ))
            })
    }
}

// =============================================================================
// STRATEGIES
// =============================================================================

/// `(force, moment)` per support, in support insertion order
type ReactionValues = Vec<(f64, f64)>;

fn simply_supported(check: &Preconditions, loads: &[Load]) -> CalcResult<ReactionValues> {
    check.support_count(2)?;
    check.vertical_only()?;
    let order = check.sorted();
    check.at(order[0], 0.0, "Left")?;
    check.at(order[1], check.length, "Right")?;
    two_support_equilibrium(check, order[0], order[1], loads)
}

fn overhanging(check: &Preconditions, loads: &[Load]) -> CalcResult<ReactionValues> {
    check.support_count(2)?;
    check.vertical_only()?;
    let order = check.sorted();
    two_support_equilibrium(check, order[0], order[1], loads)
}

/// ΣF = 0 and ΣM about the left support = 0 for two vertical supports
fn two_support_equilibrium(
    check: &Preconditions,
    left: usize,
    right: usize,
    loads: &[Load],
) -> CalcResult<ReactionValues> {
    let a = check.supports[left].position();
    let b = check.supports[right].position();
    let span = b - a;
    if span <= position_tolerance(check.length) {
        return Err(check.fail("Supports must be at distinct positions"));
    }

    let total_force: f64 = loads.iter().map(Load::total_force).sum();
    let moment_about_a: f64 = loads.iter().map(|l| l.moment_about(a)).sum();

    let right_force = moment_about_a / span;
    let left_force = total_force - right_force;
    debug!("two-support solve: R_A={} N, R_B={} N", left_force, right_force);

    let mut values = vec![(0.0, 0.0); 2];
    values[left] = (left_force, 0.0);
    values[right] = (right_force, 0.0);
    Ok(values)
}

fn cantilever(check: &Preconditions, loads: &[Load]) -> CalcResult<ReactionValues> {
    check.support_count(1)?;
    check.kind(0, SupportKind::Fixed, "Cantilever")?;
    check.at(0, 0.0, "Cantilever")?;

    let force: f64 = loads.iter().map(Load::total_force).sum();
    let moment = -loads.iter().map(|l| l.moment_about(0.0)).sum::<f64>();
    debug!("cantilever solve: R={} N, M={} N*mm", force, moment);
    Ok(vec![(force, moment)])
}

fn fixed_fixed(check: &Preconditions, loads: &[Load]) -> CalcResult<ReactionValues> {
    check.support_count(2)?;
    let order = check.sorted();
    check.kind(order[0], SupportKind::Fixed, "Left")?;
    check.kind(order[1], SupportKind::Fixed, "Right")?;
    check.at(order[0], 0.0, "Left")?;
    check.at(order[1], check.length, "Right")?;
    let w = check.single_full_span_udl(loads)?;

    let l = check.length;
    let force = w * l / 2.0;
    let moment = -w * l * l / 12.0;
    Ok(vec![(force, moment); 2])
}

fn propped_cantilever(check: &Preconditions, loads: &[Load]) -> CalcResult<ReactionValues> {
    check.support_count(2)?;
    let order = check.sorted();
    check.kind(order[0], SupportKind::Fixed, "Left")?;
    check.kind(order[1], SupportKind::Roller, "Right")?;
    check.at(order[0], 0.0, "Left")?;
    check.at(order[1], check.length, "Right")?;
    let w = check.single_full_span_udl(loads)?;

    let l = check.length;
    let prop = PROP_REACTION_COEFFICIENT * w * l;
    let mut values = vec![(0.0, 0.0); 2];
    values[order[0]] = (w * l - prop, -w * l * l / 8.0);
    values[order[1]] = (prop, 0.0);
    Ok(values)
}
