//! # Shear and Moment Fields
//!
//! Rebuilds the internal force diagrams of a solved beam.
//!
//! Shear at `x` is the sum of reactions at or left of `x` minus the load applied
//! up to `x`. The bending moment is the running trapezoidal integral of that
//! shear, seeded with the end moment of a fixed support at `x = 0`, plus the
//! applied couples up to `x`. Couples don't show up in shear, so they have to
//! be added back as steps.
//!
//! Integration runs over the uniform grid with every load and support position
//! inserted as an extra node. Each interval is evaluated with the right-hand
//! limit at its start and the left-hand limit at its end, so jumps at point
//! loads and supports are integrated exactly instead of being smeared over one
//! grid cell.

use log::trace;
use serde::{Deserialize, Serialize};

use super::reactions::{beam_end, BeamEnd};
use crate::loads::Load;
use crate::supports::Support;

/// Shear and moment at one position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldPoint {
    /// Position from the left end (mm)
    pub x: f64,
    /// Shear force (N)
    pub shear: f64,
    /// Bending moment (N*mm)
    pub moment: f64,
}

/// Sampled diagrams and their extrema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamDiagrams {
    /// Uniformly spaced samples from 0 to the beam length
    pub points: Vec<FieldPoint>,

    /// Largest shear magnitude (N)
    pub max_shear: f64,
    /// Position of the largest shear magnitude (mm)
    pub max_shear_position: f64,

    /// Largest sagging moment (N*mm), zero if the beam never sags
    pub max_positive_moment: f64,
    pub max_positive_moment_position: f64,

    /// Largest hogging moment (N*mm, negative), zero if the beam never hogs
    pub max_negative_moment: f64,
    pub max_negative_moment_position: f64,
}

impl BeamDiagrams {
    fn from_points(points: Vec<FieldPoint>) -> Self {
        let mut diagrams = BeamDiagrams {
            points: Vec::new(),
            max_shear: 0.0,
            max_shear_position: 0.0,
            max_positive_moment: 0.0,
            max_positive_moment_position: 0.0,
            max_negative_moment: 0.0,
            max_negative_moment_position: 0.0,
        };

        for p in &points {
            if p.shear.abs() > diagrams.max_shear {
                diagrams.max_shear = p.shear.abs();
                diagrams.max_shear_position = p.x;
            }
            if p.moment > diagrams.max_positive_moment {
                diagrams.max_positive_moment = p.moment;
                diagrams.max_positive_moment_position = p.x;
            }
            if p.moment < diagrams.max_negative_moment {
                diagrams.max_negative_moment = p.moment;
                diagrams.max_negative_moment_position = p.x;
            }
        }

        diagrams.points = points;
        diagrams
    }

    /// `(x, shear)` pairs for plotting
    pub fn shear_diagram(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.shear)).collect()
    }

    /// `(x, moment)` pairs for plotting
    pub fn moment_diagram(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.moment)).collect()
    }
}

/// Shear at `x` (reactions at or left of `x`, loads up to and including `x`)
pub(crate) fn shear_at(supports: &[Support], loads: &[Load], x: f64) -> f64 {
    let reactions: f64 = supports
        .iter()
        .filter(|s| s.position() <= x)
        .map(Support::reaction_force)
        .sum();
    let applied: f64 = loads.iter().map(|l| l.cumulative_force(x)).sum();
    reactions - applied
}

/// Shear just left of `x`, excluding anything concentrated exactly at `x`
fn shear_before(supports: &[Support], loads: &[Load], x: f64) -> f64 {
    let reactions: f64 = supports
        .iter()
        .filter(|s| s.position() < x)
        .map(Support::reaction_force)
        .sum();
    let applied: f64 = loads
        .iter()
        .map(|l| match *l {
            Load::Point { magnitude, position, .. } => {
                if position < x {
                    magnitude
                } else {
                    0.0
                }
            }
            _ => l.cumulative_force(x),
        })
        .sum();
    reactions - applied
}

/// End moment of a fixed support sitting at the left end, else zero
fn initial_moment(supports: &[Support], length: f64) -> f64 {
    supports
        .iter()
        .find(|s| {
            s.kind().restrains_rotation() && beam_end(s.position(), length) == Some(BeamEnd::Left)
        })
        .map(Support::reaction_moment)
        .unwrap_or(0.0)
}

fn applied_couples(loads: &[Load], x: f64) -> f64 {
    loads.iter().map(|l| l.cumulative_moment(x)).sum()
}

/// Uniform grid over `[0, end]` merged with every load/support position inside it
fn integration_nodes(supports: &[Support], loads: &[Load], end: f64, segments: usize) -> Vec<f64> {
    let segments = segments.max(1);
    let mut nodes: Vec<f64> = (0..=segments)
        .map(|i| end * i as f64 / segments as f64)
        .collect();

    let breakpoints = supports
        .iter()
        .map(Support::position)
        .chain(loads.iter().flat_map(|l| {
            let (start, finish) = l.extent();
            [start, finish]
        }));
    nodes.extend(breakpoints.filter(|&p| p > 0.0 && p < end));

    nodes.sort_by(f64::total_cmp);
    nodes.dedup();
    nodes
}

/// Running integral of shear at each node
fn integrate_shear(supports: &[Support], loads: &[Load], nodes: &[f64]) -> Vec<f64> {
    let mut integral = Vec::with_capacity(nodes.len());
    let mut running = 0.0;
    integral.push(running);
    for pair in nodes.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let v_start = shear_at(supports, loads, a);
        let v_end = shear_before(supports, loads, b);
        running += 0.5 * (v_start + v_end) * (b - a);
        integral.push(running);
    }
    integral
}

/// Bending moment at `x` on a beam of `length`, integrating over `segments`
/// grid cells on `[0, x]`
pub(crate) fn moment_at(
    supports: &[Support],
    loads: &[Load],
    length: f64,
    x: f64,
    segments: usize,
) -> f64 {
    let nodes = integration_nodes(supports, loads, x, segments);
    let integral = integrate_shear(supports, loads, &nodes);
    let area = integral.last().copied().unwrap_or(0.0);
    initial_moment(supports, length) + area + applied_couples(loads, x)
}

/// Sample shear and moment at `samples` uniformly spaced positions on `[0, length]`
pub(crate) fn sample(supports: &[Support], loads: &[Load], length: f64, samples: usize) -> BeamDiagrams {
    let cells = samples.saturating_sub(1).max(1);
    let nodes = integration_nodes(supports, loads, length, cells);
    let integral = integrate_shear(supports, loads, &nodes);
    trace!(
        "sampling {} points over {}mm ({} integration nodes)",
        samples,
        length,
        nodes.len()
    );

    let m0 = initial_moment(supports, length);
    let points = (0..samples)
        .map(|i| {
            let x = length * i as f64 / cells as f64;
            let area = nodes
                .binary_search_by(|node| node.total_cmp(&x))
                .map(|idx| integral[idx])
                .unwrap_or_else(|idx| integral[idx.min(integral.len() - 1)]);
            FieldPoint {
                x,
                shear: shear_at(supports, loads, x),
                moment: m0 + area + applied_couples(loads, x),
            }
        })
        .collect();

    BeamDiagrams::from_points(points)
}
