//! # Beam Calculations
//!
//! The analysis engine. A calculation follows the pattern:
//!
//! - [`Beam`] - Beam entity holding supports and loads (JSON-serializable)
//! - [`reactions::solve`] - Pure reaction solver, dispatched on [`BeamType`]
//! - [`BeamDiagrams`] - Sampled shear and moment fields of a solved beam
//!
//! ## Available Beam Types
//!
//! - Simply supported, overhanging, cantilever - solved by statics
//! - Fixed-fixed, propped cantilever - closed forms for a single full-span UDL
//! - Continuous - reported as not implemented

pub mod beam;
pub mod diagrams;
pub mod reactions;

// Re-export commonly used types
pub use beam::{Beam, BeamType};
pub use diagrams::{BeamDiagrams, FieldPoint};
pub use reactions::{SolvedReactions, SupportReaction};
