//! # beam_core - Beam Analysis Engine
//!
//! `beam_core` computes support reactions and shear/moment fields for single
//! beams under point loads, uniform and linearly varying distributed loads, and
//! applied couples. All inputs and outputs are JSON-serializable so results can
//! be stored or handed to other tools.
//!
//! ## Design Philosophy
//!
//! - **Internal units**: mm, N, N/mm, N*mm; unit-tagged values are converted once
//! - **Pure solver**: reactions are computed by a function, then applied to the beam
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::{Beam, BeamType, Load, Support};
//!
//! let mut beam = Beam::new(3000.0, BeamType::Cantilever)?;
//! beam.add_support(Support::fixed(0.0)?)?;
//! beam.add_load(Load::point(500.0, 1500.0)?)?;
//! beam.add_load(Load::moment(1000.0, 3000.0)?)?;
//!
//! let reactions = beam.calculate_reactions()?;
//! assert_eq!(reactions.reactions[0].moment, Some(-751_000.0));
//!
//! let json = serde_json::to_string_pretty(&beam).unwrap();
//! # let _ = json;
//! # Ok::<(), beam_core::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Beam entity, reaction solving, shear/moment fields
//! - [`loads`] - Load variants and their statics
//! - [`supports`] - Support kinds and solved reactions
//! - [`units`] - Unit conversion table and unit-tagged values
//! - [`model`] - JSON beam models and analysis reports
//! - [`errors`] - Structured error types
//! - [`file_io`] - Model loading and atomic report/CSV writes

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod model;
pub mod supports;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{Beam, BeamDiagrams, BeamType, FieldPoint, SolvedReactions, SupportReaction};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_model, save_report, write_diagram_csv};
pub use loads::Load;
pub use model::{BeamModel, BeamReport};
pub use supports::{Support, SupportKind};
pub use units::UnitValue;
