//! Candidate chart generation.
//!
//! Given abstract fields and their statistics, [`generate_encodings`] enumerates
//! channel assignments that respect the channels' affinities and the visual
//! heuristics in [`encoding_rules`]; [`generate`] turns them into complete
//! specifications by choosing the mark types able to render each one.

pub mod channel_rules;
pub mod encoding_rules;
pub mod error;
pub mod generate;
pub mod marks;
pub mod options;

pub use crate::error::RecommendError;
pub use crate::generate::{generate, generate_encodings};
pub use crate::options::GenerateOptions;
