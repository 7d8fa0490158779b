//! Randomized code-noise generation library.
//!
//! This crate produces syntactically noisy but structurally valid text
//! fragments for exercising source-code parsers:
//! - Probability-weighted character generation over configurable categories
//! - Text runs with embedded quotes and whitespace, guarded by a validity predicate
//! - Line and block comments that never terminate themselves early
//! - Interleaving of extra whitespace and comments between tokens
//! - Whole fragments, generated in parallel from a reproducible seed
//!
//! The random source is supplied by the caller; the crate never seeds it.

/// Character taxonomy, comment markers, parameters and the generator itself.
pub mod generation;

/// Error types shared by all generation operations.
pub mod error;

pub use error::{GenerationError, SettingsError};
