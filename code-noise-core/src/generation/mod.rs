//! Top-level module for code-noise generation.
//!
//! This module groups:
//! - The character taxonomy and probability data (`character_type`)
//! - Fixed and regenerable character sets (`charsets`)
//! - Comment syntax description and observer payload (`comment_markers`)
//! - Whitespace selection flags (`whitespace`)
//! - Generator parameters and persisted settings (`parameters`)
//! - The random source abstraction (`random_source`)
//! - The generator itself (`generator`)
//! - Fragment composition and parallel batches (`fragment`)

/// Character categories and weighted distributions.
pub mod character_type;

/// Apostrophe, special and non-Latin character sets.
///
/// The non-Latin pool is owned per generator and can be regenerated.
pub mod charsets;

/// Comment markers and the data reported for each generated comment.
pub mod comment_markers;

/// Whitespace and whitespace/comment selection flags.
pub mod whitespace;

/// Generator parameters and their `postcard` persistence.
pub mod parameters;

/// Random number source supplied by the caller.
pub mod random_source;

/// Character, text, comment and whitespace/comment interleaving generation.
pub mod generator;

/// Parser-test fragments built from generated tokens, single or in parallel batches.
pub mod fragment;

pub use character_type::{CharacterCategory, CharacterTypeProbability, DEFAULT_DISTRIBUTION};
pub use charsets::CharacterSets;
pub use comment_markers::{CommentMarkerType, CommentMarkers, CommentedTextData};
pub use fragment::{GeneratedFragment, generate_fragments};
pub use generator::Generator;
pub use parameters::{GeneratorParameters, GeneratorSettings};
pub use random_source::RandomSource;
pub use whitespace::{WhitespaceCommentFlags, WhitespaceFlags};
