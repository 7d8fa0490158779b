use thiserror::Error;

/// Failures reported by generation operations.
///
/// All of them are usage or configuration problems of the calling test
/// suite; none is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
	/// Nothing can be generated with the current parameters and flags.
	#[error("configuration error: {0}")]
	Configuration(String),

	/// Distribution probabilities do not add up to 100.
	#[error("probabilities should add up to 100, the actual value is {actual}")]
	InvalidDistribution { actual: u32 },

	/// The running probability total went past 100 while walking a distribution.
	#[error("cumulative probability {cumulative} exceeds 100")]
	ProbabilityOverflow { cumulative: u32 },

	/// A non-Latin character code range is out of policy.
	#[error("invalid character code range (start={start}, count={count}): {reason}")]
	Range { start: u32, count: u32, reason: String },

	/// A code point in a non-Latin range is reserved or not a valid character.
	#[error("invalid non-latin character code {code:#x}")]
	InvalidCharacter { code: u32 },

	/// An invariant of the generator was violated.
	#[error("internal generation error: {0}")]
	Internal(String),
}

/// Failures while saving or loading generator settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("settings encoding failed: {0}")]
	Encoding(#[from] postcard::Error),

	#[error(transparent)]
	Generation(#[from] GenerationError),
}
