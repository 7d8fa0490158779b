use std::path::Path;

use serde::{Deserialize, Serialize};

use super::charsets::DEFAULT_NON_LATIN_RANGE;
use super::comment_markers::CommentMarkers;
use crate::error::{GenerationError, SettingsError};

/// Parameters controlling how much noise a generator adds.
///
/// # Fields
/// - `max_additional_whitespaces`: upper bound of whitespace insertions per
///   interleaving call, and of whitespace runs inside text
/// - `max_additional_comments`: upper bound of comment insertions per interleaving call
/// - `max_comment_length`: upper bound of a comment body length (in characters)
/// - `comment_markers`: comment syntax, `None` if the language has no comments
/// - `simulate_nice_code`: emit single spaces and no extra noise
/// - `is_language_case_sensitive`: when `false`, comment markers get random capitalization
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GeneratorParameters {
	pub max_additional_whitespaces: usize,
	pub max_additional_comments: usize,
	pub max_comment_length: usize,
	pub comment_markers: Option<CommentMarkers>,
	pub simulate_nice_code: bool,
	pub is_language_case_sensitive: bool,
}

impl Default for GeneratorParameters {
	fn default() -> Self {
		Self {
			max_additional_whitespaces: 3,
			max_additional_comments: 2,
			max_comment_length: 20,
			comment_markers: Some(CommentMarkers::c_sharp()),
			simulate_nice_code: false,
			is_language_case_sensitive: true,
		}
	}
}

impl GeneratorParameters {
	/// Checks that configured comment markers are non-empty.
	///
	/// # Errors
	/// Returns `Configuration` naming the first empty marker.
	pub fn validate(&self) -> Result<(), GenerationError> {
		let empty_marker =
			self.comment_markers.as_ref().and_then(CommentMarkers::first_empty_marker);
		if let Some(name) = empty_marker {
			return Err(GenerationError::Configuration(format!(
				"comment marker '{name}' should not be empty"
			)));
		}
		Ok(())
	}
}

/// A reproducible fuzzing profile: parameters plus the non-Latin code point
/// ranges the character pool is built from.
///
/// Stored on disk as a compact `postcard` binary.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GeneratorSettings {
	pub parameters: GeneratorParameters,
	pub non_latin_ranges: Vec<(u32, u32)>,
}

impl Default for GeneratorSettings {
	fn default() -> Self {
		Self {
			parameters: GeneratorParameters::default(),
			non_latin_ranges: vec![DEFAULT_NON_LATIN_RANGE],
		}
	}
}

impl GeneratorSettings {
	/// Loads settings written by [`GeneratorSettings::save`].
	///
	/// # Errors
	/// - `Io` if the file cannot be read
	/// - `Encoding` if the content is not valid settings
	/// - `Generation` if the decoded parameters do not validate
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
		let bytes = std::fs::read(path)?;
		let settings: Self = postcard::from_bytes(&bytes)?;
		settings.parameters.validate()?;
		Ok(settings)
	}

	/// Writes the settings to `path`, replacing any existing file.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(path, bytes)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::generation::comment_markers::CommentMarkerType;

	#[test]
	fn defaults_validate() {
		assert!(GeneratorParameters::default().validate().is_ok());
	}

	#[test]
	fn empty_end_marker_is_a_configuration_error() {
		let parameters = GeneratorParameters {
			comment_markers: Some(CommentMarkers::new(
				"//",
				"/*",
				"",
				CommentMarkerType::CSharpStyle,
			)),
			..GeneratorParameters::default()
		};
		let err = parameters.validate().unwrap_err();
		assert!(matches!(
			err,
			GenerationError::Configuration(ref m) if m.contains("multiline_comment_end_marker")
		));
	}

	#[test]
	fn settings_survive_save_and_load() {
		let path = std::env::temp_dir()
			.join(format!("code-noise-settings-{}.bin", std::process::id()));
		let settings = GeneratorSettings {
			parameters: GeneratorParameters {
				comment_markers: Some(CommentMarkers::new(
					"REM",
					"REM{",
					"}REM",
					CommentMarkerType::RemarkText,
				)),
				is_language_case_sensitive: false,
				..GeneratorParameters::default()
			},
			non_latin_ranges: vec![(15_000, 50), (20_000, 10)],
		};

		settings.save(&path).unwrap();
		let loaded = GeneratorSettings::load(&path).unwrap();
		std::fs::remove_file(&path).unwrap();

		assert_eq!(loaded, settings);
	}

	#[test]
	fn loading_garbage_is_an_encoding_error() {
		let path = std::env::temp_dir()
			.join(format!("code-noise-garbage-{}.bin", std::process::id()));
		std::fs::write(&path, [0xFF, 0xFF, 0xFF]).unwrap();
		let result = GeneratorSettings::load(&path);
		std::fs::remove_file(&path).unwrap();

		assert!(matches!(result, Err(SettingsError::Encoding(_))));
	}
}
