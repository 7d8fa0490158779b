use std::sync::mpsc;
use std::thread;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::character_type::{CharacterCategory, CharacterTypeProbability};
use super::comment_markers::CommentedTextData;
use super::generator::Generator;
use super::parameters::GeneratorSettings;
use super::random_source::RandomSource;
use super::whitespace::{WhitespaceCommentFlags, WhitespaceFlags};
use crate::error::GenerationError;

const IDENTIFIER_START: [CharacterTypeProbability; 2] = [
	CharacterTypeProbability::new(CharacterCategory::Letter, 80),
	CharacterTypeProbability::new(CharacterCategory::Underscore, 20),
];

const IDENTIFIER_REST: [CharacterTypeProbability; 3] = [
	CharacterTypeProbability::new(CharacterCategory::Letter, 60),
	CharacterTypeProbability::new(CharacterCategory::Number, 30),
	CharacterTypeProbability::new(CharacterCategory::Underscore, 10),
];

const OPERATOR: [CharacterTypeProbability; 1] =
	[CharacterTypeProbability::new(CharacterCategory::SpecialOperatorCharacter, 100)];

const QUOTE: [CharacterTypeProbability; 1] =
	[CharacterTypeProbability::new(CharacterCategory::Apostrophe, 100)];

const MAX_IDENTIFIER_LENGTH: usize = 8;

/// A generated parser-test fragment.
///
/// `comments` lists every comment written into `text`, in order, with byte
/// offsets into `text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFragment {
	pub text: String,
	pub comments: Vec<CommentedTextData>,
}

impl<R: RandomSource> Generator<R> {
	/// Generates `token_count` tokens separated by extra whitespace and comments.
	///
	/// Tokens are identifiers (60%), quoted literals (25%) or single operator
	/// characters (15%). When comment markers are configured, the fragment
	/// ends with a code-ending line comment 30% of the time.
	pub fn generate_fragment(
		&mut self,
		token_count: usize,
	) -> Result<GeneratedFragment, GenerationError> {
		let mut text = String::new();
		let mut comments = Vec::new();

		for index in 0..token_count {
			if index > 0 {
				self.generate_whitespace_and_comments(
					&mut text,
					true,
					Some(|c| comments.push(c)),
					WhitespaceCommentFlags::WhitespaceAndComments,
					None,
				)?;
			}

			let kind = self.rng().next_below(100);
			if kind < 60 {
				let identifier = self.generate_identifier()?;
				text.push_str(&identifier);
			} else if kind < 85 {
				let literal = self.generate_literal()?;
				text.push_str(&literal);
			} else {
				text.push(self.generate_character(&OPERATOR)?);
			}
		}

		let has_markers = self.parameters().comment_markers.is_some();
		if token_count > 0 && has_markers && self.rng().next_below(100) < 30 {
			text.push(' ');
			self.generate_comment(&mut text, Some(|c| comments.push(c)), false, true, None)?;
		}

		Ok(GeneratedFragment { text, comments })
	}

	fn generate_identifier(&mut self) -> Result<String, GenerationError> {
		let length = self.rng().next_in(1, MAX_IDENTIFIER_LENGTH);
		let mut identifier = String::with_capacity(length);
		identifier.push(self.generate_character(&IDENTIFIER_START)?);
		for _ in 1..length {
			identifier.push(self.generate_character(&IDENTIFIER_REST)?);
		}
		Ok(identifier)
	}

	fn generate_literal(&mut self) -> Result<String, GenerationError> {
		let marker = self.generate_character(&QUOTE)?;

		let max_length = self.parameters().max_comment_length;
		let length = self.rng().next_in(0, max_length);
		let flags = WhitespaceFlags::SPACE | WhitespaceFlags::TAB;
		let content = self.generate_text(length, flags, Some(marker), None, None)?;

		let mut literal = String::with_capacity(content.len() + 2);
		literal.push(marker);
		literal.push_str(&content);
		literal.push(marker);
		Ok(literal)
	}
}

/// Generates `count` fragments of `token_count` tokens in parallel.
///
/// Fragment `i` is generated by its own generator, seeded with
/// `seed + i` and owning its own character sets, so the result does not
/// depend on the number of worker threads.
///
/// # Behavior
/// - Spawns up to `num_cpus::get()` workers; worker `w` handles fragments
///   `w, w + workers, ...`
/// - Collects the fragments through an MPSC channel and restores their order
///
/// # Errors
/// - Errors of [`Generator::from_settings`] and [`Generator::generate_fragment`]
/// - `Internal` if a worker stops before delivering all its fragments
pub fn generate_fragments(
	settings: &GeneratorSettings,
	count: usize,
	token_count: usize,
	seed: u64,
) -> Result<Vec<GeneratedFragment>, GenerationError> {
	if count == 0 {
		return Ok(Vec::new());
	}

	let workers = num_cpus::get().clamp(1, count);
	debug!("generating {count} fragments on {workers} workers");

	let (tx, rx) = mpsc::channel();
	for worker in 0..workers {
		let tx = tx.clone();
		let settings = settings.clone();

		thread::spawn(move || {
			for index in (worker..count).step_by(workers) {
				let rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
				let fragment = Generator::from_settings(settings.clone(), rng)
					.and_then(|mut generator| generator.generate_fragment(token_count));
				if tx.send((index, fragment)).is_err() {
					break;
				}
			}
		});
	}
	drop(tx);

	let mut fragments: Vec<Option<GeneratedFragment>> = vec![None; count];
	for (index, fragment) in rx.iter() {
		fragments[index] = Some(fragment?);
	}

	fragments
		.into_iter()
		.enumerate()
		.map(|(index, fragment)| {
			fragment.ok_or_else(|| {
				GenerationError::Internal(format!("fragment {index} was not generated"))
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::generation::comment_markers::{CommentMarkerType, CommentMarkers};
	use crate::generation::parameters::GeneratorParameters;

	fn assert_comments_match(fragment: &GeneratedFragment, markers: &CommentMarkers) {
		for data in &fragment.comments {
			let comment = &fragment.text[data.position..data.position + data.length];
			if data.is_line_comment {
				assert!(comment.starts_with(&markers.line_comment_marker), "{comment:?}");
				assert!(!comment.contains('\n'));
			} else {
				let start = &markers.multiline_comment_start_marker;
				assert!(comment.starts_with(start), "{comment:?}");
				assert!(comment.ends_with(&markers.multiline_comment_end_marker), "{comment:?}");
			}
		}
	}

	#[test]
	fn fragment_comments_point_into_the_text() {
		let mut generator =
			Generator::new(GeneratorParameters::default(), StdRng::seed_from_u64(1)).unwrap();
		let markers = CommentMarkers::c_sharp();
		let mut total_comments = 0;
		for _ in 0..100 {
			let fragment = generator.generate_fragment(10).unwrap();
			assert!(!fragment.text.is_empty());
			assert_comments_match(&fragment, &markers);
			total_comments += fragment.comments.len();
		}
		assert!(total_comments > 0);
	}

	#[test]
	fn fragment_without_markers_has_no_comments() {
		let parameters = GeneratorParameters {
			comment_markers: None,
			..GeneratorParameters::default()
		};
		let mut generator = Generator::new(parameters, StdRng::seed_from_u64(2)).unwrap();
		for _ in 0..50 {
			assert!(generator.generate_fragment(8).unwrap().comments.is_empty());
		}
	}

	#[test]
	fn empty_fragment_is_empty() {
		let mut generator =
			Generator::new(GeneratorParameters::default(), StdRng::seed_from_u64(3)).unwrap();
		let empty = GeneratedFragment { text: String::new(), comments: vec![] };
		assert_eq!(generator.generate_fragment(0).unwrap(), empty);
	}

	#[test]
	fn batches_are_reproducible_and_ordered() {
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
			non_latin_ranges: vec![(15_000, 50)],
		};

		let first = generate_fragments(&settings, 17, 6, 42).unwrap();
		let second = generate_fragments(&settings, 17, 6, 42).unwrap();
		assert_eq!(first.len(), 17);
		assert_eq!(first, second);

		let mut single =
			Generator::from_settings(settings.clone(), StdRng::seed_from_u64(42 + 5)).unwrap();
		assert_eq!(single.generate_fragment(6).unwrap(), first[5]);
	}

	#[test]
	fn batch_propagates_invalid_settings() {
		let settings = GeneratorSettings {
			non_latin_ranges: vec![(100, 5)],
			..GeneratorSettings::default()
		};
		assert!(matches!(
			generate_fragments(&settings, 3, 4, 0),
			Err(GenerationError::Range { start: 100, .. })
		));
		assert!(generate_fragments(&settings, 0, 4, 0).unwrap().is_empty());
	}
}
