use log::{debug, trace};

use super::character_type::{
	CharacterCategory, CharacterTypeProbability, DEFAULT_DISTRIBUTION, total_probability,
};
use super::charsets::CharacterSets;
use super::comment_markers::{CommentMarkerType, CommentMarkers, CommentedTextData};
use super::parameters::{GeneratorParameters, GeneratorSettings};
use super::random_source::RandomSource;
use super::whitespace::{WhitespaceCommentFlags, WhitespaceFlags};
use crate::error::GenerationError;

/// Consecutive candidates a validity predicate may reject before text
/// generation gives up.
const MAX_CONSECUTIVE_REJECTIONS: usize = 10_000;

/// Upper bound of a comment body length in nice-comment mode.
const NICE_COMMENT_MAX_LENGTH: usize = 2;

/// Predicate deciding whether a candidate character may be appended to the
/// text generated so far.
pub type IsValidCharacter<'a> = &'a dyn Fn(&str, char) -> bool;

/// Code-noise generator.
///
/// # Responsibilities
/// - Draw characters from weighted category distributions
/// - Assemble text runs with embedded quotes and whitespace, filtered by a predicate
/// - Write line and block comments with collision guards
/// - Interleave extra whitespace and comments into a buffer
///
/// The generator owns its character sets; the random source is supplied by
/// the caller (pass `&mut rng` to keep ownership of it).
#[derive(Debug)]
pub struct Generator<R> {
	parameters: GeneratorParameters,
	charsets: CharacterSets,
	rng: R,
}

impl<R: RandomSource> Generator<R> {
	/// Creates a generator with the default character sets.
	///
	/// # Errors
	/// Returns `Configuration` if `parameters` do not validate.
	pub fn new(parameters: GeneratorParameters, rng: R) -> Result<Self, GenerationError> {
		Self::with_character_sets(parameters, CharacterSets::default(), rng)
	}

	pub fn with_character_sets(
		parameters: GeneratorParameters,
		charsets: CharacterSets,
		rng: R,
	) -> Result<Self, GenerationError> {
		parameters.validate()?;
		Ok(Self { parameters, charsets, rng })
	}

	/// Creates a generator from persisted settings, building the non-Latin
	/// pool from the settings' ranges.
	pub fn from_settings(settings: GeneratorSettings, rng: R) -> Result<Self, GenerationError> {
		let charsets = CharacterSets::with_non_latin_ranges(&settings.non_latin_ranges)?;
		Self::with_character_sets(settings.parameters, charsets, rng)
	}

	pub fn parameters(&self) -> &GeneratorParameters {
		&self.parameters
	}

	pub fn charsets(&self) -> &CharacterSets {
		&self.charsets
	}

	/// Mutable access to the character sets, e.g. to regenerate the non-Latin pool.
	pub fn charsets_mut(&mut self) -> &mut CharacterSets {
		&mut self.charsets
	}

	pub(crate) fn rng(&mut self) -> &mut R {
		&mut self.rng
	}

	/// Draws one character according to `distribution`.
	///
	/// A number is drawn in `[0, 100)` and the distribution is walked with a
	/// running total; the first entry whose inclusive range
	/// `[total_before, total_before + probability]` contains the draw is
	/// selected. Boundary values therefore go to the earlier of two adjacent
	/// entries, and an entry with probability 0 still owns the single value
	/// `total_before` when no earlier entry claims it.
	///
	/// # Errors
	/// - `InvalidDistribution` if the probabilities do not add up to 100
	///   (including an empty distribution)
	/// - `ProbabilityOverflow` if the running total exceeds 100
	/// - `Internal` if no entry matches or the selected set is empty
	pub fn generate_character(
		&mut self,
		distribution: &[CharacterTypeProbability],
	) -> Result<char, GenerationError> {
		let total = total_probability(distribution);
		if total != 100 {
			return Err(GenerationError::InvalidDistribution { actual: total });
		}

		let draw = self.rng.next_below(100) as u32;
		let mut cumulative = 0;
		for entry in distribution {
			let next_cumulative = cumulative + entry.probability();
			if next_cumulative > 100 {
				return Err(GenerationError::ProbabilityOverflow { cumulative: next_cumulative });
			}
			if draw >= cumulative && draw <= next_cumulative {
				return self.character_of(entry.category());
			}
			cumulative = next_cumulative;
		}

		Err(GenerationError::Internal(format!("no character category matched the draw {draw}")))
	}

	fn character_of(&mut self, category: CharacterCategory) -> Result<char, GenerationError> {
		match category {
			CharacterCategory::Letter => {
				let index = self.rng.next_below(52) as u8;
				Ok(if index < 26 {
					char::from(b'a' + index)
				} else {
					char::from(b'A' + index - 26)
				})
			}
			CharacterCategory::Number => Ok(char::from(b'0' + self.rng.next_below(10) as u8)),
			CharacterCategory::Underscore => Ok('_'),
			CharacterCategory::Dot => Ok('.'),
			CharacterCategory::SpecialOperatorCharacter => {
				let index = self.rng.next_below(self.charsets.special_operators().len());
				pick(self.charsets.special_operators(), index)
			}
			CharacterCategory::SpecialNonOperatorCharacter => {
				let index = self.rng.next_below(self.charsets.special_non_operators().len());
				pick(self.charsets.special_non_operators(), index)
			}
			CharacterCategory::Apostrophe => {
				let index = self.rng.next_below(self.charsets.apostrophes().len());
				pick(self.charsets.apostrophes(), index)
			}
			CharacterCategory::NonLatinCharacter => {
				let index = self.rng.next_below(self.charsets.non_latin().len());
				pick(self.charsets.non_latin(), index)
			}
		}
	}

	/// Returns one whitespace character among those enabled by `flags`.
	///
	/// Always a single space when nice code is simulated.
	///
	/// # Errors
	/// Returns `Configuration` if `flags` is empty.
	pub fn generate_whitespace(&mut self, flags: WhitespaceFlags) -> Result<char, GenerationError> {
		if self.parameters.simulate_nice_code {
			return Ok(' ');
		}

		let candidates: Vec<char> = flags.characters().collect();
		if candidates.is_empty() {
			return Err(GenerationError::Configuration(
				"no whitespace character is enabled".to_owned(),
			));
		}
		let index = self.rng.next_below(candidates.len());
		pick(&candidates, index)
	}

	/// Generates text of at least `target_length` characters, usable as a
	/// comment body or as the content of a literal framed by `boundary_marker`.
	///
	/// Each iteration draws a control number in `[0, 100)`:
	/// - `<= 5`: an embedded quote, either the boundary marker doubled or an
	///   apostrophe other than the boundary marker
	/// - `6..=9`: a run of `1..=max_additional_whitespaces` whitespace characters
	///   from `whitespace_flags`, never longer than the remaining length
	/// - otherwise: one character from `distribution` (or [`DEFAULT_DISTRIBUTION`])
	///
	/// Every character goes through `is_valid` with the text generated so far;
	/// rejected candidates do not count towards the length. A drawn character
	/// equal to the boundary marker is always rejected.
	///
	/// The result may exceed `target_length` by one when a doubled marker is
	/// appended last.
	///
	/// # Errors
	/// - `InvalidDistribution` if a non-empty `distribution` does not add up to
	///   100, whatever the draws would have been
	/// - `Internal` if `is_valid` rejects too many candidates in a row
	pub fn generate_text(
		&mut self,
		target_length: usize,
		whitespace_flags: WhitespaceFlags,
		boundary_marker: Option<char>,
		distribution: Option<&[CharacterTypeProbability]>,
		is_valid: Option<IsValidCharacter<'_>>,
	) -> Result<String, GenerationError> {
		let distribution = checked_distribution(distribution)?;
		let embedded_quotes: Vec<char> = self
			.charsets
			.apostrophes()
			.iter()
			.copied()
			.filter(|c| Some(*c) != boundary_marker)
			.collect();
		let accepts = |text: &str, c: char| is_valid.is_none_or(|f| f(text, c));

		let mut text = String::new();
		let mut length = 0;
		let mut rejections = 0;

		while length < target_length {
			if rejections >= MAX_CONSECUTIVE_REJECTIONS {
				return Err(GenerationError::Internal(format!(
					"{rejections} consecutive characters rejected after {length} generated"
				)));
			}

			let control = self.rng.next_below(100);
			if control <= 5 {
				let doubled = self.rng.next_below(100) < 50;
				match boundary_marker {
					Some(marker) if doubled => {
						let mut candidate = text.clone();
						candidate.push(marker);
						if accepts(&text, marker) && accepts(&candidate, marker) {
							candidate.push(marker);
							text = candidate;
							length += 2;
							rejections = 0;
						} else {
							rejections += 1;
						}
					}
					_ => {
						let index = self.rng.next_below(embedded_quotes.len());
						let quote = pick(&embedded_quotes, index)?;
						if accepts(&text, quote) {
							text.push(quote);
							length += 1;
							rejections = 0;
						} else {
							rejections += 1;
						}
					}
				}
			} else if control < 10
				&& self.parameters.max_additional_whitespaces > 0
				&& !whitespace_flags.is_empty()
			{
				let max_run = self.parameters.max_additional_whitespaces;
				let run = self.rng.next_in(1, max_run).min(target_length - length);
				for _ in 0..run {
					let whitespace = self.generate_whitespace(whitespace_flags)?;
					if !accepts(&text, whitespace) {
						rejections += 1;
						break;
					}
					text.push(whitespace);
					length += 1;
					rejections = 0;
				}
			} else {
				let c = self.generate_character(distribution)?;
				if Some(c) == boundary_marker || !accepts(&text, c) {
					rejections += 1;
					continue;
				}
				text.push(c);
				length += 1;
				rejections = 0;
			}
		}

		Ok(text)
	}

	/// Randomly flips the case of each character of `text` that has distinct
	/// upper and lower case forms, unless the language is case-sensitive.
	pub fn apply_random_capitalization(&mut self, text: &str) -> String {
		if self.parameters.is_language_case_sensitive {
			return text.to_owned();
		}

		let mut result = String::with_capacity(text.len());
		for c in text.chars() {
			let lower: String = c.to_lowercase().collect();
			let upper: String = c.to_uppercase().collect();
			if lower == upper || self.rng.next_below(100) >= 50 {
				result.push(c);
			} else if c.is_lowercase() {
				result.push_str(&upper);
			} else {
				result.push_str(&lower);
			}
		}
		result
	}

	/// Appends one comment to `buffer`.
	///
	/// The comment is a line comment with probability 70% (always with
	/// `generate_nice_comment`), otherwise a block comment. Collision guards
	/// depend on the marker type:
	/// - `CSharpStyle`: a buffer ending with `/` gets a space or tab first
	/// - `RemarkText`: a non-empty buffer not ending with whitespace gets a space first
	///
	/// Line comments are followed by `\n` unless `is_comment_ending_code` is set.
	/// `on_comment` receives the comment position and length (see
	/// [`CommentedTextData`]).
	///
	/// # Errors
	/// - `Configuration` if no comment markers are configured
	/// - `InvalidDistribution` if a non-empty `distribution` does not add up to 100
	/// - Errors of [`Generator::generate_text`]
	///
	/// On error `buffer` is left unchanged and `on_comment` is not called.
	pub fn generate_comment<F>(
		&mut self,
		buffer: &mut String,
		on_comment: Option<F>,
		generate_nice_comment: bool,
		is_comment_ending_code: bool,
		distribution: Option<&[CharacterTypeProbability]>,
	) -> Result<(), GenerationError>
	where
		F: FnMut(CommentedTextData),
	{
		checked_distribution(distribution)?;
		let (comment, commented_text) = self.build_comment(
			buffer.chars().next_back(),
			buffer.len(),
			generate_nice_comment,
			is_comment_ending_code,
			distribution,
		)?;

		if let Some(mut on_comment) = on_comment {
			on_comment(commented_text);
		}
		buffer.push_str(&comment);
		Ok(())
	}

	/// Builds a comment meant to be appended at byte `offset` of a text whose
	/// last character is `preceding`, guard included.
	fn build_comment(
		&mut self,
		preceding: Option<char>,
		offset: usize,
		generate_nice_comment: bool,
		is_comment_ending_code: bool,
		distribution: Option<&[CharacterTypeProbability]>,
	) -> Result<(String, CommentedTextData), GenerationError> {
		let markers = self.parameters.comment_markers.clone().ok_or_else(|| {
			GenerationError::Configuration(
				"comments can be generated only if comment markers are configured".to_owned(),
			)
		})?;

		let is_line_comment = generate_nice_comment || self.rng.next_below(100) < 70;
		let mut comment = String::new();

		match markers.marker_type {
			CommentMarkerType::CSharpStyle => {
				if preceding == Some('/') {
					comment.push(if self.rng.next_below(100) < 50 { ' ' } else { '\t' });
				}
			}
			CommentMarkerType::RemarkText => {
				if preceding.is_some_and(|c| !c.is_whitespace()) {
					comment.push(' ');
				}
			}
			CommentMarkerType::Other => {}
		}
		let guard_length = comment.len();

		let (start_marker, end_marker) = if is_line_comment {
			(&markers.line_comment_marker, None)
		} else {
			(&markers.multiline_comment_start_marker, Some(&markers.multiline_comment_end_marker))
		};
		comment.push_str(&self.apply_random_capitalization(start_marker));
		let body = self.generate_comment_body(
			&markers,
			is_line_comment,
			generate_nice_comment,
			distribution,
		)?;
		comment.push_str(&body);
		if let Some(end_marker) = end_marker {
			comment.push_str(&self.apply_random_capitalization(end_marker));
		}

		let commented_text = CommentedTextData {
			position: offset + guard_length,
			length: comment.len() - guard_length,
			is_line_comment,
		};
		if is_line_comment && !is_comment_ending_code {
			comment.push('\n');
		}

		trace!("generated comment {commented_text:?}");
		Ok((comment, commented_text))
	}

	/// Body of a comment; empty with probability 20%.
	fn generate_comment_body(
		&mut self,
		markers: &CommentMarkers,
		is_line_comment: bool,
		generate_nice_comment: bool,
		distribution: Option<&[CharacterTypeProbability]>,
	) -> Result<String, GenerationError> {
		if self.rng.next_below(100) < 20 {
			return Ok(String::new());
		}

		let mut flags = WhitespaceFlags::ANY;
		if is_line_comment {
			flags = flags.without(WhitespaceFlags::NEW_LINE);
		}
		let max_length = if generate_nice_comment {
			NICE_COMMENT_MAX_LENGTH
		} else {
			self.parameters.max_comment_length.max(1)
		};
		let length = self.rng.next_in(1, max_length);

		let is_remark = markers.marker_type == CommentMarkerType::RemarkText;
		let end_marker = markers.multiline_comment_end_marker.as_str();
		let is_valid = |text: &str, c: char| {
			if is_line_comment {
				!(is_remark && text.is_empty() && c == '*')
			} else {
				!completes_marker(text, c, end_marker)
			}
		};

		self.generate_text(length, flags, None, distribution, Some(&is_valid))
	}

	/// Appends extra whitespace and comments to `buffer`.
	///
	/// Unless nice code is simulated, the whitespace budget is drawn in
	/// `[1, max_additional_whitespaces]` (0 if `flags` excludes whitespace),
	/// and the comment budget is 0 with probability 50%, otherwise drawn in
	/// `[1, max_additional_comments]` (0 if comments are excluded or not
	/// configured). Whitespace and comments are then emitted in random
	/// order, favouring whitespace 70/30 while both budgets remain.
	///
	/// With both budgets at 0 and `add_at_least_one`, a single space (or a
	/// nice comment when whitespace is not possible or loses a 70/30 draw)
	/// is appended.
	///
	/// The output is assembled aside and appended in one go; `on_comment` is
	/// called for each comment, in order, once everything succeeded.
	///
	/// # Errors
	/// - `Configuration` if `flags` excludes whitespace and no comment markers are configured
	/// - `InvalidDistribution` if a non-empty `distribution` does not add up to 100
	/// - Errors of [`Generator::generate_comment`]
	///
	/// On error `buffer` is left unchanged and `on_comment` is not called.
	pub fn generate_whitespace_and_comments<F>(
		&mut self,
		buffer: &mut String,
		add_at_least_one: bool,
		on_comment: Option<F>,
		flags: WhitespaceCommentFlags,
		distribution: Option<&[CharacterTypeProbability]>,
	) -> Result<(), GenerationError>
	where
		F: FnMut(CommentedTextData),
	{
		let has_markers = self.parameters.comment_markers.is_some();
		if !flags.allows_whitespace() && !has_markers {
			return Err(GenerationError::Configuration(
				"both comments and whitespace are disabled, nothing can be generated".to_owned(),
			));
		}
		checked_distribution(distribution)?;

		let mut whitespaces = 0;
		let mut comments = 0;
		if !self.parameters.simulate_nice_code {
			if flags.allows_whitespace() && self.parameters.max_additional_whitespaces > 0 {
				whitespaces = self.rng.next_in(1, self.parameters.max_additional_whitespaces);
			}
			if flags.allows_comments()
				&& has_markers
				&& self.parameters.max_additional_comments > 0
				&& self.rng.next_below(100) >= 50
			{
				comments = self.rng.next_in(1, self.parameters.max_additional_comments);
			}
		}
		debug!("interleaving {whitespaces} whitespaces and {comments} comments");

		let mut output = String::new();
		let mut reported = Vec::new();

		if whitespaces + comments == 0 && add_at_least_one {
			let use_space = !has_markers
				|| !flags.allows_comments()
				|| (flags.allows_whitespace() && self.rng.next_below(100) < 70);
			if use_space {
				output.push(' ');
			} else {
				let (comment, commented_text) = self.build_comment(
					buffer.chars().next_back(),
					buffer.len(),
					true,
					false,
					distribution,
				)?;
				output.push_str(&comment);
				reported.push(commented_text);
			}
		}

		while whitespaces + comments > 0 {
			let generate_whitespace = if comments == 0 {
				true
			} else if whitespaces == 0 {
				false
			} else {
				self.rng.next_below(100) < 70
			};

			if generate_whitespace {
				output.push(self.generate_whitespace(WhitespaceFlags::ANY)?);
				whitespaces -= 1;
			} else {
				let preceding = output.chars().next_back().or_else(|| buffer.chars().next_back());
				let (comment, commented_text) = self.build_comment(
					preceding,
					buffer.len() + output.len(),
					false,
					false,
					distribution,
				)?;
				output.push_str(&comment);
				reported.push(commented_text);
				comments -= 1;
			}
		}

		buffer.push_str(&output);
		if let Some(mut on_comment) = on_comment {
			for commented_text in reported {
				on_comment(commented_text);
			}
		}
		Ok(())
	}
}

/// Resolves the distribution used for drawn characters: the caller's when
/// given and non-empty, [`DEFAULT_DISTRIBUTION`] otherwise.
///
/// # Errors
/// Returns `InvalidDistribution` if the caller's distribution does not add up to 100.
fn checked_distribution(
	distribution: Option<&[CharacterTypeProbability]>,
) -> Result<&[CharacterTypeProbability], GenerationError> {
	match distribution {
		Some(d) if !d.is_empty() => {
			let actual = total_probability(d);
			if actual != 100 {
				return Err(GenerationError::InvalidDistribution { actual });
			}
			Ok(d)
		}
		_ => Ok(&DEFAULT_DISTRIBUTION),
	}
}

fn pick(items: &[char], index: usize) -> Result<char, GenerationError> {
	items
		.get(index)
		.copied()
		.ok_or_else(|| GenerationError::Internal("character set is empty".to_owned()))
}

/// Returns `true` if appending `candidate` to `text` makes it end with
/// `marker`, ignoring case.
fn completes_marker(text: &str, candidate: char, marker: &str) -> bool {
	let needed = marker.chars().count();
	if needed == 0 {
		return false;
	}

	let mut tail: Vec<char> = text.chars().rev().take(needed - 1).collect();
	if tail.len() < needed - 1 {
		return false;
	}
	tail.reverse();
	tail.push(candidate);

	let tail: String = tail.into_iter().collect();
	tail.to_lowercase() == marker.to_lowercase()
}
