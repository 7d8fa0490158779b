use log::debug;

use crate::error::GenerationError;

/// Quote-like characters that may frame literal text.
pub const APOSTROPHE_CHARACTERS: [char; 3] = ['\'', '"', '`'];

/// Characters that parsers treat as operator characters.
pub const SPECIAL_OPERATOR_CHARACTERS: [char; 19] = [
	'!', '#', '$', '%', '&', '*', '+', '-', '/', ':', '<', '=', '>', '?', '@', '\\', '^', '|', '~',
];

/// Punctuation that is special but never part of an operator.
const SPECIAL_PUNCTUATION: [char; 8] = ['(', ')', '[', ']', '{', '}', ',', ';'];

/// Lowest code point accepted in a non-Latin range.
pub const MIN_NON_LATIN_CODE: u32 = 15_000;

/// Range used for the non-Latin pool of a new `CharacterSets`.
pub const DEFAULT_NON_LATIN_RANGE: (u32, u32) = (66_534, 100);

/// Returns `true` if `c` is one of the recognized special characters
/// (operators, punctuation and apostrophes).
pub fn is_special_character(c: char) -> bool {
	SPECIAL_OPERATOR_CHARACTERS.contains(&c)
		|| SPECIAL_PUNCTUATION.contains(&c)
		|| APOSTROPHE_CHARACTERS.contains(&c)
}

/// First code point of each run of ten decimal digits (general category Nd)
/// at or above [`MIN_NON_LATIN_CODE`]. Lower runs are refused by the range
/// check before any digit test.
const DECIMAL_DIGIT_ZEROS: [u32; 42] = [
	0xA620, 0xA8D0, 0xA900, 0xA9D0, 0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x10D40,
	0x11066, 0x110F0, 0x11136, 0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x116D0,
	0x116DA, 0x11730, 0x118E0, 0x11950, 0x11BF0, 0x11C50, 0x11D50, 0x11DA0, 0x11F50, 0x16130,
	0x16A60, 0x16AC0, 0x16B50, 0x16D70, 0x1CCF0, 0x1E140, 0x1E2F0, 0x1E4F0, 0x1E5F1, 0x1E950,
	0x1FBF0,
];

/// Mathematical bold, double-struck, sans-serif and monospace digits.
const MATHEMATICAL_DIGITS: std::ops::RangeInclusive<u32> = 0x1D7CE..=0x1D7FF;

/// Returns `true` if `c` is a decimal digit.
///
/// Other numeric characters (letter numbers such as Roman numerals, or
/// fractions and circled numbers) are not digits.
fn is_decimal_digit(c: char) -> bool {
	let code = u32::from(c);
	c.is_ascii_digit()
		|| MATHEMATICAL_DIGITS.contains(&code)
		|| DECIMAL_DIGIT_ZEROS.iter().any(|zero| (*zero..zero + 10).contains(&code))
}

/// Character sets used by a generator.
///
/// Apostrophe and operator characters are fixed. Non-operator special
/// characters are derived as all special characters minus operator and
/// apostrophe characters. The non-Latin pool is regenerable and owned by
/// this value, so independent generators never share it.
///
/// # Invariants
/// - The non-Latin pool is never empty
/// - No non-Latin character is an apostrophe, special character, Latin letter,
///   digit, `.` or `_`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterSets {
	special_non_operator: Vec<char>,
	non_latin: Vec<char>,
}

impl Default for CharacterSets {
	fn default() -> Self {
		let (start, count) = DEFAULT_NON_LATIN_RANGE;
		Self {
			special_non_operator: SPECIAL_OPERATOR_CHARACTERS
				.iter()
				.chain(SPECIAL_PUNCTUATION.iter())
				.chain(APOSTROPHE_CHARACTERS.iter())
				.copied()
				.filter(|c| {
					!SPECIAL_OPERATOR_CHARACTERS.contains(c) && !APOSTROPHE_CHARACTERS.contains(c)
				})
				.collect(),
			non_latin: (start..start + count).filter_map(char::from_u32).collect(),
		}
	}
}

impl CharacterSets {
	/// Creates character sets whose non-Latin pool is built from `ranges`.
	pub fn with_non_latin_ranges(ranges: &[(u32, u32)]) -> Result<Self, GenerationError> {
		let mut sets = Self::default();
		sets.regenerate_non_latin(ranges)?;
		Ok(sets)
	}

	pub fn apostrophes(&self) -> &[char] {
		&APOSTROPHE_CHARACTERS
	}

	pub fn special_operators(&self) -> &[char] {
		&SPECIAL_OPERATOR_CHARACTERS
	}

	pub fn special_non_operators(&self) -> &[char] {
		&self.special_non_operator
	}

	pub fn non_latin(&self) -> &[char] {
		&self.non_latin
	}

	/// Replaces the non-Latin pool with the characters of `ranges`.
	///
	/// Each range is a `(start_code, count)` pair covering
	/// `start_code..start_code + count`.
	///
	/// # Errors
	/// - `Range` if `ranges` is empty, a start code is below 15000 or a count is zero
	/// - `InvalidCharacter` if a code point is not a valid `char` or collides with
	///   an apostrophe, a special character, a Latin letter, a digit, `.` or `_`
	///
	/// On error the previous pool is kept.
	pub fn regenerate_non_latin(&mut self, ranges: &[(u32, u32)]) -> Result<(), GenerationError> {
		if ranges.is_empty() {
			return Err(GenerationError::Range {
				start: 0,
				count: 0,
				reason: "at least one range is required".to_owned(),
			});
		}

		let mut pool = Vec::new();
		for &(start, count) in ranges {
			if start < MIN_NON_LATIN_CODE {
				return Err(GenerationError::Range {
					start,
					count,
					reason: format!(
						"start code should be greater or equal to {MIN_NON_LATIN_CODE}"
					),
				});
			}
			if count == 0 {
				return Err(GenerationError::Range {
					start,
					count,
					reason: "count should be positive".to_owned(),
				});
			}
			let end = start.checked_add(count).ok_or_else(|| GenerationError::Range {
				start,
				count,
				reason: "range exceeds the code point space".to_owned(),
			})?;

			for code in start..end {
				let c = char::from_u32(code).ok_or(GenerationError::InvalidCharacter { code })?;
				let is_reserved = is_special_character(c)
					|| c.is_ascii_alphabetic()
					|| is_decimal_digit(c)
					|| c == '.'
					|| c == '_';
				if is_reserved {
					return Err(GenerationError::InvalidCharacter { code });
				}
				pool.push(c);
			}
		}

		debug!(
			"regenerated non-latin pool with {} characters from {} ranges",
			pool.len(),
			ranges.len()
		);
		self.non_latin = pool;
		Ok(())
	}
}
