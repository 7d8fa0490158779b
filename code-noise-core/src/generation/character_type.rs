/// Category of a generated character.
///
/// Each category maps to a set of characters; see
/// [`Generator::generate_character`](super::Generator::generate_character).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharacterCategory {
	/// One of the 52 Latin letters, lower or upper case.
	Letter,
	/// A decimal digit.
	Number,
	SpecialOperatorCharacter,
	SpecialNonOperatorCharacter,
	/// One of `'`, `"` or `` ` ``.
	Apostrophe,
	Underscore,
	Dot,
	/// A character from the regenerable non-Latin pool.
	NonLatinCharacter,
}

/// Weight of one category in a distribution.
///
/// A distribution is a slice of these whose probabilities add up to exactly 100.
///
/// # Invariants
/// - Immutable once constructed
/// - `probability` is a percentage (0..=100)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CharacterTypeProbability {
	category: CharacterCategory,
	probability: u8,
}

impl CharacterTypeProbability {
	pub const fn new(category: CharacterCategory, probability: u8) -> Self {
		Self { category, probability }
	}

	pub fn category(&self) -> CharacterCategory {
		self.category
	}

	pub fn probability(&self) -> u32 {
		u32::from(self.probability)
	}
}

/// Distribution used for text runs when the caller does not supply one.
pub const DEFAULT_DISTRIBUTION: [CharacterTypeProbability; 7] = [
	CharacterTypeProbability::new(CharacterCategory::SpecialOperatorCharacter, 15),
	CharacterTypeProbability::new(CharacterCategory::SpecialNonOperatorCharacter, 15),
	CharacterTypeProbability::new(CharacterCategory::Dot, 5),
	CharacterTypeProbability::new(CharacterCategory::Underscore, 5),
	CharacterTypeProbability::new(CharacterCategory::NonLatinCharacter, 10),
	CharacterTypeProbability::new(CharacterCategory::Number, 10),
	CharacterTypeProbability::new(CharacterCategory::Letter, 40),
];

/// Sum of the probabilities of a distribution.
pub(crate) fn total_probability(distribution: &[CharacterTypeProbability]) -> u32 {
	distribution.iter().map(CharacterTypeProbability::probability).sum()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_distribution_adds_up_to_one_hundred() {
		assert_eq!(total_probability(&DEFAULT_DISTRIBUTION), 100);
	}

	#[test]
	fn empty_distribution_has_zero_total() {
		assert_eq!(total_probability(&[]), 0);
	}
}
