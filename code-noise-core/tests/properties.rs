//! Property-based tests for the code-noise generator.
//!
//! Generators are seeded from proptest-chosen seeds so every failure is
//! reproducible.

use code_noise_core::GenerationError;
use code_noise_core::generation::{
	CharacterCategory, CharacterSets, CharacterTypeProbability, CommentMarkerType, CommentMarkers,
	CommentedTextData, Generator, GeneratorParameters, WhitespaceCommentFlags, WhitespaceFlags,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const CATEGORIES: [CharacterCategory; 8] = [
	CharacterCategory::Letter,
	CharacterCategory::Number,
	CharacterCategory::SpecialOperatorCharacter,
	CharacterCategory::SpecialNonOperatorCharacter,
	CharacterCategory::Apostrophe,
	CharacterCategory::Underscore,
	CharacterCategory::Dot,
	CharacterCategory::NonLatinCharacter,
];

fn generator(parameters: GeneratorParameters, seed: u64) -> Generator<StdRng> {
	Generator::new(parameters, StdRng::seed_from_u64(seed)).unwrap()
}

/// Splits 100 into `weights.len()` probabilities proportional to `weights`.
fn distribution_from(weights: &[u8]) -> Vec<CharacterTypeProbability> {
	let total: u32 = weights.iter().map(|w| u32::from(*w) + 1).sum();
	let mut probabilities: Vec<u32> =
		weights.iter().map(|w| (u32::from(*w) + 1) * 100 / total).collect();
	let assigned: u32 = probabilities.iter().sum();
	probabilities[0] += 100 - assigned;

	probabilities
		.into_iter()
		.zip(CATEGORIES)
		.map(|(p, category)| CharacterTypeProbability::new(category, p as u8))
		.collect()
}

fn markers_strategy() -> impl Strategy<Value = CommentMarkers> {
	prop_oneof![
		Just(CommentMarkers::c_sharp()),
		Just(CommentMarkers::new("REM", "REM{", "}REM", CommentMarkerType::RemarkText)),
		Just(CommentMarkers::new("--", "{-", "-}", CommentMarkerType::Other)),
	]
}

proptest! {
	#[test]
	fn valid_distributions_only_yield_their_categories(
		weights in prop::collection::vec(any::<u8>(), 1..=8),
		seed in any::<u64>(),
	) {
		let distribution = distribution_from(&weights);
		let mut generator = generator(GeneratorParameters::default(), seed);
		let allowed: Vec<CharacterCategory> = distribution.iter().map(|d| d.category()).collect();

		for _ in 0..50 {
			let c = generator.generate_character(&distribution).unwrap();
			let charsets = generator.charsets();
			let matches = allowed.iter().any(|category| match category {
				CharacterCategory::Letter => c.is_ascii_alphabetic(),
				CharacterCategory::Number => c.is_ascii_digit(),
				CharacterCategory::SpecialOperatorCharacter => {
					charsets.special_operators().contains(&c)
				}
				CharacterCategory::SpecialNonOperatorCharacter => {
					charsets.special_non_operators().contains(&c)
				}
				CharacterCategory::Apostrophe => charsets.apostrophes().contains(&c),
				CharacterCategory::Underscore => c == '_',
				CharacterCategory::Dot => c == '.',
				CharacterCategory::NonLatinCharacter => charsets.non_latin().contains(&c),
			});
			prop_assert!(matches, "{c:?} not in {allowed:?}");
		}
	}

	#[test]
	fn off_by_one_sums_report_the_actual_sum(
		first in 0u8..=100,
		delta in prop_oneof![Just(-1i32), Just(1i32)],
	) {
		let second = (100 - i32::from(first) + delta).max(0) as u8;
		let actual = u32::from(first) + u32::from(second);
		prop_assume!(actual != 100);

		let distribution = [
			CharacterTypeProbability::new(CharacterCategory::Letter, first),
			CharacterTypeProbability::new(CharacterCategory::Number, second),
		];
		let mut generator = generator(GeneratorParameters::default(), 0);
		prop_assert_eq!(
			generator.generate_character(&distribution),
			Err(GenerationError::InvalidDistribution { actual })
		);
	}

	#[test]
	fn text_is_long_enough_and_respects_the_predicate(
		target in 0usize..200,
		max_whitespaces in 0usize..6,
		forbidden in prop::sample::select(vec!['a', '_', '.', '\'', ' ', '(']),
		seed in any::<u64>(),
	) {
		let parameters = GeneratorParameters {
			max_additional_whitespaces: max_whitespaces,
			..GeneratorParameters::default()
		};
		let mut generator = generator(parameters, seed);
		let is_valid = |_: &str, c: char| c != forbidden;

		let text = generator
			.generate_text(target, WhitespaceFlags::ANY, None, None, Some(&is_valid))
			.unwrap();
		prop_assert_eq!(text.chars().count(), target);
		prop_assert!(!text.contains(forbidden));
	}

	#[test]
	fn regenerated_pool_matches_the_range(start in 15_000u32..40_000, count in 1u32..200) {
		let mut sets = CharacterSets::default();
		sets.regenerate_non_latin(&[(start, count)]).unwrap();
		prop_assert_eq!(sets.non_latin().len(), count as usize);
		for c in sets.non_latin() {
			prop_assert!((start..start + count).contains(&(*c as u32)));
			prop_assert!(!c.is_ascii() && !c.is_numeric());
		}
	}

	#[test]
	fn start_codes_below_the_minimum_are_rejected(start in 0u32..15_000, count in 1u32..100) {
		let mut sets = CharacterSets::default();
		let is_range_error = matches!(
			sets.regenerate_non_latin(&[(start, count)]),
			Err(GenerationError::Range { .. })
		);
		prop_assert!(is_range_error);
		prop_assert_eq!(sets.non_latin().len(), 100);
	}

	#[test]
	fn comments_round_trip_through_the_observer(
		markers in markers_strategy(),
		case_sensitive in any::<bool>(),
		nice in any::<bool>(),
		ending in any::<bool>(),
		seed in any::<u64>(),
	) {
		let parameters = GeneratorParameters {
			comment_markers: Some(markers.clone()),
			is_language_case_sensitive: case_sensitive,
			..GeneratorParameters::default()
		};
		let mut generator = generator(parameters, seed);
		let mut buffer = String::new();
		let mut reported: Vec<CommentedTextData> = Vec::new();
		generator
			.generate_comment(&mut buffer, Some(|c| reported.push(c)), nice, ending, None)
			.unwrap();

		prop_assert_eq!(reported.len(), 1);
		let data = reported[0];
		prop_assert_eq!(data.position, 0);
		let comment = buffer[data.position..data.position + data.length].to_lowercase();

		if data.is_line_comment {
			prop_assert!(comment.starts_with(&markers.line_comment_marker.to_lowercase()));
			prop_assert_eq!(&buffer[data.length..], if ending { "" } else { "\n" });
		} else {
			let start = markers.multiline_comment_start_marker.to_lowercase();
			let end = markers.multiline_comment_end_marker.to_lowercase();
			prop_assert!(comment.starts_with(&start) && comment.ends_with(&end));
			prop_assert_eq!(data.length, buffer.len());
			let body = &comment[start.len()..comment.len() - end.len()];
			prop_assert!(!body.contains(&end), "{}", comment);
		}
	}

	#[test]
	fn whitespace_only_interleaving_never_reports_comments(
		add_at_least_one in any::<bool>(),
		max_whitespaces in 0usize..5,
		seed in any::<u64>(),
	) {
		let parameters = GeneratorParameters {
			max_additional_whitespaces: max_whitespaces,
			..GeneratorParameters::default()
		};
		let mut generator = generator(parameters, seed);
		let mut buffer = String::from("x");
		let mut reported = 0;
		generator
			.generate_whitespace_and_comments(
				&mut buffer,
				add_at_least_one,
				Some(|_| reported += 1),
				WhitespaceCommentFlags::WhitespaceOnly,
				None,
			)
			.unwrap();

		prop_assert_eq!(reported, 0);
		prop_assert!(buffer[1..].chars().all(char::is_whitespace));
		prop_assert!(buffer.len() - 1 <= max_whitespaces.max(1));
	}

	#[test]
	fn broken_distributions_leave_the_buffer_untouched(
		markers in markers_strategy(),
		letters in 0u8..=99,
		prefix in "[a-z/ ]{0,6}",
		seed in any::<u64>(),
	) {
		let parameters = GeneratorParameters {
			comment_markers: Some(markers),
			max_additional_comments: 4,
			..GeneratorParameters::default()
		};
		let mut generator = generator(parameters, seed);
		let distribution = [CharacterTypeProbability::new(CharacterCategory::Letter, letters)];
		let mut buffer = prefix.clone();
		let mut reported = 0;

		let result = generator.generate_whitespace_and_comments(
			&mut buffer,
			true,
			Some(|_| reported += 1),
			WhitespaceCommentFlags::WhitespaceAndComments,
			Some(&distribution),
		);
		let actual = u32::from(letters);
		prop_assert_eq!(result, Err(GenerationError::InvalidDistribution { actual }));
		prop_assert_eq!(&buffer, &prefix);
		prop_assert_eq!(reported, 0);
	}

	#[test]
	fn case_sensitive_capitalization_is_identity(text in "\\PC{0,20}", seed in any::<u64>()) {
		let mut generator = generator(GeneratorParameters::default(), seed);
		prop_assert_eq!(generator.apply_random_capitalization(&text), text);
	}
}
