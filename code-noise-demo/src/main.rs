use code_noise_core::generation::{
    CharacterCategory, CharacterTypeProbability, CommentMarkerType, CommentMarkers, Generator,
    GeneratorParameters, GeneratorSettings, WhitespaceCommentFlags, WhitespaceFlags,
    generate_fragments,
};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows budgets and pool regeneration
    env_logger::init();

    // Parameters of the language under test
    let parameters = GeneratorParameters {
        max_additional_whitespaces: 3,
        max_additional_comments: 2,
        max_comment_length: 15,
        comment_markers: Some(CommentMarkers::c_sharp()),
        simulate_nice_code: false,
        is_language_case_sensitive: true,
    };

    // The random source stays with the caller, lend it to keep reproducibility under control
    let mut rng = StdRng::seed_from_u64(2026);
    let mut generator = Generator::new(parameters.clone(), &mut rng)?;

    // Replace the default non-Latin characters with CJK ideographs
    generator.charsets_mut().regenerate_non_latin(&[(0x4E00, 50), (0x5000, 50)])?;

    // Out of policy ranges are refused and keep the previous pool
    match generator.charsets_mut().regenerate_non_latin(&[(14_000, 10)]) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Range refused: {e}"),
    }

    // Weighted characters, the probabilities must add up to 100
    let identifier_like = [
        CharacterTypeProbability::new(CharacterCategory::Letter, 70),
        CharacterTypeProbability::new(CharacterCategory::Number, 20),
        CharacterTypeProbability::new(CharacterCategory::Underscore, 10),
    ];
    let word: String = (0..12)
        .map(|_| generator.generate_character(&identifier_like))
        .collect::<Result<_, _>>()?;
    println!("Weighted characters: {word}");

    let broken = [CharacterTypeProbability::new(CharacterCategory::Letter, 99)];
    if let Err(e) = generator.generate_character(&broken) {
        println!("Distribution refused: {e}");
    }

    // Literal content framed by double quotes: embedded quotes are doubled
    let literal = generator.generate_text(30, WhitespaceFlags::SPACE, Some('"'), None, None)?;
    println!("Literal: \"{literal}\"");

    // Whitespace and comments between two tokens, with comment positions reported
    let mut code = String::from("x =");
    let mut comments = Vec::new();
    generator.generate_whitespace_and_comments(
        &mut code,
        true,
        Some(|c| comments.push(c)),
        WhitespaceCommentFlags::WhitespaceAndComments,
        None,
    )?;
    code.push_str("1;");
    println!("Code: {code:?}");
    for comment in &comments {
        let text = &code[comment.position..comment.position + comment.length];
        println!("  comment at {}: {:?}", comment.position, text);
    }

    // A case-insensitive language with keyword comments, generated in parallel
    let settings = GeneratorSettings {
        parameters: GeneratorParameters {
            comment_markers: Some(CommentMarkers::new(
                "rem",
                "rem{",
                "}rem",
                CommentMarkerType::RemarkText,
            )),
            is_language_case_sensitive: false,
            ..parameters
        },
        non_latin_ranges: vec![(15_000, 100)],
    };
    let fragments = generate_fragments(&settings, 8, 6, 7)?;
    info!("generated {} fragments", fragments.len());
    for (i, fragment) in fragments.iter().enumerate() {
        println!("Fragment {} ({} comments): {:?}", i + 1, fragment.comments.len(), fragment.text);
    }

    Ok(())
}
