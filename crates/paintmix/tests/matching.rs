use std::collections::HashSet;

use paintmix::{
    mix_pigments, Background, Error, MatchingEngine, MediumType, MixError, MixingConfig,
    MixingLaw, Palette, PigmentColor, Rgb, SimilarColor,
};

const RED: Rgb = Rgb::new(0xcc, 0x22, 0x22);
const BLUE: Rgb = Rgb::new(0x22, 0x22, 0xcc);
const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
const PAPER: Rgb = Rgb::new(0xf7, 0xf5, 0xef);
const PURPLE: Rgb = Rgb::new(0x99, 0x55, 0xbb);

fn palette() -> Result<Palette, Error> {
    Ok(Palette::new(
        MediumType::Acrylic,
        vec![
            PigmentColor::from_rgb(1, 1, "Red", RED)?,
            PigmentColor::from_rgb(1, 2, "Blue", BLUE)?,
            PigmentColor::from_rgb(1, 3, "White", WHITE)?,
        ],
    ))
}

fn engine(config: MixingConfig) -> Result<MatchingEngine, Error> {
    let mut engine = MatchingEngine::new(config);
    engine.set_palette(&palette()?);
    engine.set_background(Background::new(PAPER)?);
    Ok(engine)
}

fn pigment_names(color: &SimilarColor) -> Vec<String> {
    color
        .layer()
        .mixture()
        .parts()
        .iter()
        .map(|part| part.pigment().name().to_string())
        .collect()
}

fn assert_sorted_and_distinct(colors: &[SimilarColor]) {
    assert!(colors
        .windows(2)
        .all(|pair| pair[0].delta_e() <= pair[1].delta_e()));

    let hashes: HashSet<u64> = colors
        .iter()
        .map(|color| color.layer().content_hash())
        .collect();
    assert_eq!(hashes.len(), colors.len());
}

#[test]
fn test_purple_from_red_and_blue() -> Result<(), Error> {
    for law in [MixingLaw::KubelkaMunk, MixingLaw::GeometricMean] {
        let engine = engine(MixingConfig {
            mixing_law: law,
            ..MixingConfig::default()
        })?;

        let matches = engine.find_similar_colors(PURPLE, 0.2, 0.0, 5);
        assert!(!matches.is_empty());
        assert_sorted_and_distinct(&matches);

        let position = matches
            .iter()
            .position(|color| pigment_names(color) == ["Red", "Blue"])
            .expect("red and blue make purple");
        assert!(position < 3, "red and blue rank {} for {:?}", position, law);

        for (index, color) in matches.iter().enumerate() {
            if color.layer().mixture().pigment_count() == 1 {
                assert!(position < index);
            }
        }
    }
    Ok(())
}

#[test]
fn test_hex_target() -> Result<(), Error> {
    let engine = engine(MixingConfig::default())?;
    let by_rgb = engine.find_similar_colors(PURPLE, 0.2, 0.0, 5);
    let by_hex = engine.find_similar_colors_hex("#9955BB", 0.2, 0.0, 5)?;
    assert_eq!(by_rgb, by_hex);
    assert!(engine.find_similar_colors_hex("purple", 0.2, 0.0, 5).is_err());
    Ok(())
}

#[test]
fn test_dedup() -> Result<(), Error> {
    let engine = engine(MixingConfig::default())?;

    // Dozens of red/blue layers are within 1.0, but only one is returned.
    let matches = engine.find_similar_colors(PURPLE, 1.0, 0.0, 100);
    assert_sorted_and_distinct(&matches);
    let red_and_blue = matches
        .iter()
        .filter(|color| pigment_names(color) == ["Red", "Blue"])
        .count();
    assert_eq!(red_and_blue, 1);
    assert_eq!(matches.len(), 3);
    Ok(())
}

#[test]
fn test_fallback() -> Result<(), Error> {
    let engine = engine(MixingConfig::default())?;

    for target in [
        PURPLE,
        Rgb::new(0, 0, 0),
        Rgb::new(0x10, 0xe0, 0x30),
        Rgb::new(0xff, 0xff, 0x00),
        WHITE,
    ] {
        let matches = engine.find_similar_colors(target, 0.0, 0.0, 2);
        assert!(!matches.is_empty(), "no fallback for {}", target);
        assert!(matches.len() <= 4);
        assert_sorted_and_distinct(&matches);
    }
    Ok(())
}

#[test]
fn test_white_only_palette() -> Result<(), Error> {
    let palette = Palette::new(
        MediumType::Oil,
        vec![PigmentColor::from_rgb(2, 1, "Titanium White", Rgb::new(0xfa, 0xfa, 0xf7))?],
    );
    let mut engine = MatchingEngine::new(MixingConfig::default());
    engine.set_palette(&palette);
    engine.set_background(Background::new(PAPER)?);
    assert!(0 < engine.thick_layers().len());

    let matches = engine.find_similar_colors(Rgb::new(0xfa, 0xfa, 0xfa), 0.0, 0.0, 3);
    assert_eq!(matches.len(), 1);
    assert_eq!(pigment_names(&matches[0]), ["Titanium White"]);
    Ok(())
}

#[test]
fn test_limit() -> Result<(), Error> {
    let engine = engine(MixingConfig::default())?;

    // Nothing qualifies and nothing is close enough for the fallback.
    let matches = engine.find_similar_colors(Rgb::new(0x10, 0xe0, 0x30), 0.0, 0.01, 5);
    assert!(matches.is_empty());

    let matches = engine.find_similar_colors(PURPLE, 0.2, 0.15, 5);
    assert!(matches.iter().all(|color| color.delta_e() <= 0.15));
    Ok(())
}

#[test]
fn test_background_is_target() -> Result<(), Error> {
    let engine = engine(MixingConfig::default())?;
    assert!(engine.find_similar_colors(PAPER, 1.0, 0.0, 5).is_empty());
    Ok(())
}

#[test]
fn test_empty_palette() {
    let mut engine = MatchingEngine::default();
    engine.set_palette(&Palette::new(MediumType::Oil, Vec::new()));
    assert_eq!(engine.candidate_count(), 0);
    assert!(engine.find_similar_colors(PURPLE, 1.0, 0.0, 5).is_empty());
}

#[test]
fn test_mix_validation() -> Result<(), Error> {
    let palette = palette()?;
    let config = MixingConfig::default();
    assert_eq!(
        mix_pigments(palette.colors(), &[1, 2], &config),
        Err(MixError::LengthMismatch {
            colors: 3,
            ratios: 2
        })
    );
    assert_eq!(mix_pigments(&palette.colors()[..0], &[], &config), Ok(None));
    Ok(())
}
