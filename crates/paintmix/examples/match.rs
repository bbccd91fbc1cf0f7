//! Find paint mixtures for colors given on the command line.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example match -- '#9955bb' '#6b8e23'
//! ```

use paintmix::{Background, Error, MatchingEngine, MediumType, MixingConfig, Palette, PigmentColor};

const PAINTS: [(&str, &str); 7] = [
    ("Cadmium Red", "#cc2222"),
    ("Alizarin Crimson", "#8e1b2f"),
    ("Ultramarine", "#2222cc"),
    ("Cadmium Yellow", "#f0d020"),
    ("Phthalo Green", "#107050"),
    ("Burnt Sienna", "#8a3324"),
    ("Titanium White", "#ffffff"),
];

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut colors = Vec::with_capacity(PAINTS.len());
    for (index, (name, hex)) in PAINTS.iter().enumerate() {
        colors.push(PigmentColor::from_rgb(1, index as u32, name, hex.parse()?)?);
    }
    let palette = Palette::new(MediumType::Acrylic, colors);

    let mut engine = MatchingEngine::new(MixingConfig::from_environment());
    engine.set_palette(&palette);
    engine.set_background(Background::from_hex("#f7f5ef")?);
    log::info!("{} candidate layers", engine.candidate_count());

    let mut targets: Vec<String> = std::env::args().skip(1).collect();
    if targets.is_empty() {
        targets.push("#9955bb".to_string());
    }

    for target in &targets {
        println!("\n{}:", target);
        for similar in engine.find_similar_colors_hex(target, 0.05, 0.0, 5)? {
            println!("    {}", similar);
        }
    }

    Ok(())
}
