//! The tunable parameters for mixing and enumerating candidates.

use crate::fraction::{Fraction, CANONICAL_FRACTIONS};
use crate::spectrum::{MixingLaw, TintingStrength};
use crate::util::{Env, Environment};
use crate::Float;

/// The environment variable selecting the mixing law.
pub const MIXING_LAW_VAR: &str = "PAINTMIX_MIXING_LAW";

/// The environment variable selecting the tinting strength proxy.
pub const TINTING_STRENGTH_VAR: &str = "PAINTMIX_TINTING_STRENGTH";

/// The environment variable overriding the near-neutral chroma threshold.
pub const NEAR_NEUTRAL_CHROMA_VAR: &str = "PAINTMIX_NEAR_NEUTRAL_CHROMA";

/// The environment variable overriding the achromatic chroma threshold.
pub const ACHROMATIC_CHROMA_VAR: &str = "PAINTMIX_ACHROMATIC_CHROMA";

/// The configuration for mixing pigments and enumerating candidates.
///
/// The chroma thresholds were tuned by eye. They bound the number of
/// candidates for large palettes by skipping mixtures of grays, which look
/// alike. Both are Oklch chroma values.
#[derive(Clone, Debug, PartialEq)]
pub struct MixingConfig {
    /// The law for mixing reflectance curves.
    pub mixing_law: MixingLaw,
    /// The weighting of pigments for the Kubelka-Munk law.
    pub tinting_strength: TintingStrength,
    /// Pigments with less chroma are near-neutral. Pairs may contain at most
    /// one such pigment and triples none.
    pub near_neutral_chroma: Float,
    /// Pigments with less chroma are achromatic and never mixed with others.
    pub achromatic_chroma: Float,
    /// The fractions of white for tinting.
    pub tint_fractions: Vec<Fraction>,
    /// The consistencies for thinned layers.
    pub dilution_fractions: Vec<Fraction>,
    /// The total parts for two-pigment ratios, e.g., 10 for 1:9 through 9:1.
    pub pair_parts: u32,
    /// The total parts for three-pigment ratios.
    pub triple_parts: u32,
}

impl Default for MixingConfig {
    fn default() -> Self {
        Self {
            mixing_law: MixingLaw::default(),
            tinting_strength: TintingStrength::default(),
            near_neutral_chroma: 0.05,
            achromatic_chroma: 0.02,
            tint_fractions: CANONICAL_FRACTIONS.to_vec(),
            dilution_fractions: CANONICAL_FRACTIONS.to_vec(),
            pair_parts: 10,
            triple_parts: 9,
        }
    }
}

impl MixingConfig {
    /// Create the default configuration updated from the environment.
    ///
    /// This method reads [`MIXING_LAW_VAR`] (`kubelka-munk` or
    /// `geometric-mean`), [`TINTING_STRENGTH_VAR`]
    /// (`squared-ratio-luminance` or `ratio`), [`NEAR_NEUTRAL_CHROMA_VAR`],
    /// and [`ACHROMATIC_CHROMA_VAR`]. It ignores invalid values with a
    /// warning.
    pub fn from_environment() -> Self {
        config_from_environment(&Env::default())
    }
}

fn parse_mixing_law(value: &str) -> Option<MixingLaw> {
    match value.to_ascii_lowercase().as_str() {
        "kubelka-munk" | "km" => Some(MixingLaw::KubelkaMunk),
        "geometric-mean" | "geometric" => Some(MixingLaw::GeometricMean),
        _ => None,
    }
}

fn parse_tinting_strength(value: &str) -> Option<TintingStrength> {
    match value.to_ascii_lowercase().as_str() {
        "squared-ratio-luminance" => Some(TintingStrength::SquaredRatioLuminance),
        "ratio" => Some(TintingStrength::Ratio),
        _ => None,
    }
}

fn parse_chroma(value: &str) -> Option<Float> {
    value
        .parse::<Float>()
        .ok()
        .filter(|chroma| chroma.is_finite() && 0.0 <= *chroma)
}

fn config_from_environment<E: Environment>(env: &E) -> MixingConfig {
    fn update<E: Environment, T>(
        env: &E,
        key: &str,
        parse: fn(&str) -> Option<T>,
        slot: &mut T,
    ) {
        if let Some(value) = env.read_non_empty(key) {
            match parse(&value) {
                Some(parsed) => *slot = parsed,
                None => log::warn!("ignoring {} with invalid value {:?}", key, value),
            }
        }
    }

    let mut config = MixingConfig::default();
    update(env, MIXING_LAW_VAR, parse_mixing_law, &mut config.mixing_law);
    update(
        env,
        TINTING_STRENGTH_VAR,
        parse_tinting_strength,
        &mut config.tinting_strength,
    );
    update(
        env,
        NEAR_NEUTRAL_CHROMA_VAR,
        parse_chroma,
        &mut config.near_neutral_chroma,
    );
    update(
        env,
        ACHROMATIC_CHROMA_VAR,
        parse_chroma,
        &mut config.achromatic_chroma,
    );
    config
}

#[cfg(test)]
mod test {
    use super::{
        config_from_environment, MixingConfig, ACHROMATIC_CHROMA_VAR, MIXING_LAW_VAR,
        NEAR_NEUTRAL_CHROMA_VAR, TINTING_STRENGTH_VAR,
    };
    use crate::spectrum::{MixingLaw, TintingStrength};
    use crate::util::FakeEnv;

    #[test]
    fn test_defaults() {
        let config = config_from_environment(&FakeEnv::new());
        assert_eq!(config, MixingConfig::default());
        assert_eq!(config.mixing_law, MixingLaw::KubelkaMunk);
        assert_eq!(config.near_neutral_chroma, 0.05);
        assert_eq!(config.achromatic_chroma, 0.02);
        assert_eq!(config.tint_fractions.len(), 4);
    }

    #[test]
    fn test_overrides() {
        let mut env = FakeEnv::new();
        env.set(MIXING_LAW_VAR, "Geometric-Mean")
            .set(TINTING_STRENGTH_VAR, "ratio")
            .set(NEAR_NEUTRAL_CHROMA_VAR, "0.08")
            .set(ACHROMATIC_CHROMA_VAR, "0.01");

        let config = config_from_environment(&env);
        assert_eq!(config.mixing_law, MixingLaw::GeometricMean);
        assert_eq!(config.tinting_strength, TintingStrength::Ratio);
        assert_eq!(config.near_neutral_chroma, 0.08);
        assert_eq!(config.achromatic_chroma, 0.01);
    }

    #[test]
    fn test_invalid_overrides() {
        let mut env = FakeEnv::new();
        env.set(MIXING_LAW_VAR, "additive")
            .set(NEAR_NEUTRAL_CHROMA_VAR, "-0.1")
            .set(ACHROMATIC_CHROMA_VAR, "lots");

        assert_eq!(config_from_environment(&env), MixingConfig::default());
    }
}
