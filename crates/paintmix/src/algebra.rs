//! Enumerating the candidate layers for a palette.
//!
//! The candidates for a palette and background result from the following
//! steps:
//!
//!  1. Partition the palette into whites and chromatic pigments. Whites only
//!     count as such if the medium supports tinting and the palette has at
//!     least one other pigment.
//!  2. Every chromatic pigment by itself is a mixture.
//!  3. If the medium allows two pigments, every pair of chromatic pigments
//!     in every ratio of [`MixingConfig::pair_parts`] is a mixture. Pairs
//!     with more than one near-neutral or any achromatic pigment are skipped.
//!  4. If the medium allows three pigments, every triple of chromatic
//!     pigments in every ratio of [`MixingConfig::triple_parts`] is a
//!     mixture. Triples with any near-neutral pigment are skipped.
//!  5. If the medium supports tinting, every mixture is also tinted with
//!     every white at every tint fraction.
//!  6. Every tinted mixture is painted thick. If the medium supports glazing
//!     and there is a background, every tinted mixture is also painted thin
//!     at every dilution fraction.

use std::sync::Arc;
use std::time::Instant;

use crate::config::MixingConfig;
use crate::core::reduce_ratios;
use crate::mixture::{Layer, Mixture, TintedMixture};
use crate::pigment::{Background, MediumType, MixingPolicy, Palette, PigmentColor};
use crate::Float;

/// Partition the palette's pigments into whites and chromatic pigments.
///
/// If the policy does not support tinting, all pigments are chromatic. So
/// are the whites of a palette with nothing but whites, since they would
/// otherwise have nothing to tint.
pub fn partition(
    palette: &Palette,
) -> (Vec<Arc<PigmentColor>>, Vec<Arc<PigmentColor>>) {
    if !palette.policy().tint {
        return (Vec::new(), palette.colors().to_vec());
    }

    let (whites, chromatic): (Vec<_>, Vec<_>) = palette
        .colors()
        .iter()
        .cloned()
        .partition(|color| color.is_white());
    if chromatic.is_empty() {
        (chromatic, whites)
    } else {
        (whites, chromatic)
    }
}

/// Enumerate the ratios for two pigments with the given total parts.
///
/// For ten parts, the ratios are 1:9, 1:4, 3:7, 2:3, 1:1, 3:2, 7:3, 4:1, and
/// 9:1.
pub fn pair_ratios(total: u32) -> Vec<[u32; 2]> {
    (1..total)
        .map(|a| {
            let reduced = reduce_ratios(&[a, total - a]);
            [reduced[0], reduced[1]]
        })
        .collect()
}

/// Enumerate the ratios for three pigments with the given total parts.
///
/// For nine parts, there are 28 ratios, from 1:1:7 to 7:1:1.
pub fn triple_ratios(total: u32) -> Vec<[u32; 3]> {
    let mut ratios = Vec::new();
    for a in 1..total.saturating_sub(1) {
        for b in 1..total - a {
            let reduced = reduce_ratios(&[a, b, total - a - b]);
            ratios.push([reduced[0], reduced[1], reduced[2]]);
        }
    }
    ratios
}

/// Determine whether to mix the two pigments.
fn keep_pair(chroma: [Float; 2], config: &MixingConfig) -> bool {
    let near_neutral = chroma
        .iter()
        .filter(|c| **c < config.near_neutral_chroma)
        .count();
    near_neutral <= 1 && chroma.iter().all(|c| config.achromatic_chroma <= *c)
}

/// Determine whether to mix the three pigments.
fn keep_triple(chroma: [Float; 3], config: &MixingConfig) -> bool {
    chroma.iter().all(|c| config.near_neutral_chroma <= *c)
}

/// Enumerate the untinted mixtures of the chromatic pigments.
pub fn mixtures(
    chromatic: &[Arc<PigmentColor>],
    policy: MixingPolicy,
    config: &MixingConfig,
) -> Vec<Mixture> {
    let mut result: Vec<Mixture> = chromatic.iter().map(Mixture::single).collect();
    let chroma: Vec<Float> = chromatic.iter().map(|c| c.chroma()).collect();
    let n = chromatic.len();

    if 2 <= policy.max_pigments {
        let ratios = pair_ratios(config.pair_parts);
        for i in 0..n {
            for j in i + 1..n {
                if !keep_pair([chroma[i], chroma[j]], config) {
                    continue;
                }
                for [a, b] in &ratios {
                    result.push(Mixture::blend(
                        vec![(chromatic[i].clone(), *a), (chromatic[j].clone(), *b)],
                        config,
                    ));
                }
            }
        }
    }

    if 3 <= policy.max_pigments {
        let ratios = triple_ratios(config.triple_parts);
        for i in 0..n {
            for j in i + 1..n {
                for k in j + 1..n {
                    if !keep_triple([chroma[i], chroma[j], chroma[k]], config) {
                        continue;
                    }
                    for [a, b, c] in &ratios {
                        result.push(Mixture::blend(
                            vec![
                                (chromatic[i].clone(), *a),
                                (chromatic[j].clone(), *b),
                                (chromatic[k].clone(), *c),
                            ],
                            config,
                        ));
                    }
                }
            }
        }
    }

    result
}

/// Tint the mixtures with the whites.
///
/// Every mixture is included untinted, followed by its tints.
pub fn tint(
    mixtures: Vec<Mixture>,
    whites: &[Arc<PigmentColor>],
    config: &MixingConfig,
) -> Vec<Arc<TintedMixture>> {
    let mut result = Vec::with_capacity(
        mixtures.len() * (1 + whites.len() * config.tint_fractions.len()),
    );

    for mixture in mixtures {
        result.push(Arc::new(TintedMixture::untinted(mixture.clone())));
        for white in whites {
            for fraction in &config.tint_fractions {
                if !fraction.is_zero() {
                    result.push(Arc::new(TintedMixture::tinted(
                        mixture.clone(),
                        white,
                        *fraction,
                        config,
                    )));
                }
            }
        }
    }

    result
}

/// Paint every tinted mixture thick.
pub fn thick_layers(medium: MediumType, tinted: &[Arc<TintedMixture>]) -> Vec<Layer> {
    tinted
        .iter()
        .map(|mixture| Layer::thick(medium, mixture.clone()))
        .collect()
}

/// Glaze every tinted mixture over the background.
pub fn thinned_layers(
    medium: MediumType,
    tinted: &[Arc<TintedMixture>],
    background: &Background,
    config: &MixingConfig,
) -> Vec<Layer> {
    let mut result = Vec::with_capacity(tinted.len() * config.dilution_fractions.len());
    for mixture in tinted {
        for consistency in &config.dilution_fractions {
            if consistency.is_zero() || consistency.is_whole() {
                continue;
            }
            result.push(Layer::thinned(
                medium,
                mixture.clone(),
                *consistency,
                background,
                config,
            ));
        }
    }
    result
}

// ====================================================================================================================

/// The candidate layers for a palette and background.
#[derive(Clone, Debug, Default)]
pub struct CandidateSet {
    medium: Option<MediumType>,
    glazing: bool,
    tinted: Vec<Arc<TintedMixture>>,
    thick: Vec<Layer>,
    thinned: Vec<Layer>,
}

impl CandidateSet {
    /// Enumerate the candidates for the palette and optional background.
    pub fn new(palette: &Palette, background: Option<&Background>, config: &MixingConfig) -> Self {
        let start = Instant::now();
        let policy = palette.policy();
        let (whites, chromatic) = partition(palette);
        let mixtures = mixtures(&chromatic, policy, config);
        let mixture_count = mixtures.len();
        let tinted = tint(mixtures, &whites, config);
        let thick = thick_layers(palette.medium(), &tinted);

        log::debug!(
            "{} palette with {} whites and {} chromatic pigments yields {} mixtures, {} tinted, in {:?}",
            palette.medium(),
            whites.len(),
            chromatic.len(),
            mixture_count,
            tinted.len(),
            start.elapsed()
        );

        let mut candidates = Self {
            medium: Some(palette.medium()),
            glazing: policy.glazing,
            tinted,
            thick,
            thinned: Vec::new(),
        };
        candidates.set_background(background, config);
        candidates
    }

    /// Recompute the thinned layers for the background.
    ///
    /// Mixtures and thick layers do not depend on the background and are
    /// kept as is.
    pub fn set_background(&mut self, background: Option<&Background>, config: &MixingConfig) {
        self.thinned = match (self.medium, background) {
            (Some(medium), Some(background)) if self.glazing => {
                let start = Instant::now();
                let layers = thinned_layers(medium, &self.tinted, background, config);
                log::debug!(
                    "glazing over {} yields {} thinned layers in {:?}",
                    background.rgb(),
                    layers.len(),
                    start.elapsed()
                );
                layers
            }
            _ => Vec::new(),
        };
    }

    /// Get the tinted mixtures.
    pub fn tinted_mixtures(&self) -> &[Arc<TintedMixture>] {
        &self.tinted
    }

    /// Get the thick layers.
    pub fn thick_layers(&self) -> &[Layer] {
        &self.thick
    }

    /// Get the thinned layers.
    pub fn thinned_layers(&self) -> &[Layer] {
        &self.thinned
    }

    /// Get the total number of layers.
    pub fn len(&self) -> usize {
        self.thick.len() + self.thinned.len()
    }

    /// Determine whether there are no layers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
