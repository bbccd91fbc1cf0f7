//! Mixtures of pigments and the layers painted with them.
//!
//! Each stage derives from the previous one:
//!
//!   * A [`Mixture`] blends one to three pigments in integer ratios.
//!   * A [`TintedMixture`] optionally lightens a mixture with white.
//!   * A [`Layer`] applies a tinted mixture either thick, i.e., fully opaque,
//!     or thinned at some consistency, i.e., glazed over a background.
//!
//! All stages are immutable values. Later stages share earlier ones through
//! [`Arc`]s, since many layers derive from the same tinted mixture.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use crate::config::MixingConfig;
use crate::core::{delta_e_ok, reduce_ratios};
use crate::error::MixError;
use crate::fraction::Fraction;
use crate::pigment::{Background, MediumType, PigmentColor, Rgb};
use crate::spectrum::Reflectance;
use crate::Float;

/// A pigment and its parts in a mixture.
#[derive(Clone, Debug, PartialEq)]
pub struct MixturePart {
    pigment: Arc<PigmentColor>,
    parts: u32,
}

impl MixturePart {
    /// Get the pigment.
    pub fn pigment(&self) -> &Arc<PigmentColor> {
        &self.pigment
    }

    /// Get the number of parts.
    pub fn parts(&self) -> u32 {
        self.parts
    }
}

/// Mix the pigments in the given ratios.
///
/// The ratios are positive integers, reduced to lowest terms before mixing.
/// The same pigment occurring more than once contributes the sum of its
/// ratios. This function fails if the number of colors and ratios differ or
/// if a ratio is zero. It returns `None` if there are no colors.
pub fn mix_pigments(
    colors: &[Arc<PigmentColor>],
    ratios: &[u32],
    config: &MixingConfig,
) -> Result<Option<Mixture>, MixError> {
    if colors.len() != ratios.len() {
        return Err(MixError::LengthMismatch {
            colors: colors.len(),
            ratios: ratios.len(),
        });
    } else if ratios.iter().any(|ratio| *ratio == 0) {
        return Err(MixError::ZeroRatio);
    } else if colors.is_empty() {
        return Ok(None);
    }

    let mut combined: Vec<(Arc<PigmentColor>, u32)> = Vec::with_capacity(colors.len());
    for (color, ratio) in colors.iter().zip(ratios) {
        match combined.iter_mut().find(|(c, _)| c.key() == color.key()) {
            Some((_, parts)) => *parts += ratio,
            None => combined.push((color.clone(), *ratio)),
        }
    }

    Ok(Some(Mixture::blend(combined, config)))
}

/// A blend of one or more pigments.
#[derive(Clone, Debug, PartialEq)]
pub struct Mixture {
    parts: Vec<MixturePart>,
    reflectance: Reflectance,
    rgb: Rgb,
}

impl Mixture {
    /// Create a mixture with a single pigment.
    pub fn single(pigment: &Arc<PigmentColor>) -> Self {
        Self {
            parts: vec![MixturePart {
                pigment: pigment.clone(),
                parts: 1,
            }],
            reflectance: pigment.reflectance().clone(),
            rgb: pigment.rgb(),
        }
    }

    /// Blend the distinct pigments in their positive ratios.
    pub(crate) fn blend(pigments: Vec<(Arc<PigmentColor>, u32)>, config: &MixingConfig) -> Self {
        let ratios: Vec<u32> = pigments.iter().map(|(_, ratio)| *ratio).collect();
        let mut parts: Vec<MixturePart> = pigments
            .into_iter()
            .zip(reduce_ratios(&ratios))
            .map(|((pigment, _), parts)| MixturePart { pigment, parts })
            .collect();
        parts.sort_by_key(|part| part.pigment.key());

        if let [part] = parts.as_slice() {
            return Self::single(&part.pigment);
        }

        let ingredients: Vec<(&Reflectance, Float)> = parts
            .iter()
            .map(|part| (part.pigment.reflectance(), part.parts as Float))
            .collect();
        let reflectance = config
            .mixing_law
            .mix(config.tinting_strength, &ingredients)
            .unwrap_or_else(|| parts[0].pigment.reflectance().clone());
        let rgb = reflectance.to_rgb();

        Self {
            parts,
            reflectance,
            rgb,
        }
    }

    /// Get the parts, sorted by brand and pigment id.
    pub fn parts(&self) -> &[MixturePart] {
        &self.parts
    }

    /// Get the number of pigments.
    pub fn pigment_count(&self) -> usize {
        self.parts.len()
    }

    /// Get the reflectance curve.
    pub fn reflectance(&self) -> &Reflectance {
        &self.reflectance
    }

    /// Get the color.
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Compute the content hash.
    ///
    /// The content hash identifies the set of pigments in this mixture. It
    /// ignores their ratios and order.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.parts.len().hash(&mut hasher);
        for part in &self.parts {
            part.pigment.key().hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Describe this mixture, e.g., `1 Cadmium Red + 2 Ultramarine`.
    pub fn description(&self) -> String {
        if let [part] = self.parts.as_slice() {
            return part.pigment.name().to_string();
        }

        self.parts
            .iter()
            .map(|part| format!("{} {}", part.parts, part.pigment.name()))
            .collect::<Vec<_>>()
            .join(" + ")
    }

    fn write_key(&self, key: &mut String) {
        for (index, part) in self.parts.iter().enumerate() {
            if 0 < index {
                key.push('+');
            }
            let (brand, id) = part.pigment.key();
            key.push_str(&format!("{}.{}x{}", brand, id, part.parts));
        }
    }
}

// ====================================================================================================================

/// White added to a mixture.
#[derive(Clone, Debug, PartialEq)]
pub struct Tint {
    white: Arc<PigmentColor>,
    fraction: Fraction,
}

impl Tint {
    /// Get the white pigment.
    pub fn white(&self) -> &Arc<PigmentColor> {
        &self.white
    }

    /// Get the fraction of white in the tinted mixture.
    pub fn fraction(&self) -> Fraction {
        self.fraction
    }
}

/// A mixture, optionally tinted with white.
#[derive(Clone, Debug, PartialEq)]
pub struct TintedMixture {
    mixture: Mixture,
    tint: Option<Tint>,
    reflectance: Reflectance,
    rgb: Rgb,
}

impl TintedMixture {
    /// Wrap the mixture without tint.
    pub fn untinted(mixture: Mixture) -> Self {
        let reflectance = mixture.reflectance.clone();
        let rgb = mixture.rgb;
        Self {
            mixture,
            tint: None,
            reflectance,
            rgb,
        }
    }

    /// Tint the mixture with the given fraction of white.
    ///
    /// A zero fraction leaves the mixture untinted.
    pub fn tinted(
        mixture: Mixture,
        white: &Arc<PigmentColor>,
        fraction: Fraction,
        config: &MixingConfig,
    ) -> Self {
        if fraction.is_zero() {
            return Self::untinted(mixture);
        }

        let reflectance = config
            .mixing_law
            .mix(
                config.tinting_strength,
                &[
                    (mixture.reflectance(), fraction.complement().value()),
                    (white.reflectance(), fraction.value()),
                ],
            )
            .unwrap_or_else(|| mixture.reflectance.clone());
        let rgb = reflectance.to_rgb();

        Self {
            mixture,
            tint: Some(Tint {
                white: white.clone(),
                fraction,
            }),
            reflectance,
            rgb,
        }
    }

    /// Get the mixture.
    pub fn mixture(&self) -> &Mixture {
        &self.mixture
    }

    /// Get the tint, if any.
    pub fn tint(&self) -> Option<&Tint> {
        self.tint.as_ref()
    }

    /// Get the fraction of white, which is zero without tint.
    pub fn tint_fraction(&self) -> Fraction {
        self.tint.as_ref().map_or(Fraction::ZERO, |tint| tint.fraction)
    }

    /// Get the reflectance curve.
    pub fn reflectance(&self) -> &Reflectance {
        &self.reflectance
    }

    /// Get the color.
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Describe this tinted mixture, e.g., `Red, 1/4 Titanium White`.
    pub fn description(&self) -> String {
        let mut description = self.mixture.description();
        if let Some(tint) = &self.tint {
            description.push_str(&format!(", {} {}", tint.fraction, tint.white.name()));
        }
        description
    }
}

// ====================================================================================================================

/// A tinted mixture applied as a layer of paint.
///
/// A layer is either thick with a consistency of one and covers the
/// background, or thinned with a consistency of less than one and lets the
/// background show through.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    medium: MediumType,
    tinted: Arc<TintedMixture>,
    consistency: Fraction,
    background: Option<Rgb>,
    rgb: Rgb,
    oklab: [Float; 3],
}

impl Layer {
    /// Create a new thick layer.
    pub fn thick(medium: MediumType, tinted: Arc<TintedMixture>) -> Self {
        let rgb = tinted.rgb();
        Self {
            medium,
            tinted,
            consistency: Fraction::WHOLE,
            background: None,
            rgb,
            oklab: rgb.to_oklab(),
        }
    }

    /// Create a new layer thinned to the given consistency over the
    /// background.
    ///
    /// The consistency is the fraction of paint, with the background
    /// making up the rest.
    pub fn thinned(
        medium: MediumType,
        tinted: Arc<TintedMixture>,
        consistency: Fraction,
        background: &Background,
        config: &MixingConfig,
    ) -> Self {
        if consistency.is_whole() {
            return Self::thick(medium, tinted);
        }

        let rgb = config
            .mixing_law
            .mix(
                config.tinting_strength,
                &[
                    (tinted.reflectance(), consistency.value()),
                    (background.reflectance(), consistency.complement().value()),
                ],
            )
            .map_or_else(|| background.rgb(), |reflectance| reflectance.to_rgb());

        Self {
            medium,
            tinted,
            consistency,
            background: Some(background.rgb()),
            rgb,
            oklab: rgb.to_oklab(),
        }
    }

    /// Get the medium.
    pub fn medium(&self) -> MediumType {
        self.medium
    }

    /// Get the tinted mixture.
    pub fn tinted_mixture(&self) -> &Arc<TintedMixture> {
        &self.tinted
    }

    /// Get the mixture.
    pub fn mixture(&self) -> &Mixture {
        self.tinted.mixture()
    }

    /// Get the consistency.
    pub fn consistency(&self) -> Fraction {
        self.consistency
    }

    /// Determine whether this layer is thick.
    pub fn is_thick(&self) -> bool {
        self.consistency.is_whole()
    }

    /// Get the background color for thinned layers.
    pub fn background(&self) -> Option<Rgb> {
        self.background
    }

    /// Get the color of the layer as painted.
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Get the color of the layer as painted in Oklab.
    pub fn oklab(&self) -> &[Float; 3] {
        &self.oklab
    }

    /// Compute the perceptual distance to the color in Oklab.
    pub fn delta_e(&self, oklab: &[Float; 3]) -> Float {
        delta_e_ok(&self.oklab, oklab)
    }

    /// Compute the content hash of the underlying mixture.
    pub fn content_hash(&self) -> u64 {
        self.tinted.mixture().content_hash()
    }

    /// Compute the identity key.
    ///
    /// The key determines the layer as painted, covering medium, parts,
    /// tint, consistency, and background. It is suitable for persisting
    /// layers.
    pub fn identity_key(&self) -> String {
        let mut key = format!("{}:", self.medium);
        self.tinted.mixture().write_key(&mut key);
        if let Some(tint) = self.tinted.tint() {
            let (brand, id) = tint.white.key();
            key.push_str(&format!("|{}.{}@{}", brand, id, tint.fraction));
        }
        key.push_str(&format!("|{}", self.consistency));
        if let Some(background) = self.background {
            key.push_str(&format!("|{}", background));
        }
        key
    }

    /// Describe this layer, e.g., `1 Red + 2 Blue, 1/4 White, 1/2 consistency`.
    pub fn description(&self) -> String {
        let mut description = self.tinted.description();
        if !self.is_thick() {
            description.push_str(&format!(", {} consistency", self.consistency));
        }
        description
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.rgb)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::{mix_pigments, Layer, Mixture, TintedMixture};
    use crate::config::MixingConfig;
    use crate::error::{Error, MixError};
    use crate::fraction::{Fraction, CANONICAL_FRACTIONS};
    use crate::pigment::{Background, MediumType, PigmentColor, Rgb};

    fn pigment(id: u32, name: &str, rgb: Rgb) -> Arc<PigmentColor> {
        Arc::new(PigmentColor::from_rgb(1, id, name, rgb).expect("reflectance converges"))
    }

    #[test]
    fn test_validation() -> Result<(), MixError> {
        let config = MixingConfig::default();
        let red = pigment(1, "Red", Rgb::new(0xcc, 0x22, 0x22));

        assert_eq!(
            mix_pigments(&[red.clone()], &[1, 2], &config),
            Err(MixError::LengthMismatch {
                colors: 1,
                ratios: 2
            })
        );
        assert_eq!(
            mix_pigments(&[red.clone()], &[0], &config),
            Err(MixError::ZeroRatio)
        );
        assert_eq!(mix_pigments(&[], &[], &config)?, None);
        Ok(())
    }

    #[test]
    fn test_canonical_parts() -> Result<(), MixError> {
        let config = MixingConfig::default();
        let red = pigment(1, "Red", Rgb::new(0xcc, 0x22, 0x22));
        let blue = pigment(2, "Blue", Rgb::new(0x22, 0x22, 0xcc));

        let one = mix_pigments(&[blue.clone(), red.clone()], &[4, 2], &config)?
            .expect("there are colors");
        let two = mix_pigments(&[red.clone(), blue.clone()], &[1, 2], &config)?
            .expect("there are colors");

        assert_eq!(one, two);
        let parts: Vec<u32> = one.parts().iter().map(|part| part.parts()).collect();
        assert_eq!(parts, vec![1, 2]);
        assert_eq!(one.parts()[0].pigment().name(), "Red");
        assert_eq!(one.description(), "1 Red + 2 Blue");

        let other = mix_pigments(&[red.clone(), blue.clone()], &[3, 1], &config)?
            .expect("there are colors");
        assert_ne!(one.rgb(), other.rgb());
        assert_eq!(one.content_hash(), other.content_hash());
        assert_ne!(
            one.content_hash(),
            Mixture::single(&red).content_hash()
        );
        Ok(())
    }

    #[test]
    fn test_same_pigment() -> Result<(), MixError> {
        let config = MixingConfig::default();
        let green = pigment(3, "Green", Rgb::new(0x2e, 0x8b, 0x57));

        let mixture = mix_pigments(&[green.clone(), green.clone()], &[3, 7], &config)?
            .expect("there are colors");
        assert_eq!(mixture.pigment_count(), 1);
        assert_eq!(mixture.reflectance(), green.reflectance());
        assert_eq!(mixture.rgb(), green.rgb());
        Ok(())
    }

    #[test]
    fn test_tint_and_layers() -> Result<(), Error> {
        let config = MixingConfig::default();
        let red = pigment(1, "Red", Rgb::new(0xcc, 0x22, 0x22));
        let white = pigment(9, "Titanium White", Rgb::new(255, 255, 255));
        let paper = Background::new(Rgb::new(0xf7, 0xf5, 0xef))?;

        let untinted = Arc::new(TintedMixture::untinted(Mixture::single(&red)));
        let tinted = Arc::new(TintedMixture::tinted(
            Mixture::single(&red),
            &white,
            CANONICAL_FRACTIONS[2],
            &config,
        ));
        assert_eq!(untinted.rgb(), red.rgb());
        assert!(red.rgb().luminance() < tinted.rgb().luminance());
        assert_eq!(tinted.description(), "Red, 1/2 Titanium White");

        let thick = Layer::thick(MediumType::Oil, tinted.clone());
        assert!(thick.is_thick());
        assert_eq!(thick.rgb(), tinted.rgb());
        assert_eq!(thick.identity_key(), "oil:1.1x1|1.9@1/2|1/1");

        let glaze = Layer::thinned(
            MediumType::Oil,
            untinted.clone(),
            CANONICAL_FRACTIONS[0],
            &paper,
            &config,
        );
        assert!(!glaze.is_thick());
        assert_eq!(glaze.background(), Some(paper.rgb()));
        assert!(red.rgb().luminance() < glaze.rgb().luminance());
        assert_eq!(glaze.identity_key(), "oil:1.1x1|1/10|#f7f5ef");
        assert_eq!(glaze.description(), "Red, 1/10 consistency");
        assert_eq!(glaze.content_hash(), thick.content_hash());

        let whole = Layer::thinned(MediumType::Oil, untinted, Fraction::WHOLE, &paper, &config);
        assert!(whole.is_thick());
        assert_eq!(whole.background(), None);
        Ok(())
    }
}
