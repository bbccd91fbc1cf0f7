//! Colors, pigments, and palettes.
//!
//! [`Rgb`] is the 24-bit color exchanged with callers, e.g., a pixel average
//! sampled from a reference photo. [`PigmentColor`] is an actual paint from a
//! catalog, with its measured or derived [`Reflectance`]. A [`Palette`]
//! groups pigments for one [`MediumType`], whose [`MixingPolicy`] determines
//! which mixtures the medium can produce. Finally, a [`Background`] is the
//! paper or ground a glaze is applied to.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::{
    from_24bit, linear_rgb_to_luminance, oklab_to_oklch, parse_hashed, rgb_to_linear_rgb,
    srgb_to_oklab,
};
use crate::error::{ColorFormatError, ReflectanceError};
use crate::spectrum::Reflectance;
use crate::Float;

/// A 24-bit color.
///
/// Each coordinate is a gamma-encoded sRGB byte. This struct parses from and
/// displays as hashed hexadecimal notation, i.e., `#rrggbb`, and also parses
/// the short form `#rgb`.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, frozen, hash, module = "paintmix.pigment")
)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb([u8; 3]);

#[cfg(feature = "pyffi")]
#[pymethods]
impl Rgb {
    /// Create a new 24-bit color from its coordinates.
    #[new]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse the hashed hexadecimal notation. <i class=python-only>Python
    /// only!</i>
    #[staticmethod]
    pub fn parse(s: &str) -> Result<Self, ColorFormatError> {
        s.parse()
    }

    /// Access this color's coordinates. <i class=python-only>Python
    /// only!</i>
    pub fn coordinates(&self) -> [u8; 3] {
        self.0
    }

    /// Convert this color to Oklab.
    pub fn to_oklab(&self) -> [Float; 3] {
        self.do_to_oklab()
    }

    /// Determine this color's chroma in Oklch.
    pub fn chroma(&self) -> Float {
        self.do_chroma()
    }

    /// Determine this color's relative luminance.
    pub fn luminance(&self) -> Float {
        self.do_luminance()
    }

    /// Convert this color to its debug representation. <i
    /// class=python-only>Python only!</i>
    pub fn __repr__(&self) -> String {
        format!("Rgb({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }

    /// Convert this color to hashed hexadecimal notation. <i
    /// class=python-only>Python only!</i>
    pub fn __str__(&self) -> String {
        format!("{}", self)
    }
}

#[cfg(not(feature = "pyffi"))]
impl Rgb {
    /// Create a new 24-bit color from its coordinates.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Convert this color to Oklab.
    pub fn to_oklab(&self) -> [Float; 3] {
        self.do_to_oklab()
    }

    /// Determine this color's chroma in Oklch.
    ///
    /// Chroma measures colorfulness. Grays have zero chroma, whereas
    /// saturated sRGB primaries have a chroma between 0.15 and 0.33.
    pub fn chroma(&self) -> Float {
        self.do_chroma()
    }

    /// Determine this color's relative luminance.
    pub fn luminance(&self) -> Float {
        self.do_luminance()
    }
}

impl Rgb {
    fn do_to_oklab(&self) -> [Float; 3] {
        let [r, g, b] = self.0;
        srgb_to_oklab(&from_24bit(r, g, b))
    }

    fn do_chroma(&self) -> Float {
        oklab_to_oklch(&self.do_to_oklab())[1]
    }

    fn do_luminance(&self) -> Float {
        let [r, g, b] = self.0;
        linear_rgb_to_luminance(&rgb_to_linear_rgb(&from_24bit(r, g, b)))
    }
}

impl AsRef<[u8; 3]> for Rgb {
    fn as_ref(&self) -> &[u8; 3] {
        &self.0
    }
}

impl std::ops::Index<usize> for Rgb {
    type Output = u8;

    /// Access the coordinate with the given index.
    ///
    /// # Panics
    ///
    /// This method panics if `2 < index`.
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(value: [u8; 3]) -> Self {
        Rgb::new(value[0], value[1], value[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(value: Rgb) -> Self {
        value.0
    }
}

impl std::str::FromStr for Rgb {
    type Err = ColorFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hashed(s).map(Rgb::from)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.0;
        f.write_fmt(format_args!("#{:02x}{:02x}{:02x}", r, g, b))
    }
}

// ====================================================================================================================

/// A pigment's opacity class, as printed on the tube.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "paintmix.pigment")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Opacity {
    Transparent,
    SemiTransparent,
    SemiOpaque,
    Opaque,
    #[default]
    Unknown,
}

/// A paint from a catalog.
///
/// A pigment is identified by its brand and pigment ids. It is immutable.
#[cfg_attr(feature = "pyffi", pyclass(frozen, module = "paintmix.pigment"))]
#[derive(Clone, Debug, PartialEq)]
pub struct PigmentColor {
    brand: u32,
    id: u32,
    name: String,
    rgb: Rgb,
    reflectance: Reflectance,
    opacity: Opacity,
}

impl PigmentColor {
    /// Create a new pigment from a catalog entry.
    ///
    /// This method fails if the reflectance samples have the wrong length.
    pub fn new(
        brand: u32,
        id: u32,
        name: &str,
        rgb: Rgb,
        reflectance: &[Float],
    ) -> Result<Self, ReflectanceError> {
        Ok(Self {
            brand,
            id,
            name: name.to_string(),
            rgb,
            reflectance: Reflectance::try_from(reflectance)?,
            opacity: Opacity::default(),
        })
    }

    /// Create a new pigment for a catalog entry without reflectance samples.
    ///
    /// This method derives the reflectance curve from the color.
    pub fn from_rgb(brand: u32, id: u32, name: &str, rgb: Rgb) -> Result<Self, ReflectanceError> {
        Ok(Self {
            brand,
            id,
            name: name.to_string(),
            rgb,
            reflectance: Reflectance::from_rgb(rgb)?,
            opacity: Opacity::default(),
        })
    }

    /// Update this pigment's opacity.
    pub fn with_opacity(mut self, opacity: Opacity) -> Self {
        self.opacity = opacity;
        self
    }

    /// Get the brand id.
    pub fn brand(&self) -> u32 {
        self.brand
    }

    /// Get the pigment id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Get the key identifying this pigment across brands.
    pub fn key(&self) -> (u32, u32) {
        (self.brand, self.id)
    }

    /// Get the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the catalog color.
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Get the reflectance curve.
    pub fn reflectance(&self) -> &Reflectance {
        &self.reflectance
    }

    /// Get the opacity class.
    pub fn opacity(&self) -> Opacity {
        self.opacity
    }

    /// Determine the chroma of the catalog color.
    pub fn chroma(&self) -> Float {
        self.rgb.chroma()
    }

    /// Determine whether this pigment is a white.
    ///
    /// A pigment is white if its name contains the word "white", ignoring
    /// case. "Titanium White" and "Mixing-White" are whites, whereas
    /// "Whitewash Blue" is not.
    pub fn is_white(&self) -> bool {
        self.name
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word.eq_ignore_ascii_case("white"))
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl PigmentColor {
    /// Create a new pigment. <i class=python-only>Python only!</i>
    ///
    /// Without reflectance samples, this constructor derives the reflectance
    /// curve from the color.
    #[new]
    #[pyo3(signature = (brand, id, name, rgb, reflectance=None))]
    pub fn py_new(
        brand: u32,
        id: u32,
        name: &str,
        rgb: Rgb,
        reflectance: Option<Vec<Float>>,
    ) -> Result<Self, ReflectanceError> {
        match reflectance {
            Some(samples) => Self::new(brand, id, name, rgb, &samples),
            None => Self::from_rgb(brand, id, name, rgb),
        }
    }

    /// Get the display name. <i class=python-only>Python only!</i>
    #[getter(name)]
    pub fn py_name(&self) -> String {
        self.name.clone()
    }

    /// Get the catalog color. <i class=python-only>Python only!</i>
    #[getter(rgb)]
    pub fn py_rgb(&self) -> Rgb {
        self.rgb
    }
}

impl std::fmt::Display for PigmentColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

// ====================================================================================================================

/// The capabilities of a medium for mixing.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, frozen, hash, get_all, module = "paintmix.pigment")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MixingPolicy {
    /// The maximum number of chromatic pigments per mixture, between 1 and 3.
    pub max_pigments: u8,
    /// Whether mixtures may be tinted with white.
    pub tint: bool,
    /// Whether mixtures may be thinned and glazed over the background.
    pub glazing: bool,
}

/// An artistic medium.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "paintmix.pigment")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediumType {
    Watercolor,
    Gouache,
    Acrylic,
    Oil,
    ColoredPencil,
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl MediumType {
    /// Get the medium's default mixing policy.
    ///
    /// Watercolor is lightened by water, not white, and colored pencil
    /// layers one pigment at a time over the paper. Gouache is used opaque.
    pub fn policy(&self) -> MixingPolicy {
        use MediumType::*;

        let (max_pigments, tint, glazing) = match self {
            Watercolor => (3, false, true),
            Gouache => (3, true, false),
            Acrylic | Oil => (3, true, true),
            ColoredPencil => (1, false, true),
        };

        MixingPolicy {
            max_pigments,
            tint,
            glazing,
        }
    }

    /// Get the medium's name in lower case.
    pub fn name(&self) -> &'static str {
        use MediumType::*;

        match self {
            Watercolor => "watercolor",
            Gouache => "gouache",
            Acrylic => "acrylic",
            Oil => "oil",
            ColoredPencil => "colored-pencil",
        }
    }
}

impl std::fmt::Display for MediumType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A medium and its pigments.
#[cfg_attr(feature = "pyffi", pyclass(frozen, module = "paintmix.pigment"))]
#[derive(Clone, Debug)]
pub struct Palette {
    medium: MediumType,
    policy: MixingPolicy,
    colors: Vec<Arc<PigmentColor>>,
}

impl Palette {
    /// Create a new palette with the medium's default policy.
    ///
    /// The order of colors is preserved. Repeated pigments, i.e., pigments
    /// with the same brand and pigment ids, are dropped.
    pub fn new(medium: MediumType, colors: Vec<PigmentColor>) -> Self {
        let mut unique: Vec<Arc<PigmentColor>> = Vec::with_capacity(colors.len());
        for color in colors {
            if !unique.iter().any(|c| c.key() == color.key()) {
                unique.push(Arc::new(color));
            }
        }

        Self {
            medium,
            policy: medium.policy(),
            colors: unique,
        }
    }

    /// Override the mixing policy.
    ///
    /// The maximum number of pigments is clamped to 1..=3.
    pub fn with_policy(mut self, policy: MixingPolicy) -> Self {
        self.policy = MixingPolicy {
            max_pigments: policy.max_pigments.clamp(1, 3),
            ..policy
        };
        self
    }

    /// Get the medium.
    pub fn medium(&self) -> MediumType {
        self.medium
    }

    /// Get the mixing policy.
    pub fn policy(&self) -> MixingPolicy {
        self.policy
    }

    /// Get the pigments.
    pub fn colors(&self) -> &[Arc<PigmentColor>] {
        &self.colors
    }

    /// Get the number of pigments.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Determine whether this palette has no pigments.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Compute a fingerprint for this palette.
    ///
    /// Two palettes with the same fingerprint produce the same candidates.
    /// The fingerprint covers the medium, the policy, and each pigment's
    /// ids, name, color, and reflectance, in order.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.medium.hash(&mut hasher);
        self.policy.hash(&mut hasher);
        self.colors.len().hash(&mut hasher);
        for color in &self.colors {
            color.key().hash(&mut hasher);
            color.name.hash(&mut hasher);
            color.rgb.hash(&mut hasher);
            for sample in color.reflectance.samples() {
                sample.to_bits().hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl Palette {
    /// Create a new palette with the medium's default policy. <i
    /// class=python-only>Python only!</i>
    #[new]
    pub fn py_new(medium: MediumType, colors: Vec<PigmentColor>) -> Self {
        Self::new(medium, colors)
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// The paper or ground that glazes are applied to.
#[cfg_attr(feature = "pyffi", pyclass(frozen, module = "paintmix.pigment"))]
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    rgb: Rgb,
    reflectance: Reflectance,
}

impl Background {
    /// Create a new background for the color.
    pub fn new(rgb: Rgb) -> Result<Self, ReflectanceError> {
        Ok(Self {
            rgb,
            reflectance: Reflectance::from_rgb(rgb)?,
        })
    }

    /// Create a new background from a hashed hexadecimal color.
    pub fn from_hex(s: &str) -> Result<Self, crate::Error> {
        let rgb: Rgb = s.parse()?;
        Ok(Self::new(rgb)?)
    }

    /// Get the color.
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Get the reflectance curve.
    pub fn reflectance(&self) -> &Reflectance {
        &self.reflectance
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl Background {
    /// Create a new background for the color. <i class=python-only>Python
    /// only!</i>
    #[new]
    pub fn py_new(rgb: Rgb) -> Result<Self, ReflectanceError> {
        Self::new(rgb)
    }
}

#[cfg(test)]
mod test {
    use super::{Background, MediumType, MixingPolicy, Opacity, Palette, PigmentColor, Rgb};
    use crate::error::{ColorFormatError, ReflectanceError};

    #[test]
    fn test_rgb() -> Result<(), ColorFormatError> {
        let rgb: Rgb = "#9955bb".parse()?;
        assert_eq!(rgb, Rgb::new(0x99, 0x55, 0xbb));
        assert_eq!(format!("{}", rgb), "#9955bb");
        assert_eq!("#fff".parse::<Rgb>()?, Rgb::new(255, 255, 255));
        assert_eq!(
            "9955bb".parse::<Rgb>(),
            Err(ColorFormatError::UnknownFormat)
        );

        assert!(Rgb::new(128, 128, 128).chroma() < 1e-6);
        assert!(0.15 < Rgb::new(0xcc, 0x22, 0x22).chroma());
        assert!((Rgb::new(255, 255, 255).luminance() - 1.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_is_white() -> Result<(), ReflectanceError> {
        let white = Rgb::new(255, 255, 255);
        for (name, expected) in [
            ("Titanium White", true),
            ("mixing-white", true),
            ("WHITE", true),
            ("Whitewash Blue", false),
            ("Ivory Black", false),
        ] {
            let pigment = PigmentColor::from_rgb(1, 1, name, white)?;
            assert_eq!(pigment.is_white(), expected, "{}", name);
        }
        Ok(())
    }

    #[test]
    fn test_pigment() -> Result<(), ReflectanceError> {
        let pigment = PigmentColor::new(3, 7, "Sap Green", Rgb::new(0x2e, 0x8b, 0x57), &[0.3; 36])?
            .with_opacity(Opacity::Transparent);
        assert_eq!(pigment.key(), (3, 7));
        assert_eq!(pigment.opacity(), Opacity::Transparent);
        assert_eq!(format!("{}", pigment), "Sap Green");
        assert_eq!(pigment.reflectance()[10], 0.3);

        assert_eq!(
            PigmentColor::new(3, 7, "Sap Green", Rgb::new(0, 0, 0), &[0.3; 35]),
            Err(ReflectanceError::WrongSampleCount { actual: 35 })
        );
        Ok(())
    }

    #[test]
    fn test_palette() -> Result<(), ReflectanceError> {
        let red = PigmentColor::from_rgb(1, 1, "Red", Rgb::new(0xcc, 0x22, 0x22))?;
        let blue = PigmentColor::from_rgb(1, 2, "Blue", Rgb::new(0x22, 0x22, 0xcc))?;

        let palette = Palette::new(
            MediumType::Oil,
            vec![red.clone(), blue.clone(), red.clone()],
        );
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.policy(), MediumType::Oil.policy());

        let same = Palette::new(MediumType::Oil, vec![red.clone(), blue.clone()]);
        assert_eq!(palette.fingerprint(), same.fingerprint());

        let reversed = Palette::new(MediumType::Oil, vec![blue.clone(), red.clone()]);
        assert_ne!(palette.fingerprint(), reversed.fingerprint());

        let restricted = same.with_policy(MixingPolicy {
            max_pigments: 7,
            tint: false,
            glazing: false,
        });
        assert_eq!(restricted.policy().max_pigments, 3);
        assert_ne!(palette.fingerprint(), restricted.fingerprint());
        Ok(())
    }

    #[test]
    fn test_background() -> Result<(), crate::Error> {
        let paper = Background::from_hex("#F7F5EF")?;
        assert_eq!(paper.rgb(), Rgb::new(0xf7, 0xf5, 0xef));
        let rgb = paper.reflectance().to_rgb();
        for channel in 0..3 {
            assert!((rgb[channel] as i32 - paper.rgb()[channel] as i32).abs() <= 1);
        }
        Ok(())
    }
}
