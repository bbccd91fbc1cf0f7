//! # Paintmix: Mixing Real Paint
//!
//! Paintmix helps painters reproduce a color from a reference photo with the
//! paints they actually own. Given a palette of pigments, it enumerates the
//! mixtures the painter can make and ranks them by how close they look to a
//! target color.
//!
//! Paint mixes differently from light. Yellow and blue light make gray,
//! whereas yellow and blue paint make green. So instead of averaging RGB
//! values, paintmix works with spectral reflectance curves:
//!
//!   * The [`spectrum`] module converts between 24-bit colors and
//!     [`Reflectance`] curves and mixes curves with the Kubelka-Munk model.
//!   * The [`mixture`] and [`algebra`] modules derive [`Mixture`]s of up to
//!     three pigments in integer ratios, tint them with white, and apply them
//!     as thick or thinned [`Layer`]s over a [`Background`].
//!   * The [`engine`] module caches the candidate layers for a [`Palette`]
//!     and finds the candidates closest to a target color in Oklab.
//!
//!
//! ## 1. Example
//!
//! ```
//! # use paintmix::{Background, Error, MatchingEngine, MediumType, Palette, PigmentColor, Rgb};
//! # fn main() -> Result<(), Error> {
//! let palette = Palette::new(
//!     MediumType::Acrylic,
//!     vec![
//!         PigmentColor::from_rgb(1, 1, "Red", "#cc2222".parse()?)?,
//!         PigmentColor::from_rgb(1, 2, "Blue", "#2222cc".parse()?)?,
//!         PigmentColor::from_rgb(1, 3, "White", "#ffffff".parse()?)?,
//!     ],
//! );
//!
//! let mut engine = MatchingEngine::default();
//! engine.set_palette(&palette);
//! engine.set_background(Background::from_hex("#f7f5ef")?);
//!
//! let matches = engine.find_similar_colors("#9955bb".parse()?, 0.2, 0.0, 5);
//! assert!(!matches.is_empty());
//! for similar in &matches {
//!     println!("{}", similar);
//! }
//! # Ok(())
//! # }
//! ```
//!
//!
//! ## 2. Configuration
//!
//! [`MixingConfig`] collects the tunable parameters, including the mixing law
//! and the chroma thresholds for skipping mixtures of grays.
//! [`MixingConfig::from_environment`] applies overrides from `PAINTMIX_*`
//! environment variables.
//!
//! Paintmix logs through the [log](https://crates.io/crates/log) facade. It
//! never installs a logger.
//!
//!
//! ## 3. Optional Features
//!
//!   - **`pyffi`** controls paintmix's Python integration through
//!     [PyO3](https://pyo3.rs/). This feature is disabled by default.

/// The floating point type in use.
pub type Float = f64;

pub mod algebra;
mod cie;
pub mod config;
mod core;
pub mod engine;
pub mod error;
pub mod fraction;
pub mod mixture;
pub mod pigment;
pub mod spectrum;
mod util;

pub use config::MixingConfig;
pub use engine::{MatchingEngine, SimilarColor};
pub use error::{ColorFormatError, Error, MixError, ReflectanceError};
pub use fraction::Fraction;
pub use mixture::{mix_pigments, Layer, Mixture, MixturePart, TintedMixture};
pub use pigment::{Background, MediumType, MixingPolicy, Opacity, Palette, PigmentColor, Rgb};
pub use spectrum::{from_rgb, to_rgb, MixingLaw, Reflectance, TintingStrength};

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

#[doc(hidden)]
#[cfg(feature = "pyffi")]
#[pymodule]
pub fn paintmix(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Background>()?;
    m.add_class::<Fraction>()?;
    m.add_class::<MatchingEngine>()?;
    m.add_class::<MediumType>()?;
    m.add_class::<MixingLaw>()?;
    m.add_class::<MixingPolicy>()?;
    m.add_class::<Opacity>()?;
    m.add_class::<Palette>()?;
    m.add_class::<PigmentColor>()?;
    m.add_class::<Rgb>()?;
    m.add_class::<SimilarColor>()?;
    m.add_class::<TintingStrength>()?;
    Ok(())
}
