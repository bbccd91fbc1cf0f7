//! Utility module with paintmix's errors.

#[cfg(feature = "pyffi")]
use pyo3::{exceptions::PyValueError, prelude::*};

use crate::pigment::Rgb;

/// An erroneous color format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorFormatError {
    /// A color format that does not start with `#`.
    UnknownFormat,

    /// A color format with unexpected characters or an unexpected number of
    /// characters. For example, `#00` is missing a hexadecimal digit, whereas
    /// `#💩00` has the correct length but contains an unsuitable character.
    UnexpectedCharacters,

    /// A color format that has a malformed hexadecimal number as coordinate.
    /// For example, `#efg` has a malformed third coordinate.
    MalformedHex,
}

impl std::fmt::Display for ColorFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ColorFormatError::*;

        match self {
            UnknownFormat => f.write_str("color format should start with `#`"),
            UnexpectedCharacters => f.write_str(
                "color format should have 3 or 6 hexadecimal digits after the `#` but does not",
            ),
            MalformedHex => {
                f.write_str("color format coordinates should be hexadecimal integers but are not")
            }
        }
    }
}

impl std::error::Error for ColorFormatError {}

#[cfg(feature = "pyffi")]
impl From<ColorFormatError> for PyErr {
    fn from(value: ColorFormatError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An error while deriving or validating a reflectance curve.
#[derive(Clone, Debug, PartialEq)]
pub enum ReflectanceError {
    /// Newton's method did not reach the residual tolerance within the
    /// iteration limit.
    NoConvergence { rgb: Rgb, iterations: usize },

    /// Newton's method ran into a singular Jacobian.
    SingularJacobian { rgb: Rgb },

    /// A catalog curve does not have [`SAMPLE_COUNT`](crate::spectrum::SAMPLE_COUNT)
    /// samples.
    WrongSampleCount { actual: usize },
}

impl std::fmt::Display for ReflectanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoConvergence { rgb, iterations } => write!(
                f,
                "reflectance curve for {} did not converge after {} iterations",
                rgb, iterations
            ),
            Self::SingularJacobian { rgb } => {
                write!(f, "reflectance curve for {} has singular Jacobian", rgb)
            }
            Self::WrongSampleCount { actual } => write!(
                f,
                "reflectance curve should have {} samples but has {}",
                crate::spectrum::SAMPLE_COUNT,
                actual
            ),
        }
    }
}

impl std::error::Error for ReflectanceError {}

#[cfg(feature = "pyffi")]
impl From<ReflectanceError> for PyErr {
    fn from(value: ReflectanceError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An error while mixing pigments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MixError {
    /// The number of colors and ratios differ.
    LengthMismatch { colors: usize, ratios: usize },

    /// A ratio part is zero, whereas ratio parts must be positive.
    ZeroRatio,
}

impl std::fmt::Display for MixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch { colors, ratios } => write!(
                f,
                "mixture should have as many ratios as colors but has {} colors and {} ratios",
                colors, ratios
            ),
            Self::ZeroRatio => f.write_str("mixture ratios should be positive but one is zero"),
        }
    }
}

impl std::error::Error for MixError {}

#[cfg(feature = "pyffi")]
impl From<MixError> for PyErr {
    fn from(value: MixError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// Any of paintmix's errors.
///
/// Operations that combine parsing with deriving reflectance curves, e.g.,
/// [`Background::from_hex`](crate::pigment::Background::from_hex), report
/// this error.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    Format(ColorFormatError),
    Reflectance(ReflectanceError),
    Mix(MixError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(error) => error.fmt(f),
            Self::Reflectance(error) => error.fmt(f),
            Self::Mix(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(error) => Some(error),
            Self::Reflectance(error) => Some(error),
            Self::Mix(error) => Some(error),
        }
    }
}

impl From<ColorFormatError> for Error {
    fn from(value: ColorFormatError) -> Self {
        Self::Format(value)
    }
}

impl From<ReflectanceError> for Error {
    fn from(value: ReflectanceError) -> Self {
        Self::Reflectance(value)
    }
}

impl From<MixError> for Error {
    fn from(value: MixError) -> Self {
        Self::Mix(value)
    }
}

#[cfg(feature = "pyffi")]
impl From<Error> for PyErr {
    fn from(value: Error) -> Self {
        PyValueError::new_err(value.to_string())
    }
}
