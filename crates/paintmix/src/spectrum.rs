//! Spectral reflectance curves and their subtractive mixing.
//!
//! A [`Reflectance`] discretizes how much light a surface reflects at each
//! wavelength, with [`SAMPLE_COUNT`] samples from 380nm to 730nm in 10nm
//! steps. This module implements three operations on such curves:
//!
//!   * [`to_rgb`] projects a curve onto linear sRGB, using the CIE 1931 2º
//!     standard observer under illuminant D65, and then gamma-encodes and
//!     rounds the result.
//!   * [`from_rgb`] solves the inverse problem. Since three coordinates cannot
//!     determine 36 samples, it picks the smoothest curve that reproduces the
//!     color exactly. To keep samples inside (0, 1), it reparametrizes each
//!     sample as `(tanh(z) + 1) / 2` and solves for `z` as well as three
//!     Lagrange multipliers with Newton's method.
//!   * [`MixingLaw::mix`] combines curves the way paint combines, i.e.,
//!     subtractively. The default [`MixingLaw::KubelkaMunk`] averages
//!     absorption/scattering ratios weighted by a [`TintingStrength`], whereas
//!     [`MixingLaw::GeometricMean`] computes the weighted geometric mean of
//!     reflectances.

use std::sync::OnceLock;

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::cie;
use crate::core::{
    from_24bit, linear_rgb_to_luminance, linear_rgb_to_rgb, multiply, rgb_to_linear_rgb, to_24bit,
    Matrix, XYZ_TO_LINEAR_SRGB,
};
use crate::error::ReflectanceError;
use crate::pigment::Rgb;
use crate::Float;

/// The number of samples in a reflectance curve.
pub const SAMPLE_COUNT: usize = cie::COUNT;

/// The smallest sample value of a reflectance curve.
pub const MIN_REFLECTANCE: Float = 1e-4;

/// The largest sample value of a reflectance curve.
pub const MAX_REFLECTANCE: Float = 1.0 - 1e-4;

/// The maximum number of Newton iterations for [`from_rgb`].
pub const MAX_ITERATIONS: usize = 100;

/// The residual tolerance for [`from_rgb`].
pub const TOLERANCE: Float = 1e-8;

// --------------------------------------------------------------------------------------------------------------------

/// A spectral reflectance curve.
///
/// All samples are strictly inside (0, 1). Constructors clamp them to
/// `MIN_REFLECTANCE..=MAX_REFLECTANCE`.
#[derive(Clone, Debug, PartialEq)]
pub struct Reflectance([Float; SAMPLE_COUNT]);

impl Reflectance {
    /// Create a new reflectance curve from the given samples.
    pub fn new(samples: [Float; SAMPLE_COUNT]) -> Self {
        let mut samples = samples;
        for sample in samples.iter_mut() {
            *sample = if sample.is_nan() {
                MIN_REFLECTANCE
            } else {
                sample.clamp(MIN_REFLECTANCE, MAX_REFLECTANCE)
            };
        }
        Self(samples)
    }

    /// Create a new reflectance curve with the same value for all samples.
    pub fn constant(value: Float) -> Self {
        Self::new([value; SAMPLE_COUNT])
    }

    /// Derive a reflectance curve for the given color. See [`from_rgb`].
    pub fn from_rgb(rgb: Rgb) -> Result<Self, ReflectanceError> {
        from_rgb(rgb)
    }

    /// Access the samples.
    #[inline]
    pub fn samples(&self) -> &[Float; SAMPLE_COUNT] {
        &self.0
    }

    /// Get the wavelength in nanometers for the sample with the given index.
    #[inline]
    pub const fn wavelength(index: usize) -> usize {
        cie::wavelength(index)
    }

    /// Project this curve onto linear sRGB.
    pub fn to_linear_rgb(&self) -> [Float; 3] {
        let projection = &projection().rows;
        let mut result = [0.0; 3];
        for (channel, row) in projection.iter().enumerate() {
            result[channel] = row
                .iter()
                .zip(self.0.iter())
                .fold(0.0, |sum, (weight, sample)| weight.mul_add(*sample, sum));
        }
        result
    }

    /// Convert this curve to a 24-bit color. See [`to_rgb`].
    pub fn to_rgb(&self) -> Rgb {
        to_rgb(self)
    }

    /// Determine this curve's relative luminance under D65.
    pub fn luminance(&self) -> Float {
        linear_rgb_to_luminance(&self.to_linear_rgb())
    }
}

impl TryFrom<&[Float]> for Reflectance {
    type Error = ReflectanceError;

    /// Create a new reflectance curve from a catalog's samples.
    ///
    /// This method fails if the slice does not have exactly [`SAMPLE_COUNT`]
    /// samples and clamps the samples otherwise.
    fn try_from(value: &[Float]) -> Result<Self, Self::Error> {
        let samples = <[Float; SAMPLE_COUNT]>::try_from(value)
            .map_err(|_| ReflectanceError::WrongSampleCount {
                actual: value.len(),
            })?;
        Ok(Self::new(samples))
    }
}

impl AsRef<[Float; SAMPLE_COUNT]> for Reflectance {
    fn as_ref(&self) -> &[Float; SAMPLE_COUNT] {
        &self.0
    }
}

impl std::ops::Index<usize> for Reflectance {
    type Output = Float;

    /// Access the sample with the given index.
    ///
    /// # Panics
    ///
    /// This method panics if `SAMPLE_COUNT <= index`.
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// The precomputed linear algebra for converting between curves and colors.
struct Projection {
    /// The 3×N matrix from reflectance to linear sRGB, as arrays.
    rows: [[Float; SAMPLE_COUNT]; 3],
    /// The same matrix, as a matrix.
    matrix: Matrix,
    /// Its transpose.
    transpose: Matrix,
    /// The second-difference operator penalizing curvature in `z`.
    smoothness: Matrix,
}

/// Get the projection, computing it on first use.
fn projection() -> &'static Projection {
    static PROJECTION: OnceLock<Projection> = OnceLock::new();
    PROJECTION.get_or_init(Projection::new)
}

impl Projection {
    fn new() -> Self {
        // Map the illuminated observer's weighting factors to linear sRGB.
        let mut rows = [[0.0; SAMPLE_COUNT]; 3];
        for (index, xyz) in cie::illuminated_observer().iter().enumerate() {
            let [r, g, b] = multiply(&XYZ_TO_LINEAR_SRGB, xyz);
            rows[0][index] = r;
            rows[1][index] = g;
            rows[2][index] = b;
        }

        // Scale each row so that the perfect reflector projects onto white.
        for row in rows.iter_mut() {
            let sum: Float = row.iter().sum();
            for weight in row.iter_mut() {
                *weight /= sum;
            }
        }

        let matrix = Matrix::from_rows(&rows);
        let transpose = matrix.transpose();

        let n = SAMPLE_COUNT;
        let mut smoothness = Matrix::zeros(n, n);
        for index in 0..n {
            smoothness[(index, index)] = if index == 0 || index == n - 1 {
                2.0
            } else {
                4.0
            };
            if 0 < index {
                smoothness[(index, index - 1)] = -2.0;
            }
            if index < n - 1 {
                smoothness[(index, index + 1)] = -2.0;
            }
        }

        Self {
            rows,
            matrix,
            transpose,
            smoothness,
        }
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert the reflectance curve to a 24-bit color.
///
/// This function projects the curve onto linear sRGB, applies sRGB's gamma,
/// and rounds to the nearest byte. It is total.
pub fn to_rgb(reflectance: &Reflectance) -> Rgb {
    let linear = reflectance.to_linear_rgb();
    Rgb::from(to_24bit(&linear_rgb_to_rgb(&linear)))
}

/// Derive a plausible reflectance curve for the 24-bit color.
///
/// This function returns the smoothest curve, measured by the second
/// differences of the `tanh` parameters, that projects back onto the given
/// color. Black and white are special-cased to constant curves. All other
/// colors are solved for with Newton's method, which fails after
/// [`MAX_ITERATIONS`] iterations without every residual below [`TOLERANCE`].
pub fn from_rgb(rgb: Rgb) -> Result<Reflectance, ReflectanceError> {
    solve(rgb, MAX_ITERATIONS)
}

fn solve(rgb: Rgb, max_iterations: usize) -> Result<Reflectance, ReflectanceError> {
    match *rgb.as_ref() {
        [0, 0, 0] => return Ok(Reflectance::constant(MIN_REFLECTANCE)),
        [255, 255, 255] => return Ok(Reflectance::constant(MAX_REFLECTANCE)),
        _ => (),
    }

    let [r, g, b] = *rgb.as_ref();
    let target = rgb_to_linear_rgb(&from_24bit(r, g, b));
    let Projection {
        matrix,
        transpose,
        smoothness,
        ..
    } = projection();

    let n = SAMPLE_COUNT;
    let mut z: Vec<Float> = vec![0.0; n];
    let mut lambda: Vec<Float> = vec![0.0; 3];

    for iteration in 0..=max_iterations {
        let tanh: Vec<Float> = z.iter().map(|value| value.tanh()).collect();
        let sech2: Vec<Float> = tanh.iter().map(|t| t.mul_add(-t, 1.0)).collect();
        let rho: Vec<Float> = tanh.iter().map(|t| (t + 1.0) / 2.0).collect();
        let d1: Vec<Float> = sech2.iter().map(|s| s / 2.0).collect();
        let d2: Vec<Float> = sech2.iter().zip(&tanh).map(|(s, t)| -s * t).collect();
        let weighted_lambda = transpose.apply(&lambda);

        // Stack the stationarity and constraint residuals.
        let mut residual = smoothness.apply(&z);
        for index in 0..n {
            residual[index] += d1[index] * weighted_lambda[index];
        }
        for (value, goal) in matrix.apply(&rho).iter().zip(target) {
            residual.push(value - goal);
        }

        if residual.iter().all(|value| value.abs() < TOLERANCE) {
            log::trace!("reflectance for {} converged after {} iterations", rgb, iteration);
            let mut samples = [0.0; SAMPLE_COUNT];
            samples.copy_from_slice(&rho);
            return Ok(Reflectance::new(samples));
        } else if iteration == max_iterations {
            break;
        }

        let curvature: Vec<Float> = d2
            .iter()
            .zip(&weighted_lambda)
            .map(|(d, w)| d * w)
            .collect();
        let mut top_left = smoothness.clone();
        for (index, value) in curvature.iter().enumerate() {
            top_left[(index, index)] += value;
        }
        let d1 = Matrix::diagonal(&d1);
        let jacobian = Matrix::from_blocks(
            &top_left,
            &d1.multiply(transpose),
            &matrix.multiply(&d1),
            &Matrix::zeros(3, 3),
        );

        let negated: Vec<Float> = residual.iter().map(|value| -value).collect();
        let delta = jacobian
            .solve(&negated)
            .ok_or(ReflectanceError::SingularJacobian { rgb })?;

        for (value, step) in z.iter_mut().zip(&delta[..n]) {
            *value += step;
        }
        for (value, step) in lambda.iter_mut().zip(&delta[n..]) {
            *value += step;
        }
    }

    Err(ReflectanceError::NoConvergence {
        rgb,
        iterations: max_iterations,
    })
}

// --------------------------------------------------------------------------------------------------------------------

/// The proxy for a pigment's tinting strength.
///
/// Real pigments differ in how strongly they color a mixture. Lacking
/// measurements, the weight of each pigment in a Kubelka-Munk mixture is
/// derived from its amount and its luminance.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "paintmix.spectrum")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TintingStrength {
    /// Weigh each pigment by its squared amount times its luminance.
    #[default]
    SquaredRatioLuminance,
    /// Weigh each pigment by its amount only.
    Ratio,
}

impl TintingStrength {
    /// Compute the weight for a pigment with the given amount and luminance.
    pub fn weight(&self, amount: Float, luminance: Float) -> Float {
        match self {
            Self::SquaredRatioLuminance => amount * amount * luminance,
            Self::Ratio => amount,
        }
    }
}

/// The law for subtractively mixing reflectance curves.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "paintmix.spectrum")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MixingLaw {
    /// Average the Kubelka-Munk absorption/scattering ratios, weighted by
    /// tinting strength.
    #[default]
    KubelkaMunk,
    /// Compute the geometric mean of reflectances, weighted by amount.
    GeometricMean,
}

/// Convert reflectance to the Kubelka-Munk absorption/scattering ratio.
#[inline]
fn to_ks(reflectance: Float) -> Float {
    let complement = 1.0 - reflectance;
    complement * complement / (2.0 * reflectance)
}

/// Convert the Kubelka-Munk absorption/scattering ratio to reflectance.
#[inline]
fn from_ks(ks: Float) -> Float {
    1.0 + ks - ks.mul_add(ks, 2.0 * ks).sqrt()
}

impl MixingLaw {
    /// Mix the reflectance curves in the given amounts.
    ///
    /// Amounts are relative and need not sum to one. This method returns
    /// `None` if there are no ingredients or if no ingredient has a positive
    /// amount.
    pub fn mix(
        &self,
        strength: TintingStrength,
        ingredients: &[(&Reflectance, Float)],
    ) -> Option<Reflectance> {
        let amounts: Vec<Float> = ingredients
            .iter()
            .map(|(_, amount)| amount.max(0.0))
            .collect();
        let total_amount: Float = amounts.iter().sum();
        if ingredients.is_empty() || total_amount <= 0.0 {
            return None;
        }

        let mut samples = [0.0; SAMPLE_COUNT];
        match self {
            Self::KubelkaMunk => {
                let mut weights: Vec<Float> = ingredients
                    .iter()
                    .zip(&amounts)
                    .map(|((curve, _), amount)| strength.weight(*amount, curve.luminance()))
                    .collect();
                let mut total: Float = weights.iter().sum();
                if !total.is_finite() || total <= 0.0 {
                    weights = amounts;
                    total = total_amount;
                }

                for (index, sample) in samples.iter_mut().enumerate() {
                    let ks = ingredients
                        .iter()
                        .zip(&weights)
                        .fold(0.0, |sum, ((curve, _), weight)| {
                            weight.mul_add(to_ks(curve[index]), sum)
                        });
                    *sample = from_ks(ks / total);
                }
            }
            Self::GeometricMean => {
                for (index, sample) in samples.iter_mut().enumerate() {
                    let log = ingredients
                        .iter()
                        .zip(&amounts)
                        .fold(0.0, |sum, ((curve, _), amount)| {
                            (amount / total_amount).mul_add(curve[index].ln(), sum)
                        });
                    *sample = log.exp();
                }
            }
        }

        Some(Reflectance::new(samples))
    }
}
