//! Spectral data sampled at the same wavelengths as reflectance curves.
//!
//! Reflectance curves have 36 samples from 380nm to 730nm in 10nm steps. This
//! module provides the CIE standard illuminant D65 at those wavelengths as
//! well as the analytical approximation of the CIE 1931 2º standard observer.
//! Their premultiplied product yields the weights for computing a reflectance
//! curve's tristimulus values.

use crate::Float;

/// The first sampled wavelength in nanometers.
pub(crate) const START: usize = 380;

/// The distance between two sampled wavelengths in nanometers.
pub(crate) const STEP: usize = 10;

/// The number of samples.
pub(crate) const COUNT: usize = 36;

/// The CIE standard illuminant D65 from 380nm to 730nm in 10nm steps.
#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
pub(crate) const CIE_ILLUMINANT_D65: [Float; COUNT] = [
     49.9755,  54.6482,  82.7549,  91.4860,  93.4318,  86.6823, 104.8650, 117.0080,
    117.8120, 114.8610, 115.9230, 108.8110, 109.3540, 107.8020, 104.7900, 107.6890,
    104.4050, 104.0460, 100.0000,  96.3342,  95.7880,  88.6856,  90.0062,  89.5991,
     87.6987,  83.2886,  83.6992,  80.0268,  80.2146,  82.2778,  78.2842,  69.7213,
     71.6091,  74.3490,  61.6040,  69.8856,
];

/// Get the wavelength for the sample with the given index.
#[inline]
pub(crate) const fn wavelength(index: usize) -> usize {
    START + STEP * index
}

pub(crate) mod std_observer {
    //! Free-standing functions related to the CIE standard observer.

    use crate::Float;

    /// Compute an [analytical
    /// approximation](https://research.nvidia.com/publication/2013-07_simple-analytic-approximations-cie-xyz-color-matching-functions)
    /// for the 1931 2º standard observer's x.
    pub(crate) fn x(wavelength: Float) -> Float {
        let p1 = (wavelength - 442.0) * (if wavelength < 442.0 { 0.0624 } else { 0.0374 });
        let p2 = (wavelength - 599.8) * (if wavelength < 599.8 { 0.0264 } else { 0.0323 });
        let p3 = (wavelength - 501.1) * (if wavelength < 501.1 { 0.0490 } else { 0.0382 });

        0.362 * (-0.5 * p1 * p1).exp() + 1.056 * (-0.5 * p2 * p2).exp()
            - 0.065 * (-0.5 * p3 * p3).exp()
    }

    /// Compute an analytical approximation for the 1931 2º standard
    /// observer's y.
    pub(crate) fn y(wavelength: Float) -> Float {
        let p1 = (wavelength - 568.8) * (if wavelength < 568.8 { 0.0213 } else { 0.0247 });
        let p2 = (wavelength - 530.9) * (if wavelength < 530.9 { 0.0613 } else { 0.0322 });
        0.821 * (-0.5 * p1 * p1).exp() + 0.286 * (-0.5 * p2 * p2).exp()
    }

    /// Compute an analytical approximation for the 1931 2º standard
    /// observer's z.
    pub(crate) fn z(wavelength: Float) -> Float {
        let p1 = (wavelength - 437.0) * (if wavelength < 437.0 { 0.0845 } else { 0.0278 });
        let p2 = (wavelength - 459.0) * (if wavelength < 459.0 { 0.0385 } else { 0.0725 });
        1.217 * (-0.5 * p1 * p1).exp() + 0.681 * (-0.5 * p2 * p2).exp()
    }
}

/// Compute the D65-illuminated 2º observer at the sampled wavelengths.
///
/// ASTM standard E308 refers to the premultiplied values as *weighting
/// factors*. Their component-wise sum is the white point's tristimulus.
pub(crate) fn illuminated_observer() -> [[Float; 3]; COUNT] {
    let mut data = [[0.0; 3]; COUNT];
    for (index, entry) in data.iter_mut().enumerate() {
        let lambda = wavelength(index) as Float;
        let s = CIE_ILLUMINANT_D65[index] / 100.0;
        *entry = [
            s * std_observer::x(lambda),
            s * std_observer::y(lambda),
            s * std_observer::z(lambda),
        ];
    }
    data
}

#[cfg(test)]
mod test {
    use super::{illuminated_observer, wavelength, CIE_ILLUMINANT_D65, COUNT};

    #[test]
    fn test_wavelengths() {
        assert_eq!(wavelength(0), 380);
        assert_eq!(wavelength(COUNT - 1), 730);
        assert_eq!(CIE_ILLUMINANT_D65[18], 100.0);
    }

    #[test]
    fn test_white_point() {
        let mut sum = [0.0; 3];
        for value in illuminated_observer() {
            for c in 0..3 {
                sum[c] += value[c];
            }
        }

        // D65's chromaticity is (0.31273, 0.32902). The analytical observer
        // sampled at 10nm gets within a few thousandths.
        let total = sum[0] + sum[1] + sum[2];
        let (x, y) = (sum[0] / total, sum[1] / total);
        assert!((x - 0.31273).abs() < 0.002, "x chromaticity is {}", x);
        assert!((y - 0.32902).abs() < 0.002, "y chromaticity is {}", y);
    }
}
