use crate::Float;

/// Convert the given 24-bit RGB coordinates to floating point coordinates.
#[inline]
pub(crate) fn from_24bit(r: u8, g: u8, b: u8) -> [Float; 3] {
    [r as Float / 255.0, g as Float / 255.0, b as Float / 255.0]
}

/// Convert the color coordinates to 24-bit representation.
///
/// This function assumes gamma-corrected sRGB coordinates with unit range.
/// Out-of-gamut and not-a-number coordinates are clamped to `0x00..=0xff`.
pub(crate) fn to_24bit(coordinates: &[Float; 3]) -> [u8; 3] {
    #[inline]
    fn convert(value: Float) -> u8 {
        let value = if value.is_nan() { 0.0 } else { value };
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    [
        convert(coordinates[0]),
        convert(coordinates[1]),
        convert(coordinates[2]),
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Multiply the 3 by 3 matrix and 3-element vector with each other, producing a
/// new 3-element vector.
#[inline]
pub(crate) fn multiply(matrix: &[[Float; 3]; 3], vector: &[Float; 3]) -> [Float; 3] {
    let [row1, row2, row3] = matrix;

    [
        row1[0].mul_add(vector[0], row1[1].mul_add(vector[1], row1[2] * vector[2])),
        row2[0].mul_add(vector[0], row2[1].mul_add(vector[1], row2[2] * vector[2])),
        row3[0].mul_add(vector[0], row3[1].mul_add(vector[1], row3[2] * vector[2])),
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Remove sRGB's gamma from a single coordinate.
#[inline]
pub(crate) fn decode_gamma(value: Float) -> Float {
    let magnitude = value.abs();
    if magnitude <= 0.04045 {
        value / 12.92
    } else {
        ((magnitude + 0.055) / 1.055).powf(2.4).copysign(value)
    }
}

/// Apply sRGB's gamma to a single coordinate.
#[inline]
pub(crate) fn encode_gamma(value: Float) -> Float {
    let magnitude = value.abs();
    if magnitude <= 0.0031308 {
        value * 12.92
    } else {
        magnitude
            .powf(1.0 / 2.4)
            .mul_add(1.055, -0.055)
            .copysign(value)
    }
}

/// Convert coordinates from gamma-corrected sRGB to linear sRGB. This is a
/// one-hop, direct conversion.
pub(crate) fn rgb_to_linear_rgb(value: &[Float; 3]) -> [Float; 3] {
    [
        decode_gamma(value[0]),
        decode_gamma(value[1]),
        decode_gamma(value[2]),
    ]
}

/// Convert coordinates from linear sRGB to gamma-corrected sRGB. This is a
/// one-hop, direct conversion.
pub(crate) fn linear_rgb_to_rgb(value: &[Float; 3]) -> [Float; 3] {
    [
        encode_gamma(value[0]),
        encode_gamma(value[1]),
        encode_gamma(value[2]),
    ]
}

// --------------------------------------------------------------------------------------------------------------------
// https://github.com/color-js/color.js/blob/a77e080a070039c534dda3965a769675aac5f75e/src/spaces/srgb-linear.js

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
pub(crate) const LINEAR_SRGB_TO_XYZ: [[Float; 3]; 3] = [
    [ 0.41239079926595934, 0.357584339383878,   0.1804807884018343  ],
    [ 0.21263900587151027, 0.715168678767756,   0.07219231536073371 ],
    [ 0.01933081871559182, 0.11919477979462598, 0.9505321522496607  ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
pub(crate) const XYZ_TO_LINEAR_SRGB: [[Float; 3]; 3] = [
    [  3.2409699419045226,  -1.537383177570094,   -0.4986107602930034  ],
    [ -0.9692436362808796,   1.8759675015077202,   0.04155505740717559 ],
    [  0.05563007969699366, -0.20397695888897652,  1.0569715142428786  ],
];

/// Determine the relative luminance of linear sRGB coordinates, i.e., the Y
/// component in XYZ.
#[inline]
pub(crate) fn linear_rgb_to_luminance(value: &[Float; 3]) -> Float {
    let [r, g, b] = LINEAR_SRGB_TO_XYZ[1];
    r.mul_add(value[0], g.mul_add(value[1], b * value[2]))
}

// --------------------------------------------------------------------------------------------------------------------
// https://github.com/color-js/color.js/blob/a77e080a070039c534dda3965a769675aac5f75e/src/spaces/oklab.js

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_OKLMS: [[Float; 3]; 3] = [
    [ 0.8190224379967030, 0.3619062600528904, -0.1288737815209879 ],
    [ 0.0329836539323885, 0.9292868615863434,  0.0361446663506424 ],
    [ 0.0481771893596242, 0.2642395317527308,  0.6335478284694309 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLMS_TO_OKLAB: [[Float; 3]; 3] = [
    [ 0.2104542683093140,  0.7936177747023054, -0.0040720430116193 ],
    [ 1.9779985324311684, -2.4285922420485799,  0.4505937096174110 ],
    [ 0.0259040424655478,  0.7827717124575296, -0.8086757549230774 ],
];

/// Convert coordinates for XYZ to Oklab. This is a one-hop, direct conversion,
/// even though it requires two matrix multiplications and a coordinate-wise
/// cube root.
fn xyz_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply(&XYZ_TO_OKLMS, value);
    multiply(&OKLMS_TO_OKLAB, &[l.cbrt(), m.cbrt(), s.cbrt()])
}

/// Convert coordinates for Oklab to Oklch. This is a one-hop, direct
/// conversion. Achromatic colors have a not-a-number hue.
#[allow(non_snake_case)]
pub(crate) fn oklab_to_oklch(value: &[Float; 3]) -> [Float; 3] {
    const EPSILON: Float = 0.0002;

    let [L, a, b] = *value;

    let a_m = a.abs();
    if a_m < EPSILON && b.abs() < EPSILON {
        return [L, 0.0, Float::NAN];
    }

    // per herbie 2.1
    let C = if a_m < b { b.hypot(a_m) } else { a_m.hypot(b) };

    let h = b.atan2(a).to_degrees();
    let h = if h.is_sign_negative() { h + 360.0 } else { h };

    [L, C, h]
}

/// Convert gamma-corrected sRGB coordinates to Oklab. This is a three-hop
/// conversion.
pub(crate) fn srgb_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let linear = rgb_to_linear_rgb(value);
    let xyz = multiply(&LINEAR_SRGB_TO_XYZ, &linear);
    xyz_to_oklab(&xyz)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_gamma_round_trip() {
        for byte in [0_u8, 1, 10, 11, 64, 128, 200, 254, 255] {
            let [value, _, _] = from_24bit(byte, 0, 0);
            let [r, _, _] = to_24bit(&[encode_gamma(decode_gamma(value)), 0.0, 0.0]);
            assert_eq!(r, byte);
        }
    }

    #[test]
    fn test_white_luminance() {
        let y = linear_rgb_to_luminance(&[1.0, 1.0, 1.0]);
        assert!((y - 1.0).abs() < 1e-9, "luminance of white is {}", y);
    }

    #[test]
    fn test_oklab() {
        let [l, a, b] = srgb_to_oklab(&[1.0, 1.0, 1.0]);
        assert!((l - 1.0).abs() < 1e-4);
        assert!(a.abs() < 1e-4);
        assert!(b.abs() < 1e-4);

        // Oklab coordinates for sRGB red, per Björn Ottosson's blog post.
        let [l, a, b] = srgb_to_oklab(&[1.0, 0.0, 0.0]);
        assert!((l - 0.627955).abs() < 1e-3);
        assert!((a - 0.224863).abs() < 1e-3);
        assert!((b - 0.125846).abs() < 1e-3);

        let [_, chroma, hue] = oklab_to_oklch(&srgb_to_oklab(&[0.5, 0.5, 0.5]));
        assert_eq!(chroma, 0.0);
        assert!(hue.is_nan());
    }
}
