mod conversion;
mod difference;
mod math;
mod matrix;
mod string;

// conversion
pub(crate) use conversion::{
    from_24bit, linear_rgb_to_luminance, linear_rgb_to_rgb, multiply, oklab_to_oklch,
    rgb_to_linear_rgb, srgb_to_oklab, to_24bit, XYZ_TO_LINEAR_SRGB,
};

// difference
pub(crate) use difference::delta_e_ok;

// math
pub(crate) use math::{gcd, reduce_ratios};

// matrix
pub(crate) use matrix::Matrix;

// string
pub(crate) use string::parse_hashed;
