//! Fractions for tinting and dilution.

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::gcd;
use crate::Float;

/// A fraction between zero and one, in lowest terms.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, frozen, hash, module = "paintmix.fraction")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: u32,
    denominator: u32,
}

impl Fraction {
    /// Nothing at all.
    pub const ZERO: Fraction = Fraction::reduced(0, 1);

    /// Everything.
    pub const WHOLE: Fraction = Fraction::reduced(1, 1);

    /// Create a new fraction.
    ///
    /// This method returns `None` if the denominator is zero or the
    /// numerator exceeds the denominator.
    pub const fn new(numerator: u32, denominator: u32) -> Option<Self> {
        if denominator == 0 || denominator < numerator {
            None
        } else {
            Some(Self::reduced(numerator, denominator))
        }
    }

    const fn reduced(numerator: u32, denominator: u32) -> Self {
        let divisor = gcd(numerator, denominator);
        Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        }
    }

    /// Get the numerator.
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Get the denominator.
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Determine whether this fraction is zero.
    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Determine whether this fraction is one.
    pub const fn is_whole(&self) -> bool {
        self.numerator == self.denominator
    }

    /// Get the complement, i.e., one minus this fraction.
    pub const fn complement(&self) -> Self {
        Self::reduced(self.denominator - self.numerator, self.denominator)
    }

    /// Get the value as a floating point number.
    pub fn value(&self) -> Float {
        self.numerator as Float / self.denominator as Float
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let left = self.numerator as u64 * other.denominator as u64;
        let right = other.numerator as u64 * self.denominator as u64;
        left.cmp(&right)
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// The canonical fractions for tinting with white and for diluting a layer.
pub const CANONICAL_FRACTIONS: [Fraction; 4] = [
    Fraction::reduced(1, 10),
    Fraction::reduced(1, 4),
    Fraction::reduced(1, 2),
    Fraction::reduced(3, 4),
];

#[cfg(test)]
mod test {
    use super::{Fraction, CANONICAL_FRACTIONS};

    #[test]
    fn test_fraction() {
        let half = Fraction::new(5, 10).expect("valid fraction");
        assert_eq!(half.numerator(), 1);
        assert_eq!(half.denominator(), 2);
        assert_eq!(format!("{}", half), "1/2");
        assert_eq!(half.complement(), half);
        assert_eq!(half.value(), 0.5);

        assert_eq!(Fraction::new(3, 0), None);
        assert_eq!(Fraction::new(3, 2), None);
        assert_eq!(Fraction::new(0, 7), Some(Fraction::ZERO));
        assert_eq!(Fraction::new(7, 7), Some(Fraction::WHOLE));
        assert!(Fraction::ZERO.is_zero());
        assert!(Fraction::WHOLE.is_whole());
        assert_eq!(Fraction::WHOLE.complement(), Fraction::ZERO);
    }

    #[test]
    fn test_canonical_order() {
        assert!(CANONICAL_FRACTIONS.windows(2).all(|w| w[0] < w[1]));
        assert!(Fraction::ZERO < CANONICAL_FRACTIONS[0]);
        assert!(CANONICAL_FRACTIONS[3] < Fraction::WHOLE);
        assert_eq!(format!("{}", CANONICAL_FRACTIONS[0]), "1/10");
    }
}
