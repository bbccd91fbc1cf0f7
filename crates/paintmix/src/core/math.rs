/// Compute the greatest common divisor of two integers.
///
/// By convention, `gcd(0, 0)` is zero.
#[inline]
pub(crate) const fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Compute the greatest common divisor of all integers in the slice.
///
/// This function returns zero for an empty slice or a slice of zeros.
pub(crate) fn gcd_all(values: &[u32]) -> u32 {
    values.iter().fold(0, |accumulator, value| gcd(accumulator, *value))
}

/// Reduce the integer ratios to lowest terms.
///
/// Dividing every ratio by the greatest common divisor preserves relative
/// proportions. A slice of zeros is returned as is.
pub(crate) fn reduce_ratios(values: &[u32]) -> Vec<u32> {
    match gcd_all(values) {
        0 | 1 => values.to_vec(),
        divisor => values.iter().map(|value| value / divisor).collect(),
    }
}

#[cfg(test)]
mod test {
    use super::{gcd, gcd_all, reduce_ratios};

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(gcd_all(&[]), 0);
        assert_eq!(gcd_all(&[6, 9, 15]), 3);
    }

    #[test]
    fn test_reduce_ratios() {
        assert_eq!(reduce_ratios(&[2, 4]), vec![1, 2]);
        assert_eq!(reduce_ratios(&[3, 3, 3]), vec![1, 1, 1]);
        assert_eq!(reduce_ratios(&[2, 3, 4]), vec![2, 3, 4]);
        assert_eq!(reduce_ratios(&[5]), vec![1]);
        assert_eq!(reduce_ratios(&[]), Vec::<u32>::new());

        // Re-expanding reproduces the same proportions.
        for ratios in [[4_u32, 6, 8], [10, 5, 5], [9, 3, 6]] {
            let reduced = reduce_ratios(&ratios);
            let factor = ratios[0] / reduced[0];
            for (original, reduced) in ratios.iter().zip(&reduced) {
                assert_eq!(*original, reduced * factor);
            }
        }
    }
}
