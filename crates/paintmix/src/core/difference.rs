use crate::Float;

/// Compute Delta-E for Oklab.
#[allow(non_snake_case)]
pub(crate) fn delta_e_ok(coordinates1: &[Float; 3], coordinates2: &[Float; 3]) -> Float {
    let [L1, a1, b1] = coordinates1;
    let [L2, a2, b2] = coordinates2;

    let ΔL = L1 - L2;
    let Δa = a1 - a2;
    let Δb = b1 - b2;

    ΔL.mul_add(ΔL, Δa.mul_add(Δa, Δb * Δb)).sqrt()
}

#[cfg(test)]
mod test {
    use super::delta_e_ok;

    #[test]
    fn test_delta_e() {
        assert_eq!(delta_e_ok(&[0.5, 0.1, -0.1], &[0.5, 0.1, -0.1]), 0.0);
        assert_eq!(delta_e_ok(&[0.0, 0.0, 0.0], &[0.0, 3.0, 4.0]), 5.0);
        assert_eq!(
            delta_e_ok(&[0.2, 0.1, 0.0], &[0.6, 0.0, 0.3]),
            delta_e_ok(&[0.6, 0.0, 0.3], &[0.2, 0.1, 0.0])
        );
    }
}
