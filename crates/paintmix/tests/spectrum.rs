use paintmix::{from_rgb, to_rgb, ReflectanceError, Rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_random_round_trips() -> Result<(), ReflectanceError> {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..100 {
        let rgb = Rgb::new(
            rng.random_range(8..=247),
            rng.random_range(8..=247),
            rng.random_range(8..=247),
        );
        let curve = from_rgb(rgb)?;
        let actual = to_rgb(&curve);

        for channel in 0..3 {
            let delta = (actual[channel] as i32 - rgb[channel] as i32).abs();
            assert!(delta <= 1, "{} round-trips to {}", rgb, actual);
        }
    }

    Ok(())
}
