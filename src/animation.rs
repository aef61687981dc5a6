/// Color blend factor at `time` seconds, oscillates within [0, 1]
pub fn multiplier(time: f32) -> f32 {
    time.sin() / 2. + 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn starts_halfway() {
        assert_eq!(multiplier(0.), 0.5);
    }

    #[test]
    fn reaches_both_ends() {
        assert!((multiplier(PI / 2.) - 1.).abs() < 1e-6);
        assert!(multiplier(3. * PI / 2.).abs() < 1e-6);
    }

    #[test]
    fn stays_in_range() {
        for i in 0..10_000 {
            let m = multiplier(i as f32 * 0.01);
            assert!((0. ..=1.).contains(&m), "{m} out of range");
        }
    }
}
