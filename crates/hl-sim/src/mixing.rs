//! Inversion mixing for the stratified tank.
//!
//! When pumping drops a node into the top of the tank that is colder than the
//! layer beneath it, the cold water sinks and mixes. The model grows a window
//! from the top until its mean is no longer colder than the next layer down
//! (or the window reaches the bottom), then sets every node in the window to
//! that mean.
//!
//! The mean is an unweighted arithmetic average. Layers all hold one node
//! volume, so this is also the energy-conserving mix.

/// Repair a cold-over-hot inversion at the top of `tank` (top first).
///
/// Returns how many layers were mixed; 0 when the top is already at least as
/// warm as the layer below, or when the tank has fewer than two layers.
pub fn mix_inversion(tank: &mut [f64]) -> usize {
    if tank.len() < 2 || tank[0] >= tank[1] {
        return 0;
    }

    let mut width = 2;
    let mut sum = tank[0] + tank[1];
    let mut mean = sum / 2.0;
    while width < tank.len() && mean < tank[width] {
        sum += tank[width];
        width += 1;
        mean = sum / width as f64;
    }

    tank[..width].fill(mean);
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed(mut tank: Vec<f64>) -> Vec<f64> {
        mix_inversion(&mut tank);
        tank
    }

    #[test]
    fn uniform_tank_unchanged() {
        assert_eq!(mixed(vec![5.0; 5]), vec![5.0; 5]);
    }

    #[test]
    fn cold_top_sinks_to_bottom() {
        assert_eq!(mixed(vec![1.0, 6.0, 6.0, 6.0, 6.0]), vec![5.0; 5]);
    }

    #[test]
    fn warm_top_is_fast_path() {
        let tank = vec![5.0, 2.0, 2.0, 2.0, 2.0];
        let mut copy = tank.clone();
        assert_eq!(mix_inversion(&mut copy), 0);
        assert_eq!(copy, tank);
    }

    #[test]
    fn stops_above_colder_layer() {
        let mut tank = vec![2.0, 5.0, 5.0, 1.0, 1.0];
        assert_eq!(mix_inversion(&mut tank), 3);
        assert_eq!(tank, vec![4.0, 4.0, 4.0, 1.0, 1.0]);
    }

    #[test]
    fn stops_when_mean_equals_next_layer() {
        assert_eq!(
            mixed(vec![2.0, 6.0, 4.0, 4.0, 3.0]),
            vec![4.0, 4.0, 4.0, 4.0, 3.0]
        );
    }

    #[test]
    fn single_layer_tank_is_noop() {
        let mut tank = vec![7.0];
        assert_eq!(mix_inversion(&mut tank), 0);
        assert_eq!(tank, vec![7.0]);
    }

    #[test]
    fn two_layer_inversion_mixes_both() {
        let mut tank = vec![10.0, 30.0];
        assert_eq!(mix_inversion(&mut tank), 2);
        assert_eq!(tank, vec![20.0, 20.0]);
    }

    #[test]
    fn mixing_twice_matches_once() {
        let mut once = vec![2.0, 5.0, 5.0, 1.0, 1.0];
        mix_inversion(&mut once);
        let mut twice = once.clone();
        assert_eq!(mix_inversion(&mut twice), 0);
        assert_eq!(twice, once);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mixing_is_idempotent(tank in prop::collection::vec(0.0_f64..100.0_f64, 1..40)) {
            let mut once = tank.clone();
            mix_inversion(&mut once);
            let mut twice = once.clone();
            mix_inversion(&mut twice);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn mixed_prefix_is_non_increasing(tank in prop::collection::vec(0.0_f64..100.0_f64, 2..40)) {
            let mut out = tank.clone();
            let width = mix_inversion(&mut out);
            for i in 0..width.saturating_sub(1) {
                prop_assert!(out[i] >= out[i + 1]);
            }
            if width > 0 && width < out.len() {
                prop_assert!(out[width - 1] >= out[width]);
            }
        }

        #[test]
        fn mixing_conserves_sum(tank in prop::collection::vec(0.0_f64..100.0_f64, 1..40)) {
            let before: f64 = tank.iter().sum();
            let mut out = tank.clone();
            mix_inversion(&mut out);
            let after: f64 = out.iter().sum();
            prop_assert!((before - after).abs() < 1e-9 * tank.len() as f64 * 100.0);
        }

        #[test]
        fn layers_below_window_untouched(tank in prop::collection::vec(0.0_f64..100.0_f64, 2..40)) {
            let mut out = tank.clone();
            let width = mix_inversion(&mut out);
            prop_assert_eq!(&out[width..], &tank[width..]);
        }
    }
}
