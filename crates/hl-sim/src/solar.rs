//! Lumped solar heating of the collector.
//!
//! The collector's water is treated as one mass for the energy balance: the
//! energy absorbed during a tick raises every collector node by the same
//! amount.

use serde::{Deserialize, Serialize};

/// Efficiency at zero outlet-to-ambient difference.
pub const EFFICIENCY_INTERCEPT: f64 = 0.66;

/// Efficiency lost per kelvin of outlet temperature above ambient.
pub const EFFICIENCY_SLOPE_PER_K: f64 = -0.00943;

/// Result of heating the collector for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolarGain {
    /// Collector efficiency used for the tick; negative means net loss.
    pub efficiency: f64,
    /// Energy absorbed by the collector water (J).
    pub energy_j: f64,
    /// Temperature change applied to every collector node (K).
    pub delta_t_k: f64,
}

/// Linear collector efficiency curve.
///
/// Not clamped: at high outlet temperatures the efficiency goes negative and
/// the collector loses heat.
pub fn collector_efficiency(outlet_c: f64, ambient_c: f64) -> f64 {
    EFFICIENCY_SLOPE_PER_K * (outlet_c - ambient_c) + EFFICIENCY_INTERCEPT
}

/// Inputs to one heating step, all in SI units.
#[derive(Clone, Copy, Debug)]
pub struct SolarInput {
    pub irradiance_w_per_m2: f64,
    pub collector_area_m2: f64,
    pub dt_s: f64,
    pub ambient_c: f64,
    /// Heat capacity of all water in the collector (J/K).
    pub collector_heat_capacity_j_per_k: f64,
}

/// Heat the collector nodes in place.
///
/// Efficiency is evaluated at the collector outlet (the last node) before any
/// node is changed. An empty collector absorbs nothing.
pub fn heat_collector(collector: &mut [f64], input: &SolarInput) -> SolarGain {
    let Some(&outlet_c) = collector.last() else {
        return SolarGain {
            efficiency: 0.0,
            energy_j: 0.0,
            delta_t_k: 0.0,
        };
    };

    let efficiency = collector_efficiency(outlet_c, input.ambient_c);
    let energy_j =
        input.irradiance_w_per_m2 * input.collector_area_m2 * input.dt_s * efficiency;
    let delta_t_k = energy_j / input.collector_heat_capacity_j_per_k;

    for t in collector.iter_mut() {
        *t += delta_t_k;
    }

    SolarGain {
        efficiency,
        energy_j,
        delta_t_k,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(irradiance: f64) -> SolarInput {
        SolarInput {
            irradiance_w_per_m2: irradiance,
            collector_area_m2: 2.0,
            dt_s: 40.0,
            ambient_c: 20.0,
            collector_heat_capacity_j_per_k: 4.0 * 4186.0,
        }
    }

    #[test]
    fn efficiency_at_ambient_is_intercept() {
        assert!((collector_efficiency(20.0, 20.0) - 0.66).abs() < 1e-12);
    }

    #[test]
    fn efficiency_goes_negative_when_hot() {
        // Break-even at 0.66 / 0.00943 ≈ 70 K above ambient.
        assert!(collector_efficiency(100.0, 20.0) < 0.0);
        assert!(collector_efficiency(80.0, 20.0) > 0.0);
    }

    #[test]
    fn uniform_rise_at_ambient() {
        let mut collector = vec![20.0, 20.0];
        let gain = heat_collector(&mut collector, &input(800.0));

        let expected_energy = 800.0 * 2.0 * 40.0 * 0.66;
        let expected_dt = expected_energy / (4.0 * 4186.0);
        assert!((gain.energy_j - expected_energy).abs() < 1e-6);
        assert!((gain.delta_t_k - expected_dt).abs() < 1e-12);
        assert!((collector[0] - (20.0 + expected_dt)).abs() < 1e-12);
        assert_eq!(collector[0], collector[1]);
    }

    #[test]
    fn efficiency_uses_outlet_node() {
        let mut collector = vec![20.0, 50.0];
        let gain = heat_collector(&mut collector, &input(800.0));
        assert!((gain.efficiency - collector_efficiency(50.0, 20.0)).abs() < 1e-12);
        assert!((collector[1] - collector[0] - 30.0).abs() < 1e-9);
    }

    #[test]
    fn negative_efficiency_cools() {
        let mut collector = vec![95.0, 100.0];
        let gain = heat_collector(&mut collector, &input(800.0));
        assert!(gain.efficiency < 0.0);
        assert!(gain.delta_t_k < 0.0);
        assert!(collector[1] < 100.0);
    }

    #[test]
    fn dark_sky_changes_nothing() {
        let mut collector = vec![30.0, 40.0];
        let gain = heat_collector(&mut collector, &input(0.0));
        assert_eq!(gain.delta_t_k, 0.0);
        assert_eq!(collector, vec![30.0, 40.0]);
    }

    #[test]
    fn empty_collector_absorbs_nothing() {
        let mut collector: Vec<f64> = Vec::new();
        let gain = heat_collector(&mut collector, &input(800.0));
        assert_eq!(gain.energy_j, 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn positive_efficiency_never_cools(
            nodes in prop::collection::vec(0.0_f64..60.0_f64, 1..8),
            irradiance in 0.0_f64..1200.0_f64,
        ) {
            let input = SolarInput {
                irradiance_w_per_m2: irradiance,
                collector_area_m2: 2.0,
                dt_s: 40.0,
                ambient_c: 20.0,
                collector_heat_capacity_j_per_k: nodes.len() as f64 * 2.0 * 4186.0,
            };
            let before = nodes.clone();
            let mut after = nodes;
            let gain = heat_collector(&mut after, &input);
            prop_assert!(gain.efficiency > 0.0);
            for (b, a) in before.iter().zip(after.iter()) {
                prop_assert!(a >= b);
                prop_assert!(((a - b) - gain.delta_t_k).abs() < 1e-9);
            }
        }
    }
}
