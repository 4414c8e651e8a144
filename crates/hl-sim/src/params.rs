//! Loop configuration and the constants derived from it.

use crate::error::{SimError, SimResult};
use hl_core::numeric::{
    VOLUME_QUANTUM_TOL_M3, ensure_finite, ensure_non_negative, ensure_positive, whole_multiple,
};
use hl_core::units::{
    Area, Irradiance, Length, Temperature, Volume, VolumeRate, degc, m, m2, m3, m3ps, to_degc,
    w_per_m2,
};
use hl_core::water;

/// Nodes in each connecting pipe unless configured otherwise.
pub const PIPE_NODES_DEFAULT: usize = 2;

/// Largest conduction ratio for which the explicit step stays stable.
pub const STABILITY_LIMIT: f64 = 0.5;

/// Physical inputs of the loop, fixed for the lifetime of a simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopParams {
    pub tank_volume: Volume,
    pub collector_area: Area,
    /// Water held inside the collector.
    pub collector_volume: Volume,
    pub pump_flow: VolumeRate,
    /// Volume of one discrete water segment.
    pub node_volume: Volume,
    /// Nodes in the upper and in the lower pipe.
    pub pipe_nodes: usize,
    pub tank_height: Length,
    pub ambient: Temperature,
    /// Temperature of every node at t = 0.
    pub initial_water: Temperature,
    pub solar_intensity: Irradiance,
}

impl Default for LoopParams {
    fn default() -> Self {
        Self {
            tank_volume: m3(0.2),
            collector_area: m2(2.0),
            collector_volume: m3(0.004),
            pump_flow: m3ps(5e-5),
            node_volume: m3(0.002),
            pipe_nodes: PIPE_NODES_DEFAULT,
            tank_height: m(1.2),
            ambient: degc(20.0),
            initial_water: degc(20.0),
            solar_intensity: w_per_m2(800.0),
        }
    }
}

/// Values computed once from [`LoopParams`] and never recomputed per tick.
///
/// All quantities are plain SI `f64`s, temperatures in °C.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopConstants {
    pub collector_nodes: usize,
    pub pipe_nodes: usize,
    pub tank_nodes: usize,
    pub node_volume_m3: f64,
    /// Time for the pump to move one node volume; the fixed tick length.
    pub dt_s: f64,
    pub collector_area_m2: f64,
    pub collector_mass_kg: f64,
    /// Horizontal cross-section of the tank, the contact area between layers.
    pub tank_area_m2: f64,
    pub node_height_m: f64,
    pub node_mass_kg: f64,
    pub cp_j_per_kg_k: f64,
    /// Contact area over layer height, `A / dz`, between two adjacent tank
    /// layers. Heat crossing per tick is `ΔT * conductance * dt` (J).
    pub conductance: f64,
    /// `conductance * dt / (node mass * cp)`; must stay below [`STABILITY_LIMIT`].
    pub stability_ratio: f64,
    pub ambient_c: f64,
    pub initial_c: f64,
    pub initial_solar_w_per_m2: f64,
}

impl LoopConstants {
    /// Validate `params` and derive the per-run constants.
    ///
    /// # Errors
    /// - a component volume that is not a whole number of nodes
    /// - non-positive or non-finite dimensions, flow or node volume
    /// - zero pipe nodes
    /// - a conduction ratio above [`STABILITY_LIMIT`]
    pub fn derive(params: &LoopParams) -> SimResult<Self> {
        let node_volume_m3 = ensure_positive(params.node_volume.value, "node volume")?;
        let flow_m3ps = ensure_positive(params.pump_flow.value, "pump flow rate")?;
        let tank_volume_m3 = params.tank_volume.value;
        let tank_height_m = ensure_positive(params.tank_height.value, "tank height")?;
        let collector_area_m2 = ensure_positive(params.collector_area.value, "collector area")?;
        let collector_volume_m3 = params.collector_volume.value;
        let initial_solar_w_per_m2 =
            ensure_non_negative(params.solar_intensity.value, "solar intensity")?;
        let ambient_c = ensure_finite(to_degc(params.ambient), "ambient temperature")?;
        let initial_c = ensure_finite(to_degc(params.initial_water), "initial water temperature")?;

        if params.pipe_nodes == 0 {
            return Err(SimError::InvalidConfig {
                what: "pipe node count must be at least 1",
            });
        }

        let collector_nodes = whole_multiple(
            collector_volume_m3,
            node_volume_m3,
            VOLUME_QUANTUM_TOL_M3,
            "collector volume",
        )?;
        let tank_nodes = whole_multiple(
            tank_volume_m3,
            node_volume_m3,
            VOLUME_QUANTUM_TOL_M3,
            "tank volume",
        )?;

        let rho = water::density().value;
        let cp = water::specific_heat().value;

        let dt_s = node_volume_m3 / flow_m3ps;
        let tank_area_m2 = tank_volume_m3 / tank_height_m;
        let node_height_m = tank_height_m / tank_nodes as f64;
        let node_mass_kg = node_volume_m3 * rho;
        let conductance = tank_area_m2 / node_height_m;
        let stability_ratio = conductance * dt_s / (node_mass_kg * cp);

        if stability_ratio > STABILITY_LIMIT {
            return Err(SimError::Unstable {
                ratio: stability_ratio,
                limit: STABILITY_LIMIT,
            });
        }

        Ok(Self {
            collector_nodes,
            pipe_nodes: params.pipe_nodes,
            tank_nodes,
            node_volume_m3,
            dt_s,
            collector_area_m2,
            collector_mass_kg: collector_volume_m3 * rho,
            tank_area_m2,
            node_height_m,
            node_mass_kg,
            cp_j_per_kg_k: cp,
            conductance,
            stability_ratio,
            ambient_c,
            initial_c,
            initial_solar_w_per_m2,
        })
    }

    /// Nodes in the whole ring.
    pub fn total_nodes(&self) -> usize {
        self.collector_nodes + 2 * self.pipe_nodes + self.tank_nodes
    }

    /// Heat capacity of one node (J/K).
    pub fn node_heat_capacity(&self) -> f64 {
        self.node_mass_kg * self.cp_j_per_kg_k
    }
}
