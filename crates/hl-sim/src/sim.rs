//! Loop simulation state and the per-tick orchestrator.

use std::collections::VecDeque;
use std::time::Duration;

use hl_core::numeric::{ensure_non_negative, ensure_positive};
use tracing::{debug, info};

use crate::chain::LoopChains;
use crate::conduction::ConductionStep;
use crate::error::{SimError, SimResult};
use crate::mixing::mix_inversion;
use crate::params::{LoopConstants, LoopParams};
use crate::pump::advance_one_node;
use crate::snapshot::LoopSnapshot;
use crate::solar::{SolarGain, SolarInput, heat_collector};

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickSummary {
    /// Clock after the tick (s).
    pub elapsed_s: f64,
    pub pumped: bool,
    /// Tank layers overwritten by inversion mixing (0 if none or not pumped).
    pub mixed_layers: usize,
    pub solar: SolarGain,
}

/// Mutable state of one solar loop: node temperatures, clock and the two
/// control flags.
///
/// Single writer: [`LoopSimulation::tick`] takes `&mut self` and runs to
/// completion, so readers holding `&self` only ever see whole ticks.
#[derive(Clone, Debug)]
pub struct LoopSimulation {
    constants: LoopConstants,
    chains: LoopChains,
    elapsed_s: f64,
    running: bool,
    pump_on: bool,
    solar_w_per_m2: f64,
}

impl LoopSimulation {
    /// Validate `params` and start with every node at the initial water
    /// temperature, the clock at zero, running and pumping.
    ///
    /// # Errors
    /// Any configuration problem reported by [`LoopConstants::derive`].
    pub fn new(params: &LoopParams) -> SimResult<Self> {
        let constants = LoopConstants::derive(params)?;
        info!(
            collector_nodes = constants.collector_nodes,
            pipe_nodes = constants.pipe_nodes,
            tank_nodes = constants.tank_nodes,
            dt_s = constants.dt_s,
            stability_ratio = constants.stability_ratio,
            "loop simulation initialised"
        );
        Ok(Self::from_constants(constants))
    }

    /// Start from already derived constants.
    pub fn from_constants(constants: LoopConstants) -> Self {
        let chains = LoopChains::uniform(&constants, constants.initial_c);
        Self {
            solar_w_per_m2: constants.initial_solar_w_per_m2,
            constants,
            chains,
            elapsed_s: 0.0,
            running: true,
            pump_on: true,
        }
    }

    /// Replace the node temperatures, e.g. to resume from a recorded state.
    ///
    /// # Errors
    /// `InvalidArg` if any chain length differs from the configured one.
    pub fn with_chains(mut self, chains: LoopChains) -> SimResult<Self> {
        let c = &self.constants;
        let expected = [c.collector_nodes, c.pipe_nodes, c.tank_nodes, c.pipe_nodes];
        if chains.lengths() != expected {
            return Err(SimError::InvalidArg {
                what: "chain lengths do not match the configured loop",
            });
        }
        self.chains = chains;
        Ok(self)
    }

    /// Advance the loop by one fixed step.
    ///
    /// Returns `None` without touching any state while paused. Otherwise the
    /// sub-steps run strictly in this order, each on the result of the last:
    /// 1. clock += dt
    /// 2. pump transport and inversion mixing (pump on only)
    /// 3. solar heating of the collector
    /// 4. vertical conduction in the tank
    pub fn tick(&mut self) -> Option<TickSummary> {
        if !self.running {
            return None;
        }

        self.elapsed_s += self.constants.dt_s;

        let mut mixed_layers = 0;
        if self.pump_on && advance_one_node(&mut self.chains) {
            mixed_layers = mix_inversion(self.chains.tank_mut());
        }

        let solar_input = self.solar_input();
        let solar = heat_collector(self.chains.collector_mut(), &solar_input);

        let conduction = self.conduction();
        conduction.apply(self.chains.tank_mut());

        debug!(
            t = self.elapsed_s,
            pumped = self.pump_on,
            mixed_layers,
            efficiency = solar.efficiency,
            delta_t_k = solar.delta_t_k,
            "tick"
        );

        Some(TickSummary {
            elapsed_s: self.elapsed_s,
            pumped: self.pump_on,
            mixed_layers,
            solar,
        })
    }

    fn solar_input(&self) -> SolarInput {
        let c = &self.constants;
        SolarInput {
            irradiance_w_per_m2: self.solar_w_per_m2,
            collector_area_m2: c.collector_area_m2,
            dt_s: c.dt_s,
            ambient_c: c.ambient_c,
            collector_heat_capacity_j_per_k: c.collector_mass_kg * c.cp_j_per_kg_k,
        }
    }

    fn conduction(&self) -> ConductionStep {
        ConductionStep {
            conductance: self.constants.conductance,
            dt_s: self.constants.dt_s,
            node_heat_capacity_j_per_k: self.constants.node_heat_capacity(),
        }
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    pub fn toggle_pump(&mut self) {
        self.pump_on = !self.pump_on;
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn set_pump_on(&mut self, pump_on: bool) {
        self.pump_on = pump_on;
    }

    /// Change the incident irradiance used from the next tick on.
    ///
    /// # Errors
    /// Negative or non-finite values.
    pub fn set_solar_intensity(&mut self, w_per_m2: f64) -> SimResult<()> {
        self.solar_w_per_m2 = ensure_non_negative(w_per_m2, "solar intensity")?;
        Ok(())
    }

    /// Wall-clock interval between ticks for playback `time_dilation` times
    /// faster than real time.
    ///
    /// # Errors
    /// `time_dilation` not positive and finite, or so small that the interval
    /// overflows a [`Duration`].
    pub fn playback_interval(&self, time_dilation: f64) -> SimResult<Duration> {
        let dilation = ensure_positive(time_dilation, "time dilation")?;
        Duration::try_from_secs_f64(self.constants.dt_s / dilation).map_err(|_| {
            SimError::InvalidArg {
                what: "time dilation gives a tick interval too long to represent",
            }
        })
    }

    pub fn constants(&self) -> &LoopConstants {
        &self.constants
    }

    pub fn chains(&self) -> &LoopChains {
        &self.chains
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_pump_on(&self) -> bool {
        self.pump_on
    }

    pub fn solar_intensity(&self) -> f64 {
        self.solar_w_per_m2
    }

    pub fn collector(&self) -> &VecDeque<f64> {
        self.chains.collector()
    }

    pub fn upper_pipe(&self) -> &VecDeque<f64> {
        self.chains.upper_pipe()
    }

    /// Tank layers, top first.
    pub fn tank(&self) -> &VecDeque<f64> {
        self.chains.tank()
    }

    pub fn lower_pipe(&self) -> &VecDeque<f64> {
        self.chains.lower_pipe()
    }

    /// Heat stored in the tank relative to ambient (J).
    pub fn tank_energy_above_ambient_j(&self) -> f64 {
        let ambient = self.constants.ambient_c;
        let excess_k: f64 = self.chains.tank().iter().map(|t| t - ambient).sum();
        excess_k * self.constants.node_heat_capacity()
    }

    pub fn snapshot(&self) -> LoopSnapshot {
        LoopSnapshot {
            elapsed_s: self.elapsed_s,
            running: self.running,
            pump_on: self.pump_on,
            solar_w_per_m2: self.solar_w_per_m2,
            collector: self.chains.collector().iter().copied().collect(),
            upper_pipe: self.chains.upper_pipe().iter().copied().collect(),
            tank: self.chains.tank().iter().copied().collect(),
            lower_pipe: self.chains.lower_pipe().iter().copied().collect(),
        }
    }
}
