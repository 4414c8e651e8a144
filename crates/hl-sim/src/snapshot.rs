//! Owned, serialisable view of the loop between ticks.

use serde::{Deserialize, Serialize};

/// Everything a display or recorder needs after a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoopSnapshot {
    pub elapsed_s: f64,
    pub running: bool,
    pub pump_on: bool,
    pub solar_w_per_m2: f64,
    pub collector: Vec<f64>,
    pub upper_pipe: Vec<f64>,
    /// Top layer first.
    pub tank: Vec<f64>,
    pub lower_pipe: Vec<f64>,
}

impl LoopSnapshot {
    pub fn collector_outlet(&self) -> Option<f64> {
        self.collector.last().copied()
    }

    pub fn tank_top(&self) -> Option<f64> {
        self.tank.first().copied()
    }

    pub fn tank_bottom(&self) -> Option<f64> {
        self.tank.last().copied()
    }

    /// Mean tank temperature; every layer holds the same volume.
    pub fn tank_mean(&self) -> Option<f64> {
        hl_core::numeric::mean(&self.tank)
    }
}
