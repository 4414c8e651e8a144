//! Project schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(rename = "loop")]
    pub loop_def: LoopDef,
    #[serde(default)]
    pub run: RunDef,
}

impl Project {
    /// A project at the latest schema version with the reference loop.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.into(),
            loop_def: LoopDef::default(),
            run: RunDef::default(),
        }
    }
}

/// Physical description of the loop. Plain SI numbers, unit in the key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoopDef {
    pub tank_volume_m3: f64,
    pub tank_height_m: f64,
    pub collector_area_m2: f64,
    pub collector_volume_m3: f64,
    pub pump_flow_m3_per_s: f64,
    pub node_volume_m3: f64,
    #[serde(default = "default_pipe_nodes")]
    pub pipe_nodes: usize,
    pub ambient_c: f64,
    pub initial_water_c: f64,
    pub solar_w_per_m2: f64,
}

impl Default for LoopDef {
    fn default() -> Self {
        Self {
            tank_volume_m3: 0.2,
            tank_height_m: 1.2,
            collector_area_m2: 2.0,
            collector_volume_m3: 0.004,
            pump_flow_m3_per_s: 5e-5,
            node_volume_m3: 0.002,
            pipe_nodes: default_pipe_nodes(),
            ambient_c: 20.0,
            initial_water_c: 20.0,
            solar_w_per_m2: 800.0,
        }
    }
}

/// How a run is driven.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    #[serde(default = "default_ticks")]
    pub ticks: usize,
    #[serde(default = "default_record_every")]
    pub record_every: usize,
    /// Real-time playback speed-up; absent means run unpaced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_dilation: Option<f64>,
    #[serde(default = "default_pump_on")]
    pub pump_on: bool,
}

impl Default for RunDef {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            record_every: default_record_every(),
            time_dilation: None,
            pump_on: default_pump_on(),
        }
    }
}

fn default_pipe_nodes() -> usize {
    2
}

fn default_ticks() -> usize {
    1_000
}

fn default_record_every() -> usize {
    10
}

fn default_pump_on() -> bool {
    true
}
