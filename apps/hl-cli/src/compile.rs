//! Turn a project file into simulation inputs.

use hl_core::units::{degc, m, m2, m3, m3ps, w_per_m2};
use hl_project::{LoopDef, Project, RunDef};
use hl_sim::{LoopParams, LoopSimulation, RunOptions, SimResult};

pub fn loop_params(def: &LoopDef) -> LoopParams {
    LoopParams {
        tank_volume: m3(def.tank_volume_m3),
        collector_area: m2(def.collector_area_m2),
        collector_volume: m3(def.collector_volume_m3),
        pump_flow: m3ps(def.pump_flow_m3_per_s),
        node_volume: m3(def.node_volume_m3),
        pipe_nodes: def.pipe_nodes,
        tank_height: m(def.tank_height_m),
        ambient: degc(def.ambient_c),
        initial_water: degc(def.initial_water_c),
        solar_intensity: w_per_m2(def.solar_w_per_m2),
    }
}

pub fn run_options(def: &RunDef) -> RunOptions {
    RunOptions {
        ticks: def.ticks,
        record_every: def.record_every,
        time_dilation: def.time_dilation,
    }
}

/// Build a ready-to-tick simulation with the project's pump setting applied.
pub fn build(project: &Project) -> SimResult<LoopSimulation> {
    let mut sim = LoopSimulation::new(&loop_params(&project.loop_def))?;
    sim.set_pump_on(project.run.pump_on);
    Ok(sim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_project_matches_default_params() {
        let params = loop_params(&LoopDef::default());
        let reference = LoopParams::default();
        assert_eq!(params.pipe_nodes, reference.pipe_nodes);
        assert!((params.tank_volume.value - reference.tank_volume.value).abs() < 1e-12);
        assert!((params.ambient.value - reference.ambient.value).abs() < 1e-9);
        assert!((params.solar_intensity.value - reference.solar_intensity.value).abs() < 1e-9);
    }

    #[test]
    fn build_applies_pump_flag() {
        let mut project = Project::new("p");
        project.run.pump_on = false;
        let sim = build(&project).unwrap();
        assert!(!sim.is_pump_on());
        assert!(sim.is_running());
    }

    #[test]
    fn run_options_copied() {
        let def = RunDef {
            ticks: 12,
            record_every: 4,
            time_dilation: Some(10.0),
            pump_on: true,
        };
        let opts = run_options(&def);
        assert_eq!(opts.ticks, 12);
        assert_eq!(opts.record_every, 4);
        assert_eq!(opts.time_dilation, Some(10.0));
    }
}
