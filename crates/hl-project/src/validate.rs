//! Project validation logic.

use crate::schema::{LoopDef, Project, RunDef};
use hl_core::numeric::{VOLUME_QUANTUM_TOL_M3, whole_multiple};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    if project.name.trim().is_empty() {
        return Err(invalid("name", &project.name, "must not be empty"));
    }

    validate_loop(&project.loop_def)?;
    validate_run(&project.run)?;
    Ok(())
}

fn validate_loop(def: &LoopDef) -> Result<(), ValidationError> {
    let positive = [
        ("loop.tank_volume_m3", def.tank_volume_m3),
        ("loop.tank_height_m", def.tank_height_m),
        ("loop.collector_area_m2", def.collector_area_m2),
        ("loop.collector_volume_m3", def.collector_volume_m3),
        ("loop.pump_flow_m3_per_s", def.pump_flow_m3_per_s),
        ("loop.node_volume_m3", def.node_volume_m3),
    ];
    for (field, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(field, value, "must be positive"));
        }
    }

    for (field, value) in [
        ("loop.ambient_c", def.ambient_c),
        ("loop.initial_water_c", def.initial_water_c),
    ] {
        if !value.is_finite() {
            return Err(invalid(field, value, "must be finite"));
        }
    }

    if !def.solar_w_per_m2.is_finite() || def.solar_w_per_m2 < 0.0 {
        return Err(invalid(
            "loop.solar_w_per_m2",
            def.solar_w_per_m2,
            "must not be negative",
        ));
    }

    if def.pipe_nodes == 0 {
        return Err(invalid("loop.pipe_nodes", def.pipe_nodes, "must be at least 1"));
    }

    for (field, volume) in [
        ("loop.tank_volume_m3", def.tank_volume_m3),
        ("loop.collector_volume_m3", def.collector_volume_m3),
    ] {
        if whole_multiple(volume, def.node_volume_m3, VOLUME_QUANTUM_TOL_M3, field).is_err() {
            return Err(invalid(
                field,
                volume,
                &format!("not a whole number of {} m3 nodes", def.node_volume_m3),
            ));
        }
    }

    Ok(())
}

fn validate_run(def: &RunDef) -> Result<(), ValidationError> {
    if def.record_every == 0 {
        return Err(invalid("run.record_every", def.record_every, "must be at least 1"));
    }
    if let Some(dilation) = def.time_dilation {
        if !dilation.is_finite() || dilation <= 0.0 {
            return Err(invalid("run.time_dilation", dilation, "must be positive"));
        }
    }
    Ok(())
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
