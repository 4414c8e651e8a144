//! Render a recorded run as CSV or JSON.

use hl_sim::RunRecord;

use crate::error::AppResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Csv,
    Json,
}

/// One row per recorded snapshot: summary columns, then every tank layer
/// from the top down.
pub fn to_csv(record: &RunRecord) -> String {
    let layers = record.snapshots.first().map_or(0, |s| s.tank.len());

    let mut csv = String::from("t_s,pump_on,collector_outlet_c,tank_top_c,tank_mean_c,tank_bottom_c");
    for i in 0..layers {
        csv.push_str(&format!(",tank_{i}_c"));
    }
    csv.push('\n');

    for snap in &record.snapshots {
        csv.push_str(&format!(
            "{},{},{},{},{},{}",
            snap.elapsed_s,
            u8::from(snap.pump_on),
            cell(snap.collector_outlet()),
            cell(snap.tank_top()),
            cell(snap.tank_mean()),
            cell(snap.tank_bottom()),
        ));
        for t in &snap.tank {
            csv.push_str(&format!(",{t}"));
        }
        csv.push('\n');
    }
    csv
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn to_json(record: &RunRecord) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub fn render(record: &RunRecord, format: Format) -> AppResult<String> {
    match format {
        Format::Csv => Ok(to_csv(record)),
        Format::Json => to_json(record),
    }
}
