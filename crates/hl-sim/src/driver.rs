//! Fixed-tick driver and result recording.
//!
//! The simulation never owns a timer. This driver is the caller-side loop:
//! it ticks a fixed number of times, optionally pacing ticks in wall-clock
//! time, and keeps a decimated record of snapshots.

use std::thread;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{SimError, SimResult};
use crate::sim::LoopSimulation;
use crate::snapshot::LoopSnapshot;

/// Options for a driven run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOptions {
    /// Number of ticks to deliver.
    pub ticks: usize,
    /// Record every N-th tick (decimation).
    pub record_every: usize,
    /// Pace ticks at `dt / time_dilation` of wall-clock time; `None` runs
    /// as fast as possible.
    pub time_dilation: Option<f64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ticks: 1_000,
            record_every: 10,
            time_dilation: None,
        }
    }
}

/// Recorded snapshots of a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub snapshots: Vec<LoopSnapshot>,
    /// Total solar energy absorbed over all ticks (J); negative if the
    /// collector lost more than it gained.
    pub solar_energy_j: f64,
    /// Ticks that actually advanced the loop.
    pub ticks_run: usize,
}

impl RunRecord {
    pub fn last(&self) -> Option<&LoopSnapshot> {
        self.snapshots.last()
    }

    /// Recorded times (s).
    pub fn times(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.elapsed_s).collect()
    }
}

/// Deliver `opts.ticks` ticks to `sim`.
///
/// Records the initial state, every `record_every`-th tick and always the
/// final state. A paused simulation still receives ticks; they are no-ops.
///
/// # Errors
/// `InvalidArg` for a zero `record_every` or a non-positive dilation.
pub fn run(sim: &mut LoopSimulation, opts: &RunOptions) -> SimResult<RunRecord> {
    run_with_progress(sim, opts, None)
}

/// [`run`], calling `on_record` with each snapshot as it is recorded.
///
/// The callback only ever sees the loop between ticks.
pub fn run_with_progress(
    sim: &mut LoopSimulation,
    opts: &RunOptions,
    mut on_record: Option<&mut dyn FnMut(&LoopSnapshot)>,
) -> SimResult<RunRecord> {
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }
    let interval = match opts.time_dilation {
        Some(dilation) => Some(sim.playback_interval(dilation)?),
        None => None,
    };

    let mut record = RunRecord::default();
    let mut keep = |record: &mut RunRecord, snapshot: LoopSnapshot| {
        if let Some(cb) = on_record.as_mut() {
            cb(&snapshot);
        }
        record.snapshots.push(snapshot);
    };

    keep(&mut record, sim.snapshot());

    for step in 1..=opts.ticks {
        let started = Instant::now();

        if let Some(summary) = sim.tick() {
            record.solar_energy_j += summary.solar.energy_j;
            record.ticks_run += 1;
        }

        if step % opts.record_every == 0 {
            keep(&mut record, sim.snapshot());
        }

        if let Some(interval) = interval {
            let spent = started.elapsed();
            match interval.checked_sub(spent) {
                Some(remaining) => thread::sleep(remaining),
                None => warn!(
                    step,
                    spent_ms = spent.as_secs_f64() * 1e3,
                    interval_ms = interval.as_secs_f64() * 1e3,
                    "tick overran its playback interval"
                ),
            }
        }
    }

    // Always record final state
    if opts.ticks % opts.record_every != 0 {
        keep(&mut record, sim.snapshot());
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::LoopParams;

    fn sim() -> LoopSimulation {
        LoopSimulation::new(&LoopParams::default()).unwrap()
    }

    #[test]
    fn run_options_defaults() {
        let opts = RunOptions::default();
        assert_eq!(opts.ticks, 1_000);
        assert_eq!(opts.record_every, 10);
        assert!(opts.time_dilation.is_none());
    }

    #[test]
    fn zero_record_every_rejected() {
        let opts = RunOptions {
            record_every: 0,
            ..RunOptions::default()
        };
        assert!(run(&mut sim(), &opts).is_err());
    }

    #[test]
    fn records_initial_decimated_and_final() {
        let mut sim = sim();
        let opts = RunOptions {
            ticks: 25,
            record_every: 10,
            time_dilation: None,
        };
        let record = run(&mut sim, &opts).unwrap();
        // t = 0, 10, 20 ticks and the final 25th.
        let ticks: Vec<f64> = record.times().iter().map(|t| t / 40.0).collect();
        assert_eq!(ticks.len(), 4);
        assert!((ticks[0]).abs() < 1e-9);
        assert!((ticks[3] - 25.0).abs() < 1e-9);
        assert_eq!(record.ticks_run, 25);
        assert!(record.solar_energy_j > 0.0);
    }

    #[test]
    fn exact_multiple_does_not_duplicate_final() {
        let mut sim = sim();
        let opts = RunOptions {
            ticks: 20,
            record_every: 10,
            time_dilation: None,
        };
        let record = run(&mut sim, &opts).unwrap();
        assert_eq!(record.snapshots.len(), 3);
    }

    #[test]
    fn paused_run_records_unchanged_state() {
        let mut sim = sim();
        sim.set_running(false);
        let opts = RunOptions {
            ticks: 5,
            record_every: 1,
            time_dilation: None,
        };
        let record = run(&mut sim, &opts).unwrap();
        assert_eq!(record.ticks_run, 0);
        assert_eq!(record.snapshots.len(), 6);
        assert!(record.snapshots.iter().all(|s| s == &record.snapshots[0]));
    }

    #[test]
    fn paced_run_uses_dilation() {
        let mut sim = sim();
        // 40 s per tick at 4000x is 10 ms.
        let opts = RunOptions {
            ticks: 3,
            record_every: 1,
            time_dilation: Some(4000.0),
        };
        let started = Instant::now();
        run(&mut sim, &opts).unwrap();
        assert!(started.elapsed().as_millis() >= 25);
    }

    #[test]
    fn progress_sees_every_recorded_snapshot() {
        let mut sim = sim();
        let opts = RunOptions {
            ticks: 7,
            record_every: 3,
            time_dilation: None,
        };
        let mut seen = Vec::new();
        let mut on_record = |s: &LoopSnapshot| seen.push(s.elapsed_s);
        let record = run_with_progress(&mut sim, &opts, Some(&mut on_record)).unwrap();
        assert_eq!(seen, record.times());
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn bad_dilation_rejected() {
        let opts = RunOptions {
            ticks: 1,
            record_every: 1,
            time_dilation: Some(0.0),
        };
        assert!(run(&mut sim(), &opts).is_err());
    }
}
