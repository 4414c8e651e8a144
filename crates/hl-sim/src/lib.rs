//! Discrete-node thermal simulation of a solar hydronic loop.
//!
//! Provides:
//! - Loop topology: four node chains (collector, upper pipe, tank, lower pipe)
//! - Pump transport by one node volume per tick
//! - Inversion mixing of the stratified tank
//! - Lumped solar heating of the collector
//! - Explicit vertical conduction inside the tank
//! - Tick orchestrator gated by run and pump flags
//! - Fixed-tick driver with decimated recording

pub mod chain;
pub mod conduction;
pub mod driver;
pub mod error;
pub mod mixing;
pub mod params;
pub mod pump;
pub mod sim;
pub mod snapshot;
pub mod solar;

pub use chain::LoopChains;
pub use driver::{RunOptions, RunRecord, run, run_with_progress};
pub use error::{SimError, SimResult};
pub use params::{LoopConstants, LoopParams, PIPE_NODES_DEFAULT, STABILITY_LIMIT};
pub use sim::{LoopSimulation, TickSummary};
pub use snapshot::LoopSnapshot;
pub use solar::SolarGain;
