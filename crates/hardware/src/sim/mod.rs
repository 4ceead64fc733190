//! Simulation driver: input loading, trace replay, and statistics output.

/// Configuration and trace file loading.
pub mod loader;
/// Statistics rendering and file output.
pub mod output;
/// Trace replay driver.
pub mod simulator;
/// Trace record parsing.
pub mod trace;

use std::path::Path;

pub use output::OutputFormat;
pub use simulator::{Simulator, TraceMode};
pub use trace::{TraceReader, TraceRecord};

use crate::common::error::SimError;
use crate::stats::StatsReport;

/// Runs a whole simulation from a configuration file and a trace file.
///
/// Configuration errors abort before the trace is opened; trace errors
/// abort before any report exists.
///
/// # Errors
///
/// Returns a [`SimError`] naming the stage that failed.
pub fn run_files(config: &Path, trace: &Path, mode: TraceMode) -> Result<StatsReport, SimError> {
    let config = loader::load_config(config)?;
    let mut sim = Simulator::new(&config, mode)?;
    sim.replay(loader::open_trace(trace)?)?;
    Ok(sim.report())
}
