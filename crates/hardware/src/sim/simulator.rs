//! Trace replay driver.
//!
//! This module folds a trace over a [`CacheEngine`]. It performs:
//! 1. **Accounting:** Counts accepted records, which the hit rate is computed over.
//! 2. **Error policy:** Skips malformed records or aborts on the first one.
//! 3. **Reporting:** Produces the final [`StatsReport`].

use std::io::BufRead;

use tracing::{info, warn};

use super::trace::{TraceReader, TraceRecord};
use crate::cache::{AccessOutcome, CacheEngine};
use crate::common::error::{ConfigError, TraceError};
use crate::config::CacheConfig;
use crate::stats::StatsReport;

/// What to do with a malformed trace record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceMode {
    /// Log the record, leave it uncounted, and continue.
    #[default]
    Skip,
    /// Abort the run with the parse error.
    Strict,
}

/// One simulation run: an engine plus the driver-side access count.
#[derive(Debug)]
pub struct Simulator {
    engine: CacheEngine,
    mode: TraceMode,
    total_accesses: u64,
    skipped: u64,
}

impl Simulator {
    /// Builds the engine for `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] if the configuration is invalid.
    pub fn new(config: &CacheConfig, mode: TraceMode) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: CacheEngine::new(config)?,
            mode,
            total_accesses: 0,
            skipped: 0,
        })
    }

    /// Replays a single accepted record.
    pub fn step(&mut self, record: TraceRecord) -> AccessOutcome {
        self.total_accesses += 1;
        self.engine.access(record.kind, record.addr)
    }

    /// Replays a stream of parsed records and logs the totals.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error, or the first malformed record in
    /// [`TraceMode::Strict`]. State up to that point is kept.
    pub fn replay<I>(&mut self, records: I) -> Result<(), TraceError>
    where
        I: IntoIterator<Item = Result<TraceRecord, TraceError>>,
    {
        for record in records {
            match record {
                Ok(record) => {
                    let _ = self.step(record);
                }
                Err(err @ TraceError::Malformed { .. }) if self.mode == TraceMode::Skip => {
                    warn!("skipping {err}");
                    self.skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }
        info!(
            accesses = self.total_accesses,
            skipped = self.skipped,
            "trace replayed"
        );
        Ok(())
    }

    /// Replays a whole trace and reports.
    ///
    /// # Errors
    ///
    /// See [`Simulator::replay`].
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<StatsReport, TraceError> {
        self.replay(TraceReader::new(reader))?;
        Ok(self.report())
    }

    /// Snapshot of the statistics so far.
    pub fn report(&self) -> StatsReport {
        let report = self.engine.report(self.total_accesses);
        if report.is_degenerate() {
            warn!("no accesses processed; hit rate reported as 0");
        }
        report
    }

    /// The underlying engine.
    pub const fn engine(&self) -> &CacheEngine {
        &self.engine
    }

    /// Records replayed so far.
    pub const fn total_accesses(&self) -> u64 {
        self.total_accesses
    }

    /// Malformed records skipped so far.
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }
}
