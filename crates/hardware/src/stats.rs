//! Simulation statistics collection and reporting.
//!
//! This module tracks the outcome of a cache simulation run. It provides:
//! 1. **Counters:** Read/write hits and misses, write-backs, and write-throughs.
//! 2. **Reports:** An immutable snapshot with the hit rate over the driver's access count.
//! 3. **Rendering:** The labeled `key: value` text form and a JSON form.

use std::fmt;

use serde::Serialize;

use crate::config::defaults;

/// Running counters of one simulation run.
///
/// Counters only ever increase. The total access count is not kept here;
/// the driver owns it because records it rejects never reach the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads that found their block.
    pub read_hits: u64,
    /// Reads that had to fill a block.
    pub read_misses: u64,
    /// Writes that found their block.
    pub write_hits: u64,
    /// Writes that did not find their block.
    pub write_misses: u64,
    /// Dirty blocks evicted under write-back.
    pub write_backs: u64,
    /// Writes sent straight to backing storage.
    pub write_throughs: u64,
}

impl CacheStats {
    /// Hits of either kind.
    pub const fn hits(&self) -> u64 {
        self.read_hits + self.write_hits
    }

    /// Misses of either kind.
    pub const fn misses(&self) -> u64 {
        self.read_misses + self.write_misses
    }

    /// Accesses the engine has classified.
    pub const fn lookups(&self) -> u64 {
        self.hits() + self.misses()
    }

    /// Freezes the counters into a report over `total_accesses`.
    ///
    /// # Arguments
    ///
    /// * `total_accesses` - Records the driver accepted and replayed.
    pub const fn report(&self, total_accesses: u64) -> StatsReport {
        let hit_rate = if total_accesses == 0 {
            0.0
        } else {
            self.hits() as f64 / total_accesses as f64
        };
        StatsReport {
            read_hits: self.read_hits,
            write_hits: self.write_hits,
            read_misses: self.read_misses,
            write_misses: self.write_misses,
            write_backs: self.write_backs,
            write_throughs: self.write_throughs,
            total_accesses,
            hit_rate,
        }
    }
}

/// Immutable snapshot handed to the output sink.
///
/// With zero accesses the hit rate is undefined; it is reported as `0.0`
/// and [`StatsReport::is_degenerate`] returns `true`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StatsReport {
    /// Reads that found their block.
    pub read_hits: u64,
    /// Writes that found their block.
    pub write_hits: u64,
    /// Reads that had to fill a block.
    pub read_misses: u64,
    /// Writes that did not find their block.
    pub write_misses: u64,
    /// Dirty blocks evicted under write-back.
    pub write_backs: u64,
    /// Writes sent straight to backing storage.
    pub write_throughs: u64,
    /// Accesses the hit rate is computed over.
    pub total_accesses: u64,
    /// `(read_hits + write_hits) / total_accesses`, or `0.0` with no accesses.
    pub hit_rate: f64,
}

impl StatsReport {
    /// Whether no accesses were processed and the hit rate is a sentinel.
    pub const fn is_degenerate(&self) -> bool {
        self.total_accesses == 0
    }

    /// Renders the report as labeled lines with `precision` decimal places
    /// for the hit rate.
    ///
    /// ```text
    /// rhits: 0
    /// whits: 1
    /// rmisses: 3
    /// wmisses: 0
    /// hrate: .25
    /// wb: 1
    /// wt: 0
    /// ```
    pub fn render(&self, precision: usize) -> String {
        format!("{self:.precision$}")
    }

    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which plain numeric fields do not
    /// produce in practice.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(defaults::HIT_RATE_PRECISION);
        writeln!(f, "rhits: {}", self.read_hits)?;
        writeln!(f, "whits: {}", self.write_hits)?;
        writeln!(f, "rmisses: {}", self.read_misses)?;
        writeln!(f, "wmisses: {}", self.write_misses)?;
        writeln!(f, "hrate: {}", format_rate(self.hit_rate, precision))?;
        writeln!(f, "wb: {}", self.write_backs)?;
        writeln!(f, "wt: {}", self.write_throughs)
    }
}

/// Formats `rate` in fixed-point with at most `precision` decimals.
///
/// Trailing zeros are trimmed, and the `.` goes with them when no fraction
/// is left. A zero integer part is not printed, so `0.5` becomes `.5`,
/// `1.0` becomes `1` and `0.0` stays `0`. Never exponential.
pub fn format_rate(rate: f64, precision: usize) -> String {
    let mut text = format!("{rate:.precision$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text.starts_with("0.") {
        let _ = text.remove(0);
    }
    text
}
