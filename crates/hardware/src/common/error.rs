//! Error definitions.
//!
//! This module defines the error types surfaced by the simulator. It provides:
//! 1. **Configuration Errors:** Invalid or missing geometry and policy values.
//! 2. **Trace Errors:** Malformed access records and trace I/O failures.
//! 3. **Run Errors:** A top-level error naming the stage that failed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid or missing cache configuration.
///
/// Always fatal: the engine is never constructed from a configuration
/// that produced one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Associativity below one.
    #[error("associativity must be at least 1, got {0}")]
    InvalidWays(usize),

    /// Offset and index fields do not fit in an address.
    #[error(
        "offset bits ({offset_bits}) + index bits ({index_bits}) exceed the {address_bits}-bit address width"
    )]
    AddressWidthExceeded {
        /// Requested offset width.
        offset_bits: u32,
        /// Requested index width.
        index_bits: u32,
        /// Width of a simulated address.
        address_bits: u32,
    },

    /// Geometry needs more blocks than the simulator will allocate.
    #[error("geometry of {sets} sets x {ways} ways exceeds the limit of {limit} blocks")]
    TooManyBlocks {
        /// Requested set count.
        sets: u64,
        /// Requested associativity.
        ways: usize,
        /// Largest block count accepted.
        limit: u64,
    },

    /// Allocation policy token not recognised.
    #[error("unknown allocation policy '{0}' (expected write-allocate/wa or write-no-allocate/wna)")]
    UnknownAllocationPolicy(String),

    /// Write policy token not recognised.
    #[error("unknown write policy '{0}' (expected write-through/wt or write-back/wb)")]
    UnknownWritePolicy(String),

    /// A required value was absent.
    #[error("missing value for {0}")]
    Missing(&'static str),

    /// A numeric value could not be parsed.
    #[error("invalid value '{value}' for {field}")]
    InvalidNumber {
        /// Which value was being read.
        field: &'static str,
        /// The text that failed to parse.
        value: String,
    },

    /// Extra non-blank lines after the five configuration values.
    #[error("unexpected trailing content '{0}'")]
    TrailingContent(String),

    /// JSON configuration did not deserialize.
    #[error("malformed JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

/// Failure while reading the access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A record that cannot be interpreted as `<r|w> <hex address>`.
    #[error("line {line}: malformed record '{record}': {reason}")]
    Malformed {
        /// 1-based line number in the trace.
        line: usize,
        /// The offending line, trimmed.
        record: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// Trace file could not be opened.
    #[error("cannot open '{path}': {source}")]
    Open {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// Read failure part way through the trace.
    #[error("read failed after line {line}: {source}")]
    Io {
        /// Last line read successfully.
        line: usize,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

/// Top-level failure of a simulation run, tagged with the failing stage.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration stage failed; nothing was simulated.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The trace stage failed; no report is produced.
    #[error("trace error: {0}")]
    Trace(#[from] TraceError),

    /// The statistics could not be written.
    #[error("output error: cannot write '{path}': {source}")]
    Output {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The statistics could not be serialized.
    #[error("output error: {0}")]
    Serialize(#[from] serde_json::Error),
}
