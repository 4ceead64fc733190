//! Configuration and trace loading.
//!
//! This module opens the simulator's input files. It performs:
//! 1. **Configuration:** Reads the parameter file, as JSON when the extension is `.json`.
//! 2. **Trace:** Opens the access trace as a buffered [`TraceReader`].

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use super::trace::TraceReader;
use crate::common::error::{ConfigError, TraceError};
use crate::config::CacheConfig;

/// Whether `path` names a JSON configuration.
fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Loads and validates a cache configuration from disk.
///
/// # Arguments
///
/// * `path` - A `.json` file, or a five-line parameter file otherwise.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, and the parse or
/// validation error otherwise.
pub fn load_config(path: &Path) -> Result<CacheConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if is_json(path) {
        CacheConfig::from_json(&text)
    } else {
        CacheConfig::from_parameters(&text)
    }
}

/// Opens an access trace for reading.
///
/// # Errors
///
/// Returns [`TraceError::Open`] if the file cannot be opened.
pub fn open_trace(path: &Path) -> Result<TraceReader<BufReader<File>>, TraceError> {
    let file = File::open(path).map_err(|source| TraceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TraceReader::new(BufReader::new(file)))
}
