//! Statistics output.
//!
//! The report is rendered in full before anything touches the destination,
//! so a failed run never leaves an empty or truncated statistics file.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::common::error::SimError;
use crate::stats::StatsReport;

/// Rendering of the statistics file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `key: value` lines (`rhits`, `whits`, `rmisses`, `wmisses`, `hrate`, `wb`, `wt`).
    #[default]
    Text,
    /// Pretty-printed JSON object.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

/// Renders `report` in `format`.
///
/// # Arguments
///
/// * `precision` - Decimal places for the hit rate in the text form.
///
/// # Errors
///
/// Returns [`SimError::Serialize`] if JSON serialization fails.
pub fn render(
    report: &StatsReport,
    format: OutputFormat,
    precision: usize,
) -> Result<String, SimError> {
    match format {
        OutputFormat::Text => Ok(report.render(precision)),
        OutputFormat::Json => {
            let mut json = report.to_json()?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Renders `report` and writes it to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`SimError::Output`] if the file cannot be written.
pub fn write_report(
    path: &Path,
    report: &StatsReport,
    format: OutputFormat,
    precision: usize,
) -> Result<(), SimError> {
    let contents = render(report, format, precision)?;
    fs::write(path, contents).map_err(|source| SimError::Output {
        path: path.to_path_buf(),
        source,
    })
}
