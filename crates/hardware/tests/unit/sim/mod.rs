//! Simulation driver tests.

/// Trace record parsing and the line-numbering reader.
pub mod trace;



/// Rendering and writing the statistics file.
pub mod output;
