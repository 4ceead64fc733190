//! Trace-driven set-associative cache simulator library.
//!
//! This crate models a single cache level under a replayed access trace:
//! 1. **Common:** Address decoding, access kinds, and error types.
//! 2. **Config:** Geometry (ways, offset/index widths) and the allocation/write policy pair.
//! 3. **Cache:** Blocks, sets with round-robin replacement, and the access engine.
//! 4. **Stats:** Running counters and the final report.
//! 5. **Simulation:** Configuration/trace loading, replay, and statistics output.

/// Common types (address layout, access types, errors).
pub mod common;
/// Cache geometry and policy configuration.
pub mod config;
/// Cache engine (blocks, sets, access state machine).
pub mod cache;
/// Simulation driver (loader, trace reader, replay, output).
pub mod sim;
/// Statistics counters and reports.
pub mod stats;

/// Engine for one simulation run; construct with `CacheEngine::new`.
pub use crate::cache::CacheEngine;
/// Geometry and policy; parse with `CacheConfig::from_parameters` or `from_json`.
pub use crate::config::CacheConfig;
/// Read or write access.
pub use crate::common::AccessType;
/// Trace replay driver owning the total access count.
pub use crate::sim::Simulator;
/// Final statistics snapshot.
pub use crate::stats::StatsReport;
