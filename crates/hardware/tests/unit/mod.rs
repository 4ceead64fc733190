//! # Unit Components
//!
//! Tests organised by simulator module: address decoding, configuration,
//! the cache engine, statistics, and the simulation driver.



/// Blocks, sets, and the access state machine under all four policy pairs.
pub mod cache;


/// Trace parsing, loading, replay, and output.
pub mod sim;
