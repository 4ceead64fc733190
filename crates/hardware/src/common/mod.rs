//! Common types shared by the cache engine and its drivers.
//!
//! This module provides the building blocks used across the simulator. It includes:
//! 1. **Address Decoding:** Tag/index/offset extraction for a cache geometry.
//! 2. **Memory Access:** The read/write classification of trace records.
//! 3. **Error Handling:** Configuration, trace, and run-level error types.

/// Address layout and tag/index/offset decoding.
pub mod addr;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{ADDRESS_BITS, AddressLayout, DecodedAddress};
pub use data::AccessType;
pub use error::{ConfigError, SimError, TraceError};
