//! Configuration system for the cache simulator.
//!
//! This module defines the geometry and policy parameters of a simulated
//! cache. It provides:
//! 1. **Defaults:** Conventional file names, output precision, and resource limits.
//! 2. **Structures:** `CacheConfig` with derived block size, set count, and capacity.
//! 3. **Enums:** Allocation and write policies, plus the `CachePolicy` pair the engine matches on.
//!
//! Configuration is read either from the five-line parameter format
//! (associativity, offset bits, index bits, allocation token, write token) or
//! from JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::addr::{ADDRESS_BITS, AddressLayout};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
pub mod defaults {
    /// Parameter file read when none is named.
    pub const CONFIG_FILE: &str = "parameters.txt";

    /// Trace file read when none is named.
    pub const TRACE_FILE: &str = "accesses.txt";

    /// Statistics file written when none is named.
    pub const OUTPUT_FILE: &str = "statistics.txt";

    /// Decimal places used when rendering the hit rate.
    pub const HIT_RATE_PRECISION: usize = 6;

    /// Largest total block count (`sets * ways`) the engine will allocate.
    ///
    /// 2^26 blocks is roughly 1.5 GiB of block state.
    pub const MAX_BLOCKS: u64 = 1 << 26;

    /// Default associativity (direct-mapped).
    pub const WAYS: usize = 1;

    /// Default offset width (64-byte blocks).
    pub const OFFSET_BITS: u32 = 6;

    /// Default index width (64 sets).
    pub const INDEX_BITS: u32 = 6;
}

/// What a write miss does to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum AllocationPolicy {
    /// A write miss fills a block, which starts dirty.
    #[default]
    WriteAllocate,

    /// A write miss goes straight to backing storage; the set is untouched.
    WriteNoAllocate,
}

/// When written data reaches backing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum WritePolicy {
    /// Every write propagates immediately.
    WriteThrough,

    /// Writes propagate when a dirty block is evicted.
    #[default]
    WriteBack,
}

impl AllocationPolicy {
    /// Canonical token for this policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WriteAllocate => "write-allocate",
            Self::WriteNoAllocate => "write-no-allocate",
        }
    }
}

impl WritePolicy {
    /// Canonical token for this policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WriteThrough => "write-through",
            Self::WriteBack => "write-back",
        }
    }
}

impl FromStr for AllocationPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "write-allocate" | "wa" => Ok(Self::WriteAllocate),
            "write-no-allocate" | "wna" => Ok(Self::WriteNoAllocate),
            _ => Err(ConfigError::UnknownAllocationPolicy(s.trim().to_owned())),
        }
    }
}

impl FromStr for WritePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "write-through" | "wt" => Ok(Self::WriteThrough),
            "write-back" | "wb" => Ok(Self::WriteBack),
            _ => Err(ConfigError::UnknownWritePolicy(s.trim().to_owned())),
        }
    }
}

// JSON policy names go through the same token parser as the parameter file.
impl TryFrom<String> for AllocationPolicy {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for WritePolicy {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active allocation and write policies, matched as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CachePolicy {
    /// Behaviour on write miss.
    pub allocation: AllocationPolicy,
    /// Propagation of writes to backing storage.
    pub write: WritePolicy,
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.allocation, self.write)
    }
}

/// Geometry and policy of the simulated cache.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{AllocationPolicy, CacheConfig, WritePolicy};
///
/// let json = r#"{
///     "ways": 4,
///     "offset_bits": 5,
///     "index_bits": 7,
///     "allocation_policy": "write-no-allocate",
///     "write_policy": "wt"
/// }"#;
///
/// let config = CacheConfig::from_json(json).unwrap();
/// assert_eq!(config.num_sets(), 128);
/// assert_eq!(config.block_size(), 32);
/// assert_eq!(config.capacity_bytes(), 16 * 1024);
/// assert_eq!(config.allocation_policy, AllocationPolicy::WriteNoAllocate);
/// assert_eq!(config.write_policy, WritePolicy::WriteThrough);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Associativity (blocks per set).
    pub ways: usize,

    /// Width of the block offset field; block size is `2^offset_bits`.
    pub offset_bits: u32,

    /// Width of the set index field; set count is `2^index_bits`.
    pub index_bits: u32,

    /// Behaviour on write miss.
    pub allocation_policy: AllocationPolicy,

    /// Propagation of writes to backing storage.
    pub write_policy: WritePolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ways: defaults::WAYS,
            offset_bits: defaults::OFFSET_BITS,
            index_bits: defaults::INDEX_BITS,
            allocation_policy: AllocationPolicy::default(),
            write_policy: WritePolicy::default(),
        }
    }
}

/// Parses one numeric parameter line.
fn parse_number<T: FromStr>(field: &'static str, value: Option<&str>) -> Result<T, ConfigError> {
    let value = value.ok_or(ConfigError::Missing(field))?;
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}

impl CacheConfig {
    /// Parses the five-line parameter format and validates the result.
    ///
    /// Lines are trimmed and blank lines skipped. The values are, in order:
    /// associativity, offset bits, index bits, allocation policy token, and
    /// write policy token.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for missing, unparsable, unrecognised or
    /// out-of-range values, or trailing content after the fifth value.
    pub fn from_parameters(text: &str) -> Result<Self, ConfigError> {
        let mut values = text.lines().map(str::trim).filter(|l| !l.is_empty());

        let ways = parse_number("associativity", values.next())?;
        let offset_bits = parse_number("offset bits", values.next())?;
        let index_bits = parse_number("index bits", values.next())?;
        let allocation_policy = values
            .next()
            .ok_or(ConfigError::Missing("allocation policy"))?
            .parse()?;
        let write_policy = values
            .next()
            .ok_or(ConfigError::Missing("write policy"))?
            .parse()?;

        if let Some(extra) = values.next() {
            return Err(ConfigError::TrailingContent(extra.to_owned()));
        }

        let config = Self {
            ways,
            offset_bits,
            index_bits,
            allocation_policy,
            write_policy,
        };
        config.validate()?;
        Ok(config)
    }

    /// Deserializes a JSON configuration and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON, missing fields or
    /// unknown policy names, and the usual validation errors otherwise.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the geometry invariants.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::InvalidWays`] if associativity is zero.
    /// * [`ConfigError::AddressWidthExceeded`] if the offset and index
    ///   fields do not fit in a 64-bit address.
    /// * [`ConfigError::TooManyBlocks`] if `sets * ways` exceeds
    ///   [`defaults::MAX_BLOCKS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ways == 0 {
            return Err(ConfigError::InvalidWays(self.ways));
        }

        let fits = self
            .offset_bits
            .checked_add(self.index_bits)
            .is_some_and(|bits| bits <= ADDRESS_BITS);
        if !fits {
            return Err(ConfigError::AddressWidthExceeded {
                offset_bits: self.offset_bits,
                index_bits: self.index_bits,
                address_bits: ADDRESS_BITS,
            });
        }

        let within_limit = self
            .num_sets()
            .checked_mul(self.ways as u64)
            .is_some_and(|blocks| blocks <= defaults::MAX_BLOCKS);
        if !within_limit {
            return Err(ConfigError::TooManyBlocks {
                sets: self.num_sets(),
                ways: self.ways,
                limit: defaults::MAX_BLOCKS,
            });
        }

        Ok(())
    }

    /// Address layout for this geometry.
    pub const fn layout(&self) -> AddressLayout {
        AddressLayout::new(self.offset_bits, self.index_bits)
    }

    /// The policy pair the engine dispatches on.
    pub const fn policy(&self) -> CachePolicy {
        CachePolicy {
            allocation: self.allocation_policy,
            write: self.write_policy,
        }
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> u64 {
        self.layout().block_size()
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> u64 {
        self.layout().num_sets()
    }

    /// Total data capacity in bytes, saturating.
    pub const fn capacity_bytes(&self) -> u64 {
        self.num_sets()
            .saturating_mul(self.block_size())
            .saturating_mul(self.ways as u64)
    }
}
