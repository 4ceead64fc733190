//! Set-Associative Cache Engine.
//!
//! This module implements the trace-driven cache model. It owns an array of
//! sets with round-robin replacement, the active allocation/write policy pair,
//! and the running statistics. One call to [`CacheEngine::access`] fully
//! resolves one trace record: lookup, counters, and any fill or eviction.

/// Single block state (valid, dirty, tag).
pub mod block;

/// Associative set with round-robin victim rotation.
pub mod set;

pub use self::block::CacheBlock;
pub use self::set::CacheSet;

use tracing::{debug, info, trace};

use crate::common::addr::{AddressLayout, DecodedAddress};
use crate::common::data::AccessType;
use crate::common::error::ConfigError;
use crate::config::{AllocationPolicy, CacheConfig, CachePolicy, WritePolicy};
use crate::stats::{CacheStats, StatsReport};

/// Whether an access found its block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The tag was present and valid in its set.
    Hit,
    /// The tag was absent; a fill may or may not have followed.
    Miss,
}

impl AccessOutcome {
    /// `true` for [`AccessOutcome::Hit`].
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// Cache simulator for one run.
///
/// Counters are monotonic and there is no reset; a new run needs a new
/// engine. All state is owned and mutated through `&mut self`, one access at
/// a time.
#[derive(Debug)]
pub struct CacheEngine {
    sets: Vec<CacheSet>,
    layout: AddressLayout,
    policy: CachePolicy,
    stats: CacheStats,
}

impl CacheEngine {
    /// Creates an engine with every block invalid.
    ///
    /// # Arguments
    ///
    /// * `config` - Geometry and policies; validated here.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`CacheConfig::validate`].
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let layout = config.layout();
        let policy = config.policy();
        // Bounded by MAX_BLOCKS after validation.
        let num_sets = layout.num_sets() as usize;

        info!(
            ways = config.ways,
            sets = num_sets,
            block_size = layout.block_size(),
            capacity = config.capacity_bytes(),
            tag_bits = layout.tag_bits(),
            %policy,
            "cache configured"
        );

        Ok(Self {
            sets: (0..num_sets).map(|_| CacheSet::new(config.ways)).collect(),
            layout,
            policy,
            stats: CacheStats::default(),
        })
    }

    /// Replays one access.
    ///
    /// Reads count a hit or fill a clean block. Writes count a write-through
    /// first when the policy is write-through, then either dirty the hit
    /// block or handle the miss as the allocation policy dictates.
    ///
    /// # Arguments
    ///
    /// * `kind` - Read or write.
    /// * `addr` - Byte address; any 64-bit value is valid.
    pub fn access(&mut self, kind: AccessType, addr: u64) -> AccessOutcome {
        let DecodedAddress { tag, index, .. } = self.layout.decode(addr);
        let index = index as usize;

        let outcome = match kind {
            AccessType::Read => self.read(index, tag),
            AccessType::Write => self.write(index, tag),
        };

        trace!("{kind} {addr:#x} set={index} tag={tag:#x} {outcome:?}");
        outcome
    }

    fn read(&mut self, index: usize, tag: u64) -> AccessOutcome {
        if self.sets[index].lookup(tag).is_some() {
            self.stats.read_hits += 1;
            return AccessOutcome::Hit;
        }

        self.stats.read_misses += 1;
        self.fill(index, tag, AccessType::Read);
        AccessOutcome::Miss
    }

    fn write(&mut self, index: usize, tag: u64) -> AccessOutcome {
        if self.policy.write == WritePolicy::WriteThrough {
            self.stats.write_throughs += 1;
        }

        // Dirty is tracked on every write hit, write-through included.
        if let Some(block) = self.sets[index].lookup_mut(tag) {
            block.mark_dirty();
            self.stats.write_hits += 1;
            return AccessOutcome::Hit;
        }

        self.stats.write_misses += 1;
        match (self.policy.allocation, self.policy.write) {
            (AllocationPolicy::WriteAllocate, _) => self.fill(index, tag, AccessType::Write),
            (AllocationPolicy::WriteNoAllocate, WritePolicy::WriteBack) => {
                // No line is filled, so the write goes straight to memory.
                self.stats.write_throughs += 1;
            }
            (AllocationPolicy::WriteNoAllocate, WritePolicy::WriteThrough) => {}
        }
        AccessOutcome::Miss
    }

    /// Allocates `tag` into set `index`, counting a write-back if a dirty
    /// block is evicted under write-back.
    fn fill(&mut self, index: usize, tag: u64, kind: AccessType) {
        let evicted_dirty = self.sets[index].allocate(tag, kind);
        if evicted_dirty && self.policy.write == WritePolicy::WriteBack {
            self.stats.write_backs += 1;
            debug!(set = index, new_tag = tag, "dirty block written back");
        }
    }

    /// Checks if the cache holds the block containing `addr`.
    pub fn contains(&self, addr: u64) -> bool {
        let DecodedAddress { tag, index, .. } = self.layout.decode(addr);
        self.sets[index as usize].lookup(tag).is_some()
    }

    /// Running counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Snapshot of the counters over `total_accesses`.
    pub const fn report(&self, total_accesses: u64) -> StatsReport {
        self.stats.report(total_accesses)
    }

    /// Active allocation/write policy pair.
    pub const fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Address layout used to decode accesses.
    pub const fn layout(&self) -> AddressLayout {
        self.layout
    }

    /// All sets, indexed by set number.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// The set at `index`, if it exists.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }
}
