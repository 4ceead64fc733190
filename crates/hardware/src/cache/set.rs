//! Associative Set with Round-Robin Replacement.
//!
//! A set holds a fixed number of ways and a single victim pointer. The
//! pointer advances by one on every allocation into the set, whichever way
//! was last hit, so blocks are replaced strictly in fill order.
//!
//! # Performance
//!
//! - `lookup()`: O(W) where W is the associativity
//! - `allocate()`: O(1)
//! - **Hardware Cost:** one counter per set

use super::block::CacheBlock;
use crate::common::data::AccessType;

/// A group of `ways` blocks sharing one set index.
#[derive(Clone, Debug)]
pub struct CacheSet {
    blocks: Box<[CacheBlock]>,
    next_victim: usize,
}

impl CacheSet {
    /// Creates a set of `ways` invalid blocks.
    ///
    /// `ways` must be at least 1; the engine only builds sets from a
    /// validated configuration.
    pub fn new(ways: usize) -> Self {
        Self {
            blocks: vec![CacheBlock::default(); ways].into_boxed_slice(),
            next_victim: 0,
        }
    }

    /// Associativity of this set.
    pub fn ways(&self) -> usize {
        self.blocks.len()
    }

    /// All blocks, in way order.
    pub fn blocks(&self) -> &[CacheBlock] {
        &self.blocks
    }

    /// Way that the next allocation will overwrite.
    pub const fn next_victim(&self) -> usize {
        self.next_victim
    }

    /// Number of valid blocks.
    pub fn occupancy(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_valid()).count()
    }

    /// Returns the way holding `tag`, if any.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.blocks.iter().position(|b| b.matches(tag))
    }

    /// Returns the valid block holding `tag`, if any.
    pub fn lookup(&self, tag: u64) -> Option<&CacheBlock> {
        self.blocks.iter().find(|b| b.matches(tag))
    }

    /// Returns the valid block holding `tag` for update, if any.
    pub fn lookup_mut(&mut self, tag: u64) -> Option<&mut CacheBlock> {
        self.blocks.iter_mut().find(|b| b.matches(tag))
    }

    /// Fills the victim way with `tag` and advances the victim pointer.
    ///
    /// Returns `true` if the overwritten block was valid and dirty. Whether
    /// that counts as a write-back is the caller's decision.
    pub fn allocate(&mut self, tag: u64, kind: AccessType) -> bool {
        let way = self.next_victim;
        let evicted_dirty = self.blocks[way].fill(tag, kind);
        self.next_victim = (way + 1) % self.blocks.len();
        evicted_dirty
    }
}
