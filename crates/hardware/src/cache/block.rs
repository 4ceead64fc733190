//! Cache block state.

use crate::common::data::AccessType;

/// One storage slot of a set: validity, dirty bit, and tag.
///
/// No data is modelled. A block starts invalid, clean, with tag 0, and is
/// never invalidated once filled; refills overwrite tag and dirty bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheBlock {
    valid: bool,
    dirty: bool,
    tag: u64,
}

impl CacheBlock {
    /// Whether the block holds a line.
    #[inline(always)]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the block holds data not yet written to backing storage.
    #[inline(always)]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Tag of the held line. Meaningless while invalid.
    #[inline(always)]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Whether this block is valid and holds `tag`.
    #[inline(always)]
    pub const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Sets the dirty bit after a write hit.
    #[inline(always)]
    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Refills the block with `tag`.
    ///
    /// Returns `true` if the previous contents were valid and dirty, i.e. the
    /// refill evicts data that backing storage has not seen. A read fill is
    /// always clean; a write fill is always dirty.
    pub const fn fill(&mut self, tag: u64, kind: AccessType) -> bool {
        let evicted_dirty = self.valid && self.dirty;
        self.valid = true;
        self.dirty = matches!(kind, AccessType::Write);
        self.tag = tag;
        evicted_dirty
    }
}
