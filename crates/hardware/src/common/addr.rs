//! Address decomposition.
//!
//! This module splits 64-bit addresses into the three fields a set-associative
//! cache indexes by. It provides the following:
//! 1. **Layout:** The offset/index bit widths and their derived masks.
//! 2. **Decoding:** Bit-exact extraction of tag, set index, and block offset.
//! 3. **Geometry:** Block size and set count derived from the bit widths.

/// Width of a simulated address in bits.
pub const ADDRESS_BITS: u32 = u64::BITS;

/// An address split into its cache fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// Upper bits identifying which block a set holds.
    pub tag: u64,
    /// Set selector.
    pub index: u64,
    /// Byte within the block. Decoded but never used for lookup.
    pub offset: u64,
}

/// Bit layout of an address for a given cache geometry.
///
/// `offset_bits + index_bits` must not exceed [`ADDRESS_BITS`]; the
/// configuration layer rejects layouts that do before one is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    offset_bits: u32,
    index_bits: u32,
    offset_mask: u64,
    index_mask: u64,
}

/// Returns a mask with the low `bits` bits set.
#[inline(always)]
const fn low_mask(bits: u32) -> u64 {
    if bits >= ADDRESS_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Logical right shift that yields 0 once every bit has been shifted out.
#[inline(always)]
const fn shr(value: u64, bits: u32) -> u64 {
    if bits >= ADDRESS_BITS { 0 } else { value >> bits }
}

impl AddressLayout {
    /// Creates a layout from the offset and index field widths.
    ///
    /// # Arguments
    ///
    /// * `offset_bits` - Width of the block offset field.
    /// * `index_bits` - Width of the set index field.
    pub const fn new(offset_bits: u32, index_bits: u32) -> Self {
        Self {
            offset_bits,
            index_bits,
            offset_mask: low_mask(offset_bits),
            index_mask: low_mask(index_bits),
        }
    }

    /// Width of the block offset field.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the set index field.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the tag field.
    pub const fn tag_bits(&self) -> u32 {
        ADDRESS_BITS.saturating_sub(self.offset_bits.saturating_add(self.index_bits))
    }

    /// Mask selecting the block offset.
    pub const fn offset_mask(&self) -> u64 {
        self.offset_mask
    }

    /// Mask selecting the set index once the offset has been shifted out.
    pub const fn index_mask(&self) -> u64 {
        self.index_mask
    }

    /// Block size in bytes, saturating at `u64::MAX` for a 64-bit offset.
    pub const fn block_size(&self) -> u64 {
        self.offset_mask.saturating_add(1)
    }

    /// Number of sets, saturating at `u64::MAX` for a 64-bit index.
    pub const fn num_sets(&self) -> u64 {
        self.index_mask.saturating_add(1)
    }

    /// Splits `addr` into tag, index, and offset.
    ///
    /// Every input is valid. All shifts are logical so no sign bits leak
    /// into the tag.
    #[inline(always)]
    pub const fn decode(&self, addr: u64) -> DecodedAddress {
        DecodedAddress {
            tag: shr(addr, self.offset_bits.saturating_add(self.index_bits)),
            index: shr(addr, self.offset_bits) & self.index_mask,
            offset: addr & self.offset_mask,
        }
    }
}
