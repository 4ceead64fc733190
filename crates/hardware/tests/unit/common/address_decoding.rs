//! Address decoding tests.
//!
//! Verifies bit-exact tag/index/offset extraction, including the degenerate
//! zero-width layouts and layouts that consume the full 64 bits.

use cachesim_core::common::{AddressLayout, DecodedAddress};
use rstest::rstest;

#[test]
fn masks_and_geometry() {
    let layout = AddressLayout::new(4, 3);
    assert_eq!(layout.offset_mask(), 0xF);
    assert_eq!(layout.index_mask(), 0x7);
    assert_eq!(layout.block_size(), 16);
    assert_eq!(layout.num_sets(), 8);
    assert_eq!(layout.tag_bits(), 57);
}

#[test]
fn decode_splits_fields() {
    // 0xB6D = 0b1011_0110_1101 with 4 offset bits and 3 index bits:
    // offset = 0b1101, index = 0b110, tag = 0b1_0110
    let layout = AddressLayout::new(4, 3);
    let addr = 0xB6D;
    assert_eq!(
        layout.decode(addr),
        DecodedAddress {
            tag: addr >> 7,
            index: (addr >> 4) & 0x7,
            offset: addr & 0xF,
        }
    );
    assert_eq!(layout.decode(addr).offset, 0xD);
    assert_eq!(layout.decode(addr).index, 0x6);
    assert_eq!(layout.decode(addr).tag, 0x16);
}

#[test]
fn zero_width_layout_is_single_set_single_byte_blocks() {
    let layout = AddressLayout::new(0, 0);
    assert_eq!(layout.block_size(), 1);
    assert_eq!(layout.num_sets(), 1);

    let decoded = layout.decode(0xDEAD_BEEF);
    assert_eq!(decoded.offset, 0);
    assert_eq!(decoded.index, 0);
    assert_eq!(decoded.tag, 0xDEAD_BEEF);
}

#[test]
fn high_bit_does_not_sign_extend() {
    let layout = AddressLayout::new(2, 1);
    let decoded = layout.decode(0x8000_0000_0000_0000);
    assert_eq!(decoded.tag, 0x1000_0000_0000_0000);
    assert_eq!(decoded.index, 0);
    assert_eq!(decoded.offset, 0);

    let decoded = layout.decode(u64::MAX);
    assert_eq!(decoded.tag, u64::MAX >> 3);
    assert_eq!(decoded.index, 1);
    assert_eq!(decoded.offset, 3);
}

#[rstest]
#[case(64, 0, 0, 0x0123_4567_89AB_CDEF)]
#[case(0, 64, 0x0123_4567_89AB_CDEF, 0)]
#[case(32, 32, 0x0123_4567, 0x89AB_CDEF)]
fn full_width_layout_leaves_empty_tag(
    #[case] offset_bits: u32,
    #[case] index_bits: u32,
    #[case] index: u64,
    #[case] offset: u64,
) {
    let layout = AddressLayout::new(offset_bits, index_bits);
    assert_eq!(layout.tag_bits(), 0);

    let decoded = layout.decode(0x0123_4567_89AB_CDEF);
    assert_eq!(decoded.tag, 0);
    assert_eq!(decoded.index, index);
    assert_eq!(decoded.offset, offset);
}

#[rstest]
#[case(0x0, 0, 0)]
#[case(0x4, 1, 0)]
#[case(0x8, 0, 1)]
#[case(0xC, 1, 1)]
fn scenario_geometry_mapping(#[case] addr: u64, #[case] index: u64, #[case] tag: u64) {
    // 4-byte blocks, 2 sets.
    let decoded = AddressLayout::new(2, 1).decode(addr);
    assert_eq!(decoded.index, index);
    assert_eq!(decoded.tag, tag);
}
