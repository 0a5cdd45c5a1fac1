//! Address Decomposition Tests.
//!
//! Layout, from the least-significant bit: `b` offset bits, `s` set bits, tag.

use csim_core::common::DecodedAddr;
use csim_core::config::Geometry;
use rstest::rstest;

#[rstest]
#[case::scenario_a_set0(1, 1, 0x0, 0, 0, 0)]
#[case::scenario_a_set1(1, 1, 0x2, 0, 1, 0)]
#[case::offset_only(1, 1, 0x1, 1, 0, 0)]
#[case::tag_above_fields(1, 1, 0x4, 0, 0, 1)]
#[case::lab_geometry(4, 4, 0x7ff0005c8, 0x8, 0xc, 0x7ff0005)]
#[case::no_set_bits(0, 4, 0x123, 0x3, 0, 0x12)]
#[case::no_offset_bits(4, 0, 0x123, 0, 0x3, 0x12)]
fn splits_address(
    #[case] s: u32,
    #[case] b: u32,
    #[case] addr: u64,
    #[case] offset: u64,
    #[case] set: usize,
    #[case] tag: u64,
) {
    let geometry = Geometry::new(s, 1, b).unwrap();
    let decoded = DecodedAddr::new(addr, &geometry);

    assert_eq!(decoded, DecodedAddr { offset, set, tag });
}

/// With `s + b == 64` every bit is consumed by offset and set; the tag is 0.
#[test]
fn full_width_fields_leave_empty_tag() {
    let geometry = Geometry::new(0, 1, 64).unwrap();
    let decoded = DecodedAddr::new(u64::MAX, &geometry);
    assert_eq!(decoded.offset, u64::MAX);
    assert_eq!(decoded.set, 0);
    assert_eq!(decoded.tag, 0);

    let geometry = Geometry::new(32, 1, 32).unwrap();
    let decoded = DecodedAddr::new(0xdead_beef_0000_1234, &geometry);
    assert_eq!(decoded.offset, 0x1234);
    assert_eq!(decoded.set, 0xdead_beef);
    assert_eq!(decoded.tag, 0);
}

/// Neither offset nor set bits: the whole address is the tag.
#[test]
fn zero_width_fields_use_whole_address_as_tag() {
    let geometry = Geometry::new(0, 1, 0).unwrap();
    let decoded = DecodedAddr::new(0xffff_ffff_ffff_fff0, &geometry);
    assert_eq!(decoded.offset, 0);
    assert_eq!(decoded.set, 0);
    assert_eq!(decoded.tag, 0xffff_ffff_ffff_fff0);
}

/// Addresses inside one block share set and tag.
#[test]
fn same_block_same_set_and_tag() {
    let geometry = Geometry::new(4, 1, 4).unwrap();
    let first = DecodedAddr::new(0x20, &geometry);
    let last = DecodedAddr::new(0x2f, &geometry);
    assert_eq!((first.set, first.tag), (last.set, last.tag));
    assert_ne!(first.offset, last.offset);
}
