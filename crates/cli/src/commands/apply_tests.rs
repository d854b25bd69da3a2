use fattr_engine::{AttrFlags, Catalog};

use super::parse_mask;

#[test]
fn set_and_clear_codes_build_the_mask() {
    let catalog = Catalog::full();

    let mask = parse_mask(&catalog, "ia", "d").unwrap();
    assert_eq!(mask.or_mask, AttrFlags::IMMUTABLE | AttrFlags::APPEND);
    assert_eq!(mask.and_mask.bits(), !AttrFlags::NODUMP.bits());

    // Bits without a catalog definition pass through a clear-only mask.
    let exotic = AttrFlags::from_bits_retain(0x0200_0000);
    let clear_only = parse_mask(&catalog, "", "d").unwrap();
    assert_eq!(clear_only.apply(exotic | AttrFlags::NODUMP), exotic);
}

#[test]
fn bad_codes_are_rejected() {
    let catalog = Catalog::full();

    assert!(parse_mask(&catalog, "?", "").is_err(), "unknown code");
    // 'e' (extents) is kernel-owned, shown but not editable.
    assert!(parse_mask(&catalog, "e", "").is_err(), "read-only code");
    assert!(
        parse_mask(&catalog, "i", "i").is_err(),
        "set and clear of the same code"
    );
}
