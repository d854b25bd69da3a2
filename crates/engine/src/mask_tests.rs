use super::*;
use crate::catalog::Catalog;

fn model_ia() -> (Catalog, SelectionModel) {
    let catalog = Catalog::supported(AttrFlags::IMMUTABLE | AttrFlags::APPEND);
    let mut model = SelectionModel::new(&catalog);
    model.load_flags(AttrFlags::empty());
    (catalog, model)
}

#[test]
fn compile_is_pure_and_deterministic() {
    let (_, mut model) = model_ia();
    model.toggle_checked(0);
    model.toggle_bulk(0);
    model.toggle_bulk(1);

    for mode in [
        BulkMode::SetAll,
        BulkMode::SetMarked,
        BulkMode::ForceSetMarked,
        BulkMode::ClearMarked,
    ] {
        let first = compile_mask(&model, mode);
        let second = compile_mask(&model, mode);
        assert_eq!(first, second, "mode {:?}", mode);
    }
}

#[test]
fn set_marked_respects_checked_state() {
    // Check 'i', bulk-select 'i' only, commit SetMarked.
    let (_, mut model) = model_ia();
    model.toggle_checked(0);
    model.toggle_bulk(0);

    let mask = compile_mask(&model, BulkMode::SetMarked);
    assert_eq!(mask.and_mask.bits(), !0);
    assert_eq!(mask.or_mask, AttrFlags::IMMUTABLE);
    assert_eq!(mask.apply(AttrFlags::empty()), AttrFlags::IMMUTABLE);
}

#[test]
fn set_marked_clears_unchecked_participants() {
    let (_, mut model) = model_ia();
    // 'a' is set on the file; uncheck it and bulk-select it.
    model.load_flags(AttrFlags::APPEND);
    model.toggle_checked(1);
    model.toggle_bulk(1);

    let mask = compile_mask(&model, BulkMode::SetMarked);
    assert_eq!(mask.and_mask.bits(), !AttrFlags::APPEND.bits());
    assert_eq!(mask.or_mask, AttrFlags::empty());
}

#[test]
fn clear_marked_ignores_checked_state() {
    // Bulk-select 'a' only; files carry 0x20.
    let (_, mut model) = model_ia();
    model.toggle_bulk(1);

    for checked in [false, true] {
        if checked {
            model.load_flags(AttrFlags::APPEND);
        } else {
            model.load_flags(AttrFlags::empty());
        }

        let mask = compile_mask(&model, BulkMode::ClearMarked);
        assert_eq!(
            mask.and_mask.bits(),
            !AttrFlags::APPEND.bits(),
            "checked={checked}"
        );
        assert_eq!(mask.or_mask, AttrFlags::empty());
        assert_eq!(mask.apply(AttrFlags::APPEND), AttrFlags::empty());
    }
}

#[test]
fn force_set_marked_ignores_checked_state() {
    let (_, mut model) = model_ia();
    model.toggle_bulk(0);

    // 'i' is bulk-selected but not checked; force-set raises it anyway.
    let mask = compile_mask(&model, BulkMode::ForceSetMarked);
    assert_eq!(mask.or_mask, AttrFlags::IMMUTABLE);
    assert_eq!(mask.and_mask.bits(), !0);
}

#[test]
fn set_all_equals_set_marked_with_every_attribute_bulk_selected() {
    let (_, mut model) = model_ia();
    model.load_flags(AttrFlags::APPEND);
    model.toggle_checked(0);

    let all = compile_mask(&model, BulkMode::SetAll);

    let mut forced = model.clone();
    forced.select_all_bulk();
    let marked = compile_mask(&forced, BulkMode::SetMarked);

    assert_eq!(all, marked);
}

#[test]
fn non_participating_attributes_leave_bits_untouched() {
    let (_, mut model) = model_ia();
    model.toggle_checked(0);
    // Nothing bulk-selected: marked modes compile to the identity.
    for mode in [
        BulkMode::SetMarked,
        BulkMode::ForceSetMarked,
        BulkMode::ClearMarked,
    ] {
        let mask = compile_mask(&model, mode);
        assert_eq!(mask, Mask::identity(), "mode {:?}", mode);
        let flags = AttrFlags::APPEND | AttrFlags::NODUMP;
        assert_eq!(mask.apply(flags), flags);
    }
}

#[test]
fn mask_application_is_idempotent() {
    let (_, mut model) = model_ia();
    model.load_flags(AttrFlags::APPEND);
    model.toggle_checked(0);
    model.toggle_checked(1);
    model.toggle_bulk(0);
    model.toggle_bulk(1);

    let inputs = [
        AttrFlags::empty(),
        AttrFlags::IMMUTABLE,
        AttrFlags::APPEND | AttrFlags::NODUMP,
        AttrFlags::from_bits_retain(0xDEAD_BEEF),
    ];

    for mode in [
        BulkMode::SetAll,
        BulkMode::SetMarked,
        BulkMode::ForceSetMarked,
        BulkMode::ClearMarked,
    ] {
        let mask = compile_mask(&model, mode);
        for flags in inputs {
            let once = mask.apply(flags);
            assert_eq!(mask.apply(once), once, "mode {:?} flags {:?}", mode, flags);
        }
    }
}

#[test]
fn identity_mask_is_a_no_op() {
    let mask = Mask::identity();
    assert_eq!(mask.and_mask.bits(), !0);
    let flags = AttrFlags::IMMUTABLE | AttrFlags::NOATIME;
    assert_eq!(mask.apply(flags), flags);
    assert_eq!(Mask::default(), mask);
}

#[test]
fn undefined_bits_survive_bulk_masking() {
    let (_, mut model) = model_ia();
    model.toggle_checked(0);
    model.toggle_bulk(0);

    // A file's flag word can carry bits with no AttrFlags definition
    // (kernel flags this build does not name, e.g. 0x0200_0000). Setting
    // one attribute must not strip them.
    let exotic = AttrFlags::from_bits_retain(0x0200_0000);
    let mask = compile_mask(&model, BulkMode::SetMarked);
    assert_eq!(mask.apply(exotic), exotic | AttrFlags::IMMUTABLE);

    // Force-clearing attributes keeps unrelated undefined bits too.
    model.toggle_bulk(1);
    let clear = compile_mask(&model, BulkMode::ClearMarked);
    assert_eq!(
        clear.apply(exotic | AttrFlags::IMMUTABLE | AttrFlags::APPEND),
        exotic
    );
}
