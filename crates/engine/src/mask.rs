use crate::catalog::AttrFlags;
use crate::selection::SelectionModel;

/// How a bulk commit combines the selection model into a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkMode {
    /// Every mutable attribute participates; checked state decides whether
    /// its bit is forced on or forced off.
    SetAll,
    /// Only bulk-selected attributes participate; checked state decides,
    /// as in `SetAll`.
    SetMarked,
    /// Only bulk-selected attributes participate; their bits are forced on
    /// regardless of checked state.
    ForceSetMarked,
    /// Only bulk-selected attributes participate; their bits are forced off
    /// regardless of checked state.
    ClearMarked,
}

/// An additive/subtractive flag mask, applied to a file's raw flag word as
/// `(flags & and_mask) | or_mask`.
///
/// Starts as the identity (`and_mask` all ones, `or_mask` zero); bits not
/// claimed by any participating attribute stay identity, so unrelated flags
/// pass through every file untouched. The and-mask covers the whole raw
/// word: bits with no `AttrFlags` definition (kernel flags this build does
/// not name) must survive too, so all-ones means `!0`, not the union of
/// defined flags, and clearing complements on the raw word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask {
    pub and_mask: AttrFlags,
    pub or_mask: AttrFlags,
}

impl Default for Mask {
    fn default() -> Self {
        Mask::identity()
    }
}

impl Mask {
    pub fn identity() -> Self {
        Mask {
            and_mask: AttrFlags::from_bits_retain(!0),
            or_mask: AttrFlags::empty(),
        }
    }

    /// Force one attribute on for every file of the batch.
    pub fn force_set(&mut self, bit: AttrFlags) {
        self.or_mask |= bit;
    }

    /// Force one attribute off for every file of the batch. The complement
    /// is taken on the raw word; `!bit` on the flags type would drop
    /// undefined bits from the and-mask.
    pub fn force_clear(&mut self, bit: AttrFlags) {
        self.and_mask &= AttrFlags::from_bits_retain(!bit.bits());
    }

    /// Apply this mask to a raw flag word. Idempotent: applying twice
    /// equals applying once.
    pub fn apply(&self, flags: AttrFlags) -> AttrFlags {
        (flags & self.and_mask) | self.or_mask
    }
}

/// Compile the selection model into the mask one bulk commit will apply to
/// every file of the batch.
///
/// Pure and deterministic: no I/O, same inputs always yield the same mask.
/// The asymmetry is deliberate and load-bearing: `SetAll`/`SetMarked`
/// respect each attribute's checked state, while `ForceSetMarked` and
/// `ClearMarked` ignore it.
pub fn compile_mask(selection: &SelectionModel, mode: BulkMode) -> Mask {
    let mut mask = Mask::identity();

    for entry in selection.entries() {
        let participates = match mode {
            BulkMode::SetAll => true,
            BulkMode::SetMarked | BulkMode::ForceSetMarked | BulkMode::ClearMarked => {
                entry.state.bulk_selected
            }
        };
        if !participates {
            continue;
        }

        match mode {
            BulkMode::SetAll | BulkMode::SetMarked => {
                if entry.state.checked {
                    mask.force_set(entry.bit);
                } else {
                    mask.force_clear(entry.bit);
                }
            }
            BulkMode::ForceSetMarked => mask.force_set(entry.bit),
            BulkMode::ClearMarked => mask.force_clear(entry.bit),
        }
    }

    mask
}

#[cfg(test)]
#[path = "mask_tests.rs"]
mod tests;
