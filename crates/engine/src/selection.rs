use crate::catalog::{AttrFlags, Catalog};

/// Runtime toggle state for one mutable attribute.
///
/// `checked` mirrors (and edits) the bit on the file currently shown in the
/// form. `bulk_selected` is an independent axis: it decides whether the
/// attribute participates in the next marked bulk commit and never touches
/// `checked`. Collapsing the two would change the marked-commit semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub checked: bool,
    pub bulk_selected: bool,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SelectionEntry {
    pub bit: AttrFlags,
    pub state: SelectionState,
}

/// Toggle state for every mutable attribute of a catalog, plus the pending
/// flag word for the file currently displayed.
///
/// Created once per edit session. `checked` bits are reloaded from each
/// file's live flags as the session moves through the listing;
/// `bulk_selected` bits survive those reloads so the user's bulk choices
/// persist within one invocation.
#[derive(Debug, Clone)]
pub struct SelectionModel {
    entries: Vec<SelectionEntry>,
    /// Full pending flag word for the displayed file, including bits that
    /// have no mutable catalog entry (those pass through untouched).
    pending: AttrFlags,
    /// Whether any toggle happened since the last [`load_flags`] call.
    ///
    /// [`load_flags`]: SelectionModel::load_flags
    dirty: bool,
}

impl SelectionModel {
    /// Build an all-clear model for the mutable attributes of `catalog`.
    pub fn new(catalog: &Catalog) -> Self {
        let entries = catalog
            .iter_mutable()
            .map(|d| SelectionEntry {
                bit: d.bit,
                state: SelectionState::default(),
            })
            .collect();
        SelectionModel {
            entries,
            pending: AttrFlags::empty(),
            dirty: false,
        }
    }

    /// Number of mutable attributes tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reset `checked` state and the pending word from a file's live flags.
    /// Bulk selections are left alone.
    pub fn load_flags(&mut self, flags: AttrFlags) {
        self.pending = flags;
        self.dirty = false;
        for entry in &mut self.entries {
            entry.state.checked = flags.contains(entry.bit);
        }
    }

    /// Flip one attribute's `checked` bit and the pending word with it.
    /// Returns the new pending word for preview.
    pub fn toggle_checked(&mut self, index: usize) -> AttrFlags {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.state.checked = !entry.state.checked;
            self.pending ^= entry.bit;
            self.dirty = true;
        }
        self.pending
    }

    /// Flip one attribute's bulk-selection bit. Does not alter `checked`.
    pub fn toggle_bulk(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.state.bulk_selected = !entry.state.bulk_selected;
        }
    }

    pub fn state(&self, index: usize) -> Option<SelectionState> {
        self.entries.get(index).map(|e| e.state)
    }

    /// The full flag word the displayed file would get from a single-file
    /// "Set": its current flags with the checked toggles applied.
    pub fn pending_flags(&self) -> AttrFlags {
        self.pending
    }

    /// True once any checkbox was toggled since the current file loaded.
    pub fn flags_changed(&self) -> bool {
        self.dirty
    }

    pub(crate) fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    /// Mark every attribute as bulk-selected. Used by tests and by callers
    /// that want `SetMarked` to behave like `SetAll`.
    pub fn select_all_bulk(&mut self) {
        for entry in &mut self.entries {
            entry.state.bulk_selected = true;
        }
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
