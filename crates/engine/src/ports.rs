//! Seams between the mutation engine and its collaborators: the flag
//! provider, the file listing and the interactive frontend.

use std::path::{Path, PathBuf};

use crate::catalog::{AttrFlags, Catalog};
use crate::error::AttrError;
use crate::mask::BulkMode;
use crate::selection::SelectionModel;

/// Reads and writes raw attribute flag words for single files.
///
/// All calls are synchronous and blocking; the engine mutates strictly one
/// file at a time.
pub trait AttributeProvider {
    /// Capability probe, run once before any file is touched. Returns the
    /// set of flag bits the target filesystem supports, or
    /// [`AttrError::Unsupported`] if the flag operations are unavailable
    /// there at all.
    fn probe(&self, path: &Path) -> Result<AttrFlags, AttrError>;

    fn read_flags(&self, path: &Path) -> Result<AttrFlags, AttrError>;

    fn write_flags(&self, path: &Path, flags: AttrFlags) -> Result<(), AttrError>;
}

/// An ordered file listing with one marked bit per entry, owned by the
/// caller. The engine only reads order and marked state and asks for marks
/// to be cleared as entries are processed.
pub trait FileListing {
    fn len(&self) -> usize;

    fn path(&self, index: usize) -> &Path;

    fn is_marked(&self, index: usize) -> bool;

    /// Clear one entry's marked bit. The visible remaining count shrinks
    /// monotonically as the batch walks the listing.
    fn clear_mark(&mut self, index: usize);

    fn marked_count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The user's answer to a failed write on one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorChoice {
    /// Skip this file, continue with the rest.
    Ignore,
    /// Skip this file and every later failure, without asking again.
    IgnoreAll,
    /// Re-attempt the same file without advancing.
    Retry,
    /// Abort the remaining files.
    Cancel,
}

/// One snapshot of the attribute form, enough for a frontend to render it.
pub struct FormView<'a> {
    pub path: &'a Path,
    pub catalog: &'a Catalog,
    pub selection: &'a SelectionModel,
    /// Live projection of the pending flag word: attribute codes for set
    /// bits, placeholders otherwise.
    pub preview: String,
    /// True when at most one file is in play; frontends hide the bulk
    /// commands then, like the original dialog.
    pub single_set: bool,
    pub marked_remaining: usize,
}

/// One explicit user gesture against the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormCommand {
    /// Flip an attribute's checked state (index into the mutable set).
    ToggleChecked(usize),
    /// Flip an attribute's bulk-selection state.
    ToggleBulk(usize),
    /// Commit a bulk operation over every marked file.
    Commit(BulkMode),
    /// Write the displayed file's pending flags exactly as shown.
    Set,
    /// Leave the form without touching the displayed file.
    Cancel,
}

/// The interactive frontend, driven synchronously: the engine blocks on
/// every call and resumes deterministically from the returned value.
pub trait InteractionPort {
    /// Present the form and return the next user gesture. Called in a loop:
    /// toggles are applied to the model and the form is presented again
    /// until a committing command arrives.
    fn present_form(&mut self, view: FormView<'_>) -> FormCommand;

    /// Present the 4-way decision for a failed write.
    fn resolve_failure(&mut self, path: &Path, error: &AttrError) -> ErrorChoice;

    /// Report a failure that takes no decision (single-file Set path).
    fn report_failure(&mut self, path: &Path, error: &AttrError);
}

/// Plain `Vec`-backed [`FileListing`], used by the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct VecListing {
    entries: Vec<ListEntry>,
}

#[derive(Debug, Clone)]
pub struct ListEntry {
    pub path: PathBuf,
    pub marked: bool,
}

impl VecListing {
    /// Listing with every given path marked, in the given order.
    pub fn from_marked<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        VecListing {
            entries: paths
                .into_iter()
                .map(|p| ListEntry {
                    path: p.into(),
                    marked: true,
                })
                .collect(),
        }
    }

    pub fn push(&mut self, path: impl Into<PathBuf>, marked: bool) {
        self.entries.push(ListEntry {
            path: path.into(),
            marked,
        });
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }
}

impl FileListing for VecListing {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn path(&self, index: usize) -> &Path {
        &self.entries[index].path
    }

    fn is_marked(&self, index: usize) -> bool {
        self.entries[index].marked
    }

    fn clear_mark(&mut self, index: usize) {
        self.entries[index].marked = false;
    }

    fn marked_count(&self) -> usize {
        self.entries.iter().filter(|e| e.marked).count()
    }
}
