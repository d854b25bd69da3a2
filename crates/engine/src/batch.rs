use std::path::Path;

use log::debug;

use crate::catalog::AttrFlags;
use crate::cursor::FileCursor;
use crate::mask::Mask;
use crate::ports::{AttributeProvider, ErrorChoice, FileListing, InteractionPort};

/// Result of processing one file of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The file was handled (mutated or deliberately skipped); move on.
    Continue,
    /// The file vanished after being marked; drop it without prompting.
    SkipMissing,
    /// The user cancelled; leave every remaining file marked and untouched.
    StopAll,
}

/// Tally of one batch run. Earlier mutations are never rolled back, so a
/// cancelled report still counts the files that were already applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Files whose flags were written successfully.
    pub applied: usize,
    /// Files skipped on user decision (Ignore / ignore-all).
    pub ignored: usize,
    /// Files that vanished between marking and processing.
    pub missing: usize,
    /// True when the batch stopped on Cancel.
    pub cancelled: bool,
}

impl BatchReport {
    pub fn absorb(&mut self, other: BatchReport) {
        self.applied += other.applied;
        self.ignored += other.ignored;
        self.missing += other.missing;
        self.cancelled |= other.cancelled;
    }
}

/// Sequential applier walking marked files one at a time.
///
/// Owns the `ignore_all` switch for one command invocation; callers keep
/// the applier alive across operations so a choice of "Ignore all" made
/// during a Set carries into a later bulk run of the same invocation.
pub struct BatchApplier<'p, P: ?Sized> {
    provider: &'p P,
    ignore_all: bool,
}

impl<'p, P: AttributeProvider + ?Sized> BatchApplier<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        BatchApplier {
            provider,
            ignore_all: false,
        }
    }

    /// Whether failure prompts are currently suppressed.
    pub fn ignore_all(&self) -> bool {
        self.ignore_all
    }

    /// Write `flags` to one file, running the interactive failure protocol.
    ///
    /// Loops on Retry without advancing; returns [`BatchOutcome::Continue`]
    /// on success or a decision to skip, [`BatchOutcome::StopAll`] on
    /// Cancel. With `ignore_all` active, failures resolve to skip without
    /// a prompt.
    pub fn try_write<I>(&mut self, port: &mut I, path: &Path, flags: AttrFlags) -> BatchOutcome
    where
        I: InteractionPort + ?Sized,
    {
        self.write_with_protocol(port, path, flags).0
    }

    pub(crate) fn write_with_protocol<I>(
        &mut self,
        port: &mut I,
        path: &Path,
        flags: AttrFlags,
    ) -> (BatchOutcome, bool)
    where
        I: InteractionPort + ?Sized,
    {
        loop {
            let err = match self.provider.write_flags(path, flags) {
                Ok(()) => return (BatchOutcome::Continue, true),
                Err(err) => err,
            };

            if self.ignore_all {
                debug!("[batch] ignoring write failure on {:?}: {err}", path);
                return (BatchOutcome::Continue, false);
            }

            match port.resolve_failure(path, &err) {
                ErrorChoice::Ignore => return (BatchOutcome::Continue, false),
                ErrorChoice::IgnoreAll => {
                    self.ignore_all = true;
                    return (BatchOutcome::Continue, false);
                }
                ErrorChoice::Retry => continue,
                ErrorChoice::Cancel => return (BatchOutcome::StopAll, false),
            }
        }
    }

    /// Apply a mask to one file: read its live flags, combine, write.
    ///
    /// A read failure means the file vanished since it was marked and maps
    /// to [`BatchOutcome::SkipMissing`]; write failures go through the
    /// interactive protocol.
    pub fn apply_to_file<I>(&mut self, port: &mut I, path: &Path, mask: &Mask) -> BatchOutcome
    where
        I: InteractionPort + ?Sized,
    {
        self.apply_inner(port, path, mask).0
    }

    /// Like [`apply_to_file`](Self::apply_to_file), also reporting whether
    /// the file was actually mutated (for the batch tally).
    fn apply_inner<I>(&mut self, port: &mut I, path: &Path, mask: &Mask) -> (BatchOutcome, bool)
    where
        I: InteractionPort + ?Sized,
    {
        let flags = match self.provider.read_flags(path) {
            Ok(flags) => flags,
            Err(err) => {
                debug!("[batch] cannot re-read flags of {:?}: {err}", path);
                return (BatchOutcome::SkipMissing, false);
            }
        };

        self.write_with_protocol(port, path, mask.apply(flags))
    }

    /// Walk every marked file of `listing` in order, applying `mask`.
    ///
    /// Marks are cleared as files are processed. On Cancel the walk stops
    /// at once and the remaining files keep their marks; nothing already
    /// written is rolled back.
    pub fn run_batch<I, L>(&mut self, port: &mut I, listing: &mut L, mask: &Mask) -> BatchReport
    where
        I: InteractionPort + ?Sized,
        L: FileListing + ?Sized,
    {
        let mut cursor = FileCursor::new();
        let mut report = BatchReport::default();

        while let Some(index) = cursor.next_marked(listing) {
            let path = listing.path(index).to_path_buf();
            let (outcome, mutated) = self.apply_inner(port, &path, mask);

            match outcome {
                BatchOutcome::Continue => {
                    if mutated {
                        report.applied += 1;
                    } else {
                        report.ignored += 1;
                    }
                    listing.clear_mark(index);
                }
                BatchOutcome::SkipMissing => {
                    report.missing += 1;
                    listing.clear_mark(index);
                }
                BatchOutcome::StopAll => {
                    report.cancelled = true;
                    break;
                }
            }
        }

        debug!(
            "[batch] applied={} ignored={} missing={} cancelled={}",
            report.applied, report.ignored, report.missing, report.cancelled
        );
        report
    }
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
