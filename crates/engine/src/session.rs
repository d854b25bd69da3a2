use log::debug;

use crate::batch::{BatchApplier, BatchOutcome, BatchReport};
use crate::catalog::Catalog;
use crate::cursor::FileCursor;
use crate::error::SessionError;
use crate::mask::compile_mask;
use crate::ports::{AttributeProvider, FileListing, FormCommand, FormView, InteractionPort};
use crate::selection::SelectionModel;

/// One interactive edit command over a listing: present the form for the
/// lead marked file, commit the chosen operation, repeat while marked files
/// remain.
///
/// Session state (the ignore-all switch, bulk selections) lives exactly as
/// long as the session; nothing leaks into the next invocation.
pub struct EditSession<'a, P: ?Sized, I: ?Sized, L: ?Sized> {
    provider: &'a P,
    port: &'a mut I,
    listing: &'a mut L,
}

impl<'a, P, I, L> EditSession<'a, P, I, L>
where
    P: AttributeProvider + ?Sized,
    I: InteractionPort + ?Sized,
    L: FileListing + ?Sized,
{
    pub fn new(provider: &'a P, port: &'a mut I, listing: &'a mut L) -> Self {
        EditSession {
            provider,
            port,
            listing,
        }
    }

    /// Run the session to completion.
    ///
    /// Fails fast (before any mutation) when the target filesystem does not
    /// support attribute flags, or when the lead file's flags cannot be
    /// read. Everything else is handled inside the loop.
    pub fn run(&mut self) -> Result<BatchReport, SessionError> {
        let Some(first) = FileCursor::new().next_marked(self.listing) else {
            return Ok(BatchReport::default());
        };

        // Fatal precondition: probe once, on the lead target, before
        // touching anything. The probe result drives the catalog.
        let supported = self
            .provider
            .probe(self.listing.path(first))
            .map_err(|source| SessionError::Precondition { source })?;
        let catalog = Catalog::supported(supported);
        debug!("[session] catalog has {} attributes", catalog.len());

        // Bulk selections persist across files within this invocation.
        let mut selection = SelectionModel::new(&catalog);
        let mut applier = BatchApplier::new(self.provider);
        let mut report = BatchReport::default();

        loop {
            let Some(lead) = FileCursor::new().next_marked(self.listing) else {
                break;
            };
            let path = self.listing.path(lead).to_path_buf();

            let flags = self
                .provider
                .read_flags(&path)
                .map_err(|source| SessionError::ReadFlags {
                    path: path.clone(),
                    source,
                })?;
            selection.load_flags(flags);

            let single_set = self.listing.marked_count() < 2;

            // Form loop: toggles mutate the model in place, any other
            // command commits and closes the form for this file.
            let command = loop {
                let view = FormView {
                    path: &path,
                    catalog: &catalog,
                    selection: &selection,
                    preview: catalog.render(selection.pending_flags()),
                    single_set,
                    marked_remaining: self.listing.marked_count(),
                };
                match self.port.present_form(view) {
                    FormCommand::ToggleChecked(index) => {
                        selection.toggle_checked(index);
                    }
                    FormCommand::ToggleBulk(index) => selection.toggle_bulk(index),
                    other => break other,
                }
            };

            match command {
                FormCommand::Cancel => {
                    // Leave the lead file marked and untouched.
                    report.cancelled = true;
                    break;
                }
                FormCommand::Set => {
                    let done = self.commit_set(&mut applier, &path, &selection, single_set, &mut report);
                    if report.cancelled {
                        break;
                    }
                    self.listing.clear_mark(lead);
                    if done {
                        break;
                    }
                }
                FormCommand::Commit(mode) => {
                    let mask = compile_mask(&selection, mode);
                    let batch = applier.run_batch(self.port, self.listing, &mask);
                    report.absorb(batch);
                    // The lead file was the batch's first entry; one bulk
                    // commit ends the session either way.
                    break;
                }
                FormCommand::ToggleChecked(_) | FormCommand::ToggleBulk(_) => unreachable!(),
            }
        }

        Ok(report)
    }

    /// The single-file "Set" path: write the pending flag word exactly as
    /// displayed, with no and/or mask.
    ///
    /// With one file in play a failure is reported once, without the 4-way
    /// prompt; with several, the interactive protocol runs and a Cancel
    /// there stops the remaining files. Returns true when the session is
    /// finished after this commit.
    fn commit_set(
        &mut self,
        applier: &mut BatchApplier<'_, P>,
        path: &std::path::Path,
        selection: &SelectionModel,
        single_set: bool,
        report: &mut BatchReport,
    ) -> bool {
        if !selection.flags_changed() {
            // Nothing toggled; the original dialog treats this as a no-op
            // close on a single file, and moves on otherwise.
            return single_set;
        }

        let flags = selection.pending_flags();

        if single_set {
            match self.provider.write_flags(path, flags) {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    if !applier.ignore_all() {
                        self.port.report_failure(path, &err);
                    }
                    report.ignored += 1;
                }
            }
            return true;
        }

        // The write protocol only continues or stops; vanished files are a
        // mask-path concern, the Set path writes what is displayed.
        let (outcome, mutated) = applier.write_with_protocol(self.port, path, flags);
        if outcome == BatchOutcome::StopAll {
            report.cancelled = true;
            return true;
        }
        if mutated {
            report.applied += 1;
        } else {
            report.ignored += 1;
        }
        false
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
