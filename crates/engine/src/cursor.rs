use crate::ports::FileListing;

/// Cursor over the marked subset of a listing, in listing order.
///
/// The cursor only ever moves forward; re-finding the "current" file after
/// a retry works because the entry's mark is still set, and a processed
/// entry is skipped because its mark was cleared. The marked count shrinks
/// monotonically until the batch is done or cancelled.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCursor {
    index: usize,
}

impl FileCursor {
    pub fn new() -> Self {
        FileCursor { index: 0 }
    }

    /// Advance to the next marked entry at or after the current position.
    /// Returns its listing index, or `None` when no marked entries remain.
    pub fn next_marked<L: FileListing + ?Sized>(&mut self, listing: &L) -> Option<usize> {
        while self.index < listing.len() {
            if listing.is_marked(self.index) {
                return Some(self.index);
            }
            self.index += 1;
        }
        None
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod tests;
