//! Update recorder
//!
//! Accumulates [`Change`] values for one file and applies them as a single
//! commit. All offsets in a session refer to the snapshot captured when the
//! recorder was opened; applying from the end of the file toward the start
//! keeps every buffered offset valid while the text grows.

use crate::change::{Change, Side, SourceSnapshot};
use crate::TreeError;

/// Open staging buffer for one file
///
/// Created by [`StagedSourceTree::begin_update`] and consumed by
/// [`StagedSourceTree::commit_update`]; the move makes a second commit, or
/// an insert after commit, unrepresentable.
///
/// [`StagedSourceTree::begin_update`]: crate::StagedSourceTree::begin_update
/// [`StagedSourceTree::commit_update`]: crate::StagedSourceTree::commit_update
#[derive(Debug)]
pub struct UpdateRecorder {
    base: SourceSnapshot,
    changes: Vec<Change>,
}

impl UpdateRecorder {
    #[inline]
    #[must_use]
    pub(crate) fn open(base: SourceSnapshot) -> Self {
        Self {
            base,
            changes: Vec::new(),
        }
    }

    /// Path this recorder is open on
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        self.base.path()
    }

    /// Snapshot version the recorder was opened against
    #[inline]
    #[must_use]
    pub fn opened_version(&self) -> u64 {
        self.base.version()
    }

    /// Number of buffered changes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether nothing has been recorded yet
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Buffer a change
    ///
    /// Several changes at the same offset are legal; callers need not sort.
    ///
    /// # Errors
    /// Returns [`TreeError::PathMismatch`] if the change targets another file
    /// and [`TreeError::OffsetOutOfBounds`] if the offset cannot land on the
    /// captured snapshot.
    pub fn insert(&mut self, change: Change) -> Result<(), TreeError> {
        if change.path() != self.base.path() {
            return Err(TreeError::PathMismatch {
                change: change.path().to_string(),
                recorder: self.base.path().to_string(),
            });
        }
        let len = self.base.text().len();
        if change.offset() > len || !self.base.text().is_char_boundary(change.offset()) {
            return Err(TreeError::OffsetOutOfBounds {
                path: self.base.path().to_string(),
                offset: change.offset(),
                len,
            });
        }
        self.changes.push(change);
        Ok(())
    }

    /// Apply all buffered changes to the captured snapshot text
    ///
    /// Sorted descending by offset and applied end-of-file first, so an edit
    /// near the end never invalidates the offset of an edit nearer the start.
    /// Same-offset ties: `Side::Before` fragments land earlier in the final
    /// text than `Side::After` fragments, and same-side changes keep their
    /// insertion order.
    #[must_use]
    pub(crate) fn apply(self) -> (SourceSnapshot, String) {
        // Stable ascending key; reversed application reproduces it in the
        // final text.
        let mut ordered: Vec<(usize, Change)> = self.changes.into_iter().enumerate().collect();
        ordered.sort_by(|(seq_a, a), (seq_b, b)| {
            a.offset()
                .cmp(&b.offset())
                .then(a.side().cmp(&b.side()))
                .then(seq_a.cmp(seq_b))
        });

        let mut text = self.base.text().to_string();
        for (_, change) in ordered.iter().rev() {
            text.insert_str(change.offset(), change.fragment());
        }

        (self.base, text)
    }
}
