//! Snapshots and the change model
//!
//! A [`SourceSnapshot`] is a point-in-time text state of one file plus a
//! version counter. A [`Change`] is one insertion into such a snapshot,
//! anchored to a byte offset captured before any edit is applied.

/// Immutable text state of one file
///
/// # Invariants
/// - Never mutated after creation; a commit produces a *new* snapshot.
/// - Byte offsets computed against `text` are valid only for this exact
///   version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSnapshot {
    path: String,
    text: String,
    version: u64,
}

impl SourceSnapshot {
    /// Create the initial snapshot of a file (version 0)
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            version: 0,
        }
    }

    /// Successor snapshot holding the committed text
    #[inline]
    #[must_use]
    pub(crate) fn succeed(&self, text: String) -> Self {
        Self {
            path: self.path.clone(),
            text,
            version: self.version + 1,
        }
    }

    /// File path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Full text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Version counter, incremented on every commit
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Which side of the anchor a fragment attaches to
///
/// Matters only when two insertions land on the same offset: all
/// [`Side::Before`] fragments are placed earlier in the final text than any
/// [`Side::After`] fragment at that offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    /// Fragment is concatenated before the anchor token
    Before,
    /// Fragment is concatenated after the anchor token
    After,
}

/// One textual insertion
///
/// Offsets refer to the snapshot the owning recorder was opened against,
/// never to intermediate states produced by other changes in the same
/// session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    path: String,
    offset: usize,
    side: Side,
    fragment: String,
}

impl Change {
    /// Create a change
    #[inline]
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        offset: usize,
        side: Side,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            offset,
            side,
            fragment: fragment.into(),
        }
    }

    /// Target file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Byte offset into the snapshot text
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Anchor side
    #[inline]
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Literal text to insert
    #[inline]
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}
