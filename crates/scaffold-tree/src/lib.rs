//! Scaffold Staged Source Tree
//!
//! Text-level half of the mutation engine: immutable file snapshots,
//! offset-anchored insertions, and a per-run staging area that later steps
//! read committed content from.
//!
//! # Core Concepts
//!
//! - [`SourceSnapshot`]: immutable (path, text, version) triple
//! - [`Change`]: one textual insertion anchored to a byte offset
//! - [`UpdateRecorder`]: per-file buffer that turns many changes into one commit
//! - [`StagedSourceTree`]: path -> latest snapshot map over a [`SourceStore`]
//!
//! # Example
//!
//! ```rust
//! use scaffold_tree::{Change, MemoryStore, Side, StagedSourceTree};
//!
//! let store = MemoryStore::new().with_file("/a.ts", "const X = [];");
//! let mut tree = StagedSourceTree::new(Box::new(store));
//!
//! let mut recorder = tree.begin_update("/a.ts").unwrap();
//! recorder.insert(Change::new("/a.ts", 11, Side::Before, "1")).unwrap();
//! tree.commit_update(recorder).unwrap();
//!
//! assert_eq!(tree.current_text("/a.ts").unwrap(), "const X = [1];");
//! ```

mod change;
mod recorder;
mod staging;

pub use change::{Change, Side, SourceSnapshot};
pub use recorder::UpdateRecorder;
pub use staging::{DiskStore, MemoryStore, SourceStore, StagedSourceTree};

/// Errors for staged-tree operations
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Target path absent from the backing store and never staged
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// A file with this path is already staged
    #[error("file already exists: {0}")]
    FileExists(String),

    /// Second recorder opened on a path with one already open
    #[error("recorder already open for {0}")]
    RecorderConflict(String),

    /// Recorder opened against a snapshot that was replaced underneath it
    #[error("recorder for {path} is stale: opened at version {opened}, current is {current}")]
    StaleRecorder {
        path: String,
        opened: u64,
        current: u64,
    },

    /// Change recorded against a different path than the recorder's
    #[error("change targets {change} but recorder is open on {recorder}")]
    PathMismatch { change: String, recorder: String },

    /// Change offset does not land on a byte position of the snapshot
    #[error("offset {offset} out of bounds for {path} (len {len})")]
    OffsetOutOfBounds {
        path: String,
        offset: usize,
        len: usize,
    },
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
