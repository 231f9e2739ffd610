//! Staged source tree
//!
//! The only long-lived mutable state of a mutation run: a map from path to
//! the latest [`SourceSnapshot`], lazily seeded from a [`SourceStore`] and
//! replaced on every commit. Guarantees read-after-write: a step reading a
//! path after an earlier step committed to it observes the committed text,
//! never the original.

use std::collections::HashSet;
use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::debug;

use crate::change::SourceSnapshot;
use crate::recorder::UpdateRecorder;
use crate::TreeError;

/// Backing storage a staged tree is seeded from
///
/// Implementations are read-only; all mutation happens in the staged layer.
pub trait SourceStore: Send + Sync {
    /// Full text of the file, or `None` if absent
    fn read(&self, path: &str) -> Option<String>;

    /// Whether the path exists in the store
    fn exists(&self, path: &str) -> bool;
}

/// In-memory store, used by tests and as the merge target for templated files
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: IndexMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (builder style)
    #[inline]
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }
}

impl SourceStore for MemoryStore {
    fn read(&self, path: &str) -> Option<String> {
        self.files.get(path).cloned()
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

/// Store reading files from a directory on disk
///
/// Paths are interpreted relative to `root`, with a leading `/` stripped so
/// workspace-absolute paths like `/src/app/app.module.ts` resolve inside it.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at a directory
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl SourceStore for DiskStore {
    fn read(&self, path: &str) -> Option<String> {
        std::fs::read_to_string(self.resolve(path)).ok()
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }
}

/// Per-run staging area over a [`SourceStore`]
///
/// # Invariants
/// - At most one [`UpdateRecorder`] open per path (the only mutual-exclusion
///   rule in the engine; enforced per path, not globally).
/// - After a commit the stored snapshot's version increments, so offsets
///   computed against the prior version can no longer be committed.
pub struct StagedSourceTree {
    store: Box<dyn SourceStore>,
    files: IndexMap<String, SourceSnapshot>,
    open_recorders: HashSet<String>,
}

impl StagedSourceTree {
    /// Create a staged tree over backing storage
    #[inline]
    #[must_use]
    pub fn new(store: Box<dyn SourceStore>) -> Self {
        Self {
            store,
            files: IndexMap::new(),
            open_recorders: HashSet::new(),
        }
    }

    /// Whether the path has content (staged or in the backing store)
    #[inline]
    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path) || self.store.exists(path)
    }

    /// Latest text for the path
    ///
    /// Loads from the backing store on first access; afterwards returns
    /// whatever the most recent commit produced.
    ///
    /// # Errors
    /// Returns [`TreeError::FileNotFound`] if the path has no content.
    pub fn current_text(&mut self, path: &str) -> Result<&str, TreeError> {
        Ok(self.snapshot(path)?.text())
    }

    /// Latest snapshot for the path, loading lazily on first access
    ///
    /// # Errors
    /// Returns [`TreeError::FileNotFound`] if the path has no content.
    pub fn snapshot(&mut self, path: &str) -> Result<&SourceSnapshot, TreeError> {
        if !self.files.contains_key(path) {
            let text = self
                .store
                .read(path)
                .ok_or_else(|| TreeError::FileNotFound(path.to_string()))?;
            self.files
                .insert(path.to_string(), SourceSnapshot::new(path, text));
        }
        // Entry guaranteed present by the branch above.
        Ok(&self.files[path])
    }

    /// Stage a brand-new file, e.g. merged template output
    ///
    /// The file becomes an ordinary pre-existing file for later steps.
    ///
    /// # Errors
    /// Returns [`TreeError::FileExists`] if the path already has content.
    pub fn stage_new_file(
        &mut self,
        path: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), TreeError> {
        let path = path.into();
        if self.exists(&path) {
            return Err(TreeError::FileExists(path));
        }
        debug!(path = %path, "staging new file");
        self.files
            .insert(path.clone(), SourceSnapshot::new(path, text.into()));
        Ok(())
    }

    /// Open a recorder on the path's current snapshot
    ///
    /// # Errors
    /// Returns [`TreeError::RecorderConflict`] if a recorder is already open
    /// for the path and [`TreeError::FileNotFound`] if the path has no
    /// content. The conflict is checked before any text is read.
    pub fn begin_update(&mut self, path: &str) -> Result<UpdateRecorder, TreeError> {
        if self.open_recorders.contains(path) {
            return Err(TreeError::RecorderConflict(path.to_string()));
        }
        let base = self.snapshot(path)?.clone();
        self.open_recorders.insert(path.to_string());
        Ok(UpdateRecorder::open(base))
    }

    /// Commit a recorder, replacing the path's snapshot
    ///
    /// Consumes the recorder; the new snapshot's version is the old one plus
    /// one, and later reads of the path observe the committed text.
    ///
    /// # Errors
    /// Returns [`TreeError::StaleRecorder`] if the path was re-staged since
    /// the recorder was opened.
    pub fn commit_update(&mut self, recorder: UpdateRecorder) -> Result<(), TreeError> {
        let path = recorder.path().to_string();
        self.open_recorders.remove(&path);

        let current = self.snapshot(&path)?.version();
        if recorder.opened_version() != current {
            return Err(TreeError::StaleRecorder {
                path,
                opened: recorder.opened_version(),
                current,
            });
        }

        let buffered = recorder.len();
        let (base, text) = recorder.apply();
        let next = base.succeed(text);
        debug!(path = %path, version = next.version(), changes = buffered, "committed update");
        self.files.insert(path, next);
        Ok(())
    }

    /// Discard a recorder's session without applying its changes
    ///
    /// Releases the per-path open-recorder slot; the snapshot is untouched.
    /// The recorder must not be committed afterwards; once another session
    /// commits, such a commit fails with [`TreeError::StaleRecorder`].
    pub fn abandon_update(&mut self, recorder: &UpdateRecorder) {
        self.open_recorders.remove(recorder.path());
    }

    /// Paths with staged content, in first-touch order
    #[inline]
    pub fn staged_paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}
