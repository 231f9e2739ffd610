//! Error types for the orchestration layer
//!
//! Aggregates failures from the syntax layer and the staged tree, and wraps
//! them with the step and path that failed so a run reports exactly where it
//! stopped. Nothing is retried: a structural mismatch will not resolve
//! itself on retry.

use scaffold_ast::{LocateError, ParseError};
use scaffold_tree::TreeError;

/// Main orchestration error type
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// Parser could not be constructed
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Semantic anchor missing (fatal; never silently skipped)
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// Staged-tree failure (missing file, recorder conflict, ...)
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// A mutation step failed; earlier commits remain committed
    #[error("step '{step}' failed for {path}: {source}")]
    StepFailed {
        /// Name of the failing step
        step: String,
        /// Path the step targeted
        path: String,
        /// Underlying failure
        #[source]
        source: Box<ScaffoldError>,
    },

    /// Workspace manifest unreadable or malformed
    #[error("invalid workspace manifest: {0}")]
    BadWorkspace(String),

    /// Project missing from the workspace manifest
    #[error("project '{0}' not found in workspace manifest")]
    ProjectNotFound(String),
}

impl ScaffoldError {
    /// Wrap a failure with the step and path it occurred in
    #[inline]
    #[must_use]
    pub fn in_step(self, step: impl Into<String>, path: impl Into<String>) -> Self {
        Self::StepFailed {
            step: step.into(),
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Whether this is a missing-anchor failure
    #[inline]
    #[must_use]
    pub fn is_target_not_found(&self) -> bool {
        match self {
            Self::Locate(LocateError::TargetNotFound(_)) => true,
            Self::StepFailed { source, .. } => source.is_target_not_found(),
            _ => false,
        }
    }
}
