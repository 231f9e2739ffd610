//! Mutation steps
//!
//! A [`MutationStep`] names one insertion: the file it targets, the semantic
//! anchor inside it, and a fragment builder invoked with the resolved
//! [`InsertionPoint`] so it can pick a separator when the anchor already has
//! content. Steps are stateless; offsets are resolved fresh at run time.
//!
//! Keeping fragments syntactically self-consistent (e.g. not referencing an
//! identifier that is never imported) is the caller's responsibility; the
//! engine does not detect that.

use scaffold_ast::{InsertionPoint, InsertionTarget};

/// Builds the literal fragment for a resolved insertion point
pub type FragmentBuilder = Box<dyn Fn(&InsertionPoint) -> String + Send + Sync>;

/// One named, position-anchored insertion into one file
pub struct MutationStep {
    name: String,
    path: String,
    target: InsertionTarget,
    builder: FragmentBuilder,
    import_fallback: Option<FragmentBuilder>,
}

impl MutationStep {
    /// Create a step
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        target: InsertionTarget,
        builder: impl Fn(&InsertionPoint) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            target,
            builder: Box::new(builder),
            import_fallback: None,
        }
    }

    /// Synthesize a whole new import declaration when the
    /// [`InsertionTarget::NamedImport`] list does not exist yet
    ///
    /// The fallback builder receives the synthesis point (after the last
    /// existing import, or the top of the file) and must emit a complete
    /// `import ... from '...';` statement.
    #[must_use]
    pub fn or_synthesize_import(
        mut self,
        builder: impl Fn(&InsertionPoint) -> String + Send + Sync + 'static,
    ) -> Self {
        self.import_fallback = Some(Box::new(builder));
        self
    }

    /// Step name, used in failure reports
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Semantic anchor descriptor
    #[inline]
    #[must_use]
    pub fn target(&self) -> &InsertionTarget {
        &self.target
    }

    /// Build the fragment for a resolved point
    #[inline]
    #[must_use]
    pub fn build_fragment(&self, point: &InsertionPoint) -> String {
        (self.builder)(point)
    }

    /// Import-synthesis fallback, if configured
    #[inline]
    #[must_use]
    pub fn import_fallback(&self) -> Option<&FragmentBuilder> {
        self.import_fallback.as_ref()
    }
}

impl std::fmt::Debug for MutationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationStep")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("target", &self.target)
            .field("has_import_fallback", &self.import_fallback.is_some())
            .finish_non_exhaustive()
    }
}
