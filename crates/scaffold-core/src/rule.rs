//! Composable rules
//!
//! A [`Rule`] is the unit of composition above individual plans: anything
//! that transforms a [`StagedSourceTree`]. Rules are chained sequentially
//! with [`chain`], and a later rule observes everything earlier rules
//! committed. The trait is async so rules that fetch templates or workspace
//! metadata compose with purely synchronous mutation plans.

use async_trait::async_trait;
use scaffold_tree::StagedSourceTree;
use tracing::debug;

use crate::error::ScaffoldError;
use crate::orchestrator::MutationPlan;

/// A named transformation of the staged tree
#[async_trait]
pub trait Rule: Send + Sync {
    /// Rule name, used in logs and failure reports
    fn name(&self) -> &str;

    /// Apply the transformation
    ///
    /// # Errors
    /// Any [`ScaffoldError`]; the caller halts the chain on the first one.
    async fn apply(&self, tree: &mut StagedSourceTree) -> Result<(), ScaffoldError>;
}

#[async_trait]
impl Rule for MutationPlan {
    fn name(&self) -> &str {
        "mutation-plan"
    }

    async fn apply(&self, tree: &mut StagedSourceTree) -> Result<(), ScaffoldError> {
        self.run(tree)
    }
}

/// Sequential composition of rules
pub struct Chain {
    rules: Vec<Box<dyn Rule>>,
}

/// Compose rules into one, applied in order
#[inline]
#[must_use]
pub fn chain(rules: Vec<Box<dyn Rule>>) -> Chain {
    Chain { rules }
}

#[async_trait]
impl Rule for Chain {
    fn name(&self) -> &str {
        "chain"
    }

    async fn apply(&self, tree: &mut StagedSourceTree) -> Result<(), ScaffoldError> {
        for rule in &self.rules {
            debug!(rule = rule.name(), "applying rule");
            rule.apply(tree).await?;
        }
        Ok(())
    }
}

/// Rule staging brand-new files, e.g. rendered template output
///
/// Staged files become ordinary pre-existing files for later rules in the
/// chain, so a plan can immediately mutate them.
pub struct StageFiles {
    files: Vec<(String, String)>,
}

impl StageFiles {
    /// Create an empty staging rule
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Add a file to stage (builder style)
    #[inline]
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.push((path.into(), text.into()));
        self
    }
}

impl Default for StageFiles {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for StageFiles {
    fn name(&self) -> &str {
        "stage-files"
    }

    async fn apply(&self, tree: &mut StagedSourceTree) -> Result<(), ScaffoldError> {
        for (path, text) in &self.files {
            tree.stage_new_file(path.clone(), text.clone())?;
        }
        Ok(())
    }
}
