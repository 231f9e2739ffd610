//! Mutation plans
//!
//! A [`MutationPlan`] runs an ordered list of [`MutationStep`]s against one
//! [`StagedSourceTree`]. Each step re-reads the target's current text, so a
//! step observes every earlier commit to the same file. The run halts at the
//! first failure and commits from earlier steps stay committed; there is no
//! rollback, and re-running a completed plan inserts its fragments again.

use scaffold_ast::{import_synthesis_point, locate, InsertionTarget, LocateError};
use scaffold_tree::StagedSourceTree;
use tracing::debug;

use crate::error::ScaffoldError;
use crate::step::MutationStep;

/// Ordered sequence of mutation steps
#[derive(Debug, Default)]
pub struct MutationPlan {
    steps: Vec<MutationStep>,
}

impl MutationPlan {
    /// Create an empty plan
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step (builder style)
    #[inline]
    #[must_use]
    pub fn with_step(mut self, step: MutationStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a step
    #[inline]
    pub fn push(&mut self, step: MutationStep) {
        self.steps.push(step);
    }

    /// Number of steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan has no steps
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order against the staged tree
    ///
    /// # Errors
    /// Returns [`ScaffoldError::StepFailed`] naming the first step that
    /// failed. A missing anchor is fatal unless the step carries an
    /// import-synthesis fallback and its target is a named import list.
    pub fn run(&self, tree: &mut StagedSourceTree) -> Result<(), ScaffoldError> {
        for step in &self.steps {
            debug!(step = step.name(), path = step.path(), target = %step.target(), "running step");
            self.run_step(step, tree)
                .map_err(|err| err.in_step(step.name(), step.path()))?;
        }
        Ok(())
    }

    fn run_step(&self, step: &MutationStep, tree: &mut StagedSourceTree) -> Result<(), ScaffoldError> {
        let text = tree.current_text(step.path())?.to_string();
        let syntax = scaffold_ast::parse(&text)?;

        let mut recorder = tree.begin_update(step.path())?;
        let result = match locate(&syntax, step.target()) {
            Ok(points) => {
                let mut out = Ok(());
                for point in points {
                    let fragment = step.build_fragment(&point);
                    if let Err(err) = recorder.insert(point.to_change(step.path(), fragment)) {
                        out = Err(ScaffoldError::Tree(err));
                        break;
                    }
                }
                out
            }
            Err(LocateError::TargetNotFound(_))
                if matches!(step.target(), InsertionTarget::NamedImport { .. })
                    && step.import_fallback().is_some() =>
            {
                // No import of that specifier yet: synthesize a whole new
                // declaration instead of extending an existing list.
                let point = import_synthesis_point(&syntax);
                let builder = step
                    .import_fallback()
                    .ok_or_else(|| {
                        ScaffoldError::Locate(LocateError::TargetNotFound(step.target().to_string()))
                    })?;
                let fragment = builder(&point);
                recorder
                    .insert(point.to_change(step.path(), fragment))
                    .map_err(ScaffoldError::Tree)
            }
            Err(err) => Err(ScaffoldError::Locate(err)),
        };

        if let Err(err) = result {
            tree.abandon_update(&recorder);
            return Err(err);
        }
        tree.commit_update(recorder)?;
        Ok(())
    }
}
