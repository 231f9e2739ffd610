//! Workspace manifest
//!
//! Reads the workspace description file through the staged tree (so a rule
//! that rewrote it earlier in the run is observed) and answers where a
//! project's sources live. Only the fields the mutation steps need are
//! modeled; unknown manifest keys are ignored.

use std::collections::BTreeMap;

use scaffold_tree::StagedSourceTree;
use serde::Deserialize;

use crate::error::ScaffoldError;

/// Path of the workspace manifest inside the staged tree
pub const WORKSPACE_MANIFEST_PATH: &str = "/angular.json";

/// Parsed workspace manifest
#[derive(Debug, Clone, Deserialize)]
pub struct Workspace {
    /// Projects by name, in manifest order
    #[serde(default)]
    pub projects: BTreeMap<String, Project>,

    /// Name of the project used when a caller names none
    #[serde(default, rename = "defaultProject")]
    pub default_project: Option<String>,
}

/// One project entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project root, relative to the workspace root
    #[serde(default)]
    pub root: String,

    /// Source root; defaults to `<root>/src` when absent
    #[serde(default)]
    pub source_root: Option<String>,

    /// `application` or `library`
    #[serde(default)]
    pub project_type: Option<String>,

    /// Selector prefix for generated units
    #[serde(default)]
    pub prefix: Option<String>,
}

impl Project {
    /// Directory generated units are wired into
    ///
    /// `<sourceRoot>/app` for applications, `<sourceRoot>/lib` for
    /// libraries, always workspace-absolute.
    #[must_use]
    pub fn unit_dir(&self) -> String {
        let source_root = match &self.source_root {
            Some(s) => s.clone(),
            None if self.root.is_empty() => "src".to_string(),
            None => format!("{}/src", self.root),
        };
        let leaf = match self.project_type.as_deref() {
            Some("library") => "lib",
            _ => "app",
        };
        format!("/{}/{leaf}", source_root.trim_matches('/'))
    }
}

/// Load and parse the workspace manifest from the staged tree
///
/// # Errors
/// Returns [`ScaffoldError::BadWorkspace`] if the manifest is absent or not
/// valid JSON.
pub async fn load_workspace(tree: &mut StagedSourceTree) -> Result<Workspace, ScaffoldError> {
    let text = tree
        .current_text(WORKSPACE_MANIFEST_PATH)
        .map_err(|_| ScaffoldError::BadWorkspace("manifest file missing".to_string()))?;
    serde_json::from_str(text).map_err(|err| ScaffoldError::BadWorkspace(err.to_string()))
}

/// Directory generated units are wired into for a project
///
/// With `project = None` the manifest's default project is used.
///
/// # Errors
/// Returns [`ScaffoldError::ProjectNotFound`] if the project (or the
/// default, when none is named) is missing from the manifest.
pub async fn default_project_path(
    tree: &mut StagedSourceTree,
    project: Option<&str>,
) -> Result<String, ScaffoldError> {
    let workspace = load_workspace(tree).await?;
    let name = match project {
        Some(name) => name.to_string(),
        None => workspace
            .default_project
            .clone()
            .ok_or_else(|| ScaffoldError::ProjectNotFound("<default>".to_string()))?,
    };
    let entry = workspace
        .projects
        .get(&name)
        .ok_or(ScaffoldError::ProjectNotFound(name))?;
    Ok(entry.unit_dir())
}
