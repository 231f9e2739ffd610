//! Scaffold Core
//!
//! Orchestrates structural source mutation: ordered [`MutationStep`]s grouped
//! into [`MutationPlan`]s, composed with other [`Rule`]s into chains, all
//! executed against one per-run [`StagedSourceTree`]. The ready-made
//! constructors in [`schematic`] cover the wiring edits a freshly generated
//! unit needs: route registration, module declaration, imports, reducer
//! handlers, action unions.
//!
//! Runs are neither atomic nor idempotent: a failed step leaves earlier
//! commits in place, and re-running a plan inserts its fragments again.
//!
//! # Example
//!
//! ```rust
//! use scaffold_core::schematic::add_route_to_routes;
//! use scaffold_core::MutationPlan;
//! use scaffold_tree::{MemoryStore, StagedSourceTree};
//!
//! let store = MemoryStore::new().with_file("/routes.ts", "export const ROUTES = [];");
//! let mut tree = StagedSourceTree::new(Box::new(store));
//!
//! let plan = MutationPlan::new().with_step(add_route_to_routes("/routes.ts", "home"));
//! plan.run(&mut tree).unwrap();
//!
//! assert!(tree.current_text("/routes.ts").unwrap().contains("path: '/home'"));
//! ```

mod error;
mod orchestrator;
mod rule;
pub mod schematic;
mod step;
pub mod strings;
mod workspace;

pub use error::ScaffoldError;
pub use orchestrator::MutationPlan;
pub use rule::{chain, Chain, Rule, StageFiles};
pub use step::{FragmentBuilder, MutationStep};
pub use workspace::{
    default_project_path, load_workspace, Project, Workspace, WORKSPACE_MANIFEST_PATH,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
