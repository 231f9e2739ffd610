//! Scaffold Syntax Layer
//!
//! Parses TypeScript sources into immutable syntax trees and resolves
//! semantic insertion targets (a named array literal, a decorator property,
//! an import list, a reducer case, a type union) to byte-anchored
//! [`InsertionPoint`] values that the staged tree can splice fragments at.
//!
//! The engine treats source code as a partially-understood program: it only
//! needs to find well-formed anchor constructs, so parsing is best-effort
//! and never rejects malformed input.
//!
//! # Example
//!
//! ```rust
//! use scaffold_ast::{locate, parse, InsertionTarget};
//!
//! let tree = parse("export const ROUTES = [];").unwrap();
//! let target = InsertionTarget::named_array("ROUTES");
//! let points = locate(&tree, &target).unwrap();
//! assert_eq!(points.len(), 1);
//! ```

mod locate;
mod parse;
mod target;

pub use locate::{import_synthesis_point, locate, LocateError};
pub use parse::{parse, ParseError, SyntaxTree};
pub use target::{InsertionPoint, InsertionTarget};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
