//! Insertion targets and points
//!
//! An [`InsertionTarget`] is a semantic descriptor of an anchor construct; a
//! closed set of variants so the locator is a total match over them rather
//! than untyped tree-walking. Resolving one against a [`SyntaxTree`] yields
//! [`InsertionPoint`] values: byte offsets plus the side the fragment
//! attaches to.
//!
//! [`SyntaxTree`]: crate::SyntaxTree

use scaffold_tree::{Change, Side};

/// Semantic descriptor of an anchor construct
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertionTarget {
    /// Array literal initializing a top-level `const`/`let` declaration,
    /// e.g. `export const ROUTES = [...]`
    NamedArray {
        /// Identifier the array is bound to
        identifier: String,
    },

    /// Array-valued property of a decorator's argument object,
    /// e.g. `declarations` of `@NgModule({ declarations: [...] })`
    DecoratorProperty {
        /// Decorator name, without the `@`
        decorator: String,
        /// Property key inside the argument object
        property: String,
    },

    /// Named import list of the declaration importing a module specifier,
    /// e.g. `{ A, B }` of `import { A, B } from './actions';`
    NamedImport {
        /// Module specifier, exactly as written between the quotes
        specifier: String,
    },

    /// Argument list of the call a switch case reduces to,
    /// e.g. `on(...)` inside `case Kind.loaded:` of function `reducer`
    SwitchCaseCall {
        /// Enclosing function declaration name
        function: String,
        /// Case discriminant, exactly as written after `case`
        case: String,
    },

    /// Union members of a type alias, e.g. `type Actions = A | B`
    TypeAliasUnion {
        /// Alias name
        alias: String,
    },
}

impl InsertionTarget {
    /// Named-array-literal target
    #[inline]
    #[must_use]
    pub fn named_array(identifier: impl Into<String>) -> Self {
        Self::NamedArray {
            identifier: identifier.into(),
        }
    }

    /// Decorator-property-array target
    #[inline]
    #[must_use]
    pub fn decorator_property(decorator: impl Into<String>, property: impl Into<String>) -> Self {
        Self::DecoratorProperty {
            decorator: decorator.into(),
            property: property.into(),
        }
    }

    /// Named-import-list target
    #[inline]
    #[must_use]
    pub fn named_import(specifier: impl Into<String>) -> Self {
        Self::NamedImport {
            specifier: specifier.into(),
        }
    }

    /// Switch-case call-argument target
    #[inline]
    #[must_use]
    pub fn switch_case_call(function: impl Into<String>, case: impl Into<String>) -> Self {
        Self::SwitchCaseCall {
            function: function.into(),
            case: case.into(),
        }
    }

    /// Type-alias-union target
    #[inline]
    #[must_use]
    pub fn type_alias_union(alias: impl Into<String>) -> Self {
        Self::TypeAliasUnion {
            alias: alias.into(),
        }
    }
}

impl std::fmt::Display for InsertionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NamedArray { identifier } => {
                write!(f, "array literal bound to '{identifier}'")
            }
            Self::DecoratorProperty {
                decorator,
                property,
            } => write!(f, "property '{property}' of decorator '@{decorator}'"),
            Self::NamedImport { specifier } => {
                write!(f, "named import list for '{specifier}'")
            }
            Self::SwitchCaseCall { function, case } => {
                write!(f, "call arguments of case '{case}' in function '{function}'")
            }
            Self::TypeAliasUnion { alias } => write!(f, "union of type alias '{alias}'"),
        }
    }
}

/// Resolved anchor position inside one snapshot
///
/// Valid only against the exact text of the [`SyntaxTree`] that produced it.
///
/// [`SyntaxTree`]: crate::SyntaxTree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPoint {
    offset: usize,
    side: Side,
    anchor_populated: bool,
}

impl InsertionPoint {
    #[inline]
    #[must_use]
    pub(crate) fn new(offset: usize, side: Side, anchor_populated: bool) -> Self {
        Self {
            offset,
            side,
            anchor_populated,
        }
    }

    /// Byte offset of the anchor
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Side of the anchor the fragment attaches to
    #[inline]
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Whether the anchor already has content, so the fragment needs a
    /// separator (`, `, `|`, ...) to compose with it
    #[inline]
    #[must_use]
    pub fn anchor_populated(&self) -> bool {
        self.anchor_populated
    }

    /// Combine with a caller-supplied fragment into a [`Change`]
    #[inline]
    #[must_use]
    pub fn to_change(self, path: impl Into<String>, fragment: impl Into<String>) -> Change {
        Change::new(path, self.offset, self.side, fragment)
    }
}
