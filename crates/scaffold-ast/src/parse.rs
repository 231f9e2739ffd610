//! Syntax tree provider
//!
//! Thin wrapper over tree-sitter's TypeScript grammar. A [`SyntaxTree`] owns
//! the exact text it was parsed from, so byte offsets it reports can never be
//! read against a different snapshot.

use tree_sitter::Node;

/// Errors raised while constructing a parser
///
/// Malformed *input* never errors; the grammar produces a best-effort tree
/// with error nodes and the locator simply fails to find anchors in them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    /// Grammar could not be loaded into the parser
    #[error("parser initialization failed: {0}")]
    ParserInit(String),

    /// Parser returned no tree
    #[error("parse failed")]
    ParseFailed,
}

/// Immutable syntax tree tied to one text snapshot
pub struct SyntaxTree {
    text: String,
    tree: tree_sitter::Tree,
}

impl SyntaxTree {
    /// Source text the tree was built from
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Root node
    #[inline]
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Text covered by a node of this tree
    #[inline]
    #[must_use]
    pub fn node_text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.text.as_bytes()).unwrap_or("")
    }

    /// All nodes in document (preorder) order
    #[must_use]
    pub fn preorder(&self) -> Vec<Node<'_>> {
        let mut nodes = Vec::new();
        collect_preorder(self.root(), &mut nodes);
        nodes
    }
}

fn collect_preorder<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    out.push(node);
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            collect_preorder(child, out);
        }
    }
}

/// Parse a text snapshot into a [`SyntaxTree`]
///
/// Pure and total over the input text: malformed TypeScript yields a tree
/// containing error nodes rather than an error.
///
/// # Errors
/// Returns [`ParseError::ParserInit`] only if the bundled grammar cannot be
/// loaded, which indicates a build problem rather than bad input.
pub fn parse(text: impl Into<String>) -> Result<SyntaxTree, ParseError> {
    let text = text.into();

    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .map_err(|e| ParseError::ParserInit(e.to_string()))?;

    let tree = parser.parse(&text, None).ok_or(ParseError::ParseFailed)?;

    Ok(SyntaxTree { text, tree })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_source() {
        let tree = parse("const x = 1;").unwrap();
        assert_eq!(tree.root().kind(), "program");
        assert!(!tree.root().has_error());
    }

    #[test]
    fn malformed_input_yields_tree_with_error_nodes() {
        let tree = parse("const = = = {{{").unwrap();
        assert_eq!(tree.root().kind(), "program");
        assert!(tree.root().has_error());
    }

    #[test]
    fn node_text_matches_byte_range() {
        let tree = parse("const answer = 42;").unwrap();
        let ident = tree
            .preorder()
            .into_iter()
            .find(|n| n.kind() == "identifier")
            .unwrap();
        assert_eq!(tree.node_text(ident), "answer");
        assert_eq!(&tree.text()[ident.byte_range()], "answer");
    }

    #[test]
    fn preorder_is_document_order() {
        let tree = parse("const a = 1;\nconst b = 2;").unwrap();
        let idents: Vec<_> = tree
            .preorder()
            .into_iter()
            .filter(|n| n.kind() == "identifier")
            .map(|n| tree.node_text(n).to_string())
            .collect();
        assert_eq!(idents, vec!["a", "b"]);
    }
}
