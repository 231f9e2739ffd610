//! Insertion-point locator
//!
//! One matching function per [`InsertionTarget`] variant over tree-sitter
//! nodes. Matches are resolved in document order, so repeated runs against
//! structurally identical files produce byte-identical output for the same
//! fragment. A missing or malformed anchor is a distinct
//! [`LocateError::TargetNotFound`], never a silent no-op.

use scaffold_tree::Side;
use tree_sitter::Node;

use crate::parse::SyntaxTree;
use crate::target::{InsertionPoint, InsertionTarget};

/// Errors raised while resolving an insertion target
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocateError {
    /// The semantic anchor is absent or not shaped as required
    #[error("target not found: {0}")]
    TargetNotFound(String),
}

fn not_found(detail: impl Into<String>) -> LocateError {
    LocateError::TargetNotFound(detail.into())
}

/// Resolve a target against one syntax tree
///
/// Returned points are in document order and valid only against the exact
/// text the tree was parsed from.
///
/// # Errors
/// Returns [`LocateError::TargetNotFound`] when the anchor construct is
/// absent, with a message naming what was missing.
pub fn locate(
    tree: &SyntaxTree,
    target: &InsertionTarget,
) -> Result<Vec<InsertionPoint>, LocateError> {
    let point = match target {
        InsertionTarget::NamedArray { identifier } => named_array(tree, identifier)?,
        InsertionTarget::DecoratorProperty {
            decorator,
            property,
        } => decorator_property(tree, decorator, property)?,
        InsertionTarget::NamedImport { specifier } => named_import(tree, specifier)?,
        InsertionTarget::SwitchCaseCall { function, case } => {
            switch_case_call(tree, function, case)?
        }
        InsertionTarget::TypeAliasUnion { alias } => type_alias_union(tree, alias)?,
    };
    Ok(vec![point])
}

/// Position for synthesizing a brand-new import declaration
///
/// Distinct from appending to an existing named import list: used when
/// [`locate`] fails for a [`InsertionTarget::NamedImport`] and the caller
/// falls back to emitting a whole `import ... from '...';` statement. Lands
/// after the last top-level import, or at the very top of the file when
/// there is none; the populated flag says whether any import precedes it.
#[must_use]
pub fn import_synthesis_point(tree: &SyntaxTree) -> InsertionPoint {
    let last_import = tree
        .preorder()
        .into_iter()
        .filter(|n| n.kind() == "import_statement")
        .filter(|n| n.parent().is_some_and(|p| p.kind() == "program"))
        .last();

    match last_import {
        Some(node) => InsertionPoint::new(node.end_byte(), Side::After, true),
        None => InsertionPoint::new(0, Side::Before, false),
    }
}

// --- variant matchers, one per InsertionTarget -----------------------------

fn named_array(tree: &SyntaxTree, identifier: &str) -> Result<InsertionPoint, LocateError> {
    let declarator = tree
        .preorder()
        .into_iter()
        .filter(|n| n.kind() == "variable_declarator" && is_top_level_declarator(*n))
        .find(|n| {
            n.child_by_field_name("name")
                .is_some_and(|name| tree.node_text(name) == identifier)
        })
        .ok_or_else(|| not_found(format!("no top-level declaration of '{identifier}'")))?;

    let value = declarator
        .child_by_field_name("value")
        .filter(|v| v.kind() == "array")
        .ok_or_else(|| {
            not_found(format!(
                "initializer of '{identifier}' is not an array literal"
            ))
        })?;

    array_append_point(value)
}

fn decorator_property(
    tree: &SyntaxTree,
    decorator: &str,
    property: &str,
) -> Result<InsertionPoint, LocateError> {
    // First decorator application with the given name, in document order.
    let application = tree
        .preorder()
        .into_iter()
        .filter(|n| n.kind() == "decorator")
        .find(|n| decorator_name(tree, *n) == Some(decorator))
        .ok_or_else(|| not_found(format!("decorator '@{decorator}' not found")))?;

    let object = application
        .named_child(0)
        .filter(|inner| inner.kind() == "call_expression")
        .and_then(|call| call.child_by_field_name("arguments"))
        .and_then(|args| named_children(args).into_iter().find(|n| n.kind() == "object"))
        .ok_or_else(|| not_found(format!("decorator '@{decorator}' has no argument object")))?;

    // Missing property is not synthesized.
    let pair = named_children(object)
        .into_iter()
        .filter(|n| n.kind() == "pair")
        .find(|n| {
            n.child_by_field_name("key")
                .is_some_and(|key| property_key_text(tree, key) == property)
        })
        .ok_or_else(|| {
            not_found(format!(
                "property '{property}' of decorator '@{decorator}' not present"
            ))
        })?;

    let value = pair
        .child_by_field_name("value")
        .filter(|v| v.kind() == "array")
        .ok_or_else(|| {
            not_found(format!(
                "property '{property}' of decorator '@{decorator}' is not an array"
            ))
        })?;

    array_append_point(value)
}

fn named_import(tree: &SyntaxTree, specifier: &str) -> Result<InsertionPoint, LocateError> {
    let import = tree
        .preorder()
        .into_iter()
        .filter(|n| n.kind() == "import_statement")
        .find(|n| {
            n.child_by_field_name("source")
                .is_some_and(|source| string_content(tree, source) == specifier)
        })
        .ok_or_else(|| not_found(format!("no import declaration for '{specifier}'")))?;

    let named = named_children(import)
        .into_iter()
        .find(|n| n.kind() == "import_clause")
        .and_then(|clause| {
            named_children(clause)
                .into_iter()
                .find(|n| n.kind() == "named_imports")
        })
        .ok_or_else(|| {
            not_found(format!(
                "import for '{specifier}' has no named import list"
            ))
        })?;

    let specifiers: Vec<Node<'_>> = named_children(named)
        .into_iter()
        .filter(|n| n.kind() == "import_specifier")
        .collect();

    match specifiers.last() {
        Some(last) => Ok(InsertionPoint::new(last.end_byte(), Side::After, true)),
        None => {
            let close = token_child(named, "}").ok_or_else(|| {
                not_found(format!("import list for '{specifier}' is malformed"))
            })?;
            Ok(InsertionPoint::new(close.start_byte(), Side::Before, false))
        }
    }
}

fn switch_case_call(
    tree: &SyntaxTree,
    function: &str,
    case: &str,
) -> Result<InsertionPoint, LocateError> {
    let func = tree
        .preorder()
        .into_iter()
        .filter(|n| n.kind() == "function_declaration")
        .find(|n| {
            n.child_by_field_name("name")
                .is_some_and(|name| tree.node_text(name) == function)
        })
        .ok_or_else(|| not_found(format!("function '{function}' not found")))?;

    let switch = subtree_preorder(func)
        .into_iter()
        .find(|n| n.kind() == "switch_statement")
        .ok_or_else(|| not_found(format!("no switch statement in function '{function}'")))?;

    let body = switch
        .child_by_field_name("body")
        .ok_or_else(|| not_found(format!("switch in '{function}' has no body")))?;

    let (case_node, value) = named_children(body)
        .into_iter()
        .filter(|n| n.kind() == "switch_case")
        .filter_map(|n| n.child_by_field_name("value").map(|v| (n, v)))
        .find(|(_, v)| tree.node_text(*v).trim() == case)
        .ok_or_else(|| not_found(format!("case '{case}' not found in '{function}'")))?;

    // Case body must be a single statement evaluating to a call.
    let statements: Vec<Node<'_>> = named_children(case_node)
        .into_iter()
        .filter(|n| n.id() != value.id() && n.kind() != "comment")
        .collect();
    let [statement] = statements[..] else {
        return Err(not_found(format!(
            "body of case '{case}' is not a single statement"
        )));
    };

    let call = match statement.kind() {
        "expression_statement" | "return_statement" => statement.named_child(0),
        _ => None,
    }
    .filter(|n| n.kind() == "call_expression")
    .ok_or_else(|| not_found(format!("case '{case}' does not evaluate to a call")))?;

    let args = call
        .child_by_field_name("arguments")
        .ok_or_else(|| not_found(format!("call in case '{case}' has no argument list")))?;
    let arg_nodes: Vec<Node<'_>> = named_children(args)
        .into_iter()
        .filter(|n| n.kind() != "comment")
        .collect();

    // New arguments are prepended immediately before the previous last
    // argument, not appended after it.
    match arg_nodes.last() {
        Some(last) => Ok(InsertionPoint::new(last.start_byte(), Side::Before, true)),
        None => {
            let close = token_child(args, ")")
                .ok_or_else(|| not_found(format!("call in case '{case}' is malformed")))?;
            Ok(InsertionPoint::new(close.start_byte(), Side::Before, false))
        }
    }
}

fn type_alias_union(tree: &SyntaxTree, alias: &str) -> Result<InsertionPoint, LocateError> {
    let declaration = tree
        .preorder()
        .into_iter()
        .filter(|n| n.kind() == "type_alias_declaration")
        .find(|n| {
            n.child_by_field_name("name")
                .is_some_and(|name| tree.node_text(name) == alias)
        })
        .ok_or_else(|| not_found(format!("type alias '{alias}' not found")))?;

    let value = declaration
        .child_by_field_name("value")
        .ok_or_else(|| not_found(format!("type alias '{alias}' has no value")))?;

    // Appending after the declared list keeps existing members in order,
    // whether or not the value is already a union.
    Ok(InsertionPoint::new(value.end_byte(), Side::After, true))
}

// --- node helpers -----------------------------------------------------------

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    (0..node.named_child_count())
        .filter_map(|i| node.named_child(i))
        .collect()
}

fn token_child<'t>(node: Node<'t>, token: &str) -> Option<Node<'t>> {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find(|c| c.kind() == token)
}

fn subtree_preorder(node: Node<'_>) -> Vec<Node<'_>> {
    let mut out = Vec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        out.push(current);
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    out
}

fn is_top_level_declarator(node: Node<'_>) -> bool {
    let Some(declaration) = node.parent() else {
        return false;
    };
    let Some(context) = declaration.parent() else {
        return false;
    };
    match context.kind() {
        "program" => true,
        "export_statement" => context.parent().is_some_and(|p| p.kind() == "program"),
        _ => false,
    }
}

fn decorator_name<'a>(tree: &'a SyntaxTree, decorator: Node<'_>) -> Option<&'a str> {
    let inner = decorator.named_child(0)?;
    match inner.kind() {
        "call_expression" => {
            let function = inner.child_by_field_name("function")?;
            (function.kind() == "identifier").then(|| tree.node_text(function))
        }
        "identifier" => Some(tree.node_text(inner)),
        _ => None,
    }
}

fn property_key_text<'a>(tree: &'a SyntaxTree, key: Node<'_>) -> &'a str {
    if key.kind() == "string" {
        string_content(tree, key)
    } else {
        tree.node_text(key)
    }
}

fn string_content<'a>(tree: &'a SyntaxTree, string: Node<'_>) -> &'a str {
    named_children(string)
        .into_iter()
        .find(|n| n.kind() == "string_fragment")
        .map(|n| tree.node_text(n))
        .unwrap_or("")
}

fn array_append_point(array: Node<'_>) -> Result<InsertionPoint, LocateError> {
    let close =
        token_child(array, "]").ok_or_else(|| not_found("array literal is malformed"))?;
    let populated = named_children(array)
        .into_iter()
        .any(|n| n.kind() != "comment");
    // Appending before the closing bracket preserves existing element order.
    Ok(InsertionPoint::new(close.start_byte(), Side::Before, populated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use pretty_assertions::assert_eq;

    fn point_for(source: &str, target: &InsertionTarget) -> InsertionPoint {
        let tree = parse(source).unwrap();
        let points = locate(&tree, target).unwrap();
        assert_eq!(points.len(), 1);
        points[0]
    }

    fn splice(source: &str, point: InsertionPoint, fragment: &str) -> String {
        let mut text = source.to_string();
        text.insert_str(point.offset(), fragment);
        text
    }

    #[test]
    fn named_array_appends_before_closing_bracket() {
        let source = "export const ROUTES = [];";
        let point = point_for(source, &InsertionTarget::named_array("ROUTES"));

        assert_eq!(point.offset(), source.find(']').unwrap());
        assert_eq!(point.side(), Side::Before);
        assert!(!point.anchor_populated());
        assert_eq!(
            splice(source, point, "{ path: '/foo' }"),
            "export const ROUTES = [{ path: '/foo' }];"
        );
    }

    #[test]
    fn named_array_reports_populated_anchor() {
        let source = "const ROUTES = [\n  { path: '/home' },\n];";
        let point = point_for(source, &InsertionTarget::named_array("ROUTES"));
        assert!(point.anchor_populated());
        assert_eq!(point.offset(), source.rfind(']').unwrap());
    }

    #[test]
    fn named_array_ignores_nested_declarations() {
        let source = "function f() { const ROUTES = []; }\nconst ROUTES = [1];";
        let point = point_for(source, &InsertionTarget::named_array("ROUTES"));
        // Only the top-level declaration qualifies.
        assert_eq!(point.offset(), source.rfind(']').unwrap());
        assert!(point.anchor_populated());
    }

    #[test]
    fn named_array_missing_identifier_fails() {
        let tree = parse("const OTHER = [];").unwrap();
        let err = locate(&tree, &InsertionTarget::named_array("ROUTES")).unwrap_err();
        assert!(matches!(err, LocateError::TargetNotFound(_)));
    }

    #[test]
    fn named_array_non_array_initializer_fails() {
        let tree = parse("const ROUTES = {};").unwrap();
        let err = locate(&tree, &InsertionTarget::named_array("ROUTES")).unwrap_err();
        assert!(err.to_string().contains("not an array literal"));
    }

    #[test]
    fn decorator_property_array_append() {
        let source = "@NgModule({\n  declarations: [AppComponent],\n  imports: [BrowserModule],\n})\nexport class AppModule {}\n";
        let point = point_for(
            source,
            &InsertionTarget::decorator_property("NgModule", "declarations"),
        );

        assert!(point.anchor_populated());
        assert_eq!(point.offset(), source.find("t],").unwrap() + 1);
        assert_eq!(
            splice(source, point, ", HomeComponent"),
            source.replace("[AppComponent]", "[AppComponent, HomeComponent]")
        );
    }

    #[test]
    fn decorator_property_absent_is_not_synthesized() {
        let source = "@NgModule({ imports: [] })\nexport class AppModule {}\n";
        let tree = parse(source).unwrap();
        let err = locate(
            &tree,
            &InsertionTarget::decorator_property("NgModule", "declarations"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("'declarations'"));
    }

    #[test]
    fn decorator_missing_fails() {
        let tree = parse("export class AppModule {}").unwrap();
        let err = locate(
            &tree,
            &InsertionTarget::decorator_property("NgModule", "declarations"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("@NgModule"));
    }

    #[test]
    fn named_import_extends_existing_list() {
        let source = "import { Foo } from './foo';\n";
        let point = point_for(source, &InsertionTarget::named_import("./foo"));

        assert_eq!(point.side(), Side::After);
        assert!(point.anchor_populated());
        assert_eq!(
            splice(source, point, ", Bar"),
            "import { Foo, Bar } from './foo';\n"
        );
    }

    #[test]
    fn named_import_empty_braces_unpopulated() {
        let source = "import {} from './foo';\n";
        let point = point_for(source, &InsertionTarget::named_import("./foo"));
        assert!(!point.anchor_populated());
        assert_eq!(
            splice(source, point, " Bar "),
            "import { Bar } from './foo';\n"
        );
    }

    #[test]
    fn named_import_missing_specifier_is_distinct_mode() {
        let source = "import { Foo } from './foo';\nconst x = 1;\n";
        let tree = parse(source).unwrap();
        let err = locate(&tree, &InsertionTarget::named_import("./bar")).unwrap_err();
        assert!(matches!(err, LocateError::TargetNotFound(_)));

        // Caller synthesizes a fresh declaration after the last import.
        let point = import_synthesis_point(&tree);
        assert_eq!(point.offset(), source.find(";\n").unwrap() + 1);
        assert!(point.anchor_populated());
        assert_eq!(
            splice(source, point, "\nimport { Bar } from './bar';"),
            "import { Foo } from './foo';\nimport { Bar } from './bar';\nconst x = 1;\n"
        );
    }

    #[test]
    fn import_synthesis_on_importless_file_targets_top() {
        let tree = parse("const x = 1;\n").unwrap();
        let point = import_synthesis_point(&tree);
        assert_eq!(point.offset(), 0);
        assert!(!point.anchor_populated());
    }

    #[test]
    fn switch_case_call_prepends_before_last_argument() {
        let source = "\
export function reducer(state = initial, action: Actions): State {
  switch (action.type) {
    case ActionTypes.componentsLoaded:
      return assign(state, FooApiActions.componentsLoaded, meta);
    default:
      return state;
  }
}
";
        let point = point_for(
            source,
            &InsertionTarget::switch_case_call("reducer", "ActionTypes.componentsLoaded"),
        );

        assert_eq!(point.side(), Side::Before);
        assert!(point.anchor_populated());
        assert_eq!(point.offset(), source.find("meta").unwrap());
        let spliced = splice(source, point, "BarApiActions.componentsLoaded, ");
        assert!(spliced.contains(
            "assign(state, FooApiActions.componentsLoaded, BarApiActions.componentsLoaded, meta)"
        ));
    }

    #[test]
    fn switch_case_call_expression_statement_body() {
        let source = "\
function notify(kind) {
  switch (kind) {
    case 'loaded':
      emit(first);
  }
}
";
        let point = point_for(
            source,
            &InsertionTarget::switch_case_call("notify", "'loaded'"),
        );
        assert_eq!(point.offset(), source.find("first").unwrap());
    }

    #[test]
    fn switch_case_missing_case_fails() {
        let source = "function f(x) { switch (x) { case 1: return g(a); } }";
        let tree = parse(source).unwrap();
        let err = locate(&tree, &InsertionTarget::switch_case_call("f", "2")).unwrap_err();
        assert!(err.to_string().contains("case '2'"));
    }

    #[test]
    fn switch_case_non_call_body_fails() {
        let source = "function f(x) { switch (x) { case 1: return 2; } }";
        let tree = parse(source).unwrap();
        let err = locate(&tree, &InsertionTarget::switch_case_call("f", "1")).unwrap_err();
        assert!(err.to_string().contains("does not evaluate to a call"));
    }

    #[test]
    fn type_alias_union_appends_after_last_member() {
        let source = "export type Actions = FooActions | BarActions;\n";
        let point = point_for(source, &InsertionTarget::type_alias_union("Actions"));

        assert_eq!(point.side(), Side::After);
        assert_eq!(point.offset(), source.find(';').unwrap());
        assert_eq!(
            splice(source, point, " | BazActions"),
            "export type Actions = FooActions | BarActions | BazActions;\n"
        );
    }

    #[test]
    fn type_alias_missing_fails() {
        let tree = parse("type Other = A;").unwrap();
        let err = locate(&tree, &InsertionTarget::type_alias_union("Actions")).unwrap_err();
        assert!(matches!(err, LocateError::TargetNotFound(_)));
    }

    #[test]
    fn locate_is_deterministic_in_document_order() {
        // Two NgModule decorators: the first one wins, every run.
        let source = "\
@NgModule({ declarations: [A] })
class First {}
@NgModule({ declarations: [B] })
class Second {}
";
        let target = InsertionTarget::decorator_property("NgModule", "declarations");
        let first = point_for(source, &target);
        let second = point_for(source, &target);
        assert_eq!(first, second);
        assert_eq!(first.offset(), source.find("A]").unwrap() + 1);
    }
}
