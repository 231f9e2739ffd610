//! Schematic step constructors
//!
//! Ready-made [`MutationStep`]s for the wiring edits generated units need:
//! registering a route, declaring a symbol in a module decorator, extending
//! an import list, adding a reducer handler, widening an action union. Each
//! constructor owns its separator logic, keyed off whether the resolved
//! anchor already has content.

use scaffold_ast::InsertionTarget;

use crate::step::MutationStep;
use crate::strings::{classify, dasherize};

/// Register a unit in the `ROUTES` array of a route table file
///
/// `name` is the free-form unit name; the entry's title is its classified
/// form and its path the dasherized form.
#[must_use]
pub fn add_route_to_routes(path: impl Into<String>, name: &str) -> MutationStep {
    let title = classify(name);
    let route = dasherize(name);
    MutationStep::new(
        format!("add-route:{route}"),
        path,
        InsertionTarget::named_array("ROUTES"),
        move |point| {
            let entry = format!("{{\n    title: '{title}',\n    path: '/{route}'\n  }}");
            if point.anchor_populated() {
                format!(", {entry}")
            } else {
                entry
            }
        },
    )
}

/// Add a symbol to an array-valued property of a class decorator
///
/// E.g. `declarations` of `@NgModule`. The property must already exist; a
/// module without it is reported as a missing anchor, never patched up.
#[must_use]
pub fn add_declaration_to_module(
    path: impl Into<String>,
    decorator: impl Into<String>,
    property: impl Into<String>,
    symbol: impl Into<String>,
) -> MutationStep {
    let symbol = symbol.into();
    let property = property.into();
    MutationStep::new(
        format!("add-declaration:{symbol}"),
        path,
        InsertionTarget::decorator_property(decorator, property),
        move |point| {
            if point.anchor_populated() {
                format!(", {symbol}")
            } else {
                symbol.clone()
            }
        },
    )
}

/// Add symbols to the named import list for a module specifier
///
/// Extends the existing list when the file already imports from `specifier`;
/// otherwise synthesizes a whole `import { ... } from '...';` declaration
/// after the last import (or at the top of the file).
#[must_use]
pub fn insert_import(
    path: impl Into<String>,
    symbols: &[&str],
    specifier: impl Into<String>,
) -> MutationStep {
    let specifier = specifier.into();
    let list = symbols.join(", ");
    let extend_list = list.clone();
    let synth_specifier = specifier.clone();
    MutationStep::new(
        format!("insert-import:{specifier}"),
        path,
        InsertionTarget::named_import(specifier),
        move |point| {
            if point.anchor_populated() {
                format!(", {extend_list}")
            } else {
                extend_list.clone()
            }
        },
    )
    .or_synthesize_import(move |point| {
        let declaration = format!("import {{ {list} }} from '{synth_specifier}';");
        if point.anchor_populated() {
            format!("\n{declaration}")
        } else {
            format!("{declaration}\n")
        }
    })
}

/// Add an argument to the call a reducer case delegates to
///
/// The argument lands before the last existing argument, matching how
/// handler lists grow with the state argument kept last.
#[must_use]
pub fn add_case_argument(
    path: impl Into<String>,
    function: impl Into<String>,
    case: impl Into<String>,
    argument: impl Into<String>,
) -> MutationStep {
    let argument = argument.into();
    MutationStep::new(
        format!("add-case-argument:{argument}"),
        path,
        InsertionTarget::switch_case_call(function, case),
        move |point| {
            if point.anchor_populated() {
                format!("{argument}, ")
            } else {
                argument.clone()
            }
        },
    )
}

/// Widen a type alias union with a new member
#[must_use]
pub fn add_union_member(
    path: impl Into<String>,
    alias: impl Into<String>,
    member: impl Into<String>,
) -> MutationStep {
    let member = member.into();
    MutationStep::new(
        format!("add-union-member:{member}"),
        path,
        InsertionTarget::type_alias_union(alias),
        move |_| format!(" | {member}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scaffold_tree::{MemoryStore, StagedSourceTree};

    use crate::orchestrator::MutationPlan;

    fn apply(step: MutationStep, path: &str, text: &str) -> String {
        let mut tree =
            StagedSourceTree::new(Box::new(MemoryStore::new().with_file(path, text)));
        MutationPlan::new().with_step(step).run(&mut tree).unwrap();
        tree.current_text(path).unwrap().to_string()
    }

    #[test]
    fn route_entry_in_empty_table() {
        let out = apply(
            add_route_to_routes("/routes.ts", "my page"),
            "/routes.ts",
            "export const ROUTES = [];",
        );
        assert_eq!(
            out,
            "export const ROUTES = [{\n    title: 'MyPage',\n    path: '/my-page'\n  }];"
        );
    }

    #[test]
    fn route_entry_after_existing() {
        let out = apply(
            add_route_to_routes("/routes.ts", "about"),
            "/routes.ts",
            "export const ROUTES = [{ path: '/home' }];",
        );
        assert_eq!(
            out,
            "export const ROUTES = [{ path: '/home' }, {\n    title: 'About',\n    path: '/about'\n  }];"
        );
    }

    #[test]
    fn declaration_appends_with_separator() {
        let out = apply(
            add_declaration_to_module("/m.ts", "NgModule", "declarations", "HomeComponent"),
            "/m.ts",
            "@NgModule({ declarations: [AppComponent] })\nexport class AppModule {}",
        );
        assert_eq!(
            out,
            "@NgModule({ declarations: [AppComponent, HomeComponent] })\nexport class AppModule {}"
        );
    }

    #[test]
    fn import_extends_existing_list() {
        let out = apply(
            insert_import("/a.ts", &["loadHome"], "./home/actions"),
            "/a.ts",
            "import { init } from './home/actions';\n",
        );
        assert_eq!(out, "import { init, loadHome } from './home/actions';\n");
    }

    #[test]
    fn import_synthesized_after_last_import() {
        let out = apply(
            insert_import("/a.ts", &["loadHome", "homeLoaded"], "./home/actions"),
            "/a.ts",
            "import { Component } from '@angular/core';\n\nexport class A {}\n",
        );
        assert_eq!(
            out,
            "import { Component } from '@angular/core';\nimport { loadHome, homeLoaded } from './home/actions';\n\nexport class A {}\n"
        );
    }

    #[test]
    fn import_synthesized_at_top_of_importless_file() {
        let out = apply(
            insert_import("/a.ts", &["loadHome"], "./home/actions"),
            "/a.ts",
            "export class A {}\n",
        );
        assert_eq!(
            out,
            "import { loadHome } from './home/actions';\nexport class A {}\n"
        );
    }

    #[test]
    fn case_argument_lands_before_last() {
        let out = apply(
            add_case_argument("/r.ts", "reducer", "Kind.loaded", "onHome"),
            "/r.ts",
            "function reducer(s, a) {\n  switch (a.kind) {\n    case Kind.loaded:\n      return on(s);\n  }\n}\n",
        );
        assert_eq!(
            out,
            "function reducer(s, a) {\n  switch (a.kind) {\n    case Kind.loaded:\n      return on(onHome, s);\n  }\n}\n"
        );
    }

    #[test]
    fn union_member_appends_at_end() {
        let out = apply(
            add_union_member("/t.ts", "Actions", "HomeActions"),
            "/t.ts",
            "type Actions = Init | Load;\n",
        );
        assert_eq!(out, "type Actions = Init | Load | HomeActions;\n");
    }
}
