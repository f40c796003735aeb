//! Import extraction for TypeScript/JavaScript
//!
//! Turns an `import_statement` node into an [`ImportInfo`] row.

use crate::analyzers::typescript::parser::node_text;
use crate::core::{ImportInfo, ImportKind};
use tree_sitter::Node;

/// Build the import row for an `import_statement` node.
///
/// Returns `None` when the statement has no module source (malformed input
/// that tree-sitter recovered from).
pub fn extract_import(node: &Node, source: &str) -> Option<ImportInfo> {
    let module = node.child_by_field_name("source")?;
    let specifier = extract_string_value(&module, source);

    let mut names = Vec::new();
    let mut kind = ImportKind::Named;
    let mut first_binding = true;

    let mut cursor = node.walk();
    let clause = node
        .children(&mut cursor)
        .find(|child| child.kind() == "import_clause");

    if let Some(clause) = clause {
        let mut cursor = clause.walk();
        for binding in clause.named_children(&mut cursor) {
            match binding.kind() {
                "identifier" => {
                    names.push(node_text(&binding, source).to_string());
                    if first_binding {
                        kind = ImportKind::Default;
                    }
                }
                "namespace_import" => {
                    if let Some(alias) = binding.named_child(0) {
                        names.push(node_text(&alias, source).to_string());
                    }
                    kind = ImportKind::Namespace;
                }
                "named_imports" => {
                    names.extend(named_import_bindings(&binding, source));
                }
                _ => continue,
            }
            first_binding = false;
        }
    }

    Some(ImportInfo {
        source: specifier,
        names,
        kind,
    })
}

/// Local binding names inside `{ a, b as c }`
fn named_import_bindings(node: &Node, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    let names = node
        .named_children(&mut cursor)
        .filter(|spec| spec.kind() == "import_specifier")
        .filter_map(|spec| {
            spec.child_by_field_name("alias")
                .or_else(|| spec.child_by_field_name("name"))
                .map(|binding| node_text(&binding, source).to_string())
        })
        .collect();
    names
}

fn extract_string_value(node: &Node, source: &str) -> String {
    let text = node_text(node, source);
    // Remove quotes
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}
