//! Tree-sitter parser integration for JavaScript/TypeScript
//!
//! Provides parsing using tree-sitter grammars for JS/TS/JSX/TSX. Tree-sitter
//! always recovers into some tree, so a tree carrying error or missing nodes is
//! reported as a parse failure and left to the regex fallback.

use crate::core::ast::{JsLanguageVariant, SourceAst};
use crate::core::types::extension_of;
use crate::errors::{Error, Result};
use tree_sitter::{Language as TsLanguage, Node, Parser, Tree};

/// Get the tree-sitter language for a JS variant
fn get_language(variant: JsLanguageVariant) -> TsLanguage {
    match variant {
        JsLanguageVariant::JavaScript | JsLanguageVariant::Jsx => {
            tree_sitter_javascript::LANGUAGE.into()
        }
        JsLanguageVariant::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        JsLanguageVariant::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}

/// Parse JavaScript/TypeScript source code into a tree-sitter AST
pub fn parse_source(content: &str, path: &str) -> Result<SourceAst> {
    let variant = detect_variant(path);
    let mut parser = Parser::new();

    parser
        .set_language(&get_language(variant))
        .map_err(|e| Error::parse(path, format!("failed to load grammar: {e}")))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| Error::parse(path, "parser returned no tree"))?;

    if has_parse_errors(&tree) {
        let line = first_error_line(&tree.root_node()).unwrap_or(1);
        return Err(Error::parse(path, format!("syntax error near line {line}")));
    }

    Ok(SourceAst {
        tree,
        path: path.to_string(),
        source: content.to_string(),
        language_variant: variant,
    })
}

/// Determine language variant from file path
pub fn detect_variant(path: &str) -> JsLanguageVariant {
    extension_of(path)
        .and_then(JsLanguageVariant::from_extension)
        .unwrap_or(JsLanguageVariant::JavaScript)
}

/// Check if a parse tree has errors
pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

fn first_error_line(node: &Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node_line(node));
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(|child| child.has_error())
        .find_map(|child| first_error_line(&child));
    found
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_variant() {
        assert_eq!(detect_variant("test.js"), JsLanguageVariant::JavaScript);
        assert_eq!(detect_variant("test.mjs"), JsLanguageVariant::JavaScript);
        assert_eq!(detect_variant("test.jsx"), JsLanguageVariant::Jsx);
        assert_eq!(detect_variant("test.ts"), JsLanguageVariant::TypeScript);
        assert_eq!(detect_variant("src/ui/test.tsx"), JsLanguageVariant::Tsx);
        assert_eq!(detect_variant("notes.txt"), JsLanguageVariant::JavaScript);
    }

    #[test]
    fn test_parse_javascript() {
        let source = "function hello() { return 'world'; }";
        let ast = parse_source(source, "test.js").unwrap();
        assert!(!has_parse_errors(&ast.tree));
        assert_eq!(ast.language_variant, JsLanguageVariant::JavaScript);
    }

    #[test]
    fn test_parse_typescript() {
        let source = "function hello(name: string): string { return `Hello ${name}`; }";
        let ast = parse_source(source, "test.ts").unwrap();
        assert_eq!(ast.language_variant, JsLanguageVariant::TypeScript);
    }

    #[test]
    fn test_parse_tsx() {
        let source = "const App = ({ title }: { title: string }) => <div>{title}</div>;";
        let ast = parse_source(source, "App.tsx").unwrap();
        assert_eq!(ast.language_variant, JsLanguageVariant::Tsx);
    }

    #[test]
    fn test_unbalanced_braces_fail() {
        let source = "export function broken(a) {\n  if (a) {\n    return 1;\n";
        let err = parse_source(source, "broken.ts").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_node_text() {
        let source = "const x = 42;";
        let ast = parse_source(source, "test.js").unwrap();
        let root = ast.tree.root_node();
        assert_eq!(node_text(&root, &ast.source), source);
        assert_eq!(node_line(&root), 1);
    }
}
