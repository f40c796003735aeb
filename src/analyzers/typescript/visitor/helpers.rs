//! Helper functions for TypeScript/JavaScript fact extraction
//!
//! Name, parameter and prop extraction shared by the walker.

use crate::analyzers::typescript::parser::node_text;
use tree_sitter::Node;

pub fn field_text(node: &Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| node_text(&n, source).to_string())
}

pub fn has_async_modifier(node: &Node) -> bool {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).any(|c| c.kind() == "async");
    result
}

/// True for a node sitting directly in the program body, or in an export
/// statement that does
pub fn is_module_scope(node: &Node) -> bool {
    match node.parent() {
        Some(parent) if parent.kind() == "program" => true,
        Some(parent) if parent.kind() == "export_statement" => parent
            .parent()
            .is_some_and(|grandparent| grandparent.kind() == "program"),
        _ => false,
    }
}

pub fn is_exported(node: &Node) -> bool {
    node.parent()
        .is_some_and(|parent| parent.kind() == "export_statement")
}

pub fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Strip the leading `:` of a type annotation
pub fn annotation_text(node: &Node, field: &str, source: &str) -> Option<String> {
    field_text(node, field, source)
        .map(|text| text.trim_start_matches(':').trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Parameter names for a function-like node, in declaration order
pub fn parameter_names(node: &Node, source: &str) -> Vec<String> {
    if let Some(single) = node.child_by_field_name("parameter") {
        return vec![pattern_name(&single, source)];
    }

    let Some(params) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut cursor = params.walk();
    let names = params
        .named_children(&mut cursor)
        .filter(|param| param.kind() != "comment")
        .map(|param| pattern_name(&param, source))
        .filter(|name| !name.is_empty())
        .collect();
    names
}

fn pattern_name(node: &Node, source: &str) -> String {
    match node.kind() {
        "required_parameter" | "optional_parameter" => node
            .child_by_field_name("pattern")
            .map(|pattern| pattern_name(&pattern, source))
            .unwrap_or_default(),
        "assignment_pattern" => node
            .child_by_field_name("left")
            .map(|left| pattern_name(&left, source))
            .unwrap_or_default(),
        "rest_pattern" => node
            .named_child(0)
            .map(|inner| pattern_name(&inner, source))
            .unwrap_or_default(),
        _ => collapse_whitespace(node_text(node, source)),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Prop names destructured from the first parameter, if it is an object pattern
pub fn destructured_props(node: &Node, source: &str) -> Vec<String> {
    let Some(params) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let mut cursor = params.walk();
    let first = params
        .named_children(&mut cursor)
        .find(|param| param.kind() != "comment");

    let pattern = match first {
        Some(param) if param.kind() == "object_pattern" => param,
        Some(param) if matches!(param.kind(), "required_parameter" | "optional_parameter") => {
            match param.child_by_field_name("pattern") {
                Some(pattern) if pattern.kind() == "object_pattern" => pattern,
                _ => return Vec::new(),
            }
        }
        _ => return Vec::new(),
    };

    let mut cursor = pattern.walk();
    let props = pattern
        .named_children(&mut cursor)
        .filter_map(|entry| match entry.kind() {
            "shorthand_property_identifier_pattern" => Some(node_text(&entry, source).to_string()),
            "pair_pattern" => field_text(&entry, "key", source),
            "object_assignment_pattern" => field_text(&entry, "left", source),
            _ => None,
        })
        .collect();
    props
}

/// Superclass expression of a class declaration, for both grammar shapes
pub fn superclass_name(class_node: &Node, source: &str) -> Option<String> {
    let mut cursor = class_node.walk();
    let heritage = class_node
        .children(&mut cursor)
        .find(|child| child.kind() == "class_heritage")?;

    let mut cursor = heritage.walk();
    let children: Vec<Node> = heritage.named_children(&mut cursor).collect();

    // TypeScript wraps the expression in an extends_clause
    if let Some(extends) = children.iter().find(|c| c.kind() == "extends_clause") {
        return extends
            .child_by_field_name("value")
            .or_else(|| extends.named_child(0))
            .map(|value| node_text(&value, source).to_string());
    }

    children
        .iter()
        .find(|c| c.kind() != "implements_clause")
        .map(|value| node_text(value, source).to_string())
}

/// Method names declared directly in a class body
pub fn class_method_names(class_node: &Node, source: &str) -> Vec<String> {
    let Some(body) = class_node.child_by_field_name("body") else {
        return Vec::new();
    };
    let mut cursor = body.walk();
    let methods = body
        .named_children(&mut cursor)
        .filter(|member| member.kind() == "method_definition")
        .filter_map(|member| field_text(&member, "name", source))
        .collect();
    methods
}

/// Names a call's callee resolves to.
///
/// `foo()` yields `foo`; `a.b.c()` yields the property `c` and the root
/// object `a`.
pub fn callee_names<'a>(call: &Node, source: &'a str) -> Vec<&'a str> {
    let Some(callee) = call.child_by_field_name("function") else {
        return Vec::new();
    };

    match callee.kind() {
        "identifier" => vec![node_text(&callee, source)],
        "member_expression" => {
            let mut names = Vec::new();
            if let Some(property) = callee.child_by_field_name("property") {
                names.push(node_text(&property, source));
            }
            let mut object = callee.child_by_field_name("object");
            while let Some(current) = object {
                if current.kind() == "member_expression" {
                    object = current.child_by_field_name("object");
                    continue;
                }
                if current.kind() == "identifier" {
                    names.push(node_text(&current, source));
                }
                break;
            }
            names
        }
        _ => Vec::new(),
    }
}

pub fn is_hook_name(name: &str) -> bool {
    name.strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

const API_CALLEES: &[&str] = &["fetch", "axios", "request"];

pub fn is_api_callee(name: &str) -> bool {
    API_CALLEES.contains(&name)
}

pub fn is_validation_callee(name: &str) -> bool {
    let lower = name.to_lowercase();
    ["validate", "schema", "zod"]
        .iter()
        .any(|marker| lower.contains(marker))
}
