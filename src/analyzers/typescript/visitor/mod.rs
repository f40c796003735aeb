//! AST visitor for TypeScript/JavaScript
//!
//! One depth-first pass over the tree-sitter AST. Each node is classified into
//! a closed [`NodeKind`] once, then handled by a single `match`; children are
//! visited after their parent so enclosing components are known when their
//! hook calls are reached.

pub mod helpers;

use crate::analyzers::domain::contains_domain_keyword;
use crate::analyzers::typescript::dependencies::extract_import;
use crate::analyzers::typescript::parser::node_text;
use crate::core::ast::SourceAst;
use crate::core::{ClassInfo, CodeFacts, ComponentInfo, FileType, FunctionInfo, VariableInfo};
use tree_sitter::Node;

use helpers::{
    annotation_text, callee_names, class_method_names, destructured_props, field_text,
    has_async_modifier, is_api_callee, is_exported, is_hook_name, is_module_scope,
    is_validation_callee, parameter_names, starts_uppercase, superclass_name,
};

/// Node kinds the walker reacts to. Everything else is [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Import,
    Export,
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunction,
    MethodDefinition,
    VariableDeclarator,
    ClassDeclaration,
    CallExpression,
    Assignment,
    Try,
    If,
    Switch,
    Ternary,
    Loop,
    Other,
}

impl NodeKind {
    pub fn classify(kind: &str) -> Self {
        match kind {
            "import_statement" => Self::Import,
            "export_statement" => Self::Export,
            "function_declaration" | "generator_function_declaration" => {
                Self::FunctionDeclaration
            }
            "function_expression" | "function" | "generator_function" => Self::FunctionExpression,
            "arrow_function" => Self::ArrowFunction,
            "method_definition" => Self::MethodDefinition,
            "variable_declarator" => Self::VariableDeclarator,
            "class_declaration" | "abstract_class_declaration" => Self::ClassDeclaration,
            "call_expression" => Self::CallExpression,
            "assignment_expression" => Self::Assignment,
            "try_statement" => Self::Try,
            "if_statement" => Self::If,
            "switch_statement" => Self::Switch,
            "ternary_expression" => Self::Ternary,
            "for_statement" | "for_in_statement" | "for_of_statement" | "while_statement" => {
                Self::Loop
            }
            _ => Self::Other,
        }
    }
}

/// Walk a parsed file and collect its structural facts.
///
/// The returned facts still carry the default complexity level and no
/// suggestions; classification runs afterwards.
pub fn walk(ast: &SourceAst) -> CodeFacts {
    let mut walker = FactWalker {
        source: &ast.source,
        facts: CodeFacts::empty(FileType::from_path(&ast.path)),
        component_stack: Vec::new(),
        exported_names: Vec::new(),
    };
    walker.visit(&ast.tree.root_node());

    // Export lists may come before or after the declarations they name
    for name in &walker.exported_names {
        walker.facts.exports.mark_exported(name);
    }
    walker.facts.complexity.lines = ast.source.lines().count();
    walker.facts
}

struct FactWalker<'a> {
    source: &'a str,
    facts: CodeFacts,
    /// Indices into `facts.exports.components` for the components enclosing
    /// the current node
    component_stack: Vec<usize>,
    /// Local bindings exported by name rather than at their declaration
    exported_names: Vec<String>,
}

impl FactWalker<'_> {
    fn visit(&mut self, node: &Node) {
        let entered_component = self.enter(node);

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(&child);
        }

        if entered_component {
            self.component_stack.pop();
        }
    }

    /// Handle one node. Returns true when the node opened a component scope.
    fn enter(&mut self, node: &Node) -> bool {
        match NodeKind::classify(node.kind()) {
            NodeKind::Import => {
                if let Some(import) = extract_import(node, self.source) {
                    if contains_domain_keyword(&import.source) {
                        self.facts.patterns.has_domain_context = true;
                    }
                    self.facts.imports.push(import);
                }
            }
            NodeKind::Export => self.record_export(node),
            NodeKind::FunctionDeclaration => {
                self.mark_async(node);
                return self.record_function_declaration(node);
            }
            NodeKind::FunctionExpression | NodeKind::ArrowFunction => {
                self.mark_async(node);
                return self.record_function_value(node);
            }
            NodeKind::MethodDefinition => self.mark_async(node),
            NodeKind::VariableDeclarator => self.record_variable(node),
            NodeKind::ClassDeclaration => self.record_class(node),
            NodeKind::CallExpression => self.record_call(node),
            NodeKind::Assignment => self.record_commonjs_export(node),
            NodeKind::Try => {
                self.facts.complexity.cognitive += 1;
                self.facts.patterns.has_error_handling = true;
            }
            NodeKind::If | NodeKind::Switch | NodeKind::Ternary => {
                self.facts.complexity.cyclomatic += 1;
                self.facts.complexity.cognitive += 1;
            }
            NodeKind::Loop => {
                self.facts.complexity.cyclomatic += 1;
                self.facts.complexity.cognitive += 2;
            }
            NodeKind::Other => {}
        }
        false
    }

    fn mark_async(&mut self, node: &Node) {
        if has_async_modifier(node) {
            self.facts.patterns.has_async_code = true;
        }
    }

    fn record_export(&mut self, node: &Node) {
        // `export { a } from './other'` re-exports another module's bindings
        if node.child_by_field_name("source").is_some() {
            return;
        }

        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();

        if let Some(clause) = children.iter().find(|c| c.kind() == "export_clause") {
            self.record_export_clause(clause);
        }
        if !children.iter().any(|c| c.kind() == "default") {
            return;
        }

        let target = node
            .child_by_field_name("declaration")
            .or_else(|| node.child_by_field_name("value"));
        let name = target.and_then(|target| match target.kind() {
            "identifier" => {
                let name = node_text(&target, self.source).to_string();
                self.exported_names.push(name.clone());
                Some(name)
            }
            _ => field_text(&target, "name", self.source),
        });
        if name.is_some() {
            self.facts.exports.default_export = name;
        }
    }

    /// `export { a, b as default }`. Specifiers renamed to anything other
    /// than `default` are skipped: the local name is not importable.
    fn record_export_clause(&mut self, clause: &Node) {
        let mut cursor = clause.walk();
        for specifier in clause.named_children(&mut cursor) {
            if specifier.kind() != "export_specifier" {
                continue;
            }
            let Some(name) = field_text(&specifier, "name", self.source) else {
                continue;
            };
            match field_text(&specifier, "alias", self.source).as_deref() {
                None => self.exported_names.push(name),
                Some(alias) if alias == name => self.exported_names.push(name),
                Some("default") => {
                    self.exported_names.push(name.clone());
                    self.facts.exports.default_export = Some(name);
                }
                Some(_) => {}
            }
        }
    }

    /// `module.exports = { a, b }`, `module.exports = a` and `exports.a = a`
    fn record_commonjs_export(&mut self, node: &Node) {
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return;
        };
        if left.kind() != "member_expression" {
            return;
        }

        let target = node_text(&left, self.source);
        if target == "module.exports" {
            match right.kind() {
                "identifier" => {
                    let name = node_text(&right, self.source).to_string();
                    if self.facts.exports.default_export.is_none() {
                        self.facts.exports.default_export = Some(name.clone());
                    }
                    self.exported_names.push(name);
                }
                "object" => self.record_exported_object(&right),
                _ => {}
            }
            return;
        }

        let object = left
            .child_by_field_name("object")
            .map(|object| node_text(&object, self.source));
        let property = field_text(&left, "property", self.source);
        if matches!(object, Some("exports" | "module.exports"))
            && right.kind() == "identifier"
            && property.as_deref() == Some(node_text(&right, self.source))
        {
            self.exported_names
                .push(node_text(&right, self.source).to_string());
        }
    }

    fn record_exported_object(&mut self, object: &Node) {
        let mut cursor = object.walk();
        for entry in object.named_children(&mut cursor) {
            match entry.kind() {
                "shorthand_property_identifier" => self
                    .exported_names
                    .push(node_text(&entry, self.source).to_string()),
                "pair" => {
                    let key = field_text(&entry, "key", self.source);
                    let value = entry
                        .child_by_field_name("value")
                        .filter(|value| value.kind() == "identifier")
                        .map(|value| node_text(&value, self.source).to_string());
                    if let (Some(key), Some(value)) = (key, value) {
                        if key == value {
                            self.exported_names.push(value);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn record_function_declaration(&mut self, node: &Node) -> bool {
        let Some(name) = field_text(node, "name", self.source) else {
            return false;
        };

        if is_module_scope(node) && starts_uppercase(&name) {
            return self.open_component(name, node, is_exported(node));
        }

        self.facts.exports.functions.push(FunctionInfo {
            is_async: has_async_modifier(node),
            params: parameter_names(node, self.source),
            return_type: annotation_text(node, "return_type", self.source),
            is_exported: is_exported(node),
            name,
        });
        false
    }

    /// Arrow functions and function expressions: bound at module scope or
    /// default-exported they behave like declarations, otherwise only a named
    /// expression counts.
    fn record_function_value(&mut self, node: &Node) -> bool {
        let parent = node.parent();
        let declarator = parent.filter(|p| p.kind() == "variable_declarator");
        let default_exported = parent.is_some_and(|p| p.kind() == "export_statement");

        let (name, exported) = match declarator {
            Some(declarator) => {
                let Some(declaration) = declarator.parent() else {
                    return false;
                };
                if !is_module_scope(&declaration) {
                    return false;
                }
                match declarator.child_by_field_name("name") {
                    Some(name) if name.kind() == "identifier" => (
                        node_text(&name, self.source).to_string(),
                        is_exported(&declaration),
                    ),
                    _ => return false,
                }
            }
            None => match field_text(node, "name", self.source) {
                Some(name) => (name, default_exported),
                None => return false,
            },
        };

        if (declarator.is_some() || default_exported) && starts_uppercase(&name) {
            return self.open_component(name, node, exported);
        }

        self.facts.exports.functions.push(FunctionInfo {
            is_async: has_async_modifier(node),
            params: parameter_names(node, self.source),
            return_type: annotation_text(node, "return_type", self.source),
            is_exported: exported,
            name,
        });
        false
    }

    fn open_component(&mut self, name: String, node: &Node, exported: bool) -> bool {
        self.facts.exports.components.push(ComponentInfo {
            props: destructured_props(node, self.source),
            hooks: Vec::new(),
            name,
            is_exported: exported,
        });
        self.component_stack
            .push(self.facts.exports.components.len() - 1);
        true
    }

    fn record_variable(&mut self, node: &Node) {
        let Some(declaration) = node.parent() else {
            return;
        };
        if !is_module_scope(&declaration) {
            return;
        }
        let holds_function = node.child_by_field_name("value").is_some_and(|value| {
            matches!(
                NodeKind::classify(value.kind()),
                NodeKind::ArrowFunction | NodeKind::FunctionExpression
            )
        });
        if holds_function {
            return;
        }
        let Some(name) = field_text(node, "name", self.source) else {
            return;
        };

        self.facts.exports.variables.push(VariableInfo {
            name,
            type_annotation: annotation_text(node, "type", self.source),
            is_exported: is_exported(&declaration),
        });
    }

    fn record_class(&mut self, node: &Node) {
        let Some(name) = field_text(node, "name", self.source) else {
            return;
        };
        self.facts.exports.classes.push(ClassInfo {
            methods: class_method_names(node, self.source),
            superclass: superclass_name(node, self.source),
            is_exported: is_exported(node),
            name,
        });
    }

    fn record_call(&mut self, node: &Node) {
        for callee in callee_names(node, self.source) {
            if is_hook_name(callee) {
                self.facts.patterns.has_hooks = true;
                self.attach_hook(callee);
            }
            if is_api_callee(callee) {
                self.facts.patterns.has_api = true;
            }
            if is_validation_callee(callee) {
                self.facts.patterns.has_validation = true;
            }
            if contains_domain_keyword(callee) {
                self.facts.patterns.has_domain_context = true;
            }
        }
    }

    fn attach_hook(&mut self, hook: &str) {
        let Some(&index) = self.component_stack.last() else {
            return;
        };
        let hooks = &mut self.facts.exports.components[index].hooks;
        if !hooks.iter().any(|existing| existing == hook) {
            hooks.push(hook.to_string());
        }
    }
}
