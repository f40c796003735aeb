//! Pattern-based fact extraction for sources the parser rejects
//!
//! Lower fidelity than the AST walker: no parameter lists, no method lists,
//! and complexity counters are keyword counts. It never fails.

use crate::analyzers::domain::DOMAIN_PATTERN;
use crate::core::{
    ClassInfo, CodeFacts, ComponentInfo, FileType, FunctionInfo, ImportInfo, ImportKind,
    VariableInfo,
};
use once_cell::sync::Lazy;
use regex::Regex;

static EXPORT_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*export\s+(default\s+)?(async\s+)?function\*?\s+([A-Za-z_$][\w$]*)")
        .unwrap()
});
static EXPORT_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*export\s+(default\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)(?:\s+extends\s+([A-Za-z_$][\w$.]*))?",
    )
    .unwrap()
});
static EXPORT_BINDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*export\s+(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::\s*([^=]+?))?\s*=\s*(.*)$")
        .unwrap()
});
static FUNCTION_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(async\s+)?(?:function\b|\(|[A-Za-z_$][\w$]*\s*=>)").unwrap());
static LOCAL_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(async\s+)?function\*?\s+([A-Za-z_$][\w$]*)").unwrap()
});
static LOCAL_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)(?:\s+extends\s+([A-Za-z_$][\w$.]*))?")
        .unwrap()
});
static EXPORT_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*export\s*\{([^}]*)\}(\s*from\b)?").unwrap());
static MODULE_EXPORTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*module\.exports\s*=\s*(?:\{([^}]*)\}|([A-Za-z_$][\w$]*))").unwrap()
});
static DEFAULT_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*export\s+default\s+([A-Za-z_$][\w$]*)\s*;?\s*$").unwrap());
static IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*import\s+(?:type\s+)?(?:(.+?)\s+from\s+)?['"]([^'"]+)['"]"#).unwrap()
});

static ASYNC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:async|await|Promise)\b").unwrap());
static HOOK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\buse[A-Z]\w*").unwrap());
static API: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)fetch|axios|api").unwrap());
static ERROR_HANDLING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:try|catch|throw)\b").unwrap());
static VALIDATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)validate|schema|zod").unwrap());

static BRANCH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:if|switch)\b").unwrap());
static LOOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:for|while)\b").unwrap());
static TRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\btry\b").unwrap());

/// Approximate [`CodeFacts`] from raw text
pub fn basic_analysis(source: &str, path: &str) -> CodeFacts {
    let mut facts = CodeFacts::empty(FileType::from_path(path));

    collect_functions(source, &mut facts);
    collect_classes(source, &mut facts);
    collect_bindings(source, &mut facts);
    collect_local_declarations(source, &mut facts);
    resolve_export_lists(source, &mut facts);
    facts.imports = collect_imports(source);

    if let Some(caps) = DEFAULT_IDENTIFIER.captures(source) {
        facts.exports.default_export = Some(caps[1].to_string());
        facts.exports.mark_exported(&caps[1]);
    }

    let patterns = &mut facts.patterns;
    patterns.has_async_code = ASYNC.is_match(source);
    patterns.has_hooks = HOOK.is_match(source);
    patterns.has_api = API.is_match(source);
    patterns.has_error_handling = ERROR_HANDLING.is_match(source);
    patterns.has_validation = VALIDATION.is_match(source);
    patterns.has_domain_context = DOMAIN_PATTERN.is_match(source);

    let branches = BRANCH.find_iter(source).count() as u32;
    let loops = LOOP.find_iter(source).count() as u32;
    let tries = TRY.find_iter(source).count() as u32;
    facts.complexity.cyclomatic = branches + loops;
    facts.complexity.cognitive = branches + 2 * loops + tries;
    facts.complexity.lines = source.lines().count();

    facts
}

fn collect_functions(source: &str, facts: &mut CodeFacts) {
    for caps in EXPORT_FUNCTION.captures_iter(source) {
        let name = caps[3].to_string();
        if caps.get(1).is_some() {
            facts.exports.default_export = Some(name.clone());
        }
        push_callable(facts, name, caps.get(2).is_some(), true);
    }
}

fn collect_classes(source: &str, facts: &mut CodeFacts) {
    for caps in EXPORT_CLASS.captures_iter(source) {
        let name = caps[2].to_string();
        if caps.get(1).is_some() {
            facts.exports.default_export = Some(name.clone());
        }
        facts.exports.classes.push(ClassInfo {
            name,
            methods: Vec::new(),
            superclass: caps.get(3).map(|m| m.as_str().to_string()),
            is_exported: true,
        });
    }
}

fn collect_bindings(source: &str, facts: &mut CodeFacts) {
    for caps in EXPORT_BINDING.captures_iter(source) {
        let name = caps[1].to_string();
        let value = caps[3].trim_start();
        match FUNCTION_VALUE.captures(value) {
            Some(function) => push_callable(facts, name, function.get(1).is_some(), true),
            None => facts.exports.variables.push(VariableInfo {
                name,
                type_annotation: caps.get(2).map(|m| m.as_str().trim().to_string()),
                is_exported: true,
            }),
        }
    }
}

/// Unexported declarations starting at column zero; export lists may name them
fn collect_local_declarations(source: &str, facts: &mut CodeFacts) {
    for caps in LOCAL_FUNCTION.captures_iter(source) {
        push_callable(facts, caps[2].to_string(), caps.get(1).is_some(), false);
    }
    for caps in LOCAL_CLASS.captures_iter(source) {
        facts.exports.classes.push(ClassInfo {
            name: caps[1].to_string(),
            methods: Vec::new(),
            superclass: caps.get(2).map(|m| m.as_str().to_string()),
            is_exported: false,
        });
    }
}

fn resolve_export_lists(source: &str, facts: &mut CodeFacts) {
    for caps in EXPORT_LIST.captures_iter(source) {
        if caps.get(2).is_some() {
            continue;
        }
        for specifier in caps[1].split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let specifier = specifier.strip_prefix("type ").unwrap_or(specifier);
            match specifier.split_once(" as ") {
                None => {
                    facts.exports.mark_exported(specifier);
                }
                Some((name, alias)) => {
                    let (name, alias) = (name.trim(), alias.trim());
                    if alias == "default" {
                        facts.exports.default_export = Some(name.to_string());
                        facts.exports.mark_exported(name);
                    } else if alias == name {
                        facts.exports.mark_exported(name);
                    }
                }
            }
        }
    }

    for caps in MODULE_EXPORTS.captures_iter(source) {
        if let Some(single) = caps.get(2) {
            if facts.exports.default_export.is_none() {
                facts.exports.default_export = Some(single.as_str().to_string());
            }
            facts.exports.mark_exported(single.as_str());
            continue;
        }
        let entries = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        for entry in entries.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.split_once(':') {
                None => {
                    facts.exports.mark_exported(entry);
                }
                Some((key, value)) if key.trim() == value.trim() => {
                    facts.exports.mark_exported(key.trim());
                }
                Some(_) => {}
            }
        }
    }
}

fn push_callable(facts: &mut CodeFacts, name: String, is_async: bool, is_exported: bool) {
    if name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        facts.exports.components.push(ComponentInfo {
            name,
            props: Vec::new(),
            hooks: Vec::new(),
            is_exported,
        });
    } else {
        facts.exports.functions.push(FunctionInfo {
            name,
            is_async,
            params: Vec::new(),
            return_type: None,
            is_exported,
        });
    }
}

fn collect_imports(source: &str) -> Vec<ImportInfo> {
    IMPORT
        .captures_iter(source)
        .map(|caps| {
            let clause = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            let (names, kind) = parse_clause(clause);
            ImportInfo {
                source: caps[2].to_string(),
                names,
                kind,
            }
        })
        .collect()
}

fn parse_clause(clause: &str) -> (Vec<String>, ImportKind) {
    if clause.is_empty() {
        return (Vec::new(), ImportKind::Named);
    }

    let mut names = Vec::new();
    let mut kind = ImportKind::Named;

    let (head, braced) = match clause.split_once('{') {
        Some((head, rest)) => (head, rest.split('}').next().unwrap_or("")),
        None => (clause, ""),
    };

    for part in head.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some(alias) = part.strip_prefix('*') {
            let alias = alias.trim().trim_start_matches("as").trim();
            names.push(alias.to_string());
            kind = ImportKind::Namespace;
        } else {
            names.push(part.to_string());
            if names.len() == 1 {
                kind = ImportKind::Default;
            }
        }
    }

    for spec in braced.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let binding = spec.rsplit(" as ").next().unwrap_or(spec).trim();
        names.push(binding.to_string());
    }

    (names, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ComplexityMetrics;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const BROKEN: &str = indoc! {r#"
        import React, { useState } from 'react';
        import * as api from './api';
        import './styles.css';

        export default function LeadForm({ onSubmit }) {
          const [lead, setLead] = useState(null);
          if (!lead) {
            return null;
        }

        export async function submitLead(lead) {
          try {
            await fetch('/leads');
          } catch (err) {
            throw err;
          }

        export const MAX_RETRIES: number = 3;
        export const formatCnpj = (value) => value;
        export class LeadStore extends BaseStore {
    "#};

    #[test]
    fn test_exports_from_broken_source() {
        let facts = basic_analysis(BROKEN, "src/LeadForm.tsx");

        assert_eq!(facts.file_type, FileType::ReactComponent);
        assert_eq!(facts.exports.components.len(), 1);
        assert_eq!(facts.exports.components[0].name, "LeadForm");
        assert_eq!(facts.exports.default_export.as_deref(), Some("LeadForm"));

        let functions: Vec<_> = facts
            .exports
            .functions
            .iter()
            .map(|f| (f.name.as_str(), f.is_async))
            .collect();
        assert_eq!(functions, vec![("submitLead", true), ("formatCnpj", false)]);

        assert_eq!(
            facts.exports.variables,
            vec![VariableInfo {
                name: "MAX_RETRIES".into(),
                type_annotation: Some("number".into()),
                is_exported: true,
            }]
        );
        assert_eq!(facts.exports.classes[0].superclass.as_deref(), Some("BaseStore"));
    }

    #[test]
    fn test_imports_from_broken_source() {
        let facts = basic_analysis(BROKEN, "src/LeadForm.tsx");
        assert_eq!(
            facts.imports,
            vec![
                ImportInfo {
                    source: "react".into(),
                    names: vec!["React".into(), "useState".into()],
                    kind: ImportKind::Default,
                },
                ImportInfo {
                    source: "./api".into(),
                    names: vec!["api".into()],
                    kind: ImportKind::Namespace,
                },
                ImportInfo {
                    source: "./styles.css".into(),
                    names: vec![],
                    kind: ImportKind::Named,
                },
            ]
        );
    }

    #[test]
    fn test_patterns_from_broken_source() {
        let facts = basic_analysis(BROKEN, "src/LeadForm.tsx");
        assert!(facts.patterns.has_async_code);
        assert!(facts.patterns.has_hooks);
        assert!(facts.patterns.has_api);
        assert!(facts.patterns.has_error_handling);
        assert!(!facts.patterns.has_validation);
        assert!(facts.patterns.has_domain_context);
    }

    #[test]
    fn test_keyword_complexity() {
        let source = "if (a) { for (;;) {} } while (b) {} try {} catch {}";
        let facts = basic_analysis(source, "x.js");
        assert_eq!(
            facts.complexity,
            ComplexityMetrics {
                cyclomatic: 3,
                cognitive: 6,
                lines: 1,
                ..ComplexityMetrics::default()
            }
        );
    }

    #[test]
    fn test_export_lists_in_broken_source() {
        let source = indoc! {r#"
            function add(a, b) {
              return a + b;

            function subtract(a, b) {
              return a - b;
            }

            class Cache {}

            export { add, subtract as minus };
            export { helper } from './helper';
            module.exports = { add };
        "#};
        let facts = basic_analysis(source, "src/math.js");

        let functions: Vec<_> = facts
            .exports
            .functions
            .iter()
            .map(|f| (f.name.as_str(), f.is_exported))
            .collect();
        assert_eq!(functions, vec![("add", true), ("subtract", false)]);
        assert!(!facts.exports.classes[0].is_exported);
    }

    #[test]
    fn test_default_identifier_in_broken_source() {
        let source = "function add(a, b) {\n  return a + b;\n\nexport default add;\n";
        let facts = basic_analysis(source, "src/add.js");
        assert_eq!(facts.exports.default_export.as_deref(), Some("add"));
        assert!(facts.exports.functions[0].is_exported);
    }

    #[test]
    fn test_empty_source() {
        let facts = basic_analysis("", "empty.ts");
        assert!(!facts.exports.has_testable_items());
        assert_eq!(facts.complexity.lines, 0);
    }
}
