//! Offline test synthesis
//!
//! [`synthesize`] turns a request and its [`CodeFacts`] into a test file
//! without any network access. Output depends only on its arguments, so the
//! same inputs always give byte-identical code.

mod basic;
mod component;
mod integration;
mod unit;

use crate::core::{
    AnalysisRequest, ClassInfo, CodeFacts, ComponentInfo, Framework, FunctionInfo, TestType,
};
use crate::naming::{module_stem, relative_import_path};
use once_cell::sync::Lazy;
use regex::Regex;

/// Import sources that look like network or data-access clients
static SERVICE_MODULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(api|service|client|axios|supabase|http)").unwrap());

/// Template family chosen for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Component,
    Unit,
    Integration,
    Basic,
}

impl TemplateKind {
    pub fn select(request: &AnalysisRequest, facts: &CodeFacts) -> Self {
        if request.framework != Framework::Jest || !facts.exports.has_testable_items() {
            return Self::Basic;
        }
        match request.test_type {
            TestType::Component if facts.patterns.has_hooks => Self::Component,
            TestType::Unit => Self::Unit,
            TestType::Integration => Self::Integration,
            TestType::Component => Self::Basic,
        }
    }
}

/// Build the test file for `request` from `facts`
pub fn synthesize(request: &AnalysisRequest, facts: &CodeFacts) -> String {
    let kind = TemplateKind::select(request, facts);
    let mut out = SuiteWriter::default();

    if request.options.generate_documentation {
        write_doc_header(&mut out, request, facts, kind);
    }

    match kind {
        TemplateKind::Component => component::write(&mut out, request, facts),
        TemplateKind::Unit => unit::write(&mut out, request, facts),
        TemplateKind::Integration => integration::write(&mut out, request, facts),
        TemplateKind::Basic => basic::write(&mut out, request, facts),
    }

    out.finish()
}

fn write_doc_header(
    out: &mut SuiteWriter,
    request: &AnalysisRequest,
    facts: &CodeFacts,
    kind: TemplateKind,
) {
    out.line("/**");
    out.line(&format!(" * {} tests for {}", request.test_type, request.file_path));
    out.line(" *");
    out.line(&format!(" * Framework: {}", request.framework));
    out.line(&format!(" * Template: {}", template_label(kind)));
    out.line(&format!(
        " * Complexity: {} (cyclomatic {}, cognitive {})",
        facts.complexity.level, facts.complexity.cyclomatic, facts.complexity.cognitive
    ));
    if !facts.testing_suggestions.is_empty() {
        out.line(" *");
        out.line(" * Suggestions:");
        for suggestion in &facts.testing_suggestions {
            out.line(&format!(" * - {suggestion}"));
        }
    }
    out.line(" */");
    out.blank();
}

fn template_label(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::Component => "component",
        TemplateKind::Unit => "unit",
        TemplateKind::Integration => "integration",
        TemplateKind::Basic => "existence checks",
    }
}

/// Line-oriented writer with two-space indentation
#[derive(Debug, Default)]
pub(crate) struct SuiteWriter {
    buf: String,
    depth: usize,
}

impl SuiteWriter {
    pub(crate) fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Write `header` and indent until the matching [`SuiteWriter::close`]
    pub(crate) fn open(&mut self, header: &str) {
        self.line(header);
        self.depth += 1;
    }

    pub(crate) fn close(&mut self) {
        self.close_with("});");
    }

    pub(crate) fn close_with(&mut self, footer: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(footer);
    }

    fn finish(mut self) -> String {
        while self.buf.ends_with("\n\n") {
            self.buf.pop();
        }
        self.buf
    }
}

/// Exported functions, in declaration order
pub(crate) fn exported_functions(facts: &CodeFacts) -> Vec<&FunctionInfo> {
    facts
        .exports
        .functions
        .iter()
        .filter(|f| f.is_exported)
        .collect()
}

pub(crate) fn exported_classes(facts: &CodeFacts) -> Vec<&ClassInfo> {
    facts
        .exports
        .classes
        .iter()
        .filter(|c| c.is_exported)
        .collect()
}

pub(crate) fn exported_components(facts: &CodeFacts) -> Vec<&ComponentInfo> {
    facts
        .exports
        .components
        .iter()
        .filter(|c| c.is_exported)
        .collect()
}

/// Exported function, class and component names, without duplicates
pub(crate) fn exported_names(facts: &CodeFacts) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    let candidates = exported_functions(facts)
        .into_iter()
        .map(|f| f.name.as_str())
        .chain(exported_classes(facts).into_iter().map(|c| c.name.as_str()))
        .chain(exported_components(facts).into_iter().map(|c| c.name.as_str()));
    for name in candidates {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// `import Default, { a, b } from '../stem';` for the module under test
pub(crate) fn subject_import(request: &AnalysisRequest, facts: &CodeFacts) -> String {
    let default = facts.exports.default_export.as_deref();
    let named: Vec<&str> = exported_names(facts)
        .into_iter()
        .filter(|name| Some(*name) != default)
        .collect();

    let path = relative_import_path(&request.file_path);
    match (default, named.is_empty()) {
        (Some(default), true) => format!("import {default} from '{path}';"),
        (Some(default), false) => {
            format!("import {default}, {{ {} }} from '{path}';", named.join(", "))
        }
        (None, false) => format!("import {{ {} }} from '{path}';", named.join(", ")),
        (None, true) => format!("import * as {} from '{path}';", namespace_binding(request)),
    }
}

/// Identifier used for namespace imports of the module under test
pub(crate) fn namespace_binding(request: &AnalysisRequest) -> String {
    let stem = module_stem(&request.file_path);
    let mut binding = String::new();
    let mut upper_next = false;
    for ch in stem.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if binding.is_empty() && ch.is_ascii_digit() {
                binding.push('_');
            }
            if upper_next {
                binding.push(ch.to_ascii_uppercase());
            } else {
                binding.push(ch);
            }
            upper_next = false;
        } else {
            upper_next = !binding.is_empty();
        }
    }
    if binding.is_empty() {
        binding.push_str("subject");
    }
    format!("{binding}Module")
}

/// `jest.mock('...')` lines for imports that look like service clients
pub(crate) fn write_dependency_mocks(out: &mut SuiteWriter, request: &AnalysisRequest, facts: &CodeFacts) {
    if !request.options.mock_dependencies || request.framework != Framework::Jest {
        return;
    }
    let mut mocked = 0;
    for import in &facts.imports {
        if SERVICE_MODULE.is_match(&import.source) {
            out.line(&format!("jest.mock('{}');", import.source));
            mocked += 1;
        }
    }
    if mocked > 0 {
        out.blank();
    }
}

/// Sample argument list for a call to `function`
pub(crate) fn sample_arguments(function: &FunctionInfo) -> String {
    function
        .params
        .iter()
        .map(|param| sample_value(param))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Same `value` repeated once per parameter (at least once)
pub(crate) fn repeated_argument(function: &FunctionInfo, value: &str) -> String {
    let count = function.params.len().max(1);
    vec![value; count].join(", ")
}

fn sample_value(param: &str) -> String {
    let name = param.trim_start_matches("...");
    let lower = name.to_ascii_lowercase();
    let value = if is_predicate_name(name) {
        "true"
    } else if ["id", "count", "page", "limit", "amount", "total", "index", "size"]
        .iter()
        .any(|hint| lower.ends_with(hint))
        || lower.len() == 1
    {
        "1"
    } else if ["options", "config", "params", "data", "props", "payload"]
        .iter()
        .any(|hint| lower.ends_with(hint))
    {
        "{}"
    } else if lower.ends_with('s') || lower.ends_with("list") {
        "[]"
    } else {
        return format!("'test-{name}'");
    };
    value.to_string()
}

/// `isOpen`, `hasError`, `shouldRetry`
pub(crate) fn is_predicate_name(name: &str) -> bool {
    ["is", "has", "show", "should"].iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_uppercase())
    })
}

/// Sample domain identifiers used by the domain-context blocks
pub(crate) const SAMPLE_CNPJ: &str = "11.222.333/0001-81";
pub(crate) const SAMPLE_CPF: &str = "123.456.789-09";
