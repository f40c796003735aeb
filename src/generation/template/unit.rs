//! Per-function unit suites

use super::{
    exported_classes, exported_components, exported_functions, repeated_argument,
    sample_arguments, subject_import, write_dependency_mocks, SuiteWriter, SAMPLE_CNPJ,
    SAMPLE_CPF,
};
use crate::core::{AnalysisRequest, ClassInfo, CodeFacts, ComponentInfo, FunctionInfo};

pub(super) fn write(out: &mut SuiteWriter, request: &AnalysisRequest, facts: &CodeFacts) {
    out.line(&subject_import(request, facts));
    out.blank();
    write_dependency_mocks(out, request, facts);

    let functions = exported_functions(facts);
    for function in &functions {
        write_function_suite(out, request, facts, function);
    }
    for class in exported_classes(facts) {
        write_class_suite(out, class);
    }
    for component in exported_components(facts) {
        write_component_check(out, component);
    }
    write_error_handling(out, facts, &functions);
}

fn write_function_suite(
    out: &mut SuiteWriter,
    request: &AnalysisRequest,
    facts: &CodeFacts,
    function: &FunctionInfo,
) {
    let name = &function.name;
    let args = sample_arguments(function);

    out.open(&format!("describe('{name}', () => {{"));

    if function.is_async {
        out.open("it('resolves for valid input', async () => {");
        out.line(&format!("await expect({name}({args})).resolves.not.toThrow();"));
    } else {
        out.open("it('handles valid input', () => {");
        out.line(&format!("expect(() => {name}({args})).not.toThrow();"));
    }
    out.close();

    if request.options.include_edge_cases {
        out.blank();
        write_edge_cases(out, function);
    }

    if function.is_async {
        out.blank();
        out.open("describe('async behaviour', () => {");
        out.open("it('returns a promise', () => {");
        out.line(&format!("const pending = {name}({args});"));
        out.line("expect(pending).toBeInstanceOf(Promise);");
        out.line("return pending.catch(() => undefined);");
        out.close();
        out.blank();
        out.open("it('settles when called repeatedly', async () => {");
        out.line(&format!(
            "const results = await Promise.allSettled([{name}({args}), {name}({args})]);"
        ));
        out.line("expect(results).toHaveLength(2);");
        out.close();
        out.close();
    }

    if facts.patterns.has_domain_context {
        out.blank();
        write_domain_block(out, function);
    }

    out.close();
    out.blank();
}

/// Null, undefined and empty-string calls must not throw
fn write_edge_cases(out: &mut SuiteWriter, function: &FunctionInfo) {
    let name = &function.name;
    out.open("describe('edge cases', () => {");
    for (label, value) in [("null", "null"), ("undefined", "undefined"), ("empty string", "''")] {
        out.open(&format!("it('does not throw for {label} input', () => {{"));
        out.line(&format!(
            "expect(() => {name}({})).not.toThrow();",
            repeated_argument(function, value)
        ));
        out.close();
        if label != "empty string" {
            out.blank();
        }
    }
    out.close();
}

fn write_domain_block(out: &mut SuiteWriter, function: &FunctionInfo) {
    let name = &function.name;
    out.open("describe('domain rules', () => {");
    out.open("it('accepts a formatted CNPJ', () => {");
    out.line(&format!("expect(() => {name}('{SAMPLE_CNPJ}')).not.toThrow();"));
    out.close();
    out.blank();
    out.open("it('accepts a formatted CPF', () => {");
    out.line(&format!("expect(() => {name}('{SAMPLE_CPF}')).not.toThrow();"));
    out.close();
    out.close();
}

fn write_class_suite(out: &mut SuiteWriter, class: &ClassInfo) {
    let name = &class.name;
    out.open(&format!("describe('{name}', () => {{"));
    out.open("it('can be instantiated', () => {");
    out.line(&format!("expect(() => new {name}()).not.toThrow();"));
    out.close();

    for method in class.methods.iter().filter(|m| m.as_str() != "constructor") {
        out.blank();
        out.open(&format!("it('exposes {method}', () => {{"));
        out.line(&format!("const instance = new {name}();"));
        out.line(&format!("expect(typeof instance.{method}).toBe('function');"));
        out.close();
    }

    if let Some(base) = &class.superclass {
        out.blank();
        out.open(&format!("it('extends {base}', () => {{"));
        out.line(&format!("expect(new {name}()).toBeInstanceOf({base});"));
        out.close();
    }

    out.close();
    out.blank();
}

fn write_component_check(out: &mut SuiteWriter, component: &ComponentInfo) {
    let name = &component.name;
    out.open(&format!("describe('{name}', () => {{"));
    out.open("it('is a component function', () => {");
    out.line(&format!("expect(typeof {name}).toBe('function');"));
    out.close();
    out.close();
    out.blank();
}

fn write_error_handling(out: &mut SuiteWriter, facts: &CodeFacts, functions: &[&FunctionInfo]) {
    out.open("describe('error handling', () => {");

    let mut first = true;
    for function in functions {
        if !first {
            out.blank();
        }
        first = false;
        let name = &function.name;
        if function.is_async {
            out.open(&format!("it('{name} settles without arguments', async () => {{"));
            out.line(&format!("await expect(Promise.allSettled([{name}()])).resolves.toHaveLength(1);"));
        } else {
            out.open(&format!("it('{name} tolerates missing arguments', () => {{"));
            out.line(&format!("expect(() => {name}()).not.toThrow();"));
        }
        out.close();
    }

    if facts.patterns.has_error_handling {
        if !first {
            out.blank();
        }
        first = false;
        out.line("it.todo('covers each catch branch with a failing dependency');");
    }

    if first {
        out.line("it.todo('add error-handling scenarios');");
    }

    out.close();
}
