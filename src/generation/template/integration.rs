//! Module-level integration suites

use super::{
    exported_functions, exported_names, sample_arguments, subject_import, write_dependency_mocks,
    SuiteWriter, SAMPLE_CNPJ,
};
use crate::core::{AnalysisRequest, CodeFacts, FunctionInfo};
use crate::naming::module_stem;

const MAX_CHAIN: usize = 3;

pub(super) fn write(out: &mut SuiteWriter, request: &AnalysisRequest, facts: &CodeFacts) {
    let functions = exported_functions(facts);

    out.line(&subject_import(request, facts));
    out.blank();
    write_dependency_mocks(out, request, facts);

    out.open(&format!(
        "describe('{} integration', () => {{",
        module_stem(&request.file_path)
    ));

    write_smoke_test(out, facts);

    if facts.patterns.has_api {
        out.blank();
        write_api_block(out, &functions);
    }

    if facts.patterns.has_domain_context {
        out.blank();
        write_domain_test(out, &functions);
    }

    out.blank();
    write_chain_test(out, &functions);

    out.close();
}

fn write_smoke_test(out: &mut SuiteWriter, facts: &CodeFacts) {
    out.open("it('loads every export together', () => {");
    for name in exported_names(facts) {
        out.line(&format!("expect({name}).toBeDefined();"));
    }
    out.close();
}

fn write_api_block(out: &mut SuiteWriter, functions: &[&FunctionInfo]) {
    out.open("describe('with a mocked network layer', () => {");
    out.line("const originalFetch = global.fetch;");
    out.blank();
    out.open("beforeEach(() => {");
    out.line("global.fetch = jest.fn().mockResolvedValue({ ok: true, json: async () => ({}) });");
    out.close();
    out.blank();
    out.open("afterEach(() => {");
    out.line("global.fetch = originalFetch;");
    out.close();
    out.blank();
    out.open("it('settles every exported call', async () => {");
    write_settled_calls(out, functions, |f| sample_arguments(f));
    out.close();
    out.close();
}

fn write_domain_test(out: &mut SuiteWriter, functions: &[&FunctionInfo]) {
    out.open("it('accepts domain identifiers across the module', async () => {");
    write_settled_calls(out, functions, |_| format!("'{SAMPLE_CNPJ}'"));
    out.close();
}

fn write_settled_calls(
    out: &mut SuiteWriter,
    functions: &[&FunctionInfo],
    arguments: impl Fn(&FunctionInfo) -> String,
) {
    if functions.is_empty() {
        out.line("await expect(Promise.resolve()).resolves.toBeUndefined();");
        return;
    }
    out.open("const outcomes = await Promise.allSettled([");
    for function in functions {
        out.line(&format!(
            "Promise.resolve().then(() => {}({})),",
            function.name,
            arguments(function)
        ));
    }
    out.close_with("]);");
    out.line(&format!("expect(outcomes).toHaveLength({});", functions.len()));
}

/// Feed each function's result into the next, up to [`MAX_CHAIN`] steps
fn write_chain_test(out: &mut SuiteWriter, functions: &[&FunctionInfo]) {
    let chain: Vec<&FunctionInfo> = functions.iter().take(MAX_CHAIN).copied().collect();
    if chain.is_empty() {
        out.line("it.todo('chains exported functions end to end');");
        return;
    }

    let names: Vec<&str> = chain.iter().map(|f| f.name.as_str()).collect();
    out.open(&format!("it('runs {} end to end', async () => {{", names.join(" -> ")));
    out.line("const steps = [];");
    for (i, function) in chain.iter().enumerate() {
        let args = if i == 0 {
            sample_arguments(function)
        } else {
            "steps[steps.length - 1]".to_string()
        };
        out.line(&format!("steps.push(await {}({args}));", function.name));
    }
    out.line(&format!("expect(steps).toHaveLength({});", chain.len()));
    out.close();
}

#[cfg(test)]
mod tests {
    use crate::analyzers::analyze_source;
    use crate::core::{AnalysisRequest, TestType};
    use crate::generation::template::synthesize;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn integration_suite(source: &str, path: &str) -> String {
        let request = AnalysisRequest::new(source, path).with_test_type(TestType::Integration);
        let facts = analyze_source(source, path).unwrap().facts;
        synthesize(&request, &facts)
    }

    #[test]
    fn test_chain_limited_to_three() {
        let code = integration_suite(
            indoc! {"
                export function parse(raw) { return raw.trim(); }
                export function normalize(value) { return value.toLowerCase(); }
                export function tokenize(value) { return value.split(' '); }
                export function count(tokens) { return tokens.length; }
            "},
            "src/text.js",
        );
        assert_eq!(
            code,
            indoc! {"
                import { parse, normalize, tokenize, count } from '../text';

                describe('text integration', () => {
                  it('loads every export together', () => {
                    expect(parse).toBeDefined();
                    expect(normalize).toBeDefined();
                    expect(tokenize).toBeDefined();
                    expect(count).toBeDefined();
                  });

                  it('runs parse -> normalize -> tokenize end to end', async () => {
                    const steps = [];
                    steps.push(await parse('test-raw'));
                    steps.push(await normalize(steps[steps.length - 1]));
                    steps.push(await tokenize(steps[steps.length - 1]));
                    expect(steps).toHaveLength(3);
                  });
                });
            "}
        );
    }

    #[test]
    fn test_api_and_domain_blocks() {
        let code = integration_suite(
            indoc! {"
                import { supabase } from '../lib/supabaseClient';
                import { formatCnpj } from '../utils/cnpj';

                export async function fetchCompany(cnpj) {
                  const res = await fetch(`/companies/${formatCnpj(cnpj)}`);
                  return res.json();
                }
            "},
            "src/companies.ts",
        );
        assert!(code.contains("jest.mock('../lib/supabaseClient');"));
        assert!(code.contains("describe('with a mocked network layer'"));
        assert!(code.contains("Promise.resolve().then(() => fetchCompany('test-cnpj')),"));
        assert!(code.contains("Promise.resolve().then(() => fetchCompany('11.222.333/0001-81')),"));
        assert!(code.contains("it('runs fetchCompany end to end'"));
    }

    #[test]
    fn test_class_only_module() {
        let code = integration_suite("export class Cache { get(key) { return null; } }", "src/cache.ts");
        assert!(code.contains("expect(Cache).toBeDefined();"));
        assert!(code.contains("it.todo('chains exported functions end to end');"));
    }
}
