//! React component suites built on Testing Library

use super::{
    exported_components, exported_functions, is_predicate_name, subject_import,
    write_dependency_mocks, SuiteWriter, SAMPLE_CNPJ,
};
use crate::analyzers::typescript::visitor::helpers::is_hook_name;
use crate::core::{AnalysisRequest, CodeFacts, ComponentInfo, FunctionInfo};

pub(super) fn write(out: &mut SuiteWriter, request: &AnalysisRequest, facts: &CodeFacts) {
    let custom_hooks: Vec<&FunctionInfo> = exported_functions(facts)
        .into_iter()
        .filter(|f| is_hook_name(&f.name))
        .collect();

    let mut testing_library = vec!["render", "screen", "fireEvent", "waitFor"];
    if !custom_hooks.is_empty() {
        testing_library.push("renderHook");
    }

    let components = exported_components(facts);
    if !components.is_empty() {
        out.line("import React from 'react';");
    }
    out.line(&format!(
        "import {{ {} }} from '@testing-library/react';",
        testing_library.join(", ")
    ));
    out.line("import '@testing-library/jest-dom';");
    out.line(&subject_import(request, facts));
    out.blank();
    write_dependency_mocks(out, request, facts);

    for component in components {
        write_component_suite(out, facts, component);
    }
    for hook in custom_hooks {
        write_hook_suite(out, facts, hook);
    }
}

fn write_component_suite(out: &mut SuiteWriter, facts: &CodeFacts, component: &ComponentInfo) {
    let name = &component.name;
    let element = format!("<{name} {{...defaultProps}} />");

    out.open(&format!("describe('{name}', () => {{"));
    if component.props.is_empty() {
        out.line("const defaultProps = {};");
    } else {
        out.open("const defaultProps = {");
        for prop in &component.props {
            out.line(&format!("{prop}: {},", mock_prop_value(prop)));
        }
        out.close_with("};");
    }
    out.blank();
    out.open("beforeEach(() => {");
    out.line("jest.clearAllMocks();");
    out.close();
    out.blank();

    out.open("it('renders without crashing', () => {");
    out.line(&format!("const {{ container }} = render({element});"));
    out.line("expect(container.firstChild).not.toBeNull();");
    out.close();

    if !component.props.is_empty() {
        out.blank();
        out.open("describe('props', () => {");
        for (i, prop) in component.props.iter().enumerate() {
            if i > 0 {
                out.blank();
            }
            write_prop_test(out, name, prop);
        }
        out.close();
    }

    out.blank();
    out.open("describe('hooks', () => {");
    let hooks = if component.hooks.is_empty() {
        "its hooks".to_string()
    } else {
        component.hooks.join(", ")
    };
    out.open(&format!("it('initialises state through {hooks}', async () => {{"));
    out.line(&format!("const {{ container }} = render({element});"));
    out.line("await waitFor(() => expect(container.firstChild).not.toBeNull());");
    out.close();
    out.blank();
    out.open("it('keeps state across re-renders', () => {");
    out.line(&format!("const {{ rerender, container }} = render({element});"));
    out.line(&format!("rerender({element});"));
    out.line("expect(container.firstChild).not.toBeNull();");
    out.close();
    out.close();

    if facts.patterns.has_api {
        out.blank();
        out.open("describe('data loading', () => {");
        out.open("it('renders once pending requests settle', async () => {");
        out.line(&format!("render({element});"));
        out.line("await waitFor(() => expect(screen.queryByRole('progressbar')).not.toBeInTheDocument());");
        out.close();
        out.close();
    }

    out.blank();
    out.open("describe('user interaction', () => {");
    out.open("it('handles clicks on interactive elements', () => {");
    out.line(&format!("render({element});"));
    out.line("const buttons = screen.queryAllByRole('button');");
    out.line("buttons.forEach((button) => fireEvent.click(button));");
    out.line("expect(document.body).toBeInTheDocument();");
    out.close();
    out.close();

    out.blank();
    out.open("describe('loading and error states', () => {");
    out.open("it('does not show an error on first render', () => {");
    out.line(&format!("render({element});"));
    out.line("expect(screen.queryByRole('alert')).not.toBeInTheDocument();");
    out.close();
    out.blank();
    out.open("it('settles out of the loading state', async () => {");
    out.line(&format!("render({element});"));
    out.line("await waitFor(() => expect(screen.queryByText(/loading/i)).not.toBeInTheDocument());");
    out.close();
    out.close();

    if facts.patterns.has_domain_context {
        out.blank();
        out.open("describe('domain context', () => {");
        out.open("it('does not flag valid business identifiers', () => {");
        out.line(&format!("render({element});"));
        out.line(&format!(
            "expect(screen.queryByText('{SAMPLE_CNPJ}')).not.toHaveClass('error');"
        ));
        out.close();
        out.close();
    }

    out.close();
    out.blank();
}

fn write_prop_test(out: &mut SuiteWriter, component: &str, prop: &str) {
    if is_callback_prop(prop) {
        out.open(&format!("it('does not call {prop} on mount', () => {{"));
        out.line(&format!("render(<{component} {{...defaultProps}} />);"));
        out.line(&format!("expect(defaultProps.{prop}).not.toHaveBeenCalled();"));
    } else {
        out.open(&format!("it('renders with the {prop} prop', () => {{"));
        out.line(&format!(
            "const {{ container }} = render(<{component} {{...defaultProps}} {prop}={{defaultProps.{prop}}} />);"
        ));
        out.line("expect(container.firstChild).not.toBeNull();");
    }
    out.close();
}

fn write_hook_suite(out: &mut SuiteWriter, facts: &CodeFacts, hook: &FunctionInfo) {
    let name = &hook.name;
    out.open(&format!("describe('{name}', () => {{"));
    out.open("it('returns an initial value', () => {");
    out.line(&format!("const {{ result }} = renderHook(() => {name}());"));
    out.line("expect(result.current).toBeDefined();");
    out.close();
    if facts.patterns.has_api || hook.is_async {
        out.blank();
        out.open("it('settles after loading', async () => {");
        out.line(&format!("const {{ result }} = renderHook(() => {name}());"));
        out.line("await waitFor(() => expect(result.current).toBeDefined());");
        out.close();
    }
    out.close();
    out.blank();
}

fn is_callback_prop(prop: &str) -> bool {
    prop.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// Placeholder value for a prop in `defaultProps`
fn mock_prop_value(prop: &str) -> String {
    if is_callback_prop(prop) {
        "jest.fn()".to_string()
    } else if is_predicate_name(prop) {
        "true".to_string()
    } else {
        format!("'test-{prop}'")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::analyze_source;
    use crate::core::TestType;
    use crate::generation::template::synthesize;
    use indoc::indoc;

    const LEAD_CARD: &str = indoc! {"
        import { useState, useEffect } from 'react';
        import { formatCnpj } from '../utils/cnpj';
        import { leadsApi } from '../api/leads';

        export default function LeadCard({ leadId, onSelect, isCompact }) {
          const [lead, setLead] = useState(null);
          useEffect(() => {
            leadsApi.track(leadId);
            fetch(`/api/leads/${leadId}`).then((res) => res.json()).then(setLead);
          }, [leadId]);
          if (!lead) return <p>Loading...</p>;
          return <div onClick={() => onSelect(lead)}>{formatCnpj(lead.cnpj)}</div>;
        }
    "};

    fn component_suite(source: &str, path: &str) -> String {
        let request = AnalysisRequest::new(source, path).with_test_type(TestType::Component);
        let facts = analyze_source(source, path).unwrap().facts;
        synthesize(&request, &facts)
    }

    #[test]
    fn test_mock_prop_values() {
        assert_eq!(mock_prop_value("onSelect"), "jest.fn()");
        assert_eq!(mock_prop_value("isCompact"), "true");
        assert_eq!(mock_prop_value("showHeader"), "true");
        assert_eq!(mock_prop_value("leadId"), "'test-leadId'");
        assert_eq!(mock_prop_value("one"), "'test-one'");
    }

    #[test]
    fn test_component_suite_shape() {
        let code = component_suite(LEAD_CARD, "src/components/LeadCard.jsx");

        assert!(code.starts_with(indoc! {"
            import React from 'react';
            import { render, screen, fireEvent, waitFor } from '@testing-library/react';
            import '@testing-library/jest-dom';
            import LeadCard from '../LeadCard';

            jest.mock('../api/leads');
        "}));
        assert!(code.contains("    onSelect: jest.fn(),\n"));
        assert!(code.contains("    isCompact: true,\n"));
        assert!(code.contains("it('renders without crashing'"));
        assert!(code.contains("it('renders with the leadId prop'"));
        assert!(code.contains("it('does not call onSelect on mount'"));
        assert!(code.contains("it('initialises state through useState, useEffect'"));
        assert!(code.contains("describe('data loading'"));
        assert!(code.contains("describe('user interaction'"));
        assert!(code.contains("describe('loading and error states'"));
        assert!(code.contains("describe('domain context'"));
    }

    #[test]
    fn test_domain_block_requires_domain_context() {
        let source = LEAD_CARD.replace("Cnpj", "Name").replace("cnpj", "name");
        let code = component_suite(&source, "src/components/LeadCard.jsx");
        assert!(!code.contains("describe('domain context'"));
    }

    #[test]
    fn test_custom_hook_module() {
        let code = component_suite(
            indoc! {"
                import { useState } from 'react';

                export function useToggle(initial = false) {
                  const [on, setOn] = useState(initial);
                  return [on, () => setOn(!on)];
                }
            "},
            "src/hooks/useToggle.ts",
        );
        assert!(code.contains("import { render, screen, fireEvent, waitFor, renderHook } from '@testing-library/react';"));
        assert!(!code.contains("import React"));
        assert!(code.contains("const { result } = renderHook(() => useToggle());"));
    }
}
