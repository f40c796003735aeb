//! Existence checks for modules no richer template applies to

use super::{exported_names, namespace_binding, write_dependency_mocks, SuiteWriter};
use crate::core::{AnalysisRequest, CodeFacts, Framework};
use crate::naming::{module_stem, relative_import_path};

pub(super) fn write(out: &mut SuiteWriter, request: &AnalysisRequest, facts: &CodeFacts) {
    let binding = namespace_binding(request);
    let (suite, case) = match request.framework {
        Framework::Playwright => ("test.describe", "test"),
        Framework::Jest | Framework::Cypress => ("describe", "it"),
    };

    if request.framework == Framework::Playwright {
        out.line("import { test, expect } from '@playwright/test';");
    }
    out.line(&format!(
        "import * as {binding} from '{}';",
        relative_import_path(&request.file_path)
    ));
    out.blank();
    write_dependency_mocks(out, request, facts);

    out.open(&format!(
        "{suite}('{}', () => {{",
        module_stem(&request.file_path)
    ));
    out.open(&format!("{case}('is defined', () => {{"));
    out.line(&defined_assertion(request.framework, &binding));
    out.close();

    for export in exported_names(facts) {
        let accessor = if facts.exports.default_export.as_deref() == Some(export) {
            "default"
        } else {
            export
        };
        out.blank();
        out.open(&format!("{case}('exports {export} as a function', () => {{"));
        out.line(&function_assertion(
            request.framework,
            &format!("{binding}.{accessor}"),
        ));
        out.close();
    }

    out.close();
}

fn defined_assertion(framework: Framework, target: &str) -> String {
    match framework {
        Framework::Cypress => format!("expect({target}).to.exist;"),
        Framework::Jest | Framework::Playwright => format!("expect({target}).toBeDefined();"),
    }
}

fn function_assertion(framework: Framework, target: &str) -> String {
    match framework {
        Framework::Cypress => format!("expect({target}).to.be.a('function');"),
        Framework::Jest | Framework::Playwright => {
            format!("expect(typeof {target}).toBe('function');")
        }
    }
}
