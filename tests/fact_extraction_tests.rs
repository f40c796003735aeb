use indoc::indoc;
use proptest::prelude::*;
use testforge::complexity::classify;
use testforge::{analyze_source, AnalysisMode, ComplexityLevel, FileType, ImportKind};

const LEADS_SERVICE: &str = indoc! {"
    import axios from 'axios';
    import * as schemas from './schemas';
    import { formatCnpj } from '../utils/cnpj';

    export class LeadService extends BaseService {
      async list(page) {
        const { data } = await axios.get(`/leads?page=${page}`);
        return data;
      }

      remove(id) {
        return axios.delete(`/leads/${id}`);
      }
    }

    export async function importLeads(rows) {
      const valid = [];
      for (const row of rows) {
        try {
          schemas.validateLead(row);
          valid.push({ ...row, cnpj: formatCnpj(row.cnpj) });
        } catch (err) {
          console.warn(err);
        }
      }
      return valid.length > 0 ? valid : null;
    }
"};

#[test]
fn test_service_module_facts() {
    let extracted = analyze_source(LEADS_SERVICE, "src/services/leads.ts").unwrap();
    let facts = extracted.facts;

    assert_eq!(extracted.mode, AnalysisMode::Ast);
    assert_eq!(facts.file_type, FileType::TypeScript);

    let kinds: Vec<_> = facts.imports.iter().map(|i| (i.source.as_str(), i.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            ("axios", ImportKind::Default),
            ("./schemas", ImportKind::Namespace),
            ("../utils/cnpj", ImportKind::Named),
        ]
    );

    let class = &facts.exports.classes[0];
    assert_eq!(class.name, "LeadService");
    assert_eq!(class.methods, vec!["list", "remove"]);
    assert_eq!(class.superclass.as_deref(), Some("BaseService"));

    let function = &facts.exports.functions[0];
    assert_eq!(function.name, "importLeads");
    assert!(function.is_async);
    assert_eq!(function.params, vec!["rows"]);

    assert!(facts.patterns.has_async_code);
    assert!(facts.patterns.has_api);
    assert!(facts.patterns.has_error_handling);
    assert!(facts.patterns.has_validation);
    assert!(facts.patterns.has_domain_context);
    assert!(!facts.patterns.has_hooks);

    // for-of (+1/+2), ternary (+1/+1), try (+0/+1)
    assert_eq!(facts.complexity.cyclomatic, 2);
    assert_eq!(facts.complexity.cognitive, 4);
    assert_eq!(facts.complexity.level, ComplexityLevel::Low);
    assert!(!facts.testing_suggestions.is_empty());
}

#[test]
fn test_unbalanced_braces_use_fallback() {
    let source = "export async function load(id) {\n  try {\n    return fetch(`/x/${id}`);\n";
    let extracted = analyze_source(source, "src/load.ts").unwrap();

    assert_eq!(extracted.mode, AnalysisMode::Regex);
    assert_eq!(extracted.facts.exports.functions[0].name, "load");
    assert!(extracted.facts.patterns.has_async_code);
    assert!(extracted.facts.patterns.has_api);
    assert!(extracted.facts.patterns.has_error_handling);
}

#[test]
fn test_complexity_reference_points() {
    assert_eq!(classify(0, 0, 10), ComplexityLevel::Low);
    assert_eq!(classify(10, 20, 100), ComplexityLevel::Medium);
    assert_eq!(classify(20, 30, 500), ComplexityLevel::High);
}

proptest! {
    #[test]
    fn prop_extraction_is_deterministic(source in "[a-zA-Z0-9 (){};=>,.'\\n]{0,200}") {
        let first = analyze_source(&source, "src/fuzz.ts").unwrap();
        let second = analyze_source(&source, "src/fuzz.ts").unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_coverage_and_confidence_bounds(source in "[a-zA-Z0-9 (){};=>,.'\\n]{0,200}") {
        let facts = analyze_source(&source, "src/fuzz.tsx").unwrap().facts;
        prop_assert!(testforge::scoring::estimated_coverage(&facts) <= 95);
        let confidence = testforge::scoring::template_confidence(&facts);
        prop_assert!((0.0..=1.0).contains(&confidence));
    }
}
