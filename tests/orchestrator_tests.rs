//! Generation path selection and result assembly

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use testforge::generation::CompletionRequest;
use testforge::{
    analyze_source, synthesize, AnalysisMode, AnalysisRequest, Framework, GenerationMode,
    GenerationOptions, ServiceError, TestForgeConfig, TestGenerator, TestType, TextGenerator,
};

const HELPERS: &str = "export function add(a, b) {\n  return a + b;\n}\n";

/// Service double returning a canned reply and counting calls
struct ScriptedService {
    reply: Result<String, ServiceError>,
    calls: AtomicUsize,
}

impl ScriptedService {
    fn new(reply: Result<String, ServiceError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedService {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(request.prompt.contains("## Source code"));
        assert_eq!(request.model, "gpt-4o-mini");
        self.reply.clone()
    }
}

fn template_code(request: &AnalysisRequest) -> String {
    let facts = analyze_source(&request.source_code, &request.file_path)
        .unwrap()
        .facts;
    synthesize(request, &facts)
}

#[tokio::test]
async fn test_ai_reply_is_used() {
    let service = ScriptedService::new(Ok(
        "```ts\nimport { add } from '../helpers';\n\ntest('adds', () => expect(add(1, 2)).toBe(3));\n```"
            .to_string(),
    ));
    let generator = TestGenerator::new(TestForgeConfig::default()).with_service(service.clone());
    let request = AnalysisRequest::new(HELPERS, "src/utils/helpers.ts");

    let result = generator.generate_tests(&request).await.unwrap();
    let test = &result.tests[0];

    assert_eq!(service.calls(), 1);
    assert_eq!(result.summary.generation_mode, GenerationMode::Ai);
    assert_eq!(test.confidence, 0.9);
    assert_eq!(
        test.test_code,
        "import { add } from '../helpers';\n\ntest('adds', () => expect(add(1, 2)).toBe(3));\n"
    );
    assert_eq!(test.test_file_name, "src/utils/__tests__/helpers.test.ts");
}

#[tokio::test]
async fn test_service_rejection_falls_back_to_template() {
    let service = ScriptedService::new(Err(ServiceError::Network("connection refused".into())));
    let generator = TestGenerator::new(TestForgeConfig::default()).with_service(service.clone());
    let request = AnalysisRequest::new(HELPERS, "src/utils/helpers.ts");

    let result = generator.generate_tests(&request).await.unwrap();
    let test = &result.tests[0];

    assert_eq!(service.calls(), 1);
    assert_eq!(result.summary.generation_mode, GenerationMode::Template);
    assert_eq!(test.test_code, template_code(&request));
    // low complexity + functions
    assert!((test.confidence - 0.8).abs() < 1e-9);
    assert_ne!(test.confidence, 0.9);
}

#[tokio::test]
async fn test_reply_without_code_falls_back() {
    for reply in [
        Ok("Sorry, I can't do that.".to_string()),
        Err(ServiceError::Timeout),
        Err(ServiceError::Status {
            status: 500,
            body: "upstream".into(),
        }),
    ] {
        let service = ScriptedService::new(reply);
        let generator = TestGenerator::new(TestForgeConfig::default()).with_service(service);
        let request = AnalysisRequest::new(HELPERS, "src/utils/helpers.ts");

        let result = generator.generate_tests(&request).await.unwrap();
        assert_eq!(result.summary.generation_mode, GenerationMode::Template);
        assert_eq!(result.tests[0].test_code, template_code(&request));
    }
}

#[tokio::test]
async fn test_force_template_skips_service() {
    let service = ScriptedService::new(Ok("```\ntest('x', () => {});\n```".to_string()));
    let generator = TestGenerator::new(TestForgeConfig::default()).with_service(service.clone());
    let request = AnalysisRequest::new(HELPERS, "src/utils/helpers.ts").with_options(
        GenerationOptions {
            force_template: true,
            ..GenerationOptions::default()
        },
    );

    let result = generator.generate_tests(&request).await.unwrap();
    assert_eq!(service.calls(), 0);
    assert_eq!(result.summary.generation_mode, GenerationMode::Template);
}

#[tokio::test]
async fn test_invalid_source_still_produces_result() {
    let generator = TestGenerator::offline();
    let request = AnalysisRequest::new(
        "export function broken(a {\n  if (a) {\n    return fetch('/x');\n",
        "src/broken.ts",
    );

    let result = generator.generate_tests(&request).await.unwrap();
    assert_eq!(result.summary.analysis_mode, AnalysisMode::Regex);
    assert_eq!(result.tests.len(), 1);
    assert!(!result.tests[0].test_code.is_empty());
    assert!(result.summary.estimated_coverage <= 95);
}

#[tokio::test]
async fn test_component_result_metadata() {
    let source = indoc::indoc! {"
        import { useState } from 'react';

        export function Counter({ initial, onChange }) {
          const [count, setCount] = useState(initial);
          return <button onClick={() => { setCount(count + 1); onChange(count + 1); }}>{count}</button>;
        }
    "};
    let request = AnalysisRequest::new(source, "src/components/Counter.tsx")
        .with_test_type(TestType::Component);

    let result = TestGenerator::offline().generate_tests(&request).await.unwrap();
    let test = &result.tests[0];

    assert_eq!(test.test_file_name, "src/components/__tests__/Counter.test.tsx");
    assert!(test.test_code.contains("describe('Counter', () => {"));
    assert!(test.coverage_areas.contains(&"hook state management".to_string()));
    assert!(test
        .dependencies
        .contains(&"@testing-library/react".to_string()));
    assert_eq!(result.summary.framework, Framework::Jest);
    assert_eq!(result.recommendations, test.suggestions);
}

#[tokio::test]
async fn test_result_serializes_camel_case() {
    let request = AnalysisRequest::new(HELPERS, "src/utils/helpers.ts");
    let result = TestGenerator::offline().generate_tests(&request).await.unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert!(json["tests"][0]["testFileName"].is_string());
    assert!(json["tests"][0]["coverageAreas"].is_array());
    assert!(json["summary"]["estimatedCoverage"].is_u64());
    assert_eq!(json["summary"]["generationMode"], "template");
    assert_eq!(json["summary"]["analysisMode"], "ast");
}
