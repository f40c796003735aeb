//! Generative-text service boundary
//!
//! The orchestrator only sees [`TextGenerator`]; [`HttpTextGenerator`] talks to
//! an OpenAI-compatible chat-completions endpoint. Replies are reduced to test
//! code by [`extract_test_code`].

use crate::config::ServiceConfig;
use crate::errors::ServiceError;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One stateless generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub max_tokens: u32,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, ServiceError>;
}

pub struct HttpTextGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpTextGenerator {
    /// Build a client from `config`. Fails with [`ServiceError::NotConfigured`]
    /// when no credential is present.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ServiceError::NotConfigured)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

const SYSTEM_PROMPT: &str =
    "You are an expert test engineer. Write complete, runnable test files and nothing else.";

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, ServiceError> {
        let body = ChatRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(classify_transport_error)?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: truncate(&text, 500),
            });
        }

        parse_chat_response(&text)
    }
}

fn classify_transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout
    } else {
        ServiceError::Network(err.to_string())
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Pull the assistant text out of a chat-completions body
pub fn parse_chat_response(body: &str) -> Result<String, ServiceError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| ServiceError::MalformedReply(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ServiceError::MalformedReply("reply has no message content".into()))
}

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+-]*[ \t]*\r?\n([\s\S]*?)```").unwrap());
static TEST_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:describe|it|test|test\.describe)\s*\(").unwrap());

/// Reduce a service reply to test code.
///
/// The first fenced block wins. Without one, everything from the first line
/// that opens a `describe`/`it`/`test` block is kept.
pub fn extract_test_code(reply: &str) -> Result<String, ServiceError> {
    if let Some(caps) = FENCED_BLOCK.captures(reply) {
        let code = caps[1].trim_end();
        if !code.trim().is_empty() {
            return Ok(format!("{code}\n"));
        }
    }

    TEST_DECLARATION
        .find(reply)
        .map(|m| {
            let line_start = reply[..m.start()].rfind('\n').map_or(0, |i| i + 1);
            format!("{}\n", reply[line_start..].trim_end())
        })
        .ok_or(ServiceError::MissingCodeBlock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_fenced_block_is_extracted() {
        let reply = indoc! {r#"
            Here are your tests:

            ```typescript
            import { add } from '../helpers';

            describe('add', () => {
              it('adds', () => expect(add(1, 2)).toBe(3));
            });
            ```

            Let me know if you need more.
        "#};
        let code = extract_test_code(reply).unwrap();
        assert!(code.starts_with("import { add } from '../helpers';"));
        assert!(code.ends_with("});\n"));
        assert!(!code.contains("```"));
    }

    #[test]
    fn test_unfenced_reply_starts_at_first_declaration() {
        let reply = "Sure thing.\ndescribe('add', () => {\n  it('works', () => {});\n});\n";
        let code = extract_test_code(reply).unwrap();
        assert_eq!(code, "describe('add', () => {\n  it('works', () => {});\n});\n");
    }

    #[test]
    fn test_reply_without_code() {
        let err = extract_test_code("I cannot help with that.").unwrap_err();
        assert_eq!(err, ServiceError::MissingCodeBlock);
    }

    #[test]
    fn test_parse_chat_response() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"```js\ntest('x', () => {});\n```"}}]}"#;
        let content = parse_chat_response(body).unwrap();
        assert!(content.contains("test('x'"));
    }

    #[test]
    fn test_parse_chat_response_rejects_garbage() {
        assert!(matches!(
            parse_chat_response("<html>502</html>"),
            Err(ServiceError::MalformedReply(_))
        ));
        assert!(matches!(
            parse_chat_response(r#"{"choices":[]}"#),
            Err(ServiceError::MalformedReply(_))
        ));
    }

    #[test]
    fn test_missing_credential() {
        let config = ServiceConfig {
            api_key: None,
            ..ServiceConfig::default()
        };
        assert!(matches!(
            HttpTextGenerator::from_config(&config),
            Err(ServiceError::NotConfigured)
        ));
    }
}
