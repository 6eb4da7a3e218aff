use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::error::LlmError;

/// Error code some providers return alongside (or instead of) HTTP 429.
const RATE_LIMIT_CODE: &str = "rate_limit_exceeded";

/// Message in a chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A provider-independent chat completion request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Ask the provider to constrain the reply to a JSON object.
    pub json_mode: bool,
}

/// Anything that can turn a chat request into the assistant's reply text.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Run one completion with `api_key`. Returns the first choice's content.
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// API error response (OpenAI-compatible).
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    code: Option<serde_json::Value>,
}

/// Chat client for OpenAI-compatible endpoints (Groq, OpenRouter, vLLM, ...).
pub struct HttpChatClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatClient {
    /// `timeout` of `None` lets a request wait as long as the provider does.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatCompletion for HttpChatClient {
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = CompletionBody {
            model: &request.model,
            messages: &request.messages,
            response_format: request
                .json_mode
                .then_some(ResponseFormat { kind: "json_object" }),
        };

        tracing::debug!(
            "POST {} model={} messages={}",
            url,
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), &error_body));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

/// Map a non-success response to the error taxonomy.
///
/// HTTP 429 or an error code of `rate_limit_exceeded` is a rate limit;
/// everything else is a provider error carrying the provider's message.
fn classify_failure(status: u16, body: &str) -> LlmError {
    let detail = serde_json::from_str::<ApiErrorResponse>(body).ok();

    let code_is_rate_limit = detail
        .as_ref()
        .and_then(|d| d.error.code.as_ref())
        .and_then(|code| code.as_str())
        .is_some_and(|code| code == RATE_LIMIT_CODE);

    let message = match detail {
        Some(d) if !d.error.message.is_empty() => d.error.message,
        _ => body.to_string(),
    };

    if status == 429 || code_is_rate_limit {
        LlmError::RateLimited { status, message }
    } else {
        LlmError::Provider { status, message }
    }
}
