//! OpenAI-compatible chat completions client
//!
//! Used against Groq by default. Requests strict JSON output with a low
//! temperature and a bounded token ceiling.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;

use super::{AiError, CompletionBackend};
use crate::ai::message::Message;

const PROVIDER: &str = "Groq";

/// Completion text used when the service returns no message content
const EMPTY_COMPLETION: &str = r#"{"suggestions":[]}"#;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
    messages: &'a [Message],
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Chat completions client
///
/// Constructed once at startup and shared read-only for the rest of the
/// process; the underlying `reqwest::Client` pools connections.
pub struct ChatClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        temperature: f32,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::NotConfigured {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url,
            temperature,
            max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Serialize the request body for a message list
    pub fn build_request_body(&self, messages: &[Message]) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            messages,
        };

        serde_json::to_string(&request).map_err(|e| AiError::Parse {
            provider: PROVIDER.to_string(),
            message: e.to_string(),
        })
    }

    /// Run one completion and return the message text
    pub async fn send_chat(&self, messages: &[Message]) -> Result<String, AiError> {
        let body = self.build_request_body(messages)?;

        let response = self
            .client
            .post(self.endpoint())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(network_error)?;

        if !status.is_success() {
            return Err(AiError::Api {
                provider: PROVIDER.to_string(),
                code: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        extract_content(&bytes)
    }
}

impl CompletionBackend for ChatClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn complete<'a>(&'a self, messages: &'a [Message]) -> BoxFuture<'a, Result<String, AiError>> {
        self.send_chat(messages).boxed()
    }
}

fn network_error(e: reqwest::Error) -> AiError {
    AiError::Network {
        provider: PROVIDER.to_string(),
        message: e.to_string(),
    }
}

/// Pull `choices[0].message.content` out of a completion response
///
/// A well-formed response without content yields an empty suggestion object.
pub fn extract_content(body: &Bytes) -> Result<String, AiError> {
    let json: serde_json::Value = serde_json::from_slice(body).map_err(|e| AiError::Parse {
        provider: PROVIDER.to_string(),
        message: e.to_string(),
    })?;

    let content = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or(EMPTY_COMPLETION);

    Ok(content.to_string())
}

#[cfg(test)]
#[path = "chat_tests.rs"]
mod chat_tests;
