//! AI provider abstraction
//!
//! Defines the AiProvider enum, AiError types, the two seams the rest of the
//! crate talks to (`CompletionBackend` for raw chat completions and
//! `SuggestionSource` for parsed suggestions), and the factory that builds a
//! provider from configuration.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use thiserror::Error;

use crate::ai::message::Message;
use crate::ai::prompt;
use crate::ai::suggestion::{QueryOption, decode_suggestions};
use crate::config::types::{AiConfig, AiProviderType, GroqConfig};

mod chat;
mod relay_client;

pub use chat::ChatClient;
pub use relay_client::{RelayClient, RelayPayload};

/// Errors that can occur during AI operations
#[derive(Debug, Error)]
pub enum AiError {
    /// AI is not configured (missing API key or disabled)
    #[error("[{provider}] AI not configured: {message}")]
    NotConfigured { provider: String, message: String },

    /// Network error during API request
    #[error("[{provider}] Network error: {message}")]
    Network { provider: String, message: String },

    /// API returned an error response
    #[error("[{provider}] API error ({code}): {message}")]
    Api {
        provider: String,
        code: u16,
        message: String,
    },

    /// Failed to parse API response
    #[error("[{provider}] Parse error: {message}")]
    Parse { provider: String, message: String },

    /// Request was cancelled
    #[error("Request cancelled")]
    Cancelled,
}

/// Everything a suggestion request carries
///
/// `history` is the already-built context (see `prompt::history_messages`);
/// the schema is shared for the whole session and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRequest {
    pub input: String,
    pub history: Vec<Message>,
    pub schema: Arc<str>,
}

/// A service that turns a message list into a raw completion text
pub trait CompletionBackend: Send + Sync {
    fn provider_name(&self) -> &'static str;

    fn complete<'a>(&'a self, messages: &'a [Message]) -> BoxFuture<'a, Result<String, AiError>>;
}

/// A service that answers a suggestion request with parsed options
pub trait SuggestionSource: Send + Sync {
    fn provider_name(&self) -> &'static str;

    fn suggest<'a>(
        &'a self,
        request: &'a SuggestionRequest,
    ) -> BoxFuture<'a, Result<Vec<QueryOption>, AiError>>;
}

/// Assemble the prompt, run one completion, and strictly decode the result
///
/// Shared by the direct provider and the relay server so both produce the
/// same request/response contract.
pub async fn suggest_via(
    backend: &dyn CompletionBackend,
    request: &SuggestionRequest,
) -> Result<Vec<QueryOption>, AiError> {
    let messages = prompt::assemble(request);
    let body = backend.complete(&messages).await?;
    decode_suggestions(&body).map_err(|e| AiError::Parse {
        provider: backend.provider_name().to_string(),
        message: e.to_string(),
    })
}

/// AI provider implementations
#[derive(Debug)]
pub enum AiProvider {
    /// OpenAI-compatible chat completions, called directly
    Direct(ChatClient),
    /// Thin server-side relay holding the credential
    Relay(RelayClient),
}

impl AiProvider {
    /// Create an AI provider from configuration
    ///
    /// Returns an error if the configuration is invalid (e.g., missing API key)
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let provider = match config.provider {
            AiProviderType::Groq => "Groq",
            AiProviderType::Relay => "Relay",
        };

        if !config.enabled {
            return Err(AiError::NotConfigured {
                provider: provider.to_string(),
                message: "AI is disabled in config".to_string(),
            });
        }

        match config.provider {
            AiProviderType::Groq => Ok(AiProvider::Direct(chat_client(&config.groq)?)),
            AiProviderType::Relay => {
                let url = config
                    .relay
                    .url
                    .as_ref()
                    .filter(|u| !u.trim().is_empty())
                    .ok_or_else(|| AiError::NotConfigured {
                        provider: provider.to_string(),
                        message: "Missing or empty url in [ai.relay] config".to_string(),
                    })?;

                Ok(AiProvider::Relay(RelayClient::new(
                    url.clone(),
                    Duration::from_secs(config.relay.timeout_secs),
                )?))
            }
        }
    }
}

/// Build the chat completions client from `[ai.groq]`
///
/// Also used by the relay server, which always talks to the completion
/// service directly.
pub fn chat_client(groq: &GroqConfig) -> Result<ChatClient, AiError> {
    let provider = "Groq";
    let api_key = groq
        .api_key
        .as_ref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| AiError::NotConfigured {
            provider: provider.to_string(),
            message: "Missing or empty api_key in [ai.groq] config".to_string(),
        })?;

    if groq.model.trim().is_empty() {
        return Err(AiError::NotConfigured {
            provider: provider.to_string(),
            message: "Empty model in [ai.groq] config".to_string(),
        });
    }

    ChatClient::new(
        api_key.clone(),
        groq.model.clone(),
        groq.base_url.clone(),
        groq.temperature,
        groq.max_tokens,
        Duration::from_secs(groq.timeout_secs),
    )
}

impl SuggestionSource for AiProvider {
    fn provider_name(&self) -> &'static str {
        match self {
            AiProvider::Direct(client) => client.provider_name(),
            AiProvider::Relay(client) => client.provider_name(),
        }
    }

    fn suggest<'a>(
        &'a self,
        request: &'a SuggestionRequest,
    ) -> BoxFuture<'a, Result<Vec<QueryOption>, AiError>> {
        match self {
            AiProvider::Direct(client) => suggest_via(client, request).boxed(),
            AiProvider::Relay(client) => client.suggest(request),
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
