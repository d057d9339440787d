//! Client for the suggestion relay
//!
//! Posts the raw input, the history context and the schema to a relay that
//! holds the completion-service credential. The relay answers with a bare
//! JSON array of suggestions.

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use super::{AiError, SuggestionRequest, SuggestionSource};
use crate::ai::message::Message;
use crate::ai::suggestion::{QueryOption, decode_option_list};

const PROVIDER: &str = "Relay";

/// Wire body of `POST /` on the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayPayload {
    pub user_input: String,
    #[serde(default)]
    pub conversation_history: Vec<Message>,
    #[serde(default)]
    pub schema_description: String,
}

impl From<&SuggestionRequest> for RelayPayload {
    fn from(request: &SuggestionRequest) -> Self {
        Self {
            user_input: request.input.clone(),
            conversation_history: request.history.clone(),
            schema_description: request.schema.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct RelayClient {
    client: reqwest::Client,
    url: String,
}

impl RelayClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::NotConfigured {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, request: &SuggestionRequest) -> Result<Vec<QueryOption>, AiError> {
        let payload = RelayPayload::from(request);

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(network_error)?;

        if !status.is_success() {
            return Err(AiError::Api {
                provider: PROVIDER.to_string(),
                code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Relay request failed")
                    .to_string(),
            });
        }

        decode_option_list(&bytes).map_err(|e| AiError::Parse {
            provider: PROVIDER.to_string(),
            message: e.to_string(),
        })
    }
}

impl SuggestionSource for RelayClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn suggest<'a>(
        &'a self,
        request: &'a SuggestionRequest,
    ) -> BoxFuture<'a, Result<Vec<QueryOption>, AiError>> {
        self.post(request).boxed()
    }
}

fn network_error(e: reqwest::Error) -> AiError {
    AiError::Network {
        provider: PROVIDER.to_string(),
        message: e.to_string(),
    }
}

#[cfg(test)]
#[path = "relay_client_tests.rs"]
mod relay_client_tests;
