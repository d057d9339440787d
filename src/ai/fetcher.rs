//! Cancelable suggestion fetch
//!
//! Wraps one call to a [`SuggestionSource`] so that it never fails: transport
//! and decode problems are logged and collapse to an empty batch, and a fired
//! cancellation token resolves to [`FetchOutcome::Aborted`].

use tokio_util::sync::CancellationToken;

use super::provider::{AiError, SuggestionRequest, SuggestionSource};
use super::suggestion::{QueryOption, truncate_batch};

/// Inputs shorter than this (in characters) never reach the network
pub const MIN_INPUT_CHARS: usize = 3;

/// Result of one fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Zero to three suggestions; empty on any failure
    Suggestions(Vec<QueryOption>),
    /// The request was cancelled before it resolved
    Aborted,
}

/// Whether `input` is long enough to be worth a request
pub fn is_fetchable(input: &str) -> bool {
    input.chars().count() >= MIN_INPUT_CHARS
}

/// Fetch suggestions for `request`, honouring `token`
pub async fn fetch_suggestions(
    source: &dyn SuggestionSource,
    request: &SuggestionRequest,
    token: &CancellationToken,
) -> FetchOutcome {
    if !is_fetchable(&request.input) {
        return FetchOutcome::Suggestions(Vec::new());
    }

    if token.is_cancelled() {
        return FetchOutcome::Aborted;
    }

    let result = tokio::select! {
        biased;
        _ = token.cancelled() => Err(AiError::Cancelled),
        result = source.suggest(request) => result,
    };

    match result {
        Ok(options) => FetchOutcome::Suggestions(truncate_batch(options)),
        Err(AiError::Cancelled) => {
            log::debug!("Suggestion request aborted ({})", source.provider_name());
            FetchOutcome::Aborted
        }
        Err(e) => {
            log::warn!("Error fetching suggestions: {}", e);
            FetchOutcome::Suggestions(Vec::new())
        }
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod fetcher_tests;
