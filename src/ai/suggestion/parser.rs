//! Suggestion parsing for model responses
//!
//! The model is asked for exactly one JSON object:
//! ```text
//! { "suggestions": [ { "sqlQuery": "...", "description": "(new query) ..." }, ... ] }
//! ```
//! The relay answers with the bare array. Both shapes decode into [`QueryOption`]s.

use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound on the number of suggestions in a batch
pub const MAX_SUGGESTIONS: usize = 3;

const NEW_QUERY_TAG: &str = "(new query)";
const EXPANDING_TAG: &str = "(expanding on previous)";

// =========================================================================
// Suggestion Types
// =========================================================================

/// Classification the model encodes at the start of each description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    /// Independent of previous queries
    NewQuery,
    /// Refines the most recent accepted query
    ExpandingOnPrevious,
    /// No recognised tag
    Unclassified,
}

impl SuggestionKind {
    /// Get the display label for this kind
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionKind::NewQuery => "[new]",
            SuggestionKind::ExpandingOnPrevious => "[refine]",
            SuggestionKind::Unclassified => "[sql]",
        }
    }
}

/// A single SQL suggestion
///
/// `description` is kept exactly as the model returned it, tag included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOption {
    #[serde(default, deserialize_with = "string_or_null")]
    pub sql_query: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub description: String,
}

impl QueryOption {
    pub fn new(sql_query: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            sql_query: sql_query.into(),
            description: description.into(),
        }
    }

    /// Classify the suggestion from its description tag
    pub fn kind(&self) -> SuggestionKind {
        if self.description.contains(EXPANDING_TAG) {
            SuggestionKind::ExpandingOnPrevious
        } else if self.description.contains(NEW_QUERY_TAG) {
            SuggestionKind::NewQuery
        } else {
            SuggestionKind::Unclassified
        }
    }

    /// Description with the classification tag removed, for display only
    pub fn display_description(&self) -> String {
        self.description
            .replacen(EXPANDING_TAG, "", 1)
            .replacen(NEW_QUERY_TAG, "", 1)
            .trim()
            .to_string()
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct SuggestionsEnvelope {
    suggestions: Vec<QueryOption>,
}

// =========================================================================
// Parsing Functions
// =========================================================================

/// Cap a batch at [`MAX_SUGGESTIONS`], keeping the first entries
pub fn truncate_batch(mut options: Vec<QueryOption>) -> Vec<QueryOption> {
    options.truncate(MAX_SUGGESTIONS);
    options
}

/// Decode a model completion of the form `{"suggestions": [...]}`
///
/// Fails on invalid JSON or a missing `suggestions` key. The result is
/// truncated to [`MAX_SUGGESTIONS`]; fewer entries pass through unchanged.
pub fn decode_suggestions(body: &str) -> Result<Vec<QueryOption>, serde_json::Error> {
    let envelope: SuggestionsEnvelope = serde_json::from_str(strip_code_fence(body))?;
    Ok(truncate_batch(envelope.suggestions))
}

/// Decode a bare JSON array of suggestions (the relay response shape)
pub fn decode_option_list(body: &[u8]) -> Result<Vec<QueryOption>, serde_json::Error> {
    let options: Vec<QueryOption> = serde_json::from_slice(body)?;
    Ok(truncate_batch(options))
}

/// Strip a surrounding markdown code fence if the model added one anyway
fn strip_code_fence(body: &str) -> &str {
    let trimmed = body.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return trimmed;
    };
    // Drop an info string such as `json` on the opening fence line
    match inner.find('\n') {
        Some(pos) if !inner[..pos].trim_start().starts_with('{') => inner[pos + 1..].trim(),
        _ => inner.trim(),
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod parser_tests;
