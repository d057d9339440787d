//! Accepted-selection history
//!
//! One `HistoryItem` per input cycle in which the user picked a suggestion.
//! Items are immutable once created and only ever appended.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::ai::suggestion::QueryOption;

static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A completed input cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// Unique token: `<unix-millis>-<sequence>`
    pub id: String,
    /// Natural-language input at the time of selection
    pub user_text: String,
    /// The full suggestion batch that was offered
    pub suggestions: Vec<QueryOption>,
    /// Index of the chosen suggestion, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_index: Option<usize>,
}

impl HistoryItem {
    pub fn new(
        user_text: impl Into<String>,
        suggestions: Vec<QueryOption>,
        selected_index: Option<usize>,
    ) -> Self {
        Self {
            id: next_id(),
            user_text: user_text.into(),
            suggestions,
            selected_index,
        }
    }

    /// The chosen suggestion, when the selection points into the batch
    pub fn selected(&self) -> Option<&QueryOption> {
        self.selected_index.and_then(|i| self.suggestions.get(i))
    }
}

fn next_id() -> String {
    let seq = NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), seq)
}
