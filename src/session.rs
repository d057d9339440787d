//! Autocomplete session
//!
//! `Session` is the synchronous state machine (input, suggestion batch,
//! loading flag, history); `Autocomplete` drives it on a tokio runtime.

use std::time::Duration;

use serde::Deserialize;

pub mod engine;
mod history;
mod session_state;

pub use engine::{Autocomplete, EngineEvent};
pub use history::HistoryItem;
pub use session_state::{Applied, FetchJob, FetchResponse, Session, SuggestionView};

/// How much context a request carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionMode {
    /// Accepted history goes into every request
    #[default]
    ContextAware,
    /// Each request stands alone; typing is debounced longer
    ContextFree,
}

impl SuggestionMode {
    pub fn debounce_delay(&self) -> Duration {
        match self {
            SuggestionMode::ContextAware => Duration::from_millis(300),
            SuggestionMode::ContextFree => Duration::from_millis(600),
        }
    }

    pub fn uses_history(&self) -> bool {
        matches!(self, SuggestionMode::ContextAware)
    }
}
