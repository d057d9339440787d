//! Natural-language to SQL autocomplete
//!
//! Debounces user input, assembles a bounded conversation context from previously
//! accepted suggestions, and asks an LLM completion service for three ranked SQL
//! suggestions. Stale or superseded requests are cancelled and their results discarded.

pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod relay;
pub mod session;

#[cfg(test)]
pub mod test_utils;

pub use ai::message::{ContentPart, Message, MessageContent, Role};
pub use ai::suggestion::{MAX_SUGGESTIONS, QueryOption, SuggestionKind};
pub use error::AppError;
pub use session::{Autocomplete, HistoryItem, Session, SuggestionMode, SuggestionView};
