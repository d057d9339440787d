//! Suggestion module for the SQL assistant
//!
//! This module provides types and parsing logic for SQL suggestions.

pub mod parser;

// Re-export main types
pub use parser::{
    MAX_SUGGESTIONS, QueryOption, SuggestionKind, decode_option_list, decode_suggestions,
    truncate_batch,
};
