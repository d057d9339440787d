//! Prompt template generation
//!
//! Builds the ordered message list sent to the completion service:
//! a system instruction embedding the schema, up to five prior accepted
//! selections as user/assistant pairs, and a final user turn with the raw input.
//! Output is a pure function of its inputs.

use crate::ai::message::Message;
use crate::ai::provider::SuggestionRequest;
use crate::session::HistoryItem;

/// Number of accepted history items replayed as context
pub const HISTORY_LIMIT: usize = 5;

const SYSTEM_PROMPT_HEAD: &str = r#"You are a low-latency autocomplete engine that turns partial natural language input into SQL queries for a known PostgreSQL database schema.

## Inputs
- A natural language schema description.
- A conversation history of previous natural language queries and the SQL suggestion the user chose for each.
- The current user input.

Return exactly 3 different SQL query suggestions as JSON.

## Core rules
- Respond as fast as possible. Latency matters more than perfect accuracy.
- Always treat the conversation history as relevant context.
  - If the current input reads like a refinement ("make that by day", "only for US", "now group by device"), continue the most recent user query.
  - If the current input clearly starts a new topic, treat it as a new query.
- Classify every suggestion and put the tag at the start of its description:
  - "(new query) ..." when it is independent of previous context
  - "(expanding on previous) ..." when it refines or modifies the last query

## Output format (strict)
Return exactly one JSON object:

{
  "suggestions": [
    { "sqlQuery": "string", "description": "string" },
    { "sqlQuery": "string", "description": "string" },
    { "sqlQuery": "string", "description": "string" }
  ]
}

- Exactly 3 suggestions.
- No extra keys, no markdown, no commentary.
- No null values unless absolutely necessary.
- Never wrap the JSON in backticks.

## Diversity
The 3 suggestions must be meaningfully different. Where possible vary:
- specificity (broad vs narrow filters)
- time scope (recent vs all-time vs specific periods)
- aggregation (raw rows vs counts vs summaries)
- sorting and limiting (top N, recent N, all records)

## Schema (read-only context)
"#;

const USER_TURN_INSTRUCTIONS: &str = r#"Instructions:
- Use BOTH the conversation history and the current user input.
- If the current input refines or continues a previous query, treat it as a continuation.
- If it clearly starts a different topic, treat it as a new query.
- Prefix each description with "(new query)" if it is independent of previous queries, or "(expanding on previous)" if it builds on the last relevant query from the history.

Now generate 3 DIFFERENT SQL query suggestions in the JSON format from the system message."#;

/// Build the system instruction with the schema description embedded verbatim
pub fn system_message(schema: &str) -> Message {
    Message::system(format!("{}{}", SYSTEM_PROMPT_HEAD, schema.trim()))
}

/// Build the final user turn carrying the raw input and task instructions
pub fn user_turn(input: &str) -> Message {
    Message::user(format!(
        "CURRENT USER INPUT:\n\"{}\"\n\n{}",
        input, USER_TURN_INSTRUCTIONS
    ))
}

/// Convert accepted history into user/assistant message pairs
///
/// Only items with a selection are used; the most recent [`HISTORY_LIMIT`]
/// of those are replayed oldest first. Items whose selection does not point
/// into their own suggestion set are skipped.
pub fn history_messages(history: &[HistoryItem]) -> Vec<Message> {
    let selected: Vec<&HistoryItem> = history
        .iter()
        .filter(|item| item.selected().is_some())
        .collect();
    let start = selected.len().saturating_sub(HISTORY_LIMIT);

    selected[start..]
        .iter()
        .flat_map(|item| {
            let chosen = item.selected().map(|option| {
                format!(
                    "Chosen SQL suggestion for the previous query: \nDescription: {} \nSQL: {}",
                    option.description, option.sql_query
                )
            });
            [
                Message::user(format!(
                    "Previous natural language query: {}",
                    item.user_text
                )),
                Message::assistant(chosen.unwrap_or_default()),
            ]
        })
        .collect()
}

/// Assemble the full message list: system, history turns, current user turn
///
/// History messages are flattened to plain text so structured client
/// content never reaches the completion service.
pub fn assemble(request: &SuggestionRequest) -> Vec<Message> {
    let mut messages = Vec::with_capacity(request.history.len() + 2);
    messages.push(system_message(&request.schema));
    messages.extend(request.history.iter().map(Message::normalized));
    messages.push(user_turn(&request.input));
    messages
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod prompt_tests;
