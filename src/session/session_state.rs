//! Session state machine
//!
//! Pure state transitions; timers are read from the `now` argument and the
//! network is reached only through the `FetchJob`s handed out by
//! `poll_debounce`. Every response carries the request id it was issued for
//! and is dropped unless that id is still current.

use std::sync::Arc;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::SuggestionMode;
use super::history::HistoryItem;
use crate::ai::canceler::RequestCanceler;
use crate::ai::debouncer::Debouncer;
use crate::ai::fetcher::{FetchOutcome, is_fetchable};
use crate::ai::prompt;
use crate::ai::provider::SuggestionRequest;
use crate::ai::suggestion::{QueryOption, truncate_batch};

/// Work order for one suggestion fetch
#[derive(Debug, Clone)]
pub struct FetchJob {
    pub request_id: u64,
    pub token: CancellationToken,
    pub request: SuggestionRequest,
}

/// A finished fetch, tagged with the id it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub request_id: u64,
    pub outcome: FetchOutcome,
}

/// What `apply_response` did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// New batch is visible
    Replaced,
    /// Current request was aborted; only the loading flag changed
    Aborted,
    /// Response belonged to a superseded request
    Stale,
}

/// Snapshot for presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionView {
    pub suggestions: Vec<QueryOption>,
    pub is_loading: bool,
}

#[derive(Debug)]
pub struct Session {
    input: String,
    suggestions: Vec<QueryOption>,
    loading: bool,
    history: Vec<HistoryItem>,
    schema: Arc<str>,
    mode: SuggestionMode,
    debouncer: Debouncer,
    canceler: RequestCanceler,
}

impl Session {
    pub fn new(schema: Arc<str>, mode: SuggestionMode) -> Self {
        Self {
            input: String::new(),
            suggestions: Vec::new(),
            loading: false,
            history: Vec::new(),
            schema,
            mode,
            debouncer: Debouncer::new(mode.debounce_delay()),
            canceler: RequestCanceler::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn mode(&self) -> SuggestionMode {
        self.mode
    }

    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    pub fn view(&self) -> SuggestionView {
        SuggestionView {
            suggestions: self.suggestions.clone(),
            is_loading: self.loading,
        }
    }

    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn has_in_flight_request(&self) -> bool {
        self.canceler.has_in_flight_request()
    }

    /// Record a new input value
    ///
    /// Supersedes any in-flight fetch. Short inputs clear the batch at once;
    /// anything else (re)arms the debounce timer.
    pub fn set_input(&mut self, text: impl Into<String>, now: Instant) {
        self.input = text.into();
        self.canceler.cancel();
        self.loading = false;

        if is_fetchable(&self.input) {
            self.debouncer.arm(now);
        } else {
            self.debouncer.cancel();
            self.suggestions.clear();
        }
    }

    /// Accept suggestion `index` from the visible batch
    ///
    /// Returns false (and changes nothing) when `index` is out of range.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        if index >= self.suggestions.len() {
            return false;
        }

        let item = HistoryItem::new(
            std::mem::take(&mut self.input),
            std::mem::take(&mut self.suggestions),
            Some(index),
        );
        log::debug!("Accepted suggestion {} as history item {}", index, item.id);
        self.history.push(item);

        self.debouncer.cancel();
        self.canceler.cancel();
        self.loading = false;
        true
    }

    /// Fire the debounce timer if due and hand out the resulting fetch
    pub fn poll_debounce(&mut self, now: Instant) -> Option<FetchJob> {
        if !self.debouncer.fire_if_due(now) {
            return None;
        }

        let ticket = self.canceler.rearm();
        self.loading = true;

        let history = if self.mode.uses_history() {
            prompt::history_messages(&self.history)
        } else {
            Vec::new()
        };

        Some(FetchJob {
            request_id: ticket.request_id,
            token: ticket.token,
            request: SuggestionRequest {
                input: self.input.clone(),
                history,
                schema: Arc::clone(&self.schema),
            },
        })
    }

    /// Apply a finished fetch if it is still the current one
    pub fn apply_response(&mut self, response: FetchResponse) -> Applied {
        if !self.canceler.is_current(response.request_id) {
            log::debug!("Discarding stale response {}", response.request_id);
            return Applied::Stale;
        }

        self.canceler.finish(response.request_id);
        self.loading = false;

        match response.outcome {
            FetchOutcome::Suggestions(options) => {
                self.suggestions = truncate_batch(options);
                Applied::Replaced
            }
            FetchOutcome::Aborted => Applied::Aborted,
        }
    }

    /// Cancel pending and in-flight work
    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
        self.canceler.cancel();
        self.loading = false;
    }
}

#[cfg(test)]
#[path = "session_state_tests.rs"]
mod session_state_tests;
