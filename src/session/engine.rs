//! Async driver for a [`Session`]
//!
//! Owns the session and the suggestion source. Input and selection events are
//! applied synchronously; `step` then waits for whichever comes first, the
//! debounce deadline or a fetch response, and applies it. Fetches run as
//! spawned tasks and report back over an unbounded channel.

use std::future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;

use super::session_state::{Applied, FetchJob, FetchResponse, Session, SuggestionView};
use super::{HistoryItem, SuggestionMode};
use crate::ai::fetcher::fetch_suggestions;
use crate::ai::provider::SuggestionSource;

/// What a call to [`Autocomplete::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The debounce timer fired and a fetch was dispatched
    Dispatched { request_id: u64 },
    /// A fetch finished and its response was processed
    Response { request_id: u64, applied: Applied },
}

pub struct Autocomplete {
    session: Session,
    source: Arc<dyn SuggestionSource>,
    response_tx: mpsc::UnboundedSender<FetchResponse>,
    response_rx: mpsc::UnboundedReceiver<FetchResponse>,
    /// Spawned fetches whose response has not been received yet
    outstanding: usize,
}

impl Autocomplete {
    pub fn new(source: Arc<dyn SuggestionSource>, schema: Arc<str>, mode: SuggestionMode) -> Self {
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        Self {
            session: Session::new(schema, mode),
            source,
            response_tx,
            response_rx,
            outstanding: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> SuggestionView {
        self.session.view()
    }

    pub fn history(&self) -> &[HistoryItem] {
        self.session.history()
    }

    pub fn on_input_change(&mut self, text: impl Into<String>) {
        self.session.set_input(text, Instant::now());
    }

    pub fn on_suggestion_select(&mut self, index: usize) -> bool {
        self.session.select_suggestion(index)
    }

    /// Wait for and handle the next timer fire or fetch response
    ///
    /// Returns `None` once nothing is pending: no armed timer and no fetch
    /// still running.
    pub async fn step(&mut self) -> Option<EngineEvent> {
        loop {
            let deadline = self.session.debounce_deadline();
            if deadline.is_none() && self.outstanding == 0 {
                return None;
            }

            tokio::select! {
                biased;
                Some(response) = self.response_rx.recv(), if self.outstanding > 0 => {
                    self.outstanding -= 1;
                    let request_id = response.request_id;
                    let applied = self.session.apply_response(response);
                    return Some(EngineEvent::Response { request_id, applied });
                }
                _ = sleep_until(deadline) => {
                    if let Some(job) = self.session.poll_debounce(Instant::now()) {
                        let request_id = job.request_id;
                        self.dispatch(job);
                        return Some(EngineEvent::Dispatched { request_id });
                    }
                }
            }
        }
    }

    /// Step until idle and return the final view
    pub async fn settle(&mut self) -> SuggestionView {
        while self.step().await.is_some() {}
        self.view()
    }

    /// Cancel the pending timer and any in-flight fetch
    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }

    fn dispatch(&mut self, job: FetchJob) {
        log::debug!(
            "Dispatching request {} via {}",
            job.request_id,
            self.source.provider_name()
        );

        let source = Arc::clone(&self.source);
        let response_tx = self.response_tx.clone();
        self.outstanding += 1;

        tokio::spawn(async move {
            let outcome = fetch_suggestions(source.as_ref(), &job.request, &job.token).await;
            // Receiver is gone only after the engine was dropped
            let _ = response_tx.send(FetchResponse {
                request_id: job.request_id,
                outcome,
            });
        });
    }
}

impl Drop for Autocomplete {
    fn drop(&mut self) {
        self.session.shutdown();
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
