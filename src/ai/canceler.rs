//! Request cancellation
//!
//! Tracks the single outstanding suggestion request. Each fire re-arms the
//! canceler: the previous token is cancelled and a fresh token plus request id
//! are handed out. Responses are only applied when their id is still current.

use tokio_util::sync::CancellationToken;

/// Handle for one dispatched request
#[derive(Debug, Clone)]
pub struct Ticket {
    pub request_id: u64,
    pub token: CancellationToken,
}

/// Owner of the in-flight request's cancellation token
#[derive(Debug, Default)]
pub struct RequestCanceler {
    request_id: u64,
    token: Option<CancellationToken>,
}

impl RequestCanceler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede any outstanding request and issue a new ticket
    pub fn rearm(&mut self) -> Ticket {
        self.cancel();
        self.request_id = self.request_id.wrapping_add(1);
        let token = CancellationToken::new();
        self.token = Some(token.clone());
        Ticket {
            request_id: self.request_id,
            token,
        }
    }

    /// Cancel the outstanding request, if any
    ///
    /// Returns true if a live token was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.token.take() {
            Some(token) if !token.is_cancelled() => {
                token.cancel();
                log::debug!("Cancelled request {}", self.request_id);
                true
            }
            _ => false,
        }
    }

    /// Whether `request_id` belongs to the live, uncancelled request
    pub fn is_current(&self, request_id: u64) -> bool {
        request_id == self.request_id
            && self
                .token
                .as_ref()
                .is_some_and(|token| !token.is_cancelled())
    }

    /// Mark the live request as resolved without cancelling it
    pub fn finish(&mut self, request_id: u64) {
        if request_id == self.request_id {
            self.token = None;
        }
    }

    pub fn current_request_id(&self) -> u64 {
        self.request_id
    }

    pub fn has_in_flight_request(&self) -> bool {
        self.token.is_some()
    }
}

impl Drop for RequestCanceler {
    fn drop(&mut self) {
        self.cancel();
    }
}
