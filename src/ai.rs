//! AI suggestion pipeline
//!
//! Everything between a settled input string and a parsed suggestion batch:
//! message model, prompt assembly, debounce timer, request cancellation,
//! provider clients and the fetcher that collapses their failures.

pub mod canceler;
pub mod debouncer;
pub mod fetcher;
pub mod message;
pub mod prompt;
pub mod provider;
pub mod suggestion;
