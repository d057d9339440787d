//! Tests for the cancelable fetch

use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::test_utils::test_helpers::{
    MockFailure, MockReply, MockSource, TEST_SCHEMA, sample_options,
};

fn request(input: &str) -> SuggestionRequest {
    SuggestionRequest {
        input: input.to_string(),
        history: Vec::new(),
        schema: Arc::from(TEST_SCHEMA),
    }
}

#[test]
fn test_is_fetchable_counts_characters() {
    assert!(!is_fetchable(""));
    assert!(!is_fetchable("sh"));
    assert!(is_fetchable("sho"));
    // Two multi-byte characters are still only two characters
    assert!(!is_fetchable("éé"));
    assert!(is_fetchable("ééé"));
}

#[tokio::test]
async fn test_short_input_skips_the_source() {
    let source = MockSource::new();
    let token = CancellationToken::new();

    let outcome = fetch_suggestions(&source, &request("sh"), &token).await;

    assert_eq!(outcome, FetchOutcome::Suggestions(Vec::new()));
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn test_returns_source_options() {
    let source = MockSource::with_replies([MockReply::options(sample_options(2))]);
    let token = CancellationToken::new();

    let outcome = fetch_suggestions(&source, &request("show me signups"), &token).await;

    assert_eq!(outcome, FetchOutcome::Suggestions(sample_options(2)));
    assert_eq!(source.calls()[0].input, "show me signups");
}

#[tokio::test]
async fn test_truncates_oversized_batches() {
    let source = MockSource::with_replies([MockReply::options(sample_options(7))]);
    let token = CancellationToken::new();

    let outcome = fetch_suggestions(&source, &request("show me signups"), &token).await;

    assert_eq!(outcome, FetchOutcome::Suggestions(sample_options(3)));
}

#[tokio::test]
async fn test_failures_collapse_to_empty() {
    for failure in [
        MockFailure::Network,
        MockFailure::Api(429),
        MockFailure::Parse,
    ] {
        let source = MockSource::with_replies([MockReply::failure(failure)]);
        let token = CancellationToken::new();

        let outcome = fetch_suggestions(&source, &request("show me signups"), &token).await;
        assert_eq!(
            outcome,
            FetchOutcome::Suggestions(Vec::new()),
            "{:?} should yield an empty batch",
            failure
        );
    }
}

#[tokio::test]
async fn test_source_cancellation_is_aborted() {
    let source = MockSource::with_replies([MockReply::failure(MockFailure::Cancelled)]);
    let token = CancellationToken::new();

    let outcome = fetch_suggestions(&source, &request("show me signups"), &token).await;
    assert_eq!(outcome, FetchOutcome::Aborted);
}

#[tokio::test]
async fn test_pre_cancelled_token_skips_the_source() {
    let source = MockSource::new();
    let token = CancellationToken::new();
    token.cancel();

    let outcome = fetch_suggestions(&source, &request("show me signups"), &token).await;

    assert_eq!(outcome, FetchOutcome::Aborted);
    assert_eq!(source.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_flight_aborts() {
    let source = Arc::new(MockSource::with_replies([
        MockReply::options(sample_options(3)).after(Duration::from_secs(5)),
    ]));
    let token = CancellationToken::new();

    let task = {
        let source = source.clone();
        let token = token.clone();
        tokio::spawn(async move {
            fetch_suggestions(source.as_ref(), &request("show me signups"), &token).await
        })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    token.cancel();

    assert_eq!(task.await.unwrap(), FetchOutcome::Aborted);
    assert_eq!(source.call_count(), 1);
}
