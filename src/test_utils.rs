#[cfg(test)]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::net::SocketAddr;
    use std::sync::Mutex;
    use std::time::Duration;

    use axum::Router;
    use futures::FutureExt;
    use futures::future::BoxFuture;

    use crate::ai::message::Message;
    use crate::ai::provider::{AiError, CompletionBackend, SuggestionRequest, SuggestionSource};
    use crate::ai::suggestion::QueryOption;

    pub const TEST_SCHEMA: &str = "CREATE TABLE events (id SERIAL, name TEXT, created_at TIMESTAMP);";

    /// `n` distinct options, alternating new/refine tags
    pub fn sample_options(n: usize) -> Vec<QueryOption> {
        (0..n)
            .map(|i| {
                let tag = if i % 2 == 0 {
                    "(new query)"
                } else {
                    "(expanding on previous)"
                };
                QueryOption::new(
                    format!("SELECT {} FROM events;", i),
                    format!("{} option {}", tag, i),
                )
            })
            .collect()
    }

    /// Completion text in the `{"suggestions": [...]}` envelope
    pub fn completion_body(options: &[QueryOption]) -> String {
        serde_json::json!({ "suggestions": options }).to_string()
    }

    /// Serve `router` on an ephemeral local port
    pub async fn spawn_router(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    /// Canned failure for mocks; `AiError` itself is not `Clone`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MockFailure {
        Network,
        Api(u16),
        Parse,
        Cancelled,
    }

    impl MockFailure {
        fn into_error(self, provider: &str) -> AiError {
            match self {
                MockFailure::Network => AiError::Network {
                    provider: provider.to_string(),
                    message: "connection reset".to_string(),
                },
                MockFailure::Api(code) => AiError::Api {
                    provider: provider.to_string(),
                    code,
                    message: "upstream error".to_string(),
                },
                MockFailure::Parse => AiError::Parse {
                    provider: provider.to_string(),
                    message: "expected value at line 1 column 1".to_string(),
                },
                MockFailure::Cancelled => AiError::Cancelled,
            }
        }
    }

    /// Raw completion backend with a fixed reply
    pub struct StubBackend {
        reply: Result<String, MockFailure>,
        calls: Mutex<Vec<Vec<Message>>>,
    }

    impl StubBackend {
        pub fn replying(body: impl Into<String>) -> Self {
            Self {
                reply: Ok(body.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(failure: MockFailure) -> Self {
            Self {
                reply: Err(failure),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<Vec<Message>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CompletionBackend for StubBackend {
        fn provider_name(&self) -> &'static str {
            "Stub"
        }

        fn complete<'a>(
            &'a self,
            messages: &'a [Message],
        ) -> BoxFuture<'a, Result<String, AiError>> {
            self.calls.lock().unwrap().push(messages.to_vec());
            let reply = self.reply.clone().map_err(|f| f.into_error("Stub"));
            async move { reply }.boxed()
        }
    }

    /// One scripted answer from `MockSource`
    #[derive(Debug, Clone)]
    pub struct MockReply {
        pub delay: Duration,
        pub result: Result<Vec<QueryOption>, MockFailure>,
    }

    impl MockReply {
        pub fn options(options: Vec<QueryOption>) -> Self {
            Self {
                delay: Duration::ZERO,
                result: Ok(options),
            }
        }

        pub fn failure(failure: MockFailure) -> Self {
            Self {
                delay: Duration::ZERO,
                result: Err(failure),
            }
        }

        pub fn after(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    /// Suggestion source that records requests and plays back scripted replies
    ///
    /// Once the script runs out every call answers three sample options
    /// immediately.
    #[derive(Default)]
    pub struct MockSource {
        replies: Mutex<VecDeque<MockReply>>,
        calls: Mutex<Vec<SuggestionRequest>>,
    }

    impl MockSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_replies(replies: impl IntoIterator<Item = MockReply>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<SuggestionRequest> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl SuggestionSource for MockSource {
        fn provider_name(&self) -> &'static str {
            "Mock"
        }

        fn suggest<'a>(
            &'a self,
            request: &'a SuggestionRequest,
        ) -> BoxFuture<'a, Result<Vec<QueryOption>, AiError>> {
            self.calls.lock().unwrap().push(request.clone());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| MockReply::options(sample_options(3)));

            async move {
                if !reply.delay.is_zero() {
                    tokio::time::sleep(reply.delay).await;
                }
                reply.result.map_err(|f| f.into_error("Mock"))
            }
            .boxed()
        }
    }
}
