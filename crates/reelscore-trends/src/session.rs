//! Session-scoped cache of the last trend summary.

use crate::error::TrendError;
use crate::llm::LlmClient;
use crate::prompts::TrendRequest;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrendState {
    /// Nothing generated yet.
    #[default]
    Absent,
    /// Last successful summary.
    Populated(String),
    /// Reset by the user.
    Cleared,
}

#[derive(Debug, Clone, Default)]
pub struct TrendSession {
    state: TrendState,
}

impl TrendSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TrendState {
        &self.state
    }

    pub fn summary(&self) -> Option<&str> {
        match &self.state {
            TrendState::Populated(text) => Some(text),
            _ => None,
        }
    }

    /// Return the cached summary, or ask the model for one.
    pub fn generate(
        &mut self,
        client: &dyn LlmClient,
        request: &TrendRequest,
    ) -> Result<&str, TrendError> {
        if matches!(self.state, TrendState::Populated(_)) {
            return Ok(self.summary().unwrap_or_default());
        }
        self.regenerate(client, request)
    }

    /// Always ask the model. On failure the previous state is kept.
    pub fn regenerate(
        &mut self,
        client: &dyn LlmClient,
        request: &TrendRequest,
    ) -> Result<&str, TrendError> {
        if request.descriptions.trim().is_empty() {
            return Err(TrendError::NoDescriptions);
        }

        match client.generate(&request.prompt(), request.max_tokens) {
            Ok(text) => {
                info!(
                    provider = client.name(),
                    chars = text.len(),
                    "trend summary generated"
                );
                self.state = TrendState::Populated(text);
                Ok(self.summary().unwrap_or_default())
            }
            Err(err) => {
                warn!(provider = client.name(), error = %err, "trend summary failed");
                Err(err)
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = TrendState::Cleared;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelscore_config::LlmConfig;
    use std::cell::{Cell, RefCell};

    struct MockClient {
        replies: RefCell<Vec<Result<String, TrendError>>>,
        calls: Cell<usize>,
        last_prompt: RefCell<String>,
    }

    impl MockClient {
        fn new(replies: Vec<Result<String, TrendError>>) -> Self {
            Self {
                replies: RefCell::new(replies),
                calls: Cell::new(0),
                last_prompt: RefCell::new(String::new()),
            }
        }
    }

    impl LlmClient for MockClient {
        fn generate(&self, prompt: &str, _max_tokens: u32) -> Result<String, TrendError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_prompt.borrow_mut() = prompt.to_string();
            self.replies.borrow_mut().remove(0)
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    fn request() -> TrendRequest {
        TrendRequest::new("1. Morning routine\n", &LlmConfig::default())
    }

    #[test]
    fn test_lifecycle() {
        let client = MockClient::new(vec![Ok("first".to_string()), Ok("second".to_string())]);
        let mut session = TrendSession::new();
        assert_eq!(session.state(), &TrendState::Absent);
        assert_eq!(session.summary(), None);

        assert_eq!(session.generate(&client, &request()).unwrap(), "first");
        assert_eq!(session.state(), &TrendState::Populated("first".to_string()));

        // cached
        assert_eq!(session.generate(&client, &request()).unwrap(), "first");
        assert_eq!(client.calls.get(), 1);

        assert_eq!(session.regenerate(&client, &request()).unwrap(), "second");
        assert_eq!(client.calls.get(), 2);

        session.reset();
        assert_eq!(session.state(), &TrendState::Cleared);
        assert_eq!(session.summary(), None);
    }

    #[test]
    fn test_failure_keeps_previous_summary() {
        let client = MockClient::new(vec![
            Ok("kept".to_string()),
            Err(TrendError::EmptyResponse { provider: "mock" }),
        ]);
        let mut session = TrendSession::new();
        session.generate(&client, &request()).unwrap();
        assert!(session.regenerate(&client, &request()).is_err());
        assert_eq!(session.summary(), Some("kept"));
    }

    #[test]
    fn test_generate_after_reset_calls_again() {
        let client = MockClient::new(vec![Ok("a".to_string()), Ok("b".to_string())]);
        let mut session = TrendSession::new();
        session.generate(&client, &request()).unwrap();
        session.reset();
        assert_eq!(session.generate(&client, &request()).unwrap(), "b");
    }

    #[test]
    fn test_prompt_passed_to_client() {
        let client = MockClient::new(vec![Ok("x".to_string())]);
        let mut session = TrendSession::new();
        let req = request().with_context(Some("fitness niche".to_string()));
        session.generate(&client, &req).unwrap();
        let prompt = client.last_prompt.borrow();
        assert!(prompt.contains("fitness niche"));
        assert!(prompt.contains("1. Morning routine"));
    }

    #[test]
    fn test_empty_descriptions_rejected() {
        let client = MockClient::new(vec![]);
        let mut session = TrendSession::new();
        let req = TrendRequest::new("", &LlmConfig::default());
        assert!(matches!(
            session.generate(&client, &req),
            Err(TrendError::NoDescriptions)
        ));
        assert_eq!(client.calls.get(), 0);
    }
}
