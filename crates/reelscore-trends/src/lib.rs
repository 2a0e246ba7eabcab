//! AI trend summaries over video descriptions.
//!
//! The summary is opaque model output. Nothing here feeds back into scoring.

pub mod error;
pub mod llm;
pub mod prompts;
pub mod session;

pub use error::TrendError;
pub use llm::{client_from_config, GeminiClient, LlmClient, OllamaClient, OpenAiClient};
pub use prompts::TrendRequest;
pub use session::{TrendSession, TrendState};
