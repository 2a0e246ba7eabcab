//! LLM configuration for trend summaries

use serde::{Deserialize, Serialize};

/// Backend that serves the trend summary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini `generateContent` API (GEMINI_API_KEY)
    Gemini,
    /// OpenAI-compatible chat completions (OPENAI_API_KEY)
    OpenAi,
    /// Local Ollama server
    Ollama,
}

impl Default for LlmProvider {
    fn default() -> Self {
        LlmProvider::Gemini
    }
}

impl LlmProvider {
    pub const NAMES: [&'static str; 3] = ["gemini", "openai", "ollama"];

    pub fn parse(value: &str) -> crate::error::Result<Self> {
        match value.to_lowercase().as_str() {
            "gemini" => Ok(LlmProvider::Gemini),
            "openai" => Ok(LlmProvider::OpenAi),
            "ollama" => Ok(LlmProvider::Ollama),
            _ => Err(crate::error::ConfigError::invalid_enum(
                "llm.provider",
                value,
                &Self::NAMES,
            )),
        }
    }
}

/// LLM (Large Language Model) configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,

    /// Model name
    ///
    /// Examples: "gemini-2.0-flash", "gpt-4o-mini", "llama3.1"
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens for LLM responses
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Optional API base URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Language the summary is written in
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_base: None,
            timeout_secs: default_timeout_secs(),
            language: default_language(),
        }
    }
}

impl crate::validation::Validate for LlmConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        if self.model.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "llm.model".to_string(),
                message: "Model name cannot be empty".to_string(),
            });
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError {
                field: "llm.max_tokens".to_string(),
                message: "max_tokens must be > 0".to_string(),
            });
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                field: "llm.timeout_secs".to_string(),
                message: "timeout_secs must be > 0".to_string(),
            });
        }

        if self.language.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "llm.language".to_string(),
                message: "Language cannot be empty".to_string(),
            });
        }

        if let Some(api_base) = &self.api_base {
            if api_base.is_empty() {
                return Err(ConfigError::ValidationError {
                    field: "llm.api_base".to_string(),
                    message: "API base URL cannot be empty string (use null to unset)".to_string(),
                });
            }

            if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
                return Err(ConfigError::ValidationError {
                    field: "llm.api_base".to_string(),
                    message: format!(
                        "API base must start with http:// or https://, got: {}",
                        api_base
                    ),
                });
            }
        }

        Ok(())
    }
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_language() -> String {
    "German".to_string()
}
