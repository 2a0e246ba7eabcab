use crate::error::TrendError;
use reelscore_config::{LlmConfig, LlmProvider};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use tracing::debug;

pub trait LlmClient {
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, TrendError>;

    /// Short backend name for messages.
    fn name(&self) -> &'static str;
}

fn http_client(provider: &'static str, timeout_secs: u64) -> Result<Client, TrendError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|source| TrendError::Http { provider, source })
}

fn api_key(provider: &'static str, var: &'static str) -> Result<String, TrendError> {
    match env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(TrendError::MissingApiKey { provider, var }),
    }
}

fn check_status(provider: &'static str, resp: Response) -> Result<Response, TrendError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().unwrap_or_default();
    Err(TrendError::Api {
        provider,
        status,
        body,
    })
}

fn non_empty(provider: &'static str, content: String) -> Result<String, TrendError> {
    if content.trim().is_empty() {
        Err(TrendError::EmptyResponse { provider })
    } else {
        Ok(content)
    }
}

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    const NAME: &'static str = "Gemini";

    pub fn new(
        model: String,
        api_key: String,
        base_url: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, TrendError> {
        Ok(Self {
            api_key,
            model,
            base_url: base_url
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string()),
            client: http_client(Self::NAME, timeout_secs)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResp {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

impl LlmClient for GeminiClient {
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, TrendError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let body = serde_json::json!({
            "contents": [
                { "role": "user", "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": { "maxOutputTokens": max_tokens },
        });
        debug!(model = %self.model, "requesting Gemini trend summary");
        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|source| TrendError::Http {
                provider: Self::NAME,
                source,
            })?;
        let parsed: GeminiResp = check_status(Self::NAME, resp)?
            .json()
            .map_err(|source| TrendError::Http {
                provider: Self::NAME,
                source,
            })?;
        let content = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        non_empty(Self::NAME, content)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

pub struct OpenAiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl OpenAiClient {
    const NAME: &'static str = "OpenAI";

    pub fn new(
        model: String,
        api_key: String,
        base_url: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, TrendError> {
        Ok(Self {
            api_key,
            model,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            client: http_client(Self::NAME, timeout_secs)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatRespChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResp {
    choices: Vec<ChatRespChoice>,
}

impl LlmClient for OpenAiClient {
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, TrendError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "max_tokens": max_tokens,
        });
        debug!(model = %self.model, "requesting OpenAI trend summary");
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|source| TrendError::Http {
                provider: Self::NAME,
                source,
            })?;
        let parsed: ChatResp = check_status(Self::NAME, resp)?
            .json()
            .map_err(|source| TrendError::Http {
                provider: Self::NAME,
                source,
            })?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        non_empty(Self::NAME, content)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

pub struct OllamaClient {
    model: String,
    base_url: String,
    client: Client,
}

impl OllamaClient {
    const NAME: &'static str = "Ollama";

    pub fn new(
        model: String,
        base_url: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, TrendError> {
        Ok(Self {
            model,
            base_url: base_url.unwrap_or_else(|| "http://localhost:11434".to_string()),
            client: http_client(Self::NAME, timeout_secs)?,
        })
    }
}

impl LlmClient for OllamaClient {
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, TrendError> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "stream": false,
            "options": { "num_predict": max_tokens }
        });
        debug!(model = %self.model, "requesting Ollama trend summary");
        let resp = self
            .client
            .post(url)
            .json(&body)
            .send()
            .map_err(|source| TrendError::Http {
                provider: Self::NAME,
                source,
            })?;
        let json: serde_json::Value = check_status(Self::NAME, resp)?
            .json()
            .map_err(|source| TrendError::Http {
                provider: Self::NAME,
                source,
            })?;
        let content = json["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();
        non_empty(Self::NAME, content)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Build the client selected by `llm.provider`. API keys come from the
/// environment only.
pub fn client_from_config(config: &LlmConfig) -> Result<Box<dyn LlmClient>, TrendError> {
    let model = config.model.clone();
    let base = config.api_base.clone();
    let timeout = config.timeout_secs;

    Ok(match config.provider {
        LlmProvider::Gemini => {
            let key = api_key(GeminiClient::NAME, "GEMINI_API_KEY")?;
            Box::new(GeminiClient::new(model, key, base, timeout)?)
        }
        LlmProvider::OpenAi => {
            let key = api_key(OpenAiClient::NAME, "OPENAI_API_KEY")?;
            Box::new(OpenAiClient::new(model, key, base, timeout)?)
        }
        LlmProvider::Ollama => Box::new(OllamaClient::new(model, base, timeout)?),
    })
}
