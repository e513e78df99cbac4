use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use orderdesk_core::config::{LlmConfig, LlmProvider, TokenBudgets};

/// Settings for a single generation call. Sampling stays disabled so the
/// classifier and resolver behave deterministically for a given prompt; only
/// the output token budget varies per call site.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationParams {
    /// Short budget: a single label.
    pub fn classification(budgets: TokenBudgets) -> Self {
        Self { max_tokens: budgets.classify, temperature: 0.0 }
    }

    /// Medium budget: a two-key JSON object, with room for stray commentary.
    pub fn extraction(budgets: TokenBudgets) -> Self {
        Self { max_tokens: budgets.extract, temperature: 0.0 }
    }

    /// Long budget: one free-text customer-facing message.
    pub fn answer(budgets: TokenBudgets) -> Self {
        Self { max_tokens: budgets.answer, temperature: 0.0 }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str, params: GenerationParams) -> Result<String>;
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("llm request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("llm api returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("llm api returned no completion choices")]
    EmptyCompletion,
}

/// OpenAI-compatible chat-completions client. Covers both hosted OpenAI and
/// local Ollama through the same wire format; the request carries an explicit
/// deadline so a stalled backend fails the request instead of hanging it.
pub struct HttpLlmClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
}

impl HttpLlmClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let base_url = config.base_url.clone().unwrap_or_else(|| {
            match config.provider {
                LlmProvider::OpenAi => "https://api.openai.com/v1",
                LlmProvider::Ollama => "http://localhost:11434/v1",
            }
            .to_string()
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, prompt: &str, params: GenerationParams) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
        });

        let url = format!("{}/chat/completions", self.base_url);
        debug!(
            event_name = "agent.llm.request",
            url = %url,
            max_tokens = params.max_tokens,
            "calling generation backend"
        );

        let mut request = self.client.post(&url).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response = request.send().await.map_err(LlmError::Http)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status: status.as_u16(), body }.into());
        }

        let completion: ChatCompletion = response.json().await.map_err(LlmError::Http)?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyCompletion)?;

        Ok(text)
    }
}
