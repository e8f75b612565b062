//! Groq chat-completion client (`/openai/v1/chat/completions`).
//!
//! Wire types are private to this module; callers only see
//! `complete(system, prompt) -> String`. One round-trip per call, no retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::errors::AppError;

const TEMPERATURE: f32 = 0.5;

/// Seam for the analysis use case; mocked in tests.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, AppError>;
    fn model(&self) -> &str;
}

#[derive(Clone)]
pub struct GroqClient {
    http: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl GroqClient {
    pub fn new(api_url: String, api_key: Option<String>, model: String) -> Self {
        GroqClient {
            http: Client::new(),
            api_url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ChatClient for GroqClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::Upstream("GROQ_API_KEY is not configured".to_string())
        })?;

        let payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message { role: "system", content: system.to_string() },
                Message { role: "user", content: prompt.to_string() },
            ],
            temperature: TEMPERATURE,
        };

        debug!(model = %payload.model, prompt_len = prompt.len(), "sending chat completion request");

        let response = self.http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "chat completion request failed");
                AppError::Upstream(format!("AI request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "chat completion returned HTTP error");
            return Err(AppError::Upstream(format!("AI request failed: HTTP {status}: {body}")));
        }

        let parsed = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| AppError::Upstream(format!("invalid AI response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::Upstream("AI response contained no content".to_string()))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
