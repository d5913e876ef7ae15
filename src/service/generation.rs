//! Relay to an OpenAI-compatible chat completions endpoint.

use crate::config::GenerationConfig;
use crate::error::{ConfigError, GenerationError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// Turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiGenerator {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(client: reqwest::Client, config: &GenerationConfig) -> Result<Self, ConfigError> {
        let mut endpoint = config.base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| ConfigError::Invalid {
                key: "OPENAI_BASE_URL",
                reason: "cannot be used as a base URL".into(),
            })?
            .pop_if_empty()
            .extend(["chat", "completions"]);
        Ok(OpenAiGenerator {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// System instruction followed by the user's prompt, for the configured model.
    pub fn build_request(&self, api_key: &str, prompt: &str) -> Result<reqwest::Request, reqwest::Error> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };
        self.client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&body)
            .build()
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;
        let req = self.build_request(api_key, prompt)?;
        let resp = self.client.execute(req).await?;
        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(text) => text,
                Err(e) => format!("<failed to read body: {e}>"),
            };
            tracing::debug!(%status, body = %body, "text-generation upstream error");
            return Err(GenerationError::Upstream { status, body });
        }
        let parsed: ChatCompletionResponse = resp.json().await?;
        first_choice_text(parsed)
    }
}

fn first_choice_text(resp: ChatCompletionResponse) -> Result<String, GenerationError> {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(GenerationError::EmptyResponse)
}
