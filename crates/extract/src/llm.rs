use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ExtractError;

/// One call to the natural-language backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// `json_text = infer(prompt)`. The returned text carries no format guarantee.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, request: &InferenceRequest) -> Result<String>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Ollama,
    OpenAi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Ollama,
            base_url: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
            api_key: None,
            temperature: 0.1,
            max_tokens: 2000,
            timeout_secs: 120,
        }
    }
}

impl LlmSettings {
    pub fn build_backend(&self) -> Result<Arc<dyn InferenceBackend>, ExtractError> {
        let timeout = Duration::from_secs(self.timeout_secs);
        match self.provider {
            LlmProvider::Ollama => Ok(Arc::new(
                OllamaClient::new(self.base_url.clone(), self.model.clone()).with_timeout(timeout),
            )),
            LlmProvider::OpenAi => {
                let api_key = self
                    .api_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| ExtractError::Config("openai provider requires an api key".to_string()))?;
                Ok(Arc::new(
                    OpenAiClient::new(self.base_url.clone(), self.model.clone(), api_key)
                        .with_timeout(timeout),
                ))
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

fn chat_messages(request: &InferenceRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: request.system.clone(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: request.user.clone(),
        },
    ]
}

fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            base_url,
            model,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(
            "http://localhost:11434".to_string(),
            "llama3".to_string(),
        )
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &InferenceRequest) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));

        let body = OllamaChatRequest {
            model: self.model.clone(),
            messages: chat_messages(request),
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        let response = self.client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Ollama")?;

        if !response.status().is_success() {
            anyhow::bail!("Ollama request failed: {}", response.status());
        }

        let chat: OllamaChatResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        Ok(chat.message.content)
    }
}

/// Client for OpenAI-compatible chat completion endpoints.
#[derive(Clone)]
pub struct OpenAiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct OpenAiChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self {
            base_url,
            model,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }
}

#[async_trait]
impl InferenceBackend for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &InferenceRequest) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));

        let body = OpenAiChatRequest {
            model: self.model.clone(),
            messages: chat_messages(request),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to OpenAI")?;

        if !response.status().is_success() {
            anyhow::bail!("OpenAI request failed: {}", response.status());
        }

        let completion: OpenAiChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("OpenAI response contained no message content")
    }
}
