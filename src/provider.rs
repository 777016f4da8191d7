//! Model Provider Abstraction
//!
//! Chat-completion clients for the text-generation backends the planner can talk to
//! (OpenAI, Anthropic, Ollama, and any OpenAI-compatible local server). The
//! generation adapters build on the `ModelProviderClient` trait only.

use crate::error::PlannerError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Backend family
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    OpenAI,
    Anthropic,
    Ollama,
    Local,
}

/// Provider configuration as read from the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    #[serde(default)]
    pub provider_type: ProviderType,

    #[serde(default = "default_model")]
    pub model: String,

    /// Inline API key. Prefer `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Name of the environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Base URL override (required for `local`).
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default)]
    pub max_tokens: Option<u32>,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.9
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: ProviderType::default(),
            model: default_model(),
            api_key: None,
            api_key_env: None,
            endpoint: None,
            temperature: default_temperature(),
            max_tokens: None,
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if self.provider_type == ProviderType::Local && self.endpoint.is_none() {
            return Err("Local providers require an endpoint".to_string());
        }
        Ok(())
    }

    /// Inline key first, then the named environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return Some(key.clone());
        }
        self.api_key_env
            .as_ref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Completion options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Ask the backend for a JSON object response where supported.
    pub json_output: bool,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: Some(default_temperature()),
            max_tokens: None,
            json_output: true,
        }
    }
}

/// Completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub finish_reason: Option<String>,
}

/// Model provider client trait
#[async_trait]
pub trait ModelProviderClient: Send + Sync {
    /// Generate a completion from a list of messages
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, PlannerError>;

    fn provider_name(&self) -> &str;

    fn model_name(&self) -> &str;
}

fn map_status(status: StatusCode, body: String) -> PlannerError {
    match status.as_u16() {
        401 | 403 => PlannerError::ProviderAuthFailed(format!("Authentication failed: {}", body)),
        404 => PlannerError::ProviderModelNotFound(format!("Model not found: {}", body)),
        429 => PlannerError::ProviderRateLimit(format!("Rate limit exceeded: {}", body)),
        503 | 529 => PlannerError::Overloaded(format!("[{}] {}", status, body)),
        _ => PlannerError::ProviderRequestFailed(format!(
            "Request failed with status {}: {}",
            status, body
        )),
    }
}

fn map_http_error(error: reqwest::Error) -> PlannerError {
    if let Some(status) = error.status() {
        map_status(status, error.to_string())
    } else if error.is_timeout() {
        PlannerError::ProviderRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        PlannerError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        PlannerError::ProviderError(format!("HTTP error: {}", error))
    }
}

async fn read_failure(response: reqwest::Response) -> PlannerError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    map_status(status, body)
}

const PROVIDER_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const PROVIDER_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn build_provider_http_client() -> Result<Client, PlannerError> {
    Client::builder()
        .connect_timeout(PROVIDER_HTTP_CONNECT_TIMEOUT)
        .timeout(PROVIDER_HTTP_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| PlannerError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for the OpenAI chat-completions wire format.
///
/// Ollama and most local servers expose the same API under `/v1`.
pub struct OpenAICompatibleClient {
    client: Client,
    provider_name: &'static str,
    model: String,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAICompatibleClient {
    pub fn new(
        provider_name: &'static str,
        model: String,
        api_key: Option<String>,
        base_url: String,
    ) -> Result<Self, PlannerError> {
        Ok(Self {
            client: build_provider_http_client()?,
            provider_name,
            model,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ModelProviderClient for OpenAICompatibleClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, PlannerError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: &messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: options
                .json_output
                .then(|| json!({ "type": "json_object" })),
        };

        let url = format!("{}/chat/completions", self.base_url);
        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send().await.map_err(map_http_error)?;

        if !response.status().is_success() {
            return Err(read_failure(response).await);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| PlannerError::ProviderError(format!("Failed to parse response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| PlannerError::ProviderError("No choices in response".to_string()))?;

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            model: completion.model,
            finish_reason: choice.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        self.provider_name
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Anthropic messages API client
pub struct AnthropicClient {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(model: String, api_key: String, base_url: Option<String>) -> Result<Self, PlannerError> {
        Ok(Self {
            client: build_provider_http_client()?,
            model,
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api.anthropic.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

#[async_trait]
impl ModelProviderClient for AnthropicClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, PlannerError> {
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .collect();
        let turns: Vec<serde_json::Value> = messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|m| json!({ "role": m.role, "content": m.content }))
            .collect();

        let mut body = json!({
            "model": self.model,
            "max_tokens": options.max_tokens.unwrap_or(1024),
            "messages": turns,
        });
        if !system.is_empty() {
            body["system"] = json!(system.join("\n\n"));
        }
        if let Some(temperature) = options.temperature {
            // Anthropic caps temperature at 1.0.
            body["temperature"] = json!(temperature.min(1.0));
        }

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            return Err(read_failure(response).await);
        }

        #[derive(Deserialize)]
        struct AnthropicResponse {
            content: Vec<AnthropicContent>,
            model: String,
            stop_reason: Option<String>,
        }

        #[derive(Deserialize)]
        struct AnthropicContent {
            #[serde(default)]
            text: String,
        }

        let completion: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| PlannerError::ProviderError(format!("Failed to parse response: {}", e)))?;

        Ok(CompletionResponse {
            content: completion
                .content
                .into_iter()
                .map(|c| c.text)
                .collect::<Vec<_>>()
                .join(""),
            model: completion.model,
            finish_reason: completion.stop_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Builds provider clients from configuration.
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_client(
        config: &ProviderConfig,
    ) -> Result<Arc<dyn ModelProviderClient>, PlannerError> {
        config
            .validate()
            .map_err(PlannerError::ProviderNotConfigured)?;
        let api_key = config.resolve_api_key();
        let model = config.model.clone();

        let client: Arc<dyn ModelProviderClient> = match config.provider_type {
            ProviderType::OpenAI => {
                let key = api_key.ok_or_else(|| {
                    PlannerError::ProviderNotConfigured(
                        "OpenAI requires an API key (set api_key or api_key_env)".to_string(),
                    )
                })?;
                Arc::new(OpenAICompatibleClient::new(
                    "openai",
                    model,
                    Some(key),
                    config
                        .endpoint
                        .clone()
                        .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
                )?)
            }
            ProviderType::Anthropic => {
                let key = api_key.ok_or_else(|| {
                    PlannerError::ProviderNotConfigured(
                        "Anthropic requires an API key (set api_key or api_key_env)".to_string(),
                    )
                })?;
                Arc::new(AnthropicClient::new(model, key, config.endpoint.clone())?)
            }
            ProviderType::Ollama => Arc::new(OpenAICompatibleClient::new(
                "ollama",
                model,
                api_key,
                config
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| "http://localhost:11434/v1".to_string()),
            )?),
            ProviderType::Local => {
                let endpoint = config.endpoint.clone().ok_or_else(|| {
                    PlannerError::ProviderNotConfigured(
                        "Local providers require an endpoint".to_string(),
                    )
                })?;
                let endpoint = if endpoint.contains("://") {
                    endpoint
                } else {
                    format!("http://{}", endpoint)
                };
                Arc::new(OpenAICompatibleClient::new("local", model, api_key, endpoint)?)
            }
        };
        Ok(client)
    }

    /// Completion options derived from the provider's tuning fields.
    pub fn completion_options(config: &ProviderConfig) -> CompletionOptions {
        CompletionOptions {
            temperature: Some(config.temperature),
            max_tokens: config.max_tokens,
            json_output: true,
        }
    }
}

// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    responses: parking_lot::Mutex<std::collections::VecDeque<Result<String, PlannerError>>>,
    pub(crate) received: parking_lot::Mutex<Vec<Vec<ChatMessage>>>,
}

#[cfg(test)]
impl MockProvider {
    pub fn new(responses: Vec<Result<String, PlannerError>>) -> Self {
        Self {
            responses: parking_lot::Mutex::new(responses.into()),
            received: parking_lot::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ModelProviderClient for MockProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        _options: CompletionOptions,
    ) -> Result<CompletionResponse, PlannerError> {
        self.received.lock().push(messages);
        let content = self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok("{}".to_string()))?;
        Ok(CompletionResponse {
            content,
            model: "mock-model".to_string(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
