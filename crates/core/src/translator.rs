//! Remote translation service
//!
//! [`TranslationService`] is the seam between the round trip and the model
//! behind it. [`OpenRouterClient`] talks to an OpenAI-compatible
//! chat-completions endpoint (OpenRouter by default).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::error::{Result, TransbackError};
use crate::prompts::PromptSet;

pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "qwen/qwen3-235b-a22b-2507";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// A model that can translate and compare meanings
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translate `text` from `source` to `target` (language codes)
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;

    /// Describe how `back_translated` differs in meaning from `original`
    async fn compare_meanings(
        &self,
        original: &str,
        back_translated: &str,
        language: &str,
    ) -> Result<String>;
}

/// Settings for [`OpenRouterClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,

    /// Sent as `HTTP-Referer`
    pub app_url: Option<String>,

    /// Sent as `X-Title`
    pub app_title: Option<String>,

    pub timeout: Duration,
    pub prompts: PromptSet,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            app_url: None,
            app_title: None,
            timeout: DEFAULT_TIMEOUT,
            prompts: PromptSet::default(),
        }
    }

    /// Read `OPENROUTER_API_KEY`, and optionally `OPENROUTER_MODEL` and
    /// `OPENROUTER_API_URL`, from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`TransbackError::MissingApiKey`] when the key is unset or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(TransbackError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("OPENROUTER_MODEL") {
            config.model = model;
        }
        if let Ok(url) = std::env::var("OPENROUTER_API_URL") {
            config.api_url = url;
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_app_url(mut self, url: Option<String>) -> Self {
        self.app_url = url;
        self
    }

    pub fn with_app_title(mut self, title: Option<String>) -> Self {
        self.app_title = title;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_prompts(mut self, prompts: PromptSet) -> Self {
        self.prompts = prompts;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Extract the first choice's content from a chat-completions response body.
///
/// # Errors
///
/// Fails on malformed JSON or when the response has no choices.
pub fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(TransbackError::EmptyResponse)
}

/// Chat-completions client for OpenRouter
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl OpenRouterClient {
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built (TLS backend initialisation).
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn complete(&self, system: String, user: String) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        };

        let mut builder = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request);
        if let Some(url) = &self.config.app_url {
            builder = builder.header("HTTP-Referer", url);
        }
        if let Some(title) = &self.config.app_title {
            builder = builder.header("X-Title", title);
        }

        debug!(url = %self.config.api_url, model = %self.config.model, "sending chat completion request");
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TransbackError::Api {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }
}

#[async_trait]
impl TranslationService for OpenRouterClient {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        info!(source, target, model = %self.config.model, chars = text.chars().count(), "translating");
        let started = Instant::now();

        let system = self.config.prompts.translate_system(source, target);
        let result = self.complete(system, text.to_string()).await?;

        info!(
            chars = result.chars().count(),
            duration_ms = started.elapsed().as_millis() as u64,
            "translation completed"
        );
        Ok(result)
    }

    async fn compare_meanings(
        &self,
        original: &str,
        back_translated: &str,
        language: &str,
    ) -> Result<String> {
        info!(language, model = %self.config.model, "comparing meanings");
        debug!(
            original_chars = original.chars().count(),
            back_translated_chars = back_translated.chars().count(),
            "comparison input"
        );
        let started = Instant::now();

        let system = self.config.prompts.compare_system(language);
        let user = self.config.prompts.compare_user(original, back_translated);
        let result = self.complete(system, user).await?;

        info!(
            duration_ms = started.elapsed().as_millis() as u64,
            "meaning comparison completed"
        );
        Ok(result)
    }
}
