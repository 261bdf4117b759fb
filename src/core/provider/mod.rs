// llm providers - one adapter per wire format, all behind the same trait

mod anthropic;
mod gemini;
mod openai;

pub use anthropic::Anthropic;
pub use gemini::Gemini;
pub use openai::OpenAI;

use super::normalize::normalize;
use super::page::{ClassificationResult, PageRequest};
use crate::error::ProviderError;
use crate::settings::{ProviderConfig, Service};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

/// Token ceiling for classification. The answer is one short json object.
pub const CLASSIFY_MAX_TOKENS: u32 = 150;

/// Token ceiling for the connection check.
pub const PROBE_MAX_TOKENS: u32 = 5;

const SYSTEM_INSTRUCTION: &str = "You are an AI that summarizes web pages and determines user intent. Respond in JSON format only.";

const PROBE_TEXT: &str = "Test connection. Please respond with \"Connected\".";

/// What gets sent to a provider, independent of its wire format.
pub struct Prompt {
    pub system: Option<&'static str>,
    pub user: String,
    pub max_tokens: u32,
}

impl Prompt {
    pub fn classify(page: &PageRequest) -> Self {
        Self {
            system: Some(SYSTEM_INSTRUCTION),
            user: format!(
                "URL: {}\nTitle: {}\nContent: {}\nProvide a brief summary (max 100 chars) and guess the user's intent for opening this page in JSON format with 'summary' and 'intent' fields.",
                page.url, page.title, page.content
            ),
            max_tokens: CLASSIFY_MAX_TOKENS,
        }
    }

    pub fn probe() -> Self {
        Self {
            system: None,
            user: PROBE_TEXT.to_string(),
            max_tokens: PROBE_MAX_TOKENS,
        }
    }
}

#[async_trait]
pub trait Provider: Send + Sync {
    /// Service name for logs and errors.
    fn name(&self) -> &'static str;

    /// Build the http request for this provider's api, auth included.
    fn request(&self, client: &Client, config: &ProviderConfig, prompt: &Prompt) -> RequestBuilder;

    /// Pull the generated text out of a successful response body.
    fn extract_text(&self, body: &[u8]) -> Result<String, ProviderError>;

    /// Send the prompt and return the raw body of a 2xx response.
    async fn post(
        &self,
        client: &Client,
        config: &ProviderConfig,
        prompt: &Prompt,
    ) -> Result<Vec<u8>, ProviderError> {
        // gemini carries the key in the query string, keep it out of error messages
        let response = self
            .request(client, config, prompt)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.without_url()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Network(e.without_url()))?;

        if !status.is_success() {
            return Err(ProviderError::HttpStatus {
                service: self.name(),
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        Ok(body.to_vec())
    }

    async fn call(
        &self,
        client: &Client,
        config: &ProviderConfig,
        page: &PageRequest,
    ) -> Result<ClassificationResult, ProviderError> {
        let body = self.post(client, config, &Prompt::classify(page)).await?;
        let text = self.extract_text(&body)?;
        tracing::debug!(service = self.name(), chars = text.len(), "provider answered");
        Ok(normalize(&text, &page.title))
    }
}

// every provider reports failures as {"error": {"message": "..."}}
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
}

pub(crate) fn api_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .filter(|m| !m.is_empty())
}

pub(crate) fn parse_error(service: &'static str, reason: impl Into<String>) -> ProviderError {
    ProviderError::Parse {
        service,
        reason: reason.into(),
    }
}

/// Base urls for each provider. Defaults are the public apis.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub openai: String,
    pub anthropic: String,
    pub gemini: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            openai: "https://api.openai.com".to_string(),
            anthropic: "https://api.anthropic.com".to_string(),
            gemini: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Send every provider to the same host, e.g. a proxy or a mock server.
    pub fn all(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            openai: base_url.clone(),
            anthropic: base_url.clone(),
            gemini: base_url,
        }
    }
}

/// One adapter per service, looked up by the configured service.
pub struct Providers {
    openai: OpenAI,
    anthropic: Anthropic,
    gemini: Gemini,
}

impl Providers {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            openai: OpenAI::new(endpoints.openai),
            anthropic: Anthropic::new(endpoints.anthropic),
            gemini: Gemini::new(endpoints.gemini),
        }
    }

    pub fn get(&self, service: Service) -> &dyn Provider {
        match service {
            Service::OpenAI => &self.openai,
            Service::Anthropic => &self.anthropic,
            Service::Gemini => &self.gemini,
        }
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}
