// anthropic messages api

use super::{Prompt, Provider, join, parse_error};
use crate::error::ProviderError;
use crate::settings::ProviderConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "2023-06-01";

pub struct Anthropic {
    base_url: String,
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct Response {
    content: Vec<Content>,
}

#[derive(Deserialize)]
struct Content {
    text: Option<String>,
}

impl Anthropic {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Provider for Anthropic {
    fn name(&self) -> &'static str {
        "Anthropic"
    }

    fn request(&self, client: &Client, config: &ProviderConfig, prompt: &Prompt) -> RequestBuilder {
        let request = Request {
            model: &config.model,
            system: prompt.system,
            messages: vec![Message {
                role: "user",
                content: &prompt.user,
            }],
            max_tokens: prompt.max_tokens,
        };

        client
            .post(join(&self.base_url, "/v1/messages"))
            .header("x-api-key", &config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
    }

    fn extract_text(&self, body: &[u8]) -> Result<String, ProviderError> {
        let response: Response =
            serde_json::from_slice(body).map_err(|e| parse_error(self.name(), e.to_string()))?;

        response
            .content
            .into_iter()
            .next()
            .and_then(|c| c.text)
            .ok_or_else(|| parse_error(self.name(), "no text in content"))
    }
}
