// openai chat completions

use super::{Prompt, Provider, join, parse_error};
use crate::error::ProviderError;
use crate::settings::ProviderConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

pub struct OpenAI {
    base_url: String,
}

// what we send
#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

// what comes back
#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAI {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Provider for OpenAI {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn request(&self, client: &Client, config: &ProviderConfig, prompt: &Prompt) -> RequestBuilder {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = prompt.system {
            messages.push(Message {
                role: "system",
                content: system,
            });
        }
        messages.push(Message {
            role: "user",
            content: &prompt.user,
        });

        let request = Request {
            model: &config.model,
            messages,
            max_tokens: prompt.max_tokens,
        };

        client
            .post(join(&self.base_url, "/v1/chat/completions"))
            .bearer_auth(&config.api_key)
            .json(&request)
    }

    fn extract_text(&self, body: &[u8]) -> Result<String, ProviderError> {
        let response: Response =
            serde_json::from_slice(body).map_err(|e| parse_error(self.name(), e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| parse_error(self.name(), "no message content in choices"))
    }
}
