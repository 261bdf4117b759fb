// gemini generateContent. no roles, key goes in the query string

use super::{Prompt, Provider, join, parse_error};
use crate::error::ProviderError;
use crate::settings::ProviderConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

pub struct Gemini {
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Request<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl Gemini {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Provider for Gemini {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    // gemini has no system role, the instruction lives in the prompt template
    fn request(&self, client: &Client, config: &ProviderConfig, prompt: &Prompt) -> RequestBuilder {
        let request = Request {
            contents: vec![Content {
                parts: vec![Part { text: &prompt.user }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: prompt.max_tokens,
            },
        };

        let path = format!("/v1beta/models/{}:generateContent", config.model);

        client
            .post(join(&self.base_url, &path))
            .query(&[("key", config.api_key.as_str())])
            .json(&request)
    }

    fn extract_text(&self, body: &[u8]) -> Result<String, ProviderError> {
        let response: Response =
            serde_json::from_slice(body).map_err(|e| parse_error(self.name(), e.to_string()))?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| parse_error(self.name(), "no text in candidates"))
    }
}
