// "test connection" button - a tiny request to see if the key works
// unlike classify, failures are reported back instead of hidden

use super::classifier::Classifier;
use super::provider::Prompt;
use crate::error::ProviderError;
use crate::settings::ProviderConfig;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionReport {
    pub ok: bool,
    pub message: String,
}

impl ConnectionReport {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

impl Classifier {
    pub async fn test_connection(&self, config: &ProviderConfig) -> ConnectionReport {
        if !config.has_api_key() {
            return ConnectionReport::failed("Please enter an API key");
        }

        let provider = self.providers().get(config.service);
        match provider.post(self.client(), config, &Prompt::probe()).await {
            Ok(_) => ConnectionReport::ok("Connection successful! API key is valid."),
            Err(ProviderError::HttpStatus {
                status, message, ..
            }) => {
                tracing::info!(service = provider.name(), status, "connection test rejected");
                ConnectionReport::failed(format!(
                    "Connection failed: {}",
                    message.as_deref().unwrap_or("Unknown error")
                ))
            }
            Err(e) => ConnectionReport::failed(format!("Connection error: {e}")),
        }
    }
}
