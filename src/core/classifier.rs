// the dispatcher - pick a mode, call a provider, never fail

use super::heuristics::Heuristics;
use super::page::{ClassificationResult, PageRequest};
use super::provider::{Endpoints, Providers};
use crate::settings::{PrivacyConfig, ProviderConfig, Service, Settings};
use reqwest::Client;
use tracing::{debug, info, warn};

/// How a page gets classified. Decided before any network io.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keyword guesses only, content stays on the device.
    Offline,
    /// No api key, fall back to a different set of keyword guesses.
    NoKey,
    Live(Service),
}

impl Mode {
    pub fn select(privacy: &PrivacyConfig, provider: &ProviderConfig) -> Self {
        if privacy.offline_mode {
            Mode::Offline
        } else if !provider.has_api_key() {
            Mode::NoKey
        } else {
            Mode::Live(provider.service)
        }
    }
}

/// Classifies pages with whichever provider the settings ask for.
///
/// Holds no settings of its own. Callers pass the current snapshot on every
/// call so edits made between calls are always picked up.
pub struct Classifier {
    client: Client,
    providers: Providers,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self::with_endpoints(Endpoints::default())
    }

    pub fn with_endpoints(endpoints: Endpoints) -> Self {
        Self::with_client(Client::new(), endpoints)
    }

    /// Timeouts and proxies come from the client, the classifier adds none.
    pub fn with_client(client: Client, endpoints: Endpoints) -> Self {
        Self {
            client,
            providers: Providers::new(endpoints),
        }
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn providers(&self) -> &Providers {
        &self.providers
    }

    /// Summarize a page and guess why it was opened.
    ///
    /// Always returns something usable. Provider failures are logged and
    /// replaced with a generic "Page about ..." result.
    pub async fn classify(&self, page: &PageRequest, settings: &Settings) -> ClassificationResult {
        let provider_config = &settings.ai_settings;

        match Mode::select(&settings.privacy_settings, provider_config) {
            Mode::Offline => {
                debug!("offline mode, using basic categorization");
                Heuristics::offline(&page.url, &page.title)
            }
            Mode::NoKey => {
                info!("no api key set, using basic categorization");
                Heuristics::no_key(&page.url, &page.title)
            }
            Mode::Live(service) => {
                let provider = self.providers.get(service);
                match provider.call(&self.client, provider_config, page).await {
                    Ok(result) => result,
                    Err(e) => {
                        warn!(service = provider.name(), error = %e, "classification failed, using fallback");
                        ClassificationResult::generic(&page.title)
                    }
                }
            }
        }
    }
}
