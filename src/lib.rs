// pageintent library - summarize a page and guess why it was opened

pub mod cli;
mod core;
mod error;
mod output;
mod server;
pub mod settings;

pub use crate::core::{
    Anthropic, ClassificationResult, Classifier, ConnectionReport, Endpoints, Gemini, Heuristics,
    Mode, OpenAI, PageRequest, Prompt, Provider, Providers, SUMMARY_LIMIT, intent, normalize,
    truncate,
};
pub use error::{Error, ProviderError};
pub use server::Server;
pub use settings::{PrivacyConfig, ProviderConfig, Service, Settings, SettingsStore};
