// provider and privacy settings, plus the file they live in
//
// the core never holds on to these. whoever owns a SettingsStore loads a fresh
// snapshot and hands it to the classifier on every call.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    #[default]
    OpenAI,
    Anthropic,
    Gemini,
}

/// One entry in a service's model dropdown.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelOption {
    pub id: &'static str,
    pub label: &'static str,
}

const OPENAI_MODELS: &[ModelOption] = &[
    ModelOption { id: "gpt-4", label: "GPT-4 (More accurate, slower)" },
    ModelOption { id: "gpt-3.5-turbo", label: "GPT-3.5 Turbo (Faster, less accurate)" },
];

const ANTHROPIC_MODELS: &[ModelOption] = &[
    ModelOption { id: "claude-3-opus", label: "Claude 3 Opus (Most capable)" },
    ModelOption { id: "claude-3-sonnet", label: "Claude 3 Sonnet (Balanced)" },
    ModelOption { id: "claude-3-haiku", label: "Claude 3 Haiku (Fastest)" },
];

const GEMINI_MODELS: &[ModelOption] = &[
    ModelOption { id: "gemini-pro", label: "Gemini Pro" },
    ModelOption { id: "gemini-ultra", label: "Gemini Ultra" },
];

impl Service {
    pub const ALL: [Service; 3] = [Service::OpenAI, Service::Anthropic, Service::Gemini];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::OpenAI => "openai",
            Service::Anthropic => "anthropic",
            Service::Gemini => "gemini",
        }
    }

    pub fn models(&self) -> &'static [ModelOption] {
        match self {
            Service::OpenAI => OPENAI_MODELS,
            Service::Anthropic => ANTHROPIC_MODELS,
            Service::Gemini => GEMINI_MODELS,
        }
    }

    /// First catalogue entry, used when switching service without naming a model.
    pub fn default_model(&self) -> &'static str {
        self.models()[0].id
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Service::OpenAI),
            "anthropic" | "claude" => Ok(Service::Anthropic),
            "gemini" | "google" => Ok(Service::Gemini),
            _ => Err(Error::UnknownService(s.to_string())),
        }
    }
}

/// Which provider to call and with what credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    pub service: Service,
    pub api_key: String,
    pub model: String,
}

impl ProviderConfig {
    pub fn new(service: Service, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            service,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    // keep the last four characters so people can tell keys apart
    pub fn masked_key(&self) -> String {
        if !self.has_api_key() {
            return String::new();
        }
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{tail}", "*".repeat(chars.len() - 4))
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            service: Service::OpenAI,
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
        }
    }
}

// hand written so keys never end up in logs
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("service", &self.service)
            .field("api_key", &self.masked_key())
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacyConfig {
    /// Never send page content anywhere.
    pub offline_mode: bool,
    /// Stored for the settings page, the classifier ignores it.
    pub collect_stats: bool,
}

/// Everything the settings page persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub ai_settings: ProviderConfig,
    pub privacy_settings: PrivacyConfig,
}

impl Settings {
    /// Copy safe to hand back to a UI.
    pub fn masked(&self) -> Self {
        let mut copy = self.clone();
        copy.ai_settings.api_key = self.ai_settings.masked_key();
        copy
    }
}

/// Settings persisted as a json file.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/pageintent/settings.json`
    pub fn default_path() -> Result<PathBuf, Error> {
        let dir = dirs::config_dir().ok_or(Error::NoSettingsDir)?;
        Ok(dir.join("pageintent").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // a missing file just means nothing has been saved yet
    pub fn load(&self) -> Result<Settings, Error> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, raw)?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
