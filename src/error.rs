use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("Settings error: {0}")]
    Settings(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown service '{0}'. Use one of: openai, anthropic, gemini")]
    UnknownService(String),

    #[error("No settings directory available")]
    #[diagnostic(help("pass --settings or set PAGEINTENT_SETTINGS"))]
    NoSettingsDir,

    #[error("Server error: {0}")]
    Server(String),
}

// anything that can go wrong talking to a provider.
// never leaves Classifier::classify, the connection check turns it into a status line
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{service} API error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    HttpStatus {
        service: &'static str,
        status: u16,
        message: Option<String>,
    },

    #[error("unexpected {service} response: {reason}")]
    Parse {
        service: &'static str,
        reason: String,
    },
}
