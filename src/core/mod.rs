// core logic - heuristics, provider adapters, and the classifier tying them together

mod classifier;
mod connection;
mod heuristics;
mod normalize;
mod page;
mod provider;

pub use classifier::{Classifier, Mode};
pub use connection::ConnectionReport;
pub use heuristics::Heuristics;
pub use normalize::normalize;
pub use page::{ClassificationResult, PageRequest, SUMMARY_LIMIT, intent, truncate};
pub use provider::{Anthropic, Endpoints, Gemini, OpenAI, Prompt, Provider, Providers};
