// the page we're asked about and what we say about it

use serde::{Deserialize, Serialize};

/// Longest summary we hand back, in characters.
pub const SUMMARY_LIMIT: usize = 100;

// how much of the title goes into "Page about ..."
const TITLE_PREVIEW: usize = 30;

/// Intent labels the heuristics produce. Providers may answer with others.
pub mod intent {
    pub const PROGRAMMING: &str = "Programming";
    pub const TRAVEL: &str = "Travel";
    pub const ENTERTAINMENT: &str = "Entertainment";
    pub const RESEARCH: &str = "Research";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub content: String,
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl PageRequest {
    pub fn new(
        content: impl Into<String>,
        url: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            url: url.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub summary: String,
    pub intent: String,
}

impl ClassificationResult {
    pub fn new(summary: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            intent: intent.into(),
        }
    }

    /// "Page about <first 30 chars of title>..." / Research.
    /// Last resort whenever nothing better is available.
    pub fn generic(title: &str) -> Self {
        Self::new(
            format!("Page about {}...", truncate(title, TITLE_PREVIEW)),
            intent::RESEARCH,
        )
    }
}

/// First `limit` characters of `s`. Counts chars, not bytes.
pub fn truncate(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}
