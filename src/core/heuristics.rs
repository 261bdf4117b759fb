// keyword guesses used when we can't or shouldn't ask a model
// first matching rule wins, so order matters

use super::page::{ClassificationResult, intent};

struct Rule {
    keywords: &'static [&'static str],
    summary: &'static str,
    intent: &'static str,
}

// offline mode. nothing leaves the machine
const OFFLINE: &[Rule] = &[
    Rule {
        keywords: &["python"],
        summary: "Python-related page",
        intent: intent::PROGRAMMING,
    },
    Rule {
        keywords: &["hotel", "flight"],
        summary: "Travel booking page",
        intent: intent::TRAVEL,
    },
];

// online but no api key configured. deliberately a different table
const NO_KEY: &[Rule] = &[
    Rule {
        keywords: &["github"],
        summary: "Code repository or documentation",
        intent: intent::PROGRAMMING,
    },
    Rule {
        keywords: &["youtube"],
        summary: "Video content",
        intent: intent::ENTERTAINMENT,
    },
];

pub struct Heuristics;

impl Heuristics {
    pub fn offline(url: &str, title: &str) -> ClassificationResult {
        apply(OFFLINE, url, title)
    }

    pub fn no_key(url: &str, title: &str) -> ClassificationResult {
        apply(NO_KEY, url, title)
    }
}

fn apply(rules: &[Rule], url: &str, title: &str) -> ClassificationResult {
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| url.contains(k)))
        .map(|rule| ClassificationResult::new(rule.summary, rule.intent))
        .unwrap_or_else(|| ClassificationResult::generic(title))
}
