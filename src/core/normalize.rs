// turn whatever text the model produced into a ClassificationResult
//
// models are told to answer with json but often wrap it in prose or skip it
// entirely, so there are two tiers: a json object, or plain text as the summary

use super::page::{ClassificationResult, SUMMARY_LIMIT, intent, truncate};
use serde_json::Value;

pub fn normalize(text: &str, title: &str) -> ClassificationResult {
    let text = text.trim();

    if text.starts_with('{') {
        return match parse_structured(text) {
            Ok(result) => result,
            Err(reason) => {
                tracing::warn!(%reason, "could not parse model json, using title");
                from_title(title)
            }
        };
    }

    if text.is_empty() {
        return from_title(title);
    }

    ClassificationResult::new(truncate(text, SUMMARY_LIMIT), intent::RESEARCH)
}

fn parse_structured(text: &str) -> Result<ClassificationResult, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    let object = value.as_object().ok_or("not a json object")?;

    let summary = non_blank(object.get("summary")).ok_or("missing summary")?;
    let intent = non_blank(object.get("intent")).unwrap_or(intent::RESEARCH);

    Ok(ClassificationResult::new(
        truncate(summary, SUMMARY_LIMIT),
        intent,
    ))
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

// summary must never be empty, so an empty title degrades further
fn from_title(title: &str) -> ClassificationResult {
    if title.trim().is_empty() {
        return ClassificationResult::generic(title);
    }
    ClassificationResult::new(truncate(title, SUMMARY_LIMIT), intent::RESEARCH)
}
