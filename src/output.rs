// output formatting - short text for humans or raw json

use crate::core::{ClassificationResult, ConnectionReport};
use crate::settings::{Service, Settings};

pub struct Output;

impl Output {
    pub fn pretty(result: &ClassificationResult) {
        println!("intent:  {}", result.intent);
        println!("summary: {}", result.summary);
    }

    // raw json for scripts
    pub fn raw(result: &ClassificationResult) {
        println!("{}", serde_json::to_string(result).unwrap_or_default());
    }

    pub fn connection(report: &ConnectionReport) {
        let mark = if report.ok { "ok" } else { "failed" };
        println!("[{mark}] {}", report.message);
    }

    pub fn models(services: &[Service]) {
        for service in services {
            println!("{service}:");
            let width = service.models().iter().map(|m| m.id.len()).max().unwrap_or(0);
            for model in service.models() {
                println!("  {:width$}  {}", model.id, model.label, width = width);
            }
        }
    }

    pub fn settings(settings: &Settings) {
        let masked = settings.masked();
        println!("service:       {}", masked.ai_settings.service);
        println!("model:         {}", masked.ai_settings.model);
        let key = if masked.ai_settings.api_key.is_empty() {
            "(not set)"
        } else {
            masked.ai_settings.api_key.as_str()
        };
        println!("api key:       {key}");
        println!("offline mode:  {}", masked.privacy_settings.offline_mode);
        println!("collect stats: {}", masked.privacy_settings.collect_stats);
    }
}
