//! Replicate adapter (hosted LlamaGuard).
//!
//! Uses the synchronous-mode predictions endpoint (`Prefer: wait`) so one
//! moderation exchange stays a single HTTP call.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use tmb_core::{
    classifier::{
        client::ClassifierClient,
        types::{
            ClassifierCapabilities, ClassifierReply, ClassifyRequest, ProviderKind,
            ReplicateConfig,
        },
    },
    errors::Error,
    Result,
};

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct ReplicateClassifier {
    cfg: ReplicateConfig,
    http: reqwest::Client,
}

impl ReplicateClassifier {
    pub fn new(cfg: ReplicateConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("reqwest client build");
        Self { cfg, http }
    }
}

/// Replicate returns `output` either as one string or as an array of chunks.
fn output_text(value: &serde_json::Value) -> String {
    match value.get("output") {
        Some(serde_json::Value::String(s)) => s.trim().to_string(),
        Some(serde_json::Value::Array(parts)) => parts
            .iter()
            .filter_map(|p| p.as_str())
            .collect::<String>()
            .trim()
            .to_string(),
        _ => String::new(),
    }
}

#[async_trait]
impl ClassifierClient for ReplicateClassifier {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Replicate
    }

    fn capabilities(&self) -> ClassifierCapabilities {
        // LlamaGuard on Replicate only emits the safe/unsafe line convention.
        ClassifierCapabilities {
            supports_structured_output: false,
        }
    }

    async fn classify(&self, req: &ClassifyRequest) -> Result<ClassifierReply> {
        let url = format!(
            "https://api.replicate.com/v1/models/{}/predictions",
            self.cfg.model
        );
        let body = json!({ "input": { "prompt": req.prompt } });

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.cfg.api_token)
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("replicate request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "replicate request failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let value: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::Transport(format!("replicate json error: {e}")))?;

        let text = output_text(&value);
        if text.is_empty() {
            return Err(Error::Parse("replicate returned no output".to_string()));
        }

        Ok(ClassifierReply {
            text,
            structured: None,
        })
    }
}
