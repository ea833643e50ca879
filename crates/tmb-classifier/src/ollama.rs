//! Ollama adapter (local LlamaGuard endpoint).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use tmb_core::{
    classifier::{
        client::ClassifierClient,
        types::{
            ClassifierCapabilities, ClassifierReply, ClassifyRequest, OllamaConfig, OutputMode,
            ProviderKind,
        },
    },
    errors::Error,
    Result,
};

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct OllamaClassifier {
    cfg: OllamaConfig,
    http: reqwest::Client,
}

impl OllamaClassifier {
    pub fn new(cfg: OllamaConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("reqwest client build");
        Self { cfg, http }
    }
}

#[async_trait]
impl ClassifierClient for OllamaClassifier {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn capabilities(&self) -> ClassifierCapabilities {
        ClassifierCapabilities {
            supports_structured_output: true,
        }
    }

    async fn classify(&self, req: &ClassifyRequest) -> Result<ClassifierReply> {
        let mut body = json!({
            "model": self.cfg.model,
            "prompt": req.prompt,
            "stream": false,
        });
        if req.output == OutputMode::Structured {
            body["format"] = json!("json");
        }

        let url = format!("{}/api/generate", self.cfg.host.trim_end_matches('/'));
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("ollama request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "ollama request failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let value: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::Transport(format!("ollama json error: {e}")))?;

        let text = value
            .get("response")
            .and_then(|t| t.as_str())
            .unwrap_or("")
            .trim()
            .to_string();
        if text.is_empty() {
            return Err(Error::Parse("ollama returned an empty response".to_string()));
        }

        // With `format: "json"` the response body is itself a JSON document.
        let structured = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .filter(|v| v.is_object());

        Ok(ClassifierReply { text, structured })
    }
}
