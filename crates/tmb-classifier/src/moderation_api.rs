//! Moderation-API adapter (OpenAI-style `/v1/moderations` endpoint).
//!
//! The endpoint classifies raw text against fixed categories and cannot
//! follow prompt instructions, so the adapter sends the message text and
//! synthesizes the verdict JSON the pipeline expects.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use tmb_core::{
    classifier::{
        client::ClassifierClient,
        types::{
            ClassifierCapabilities, ClassifierReply, ClassifyRequest, ModerationApiConfig,
            ProviderKind,
        },
    },
    errors::Error,
    Result,
};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, Deserialize)]
struct ModerationResult {
    flagged: bool,
    #[serde(default)]
    categories: std::collections::HashMap<String, bool>,
}

#[derive(Clone, Debug, Deserialize)]
struct ModerationResponse {
    results: Vec<ModerationResult>,
}

#[derive(Clone, Debug)]
pub struct ModerationApiClassifier {
    cfg: ModerationApiConfig,
    http: reqwest::Client,
}

impl ModerationApiClassifier {
    pub fn new(cfg: ModerationApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("reqwest client build");
        Self { cfg, http }
    }
}

/// Map a category-based result onto the verdict shape.
fn reply_from_result(result: &ModerationResult) -> ClassifierReply {
    if !result.flagged {
        return ClassifierReply {
            text: "safe".to_string(),
            structured: Some(json!({
                "is_appropriate": true,
                "violation_reason": null,
                "improved_message": null,
            })),
        };
    }

    let mut flagged: Vec<&str> = result
        .categories
        .iter()
        .filter(|(_, &hit)| hit)
        .map(|(name, _)| name.as_str())
        .collect();
    flagged.sort_unstable();

    let reason = if flagged.is_empty() {
        "The message was flagged by the content-safety filter.".to_string()
    } else {
        format!("The message was flagged for: {}.", flagged.join(", "))
    };

    ClassifierReply {
        text: format!("unsafe\n{reason}"),
        structured: Some(json!({
            "is_appropriate": false,
            "violation_reason": reason,
            "improved_message": null,
        })),
    }
}

#[async_trait]
impl ClassifierClient for ModerationApiClassifier {
    fn provider(&self) -> ProviderKind {
        ProviderKind::ModerationApi
    }

    fn capabilities(&self) -> ClassifierCapabilities {
        ClassifierCapabilities {
            supports_structured_output: true,
        }
    }

    async fn classify(&self, req: &ClassifyRequest) -> Result<ClassifierReply> {
        let body = json!({ "input": [req.message_text] });

        let resp = self
            .http
            .post(&self.cfg.url)
            .bearer_auth(&self.cfg.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("moderation api request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "moderation api request failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: ModerationResponse = resp
            .json()
            .await
            .map_err(|e| Error::Transport(format!("moderation api json error: {e}")))?;

        let result = parsed
            .results
            .first()
            .ok_or_else(|| Error::Parse("moderation api returned no results".to_string()))?;

        Ok(reply_from_result(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(flagged: bool, categories: &[(&str, bool)]) -> ModerationResult {
        ModerationResult {
            flagged,
            categories: categories
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    #[test]
    fn unflagged_input_is_safe() {
        let reply = reply_from_result(&result(false, &[("hate", false)]));
        assert_eq!(reply.text, "safe");
        let structured = reply.structured.unwrap();
        assert_eq!(structured["is_appropriate"], true);
    }

    #[test]
    fn flagged_categories_become_the_reason() {
        let reply = reply_from_result(&result(
            true,
            &[("hate", true), ("spam", false), ("harassment", true)],
        ));
        let structured = reply.structured.unwrap();
        assert_eq!(structured["is_appropriate"], false);
        assert_eq!(
            structured["violation_reason"],
            "The message was flagged for: harassment, hate."
        );
        assert!(reply.text.starts_with("unsafe\n"));
    }

    #[test]
    fn flagged_without_categories_still_has_a_reason() {
        let reply = reply_from_result(&result(true, &[]));
        let structured = reply.structured.unwrap();
        assert_eq!(
            structured["violation_reason"],
            "The message was flagged by the content-safety filter."
        );
    }
}
