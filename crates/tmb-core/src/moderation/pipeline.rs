//! Moderation pipeline: prompt rendering, one classifier call, decoding.

use std::{sync::Arc, time::Duration};

use tokio::time::timeout;
use tracing::debug;

use crate::{
    classifier::{
        client::ClassifierClient,
        types::{ClassifyRequest, OutputMode},
    },
    errors::Error,
    Result,
};

use super::{
    parse::decode_reply,
    prompt::render_prompt,
    types::{ModerationRequest, Verdict},
};

/// Turns (guidelines, sender, message) into a verdict via the classifier.
///
/// Holds no per-message state; every call is self-contained.
pub struct ModerationPipeline {
    classifier: Arc<dyn ClassifierClient>,
    classify_timeout: Duration,
}

impl ModerationPipeline {
    pub fn new(classifier: Arc<dyn ClassifierClient>, classify_timeout: Duration) -> Self {
        Self {
            classifier,
            classify_timeout,
        }
    }

    /// Classify one message. Exactly one backend call, no retries, bounded
    /// by the configured timeout. Errors are returned to the caller, which
    /// substitutes the configured default verdict at the per-message
    /// boundary.
    pub async fn moderate(&self, req: &ModerationRequest) -> Result<Verdict> {
        let output = if self.classifier.capabilities().supports_structured_output {
            OutputMode::Structured
        } else {
            OutputMode::PlainText
        };

        let classify_req = ClassifyRequest {
            prompt: render_prompt(req, output),
            message_text: req.message_text.clone(),
            output,
        };

        let reply = timeout(self.classify_timeout, self.classifier.classify(&classify_req))
            .await
            .map_err(|_| {
                Error::Transport(format!(
                    "classifier timed out after {}ms",
                    self.classify_timeout.as_millis()
                ))
            })??;

        debug!(provider = ?self.classifier.provider(), "classifier replied");
        decode_reply(&reply)
    }
}
