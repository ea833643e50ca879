//! Per-message moderation flow.
//!
//! `Moderator::process` is the per-message error boundary: every failure is
//! converted into a log entry or a user-visible status message, so a single
//! malformed message can never take down the dispatch loop.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    audit::{AuditEvent, AuditLogger},
    domain::IncomingMessage,
    guidelines::resolve_guidelines,
    messaging::port::ChatPort,
};

use super::{
    apply::apply_verdict,
    gate::ModerationGate,
    pipeline::ModerationPipeline,
    types::{fallback_verdict, FailurePolicy, ModerationRequest},
};

/// Text of the transient placeholder posted while a message is reviewed.
pub const REVIEW_PLACEHOLDER: &str = "⏳ Reviewing this message...";

const REVIEW_FAILED: &str = "❌ This message could not be reviewed due to a technical error.";

/// Message-independent collaborators of the moderation flow.
pub struct Moderator {
    chat: Arc<dyn ChatPort>,
    pipeline: ModerationPipeline,
    gate: ModerationGate,
    audit: AuditLogger,
    failure_policy: FailurePolicy,
}

impl Moderator {
    pub fn new(
        chat: Arc<dyn ChatPort>,
        pipeline: ModerationPipeline,
        audit: AuditLogger,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            chat,
            pipeline,
            gate: ModerationGate::with_audit(audit.clone()),
            audit,
            failure_policy,
        }
    }

    /// Moderate one incoming message.
    pub async fn process(&self, msg: &IncomingMessage) {
        if !self.gate.ensure_active(self.chat.as_ref(), msg.chat_id).await {
            return;
        }

        let guidelines = resolve_guidelines(self.chat.as_ref(), msg.chat_id).await;

        let placeholder = match self
            .chat
            .send_reply_html(msg.chat_id, msg.message_id, REVIEW_PLACEHOLDER)
            .await
        {
            Ok(reference) => Some(reference),
            Err(e) => {
                warn!("failed to post review placeholder in chat {}: {e}", msg.chat_id.0);
                None
            }
        };

        let req = ModerationRequest {
            guidelines,
            sender_display_name: msg.sender_display_name.clone(),
            message_text: msg.text.clone(),
        };

        let verdict = match self.pipeline.moderate(&req).await {
            Ok(verdict) => verdict,
            Err(e) => {
                error!("moderation pipeline failed in chat {}: {e}", msg.chat_id.0);
                self.write_audit(AuditEvent::pipeline_error(msg, &e.to_string()));

                if self.failure_policy == FailurePolicy::Allow {
                    // Fail open: the message stays; the placeholder carries
                    // the failure notice.
                    if let Some(ph) = placeholder {
                        if let Err(e) = self.chat.edit_html(ph, REVIEW_FAILED).await {
                            warn!("failed to edit review placeholder: {e}");
                        }
                    }
                    return;
                }
                fallback_verdict()
            }
        };

        apply_verdict(self.chat.as_ref(), &self.gate, msg, placeholder, &verdict).await;

        info!(
            chat = msg.chat_id.0,
            appropriate = verdict.is_appropriate,
            "message moderated"
        );
        self.write_audit(AuditEvent::verdict(msg, &verdict));
    }

    fn write_audit(&self, event: AuditEvent) {
        if let Err(e) = self.audit.write(event) {
            warn!("failed to write audit event: {e}");
        }
    }
}
