//! Per-chat moderation gate: delete-capability check and suspension.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::warn;

use crate::{
    audit::{AuditEvent, AuditLogger},
    domain::ChatId,
    messaging::port::ChatPort,
};

const SUSPENDED_NOTICE: &str = "⚠️ I don't have permission to delete messages in this chat, \
so moderation is paused. Grant me the \"Delete messages\" admin right to resume.";

/// Tracks, per chat, whether moderation is active.
///
/// A chat where the bot lacks the delete right gets a single warning and is
/// skipped afterwards instead of failing on every message.
#[derive(Default)]
pub struct ModerationGate {
    states: Mutex<HashMap<i64, bool>>,
    audit: Option<AuditLogger>,
}

impl ModerationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audit(audit: AuditLogger) -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
            audit: Some(audit),
        }
    }

    /// Check that moderation can run in this chat, probing the delete
    /// capability on first contact. Returns false when suspended.
    pub async fn ensure_active(&self, chat: &dyn ChatPort, chat_id: ChatId) -> bool {
        if let Some(&active) = self.states.lock().await.get(&chat_id.0) {
            return active;
        }

        match chat.can_delete_messages(chat_id).await {
            Ok(true) => {
                self.states.lock().await.insert(chat_id.0, true);
                true
            }
            Ok(false) => {
                self.suspend(chat, chat_id).await;
                false
            }
            Err(e) => {
                // Capability unknown; keep moderating and let the delete
                // path decide.
                warn!("capability check failed for chat {}: {e}", chat_id.0);
                true
            }
        }
    }

    /// Suspend moderation for a chat, warning its members exactly once.
    pub async fn suspend(&self, chat: &dyn ChatPort, chat_id: ChatId) {
        let previous = self.states.lock().await.insert(chat_id.0, false);
        if previous == Some(false) {
            return;
        }

        if let Some(audit) = &self.audit {
            if let Err(e) = audit.write(AuditEvent::suspended(chat_id.0)) {
                warn!("failed to write audit event: {e}");
            }
        }

        if let Err(e) = chat.send_html(chat_id, SUSPENDED_NOTICE).await {
            warn!("failed to post suspension notice in chat {}: {e}", chat_id.0);
        }
    }

    pub async fn is_suspended(&self, chat_id: ChatId) -> bool {
        matches!(self.states.lock().await.get(&chat_id.0), Some(false))
    }
}
