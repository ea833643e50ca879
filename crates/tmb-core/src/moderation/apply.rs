//! Verdict application: message deletion and sender notification.

use tracing::warn;

use crate::{
    domain::{IncomingMessage, MessageRef},
    errors::Error,
    formatting::escape_html,
    messaging::port::ChatPort,
};

use super::{gate::ModerationGate, types::Verdict};

/// Build the HTML notification for a removed message.
///
/// The rewrite section is appended only when a suggestion exists; an
/// appropriate notification never carries an empty trailing section.
pub fn build_violation_notice(sender: &str, verdict: &Verdict) -> String {
    let reason = verdict
        .violation_reason
        .as_deref()
        .unwrap_or("It does not comply with the group guidelines.");

    let mut notice = format!(
        "@{}, your message was removed because it violates the group guidelines:\n\n{}",
        escape_html(sender),
        escape_html(reason),
    );

    if let Some(improved) = verdict.improved_message.as_deref() {
        notice.push_str("\n\nSuggested alternative wording:\n");
        notice.push_str(&escape_html(improved));
    }

    notice
}

/// Apply a verdict to the originating message.
///
/// Removal order is fixed: offending message first, then the review
/// placeholder, then the notification. A delete denied by the platform
/// suspends moderation for the chat via the gate; every step is
/// best-effort and failures stay in the log.
pub async fn apply_verdict(
    chat: &dyn ChatPort,
    gate: &ModerationGate,
    msg: &IncomingMessage,
    placeholder: Option<MessageRef>,
    verdict: &Verdict,
) {
    if verdict.is_appropriate {
        // The original message stays untouched; only the transient
        // placeholder goes away.
        if let Some(ph) = placeholder {
            if let Err(e) = chat.delete_message(ph).await {
                warn!("failed to delete review placeholder: {e}");
            }
        }
        return;
    }

    let deleted = match chat.delete_message(msg.message_ref()).await {
        Ok(()) => true,
        Err(Error::Permission(reason)) => {
            warn!("delete denied in chat {}: {reason}", msg.chat_id.0);
            gate.suspend(chat, msg.chat_id).await;
            false
        }
        Err(e) => {
            warn!(
                "failed to delete message {} in chat {}: {e}",
                msg.message_id.0, msg.chat_id.0
            );
            false
        }
    };

    if let Some(ph) = placeholder {
        if let Err(e) = chat.delete_message(ph).await {
            warn!("failed to delete review placeholder: {e}");
        }
    }

    // Only claim a removal that actually happened.
    if deleted {
        let notice = build_violation_notice(&msg.sender_display_name, verdict);
        if let Err(e) = chat.send_html(msg.chat_id, &notice).await {
            warn!("failed to send violation notice in chat {}: {e}", msg.chat_id.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatId, MessageId, UserId};
    use crate::testing::{ChatCall, FakeChat};

    fn incoming() -> IncomingMessage {
        IncomingMessage {
            chat_id: ChatId(-100),
            message_id: MessageId(7),
            sender_id: UserId(42),
            sender_display_name: "alice".to_string(),
            text: "hello".to_string(),
        }
    }

    fn placeholder() -> MessageRef {
        MessageRef {
            chat_id: ChatId(-100),
            message_id: MessageId(8),
        }
    }

    fn violation(reason: &str, improved: Option<&str>) -> Verdict {
        Verdict {
            is_appropriate: false,
            violation_reason: Some(reason.to_string()),
            improved_message: improved.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn appropriate_verdict_removes_only_the_placeholder() {
        let chat = FakeChat::new();
        let gate = ModerationGate::new();
        let msg = incoming();

        apply_verdict(&chat, &gate, &msg, Some(placeholder()), &Verdict::appropriate()).await;

        assert_eq!(
            chat.calls(),
            vec![ChatCall::Delete {
                chat_id: -100,
                message_id: 8,
            }]
        );
    }

    #[tokio::test]
    async fn violation_deletes_message_then_placeholder_then_notifies() {
        let chat = FakeChat::new();
        let gate = ModerationGate::new();
        let msg = incoming();

        apply_verdict(
            &chat,
            &gate,
            &msg,
            Some(placeholder()),
            &violation("Contains insults", Some("Try: 'I disagree'")),
        )
        .await;

        let calls = chat.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            ChatCall::Delete {
                chat_id: -100,
                message_id: 7,
            }
        );
        assert_eq!(
            calls[1],
            ChatCall::Delete {
                chat_id: -100,
                message_id: 8,
            }
        );
        let ChatCall::Send { chat_id, html } = &calls[2] else {
            panic!("expected a notification, got {:?}", calls[2]);
        };
        assert_eq!(*chat_id, -100);
        assert!(html.contains("@alice"));
        assert!(html.contains("Contains insults"));
        assert!(html.contains("Suggested alternative wording:"));
    }

    #[tokio::test]
    async fn notice_omits_the_rewrite_section_without_a_suggestion() {
        let notice = build_violation_notice("alice", &violation("Contains insults", None));
        assert!(notice.contains("Contains insults"));
        assert!(!notice.contains("Suggested alternative wording"));
        assert!(!notice.ends_with('\n'));
    }

    #[test]
    fn notice_escapes_user_controlled_text() {
        let notice = build_violation_notice(
            "<script>",
            &violation("Posted a <b> tag", Some("a & b")),
        );
        assert!(notice.contains("@&lt;script&gt;"));
        assert!(notice.contains("Posted a &lt;b&gt; tag"));
        assert!(notice.contains("a &amp; b"));
    }

    #[tokio::test]
    async fn denied_delete_suspends_and_skips_the_notification() {
        let mut chat = FakeChat::new();
        chat.deny_delete = true;
        let gate = ModerationGate::new();
        let msg = incoming();

        apply_verdict(
            &chat,
            &gate,
            &msg,
            Some(placeholder()),
            &violation("Contains insults", None),
        )
        .await;

        assert!(gate.is_suspended(ChatId(-100)).await);
        let sends: Vec<_> = chat
            .calls()
            .into_iter()
            .filter(|c| matches!(c, ChatCall::Send { .. }))
            .collect();
        // The single send is the suspension notice, not a removal claim.
        assert_eq!(sends.len(), 1);
        let ChatCall::Send { html, .. } = &sends[0] else {
            unreachable!();
        };
        assert!(html.contains("moderation is paused"));
    }
}
