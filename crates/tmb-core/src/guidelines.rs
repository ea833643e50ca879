//! Guideline resolution: the chat description is the rule text, with a
//! built-in fallback when none is set.

use tracing::warn;

use crate::{domain::ChatId, messaging::port::ChatPort};

/// Rules applied when a chat has no description.
pub const DEFAULT_GUIDELINES: &str = "This is a respectful discussion group. Offensive or \
discriminatory language and adult content are not allowed. Keep conversations civil and \
constructive. Spam and unsolicited promotions are not allowed.";

/// Resolve the active guideline text for a chat.
///
/// Resolved fresh for every message (no caching). A transport failure while
/// fetching the description is treated the same as an empty description:
/// the fallback rules apply and the failure stays in the log.
pub async fn resolve_guidelines(chat: &dyn ChatPort, chat_id: ChatId) -> String {
    match chat.chat_description(chat_id).await {
        Ok(Some(description)) if !description.trim().is_empty() => description,
        Ok(_) => DEFAULT_GUIDELINES.to_string(),
        Err(e) => {
            warn!("failed to fetch description for chat {}: {e}", chat_id.0);
            DEFAULT_GUIDELINES.to_string()
        }
    }
}
