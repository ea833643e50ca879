use std::sync::Arc;

use teloxide::prelude::*;

use tmb_core::domain::{ChatId, IncomingMessage, MessageId, UserId};

use crate::router::AppState;

pub async fn handle_text(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    // Moderation only applies to group chats; the bot has no delete rights
    // in private conversations.
    if !(msg.chat.is_group() || msg.chat.is_supergroup()) {
        return Ok(());
    }

    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if text.trim().is_empty() {
        return Ok(());
    }

    let sender_display_name = user
        .username
        .clone()
        .unwrap_or_else(|| user.first_name.clone());

    let incoming = IncomingMessage {
        chat_id: ChatId(msg.chat.id.0),
        message_id: MessageId(msg.id.0),
        sender_id: UserId(user.id.0 as i64),
        sender_display_name,
        text: text.to_string(),
    };

    state.moderator.process(&incoming).await;
    Ok(())
}
