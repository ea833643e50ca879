//! Telegram update handlers.
//!
//! Each handler validates the update shape and then calls into the
//! `tmb-core` moderation flow; failures never escape the dispatch loop.

use std::sync::Arc;

use teloxide::prelude::*;

use crate::router::AppState;

mod commands;
mod text;

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        // Only text messages are moderated.
        return Ok(());
    };

    if text.starts_with('/') {
        return commands::handle_command(bot, msg).await;
    }

    // Never moderate the bot's own messages.
    if msg.from().map(|u| u.id.0) == Some(state.bot_user_id) {
        return Ok(());
    }

    text::handle_text(msg, state).await
}
