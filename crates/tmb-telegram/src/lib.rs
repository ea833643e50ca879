//! Telegram adapter (teloxide).
//!
//! This crate implements the `tmb-core` ChatPort over the Telegram Bot API.

use async_trait::async_trait;

use teloxide::{prelude::*, types::ParseMode};

use tokio::time::sleep;

pub mod handlers;
pub mod router;

use tmb_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::port::{ChatCapabilities, ChatPort},
    Result,
};

#[derive(Clone)]
pub struct TelegramChat {
    bot: Bot,
    bot_user: teloxide::types::UserId,
}

impl TelegramChat {
    pub fn new(bot: Bot, bot_user: teloxide::types::UserId) -> Self {
        Self { bot, bot_user }
    }

    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        match e {
            teloxide::RequestError::Api(teloxide::ApiError::MessageCantBeDeleted) => {
                Error::Permission("the bot may not delete this message".to_string())
            }
            other => Error::Transport(format!("telegram error: {other}")),
        }
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl ChatPort for TelegramChat {
    fn capabilities(&self) -> ChatCapabilities {
        ChatCapabilities {
            supports_html: true,
            supports_edit: true,
            max_message_len: 4096,
        }
    }

    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
        let msg = self
            .with_retry(|| {
                self.bot
                    .send_message(Self::tg_chat(chat_id), html.to_string())
                    .parse_mode(ParseMode::Html)
            })
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn send_reply_html(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        html: &str,
    ) -> Result<MessageRef> {
        let msg = self
            .with_retry(|| {
                self.bot
                    .send_message(Self::tg_chat(chat_id), html.to_string())
                    .parse_mode(ParseMode::Html)
                    .reply_to_message_id(Self::tg_msg_id(reply_to))
            })
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn edit_html(&self, msg: MessageRef, html: &str) -> Result<()> {
        self.with_retry(|| {
            self.bot
                .edit_message_text(
                    Self::tg_chat(msg.chat_id),
                    Self::tg_msg_id(msg.message_id),
                    html.to_string(),
                )
                .parse_mode(ParseMode::Html)
        })
        .await?;
        Ok(())
    }

    async fn delete_message(&self, msg: MessageRef) -> Result<()> {
        self.with_retry(|| {
            self.bot
                .delete_message(Self::tg_chat(msg.chat_id), Self::tg_msg_id(msg.message_id))
        })
        .await?;
        Ok(())
    }

    async fn chat_description(&self, chat_id: ChatId) -> Result<Option<String>> {
        let chat = self
            .with_retry(|| self.bot.get_chat(Self::tg_chat(chat_id)))
            .await?;
        Ok(chat.description().map(str::to_string))
    }

    async fn can_delete_messages(&self, chat_id: ChatId) -> Result<bool> {
        let member = self
            .with_retry(|| self.bot.get_chat_member(Self::tg_chat(chat_id), self.bot_user))
            .await?;

        Ok(match member.kind {
            teloxide::types::ChatMemberKind::Owner(_) => true,
            teloxide::types::ChatMemberKind::Administrator(admin) => admin.can_delete_messages,
            _ => false,
        })
    }
}
