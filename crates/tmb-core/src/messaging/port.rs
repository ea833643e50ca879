use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageId, MessageRef},
    Result,
};

/// Capabilities of a chat-platform implementation.
#[derive(Clone, Copy, Debug)]
pub struct ChatCapabilities {
    pub supports_html: bool,
    pub supports_edit: bool,
    pub max_message_len: usize,
}

/// Hexagonal port for the chat platform.
///
/// Telegram is the first implementation; the shape leaves room for other
/// messengers behind the same interface with capability flags.
#[async_trait]
pub trait ChatPort: Send + Sync {
    fn capabilities(&self) -> ChatCapabilities;

    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef>;
    async fn send_reply_html(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        html: &str,
    ) -> Result<MessageRef>;
    async fn edit_html(&self, msg: MessageRef, html: &str) -> Result<()>;
    async fn delete_message(&self, msg: MessageRef) -> Result<()>;

    /// Chat description used as moderation guidelines (`None` when unset).
    async fn chat_description(&self, chat_id: ChatId) -> Result<Option<String>>;

    /// Whether the bot may delete other users' messages in this chat.
    async fn can_delete_messages(&self, chat_id: ChatId) -> Result<bool>;
}
