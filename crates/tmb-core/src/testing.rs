//! Hand-rolled recording fakes for the chat and classifier ports.

use std::sync::{
    atomic::{AtomicI32, Ordering},
    Mutex,
};

use async_trait::async_trait;

use crate::{
    classifier::{
        client::ClassifierClient,
        types::{ClassifierCapabilities, ClassifierReply, ClassifyRequest, ProviderKind},
    },
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::port::{ChatCapabilities, ChatPort},
    Result,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatCall {
    Send { chat_id: i64, html: String },
    SendReply { chat_id: i64, reply_to: i32, html: String },
    Edit { chat_id: i64, message_id: i32, html: String },
    Delete { chat_id: i64, message_id: i32 },
    Describe { chat_id: i64 },
    Capability { chat_id: i64 },
}

pub struct FakeChat {
    calls: Mutex<Vec<ChatCall>>,
    pub description: Option<String>,
    pub description_fails: bool,
    pub can_delete: bool,
    pub capability_fails: bool,
    pub deny_delete: bool,
    next_id: AtomicI32,
}

impl FakeChat {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            description: None,
            description_fails: false,
            can_delete: true,
            capability_fails: false,
            deny_delete: false,
            next_id: AtomicI32::new(100),
        }
    }

    pub fn with_description(description: &str) -> Self {
        let mut chat = Self::new();
        chat.description = Some(description.to_string());
        chat
    }

    pub fn calls(&self) -> Vec<ChatCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ChatCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_ref(&self, chat_id: ChatId) -> MessageRef {
        MessageRef {
            chat_id,
            message_id: MessageId(self.next_id.fetch_add(1, Ordering::SeqCst)),
        }
    }
}

#[async_trait]
impl ChatPort for FakeChat {
    fn capabilities(&self) -> ChatCapabilities {
        ChatCapabilities {
            supports_html: true,
            supports_edit: true,
            max_message_len: 4096,
        }
    }

    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
        self.record(ChatCall::Send {
            chat_id: chat_id.0,
            html: html.to_string(),
        });
        Ok(self.next_ref(chat_id))
    }

    async fn send_reply_html(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        html: &str,
    ) -> Result<MessageRef> {
        self.record(ChatCall::SendReply {
            chat_id: chat_id.0,
            reply_to: reply_to.0,
            html: html.to_string(),
        });
        Ok(self.next_ref(chat_id))
    }

    async fn edit_html(&self, msg: MessageRef, html: &str) -> Result<()> {
        self.record(ChatCall::Edit {
            chat_id: msg.chat_id.0,
            message_id: msg.message_id.0,
            html: html.to_string(),
        });
        Ok(())
    }

    async fn delete_message(&self, msg: MessageRef) -> Result<()> {
        self.record(ChatCall::Delete {
            chat_id: msg.chat_id.0,
            message_id: msg.message_id.0,
        });
        if self.deny_delete {
            return Err(Error::Permission("not enough rights".to_string()));
        }
        Ok(())
    }

    async fn chat_description(&self, chat_id: ChatId) -> Result<Option<String>> {
        self.record(ChatCall::Describe { chat_id: chat_id.0 });
        if self.description_fails {
            return Err(Error::Transport("chat metadata unavailable".to_string()));
        }
        Ok(self.description.clone())
    }

    async fn can_delete_messages(&self, chat_id: ChatId) -> Result<bool> {
        self.record(ChatCall::Capability { chat_id: chat_id.0 });
        if self.capability_fails {
            return Err(Error::Transport("member query failed".to_string()));
        }
        Ok(self.can_delete)
    }
}

pub enum FakeOutcome {
    Reply(ClassifierReply),
    Fail(String),
}

pub struct FakeClassifier {
    requests: Mutex<Vec<ClassifyRequest>>,
    pub structured: bool,
    pub outcome: FakeOutcome,
    pub delay: Option<std::time::Duration>,
}

impl FakeClassifier {
    pub fn text(reply: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            structured: false,
            outcome: FakeOutcome::Reply(ClassifierReply {
                text: reply.to_string(),
                structured: None,
            }),
            delay: None,
        }
    }

    pub fn json(value: serde_json::Value) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            structured: true,
            outcome: FakeOutcome::Reply(ClassifierReply {
                text: value.to_string(),
                structured: Some(value),
            }),
            delay: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            structured: false,
            outcome: FakeOutcome::Fail(message.to_string()),
            delay: None,
        }
    }

    pub fn requests(&self) -> Vec<ClassifyRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClassifierClient for FakeClassifier {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn capabilities(&self) -> ClassifierCapabilities {
        ClassifierCapabilities {
            supports_structured_output: self.structured,
        }
    }

    async fn classify(&self, req: &ClassifyRequest) -> Result<ClassifierReply> {
        self.requests.lock().unwrap().push(req.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outcome {
            FakeOutcome::Reply(reply) => Ok(reply.clone()),
            FakeOutcome::Fail(message) => Err(Error::Transport(message.clone())),
        }
    }
}
