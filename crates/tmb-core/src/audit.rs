//! Append-only audit log for moderation decisions.

use std::{fs::OpenOptions, io::Write, path::PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::{
    domain::IncomingMessage,
    formatting::truncate_chars,
    moderation::types::Verdict,
    Result,
};

const AUDIT_MAX_TEXT: usize = 500;

/// RFC3339 timestamp in UTC.
fn iso_timestamp_utc() -> String {
    Utc::now().to_rfc3339()
}

#[derive(Clone, Debug, Serialize)]
pub struct AuditEvent {
    pub timestamp: String,
    pub event: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appropriate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEvent {
    fn new(event: &str) -> Self {
        Self {
            timestamp: iso_timestamp_utc(),
            event: event.to_string(),
            chat_id: None,
            user_id: None,
            username: None,
            content: None,
            appropriate: None,
            reason: None,
            error: None,
        }
    }

    pub fn verdict(msg: &IncomingMessage, verdict: &Verdict) -> Self {
        let mut ev = Self::new("verdict");
        ev.chat_id = Some(msg.chat_id.0);
        ev.user_id = Some(msg.sender_id.0);
        ev.username = Some(msg.sender_display_name.clone());
        ev.content = Some(truncate_chars(&msg.text, AUDIT_MAX_TEXT));
        ev.appropriate = Some(verdict.is_appropriate);
        ev.reason = verdict.violation_reason.clone();
        ev
    }

    pub fn pipeline_error(msg: &IncomingMessage, error: &str) -> Self {
        let mut ev = Self::new("pipeline_error");
        ev.chat_id = Some(msg.chat_id.0);
        ev.user_id = Some(msg.sender_id.0);
        ev.error = Some(error.to_string());
        ev
    }

    pub fn suspended(chat_id: i64) -> Self {
        let mut ev = Self::new("suspended");
        ev.chat_id = Some(chat_id);
        ev
    }

    fn render_plain(&self) -> String {
        let mut out = format!("{} {}", self.timestamp, self.event);
        if let Some(chat_id) = self.chat_id {
            out.push_str(&format!(" chat={chat_id}"));
        }
        if let Some(user_id) = self.user_id {
            out.push_str(&format!(" user={user_id}"));
        }
        if let Some(username) = &self.username {
            out.push_str(&format!(" username={username}"));
        }
        if let Some(appropriate) = self.appropriate {
            out.push_str(&format!(" appropriate={appropriate}"));
        }
        if let Some(reason) = &self.reason {
            out.push_str(&format!(" reason={reason:?}"));
        }
        if let Some(content) = &self.content {
            out.push_str(&format!(" content={content:?}"));
        }
        if let Some(error) = &self.error {
            out.push_str(&format!(" error={error:?}"));
        }
        out
    }
}

/// Best-effort audit trail: one line per event, plain or JSON per config.
#[derive(Clone, Debug)]
pub struct AuditLogger {
    path: PathBuf,
    json: bool,
}

impl AuditLogger {
    pub fn new(path: PathBuf, json: bool) -> Self {
        Self { path, json }
    }

    pub fn write(&self, event: AuditEvent) -> Result<()> {
        let line = if self.json {
            serde_json::to_string(&event)?
        } else {
            event.render_plain()
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
