//! Verdict decoding: structured JSON first, the line convention as the
//! explicit fallback path.

use crate::{
    classifier::types::ClassifierReply,
    errors::Error,
    Result,
};

use super::types::Verdict;

/// Decode a classifier reply into a verdict.
///
/// A structured value that does not match the verdict shape falls through to
/// the plain-text decode of the same reply; no second backend call is made.
pub fn decode_reply(reply: &ClassifierReply) -> Result<Verdict> {
    if let Some(value) = &reply.structured {
        if let Ok(verdict) = serde_json::from_value::<Verdict>(value.clone()) {
            return Ok(verdict.normalized());
        }
    }

    // Models sometimes emit the JSON object as text even without a
    // structured channel.
    if let Ok(verdict) = serde_json::from_str::<Verdict>(reply.text.trim()) {
        return Ok(verdict.normalized());
    }

    parse_plain(&reply.text)
}

/// Decode the two/three-line plain-text convention.
///
/// Line 1 must be `safe` or `unsafe` (trimmed, case-insensitive); anything
/// else is a parse error, never an implicit "unsafe". For `unsafe`, line 2
/// becomes the violation reason and line 3 the improved message, when
/// present.
pub fn parse_plain(text: &str) -> Result<Verdict> {
    let mut lines = text.trim().lines().map(str::trim);
    let first = lines.next().unwrap_or("").to_lowercase();

    match first.as_str() {
        "safe" => Ok(Verdict::appropriate()),
        "unsafe" => {
            let violation_reason = lines
                .next()
                .filter(|line| !line.is_empty())
                .map(str::to_string);
            let improved_message = lines
                .next()
                .filter(|line| !line.is_empty())
                .map(str::to_string);
            Ok(Verdict {
                is_appropriate: false,
                violation_reason,
                improved_message,
            })
        }
        other => Err(Error::Parse(format!(
            "unexpected verdict line from classifier: {other:?}"
        ))),
    }
}
