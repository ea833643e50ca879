use serde::{Deserialize, Serialize};

/// Inputs for one moderation exchange, built per incoming message and
/// discarded after use.
#[derive(Clone, Debug)]
pub struct ModerationRequest {
    pub guidelines: String,
    pub sender_display_name: String,
    pub message_text: String,
}

/// The structured moderation decision for one message.
///
/// `violation_reason` and `improved_message` are only meaningful when
/// `is_appropriate` is false; decoding normalizes them to `None` otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_appropriate: bool,
    #[serde(default)]
    pub violation_reason: Option<String>,
    #[serde(default)]
    pub improved_message: Option<String>,
}

impl Verdict {
    pub fn appropriate() -> Self {
        Self {
            is_appropriate: true,
            violation_reason: None,
            improved_message: None,
        }
    }

    /// Enforce the field invariant after decoding.
    pub fn normalized(mut self) -> Self {
        if self.is_appropriate {
            self.violation_reason = None;
            self.improved_message = None;
        }
        self
    }
}

/// What to do with a message when the classifier cannot produce a verdict.
///
/// `Remove` is the default: the message is deleted with an explanatory
/// notice. `Allow` keeps the message and reports the failure in the review
/// placeholder instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    Remove,
    Allow,
}

/// Reason attached to the substitute verdict under `FailurePolicy::Remove`.
pub const FALLBACK_REASON: &str = "The message could not be evaluated due to a technical error \
and was removed as a precaution. An administrator can review this case.";

/// The substitute verdict applied when classification fails and the policy
/// is `Remove`.
pub fn fallback_verdict() -> Verdict {
    Verdict {
        is_appropriate: false,
        violation_reason: Some(FALLBACK_REASON.to_string()),
        improved_message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_clears_fields_on_appropriate_verdicts() {
        let v = Verdict {
            is_appropriate: true,
            violation_reason: Some("leftover".to_string()),
            improved_message: Some("leftover".to_string()),
        }
        .normalized();
        assert_eq!(v, Verdict::appropriate());
    }

    #[test]
    fn normalization_keeps_fields_on_violations() {
        let v = Verdict {
            is_appropriate: false,
            violation_reason: Some("insults".to_string()),
            improved_message: None,
        };
        assert_eq!(v.clone().normalized(), v);
    }

    #[test]
    fn fallback_verdict_is_a_removal() {
        let v = fallback_verdict();
        assert!(!v.is_appropriate);
        assert_eq!(v.violation_reason.as_deref(), Some(FALLBACK_REASON));
        assert_eq!(v.improved_message, None);
    }
}
