//! Prompt template for the moderation exchange.

use crate::classifier::types::OutputMode;

use super::types::ModerationRequest;

const STRUCTURED_FORMAT_INSTRUCTIONS: &str = r#"Respond with a single JSON object and nothing else, using exactly these fields:
{"is_appropriate": true or false, "violation_reason": "..." or null, "improved_message": "..." or null}"#;

const PLAIN_FORMAT_INSTRUCTIONS: &str = r#"Respond using up to three lines:
First line: "safe" or "unsafe"
Second line (only if unsafe): why the message violates the guidelines
Third line (optional): a suggested alternative wording"#;

/// Render the instruction prompt for one message.
///
/// The format tail matches the decode path the pipeline will use.
pub fn render_prompt(req: &ModerationRequest, output: OutputMode) -> String {
    let format_instructions = match output {
        OutputMode::Structured => STRUCTURED_FORMAT_INSTRUCTIONS,
        OutputMode::PlainText => PLAIN_FORMAT_INSTRUCTIONS,
    };

    format!(
        "You are a moderator for a Telegram group chat, responsible for checking whether \
messages comply with the group rules and guidelines. You must evaluate each message and \
decide whether it is appropriate.

GROUP GUIDELINES:
{guidelines}

Your task is to analyze the following message sent by a user and determine:
1. Whether the message is appropriate under the group guidelines
2. If it is not appropriate, why it violates them
3. If the wording is inappropriate but the intent is valid, a better phrasing

MESSAGE TO EVALUATE:
User: {sender}
Message: {text}

{format_instructions}",
        guidelines = req.guidelines,
        sender = req.sender_display_name,
        text = req.message_text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ModerationRequest {
        ModerationRequest {
            guidelines: "No spoilers.".to_string(),
            sender_display_name: "alice".to_string(),
            message_text: "The butler did it".to_string(),
        }
    }

    #[test]
    fn embeds_all_three_inputs() {
        let prompt = render_prompt(&request(), OutputMode::PlainText);
        assert!(prompt.contains("No spoilers."));
        assert!(prompt.contains("User: alice"));
        assert!(prompt.contains("Message: The butler did it"));
    }

    #[test]
    fn format_tail_follows_the_output_mode() {
        let plain = render_prompt(&request(), OutputMode::PlainText);
        assert!(plain.contains("\"safe\" or \"unsafe\""));
        assert!(!plain.contains("JSON"));

        let structured = render_prompt(&request(), OutputMode::Structured);
        assert!(structured.contains("single JSON object"));
        assert!(structured.contains("is_appropriate"));
    }
}
