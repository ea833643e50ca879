use teloxide::prelude::*;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(bot: Bot, msg: Message) -> ResponseResult<()> {
    let (cmd, _args) = parse_command(msg.text().unwrap_or(""));

    match cmd.as_str() {
        "start" => {
            let name = msg
                .from()
                .map(|u| u.first_name.clone())
                .unwrap_or_else(|| "there".to_string());
            bot.send_message(
                msg.chat.id,
                format!(
                    "Hello {name}! I am the group moderation bot. \
I am here to make sure every message follows the group guidelines."
                ),
            )
            .await?;
        }
        "help" => {
            bot.send_message(
                msg.chat.id,
                "I review group messages with a content-safety model. \
I remove inappropriate messages and suggest a better wording when the intent is valid.",
            )
            .await?;
        }
        _ => {}
    }

    Ok(())
}
