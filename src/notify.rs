use crate::api::CLIENT;
use crate::config::CONFIG;
use crate::diff::{Change, Priority};
use color_eyre::Result;
use log::{error, info};
use serde::Serialize;

const TELEGRAM_API: &str = "https://api.telegram.org";

const EMOJI_HIGH: &str = "\u{1f6a8}";
const EMOJI_MEDIUM: &str = "\u{1f4e6}";

pub fn format_alert(changes: &[Change]) -> String {
    let mut lines = vec![format!("<b>{} Hugging Face activity</b>\n", CONFIG.org)];
    for change in changes {
        let icon = match change.priority {
            Priority::High => EMOJI_HIGH,
            Priority::Medium => EMOJI_MEDIUM,
        };
        lines.push(format!("{icon} [{}] {}", change.priority, change.message));
    }
    lines.push(format!("\nhttps://huggingface.co/{}", CONFIG.org));
    lines.join("\n")
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Delivers the alert via the Telegram bot API. Returns whether the message
/// was actually sent; missing credentials and API rejections are not errors.
pub fn send_alert(message: &str) -> Result<bool> {
    deliver(
        message,
        CONFIG.telegram_bot_token.as_deref().filter(|t| !t.is_empty()),
        CONFIG.telegram_chat_id.as_deref().filter(|c| !c.is_empty()),
    )
}

fn deliver(message: &str, token: Option<&str>, chat_id: Option<&str>) -> Result<bool> {
    let (Some(token), Some(chat_id)) = (token, chat_id) else {
        info!("Telegram not configured. Would have sent:\n{message}");
        return Ok(false);
    };

    let resp = CLIENT
        .post(format!("{TELEGRAM_API}/bot{token}/sendMessage"))
        .json(&SendMessage {
            chat_id,
            text: message,
            parse_mode: "HTML",
        })
        .send()?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        error!("Telegram API error: {status} {body}");
        return Ok(false);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_is_not_sent_and_not_an_error() {
        assert!(!deliver("hello", None, None).unwrap());
        assert!(!deliver("hello", Some("token"), None).unwrap());
        assert!(!deliver("hello", None, Some("42")).unwrap());
    }

    #[test]
    fn alert_contains_priorities_and_icons() {
        let changes = vec![
            Change {
                priority: Priority::High,
                message: "New Space: org/demo".into(),
            },
            Change {
                priority: Priority::Medium,
                message: "New Model: org/model".into(),
            },
        ];
        let alert = format_alert(&changes);
        assert!(alert.starts_with("<b>"));
        assert!(alert.contains(&format!("{EMOJI_HIGH} [HIGH] New Space: org/demo")));
        assert!(alert.contains(&format!("{EMOJI_MEDIUM} [MEDIUM] New Model: org/model")));
        assert!(alert.ends_with(&format!("https://huggingface.co/{}", CONFIG.org)));
    }
}
