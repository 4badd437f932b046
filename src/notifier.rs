//! Telegram delivery.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};
use tracing::info;

use crate::error::{BotError, Result};

/// Destination for notification text.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}

pub struct TelegramNotifier {
    bot: Bot,
    chat: Recipient,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: &str) -> Self {
        Self {
            bot: Bot::new(token),
            chat: parse_recipient(chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        self.bot
            .send_message(self.chat.clone(), text)
            .await
            .map_err(|e| BotError::Delivery(e.to_string()))?;
        info!("Message sent to Telegram");
        Ok(())
    }
}

/// Numeric ids (including negative group ids) address a chat directly;
/// anything else is treated as a public channel username.
pub fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) if chat_id.starts_with('@') => Recipient::ChannelUsername(chat_id.to_string()),
        Err(_) => Recipient::ChannelUsername(format!("@{chat_id}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_chat_id() {
        assert_eq!(parse_recipient("123456"), Recipient::Id(ChatId(123456)));
        assert_eq!(parse_recipient(" -1001234 "), Recipient::Id(ChatId(-1001234)));
    }

    #[test]
    fn test_channel_username() {
        assert_eq!(
            parse_recipient("@homework_feed"),
            Recipient::ChannelUsername("@homework_feed".to_string())
        );
        assert_eq!(
            parse_recipient("homework_feed"),
            Recipient::ChannelUsername("@homework_feed".to_string())
        );
    }
}
