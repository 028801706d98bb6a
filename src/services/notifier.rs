//! Outbound message relay.
//!
//! Messages to the Principal are stored first and relayed second; a relay
//! failure is logged, never surfaced to the sender. The Telegram Bot API is
//! the one concrete relay target; everything behind the [`Notifier`] trait.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::db::models::PrincipalMessage;

/// Relay boundary for stored messages. Returns whether the message was
/// actually delivered to an external channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn relay(&self, message: &PrincipalMessage) -> anyhow::Result<bool>;
}

/// Relay that drops messages, used when no Telegram credentials are
/// configured.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn relay(&self, message: &PrincipalMessage) -> anyhow::Result<bool> {
        debug!(message_id = %message.id, "no notifier configured; message stored only");
        Ok(false)
    }
}

#[derive(Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: String,
}

/// Telegram Bot API relay.
pub struct TelegramNotifier {
    client: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn relay(&self, message: &PrincipalMessage) -> anyhow::Result<bool> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let body = SendMessageBody {
            chat_id: &self.chat_id,
            text: format!(
                "[{}] {}: {}",
                message.sender_role, message.sender, message.body
            ),
        };
        self.client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MessageId;

    #[tokio::test]
    async fn test_null_notifier_accepts_everything() {
        let message = PrincipalMessage {
            id: MessageId::new(1),
            sender: "asha".to_string(),
            sender_role: "student".to_string(),
            body: "hello".to_string(),
            created_at: chrono::Utc::now(),
            relayed: false,
        };
        assert_eq!(NullNotifier.relay(&message).await.unwrap(), false);
    }
}
