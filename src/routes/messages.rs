use crate::api::MessageId;
use serde::{Deserialize, Serialize};

/// A message addressed to the Principal role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageInfo {
    pub message_id: MessageId,
    pub sender: String,
    pub sender_role: String,
    pub body: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Whether the external relay (Telegram) accepted the message.
    pub relayed: bool,
}
