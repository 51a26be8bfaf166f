//! Direct-message chats between two users.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: Uuid,
    pub participant_ids: [Uuid; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Chat {
    #[must_use]
    pub fn includes(&self, user_id: Uuid) -> bool {
        self.participant_ids.contains(&user_id)
    }

    /// The participant that is not `user_id`, if `user_id` is in the chat.
    #[must_use]
    pub fn other_participant(&self, user_id: Uuid) -> Option<Uuid> {
        match self.participant_ids {
            [a, b] if a == user_id => Some(b),
            [a, b] if b == user_id => Some(a),
            _ => None,
        }
    }
}
