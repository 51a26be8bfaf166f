//! Mock direct messaging.
//!
//! Each user gets an inbox seeded from the demo conversations the first time
//! it is touched. Inboxes live only in process memory and are never
//! persisted. There is no delivery to the other participant.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::domain::chat::{Chat, Message};
use crate::domain::validation::ValidationErrors;
use crate::services::fixtures;

#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    #[error("chat not found: {0}")]
    ChatNotFound(Uuid),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl crate::error::ErrorCode for MessagingError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ChatNotFound(_) => "E_CHAT_NOT_FOUND",
            Self::Validation(_) => "E_VALIDATION",
        }
    }
}

/// A chat as listed in the inbox, with the other side's display name resolved.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    #[serde(flatten)]
    pub chat: Chat,
    pub other_participant_id: Uuid,
    pub other_participant_name: String,
    pub unread: usize,
}

#[derive(Default)]
struct Inbox {
    /// Most recently updated first.
    chats: Vec<Chat>,
    messages: HashMap<Uuid, Vec<Message>>,
}

impl Inbox {
    fn seeded(me: Uuid, now: OffsetDateTime) -> Self {
        let mut inbox = Self::default();
        for (chat, history) in fixtures::chats(me, now) {
            inbox.messages.insert(chat.id, history);
            inbox.chats.push(chat);
        }
        inbox.sort();
        inbox
    }

    fn sort(&mut self) {
        self.chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    }
}

/// Fallback label for a participant missing from the user directory.
fn anonymous_name(user_id: Uuid) -> String {
    let simple = user_id.simple().to_string();
    format!("User {}", &simple[simple.len() - 4..])
}

#[derive(Clone, Default)]
pub struct MessagingStore {
    inboxes: Arc<RwLock<HashMap<Uuid, Inbox>>>,
}

impl MessagingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_inbox<T>(&self, me: Uuid, f: impl FnOnce(&mut Inbox) -> T) -> T {
        let mut inboxes = self.inboxes.write().unwrap_or_else(PoisonError::into_inner);
        let inbox = inboxes
            .entry(me)
            .or_insert_with(|| Inbox::seeded(me, OffsetDateTime::now_utc()));
        f(inbox)
    }

    /// Chats of `me`, newest first, optionally narrowed to participants whose
    /// display name contains `search` (case-insensitive).
    pub fn list_chats(
        &self,
        me: Uuid,
        search: Option<&str>,
        display_name: impl Fn(Uuid) -> Option<String>,
    ) -> Vec<ChatSummary> {
        let needle = search.map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase);
        self.with_inbox(me, |inbox| {
            inbox
                .chats
                .iter()
                .filter_map(|chat| {
                    let other = chat.other_participant(me)?;
                    let name = display_name(other).unwrap_or_else(|| anonymous_name(other));
                    if let Some(needle) = &needle {
                        if !name.to_lowercase().contains(needle.as_str()) {
                            return None;
                        }
                    }
                    let unread = inbox
                        .messages
                        .get(&chat.id)
                        .map_or(0, |history| history.iter().filter(|m| m.receiver_id == me && !m.read).count());
                    Some(ChatSummary {
                        chat: chat.clone(),
                        other_participant_id: other,
                        other_participant_name: name,
                        unread,
                    })
                })
                .collect()
        })
    }

    /// # Errors
    ///
    /// `ChatNotFound` if `chat_id` is not in `me`'s inbox.
    pub fn messages(&self, me: Uuid, chat_id: Uuid) -> Result<Vec<Message>, MessagingError> {
        self.with_inbox(me, |inbox| inbox.messages.get(&chat_id).cloned())
            .ok_or(MessagingError::ChatNotFound(chat_id))
    }

    /// Append a message from `me` and move the chat to the top of the inbox.
    ///
    /// # Errors
    ///
    /// `ChatNotFound` for an unknown chat, `Validation` for blank content.
    pub fn send(&self, me: Uuid, chat_id: Uuid, content: &str, now: OffsetDateTime) -> Result<Message, MessagingError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationErrors::single("content", "Message cannot be empty.").into());
        }

        let message = self.with_inbox(me, |inbox| {
            let chat = inbox.chats.iter_mut().find(|c| c.id == chat_id)?;
            let receiver_id = chat.other_participant(me)?;
            let message = Message {
                id: Uuid::new_v4(),
                chat_id,
                sender_id: me,
                receiver_id,
                content: content.to_owned(),
                timestamp: now,
                read: false,
            };
            chat.last_message = Some(message.clone());
            chat.updated_at = now;
            inbox.messages.entry(chat_id).or_default().push(message.clone());
            inbox.sort();
            Some(message)
        });

        let message = message.ok_or(MessagingError::ChatNotFound(chat_id))?;
        info!(user_id = %me, %chat_id, message_id = %message.id, "messaging: sent");
        Ok(message)
    }

    /// Mark every message addressed to `me` in the chat as read. Returns how
    /// many changed.
    ///
    /// # Errors
    ///
    /// `ChatNotFound` for an unknown chat.
    pub fn mark_read(&self, me: Uuid, chat_id: Uuid) -> Result<usize, MessagingError> {
        self.with_inbox(me, |inbox| {
            let history = inbox.messages.get_mut(&chat_id)?;
            let mut changed = 0;
            for message in history.iter_mut().filter(|m| m.receiver_id == me && !m.read) {
                message.read = true;
                changed += 1;
            }
            if let Some(last) = inbox
                .chats
                .iter_mut()
                .find(|c| c.id == chat_id)
                .and_then(|c| c.last_message.as_mut())
            {
                if last.receiver_id == me {
                    last.read = true;
                }
            }
            Some(changed)
        })
        .ok_or(MessagingError::ChatNotFound(chat_id))
    }
}

#[cfg(test)]
#[path = "messaging_test.rs"]
mod tests;
