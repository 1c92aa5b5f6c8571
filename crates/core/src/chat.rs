//! Support chat threads between users and admins.
//!
//! Chats carry a denormalized summary of their latest message so the thread
//! list can be rendered without reading every message.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{RowId, Timestamp};
use crate::validation::FieldErrors;

pub const ENTITY: &str = "Chat";

/// Name shown for a chat that was created without one.
pub const DEFAULT_CHAT_NAME: &str = "Chat";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    #[serde(rename = "_id")]
    pub id: RowId,
    #[serde(default = "default_chat_name")]
    pub chat_name: String,
    #[serde(default)]
    pub chat_image: Option<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_message_time: Option<Timestamp>,
}

fn default_chat_name() -> String {
    DEFAULT_CHAT_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub url: String,
    pub name: String,
    /// MIME type.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Bytes.
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(rename = "_id")]
    pub id: RowId,
    pub chat_id: RowId,
    #[serde(default)]
    pub text_message: String,
    pub sent_by: String,
    pub sender_name: String,
    #[serde(default)]
    pub sender_profile_image: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub admin_name: Option<String>,
    #[serde(default)]
    pub attachment: Option<Attachment>,
    pub sent_at: Timestamp,
}

/// Body of a message send.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewMessage {
    pub text_message: String,
    pub sent_by: String,
    pub sender_name: String,
    pub sender_profile_image: Option<String>,
    pub is_admin: bool,
    pub admin_name: Option<String>,
    pub attachment: Option<Attachment>,
}

impl NewMessage {
    /// A message needs text or an attachment, and a sender.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        if self.text_message.trim().is_empty() && self.attachment.is_none() {
            errors.insert("textMessage", "Type a message or attach a file");
        }
        if self.sent_by.trim().is_empty() {
            errors.insert("sentBy", "Sender is required");
        }
        if let Some(attachment) = &self.attachment {
            if attachment.url.trim().is_empty() {
                errors.insert("attachment", "Attachment URL is required");
            }
        }
        errors.into_result()
    }

    /// The stored message. Text is trimmed.
    pub fn into_message(self, id: RowId, chat_id: RowId, now: Timestamp) -> ChatMessage {
        ChatMessage {
            id,
            chat_id,
            text_message: self.text_message.trim().to_string(),
            sent_by: self.sent_by,
            sender_name: self.sender_name,
            sender_profile_image: self.sender_profile_image,
            is_admin: self.is_admin,
            admin_name: self.admin_name,
            attachment: self.attachment,
            sent_at: now,
        }
    }
}

/// Thread-list preview of a message: the attachment name with a paperclip,
/// else the text, else a generic label.
pub fn preview(message: &ChatMessage) -> String {
    match &message.attachment {
        Some(attachment) => format!("📎 {}", attachment.name),
        None if !message.text_message.is_empty() => message.text_message.clone(),
        None => "Attachment".to_string(),
    }
}

impl Chat {
    /// Record `message` as the latest in this chat.
    pub fn touch(&mut self, message: &ChatMessage) {
        self.last_message = Some(preview(message));
        self.last_message_time = Some(message.sent_at);
    }
}

/// Most recently active first; chats with no messages last.
pub fn sort_chats(chats: &mut [Chat]) {
    chats.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
}

/// Oldest first.
pub fn sort_messages(messages: &mut [ChatMessage]) {
    messages.sort_by_key(|m| m.sent_at);
}

/// Where chat threads live.
#[async_trait]
pub trait ChatCollaborator: Send + Sync {
    /// Every chat, most recently active first.
    async fn list_chats(&self) -> Result<Vec<Chat>, CoreError>;

    /// Messages of one chat, oldest first.
    async fn messages(&self, chat_id: &str) -> Result<Vec<ChatMessage>, CoreError>;

    /// Append a message and update the chat's summary.
    async fn send_message(&self, chat_id: &str, message: &NewMessage)
        -> Result<ChatMessage, CoreError>;
}
