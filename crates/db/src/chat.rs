//! Chat threads held in memory.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use ballie_core::chat::{self, Chat, ChatCollaborator, ChatMessage, NewMessage};
use ballie_core::error::CoreError;

#[derive(Default)]
struct Threads {
    chats: Vec<Chat>,
    messages: HashMap<String, Vec<ChatMessage>>,
}

#[derive(Default)]
pub struct ChatStore {
    threads: RwLock<Threads>,
}

impl ChatStore {
    /// Load chats and messages. Each chat's summary is recomputed from its
    /// newest message.
    pub fn with_threads(chats: Vec<Chat>, messages: Vec<ChatMessage>) -> Self {
        let mut threads = Threads {
            chats,
            messages: HashMap::new(),
        };
        for message in messages {
            threads
                .messages
                .entry(message.chat_id.clone())
                .or_default()
                .push(message);
        }
        for (chat_id, thread) in threads.messages.iter_mut() {
            chat::sort_messages(thread);
            let newest = thread.last();
            if let (Some(chat), Some(newest)) = (
                threads.chats.iter_mut().find(|c| &c.id == chat_id),
                newest,
            ) {
                chat.touch(newest);
            }
        }
        Self {
            threads: RwLock::new(threads),
        }
    }

    pub async fn len(&self) -> usize {
        self.threads.read().await.chats.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ChatCollaborator for ChatStore {
    async fn list_chats(&self) -> Result<Vec<Chat>, CoreError> {
        let mut chats = self.threads.read().await.chats.clone();
        chat::sort_chats(&mut chats);
        Ok(chats)
    }

    async fn messages(&self, chat_id: &str) -> Result<Vec<ChatMessage>, CoreError> {
        let threads = self.threads.read().await;
        if !threads.chats.iter().any(|c| c.id == chat_id) {
            return Err(CoreError::not_found(chat::ENTITY, chat_id));
        }
        Ok(threads.messages.get(chat_id).cloned().unwrap_or_default())
    }

    async fn send_message(
        &self,
        chat_id: &str,
        message: &NewMessage,
    ) -> Result<ChatMessage, CoreError> {
        message.validate()?;

        let mut threads = self.threads.write().await;
        let chat = threads
            .chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or_else(|| CoreError::not_found(chat::ENTITY, chat_id))?;

        let sent = message.clone().into_message(
            uuid::Uuid::new_v4().to_string(),
            chat_id.to_string(),
            Utc::now(),
        );
        chat.touch(&sent);
        threads
            .messages
            .entry(chat_id.to_string())
            .or_default()
            .push(sent.clone());
        tracing::debug!(chat_id, id = %sent.id, is_admin = sent.is_admin, "Message sent");
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use ballie_core::chat::Attachment;
    use chrono::Duration;

    fn chat(id: &str) -> Chat {
        Chat {
            id: id.into(),
            chat_name: format!("Chat {id}"),
            chat_image: None,
            last_message: None,
            last_message_time: None,
        }
    }

    fn message(chat_id: &str, id: &str, mins_ago: i64, text: &str) -> ChatMessage {
        ChatMessage {
            id: id.into(),
            chat_id: chat_id.into(),
            text_message: text.into(),
            sent_by: "u1".into(),
            sender_name: "Fan".into(),
            sender_profile_image: None,
            is_admin: false,
            admin_name: None,
            attachment: None,
            sent_at: Utc::now() - Duration::minutes(mins_ago),
        }
    }

    fn reply(text: &str) -> NewMessage {
        NewMessage {
            text_message: text.into(),
            sent_by: "admin-1".into(),
            sender_name: "Support".into(),
            is_admin: true,
            admin_name: Some("Jess".into()),
            ..NewMessage::default()
        }
    }

    fn store() -> ChatStore {
        ChatStore::with_threads(
            vec![chat("a"), chat("b"), chat("c")],
            vec![
                message("a", "a2", 30, "second"),
                message("a", "a1", 50, "first"),
                message("b", "b1", 5, "hello"),
            ],
        )
    }

    #[tokio::test]
    async fn loading_recomputes_summaries() {
        let chats = store().list_chats().await.unwrap();
        let ids: Vec<_> = chats.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
        assert_eq!(chats[1].last_message.as_deref(), Some("second"));
        assert!(chats[2].last_message.is_none());
    }

    #[tokio::test]
    async fn messages_are_oldest_first() {
        let messages = store().messages("a").await.unwrap();
        let ids: Vec<_> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a1", "a2"]);
        assert!(store().messages("c").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_chat_is_not_found() {
        let store = store();
        assert_matches!(store.messages("zz").await, Err(CoreError::NotFound { .. }));
        assert_matches!(
            store.send_message("zz", &reply("hi")).await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn sending_appends_and_moves_chat_to_top() {
        let store = store();
        let sent = store.send_message("c", &reply("  we are on it ")).await.unwrap();
        assert_eq!(sent.text_message, "we are on it");
        assert_eq!(sent.chat_id, "c");

        let chats = store.list_chats().await.unwrap();
        assert_eq!(chats[0].id, "c");
        assert_eq!(chats[0].last_message.as_deref(), Some("we are on it"));
        assert_eq!(chats[0].last_message_time, Some(sent.sent_at));
        assert_eq!(store.messages("c").await.unwrap(), vec![sent]);
    }

    #[tokio::test]
    async fn attachment_sets_paperclip_summary() {
        let store = store();
        let with_file = NewMessage {
            attachment: Some(Attachment {
                url: "https://files.test/lineup.png".into(),
                name: "lineup.png".into(),
                content_type: "image/png".into(),
                size: 1024,
            }),
            ..reply("")
        };
        store.send_message("a", &with_file).await.unwrap();
        let chats = store.list_chats().await.unwrap();
        assert_eq!(chats[0].last_message.as_deref(), Some("📎 lineup.png"));
    }

    #[tokio::test]
    async fn empty_message_is_rejected_and_not_stored() {
        let store = store();
        let result = store.send_message("a", &reply(" ")).await;
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(store.messages("a").await.unwrap().len(), 2);
    }
}
