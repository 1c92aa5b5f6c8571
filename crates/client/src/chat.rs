//! REST client for the `/chats` endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use ballie_core::chat::{self, Chat, ChatCollaborator, ChatMessage, NewMessage};
use ballie_core::error::CoreError;

use crate::error::ClientError;
use crate::http::{parse_base_url, parse_response};

#[derive(Debug, Clone)]
pub struct HttpChat {
    client: Client,
    base_url: Url,
}

impl HttpChat {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, parse_base_url(api_url)?))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// `{base}/api/v1/chats[/{id}/messages]`, with `id` percent-encoded.
    pub fn url(&self, chat_id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "v1", "chats"]);
            if let Some(id) = chat_id {
                segments.extend([id, "messages"]);
            }
        }
        url
    }
}

fn fail(error: ClientError, op: &str, chat_id: &str) -> CoreError {
    tracing::warn!(op, chat_id, error = %error, "Chat call failed");
    error.into_core(chat::ENTITY, chat_id)
}

#[async_trait]
impl ChatCollaborator for HttpChat {
    async fn list_chats(&self) -> Result<Vec<Chat>, CoreError> {
        let result: Result<Vec<Chat>, ClientError> = async {
            let response = self.client.get(self.url(None)).send().await?;
            parse_response(response).await
        }
        .await;
        result.map_err(|e| fail(e, "list_chats", ""))
    }

    async fn messages(&self, chat_id: &str) -> Result<Vec<ChatMessage>, CoreError> {
        let result: Result<Vec<ChatMessage>, ClientError> = async {
            let response = self.client.get(self.url(Some(chat_id))).send().await?;
            parse_response(response).await
        }
        .await;
        result.map_err(|e| fail(e, "messages", chat_id))
    }

    async fn send_message(
        &self,
        chat_id: &str,
        message: &NewMessage,
    ) -> Result<ChatMessage, CoreError> {
        let result: Result<ChatMessage, ClientError> = async {
            let response = self
                .client
                .post(self.url(Some(chat_id)))
                .json(message)
                .send()
                .await?;
            parse_response(response).await
        }
        .await;
        result.map_err(|e| fail(e, "send_message", chat_id))
    }
}
