//! Chat endpoints
//!
//! Read-only surface: the chat list, the message history of one chat, and
//! the viewer-wide unread total. Push notifications never carry chat data;
//! they only prompt refetches through these endpoints.

use crate::{
    client::ApiClient,
    error::ApiError,
    types::{Chat, ChatId, Message, UnreadCount},
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessagesQuery<'a> {
    chat_id: &'a ChatId,
}

impl ApiClient {
    /// List all chats for the authenticated performer
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn list_chats(&self) -> Result<Vec<Chat>, ApiError> {
        self.get("/api/performer/chat/get-all-chats").await
    }

    /// Fetch the message history of one chat
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn chat_messages(&self, chat_id: &ChatId) -> Result<Vec<Message>, ApiError> {
        self.get_with_query(
            "/api/performer/chat/get-chat-messages",
            &MessagesQuery { chat_id },
        )
        .await
    }

    /// Fetch the viewer-wide unread message total
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn unread_count(&self) -> Result<UnreadCount, ApiError> {
        self.get("/api/performer/chat/get-total-unread-count").await
    }
}
