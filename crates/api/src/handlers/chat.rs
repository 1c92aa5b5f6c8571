//! Handlers for `/chats`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ballie_core::chat::{Chat, ChatCollaborator, ChatMessage, NewMessage};
use ballie_events::{AdminEvent, MutationAction};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/chats
pub async fn list_chats(State(state): State<AppState>) -> AppResult<Json<Vec<Chat>>> {
    Ok(Json(state.stores.chat.list_chats().await?))
}

/// GET /api/v1/chats/{id}/messages
pub async fn messages(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> AppResult<Json<Vec<ChatMessage>>> {
    Ok(Json(state.stores.chat.messages(&chat_id).await?))
}

/// POST /api/v1/chats/{id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    Json(body): Json<NewMessage>,
) -> AppResult<(StatusCode, Json<ChatMessage>)> {
    let sent = state.stores.chat.send_message(&chat_id, &body).await?;
    state.event_bus.publish(
        AdminEvent::mutation(MutationAction::Created, "ChatMessage", sent.id.clone())
            .with_actor(Some(sent.sent_by.clone())),
    );
    Ok((StatusCode::CREATED, Json(sent)))
}
