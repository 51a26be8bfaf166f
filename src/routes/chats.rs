//! Messaging routes over the caller's mock inbox.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::auth::AuthUser;
use super::error::ApiError;
use crate::domain::chat::Message;
use crate::services::messaging::ChatSummary;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatQuery {
    search: Option<String>,
}

#[derive(Deserialize)]
pub struct SendRequest {
    content: String,
}

#[derive(Serialize)]
pub struct ReadResponse {
    updated: usize,
}

/// `GET /api/chats?search=` — inbox, most recent first.
pub async fn list(State(state): State<AppState>, auth: AuthUser, Query(query): Query<ChatQuery>) -> Json<Vec<ChatSummary>> {
    let sessions = state.sessions.clone();
    Json(state.messaging.list_chats(auth.user.id, query.search.as_deref(), |id| {
        sessions.user(id).map(|u| u.display_name().to_owned())
    }))
}

/// `GET /api/chats/{id}/messages`
pub async fn messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(state.messaging.messages(auth.user.id, chat_id)?))
}

/// `POST /api/chats/{id}/messages`
pub async fn send(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<Uuid>,
    Json(body): Json<SendRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let message = state
        .messaging
        .send(auth.user.id, chat_id, &body.content, OffsetDateTime::now_utc())?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// `POST /api/chats/{id}/read`
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<ReadResponse>, ApiError> {
    let updated = state.messaging.mark_read(auth.user.id, chat_id)?;
    Ok(Json(ReadResponse { updated }))
}

#[cfg(test)]
#[path = "chats_test.rs"]
mod tests;
