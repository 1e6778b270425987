use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::error;

use shoal_db::StoreError;
use shoal_types::api::{Claims, MessageView, PostMessageRequest};

use crate::auth::AppState;
use crate::view::message_view;

#[derive(Debug, Deserialize)]
pub struct PollQuery {
    #[serde(default)]
    pub last_message_id: i64,
}

/// Append a message to a channel. Replies 204 with no body; the new id is
/// observable through the next poll. The legacy wire contract rejects a
/// missing or empty field with 403 rather than 400.
pub async fn post_message(
    State(state): State<AppState>,
    Path(channel_id): Path<i64>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<PostMessageRequest>,
) -> Result<StatusCode, StatusCode> {
    let Some(message) = req.message else {
        return Err(StatusCode::FORBIDDEN);
    };

    // Run blocking DB work off the async runtime
    let store = state.store.clone();
    let author_id = claims.sub;
    let result = tokio::task::spawn_blocking(move || {
        store.append(channel_id, author_id, &message)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match result {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::Validation(_) | StoreError::NotFound(_)) => Err(StatusCode::FORBIDDEN),
        Err(e) => {
            error!("append failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Polling feed: everything newer than `last_message_id`, oldest first.
/// Advances the caller's read pointer as a side effect.
pub async fn poll_messages(
    State(state): State<AppState>,
    Path(channel_id): Path<i64>,
    Query(query): Query<PollQuery>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let feed = state.feed.clone();
    let user_id = claims.sub;
    let last_message_id = query.last_message_id;

    let rows = tokio::task::spawn_blocking(move || feed.fetch(user_id, channel_id, last_message_id))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| crate::store_status(&e))?;

    let messages: Vec<MessageView> = rows.into_iter().map(message_view).collect();
    Ok(Json(messages))
}
