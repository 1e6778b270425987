use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;

use shoal_types::api::{Claims, UnreadEntry};

use crate::auth::AppState;

/// Per-channel unread badges for the authenticated user. Polled at high
/// frequency by clients, so the handler is a single fixed-shape query plan.
pub async fn unread_all(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let unread = state.unread.clone();
    let user_id = claims.sub;

    let counts = tokio::task::spawn_blocking(move || unread.unread_all(user_id))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| crate::store_status(&e))?;

    let entries: Vec<UnreadEntry> = counts
        .into_iter()
        .map(|(channel_id, unread)| UnreadEntry { channel_id, unread })
        .collect();
    Ok(Json(entries))
}
