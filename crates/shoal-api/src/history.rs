use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::error;

use shoal_db::StoreError;
use shoal_types::api::{ChannelView, Claims, HistoryResponse, MessageView};

use crate::auth::AppState;
use crate::view::message_view;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// One page of channel backlog, oldest first within the page, plus channel
/// display metadata. Never touches read state. A non-integer `page` fails
/// query deserialization and surfaces as 400 before reaching this handler.
pub async fn get_history(
    State(state): State<AppState>,
    Path(channel_id): Path<i64>,
    Query(query): Query<HistoryQuery>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let pager = state.pager.clone();
    let db = state.db.clone();
    let page = query.page;

    let (history, channel) = tokio::task::spawn_blocking(move || {
        let history = pager.browse(channel_id, page)?;
        let channel = db
            .get_channel(channel_id)?
            .ok_or(StoreError::NotFound("channel"))?;
        Ok::<_, StoreError>((history, channel))
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .map_err(|e| crate::store_status(&e))?;

    let messages: Vec<MessageView> = history.messages.into_iter().map(message_view).collect();

    Ok(Json(HistoryResponse {
        messages,
        max_page: history.max_page,
        page: history.page,
        channel: ChannelView {
            id: channel.id,
            name: channel.name,
            description: channel.description,
        },
    }))
}
