use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;

use shoal_types::api::{Claims, CreateChannelRequest, CreateChannelResponse};
use shoal_types::models::Channel;

use crate::auth::AppState;

/// Channel directory: every channel with its cached message count.
pub async fn list_channels(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let db = state.db.clone();

    let rows = tokio::task::spawn_blocking(move || db.list_channels())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| crate::store_status(&e))?;

    let channels: Vec<Channel> = rows
        .into_iter()
        .map(|row| Channel {
            id: row.id,
            name: row.name,
            description: row.description,
            message_count: row.message_count,
        })
        .collect();
    Ok(Json(channels))
}

pub async fn create_channel(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
    Json(req): Json<CreateChannelRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let (Some(name), Some(description)) = (req.name, req.description) else {
        return Err(StatusCode::BAD_REQUEST);
    };
    if name.is_empty() || description.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let db = state.db.clone();
    let channel_id = tokio::task::spawn_blocking(move || db.create_channel(&name, &description))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| crate::store_status(&e))?;

    Ok((StatusCode::CREATED, Json(CreateChannelResponse { channel_id })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shoal_db::Database;
    use shoal_feed::{HistoryPager, MessageStore, PollingFeed, ReadStateTracker, UnreadCounter};
    use shoal_types::api::Claims;

    use super::*;
    use crate::auth::AppStateInner;

    fn test_state() -> AppState {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let store = MessageStore::new(db.clone());
        let tracker = ReadStateTracker::new(db.clone());
        Arc::new(AppStateInner {
            db: db.clone(),
            store: store.clone(),
            feed: PollingFeed::new(store.clone(), tracker),
            unread: UnreadCounter::new(db.clone()),
            pager: HistoryPager::new(store),
            jwt_secret: "test-secret".into(),
        })
    }

    fn claims() -> Claims {
        Claims {
            sub: 1,
            name: "alice".into(),
            exp: 0,
        }
    }

    #[tokio::test]
    async fn body_without_description_is_bad_request() {
        let state = test_state();
        let req: CreateChannelRequest = serde_json::from_str(r#"{"name":"random"}"#).unwrap();

        let status = create_channel(State(state), Extension(claims()), Json(req))
            .await
            .err()
            .unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn created_channel_lands_in_the_directory() {
        let state = test_state();
        let req = CreateChannelRequest {
            name: Some("random".into()),
            description: Some("off topic".into()),
        };

        create_channel(State(state.clone()), Extension(claims()), Json(req))
            .await
            .map_err(|s| s.to_string())
            .unwrap();

        let names: Vec<String> = state
            .db
            .list_channels()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["general", "random"]);
    }
}
