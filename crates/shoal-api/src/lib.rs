pub mod auth;
pub mod channels;
pub mod history;
pub mod messages;
pub mod middleware;
pub mod unread;
pub mod view;

use axum::http::StatusCode;
use shoal_db::StoreError;

/// Default HTTP mapping for storage errors. Handlers with a legacy-fixed
/// contract (message append rejects with 403) map their own.
pub(crate) fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Validation(_) => StatusCode::BAD_REQUEST,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Storage(_) | StoreError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
