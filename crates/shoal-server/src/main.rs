use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use shoal_api::auth::{self, AppState, AppStateInner};
use shoal_api::middleware::require_auth;
use shoal_api::{channels, history, messages, unread};
use shoal_feed::{HistoryPager, MessageStore, PollingFeed, ReadStateTracker, UnreadCounter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shoal=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("SHOAL_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("SHOAL_DB_PATH").unwrap_or_else(|_| "shoal.db".into());
    let host = std::env::var("SHOAL_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("SHOAL_PORT")
        .unwrap_or_else(|_| "5000".into())
        .parse()?;

    // Init database
    let db = Arc::new(shoal_db::Database::open(&PathBuf::from(&db_path))?);

    // Core components, each handed its own storage handle
    let store = MessageStore::new(db.clone());
    let tracker = ReadStateTracker::new(db.clone());
    let feed = PollingFeed::new(store.clone(), tracker);
    let unread_counter = UnreadCounter::new(db.clone());
    let pager = HistoryPager::new(store.clone());

    let app_state: AppState = Arc::new(AppStateInner {
        db,
        store,
        feed,
        unread: unread_counter,
        pager,
        jwt_secret,
    });

    // Routes
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .with_state(app_state.clone());

    let protected_routes = Router::new()
        .route("/channels", get(channels::list_channels))
        .route("/channels", post(channels::create_channel))
        .route("/channels/{channel_id}/messages", post(messages::post_message))
        .route("/channels/{channel_id}/messages", get(messages::poll_messages))
        .route("/channels/{channel_id}/history", get(history::get_history))
        .route("/unread", get(unread::unread_all))
        .layer(middleware::from_fn(require_auth))
        .with_state(app_state);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Shoal server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
