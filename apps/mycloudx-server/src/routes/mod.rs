//! Route modules for MyCloudX Server

pub mod auth;
pub mod files;
pub mod health;
pub mod pages;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = match state.config().upload_limit_bytes() {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    let static_files = ServeDir::new(&state.config().storage.static_dir);

    Router::new()
        .merge(pages::router())
        .merge(auth::router())
        .merge(files::router())
        .merge(health::router())
        .nest_service("/static", static_files)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
