//! Health check endpoint
//!
//! Reports whether the upload root is still a reachable directory, since
//! every file operation depends on it.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub upload_dir: String,
    pub upload_dir_ok: bool,
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let root = state.store().root();

    let upload_dir_ok = match tokio::fs::metadata(root).await {
        Ok(meta) => meta.is_dir(),
        Err(e) => {
            tracing::warn!("Upload directory {} unreachable: {}", root.display(), e);
            false
        }
    };

    let (code, status) = if upload_dir_ok {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            upload_dir: root.display().to_string(),
            upload_dir_ok,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
