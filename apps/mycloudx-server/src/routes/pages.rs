//! HTML pages: the web client and the QR onboarding page

use axum::{extract::State, response::Html, routing::get, Router};

use crate::error::{AppError, Result};
use crate::qr;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/qr", get(qr_page))
}

/// GET /
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /qr
async fn qr_page(State(state): State<AppState>) -> Result<Html<String>> {
    let page = qr::render_qr_page(state.public_url())
        .map_err(|e| AppError::Internal(format!("QR generation failed: {}", e)))?;
    Ok(Html(page))
}
