//! Token check endpoint used by the web client to "log in"

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::auth::FormToken;
use crate::error::Result;
use crate::state::AppState;

#[derive(Serialize)]
pub struct AuthResponse {
    pub ok: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/auth", post(authenticate))
}

/// POST /auth
async fn authenticate(State(state): State<AppState>, token: FormToken) -> Result<Json<AuthResponse>> {
    state.auth().check(&token)?;
    Ok(Json(AuthResponse { ok: true }))
}
