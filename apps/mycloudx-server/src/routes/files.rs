//! File API endpoints
//!
//! - POST /upload - Store a file (multipart `token` + `file`)
//! - GET /list - List stored filenames
//! - GET /download/:name - Stream a stored file
//! - DELETE /delete/:name - Remove a stored file
//!
//! Every handler validates the shared token before touching storage.

use std::io;

use axum::{
    body::{Body, Bytes},
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::{delete, get, post},
    Json, Router,
};
use futures::{stream, StreamExt, TryStreamExt};
use serde::Serialize;

use crate::auth::QueryToken;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub files: Vec<String>,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: String,
}

/// Create the files router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_file))
        .route("/list", get(list_files))
        .route("/download/:name", get(download_file))
        .route("/delete/:name", delete(delete_file))
}

/// POST /upload
///
/// The `token` and `file` fields may arrive in either order. A file that
/// shows up before the token is held in memory until the token checks out;
/// otherwise it is streamed straight to disk. Authorization is decided by
/// the first `token` field; later ones are ignored.
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut authorized = false;
    let mut pending: Option<(String, Bytes)> = None;
    let mut stored: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "token" if !authorized => {
                let token = field.text().await?;
                state.auth().validate(&token)?;
                authorized = true;

                if let Some((name, data)) = pending.take() {
                    let content = stream::once(async move { Ok::<_, io::Error>(data) }).boxed();
                    stored = Some(state.store().write(&name, content).await?);
                }
            }
            "file" if stored.is_none() && pending.is_none() => {
                let name = field.file_name().unwrap_or_default().to_string();

                if authorized {
                    let content = field.map_err(io::Error::other).boxed();
                    stored = Some(state.store().write(&name, content).await?);
                } else {
                    pending = Some((name, field.bytes().await?));
                }
            }
            _ => {}
        }
    }

    if !authorized {
        return Err(AppError::Unauthorized);
    }

    let filename =
        stored.ok_or_else(|| AppError::BadRequest("Missing file field".to_string()))?;

    tracing::info!(filename = %filename, "File uploaded");

    Ok(Json(UploadResponse {
        filename,
        status: "uploaded",
    }))
}

/// GET /list
async fn list_files(State(state): State<AppState>, token: QueryToken) -> Result<Json<ListResponse>> {
    state.auth().check(&token)?;

    let files = state.store().list().await?;

    Ok(Json(ListResponse { files }))
}

/// GET /download/:name
async fn download_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
    token: QueryToken,
) -> Result<Response> {
    state.auth().check(&token)?;

    let file = state.store().read(&name).await?;
    let content_type = mime_guess::from_path(&name).first_or_octet_stream();

    tracing::debug!(filename = %name, size = file.size, "Serving download");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(header::CONTENT_LENGTH, file.size)
        .header(header::CONTENT_DISPOSITION, content_disposition(&name))
        .body(Body::from_stream(file.stream))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// DELETE /delete/:name
async fn delete_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
    token: QueryToken,
) -> Result<Json<DeleteResponse>> {
    state.auth().check(&token)?;

    state.store().delete(&name).await?;

    tracing::info!(filename = %name, "File deleted");

    Ok(Json(DeleteResponse { deleted: name }))
}

/// `attachment` disposition naming the file.
///
/// Plain ASCII names go in a quoted `filename`. Anything else gets an ASCII
/// fallback in `filename` plus the exact name as an RFC 5987 `filename*`.
fn content_disposition(name: &str) -> String {
    let is_plain = |c: char| c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\';

    if name.chars().all(is_plain) {
        return format!("attachment; filename=\"{}\"", name);
    }

    let fallback: String = name
        .chars()
        .map(|c| if is_plain(c) { c } else { '_' })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=utf-8''{}",
        fallback,
        urlencoding::encode(name)
    )
}
