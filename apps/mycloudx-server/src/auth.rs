//! Shared-token authentication
//!
//! One static secret guards every protected route. Where the caller puts it
//! depends on the route: `/auth` takes a form field, the file routes take a
//! `token` query parameter, and `/upload` reads it out of its multipart body.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Multipart, Query, Request},
    http::{header, request::Parts},
    Form,
};
use serde::Deserialize;

use crate::error::{AppError, Result};

/// Validates presented tokens against the configured secret
#[derive(Clone)]
pub struct AuthGate {
    token: Arc<str>,
}

impl AuthGate {
    pub fn new(token: impl Into<Arc<str>>) -> Self {
        Self { token: token.into() }
    }

    /// Exact string comparison against the configured token
    pub fn validate(&self, presented: &str) -> Result<()> {
        if presented == &*self.token {
            Ok(())
        } else {
            tracing::warn!("Rejected request with invalid token");
            Err(AppError::Unauthorized)
        }
    }

    /// Validate whatever token an extractor pulled out of the request
    pub fn check(&self, source: &impl PresentedToken) -> Result<()> {
        self.validate(source.token())
    }
}

/// A token extracted from some part of a request
pub trait PresentedToken {
    fn token(&self) -> &str;
}

#[derive(Debug, Default, Deserialize)]
struct TokenParams {
    #[serde(default)]
    token: String,
}

/// Token carried in the `token` query parameter
#[derive(Debug, Clone)]
pub struct QueryToken(pub String);

impl PresentedToken for QueryToken {
    fn token(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        // A malformed query string is treated like a missing token
        let params = Query::<TokenParams>::from_request_parts(parts, state)
            .await
            .map(|Query(params)| params)
            .unwrap_or_default();
        Ok(QueryToken(params.token))
    }
}

/// Token carried in a `token` form field, urlencoded or multipart
#[derive(Debug, Clone)]
pub struct FormToken(pub String);

impl PresentedToken for FormToken {
    fn token(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;

            while let Some(field) = multipart.next_field().await? {
                if field.name() == Some("token") {
                    return Ok(FormToken(field.text().await?));
                }
            }
            return Ok(FormToken(String::new()));
        }

        let Form(params) = Form::<TokenParams>::from_request(req, state).await?;
        Ok(FormToken(params.token))
    }
}
