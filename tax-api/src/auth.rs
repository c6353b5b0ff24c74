//! HTTP Basic authentication for the `/admin` routes.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// The single username/password pair allowed to change deductions.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(
        username: &str,
        password: &str,
    ) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn matches(
        &self,
        username: &str,
        password: &str,
    ) -> bool {
        self.username == username && self.password == password
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Decodes `Authorization: Basic <base64(user:pass)>`.
///
/// Returns `None` for a missing header, another scheme, bad base64, non UTF-8
/// content, or a payload without a `:`.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Middleware rejecting any request without the configured admin credentials.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match basic_credentials(req.headers()) {
        Some((username, password)) if state.admin.matches(&username, &password) => {
            next.run(req).await
        }
        attempt => {
            warn!(
                path = %req.uri().path(),
                username = attempt.as_ref().map(|(u, _)| u.as_str()).unwrap_or("-"),
                "rejected admin request"
            );
            ApiError::Unauthorized.into_response()
        }
    }
}
