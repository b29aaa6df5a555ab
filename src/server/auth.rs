//! Optional bearer token authentication.
//!
//! Off by default. When enabled, API routes require
//!
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! and compare the presented token with the configured one in constant time.
//!
//! # Example
//!
//! ```rust
//! use music_api::server::auth::BearerAuth;
//!
//! let auth = BearerAuth::new("my-token");
//! assert!(auth.verify_header(Some("Bearer my-token")).is_ok());
//! assert!(auth.verify_header(Some("Bearer nope")).is_err());
//! ```

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use super::handlers::ErrorResponse;

// =============================================================================
// Types
// =============================================================================

/// Authentication error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header
    MissingToken,

    /// Header present but not in `Bearer <token>` form
    InvalidScheme,

    /// Token does not match
    InvalidToken,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Missing bearer token"),
            AuthError::InvalidScheme => write!(f, "Authorization header must use the Bearer scheme"),
            AuthError::InvalidToken => write!(f, "Invalid bearer token"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let error_type = match &self {
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidScheme => "invalid_scheme",
            AuthError::InvalidToken => "invalid_token",
        };
        let message = self.to_string();

        // A wrong token may be someone guessing
        if self == AuthError::InvalidToken {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Authentication failed: {}",
                message
            );
        } else {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Authentication failed: {}",
                message
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);
        let mut response = (status, Json(error_response)).into_response();
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        response
    }
}

// =============================================================================
// Bearer Authentication
// =============================================================================

/// Verifies bearer tokens against a single configured token.
#[derive(Clone)]
pub struct BearerAuth {
    token: Vec<u8>,
}

impl BearerAuth {
    pub fn new(token: impl AsRef<[u8]>) -> Self {
        Self {
            token: token.as_ref().to_vec(),
        }
    }

    /// Check a raw token.
    pub fn verify(&self, presented: &str) -> Result<(), AuthError> {
        // An empty configured token never authenticates anyone
        if self.token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        if presented.as_bytes().ct_eq(&self.token).into() {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }

    /// Check the value of an Authorization header.
    pub fn verify_header(&self, header: Option<&str>) -> Result<(), AuthError> {
        let header = header.ok_or(AuthError::MissingToken)?.trim();

        let (scheme, token) = header.split_once(' ').ok_or(AuthError::InvalidScheme)?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::InvalidScheme);
        }

        self.verify(token.trim())
    }
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware rejecting requests without a valid bearer token.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, routing::get, Router};
/// use music_api::server::auth::{bearer_auth_middleware, BearerAuth};
///
/// let app = Router::new()
///     .route("/get-songs", get(songs_handler))
///     .layer(middleware::from_fn_with_state(BearerAuth::new("token"), bearer_auth_middleware));
/// ```
pub async fn bearer_auth_middleware(
    State(auth): State<BearerAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::InvalidScheme))
        .transpose()?;

    auth.verify_header(header)?;

    Ok(next.run(request).await)
}

// =============================================================================
// Tests
// =============================================================================
