//! HTTP request handlers for the music API.
//!
//! # Endpoints
//!
//! - `GET /greet/{name}` - Greeting plus configured connection strings (diagnostic)
//! - `GET /get-songs` - Full song listing with signed URLs
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::blob::UrlSigner;
use crate::error::{ListingError, SigningError, StoreError};
use crate::listing::SongListingService;
use crate::song::SongView;
use crate::store::SongStore;

// =============================================================================
// Application State
// =============================================================================

/// Connection strings echoed by the greeting endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub database: String,
    pub blob_storage: String,
}

impl ConnectionInfo {
    pub fn new(database: impl Into<String>, blob_storage: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            blob_storage: blob_storage.into(),
        }
    }
}

/// Shared application state.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<St, Sg> {
    /// Service that assembles the song listing
    pub listing: Arc<SongListingService<St, Sg>>,

    /// Configured connection strings
    pub connection_info: Arc<ConnectionInfo>,
}

impl<St, Sg> AppState<St, Sg> {
    pub fn new(listing: SongListingService<St, Sg>, connection_info: ConnectionInfo) -> Self {
        Self {
            listing: Arc::new(listing),
            connection_info: Arc::new(connection_info),
        }
    }
}

impl<St, Sg> Clone for AppState<St, Sg> {
    fn clone(&self) -> Self {
        Self {
            listing: Arc::clone(&self.listing),
            connection_info: Arc::clone(&self.connection_info),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "missing_token")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status: u16,
}

impl ErrorResponse {
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

/// Response from the greeting endpoint.
#[derive(Debug, Serialize)]
pub struct GreetResponse {
    pub greeting: String,

    #[serde(rename = "dbConnectionInfo")]
    pub db_connection_info: String,

    #[serde(rename = "blobConnectionInfo")]
    pub blob_connection_info: String,
}

/// Response from the song listing endpoint.
#[derive(Debug, Serialize)]
pub struct SongsResponse {
    pub songs: Vec<SongView>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Listing failures are reported as a bare 500.
///
/// Store and signing failures are indistinguishable to the caller; the cause
/// only goes to the log.
impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        let error_type = match &self {
            ListingError::Store(StoreError::Unavailable(_)) => "store_unavailable",
            ListingError::Store(StoreError::Query(_)) => "query_error",
            ListingError::Signing(SigningError::Unavailable) => "signing_unavailable",
            ListingError::Signing(SigningError::InvalidConnectionString(_)) => {
                "invalid_blob_connection"
            }
            ListingError::Signing(SigningError::Record { .. }) => "record_signing_failure",
        };

        error!(
            error_type = error_type,
            status = StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            "Song listing failed: {}",
            self
        );

        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle greeting requests.
///
/// # Endpoint
///
/// `GET /greet/{name}`
///
/// The name is used as-is. The response echoes both configured connection
/// strings, so this route is for diagnostics only.
///
/// # Response
///
/// ```json
/// {
///   "greeting": "Hello Ada",
///   "dbConnectionInfo": "Host=...",
///   "blobConnectionInfo": "DefaultEndpointsProtocol=..."
/// }
/// ```
pub async fn greet_handler<St, Sg>(
    State(state): State<AppState<St, Sg>>,
    Path(name): Path<String>,
) -> Json<GreetResponse> {
    debug!(name = %name, "Greeting");

    Json(GreetResponse {
        greeting: format!("Hello {}", name),
        db_connection_info: state.connection_info.database.clone(),
        blob_connection_info: state.connection_info.blob_storage.clone(),
    })
}

/// Handle song listing requests.
///
/// # Endpoint
///
/// `GET /get-songs`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "songs": [
///     { "id": 1, "title": "A", "artist": "...", "album": "...", "duration": 180,
///       "url": "https://account.blob.core.windows.net/music/a.mp3?sv=...&sig=..." }
///   ]
/// }
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: empty body, on any store or signing failure
pub async fn songs_handler<St, Sg>(
    State(state): State<AppState<St, Sg>>,
) -> Result<Json<SongsResponse>, ListingError>
where
    St: SongStore,
    Sg: UrlSigner,
{
    let songs = state.listing.list_songs().await?;
    Ok(Json(SongsResponse { songs }))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
