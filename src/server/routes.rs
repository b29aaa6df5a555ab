//! Router configuration for the music API.
//!
//! # Route Structure
//!
//! ```text
//! /health          - Health check (always public)
//! /greet/{name}    - Greeting + connection strings (protected when auth is on)
//! /get-songs       - Song listing (protected when auth is on)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use music_api::server::{create_router, ConnectionInfo, RouterConfig};
//!
//! let config = RouterConfig::without_auth()
//!     .with_cors_origins(vec!["https://player.example.com".to_string()]);
//!
//! let router = create_router(listing, ConnectionInfo::new(db, blob), config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::{bearer_auth_middleware, BearerAuth};
use super::handlers::{greet_handler, health_handler, songs_handler, AppState, ConnectionInfo};
use crate::blob::UrlSigner;
use crate::listing::SongListingService;
use crate::store::SongStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Bearer token accepted when authentication is enabled
    pub auth_token: String,

    /// Whether API routes require a bearer token
    pub auth_enabled: bool,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a configuration requiring the given bearer token.
    ///
    /// CORS allows any origin and tracing is enabled.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            auth_enabled: true,
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Create a configuration with authentication disabled.
    ///
    /// This is the default deployment: every route is public and any origin
    /// may call it.
    pub fn without_auth() -> Self {
        Self {
            auth_token: String::new(),
            auth_enabled: false,
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable authentication.
    pub fn with_auth_enabled(mut self, enabled: bool) -> Self {
        self.auth_enabled = enabled;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::without_auth()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
pub fn create_router<St, Sg>(
    listing: SongListingService<St, Sg>,
    connection_info: ConnectionInfo,
    config: RouterConfig,
) -> Router
where
    St: SongStore + 'static,
    Sg: UrlSigner + 'static,
{
    let app_state = AppState::new(listing, connection_info);

    let api_routes = Router::new()
        .route("/greet/{name}", get(greet_handler::<St, Sg>))
        .route("/get-songs", get(songs_handler::<St, Sg>))
        .with_state(app_state);

    let api_routes = if config.auth_enabled {
        api_routes.layer(middleware::from_fn_with_state(
            BearerAuth::new(&config.auth_token),
            bearer_auth_middleware,
        ))
    } else {
        api_routes
    };

    let router = Router::new()
        .merge(api_routes)
        .route("/health", get(health_handler))
        .layer(build_cors_layer(&config));

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
///
/// Any method and any header are allowed; only the origin is configurable.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
