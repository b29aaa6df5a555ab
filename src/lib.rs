//! # Music API
//!
//! A small HTTP backend for a music player. It lists the song catalogue stored
//! in PostgreSQL and gives every song a time-limited, read-only download URL for
//! its audio file in Azure Blob Storage.
//!
//! ## Features
//!
//! - **Song listing**: `GET /get-songs` returns every song with a signed URL
//! - **Local SAS signing**: URLs are signed with the account key; no storage round trip
//! - **Diagnostics**: `GET /greet/{name}` echoes the configured connection strings
//! - **Configurable CORS and auth**: permissive by default, both explicit options
//!
//! ## Architecture
//!
//! - [`song`] - Song record and public view types
//! - [`store`] - Per-request PostgreSQL connections
//! - [`blob`] - Connection string parsing and SAS URL signing
//! - [`listing`] - Joins the two into the song listing
//! - [`server`] - Axum handlers, auth and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use music_api::{
//!     create_router, ConnectionInfo, PgSongStore, RouterConfig, SasUrlSigner,
//!     SongListingService,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let database = "postgres://music@localhost/music";
//!     let blob = "UseDevelopmentStorage=true";
//!
//!     let store = PgSongStore::from_connection_string(database)?;
//!     let signer = Arc::new(SasUrlSigner::from_connection_string(blob)?);
//!     let listing = SongListingService::new(store, signer);
//!
//!     let router = create_router(
//!         listing,
//!         ConnectionInfo::new(database, blob),
//!         RouterConfig::without_auth(),
//!     );
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod blob;
pub mod config;
pub mod error;
pub mod listing;
pub mod server;
pub mod song;
pub mod store;

// Re-export commonly used types
pub use blob::{
    one_month_after, BlobConnection, BlobSas, SasUrlSigner, SharedKeyCredential,
    SignedUrl, UrlSigner, MUSIC_CONTAINER,
};
pub use config::{CheckConfig, Cli, Command, ServeConfig, SignConfig, SignOutputFormat};
pub use error::{ListingError, SigningError, StoreError};
pub use listing::SongListingService;
pub use server::{
    create_router, AppState, AuthError, BearerAuth, ConnectionInfo, ErrorResponse, GreetResponse,
    HealthResponse, RouterConfig, SongsResponse,
};
pub use song::{SongRecord, SongView};
pub use store::{PgSongConnection, PgSongStore, SongConnection, SongStore};
