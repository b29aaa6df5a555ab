//! Configuration management for the music API.
//!
//! Configuration is parsed once at startup from command-line arguments and
//! environment variables, validated, and then passed explicitly to the
//! components that need it.
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use music_api::config::{Cli, Command};
//!
//! let cli = Cli::parse();
//! if let Command::Serve(config) = cli.command {
//!     config.validate()?;
//!     println!("Listening on {}", config.bind_address());
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `MUSIC_HOST` - Server bind address (default: 0.0.0.0)
//! - `MUSIC_PORT` - Server port (default: 8080)
//! - `MUSIC_DATABASE` - PostgreSQL connection string (required)
//! - `MUSIC_AZURE_BLOB_STORAGE` - Blob storage connection string (required)
//! - `MUSIC_CORS_ORIGINS` - Allowed origins, comma-separated (default: any)
//! - `MUSIC_REQUIRE_AUTH` - Require a bearer token (default: false)
//! - `MUSIC_AUTH_TOKEN` - Bearer token accepted when auth is required

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::blob::BlobConnection;
use crate::store::PgSongStore;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// CLI
// =============================================================================

/// Music API - song catalogue with signed download URLs.
#[derive(Parser, Debug, Clone)]
#[command(name = "music-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server.
    Serve(ServeConfig),

    /// Print a signed URL for one blob in the music container.
    Sign(SignConfig),

    /// Check database and blob storage configuration.
    Check(CheckConfig),
}

// =============================================================================
// Serve
// =============================================================================

/// Configuration for the `serve` command.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "MUSIC_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "MUSIC_PORT")]
    pub port: u16,

    /// PostgreSQL connection string (URL or Key=Value;... form).
    #[arg(long, env = "MUSIC_DATABASE", hide_env_values = true)]
    pub database: String,

    /// Blob storage connection string.
    #[arg(long, env = "MUSIC_AZURE_BLOB_STORAGE", hide_env_values = true)]
    pub blob_storage: String,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, or if it contains "*", any origin is allowed.
    #[arg(long, env = "MUSIC_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Require `Authorization: Bearer <token>` on the API routes.
    #[arg(long, default_value_t = false, env = "MUSIC_REQUIRE_AUTH")]
    pub require_auth: bool,

    /// Bearer token accepted when authentication is required.
    #[arg(long, env = "MUSIC_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.database.trim().is_empty() {
            return Err(
                "Database connection string is required. Set --database or MUSIC_DATABASE"
                    .to_string(),
            );
        }
        PgSongStore::from_connection_string(&self.database).map_err(|e| e.to_string())?;

        if self.blob_storage.trim().is_empty() {
            return Err(
                "Blob storage connection string is required. \
                 Set --blob-storage or MUSIC_AZURE_BLOB_STORAGE"
                    .to_string(),
            );
        }
        BlobConnection::parse(&self.blob_storage).map_err(|e| e.to_string())?;

        if self.require_auth && self.auth_token_or_empty().is_empty() {
            return Err(
                "Authentication is required but no token provided. \
                 Set --auth-token or MUSIC_AUTH_TOKEN, or drop --require-auth"
                    .to_string(),
            );
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the auth token, or "" if not set.
    pub fn auth_token_or_empty(&self) -> &str {
        self.auth_token.as_deref().unwrap_or("")
    }

    /// Explicit origin list, or `None` when any origin is allowed.
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        match &self.cors_origins {
            None => None,
            Some(origins) if origins.iter().any(|o| o.trim() == "*") => None,
            Some(origins) => Some(
                origins
                    .iter()
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect(),
            ),
        }
    }
}

// =============================================================================
// Sign
// =============================================================================

/// Output format for the `sign` command.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignOutputFormat {
    /// The signed URL only
    #[default]
    Url,
    /// JSON with the URL and its expiry
    Json,
}

/// Configuration for the `sign` command.
#[derive(Args, Debug, Clone)]
pub struct SignConfig {
    /// Blob name inside the music container (e.g. "album/track.mp3").
    pub file_name: String,

    /// Blob storage connection string.
    #[arg(long, env = "MUSIC_AZURE_BLOB_STORAGE", hide_env_values = true)]
    pub blob_storage: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = SignOutputFormat::Url)]
    pub format: SignOutputFormat,
}

impl SignConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.file_name.is_empty() {
            return Err("Blob name must not be empty".to_string());
        }
        BlobConnection::parse(&self.blob_storage).map_err(|e| e.to_string())?;
        Ok(())
    }
}

// =============================================================================
// Check
// =============================================================================

/// Configuration for the `check` command.
#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    /// PostgreSQL connection string.
    #[arg(long, env = "MUSIC_DATABASE", hide_env_values = true)]
    pub database: String,

    /// Blob storage connection string.
    #[arg(long, env = "MUSIC_AZURE_BLOB_STORAGE", hide_env_values = true)]
    pub blob_storage: String,

    /// Enable verbose logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

// =============================================================================
// Tests
// =============================================================================
