//! Music API - song catalogue with signed download URLs.
//!
//! This binary starts the HTTP server and configures all components.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use music_api::{
    blob::{BlobConnection, SasUrlSigner, UrlSigner, MUSIC_CONTAINER},
    config::{CheckConfig, Cli, Command, ServeConfig, SignConfig, SignOutputFormat},
    listing::SongListingService,
    server::{create_router, ConnectionInfo, RouterConfig},
    store::{PgSongStore, SongConnection, SongStore},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(config) => run_serve(config).await,
        Command::Sign(config) => run_sign(config),
        Command::Check(config) => run_check(config).await,
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let store = match PgSongStore::from_connection_string(&config.database) {
        Ok(store) => store,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let signer = match SasUrlSigner::from_connection_string(&config.blob_storage) {
        Ok(signer) => signer,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Configuration:");
    info!(
        "  Database: {}:{}",
        store.options().get_host(),
        store.options().get_port()
    );
    info!("  Blob container: {}", signer.container());
    if !signer.can_generate_sas() {
        warn!("  Blob storage has no account key - song listings will fail to sign URLs");
    }

    match config.allowed_origins() {
        None => info!("  CORS: any origin"),
        Some(origins) => info!("  CORS: {}", origins.join(", ")),
    }

    if config.require_auth {
        info!("  Auth: bearer token required");
    } else {
        warn!("  Auth: DISABLED - all endpoints are publicly accessible");
    }
    warn!("  GET /greet/{{name}} echoes connection strings - do not expose it publicly");

    let listing = SongListingService::new(store, Arc::new(signer));
    let connection_info = ConnectionInfo::new(&config.database, &config.blob_storage);
    let router = create_router(listing, connection_info, build_router_config(&config));

    let addr = config.bind_address();

    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/get-songs", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "music_api=debug,tower_http=debug"
    } else {
        "music_api=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = if config.require_auth {
        RouterConfig::new(config.auth_token_or_empty())
    } else {
        RouterConfig::without_auth()
    };

    if let Some(origins) = config.allowed_origins() {
        router_config = router_config.with_cors_origins(origins);
    }

    router_config.with_tracing(!config.no_tracing)
}

// =============================================================================
// Sign Command
// =============================================================================

fn run_sign(config: SignConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let signed = match SasUrlSigner::from_connection_string(&config.blob_storage)
        .and_then(|signer| signer.sign(&config.file_name))
    {
        Ok(signed) => signed,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match config.format {
        SignOutputFormat::Url => println!("{}", signed.url),
        SignOutputFormat::Json => {
            let json = serde_json::json!({
                "container": MUSIC_CONTAINER,
                "blob": config.file_name,
                "url": signed.url,
                "expires_on": signed.expires_on.to_rfc3339(),
            });
            match serde_json::to_string_pretty(&json) {
                Ok(out) => println!("{}", out),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}

// =============================================================================
// Check Command
// =============================================================================

async fn run_check(config: CheckConfig) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    println!("Music API Configuration Check");
    println!("═════════════════════════════");
    println!();

    match BlobConnection::parse(&config.blob_storage) {
        Ok(conn) => {
            println!("✓ Blob endpoint: {}", conn.endpoint());
            if conn.can_generate_sas() {
                println!("✓ Shared key: present, URLs can be signed");
            } else {
                println!("✗ Shared key: missing, URLs cannot be signed");
                return ExitCode::FAILURE;
            }
        }
        Err(e) => {
            println!("✗ Blob storage: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let store = match PgSongStore::from_connection_string(&config.database) {
        Ok(store) => store,
        Err(e) => {
            println!("✗ Database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print!("Testing database connection... ");

    let mut conn = match store.acquire().await {
        Ok(conn) => {
            println!("✓ success");
            conn
        }
        Err(e) => {
            println!("✗ failed");
            println!();
            println!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let count = conn.count_songs().await;
    if let Err(e) = conn.release().await {
        println!("  Warning: failed to close connection: {}", e);
    }

    match count {
        Ok(count) => println!("✓ Songs table: {} song(s)", count),
        Err(e) => {
            println!("✗ Songs table: {}", e);
            return ExitCode::FAILURE;
        }
    }

    println!();
    println!("═════════════════════════════");
    println!("✓ All checks passed!");

    ExitCode::SUCCESS
}
