//! HTTP server layer for the music API.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │           GET /greet/{name}   GET /get-songs   GET /health      │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │    auth     │  │        routes           │  │
//! │  │ (requests)  │  │  (bearer)   │  │  (router, CORS, trace)  │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{bearer_auth_middleware, AuthError, BearerAuth};
pub use handlers::{
    greet_handler, health_handler, songs_handler, AppState, ConnectionInfo, ErrorResponse,
    GreetResponse, HealthResponse, SongsResponse,
};
pub use routes::{create_router, RouterConfig};
