//! Terrain HTTP authentication server.
//!
//! This crate is the HTTP surface over `terrain-auth`: login routes for API
//! and browser clients, a bearer-token guard for protected routes, first-boot
//! account provisioning and the process configuration. Business routes for
//! zones, families and statistics live in their own services and consume the
//! identity this server establishes.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod guard;
pub mod json;
pub mod routes;

pub use config::{Args, ServerConfig};
pub use error::AppError;
pub use guard::CurrentUser;

use std::sync::Arc;

use axum::Router;
use terrain_auth::{Authenticator, CredentialStore, TokenCodec};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Credential store consulted at login and on every guarded request.
    pub store: Arc<dyn CredentialStore>,
    /// Token codec, fixed at startup.
    pub codec: Arc<TokenCodec>,
    /// Password authenticator over the store.
    pub authenticator: Authenticator,
    /// Server configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn CredentialStore>, codec: TokenCodec, config: ServerConfig) -> Self {
        let authenticator = Authenticator::new(store.clone());
        Self {
            store,
            codec: Arc::new(codec),
            authenticator,
            config,
        }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::auth::routes())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
