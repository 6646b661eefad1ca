//! Library lending API
//!
//! A REST JSON API for a small library: book catalog management and borrow
//! records with geolocation. Access is gated by the `x-user-role` and
//! `x-user-id` request headers.

use std::{path::PathBuf, sync::Arc};

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use identity::{HeaderIdentityResolver, IdentityResolver};
use repository::Repository;
use services::Services;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
    pub identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    /// Build the state over an opened repository, trusting role headers as sent
    pub fn new(config: AppConfig, repository: Repository) -> Self {
        let services = Services::new(repository, &config.catalog);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
            identity: Arc::new(HeaderIdentityResolver),
        }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = PathBuf::from(&state.config.server.static_dir);

    let api_routes = Router::new()
        // Books (catalog)
        .route("/books", get(api::books::list_books))
        .route("/books", post(api::books::create_book))
        .route("/books/:id", get(api::books::get_book))
        .route("/books/:id", put(api::books::update_book))
        .route("/books/:id", delete(api::books::delete_book))
        // Borrows
        .route("/borrow", post(api::borrows::borrow_book))
        .route("/borrows", get(api::borrows::list_borrows));

    Router::new()
        .nest("/api", api_routes)
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .with_state(state)
        .merge(api::openapi::create_openapi_router())
        // Login page and its assets
        .route_service("/", ServeFile::new(static_dir.join("login.html")))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
