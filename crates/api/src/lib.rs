//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for the order-to-cash flow
//! - Authentication middleware establishing the acting role
//! - Notification sinks (log, webhook)

pub mod middleware;
pub mod notify;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use kontor_core::notify::NotificationSink;
use kontor_shared::{JwtService, RoleRouting};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token validation.
    pub jwt_service: Arc<JwtService>,
    /// Role landing-page routing, built at startup.
    pub routing: Arc<RoleRouting>,
    /// Sink informed of document workflow events.
    pub notifier: Arc<dyn NotificationSink>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
