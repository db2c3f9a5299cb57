//! API route definitions.

use axum::{Json, Router, http::StatusCode, middleware, response::IntoResponse};
use serde_json::json;

use crate::{AppState, middleware::auth::auth_middleware};

/// Builds a JSON error response from a status code and error code.
pub(crate) fn error_json(status: u16, code: &str, message: &str) -> axum::response::Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({ "error": code.to_lowercase(), "message": message })),
    )
        .into_response()
}

pub mod health;
pub mod invoices;
pub mod ledger;
pub mod orders;
pub mod receipts;
pub mod session;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(session::routes())
        .merge(orders::routes())
        .merge(invoices::routes())
        .merge(receipts::routes())
        .merge(ledger::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new().merge(health::routes()).merge(protected_routes)
}
