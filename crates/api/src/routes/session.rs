//! Session context route: acting role and landing page.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};

/// Creates the session routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/session", get(get_session))
}

/// Response for the session context.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// The acting user's ID.
    pub user_id: Uuid,
    /// The acting user's role code.
    pub role: String,
    /// The landing page for this role.
    pub landing_page: String,
}

/// GET `/session` - Acting user context for the frontend.
///
/// The landing page comes from the routing configuration injected at
/// startup, not a global table.
async fn get_session(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let landing_page = state.routing.landing_page(auth.role_code()).to_string();

    (
        StatusCode::OK,
        Json(SessionResponse {
            user_id: auth.user_id(),
            role: auth.role_code().to_string(),
            landing_page,
        }),
    )
}
