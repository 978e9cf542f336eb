use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Defines the routes accessible to any user who has successfully passed the
/// authentication layer, regardless of role. The `auth_middleware` layer
/// applied in `create_router` guarantees every handler here runs with a
/// resolvable `AuthUser`.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /api/user
        // Returns the account behind the current session.
        .route("/api/user", get(handlers::current_user))
}
