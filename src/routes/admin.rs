use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Admin Router Module
///
/// Defines the routes exclusively accessible to users with the 'admin' role:
/// catalog management plus the appointment and order listings of the admin
/// panel.
///
/// Access Control:
/// Every handler registered here takes the `AdminUser` extractor, which
/// authenticates the session and requires `role == "admin"` in one step,
/// answering 401 otherwise. A request rejected by the extractor never reaches
/// payload parsing or the storage layer.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // POST /api/products
        // Adds a product to the catalog.
        .route("/api/products", post(handlers::create_product))
        // PUT/DELETE /api/products/{id}
        // Edits or removes a catalog entry. Products are the only entity
        // that is ever physically deleted.
        .route(
            "/api/products/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        // GET /api/appointments
        // Lists every booking for the admin panel.
        .route("/api/appointments", get(handlers::get_appointments))
        // GET /api/orders
        // Lists every order for the admin panel.
        .route("/api/orders", get(handlers::get_orders))
}
