use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any
/// client. Catalog reads, appointment booking, and checkout live here —
/// booking and checkout are deliberately open so guests can buy without an
/// account. Order creation reads the session when one exists, but never
/// requires it.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // GET /api/products?category=...
        // Lists the product catalog with optional exact-match category filtering.
        .route("/api/products", get(handlers::get_products))
        // GET /api/products/{id}
        // Retrieves a single product.
        .route("/api/products/{id}", get(handlers::get_product))
        // GET /api/services
        // Lists the bookable service catalog.
        .route("/api/services", get(handlers::get_services))
        // POST /api/appointments
        // Books a service appointment (guest-accessible, no session needed).
        .route("/api/appointments", post(handlers::create_appointment))
        // POST /api/orders
        // Converts the client-side cart into a stored order. Stamps userId
        // from the session when the buyer is logged in.
        .route("/api/orders", post(handlers::create_order))
        // --- Session lifecycle ---
        // POST /api/login — credential check, session establishment.
        .route("/api/login", post(handlers::login))
        // POST /api/register — account creation with immediate authentication.
        .route("/api/register", post(handlers::register))
        // POST /api/logout — session teardown; a no-op for anonymous callers.
        .route("/api/logout", post(handlers::logout))
}
