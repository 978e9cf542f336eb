use crate::{
    AppState, auth,
    auth::{AdminUser, AuthUser, OptionalAuthUser},
    error::ApiError,
    models::{
        Appointment, InsertAppointment, InsertOrder, InsertProduct, InsertUser, LoginRequest,
        Order, Product, Service, UpdateProduct, UserResponse,
    },
    validate::ValidatedJson,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;

// --- Filter Structs ---

/// ProductFilter
///
/// Accepted query parameters for the public product listing endpoint
/// (GET /api/products). Bound by Axum's Query extractor.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ProductFilter {
    /// Optional exact-match category tag (e.g. "Ração", "Brinquedos").
    pub category: Option<String>,
}

// --- Catalog Handlers ---

/// get_products
///
/// [Public Route] Lists the product catalog, optionally narrowed to a single
/// category. The match is exact and case-sensitive, as the tags are rendered
/// verbatim by the client.
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductFilter),
    responses((status = 200, description = "List products", body = [Product]))
)]
pub async fn get_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Json<Vec<Product>> {
    let products = state.repo.get_products(filter.category).await;
    Json(products)
}

/// get_product
///
/// [Public Route] Retrieves a single product by id.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Found", body = Product),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, ApiError> {
    match state.repo.get_product(id).await {
        Some(product) => Ok(Json(product)),
        None => Err(ApiError::NotFound("Product")),
    }
}

/// create_product
///
/// [Admin Route] Adds a product to the catalog.
///
/// *Authorization*: the `AdminUser` extractor rejects missing sessions and
/// non-admin principals with 401 before the payload is parsed, so a rejected
/// request leaves no partial side effects.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = InsertProduct,
    responses(
        (status = 201, description = "Created", body = Product),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_product(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<InsertProduct>,
) -> (StatusCode, Json<Product>) {
    let product = state.repo.create_product(payload).await;
    (StatusCode::CREATED, Json(product))
}

/// update_product
///
/// [Admin Route] Partially updates a product; only supplied fields change.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Updated", body = Product),
        (status = 404, description = "Not Found"),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_product(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProduct>,
) -> Result<Json<Product>, ApiError> {
    match state.repo.update_product(id, payload).await {
        Some(product) => Ok(Json(product)),
        None => Err(ApiError::NotFound("Product")),
    }
}

/// delete_product
///
/// [Admin Route] Removes a product from the catalog. Deleting an id that was
/// never assigned (or was already removed) still answers 204: the end state
/// is the same either way.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_product(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> StatusCode {
    state.repo.delete_product(id).await;
    StatusCode::NO_CONTENT
}

/// get_services
///
/// [Public Route] Lists the bookable service catalog.
#[utoipa::path(
    get,
    path = "/api/services",
    responses((status = 200, description = "List services", body = [Service]))
)]
pub async fn get_services(State(state): State<AppState>) -> Json<Vec<Service>> {
    let services = state.repo.get_services().await;
    Json(services)
}

// --- Appointment Handlers ---

/// create_appointment
///
/// [Public Route] Books a service appointment. `serviceName` is stored as a
/// snapshot string; the booking survives later edits to the service catalog.
/// New appointments always start as 'pending'.
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = InsertAppointment,
    responses(
        (status = 201, description = "Booked", body = Appointment),
        (status = 400, description = "Validation failure")
    )
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<InsertAppointment>,
) -> (StatusCode, Json<Appointment>) {
    let appointment = state.repo.create_appointment(payload).await;
    (StatusCode::CREATED, Json(appointment))
}

/// get_appointments
///
/// [Admin Route] Lists every appointment for the admin panel.
#[utoipa::path(
    get,
    path = "/api/appointments",
    responses(
        (status = 200, description = "All appointments", body = [Appointment]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_appointments(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> Json<Vec<Appointment>> {
    Json(state.repo.get_appointments().await)
}

// --- Order Handlers ---

/// create_order
///
/// [Public Route] Converts a client-side cart into a stored order. The only
/// handler that touches a second concern: the optional session principal is
/// read so `userId` can be stamped. A client-supplied `userId` is always
/// discarded in favor of the session's (or cleared for guest checkout).
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = InsertOrder,
    responses(
        (status = 201, description = "Created", body = Order),
        (status = 400, description = "Validation failure")
    )
)]
pub async fn create_order(
    OptionalAuthUser(principal): OptionalAuthUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<InsertOrder>,
) -> (StatusCode, Json<Order>) {
    let user_id = principal.map(|user| user.id);
    let order = state.repo.create_order(payload, user_id).await;
    (StatusCode::CREATED, Json(order))
}

/// get_orders
///
/// [Admin Route] Lists every order for the admin panel.
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All orders", body = [Order]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_orders(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> Json<Vec<Order>> {
    Json(state.repo.get_orders().await)
}

// --- Auth Handlers ---

/// login
///
/// [Public Route] Establishes a session from a credential pair. The supplied
/// password is verified against the stored argon2 hash; on success the
/// session transitions Anonymous → Authenticated(user) and the account (sans
/// credential hash) is returned.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = UserResponse),
        (status = 401, description = "Bad credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .repo
        .get_user_by_username(&payload.username)
        .await
        .ok_or(ApiError::Unauthorized("Invalid username"))?;

    if !auth::verify_password(&payload.password, &user.password) {
        return Err(ApiError::Unauthorized("Invalid password"));
    }

    auth::establish_session(&session, user.id).await?;
    tracing::info!(user_id = user.id, "login");

    Ok(Json(UserResponse::from(user)))
}

/// register
///
/// [Public Route] Creates an account and authenticates it in the same
/// request; there is no verification step. Duplicate usernames are rejected
/// with 400 and leave the existing account untouched.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = InsertUser,
    responses(
        (status = 201, description = "Registered", body = UserResponse),
        (status = 400, description = "Validation failure or duplicate username")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(mut payload): ValidatedJson<InsertUser>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    // The store only ever sees the hash.
    payload.password = auth::hash_password(&payload.password)?;

    let user = state
        .repo
        .create_user(payload)
        .await
        .ok_or_else(|| ApiError::Conflict("Username already exists".to_string()))?;

    auth::establish_session(&session, user.id).await?;
    tracing::info!(user_id = user.id, "register");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// logout
///
/// [Public Route] Ends the session, if any. Always answers 200; logging out
/// an anonymous session is a no-op.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 200, description = "Logged out"))
)]
pub async fn logout(session: Session) -> Result<Json<Value>, ApiError> {
    auth::clear_session(&session).await?;
    Ok(Json(json!({ "message": "Logged out successfully" })))
}

/// current_user
///
/// [Authenticated Route] Returns the account behind the current session.
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn current_user(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .repo
        .get_user(id)
        .await
        .ok_or(ApiError::Unauthorized("Not authenticated"))?;
    Ok(Json(UserResponse::from(user)))
}
