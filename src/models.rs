use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Core Application Schemas (Owned by the Storage Layer) ---
//
// All wire shapes use camelCase keys, matching what the storefront client
// reads and writes. Identities are store-assigned integers, never reused.

/// User
///
/// The canonical account record. The `password` field holds the argon2 PHC
/// string at rest and is never serialized to clients; every response surface
/// uses the [`UserResponse`] projection instead.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    // The user's primary identifier (an email address in practice).
    pub username: String,
    // Argon2 hash, not the raw credential.
    pub password: String,
    pub name: String,
    // The RBAC field: 'admin' or 'user'.
    pub role: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Product
///
/// A catalog item. Prices are integer cents; `category` is a free-text tag
/// matched exactly (case-sensitive) by the listing filter.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub image_url: String,
}

/// Service
///
/// A bookable grooming/veterinary service. `duration` is in minutes.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub duration: i32,
    pub image_url: String,
}

/// Appointment
///
/// A booking request. `service_name` is a denormalized snapshot of the chosen
/// service at booking time, deliberately not a foreign key: later edits to the
/// service catalog must not rewrite booking history.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i32,
    pub customer_name: String,
    pub contact_phone: String,
    pub pet_name: String,
    pub service_name: String,
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
    // 'pending' | 'confirmed' | 'completed'; starts at 'pending'.
    pub status: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// OrderItem
///
/// One line of an order: a frozen snapshot of a client-side cart entry, not a
/// live product reference. Stored verbatim inside the owning [`Order`].
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderItem {
    pub product_id: i32,
    pub name: String,
    pub price: i64,
    pub quantity: i32,
}

/// Order
///
/// A checkout record. `user_id` weakly references a [`User`] when the buyer
/// was logged in (lookup only, no cascade). `total` is the client-submitted
/// figure; see DESIGN.md for the decision not to recompute it server-side.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i32,
    pub customer_name: String,
    pub user_id: Option<i32>,
    pub total: i64,
    pub status: String,
    pub items: Vec<OrderItem>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

// --- Request Payloads (Insertable Shapes) ---
//
// These are the only field sets a client may supply; generated fields (id,
// createdAt, status) are absent by construction. `deny_unknown_fields`
// rejects anything outside the declared shape at the deserialization
// boundary.

fn default_role() -> String {
    "user".to_string()
}

/// InsertUser
///
/// Registration payload. `role` defaults to "user" when omitted; the handler
/// replaces `password` with its hash before the record reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InsertUser {
    pub username: String,
    pub password: String,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
}

/// LoginRequest
///
/// Credential pair for `POST /api/login`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// InsertProduct
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InsertProduct {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub image_url: String,
}

/// UpdateProduct
///
/// Partial update payload for `PUT /api/products/{id}`. All fields are
/// `Option<T>`; only provided fields are merged into the stored record.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// InsertService
///
/// Used by the seed bootstrap; there is no HTTP endpoint for service creation.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InsertService {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub duration: i32,
    pub image_url: String,
}

/// InsertAppointment
///
/// Booking payload. `status` and `created_at` are generated by the store.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InsertAppointment {
    pub customer_name: String,
    pub contact_phone: String,
    pub pet_name: String,
    pub service_name: String,
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
}

/// InsertOrder
///
/// Checkout payload. The client may send `user_id`, but the handler always
/// overwrites it with the session principal (or clears it for guests).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InsertOrder {
    pub customer_name: String,
    #[serde(default)]
    pub user_id: Option<i32>,
    pub total: i64,
    pub items: Vec<OrderItem>,
}

// --- Response Projections ---

/// UserResponse
///
/// The account shape clients are allowed to see: everything except the stored
/// credential hash.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub role: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
