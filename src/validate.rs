use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::{Serialize, de::DeserializeOwned};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{
    InsertAppointment, InsertOrder, InsertProduct, InsertService, InsertUser, LoginRequest,
    UpdateProduct,
};

/// FieldError
///
/// One violated rule on one field. A failed validation returns every
/// violation found, not just the first, so the client can render all of
/// them at once.
#[derive(Debug, Clone, Serialize, TS, ToSchema)]
#[ts(export)]
pub struct FieldError {
    pub field: &'static str,
    // One of: "required", "type", "format".
    pub rule: &'static str,
    pub message: String,
}

impl FieldError {
    fn required(field: &'static str) -> Self {
        Self {
            field,
            rule: "required",
            message: format!("{field} must not be empty"),
        }
    }

    fn format(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            rule: "format",
            message: message.into(),
        }
    }

    fn body(message: impl Into<String>) -> Self {
        Self {
            field: "body",
            rule: "type",
            message: message.into(),
        }
    }
}

/// Validate
///
/// The contract of the validation layer: given an already well-typed
/// insertable payload, collect every violated field rule. Validation is
/// all-or-nothing per request; a non-empty violation list fails the whole
/// payload.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

// Pushes a "required" violation when the value is blank.
fn require_text(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::required(field));
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

impl Validate for InsertProduct {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", &self.name);
        require_text(&mut errors, "description", &self.description);
        require_text(&mut errors, "category", &self.category);
        require_text(&mut errors, "imageUrl", &self.image_url);
        if self.price < 0 {
            errors.push(FieldError::format("price", "price must not be negative"));
        }
        finish(errors)
    }
}

impl Validate for UpdateProduct {
    // Partial payload: only supplied fields are checked.
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            require_text(&mut errors, "name", name);
        }
        if let Some(description) = &self.description {
            require_text(&mut errors, "description", description);
        }
        if let Some(category) = &self.category {
            require_text(&mut errors, "category", category);
        }
        if let Some(image_url) = &self.image_url {
            require_text(&mut errors, "imageUrl", image_url);
        }
        if self.price.is_some_and(|price| price < 0) {
            errors.push(FieldError::format("price", "price must not be negative"));
        }
        finish(errors)
    }
}

impl Validate for InsertService {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", &self.name);
        require_text(&mut errors, "description", &self.description);
        require_text(&mut errors, "imageUrl", &self.image_url);
        if self.price < 0 {
            errors.push(FieldError::format("price", "price must not be negative"));
        }
        if self.duration <= 0 {
            errors.push(FieldError::format("duration", "duration must be positive"));
        }
        finish(errors)
    }
}

impl Validate for InsertAppointment {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_text(&mut errors, "customerName", &self.customer_name);
        require_text(&mut errors, "contactPhone", &self.contact_phone);
        require_text(&mut errors, "petName", &self.pet_name);
        require_text(&mut errors, "serviceName", &self.service_name);
        // Any timestamp is accepted; bookings are not conflict-checked.
        finish(errors)
    }
}

impl Validate for InsertOrder {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_text(&mut errors, "customerName", &self.customer_name);
        if self.total < 0 {
            errors.push(FieldError::format("total", "total must not be negative"));
        }
        if self.items.is_empty() {
            errors.push(FieldError::required("items"));
        }
        for item in &self.items {
            if item.quantity <= 0 {
                errors.push(FieldError::format(
                    "items",
                    format!("quantity for '{}' must be positive", item.name),
                ));
            }
            if item.price < 0 {
                errors.push(FieldError::format(
                    "items",
                    format!("price for '{}' must not be negative", item.name),
                ));
            }
        }
        finish(errors)
    }
}

impl Validate for InsertUser {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_text(&mut errors, "username", &self.username);
        require_text(&mut errors, "password", &self.password);
        require_text(&mut errors, "name", &self.name);
        if self.role != "admin" && self.role != "user" {
            errors.push(FieldError::format("role", "role must be 'admin' or 'user'"));
        }
        finish(errors)
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_text(&mut errors, "username", &self.username);
        require_text(&mut errors, "password", &self.password);
        finish(errors)
    }
}

/// ValidatedJson Extractor
///
/// The single entry point of the validation layer. Wraps `axum::Json` so that
/// both failure classes surface as the same 400 shape:
/// - body rejections (malformed JSON, missing/mismatched/unknown fields,
///   caught by serde) become a single "body" FieldError carrying serde's
///   description, and
/// - rule violations collected by [`Validate`] are returned in full.
///
/// Handlers that accept a payload take `ValidatedJson<T>` instead of
/// `Json<T>`, which guarantees no handler body ever sees an unvalidated
/// payload.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(vec![FieldError::body(rejection.body_text())]))?;

        payload.validate().map_err(ApiError::Validation)?;

        Ok(Self(payload))
    }
}
