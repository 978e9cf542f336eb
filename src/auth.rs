use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tower_sessions::Session;

use crate::{error::ApiError, repository::RepositoryState};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ps_session";

/// Session key under which the authenticated principal's user id is stored.
pub const SESSION_USER_KEY: &str = "user_id";

/// Session expiry: 7 days of inactivity.
pub const SESSION_EXPIRY_DAYS: i64 = 7;

// --- Credential Hashing ---

/// hash_password
///
/// Produces a salted argon2 PHC string for storage. The raw credential never
/// reaches the repository.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::error!("password hashing failed: {err}");
            ApiError::Internal
        })
}

/// verify_password
///
/// Constant-time comparison of a supplied credential against the stored PHC
/// string. An unparseable stored hash counts as a mismatch.
pub fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// --- Session Lifecycle ---

/// establish_session
///
/// Binds the session to the given user id. The session id is cycled first, so
/// the pre-login cookie value never identifies an authenticated principal.
pub async fn establish_session(session: &Session, user_id: i32) -> Result<(), ApiError> {
    session.cycle_id().await.map_err(|err| {
        tracing::error!("session id cycle failed: {err}");
        ApiError::Internal
    })?;
    session
        .insert(SESSION_USER_KEY, user_id)
        .await
        .map_err(|err| {
            tracing::error!("session write failed: {err}");
            ApiError::Internal
        })
}

/// clear_session
///
/// Deletes the session record from the store and invalidates the cookie.
pub async fn clear_session(session: &Session) -> Result<(), ApiError> {
    session.flush().await.map_err(|err| {
        tracing::error!("session flush failed: {err}");
        ApiError::Internal
    })
}

// --- Extractors ---

/// AuthUser Extractor Result
///
/// This struct represents the resolved identity of an authenticated request.
/// Handlers use it to retrieve the caller's id and role; session mechanics
/// stay opaque to them.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    /// 'admin' or 'user'. Used for Role-Based Access Control.
    pub role: String,
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a
/// function argument in any authenticated handler. The flow:
/// 1. Session Resolution: the `Session` handle is read from the request
///    extensions, where `SessionManagerLayer` placed it.
/// 2. Principal Lookup: the stored user id is read from the session record.
/// 3. Store Verification: the user is re-fetched from the repository, so a
///    session naming an account that no longer exists does not authenticate.
///
/// Rejection: 401 Unauthorized on any failure, before the handler runs.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);

        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(ApiError::Unauthorized("Not authenticated"))?;

        let user_id: i32 = session
            .get(SESSION_USER_KEY)
            .await
            .map_err(|err| {
                tracing::error!("session read failed: {err}");
                ApiError::Unauthorized("Not authenticated")
            })?
            .ok_or(ApiError::Unauthorized("Not authenticated"))?;

        let user = repo
            .get_user(user_id)
            .await
            .ok_or(ApiError::Unauthorized("Not authenticated"))?;

        Ok(AuthUser {
            id: user.id,
            role: user.role,
        })
    }
}

/// AdminUser Extractor
///
/// Resolves the principal exactly like [`AuthUser`] and additionally requires
/// `role == "admin"`. Admin-gated handlers take this extractor, which puts the
/// authorization check ahead of body deserialization: an under-privileged
/// request is rejected with 401 before its payload is even parsed, and no
/// storage call can have happened.
pub struct AdminUser(pub AuthUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != "admin" {
            return Err(ApiError::Unauthorized("Unauthorized"));
        }
        Ok(Self(user))
    }
}

/// OptionalAuthUser Extractor
///
/// Resolves the principal when a session is present, `None` otherwise. Never
/// rejects. Used by order creation, where guests and logged-in users share
/// one endpoint.
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(AuthUser::from_request_parts(parts, state).await.ok()))
    }
}
