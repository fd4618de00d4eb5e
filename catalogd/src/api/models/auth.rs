//! Authentication request/response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::UserId;

/// Credentials presented to `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login: a signed session token plus the authenticated username.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub auth: bool,
    pub token: String,
    pub username: String,
}

/// Body of `GET /session` once the bearer token verifies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub username: String,
}

/// The authenticated admin identity carried by a verified session token.
///
/// Doubles as the axum extractor on write routes (see
/// [`crate::auth::current_admin`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: UserId,
    pub username: String,
}
