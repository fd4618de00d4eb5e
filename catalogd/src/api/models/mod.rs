//! Request/response types for the HTTP API.

pub mod auth;
pub mod prompts;
pub mod seed;
pub mod tools;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic `{message}` envelope returned by mutations and errors.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Returned by create operations: the message plus the assigned store id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}
