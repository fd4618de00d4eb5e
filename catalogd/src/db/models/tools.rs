//! Row models for the `tools` table.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::{api::models::tools::ToolPayload, db::errors::Result, types::ToolId};

/// Write request for inserting a tool. Canonical columns are derived from the
/// payload at construction time; the payload itself is stored wholesale.
#[derive(Debug, Clone)]
pub struct ToolCreateDBRequest {
    pub name: String,
    pub link: String,
    pub payload: String,
}

impl ToolCreateDBRequest {
    pub fn from_payload(payload: &ToolPayload) -> Result<Self> {
        Ok(Self {
            name: payload.canonical_name(),
            link: payload.canonical_link(),
            payload: serde_json::to_string(payload)?,
        })
    }
}

/// Write request for overwriting a tool. Updates are wholesale: canonical
/// columns and payload are replaced together, never merged.
#[derive(Debug, Clone)]
pub struct ToolUpdateDBRequest {
    pub name: String,
    pub link: String,
    pub payload: String,
}

impl ToolUpdateDBRequest {
    pub fn from_payload(payload: &ToolPayload) -> Result<Self> {
        Ok(Self {
            name: payload.canonical_name(),
            link: payload.canonical_link(),
            payload: serde_json::to_string(payload)?,
        })
    }
}

/// A `tools` row. The payload column stays encoded here; decoding (with its
/// canonical-only fallback) happens at the API boundary.
#[derive(Debug, Clone, FromRow)]
pub struct ToolDBResponse {
    pub id: ToolId,
    pub name: String,
    pub link: String,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}
