//! Row models for the `prompts` table.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::{
    api::models::prompts::PromptPayload,
    db::errors::Result,
    types::{PromptId, ToolId},
};

#[derive(Debug, Clone)]
pub struct PromptCreateDBRequest {
    pub title: String,
    pub tool_id: Option<ToolId>,
    pub payload: String,
}

impl PromptCreateDBRequest {
    pub fn from_payload(payload: &PromptPayload) -> Result<Self> {
        Ok(Self {
            title: payload.canonical_title(),
            tool_id: payload.tool_id,
            payload: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PromptUpdateDBRequest {
    pub title: String,
    pub tool_id: Option<ToolId>,
    pub payload: String,
}

impl PromptUpdateDBRequest {
    pub fn from_payload(payload: &PromptPayload) -> Result<Self> {
        Ok(Self {
            title: payload.canonical_title(),
            tool_id: payload.tool_id,
            payload: serde_json::to_string(payload)?,
        })
    }
}

/// A `prompts` row joined with the owning tool's name (when the tool still
/// exists).
#[derive(Debug, Clone, FromRow)]
pub struct PromptDBResponse {
    pub id: PromptId,
    pub title: String,
    pub tool_id: Option<ToolId>,
    pub tool_name: Option<String>,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}
