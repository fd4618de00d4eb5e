//! Prompt record wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    db::models::prompts::PromptDBResponse,
    types::{PromptId, ToolId},
};

/// The full editing-form record for a prompt template.
///
/// `tool_id` is an advisory reference to the owning tool's store id; prompts
/// survive tool deletion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct PromptPayload {
    /// Display/routing attribute. Not unique and never a mutation key.
    pub slug: Option<String>,
    pub title: Option<String>,
    pub prompt: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub tool_id: Option<ToolId>,
}

impl PromptPayload {
    /// Canonical display title derived at write time.
    pub fn canonical_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| "Untitled".to_string())
    }
}

/// A stored prompt: canonical columns, the owning tool's name when it still
/// exists, and the decoded payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PromptRecord {
    pub id: PromptId,
    pub title: String,
    pub tool_id: Option<ToolId>,
    pub tool_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub payload: PromptPayload,
}

impl From<PromptDBResponse> for PromptRecord {
    fn from(row: PromptDBResponse) -> Self {
        let payload = match serde_json::from_str(&row.payload) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(%error, id = row.id, "Undecodable prompt payload, serving canonical columns only");
                PromptPayload {
                    title: Some(row.title.clone()),
                    tool_id: row.tool_id,
                    ..Default::default()
                }
            }
        };

        Self {
            id: row.id,
            title: row.title,
            tool_id: row.tool_id,
            tool_name: row.tool_name,
            created_at: row.created_at,
            payload,
        }
    }
}
