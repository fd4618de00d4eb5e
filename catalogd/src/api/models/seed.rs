//! Seed request type.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::models::{prompts::PromptPayload, tools::ToolPayload};

/// Batch of records to install into an empty catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SeedRequest {
    pub tools: Vec<ToolPayload>,
    pub prompts: Vec<PromptPayload>,
}
