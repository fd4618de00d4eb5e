//! Static fallback catalog, compiled into the binary.
//!
//! When the server is unreachable the client serves these records so callers
//! stay usable. Offline records get synthetic negative ids that are never
//! sent back to the gateway.

use chrono::Utc;
use serde::Deserialize;

use crate::api::models::{
    prompts::{PromptPayload, PromptRecord},
    tools::{ToolPayload, ToolRecord},
};

const BUNDLED_CATALOG: &str = include_str!("../../data/fallback.json");

#[derive(Debug, Clone, Deserialize)]
pub struct FallbackCatalog {
    pub tools: Vec<ToolPayload>,
    pub prompts: Vec<PromptPayload>,
}

impl FallbackCatalog {
    /// The catalog bundled at compile time.
    pub fn bundled() -> Self {
        serde_json::from_str(BUNDLED_CATALOG).expect("bundled fallback catalog is valid JSON")
    }

    pub fn tool_records(&self) -> Vec<ToolRecord> {
        let now = Utc::now();
        self.tools
            .iter()
            .enumerate()
            .map(|(i, payload)| ToolRecord {
                id: -(i as i64) - 1,
                name: payload.canonical_name(),
                link: payload.canonical_link(),
                created_at: now,
                payload: payload.clone(),
            })
            .collect()
    }

    pub fn prompt_records(&self) -> Vec<PromptRecord> {
        let now = Utc::now();
        self.prompts
            .iter()
            .enumerate()
            .map(|(i, payload)| PromptRecord {
                id: -(i as i64) - 1,
                title: payload.canonical_title(),
                tool_id: None,
                tool_name: None,
                created_at: now,
                payload: payload.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = FallbackCatalog::bundled();
        assert!(!catalog.tools.is_empty());
        assert!(!catalog.prompts.is_empty());
    }

    #[test]
    fn test_offline_records_use_synthetic_ids() {
        let catalog = FallbackCatalog::bundled();
        for record in catalog.tool_records() {
            assert!(record.id < 0);
            assert!(!record.name.is_empty());
        }
        for record in catalog.prompt_records() {
            assert!(record.id < 0);
        }
    }
}
