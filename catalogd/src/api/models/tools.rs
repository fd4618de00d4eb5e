//! Tool record wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{db::models::tools::ToolDBResponse, types::ToolId};

/// One step of a tool's usage walkthrough.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct HowToStep {
    pub step: u32,
    pub text: String,
}

/// The full editing-form record for a tool, stored wholesale in the payload
/// column. Every field is optional so a minimal `{"name": "X"}` body is a
/// valid record; unknown fields are rejected at the boundary.
///
/// The serde round-trip law holds for every accepted payload:
/// `decode(encode(p)) == p`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPayload {
    /// Display/routing attribute. Not unique and never a mutation key.
    pub slug: Option<String>,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub best_for: Vec<String>,
    pub difficulty: Option<String>,
    pub price: Option<String>,
    pub what_it_does: Vec<String>,
    pub who_its_for: Vec<String>,
    pub how_to_use: Vec<HowToStep>,
    pub use_cases: Vec<String>,
    pub difficulty_explanation: Option<String>,
    pub pricing_details: Option<String>,
    pub official_website: Option<String>,
    pub logo: Option<String>,
    pub image_url: Option<String>,
}

impl ToolPayload {
    /// Canonical display name derived at write time.
    pub fn canonical_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "Untitled".to_string())
    }

    /// Canonical link derived at write time.
    pub fn canonical_link(&self) -> String {
        self.official_website.clone().unwrap_or_default()
    }
}

/// A stored tool: canonical columns plus the decoded payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ToolRecord {
    pub id: ToolId,
    pub name: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub payload: ToolPayload,
}

impl From<ToolDBResponse> for ToolRecord {
    fn from(row: ToolDBResponse) -> Self {
        // A row whose payload no longer decodes still lists: fall back to a
        // canonical-only record rather than failing the whole listing.
        let payload = match serde_json::from_str(&row.payload) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(%error, id = row.id, "Undecodable tool payload, serving canonical columns only");
                ToolPayload {
                    name: Some(row.name.clone()),
                    official_website: Some(row.link.clone()),
                    ..Default::default()
                }
            }
        };

        Self {
            id: row.id,
            name: row.name,
            link: row.link,
            created_at: row.created_at,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_round_trip() {
        let payload = ToolPayload {
            slug: Some("scribe".to_string()),
            name: Some("Scribe".to_string()),
            tagline: Some("Notes that write themselves".to_string()),
            category: Some("writing".to_string()),
            best_for: vec!["students".to_string(), "researchers".to_string()],
            how_to_use: vec![HowToStep {
                step: 1,
                text: "Open the editor".to_string(),
            }],
            official_website: Some("https://scribe.example".to_string()),
            ..Default::default()
        };

        let encoded = serde_json::to_string(&payload).unwrap();
        let decoded: ToolPayload = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_minimal_body_is_a_valid_payload() {
        let payload: ToolPayload = serde_json::from_str(r#"{"name": "X"}"#).unwrap();
        assert_eq!(payload.canonical_name(), "X");
        assert_eq!(payload.canonical_link(), "");
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_str::<ToolPayload>(r#"{"name": "X", "surprise": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_canonical_defaults() {
        let payload = ToolPayload::default();
        assert_eq!(payload.canonical_name(), "Untitled");
        assert_eq!(payload.canonical_link(), "");
    }

    #[test]
    fn test_undecodable_row_yields_canonical_only_record() {
        let row = ToolDBResponse {
            id: 3,
            name: "Scribe".to_string(),
            link: "https://scribe.example".to_string(),
            payload: "{not json".to_string(),
            created_at: Utc::now(),
        };

        let record = ToolRecord::from(row);
        assert_eq!(record.name, "Scribe");
        assert_eq!(record.payload.name.as_deref(), Some("Scribe"));
        assert_eq!(record.payload.official_website.as_deref(), Some("https://scribe.example"));
        assert!(record.payload.description.is_none());
    }
}
