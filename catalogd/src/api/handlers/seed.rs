use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::{MessageResponse, seed::SeedRequest},
    db::{
        errors::DbError,
        handlers::{Prompts, Repository, Tools},
        models::{prompts::PromptCreateDBRequest, tools::ToolCreateDBRequest},
    },
    errors::Error,
};

/// Install a batch of records into an empty catalog.
///
/// The emptiness check and the inserts share one transaction, so two
/// concurrent seed calls cannot both insert: the loser observes a non-empty
/// table and becomes a no-op.
#[utoipa::path(
    post,
    path = "/seed",
    tag = "seed",
    request_body = SeedRequest,
    responses(
        (status = 200, description = "\"Seeded\" when records were installed, \"Already seeded\" when the catalog had data", body = MessageResponse),
    )
)]
#[tracing::instrument(skip_all, fields(tools = request.tools.len(), prompts = request.prompts.len()))]
pub async fn seed_catalog(State(state): State<AppState>, Json(request): Json<SeedRequest>) -> Result<Json<MessageResponse>, Error> {
    let mut tx = state.db.begin().await.map_err(DbError::from)?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tools")
        .fetch_one(&mut *tx)
        .await
        .map_err(DbError::from)?;

    if existing > 0 {
        tracing::info!(existing, "Catalog already has data, skipping seed");
        return Ok(Json(MessageResponse {
            message: "Already seeded".to_string(),
        }));
    }

    {
        let mut tools = Tools::new(&mut tx);
        for payload in &request.tools {
            tools.create(&ToolCreateDBRequest::from_payload(payload)?).await?;
        }
    }
    {
        let mut prompts = Prompts::new(&mut tx);
        for payload in &request.prompts {
            prompts.create(&PromptCreateDBRequest::from_payload(payload)?).await?;
        }
    }

    tx.commit().await.map_err(DbError::from)?;
    tracing::info!(
        tools = request.tools.len(),
        prompts = request.prompts.len(),
        "Seeded catalog"
    );

    Ok(Json(MessageResponse {
        message: "Seeded".to_string(),
    }))
}
