use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        CreatedResponse, MessageResponse,
        prompts::{PromptPayload, PromptRecord},
    },
    auth::CurrentAdmin,
    db::{
        errors::DbError,
        handlers::{Prompts, Repository},
        models::prompts::{PromptCreateDBRequest, PromptUpdateDBRequest},
    },
    errors::Error,
    types::PromptId,
};

/// List all prompts, newest first, each joined with its owning tool's name.
#[utoipa::path(
    get,
    path = "/prompts",
    tag = "prompts",
    responses(
        (status = 200, description = "All prompt records, newest first", body = Vec<PromptRecord>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_prompts(State(state): State<AppState>) -> Result<Json<Vec<PromptRecord>>, Error> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let prompts = Prompts::new(&mut conn).list(&()).await?;

    Ok(Json(prompts.into_iter().map(PromptRecord::from).collect()))
}

/// Create a prompt record.
#[utoipa::path(
    post,
    path = "/prompts",
    tag = "prompts",
    request_body = PromptPayload,
    responses(
        (status = 201, description = "Prompt created", body = CreatedResponse),
        (status = 403, description = "No token provided"),
        (status = 401, description = "Token invalid or expired"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_prompt(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(payload): Json<PromptPayload>,
) -> Result<(StatusCode, Json<CreatedResponse>), Error> {
    let request = PromptCreateDBRequest::from_payload(&payload)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let created = Prompts::new(&mut conn).create(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Prompt created".to_string(),
            id: created.id,
        }),
    ))
}

/// Overwrite a prompt record.
#[utoipa::path(
    put,
    path = "/prompts/{id}",
    tag = "prompts",
    request_body = PromptPayload,
    params(("id" = i64, Path, description = "Store id of the prompt")),
    responses(
        (status = 200, description = "Prompt updated", body = MessageResponse),
        (status = 404, description = "No prompt with this id"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(id))]
pub async fn update_prompt(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<PromptId>,
    Json(payload): Json<PromptPayload>,
) -> Result<Json<MessageResponse>, Error> {
    let request = PromptUpdateDBRequest::from_payload(&payload)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    match Prompts::new(&mut conn).update(id, &request).await {
        Ok(_) => Ok(Json(MessageResponse {
            message: "Prompt updated".to_string(),
        })),
        Err(DbError::NotFound) => Err(Error::NotFound { resource: "Prompt", id }),
        Err(e) => Err(e.into()),
    }
}

/// Delete a prompt record.
#[utoipa::path(
    delete,
    path = "/prompts/{id}",
    tag = "prompts",
    params(("id" = i64, Path, description = "Store id of the prompt")),
    responses(
        (status = 200, description = "Prompt deleted", body = MessageResponse),
        (status = 404, description = "No prompt with this id"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(id))]
pub async fn delete_prompt(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<PromptId>,
) -> Result<Json<MessageResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    if !Prompts::new(&mut conn).delete(id).await? {
        return Err(Error::NotFound { resource: "Prompt", id });
    }

    Ok(Json(MessageResponse {
        message: "Prompt deleted".to_string(),
    }))
}
