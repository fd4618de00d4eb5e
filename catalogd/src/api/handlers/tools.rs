use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        CreatedResponse, MessageResponse,
        tools::{ToolPayload, ToolRecord},
    },
    auth::CurrentAdmin,
    db::{
        errors::DbError,
        handlers::{Repository, Tools},
        models::tools::{ToolCreateDBRequest, ToolUpdateDBRequest},
    },
    errors::Error,
    types::ToolId,
};

/// List all tools, newest first.
#[utoipa::path(
    get,
    path = "/tools",
    tag = "tools",
    responses(
        (status = 200, description = "All tool records, newest first", body = Vec<ToolRecord>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_tools(State(state): State<AppState>) -> Result<Json<Vec<ToolRecord>>, Error> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let tools = Tools::new(&mut conn).list(&()).await?;

    Ok(Json(tools.into_iter().map(ToolRecord::from).collect()))
}

/// Create a tool record.
#[utoipa::path(
    post,
    path = "/tools",
    tag = "tools",
    request_body = ToolPayload,
    responses(
        (status = 201, description = "Tool created", body = CreatedResponse),
        (status = 403, description = "No token provided"),
        (status = 401, description = "Token invalid or expired"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_tool(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(payload): Json<ToolPayload>,
) -> Result<(StatusCode, Json<CreatedResponse>), Error> {
    let request = ToolCreateDBRequest::from_payload(&payload)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let created = Tools::new(&mut conn).create(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Tool created".to_string(),
            id: created.id,
        }),
    ))
}

/// Overwrite a tool record.
#[utoipa::path(
    put,
    path = "/tools/{id}",
    tag = "tools",
    request_body = ToolPayload,
    params(("id" = i64, Path, description = "Store id of the tool")),
    responses(
        (status = 200, description = "Tool updated", body = MessageResponse),
        (status = 404, description = "No tool with this id"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(id))]
pub async fn update_tool(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<ToolId>,
    Json(payload): Json<ToolPayload>,
) -> Result<Json<MessageResponse>, Error> {
    let request = ToolUpdateDBRequest::from_payload(&payload)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    match Tools::new(&mut conn).update(id, &request).await {
        Ok(_) => Ok(Json(MessageResponse {
            message: "Tool updated".to_string(),
        })),
        Err(DbError::NotFound) => Err(Error::NotFound { resource: "Tool", id }),
        Err(e) => Err(e.into()),
    }
}

/// Delete a tool record.
#[utoipa::path(
    delete,
    path = "/tools/{id}",
    tag = "tools",
    params(("id" = i64, Path, description = "Store id of the tool")),
    responses(
        (status = 200, description = "Tool deleted", body = MessageResponse),
        (status = 404, description = "No tool with this id"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(id))]
pub async fn delete_tool(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<ToolId>,
) -> Result<Json<MessageResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    if !Tools::new(&mut conn).delete(id).await? {
        return Err(Error::NotFound { resource: "Tool", id });
    }

    Ok(Json(MessageResponse {
        message: "Tool deleted".to_string(),
    }))
}
