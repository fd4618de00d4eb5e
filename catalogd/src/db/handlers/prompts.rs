//! Database repository for prompt records.
//!
//! Reads join the `tools` table so each prompt carries its owning tool's name
//! when that tool still exists. The reference is advisory, so the join is a
//! LEFT JOIN and orphaned prompts list with `tool_name = NULL`.

use sqlx::SqliteConnection;
use tracing::instrument;

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::prompts::{PromptCreateDBRequest, PromptDBResponse, PromptUpdateDBRequest},
    },
    types::PromptId,
};

const SELECT_JOINED: &str = "SELECT p.id, p.title, p.tool_id, t.name AS tool_name, p.payload, p.created_at
     FROM prompts p LEFT JOIN tools t ON t.id = p.tool_id";

pub struct Prompts<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Prompts<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Prompts<'c> {
    type CreateRequest = PromptCreateDBRequest;
    type UpdateRequest = PromptUpdateDBRequest;
    type Response = PromptDBResponse;
    type Id = PromptId;
    type Filter = ();

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO prompts (title, tool_id, payload) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&request.title)
        .bind(request.tool_id)
        .bind(&request.payload)
        .fetch_one(&mut *self.db)
        .await?;

        // Re-read through the join so the response carries tool_name
        self.get_by_id(id).await?.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let prompt = sqlx::query_as::<_, PromptDBResponse>(&format!("{SELECT_JOINED} WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(prompt)
    }

    #[instrument(skip_all, err)]
    async fn list(&mut self, _filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let prompts = sqlx::query_as::<_, PromptDBResponse>(&format!(
            "{SELECT_JOINED} ORDER BY p.created_at DESC, p.id DESC"
        ))
        .fetch_all(&mut *self.db)
        .await?;

        Ok(prompts)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let result = sqlx::query("UPDATE prompts SET title = ?, tool_id = ?, payload = ? WHERE id = ?")
            .bind(&request.title)
            .bind(request.tool_id)
            .bind(&request.payload)
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        self.get_by_id(id).await?.ok_or(DbError::NotFound)
    }
}
