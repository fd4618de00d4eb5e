//! Database repository for tool records.

use sqlx::SqliteConnection;
use tracing::instrument;

use crate::{
    db::{
        errors::Result,
        handlers::repository::Repository,
        models::tools::{ToolCreateDBRequest, ToolDBResponse, ToolUpdateDBRequest},
    },
    types::ToolId,
};

pub struct Tools<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Tools<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Tools<'c> {
    type CreateRequest = ToolCreateDBRequest;
    type UpdateRequest = ToolUpdateDBRequest;
    type Response = ToolDBResponse;
    type Id = ToolId;
    type Filter = ();

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let tool = sqlx::query_as::<_, ToolDBResponse>(
            "INSERT INTO tools (name, link, payload) VALUES (?, ?, ?)
             RETURNING id, name, link, payload, created_at",
        )
        .bind(&request.name)
        .bind(&request.link)
        .bind(&request.payload)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(tool)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let tool = sqlx::query_as::<_, ToolDBResponse>(
            "SELECT id, name, link, payload, created_at FROM tools WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(tool)
    }

    /// Full ordered scan: newest first, ties broken by id descending so
    /// same-timestamp inserts still list in reverse insertion order.
    #[instrument(skip_all, err)]
    async fn list(&mut self, _filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let tools = sqlx::query_as::<_, ToolDBResponse>(
            "SELECT id, name, link, payload, created_at FROM tools
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(tools)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tools WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Wholesale overwrite of canonical columns and payload.
    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let tool = sqlx::query_as::<_, ToolDBResponse>(
            "UPDATE tools SET name = ?, link = ?, payload = ? WHERE id = ?
             RETURNING id, name, link, payload, created_at",
        )
        .bind(&request.name)
        .bind(&request.link)
        .bind(&request.payload)
        .bind(id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::models::tools::ToolPayload, db::errors::DbError};
    use sqlx::SqlitePool;

    fn request(name: &str) -> ToolCreateDBRequest {
        ToolCreateDBRequest::from_payload(&ToolPayload {
            name: Some(name.to_string()),
            official_website: Some(format!("https://{name}.example")),
            ..Default::default()
        })
        .unwrap()
    }

    #[sqlx::test]
    async fn test_create_assigns_incrementing_ids(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Tools::new(&mut conn);

        let first = repo.create(&request("alpha")).await.unwrap();
        let second = repo.create(&request("beta")).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.name, "alpha");
        assert_eq!(first.link, "https://alpha.example");
    }

    #[sqlx::test]
    async fn test_list_orders_newest_first(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Tools::new(&mut conn);

        repo.create(&request("oldest")).await.unwrap();
        repo.create(&request("middle")).await.unwrap();
        repo.create(&request("newest")).await.unwrap();

        let listed = repo.list(&()).await.unwrap();
        let names: Vec<_> = listed.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["newest", "middle", "oldest"]);
    }

    #[sqlx::test]
    async fn test_update_overwrites_wholesale(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Tools::new(&mut conn);

        let created = repo.create(&request("before")).await.unwrap();

        let update = ToolUpdateDBRequest::from_payload(&ToolPayload {
            name: Some("after".to_string()),
            ..Default::default()
        })
        .unwrap();
        let updated = repo.update(created.id, &update).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "after");
        // Link came from official_website before; the overwrite dropped it
        assert_eq!(updated.link, "");
    }

    #[sqlx::test]
    async fn test_update_missing_row_is_not_found(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Tools::new(&mut conn);

        let update = ToolUpdateDBRequest::from_payload(&ToolPayload::default()).unwrap();
        let result = repo.update(4242, &update).await;
        assert!(matches!(result, Err(DbError::NotFound)));
    }

    #[sqlx::test]
    async fn test_delete_reports_whether_a_row_matched(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Tools::new(&mut conn);

        let created = repo.create(&request("ephemeral")).await.unwrap();
        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }
}
