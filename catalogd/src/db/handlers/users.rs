//! Database repository for admin identities.
//!
//! Deliberately smaller than the catalog repositories: the admin table only
//! ever needs bootstrap-create and login lookup.

use sqlx::SqliteConnection;
use tracing::instrument;

use crate::db::{
    errors::Result,
    models::users::{UserCreateDBRequest, UserDBResponse},
};

pub struct Users<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(username = %request.username), err)]
    pub async fn create(&mut self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        let user = sqlx::query_as::<_, UserDBResponse>(
            "INSERT INTO users (username, password_hash) VALUES (?, ?)
             RETURNING id, username, password_hash, created_at",
        )
        .bind(&request.username)
        .bind(&request.password_hash)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_username(&mut self, username: &str) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, UserDBResponse>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::errors::DbError;
    use sqlx::SqlitePool;

    #[sqlx::test]
    async fn test_create_and_lookup(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let created = repo
            .create(&UserCreateDBRequest {
                username: "admin".to_string(),
                password_hash: "$argon2id$stub".to_string(),
            })
            .await
            .unwrap();

        let found = repo.get_by_username("admin").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "$argon2id$stub");

        assert!(repo.get_by_username("nobody").await.unwrap().is_none());
    }

    #[sqlx::test]
    async fn test_duplicate_username_is_unique_violation(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let request = UserCreateDBRequest {
            username: "admin".to_string(),
            password_hash: "hash".to_string(),
        };
        repo.create(&request).await.unwrap();

        let result = repo.create(&request).await;
        assert!(matches!(result, Err(DbError::UniqueViolation { .. })));
    }
}
