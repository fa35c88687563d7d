//! SQLite GroupRepository implementation.

use sqlx::SqlitePool;
use tracing::debug;

use crate::db::utils::require_non_empty;
use crate::db::{DbError, DbResult, GroupRepository};

/// SQLx-backed group repository.
pub struct SqliteGroupRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> GroupRepository for SqliteGroupRepository<'a> {
    async fn find_id(&self, name: &str) -> DbResult<Option<i64>> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM groups WHERE group_name = $1")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;
        Ok(id)
    }

    async fn resolve_id(&self, name: &str) -> DbResult<i64> {
        self.find_id(name)
            .await?
            .ok_or_else(|| DbError::not_found("Group", name))
    }

    async fn get_or_create(&self, name: &str) -> DbResult<i64> {
        require_non_empty("group", name)?;

        if let Some(id) = self.find_id(name).await? {
            return Ok(id);
        }

        // A no-op DO UPDATE makes RETURNING yield the id even when a
        // concurrent insert created the group first.
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO groups (group_name) VALUES ($1) \
             ON CONFLICT (group_name) DO UPDATE SET group_name = excluded.group_name \
             RETURNING id",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        debug!(group = name, id, "Created group");
        Ok(id)
    }
}
