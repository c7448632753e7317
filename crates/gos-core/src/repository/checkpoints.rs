use crate::error::CoreError;
use crate::models::Checkpoint;
use crate::repository::{
    battlefront_id_by_name, require_text, short_id_pattern, CheckpointRepository, SqliteRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use uuid::Uuid;

async fn fetch_checkpoint(conn: &mut SqliteConnection, id: Uuid) -> Result<Checkpoint, CoreError> {
    sqlx::query_as("SELECT * FROM checkpoints WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Checkpoint '{}' not found", id)))
}

impl SqliteRepository {
    async fn set_checkpoint_reached(
        &self,
        id: Uuid,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Checkpoint, CoreError> {
        sqlx::query_as("UPDATE checkpoints SET completed_at = $1 WHERE id = $2 RETURNING *")
            .bind(completed_at)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Checkpoint '{}' not found", id)))
    }
}

#[async_trait]
impl CheckpointRepository for SqliteRepository {
    async fn add_checkpoint(&self, battlefront_name: &str, title: String) -> Result<Checkpoint, CoreError> {
        let title = require_text("Checkpoint title", &title)?;
        let mut tx = self.pool().begin().await?;
        let battlefront_id = battlefront_id_by_name(&mut *tx, battlefront_name).await?;

        let (last_position,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(MAX(position), 0) FROM checkpoints WHERE battlefront_id = $1",
        )
        .bind(battlefront_id)
        .fetch_one(&mut *tx)
        .await?;

        let checkpoint: Checkpoint = sqlx::query_as(
            r#"INSERT INTO checkpoints (id, battlefront_id, title, position, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(battlefront_id)
        .bind(title)
        .bind(last_position + 1)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id = %checkpoint.id, position = checkpoint.position, "checkpoint added");
        Ok(checkpoint)
    }

    async fn find_checkpoint_by_id(&self, id: Uuid) -> Result<Option<Checkpoint>, CoreError> {
        let checkpoint = sqlx::query_as("SELECT * FROM checkpoints WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(checkpoint)
    }

    async fn find_checkpoints_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Checkpoint>, CoreError> {
        let checkpoints = sqlx::query_as("SELECT * FROM checkpoints WHERE lower(hex(id)) LIKE $1")
            .bind(short_id_pattern(short_id)?)
            .fetch_all(self.pool())
            .await?;
        Ok(checkpoints)
    }

    async fn find_checkpoints(&self, battlefront_name: &str) -> Result<Vec<Checkpoint>, CoreError> {
        let mut conn = self.pool().acquire().await?;
        let battlefront_id = battlefront_id_by_name(&mut *conn, battlefront_name).await?;

        let checkpoints = sqlx::query_as(
            "SELECT * FROM checkpoints WHERE battlefront_id = $1 ORDER BY position",
        )
        .bind(battlefront_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(checkpoints)
    }

    async fn complete_checkpoint(&self, id: Uuid) -> Result<Checkpoint, CoreError> {
        self.set_checkpoint_reached(id, Some(Utc::now())).await
    }

    async fn reopen_checkpoint(&self, id: Uuid) -> Result<Checkpoint, CoreError> {
        self.set_checkpoint_reached(id, None).await
    }

    async fn move_checkpoint(&self, id: Uuid, position: i64) -> Result<Checkpoint, CoreError> {
        let mut tx = self.pool().begin().await?;
        let checkpoint = fetch_checkpoint(&mut *tx, id).await?;

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM checkpoints WHERE battlefront_id = $1")
                .bind(checkpoint.battlefront_id)
                .fetch_one(&mut *tx)
                .await?;

        if !(1..=count).contains(&position) {
            return Err(CoreError::InvalidInput(format!(
                "Position must be between 1 and {}, got {}",
                count, position
            )));
        }

        // Shift the checkpoints between the old and new slot by one.
        if position < checkpoint.position {
            sqlx::query(
                r#"UPDATE checkpoints SET position = position + 1
                WHERE battlefront_id = $1 AND position >= $2 AND position < $3"#,
            )
            .bind(checkpoint.battlefront_id)
            .bind(position)
            .bind(checkpoint.position)
            .execute(&mut *tx)
            .await?;
        } else if position > checkpoint.position {
            sqlx::query(
                r#"UPDATE checkpoints SET position = position - 1
                WHERE battlefront_id = $1 AND position > $2 AND position <= $3"#,
            )
            .bind(checkpoint.battlefront_id)
            .bind(checkpoint.position)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }

        let moved: Checkpoint =
            sqlx::query_as("UPDATE checkpoints SET position = $1 WHERE id = $2 RETURNING *")
                .bind(position)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;
        tracing::debug!(id = %id, from = checkpoint.position, to = position, "checkpoint moved");
        Ok(moved)
    }

    async fn delete_checkpoint(&self, id: Uuid) -> Result<(), CoreError> {
        let mut tx = self.pool().begin().await?;
        let checkpoint = fetch_checkpoint(&mut *tx, id).await?;

        sqlx::query("DELETE FROM checkpoints WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE checkpoints SET position = position - 1 WHERE battlefront_id = $1 AND position > $2",
        )
        .bind(checkpoint.battlefront_id)
        .bind(checkpoint.position)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id = %id, "checkpoint deleted");
        Ok(())
    }
}
