use crate::error::CoreError;
use crate::models::{Battlefront, NewBattlefrontData};
use crate::palette::{resolve_color, DEFAULT_COLOR};
use crate::repository::{require_text, BattlefrontRepository, SqliteRepository};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl BattlefrontRepository for SqliteRepository {
    async fn add_battlefront(&self, data: NewBattlefrontData) -> Result<Battlefront, CoreError> {
        let name = require_text("Battlefront name", &data.name)?;
        let color = match data.color.as_deref() {
            Some(color) => resolve_color(color)?,
            None => DEFAULT_COLOR.to_string(),
        };

        if self.find_battlefront_by_name(&name).await?.is_some() {
            return Err(CoreError::InvalidInput(format!(
                "Battlefront '{}' already exists",
                name
            )));
        }

        let battlefront: Battlefront = sqlx::query_as(
            r#"INSERT INTO battlefronts (id, name, description, color, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, color, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&name)
        .bind(data.description)
        .bind(color)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;

        tracing::debug!(id = %battlefront.id, name = %battlefront.name, "battlefront added");
        Ok(battlefront)
    }

    async fn find_battlefront_by_id(&self, id: Uuid) -> Result<Option<Battlefront>, CoreError> {
        let battlefront = sqlx::query_as("SELECT * FROM battlefronts WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(battlefront)
    }

    async fn find_battlefront_by_name(&self, name: &str) -> Result<Option<Battlefront>, CoreError> {
        let battlefront = sqlx::query_as("SELECT * FROM battlefronts WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        Ok(battlefront)
    }

    async fn find_battlefronts(&self) -> Result<Vec<Battlefront>, CoreError> {
        let battlefronts = sqlx::query_as(
            "SELECT id, name, description, color, created_at FROM battlefronts ORDER BY name",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(battlefronts)
    }

    async fn delete_battlefront(&self, name: &str) -> Result<(), CoreError> {
        let battlefront = self
            .find_battlefront_by_name(name)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Battlefront '{}' not found", name)))?;

        let mission_count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM missions WHERE battlefront_id = $1")
                .bind(battlefront.id)
                .fetch_one(self.pool())
                .await?;

        if mission_count.0 > 0 {
            return Err(CoreError::InvalidInput(format!(
                "Cannot delete battlefront '{}' because it has {} associated mission(s). Delete or move the missions first.",
                name, mission_count.0
            )));
        }

        // Checkpoints go with the battlefront (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM battlefronts WHERE id = $1")
            .bind(battlefront.id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Battlefront '{}' not found", name)));
        }
        tracing::debug!(name, "battlefront deleted");
        Ok(())
    }
}
