use crate::editing::DurationSink;
use crate::error::CoreError;
use crate::models::{
    Mission, MissionFilter, MissionStats, MissionStatus, MissionWithBattlefront, NewMissionData,
    UpdateMissionData,
};
use crate::repository::{
    battlefront_id_by_name, require_text, short_id_pattern, MissionRepository, SqliteRepository,
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

const MISSION_DETAILS_SELECT: &str = r#"SELECT
    m.id, m.title, m.notes, m.status, m.due_date, m.scheduled_time, m.duration_minutes,
    m.battlefront_id, m.completed_at, m.created_at, m.updated_at,
    b.name AS battlefront_name, b.color AS battlefront_color
FROM missions m
LEFT JOIN battlefronts b ON b.id = m.battlefront_id
WHERE 1 = 1"#;

impl SqliteRepository {
    async fn transition_mission(&self, id: Uuid, status: MissionStatus) -> Result<Mission, CoreError> {
        let mut tx = self.pool().begin().await?;

        let mission: Mission = sqlx::query_as("SELECT * FROM missions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Mission '{}' not found", id)))?;

        if !mission.is_open() {
            return Err(CoreError::InvalidInput(format!(
                "Mission '{}' is already {}",
                mission.title, mission.status
            )));
        }

        let now = Utc::now();
        let completed_at = (status == MissionStatus::Completed).then_some(now);
        let updated: Mission = sqlx::query_as(
            r#"UPDATE missions
            SET status = $1, completed_at = $2, updated_at = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(completed_at)
        .bind(now)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id = %id, status = %status, "mission status changed");
        Ok(updated)
    }
}

#[async_trait]
impl MissionRepository for SqliteRepository {
    async fn add_mission(&self, data: NewMissionData) -> Result<Mission, CoreError> {
        let title = require_text("Mission title", &data.title)?;
        let mut tx = self.pool().begin().await?;

        let battlefront_id = match data.battlefront_name.as_deref() {
            Some(name) => Some(battlefront_id_by_name(&mut *tx, name).await?),
            None => None,
        };

        let now = Utc::now();
        let mission: Mission = sqlx::query_as(
            r#"INSERT INTO missions
                (id, title, notes, status, due_date, scheduled_time, duration_minutes,
                 battlefront_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(data.notes)
        .bind(MissionStatus::Pending)
        .bind(data.due_date)
        .bind(data.scheduled_time)
        .bind(data.duration_minutes)
        .bind(battlefront_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id = %mission.id, due = %mission.due_date, "mission added");
        Ok(mission)
    }

    async fn find_mission_by_id(&self, id: Uuid) -> Result<Option<Mission>, CoreError> {
        let mission = sqlx::query_as("SELECT * FROM missions WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(mission)
    }

    async fn find_missions_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Mission>, CoreError> {
        let missions = sqlx::query_as("SELECT * FROM missions WHERE lower(hex(id)) LIKE $1")
            .bind(short_id_pattern(short_id)?)
            .fetch_all(self.pool())
            .await?;
        Ok(missions)
    }

    async fn find_missions(&self, filter: &MissionFilter) -> Result<Vec<MissionWithBattlefront>, CoreError> {
        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new(MISSION_DETAILS_SELECT);

        if let Some(status) = filter.status {
            query_builder.push(" AND m.status = ").push_bind(status);
        }
        if let Some(name) = &filter.battlefront_name {
            query_builder.push(" AND b.name = ").push_bind(name.clone());
        }
        if let Some(from) = filter.due_from {
            query_builder.push(" AND m.due_date >= ").push_bind(from);
        }
        if let Some(until) = filter.due_until {
            query_builder.push(" AND m.due_date <= ").push_bind(until);
        }
        query_builder.push(
            " ORDER BY m.due_date, m.scheduled_time IS NULL, m.scheduled_time, m.created_at",
        );

        let missions = query_builder
            .build_query_as::<MissionWithBattlefront>()
            .fetch_all(self.pool())
            .await?;
        Ok(missions)
    }

    async fn update_mission(&self, id: Uuid, data: UpdateMissionData) -> Result<Mission, CoreError> {
        let mut tx = self.pool().begin().await?;

        let mut mission: Mission = sqlx::query_as("SELECT * FROM missions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Mission '{}' not found", id)))?;

        if let Some(title) = data.title {
            mission.title = require_text("Mission title", &title)?;
        }
        if let Some(notes) = data.notes {
            mission.notes = notes;
        }
        if let Some(due_date) = data.due_date {
            mission.due_date = due_date;
        }
        if let Some(scheduled_time) = data.scheduled_time {
            mission.scheduled_time = scheduled_time;
        }
        if let Some(duration_minutes) = data.duration_minutes {
            mission.duration_minutes = duration_minutes;
        }
        if let Some(battlefront_name) = data.battlefront_name {
            mission.battlefront_id = match battlefront_name.as_deref() {
                Some(name) => Some(battlefront_id_by_name(&mut *tx, name).await?),
                None => None,
            };
        }

        let updated: Mission = sqlx::query_as(
            r#"UPDATE missions
            SET title = $1, notes = $2, due_date = $3, scheduled_time = $4,
                duration_minutes = $5, battlefront_id = $6, updated_at = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(mission.title)
        .bind(mission.notes)
        .bind(mission.due_date)
        .bind(mission.scheduled_time)
        .bind(mission.duration_minutes)
        .bind(mission.battlefront_id)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id = %id, "mission updated");
        Ok(updated)
    }

    async fn complete_mission(&self, id: Uuid) -> Result<Mission, CoreError> {
        self.transition_mission(id, MissionStatus::Completed).await
    }

    async fn abandon_mission(&self, id: Uuid) -> Result<Mission, CoreError> {
        self.transition_mission(id, MissionStatus::Abandoned).await
    }

    async fn delete_mission(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM missions WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Mission '{}' not found", id)));
        }
        tracing::debug!(id = %id, "mission deleted");
        Ok(())
    }

    async fn mission_stats(&self, from: NaiveDate, until: NaiveDate) -> Result<MissionStats, CoreError> {
        let stats = sqlx::query_as(
            r#"SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0) AS completed,
                COALESCE(SUM(CASE WHEN status = 'pending' THEN 1 ELSE 0 END), 0) AS pending,
                COALESCE(SUM(CASE WHEN status = 'abandoned' THEN 1 ELSE 0 END), 0) AS abandoned,
                COALESCE(SUM(CASE WHEN status = 'pending' THEN duration_minutes END), 0) AS planned_minutes,
                COALESCE(SUM(CASE WHEN status = 'completed' THEN duration_minutes END), 0) AS completed_minutes
            FROM missions
            WHERE due_date >= $1 AND due_date <= $2
            "#,
        )
        .bind(from)
        .bind(until)
        .fetch_one(self.pool())
        .await?;
        Ok(stats)
    }
}

#[async_trait]
impl DurationSink for SqliteRepository {
    async fn save_duration(&self, mission_id: Uuid, minutes: u32) -> Result<(), CoreError> {
        let update = UpdateMissionData {
            duration_minutes: Some(Some(minutes)),
            ..Default::default()
        };
        self.update_mission(mission_id, update).await.map(|_| ())
    }
}
