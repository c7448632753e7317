use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    Battlefront, Checkpoint, Mission, MissionFilter, MissionStats, MissionWithBattlefront,
    NewBattlefrontData, NewMissionData, UpdateMissionData,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqliteConnection;
use uuid::Uuid;

pub mod battlefronts;
pub mod checkpoints;
pub mod missions;

/// Domain-specific trait for battlefront operations
#[async_trait]
pub trait BattlefrontRepository {
    async fn add_battlefront(&self, data: NewBattlefrontData) -> Result<Battlefront, CoreError>;
    async fn find_battlefront_by_id(&self, id: Uuid) -> Result<Option<Battlefront>, CoreError>;
    async fn find_battlefront_by_name(&self, name: &str) -> Result<Option<Battlefront>, CoreError>;
    async fn find_battlefronts(&self) -> Result<Vec<Battlefront>, CoreError>;
    async fn delete_battlefront(&self, name: &str) -> Result<(), CoreError>;
}

/// Domain-specific trait for mission operations
#[async_trait]
pub trait MissionRepository {
    async fn add_mission(&self, data: NewMissionData) -> Result<Mission, CoreError>;
    async fn find_mission_by_id(&self, id: Uuid) -> Result<Option<Mission>, CoreError>;
    async fn find_missions_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Mission>, CoreError>;
    async fn find_missions(&self, filter: &MissionFilter) -> Result<Vec<MissionWithBattlefront>, CoreError>;
    async fn update_mission(&self, id: Uuid, data: UpdateMissionData) -> Result<Mission, CoreError>;
    async fn complete_mission(&self, id: Uuid) -> Result<Mission, CoreError>;
    async fn abandon_mission(&self, id: Uuid) -> Result<Mission, CoreError>;
    async fn delete_mission(&self, id: Uuid) -> Result<(), CoreError>;
    async fn mission_stats(&self, from: NaiveDate, until: NaiveDate) -> Result<MissionStats, CoreError>;
}

/// Domain-specific trait for checkpoint operations
#[async_trait]
pub trait CheckpointRepository {
    async fn add_checkpoint(&self, battlefront_name: &str, title: String) -> Result<Checkpoint, CoreError>;
    async fn find_checkpoint_by_id(&self, id: Uuid) -> Result<Option<Checkpoint>, CoreError>;
    async fn find_checkpoints_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Checkpoint>, CoreError>;
    async fn find_checkpoints(&self, battlefront_name: &str) -> Result<Vec<Checkpoint>, CoreError>;
    async fn complete_checkpoint(&self, id: Uuid) -> Result<Checkpoint, CoreError>;
    async fn reopen_checkpoint(&self, id: Uuid) -> Result<Checkpoint, CoreError>;
    async fn move_checkpoint(&self, id: Uuid, position: i64) -> Result<Checkpoint, CoreError>;
    async fn delete_checkpoint(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Main repository trait that composes all domain traits
pub trait Repository: BattlefrontRepository + MissionRepository + CheckpointRepository {}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}

/// `LIKE` pattern matching the hex form of a BLOB uuid by prefix.
///
/// Only hex digits and `-` are accepted, so `%` and `_` never reach the pattern.
pub(crate) fn short_id_pattern(short_id: &str) -> Result<String, CoreError> {
    if let Some(c) = short_id.chars().find(|c| !c.is_ascii_hexdigit() && *c != '-') {
        return Err(CoreError::InvalidInput(format!(
            "Short ID '{}' contains '{}'; only hex digits and '-' are allowed",
            short_id, c
        )));
    }
    let mut pattern: String = short_id
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    pattern.push('%');
    Ok(pattern)
}

pub(crate) async fn battlefront_id_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Uuid, CoreError> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM battlefronts WHERE name = $1")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
    row.map(|(id,)| id)
        .ok_or_else(|| CoreError::NotFound(format!("Battlefront '{}' not found", name)))
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}
