use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// A user-defined front of work that groups missions and checkpoints.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Battlefront {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// `#rrggbb`
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewBattlefrontData {
    pub name: String,
    pub description: Option<String>,
    /// Palette name or `#rrggbb`; the default gray when absent.
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum MissionStatus {
    Pending,
    Completed,
    Abandoned,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid mission status: {0}")]
pub struct ParseMissionStatusError(String);

impl FromStr for MissionStatus {
    type Err = ParseMissionStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(MissionStatus::Pending),
            "completed" | "done" => Ok(MissionStatus::Completed),
            "abandoned" => Ok(MissionStatus::Abandoned),
            _ => Err(ParseMissionStatusError(s.to_string())),
        }
    }
}

impl std::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissionStatus::Pending => write!(f, "pending"),
            MissionStatus::Completed => write!(f, "completed"),
            MissionStatus::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// A single task with a due date and optional scheduled time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Mission {
    pub id: Uuid,
    pub title: String,
    pub notes: Option<String>,
    pub status: MissionStatus,
    /// Calendar date in the configured timezone
    pub due_date: NaiveDate,
    pub scheduled_time: Option<NaiveTime>,
    pub duration_minutes: Option<u32>,
    pub battlefront_id: Option<Uuid>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Mission {
    pub fn is_open(&self) -> bool {
        self.status == MissionStatus::Pending
    }
}

/// Mission joined with its battlefront, as listed by views.
#[derive(Debug, Clone, FromRow)]
pub struct MissionWithBattlefront {
    #[sqlx(flatten)]
    pub mission: Mission,
    pub battlefront_name: Option<String>,
    pub battlefront_color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMissionData {
    pub title: String,
    pub notes: Option<String>,
    pub due_date: NaiveDate,
    pub scheduled_time: Option<NaiveTime>,
    /// Already validated minutes
    pub duration_minutes: Option<u32>,
    pub battlefront_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateMissionData {
    pub title: Option<String>,
    pub notes: Option<Option<String>>,
    pub due_date: Option<NaiveDate>,
    pub scheduled_time: Option<Option<NaiveTime>>,
    pub duration_minutes: Option<Option<u32>>,
    pub battlefront_name: Option<Option<String>>,
}

impl UpdateMissionData {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.notes.is_none()
            && self.due_date.is_none()
            && self.scheduled_time.is_none()
            && self.duration_minutes.is_none()
            && self.battlefront_name.is_none()
    }
}

/// Which missions to list. Every field narrows the result.
#[derive(Debug, Clone, Default)]
pub struct MissionFilter {
    pub status: Option<MissionStatus>,
    pub battlefront_name: Option<String>,
    /// Inclusive
    pub due_from: Option<NaiveDate>,
    /// Inclusive
    pub due_until: Option<NaiveDate>,
}

impl MissionFilter {
    pub fn pending() -> Self {
        Self {
            status: Some(MissionStatus::Pending),
            ..Default::default()
        }
    }

    pub fn due_between(from: NaiveDate, until: NaiveDate) -> Self {
        Self {
            due_from: Some(from),
            due_until: Some(until),
            ..Default::default()
        }
    }
}

/// Counts for a window of due dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct MissionStats {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub abandoned: i64,
    /// Sum of durations over pending missions
    pub planned_minutes: i64,
    /// Sum of durations over completed missions
    pub completed_minutes: i64,
}

/// An ordered milestone within a battlefront.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Checkpoint {
    pub id: Uuid,
    pub battlefront_id: Uuid,
    pub title: String,
    /// 1-based, dense within a battlefront
    pub position: i64,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Checkpoint {
    pub fn is_reached(&self) -> bool {
        self.completed_at.is_some()
    }
}
