//! Editing a mission's duration from raw user input.
//!
//! The raw text is parsed and validated first. Only a valid value reaches the
//! [`DurationSink`]; a sink failure is reported with a generic message so
//! storage details never reach the person typing.

use crate::duration::{parse_duration, validate_duration, DurationBounds, DurationError};
use crate::error::CoreError;
use async_trait::async_trait;
use uuid::Uuid;

/// Message shown when the sink rejects a valid duration.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save duration";

/// Where an accepted duration is persisted.
#[async_trait]
pub trait DurationSink {
    async fn save_duration(&self, mission_id: Uuid, minutes: u32) -> Result<(), CoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationEditOutcome {
    Saved(u32),
    /// The input never reached the sink.
    Rejected(DurationError),
    Failed(String),
}

impl DurationEditOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, DurationEditOutcome::Saved(_))
    }

    /// Text to show the user when the edit did not go through.
    pub fn message(&self) -> Option<String> {
        match self {
            DurationEditOutcome::Saved(_) => None,
            DurationEditOutcome::Rejected(err) => Some(err.to_string()),
            DurationEditOutcome::Failed(message) => Some(message.clone()),
        }
    }
}

pub async fn commit_duration_edit<S>(
    sink: &S,
    mission_id: Uuid,
    raw: &str,
    bounds: &DurationBounds,
) -> DurationEditOutcome
where
    S: DurationSink + Sync + ?Sized,
{
    let minutes = match validate_duration(parse_duration(raw), bounds) {
        Ok(minutes) => minutes,
        Err(err) => return DurationEditOutcome::Rejected(err),
    };

    match sink.save_duration(mission_id, minutes).await {
        Ok(()) => DurationEditOutcome::Saved(minutes),
        Err(err) => {
            tracing::warn!(mission = %mission_id, minutes, error = %err, "saving duration failed");
            DurationEditOutcome::Failed(SAVE_FAILED_MESSAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        saved: Mutex<Vec<(Uuid, u32)>>,
        fail: bool,
    }

    #[async_trait]
    impl DurationSink for RecordingSink {
        async fn save_duration(&self, mission_id: Uuid, minutes: u32) -> Result<(), CoreError> {
            if self.fail {
                return Err(CoreError::NotFound(mission_id.to_string()));
            }
            self.saved.lock().unwrap().push((mission_id, minutes));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_valid_input_is_saved() {
        let sink = RecordingSink::default();
        let id = Uuid::new_v4();

        let outcome = commit_duration_edit(&sink, id, "1h 30m", &DurationBounds::default()).await;

        assert_eq!(outcome, DurationEditOutcome::Saved(90));
        assert!(outcome.is_saved());
        assert_eq!(outcome.message(), None);
        assert_eq!(*sink.saved.lock().unwrap(), vec![(id, 90)]);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_sink() {
        let sink = RecordingSink::default();
        let bounds = DurationBounds::default();

        let garbage = commit_duration_edit(&sink, Uuid::new_v4(), "ninety", &bounds).await;
        assert_eq!(garbage, DurationEditOutcome::Rejected(DurationError::InvalidFormat));

        let short = commit_duration_edit(&sink, Uuid::new_v4(), "3", &bounds).await;
        assert_eq!(
            short.message().as_deref(),
            Some("Duration must be at least 5 minutes")
        );

        assert!(sink.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_is_generic() {
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };

        let outcome = commit_duration_edit(&sink, Uuid::new_v4(), "45m", &DurationBounds::default()).await;

        assert_eq!(outcome, DurationEditOutcome::Failed(SAVE_FAILED_MESSAGE.to_string()));
        assert_eq!(outcome.message().as_deref(), Some("Failed to save duration"));
    }
}
