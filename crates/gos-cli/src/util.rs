use anyhow::{anyhow, Result};
use gos_core::error::CoreError;
use gos_core::repository::{CheckpointRepository, MissionRepository};
use uuid::Uuid;

pub async fn resolve_mission_id(repo: &impl MissionRepository, short_id: &str) -> Result<Uuid> {
    check_short_id(short_id)?;
    let missions = repo.find_missions_by_short_id_prefix(short_id).await?;
    pick_unique(
        "mission",
        short_id,
        missions.into_iter().map(|m| (m.id, m.title)).collect(),
    )
}

pub async fn resolve_checkpoint_id(repo: &impl CheckpointRepository, short_id: &str) -> Result<Uuid> {
    check_short_id(short_id)?;
    let checkpoints = repo.find_checkpoints_by_short_id_prefix(short_id).await?;
    pick_unique(
        "checkpoint",
        short_id,
        checkpoints.into_iter().map(|c| (c.id, c.title)).collect(),
    )
}

fn check_short_id(short_id: &str) -> Result<()> {
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    if !short_id.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        return Err(anyhow!(CoreError::InvalidInput(format!(
            "Short ID '{}' may only contain hex digits and '-'",
            short_id
        ))));
    }
    Ok(())
}

fn pick_unique(kind: &str, short_id: &str, candidates: Vec<(Uuid, String)>) -> Result<Uuid> {
    match candidates.len() {
        1 => Ok(candidates[0].0),
        0 => Err(anyhow!(CoreError::NotFound(format!(
            "No {} found with ID prefix '{}'",
            kind, short_id
        )))),
        _ => Err(anyhow!(CoreError::AmbiguousId(
            candidates
                .into_iter()
                .map(|(id, title)| (id.to_string(), title))
                .collect()
        ))),
    }
}

/// First seven characters of an ID, as shown in tables.
pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..7].to_string()
}
