use anyhow::{anyhow, Result};
use chrono::Utc;
use dialoguer::Confirm;
use gos_core::duration::{format_duration, parse_and_validate};
use gos_core::editing::{commit_duration_edit, DurationEditOutcome, DurationSink};
use gos_core::error::CoreError;
use gos_core::models::{MissionFilter, NewMissionData, UpdateMissionData};
use gos_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

use crate::cli::{
    AddMissionCommand, DeleteMissionCommand, DurationCommand, EditMissionCommand, ListMissionsCommand,
    MissionCommand, MissionSubcommand,
};
use crate::config::Context;
use crate::parser::{parse_due_date, parse_scheduled_time};
use crate::util::{resolve_mission_id, short_id};
use crate::views::table::display_missions;

pub async fn mission_command<R>(repo: &R, command: MissionCommand, context: &Context) -> Result<()>
where
    R: Repository + DurationSink + Sync,
{
    match command.command {
        MissionSubcommand::Add(cmd) => add_mission(repo, cmd, context).await,
        MissionSubcommand::List(cmd) => list_missions(repo, cmd, context).await,
        MissionSubcommand::Edit(cmd) => edit_mission(repo, cmd, context).await,
        MissionSubcommand::Duration(cmd) => set_duration(repo, cmd, context).await,
        MissionSubcommand::Done(cmd) => {
            let id = resolve_mission_id(repo, &cmd.id).await?;
            let mission = repo.complete_mission(id).await?;
            println!("Completed mission: '{}'", mission.title);
            Ok(())
        }
        MissionSubcommand::Abandon(cmd) => {
            let id = resolve_mission_id(repo, &cmd.id).await?;
            let mission = repo.abandon_mission(id).await?;
            println!("Abandoned mission: '{}'", mission.title);
            Ok(())
        }
        MissionSubcommand::Delete(cmd) => delete_mission(repo, cmd).await,
    }
}

async fn add_mission(repo: &impl Repository, command: AddMissionCommand, context: &Context) -> Result<()> {
    let now = Utc::now();
    let due_date = match command.due.as_deref() {
        Some(due) => parse_due_date(due, &context.clock, now)?,
        None => context.clock.today(now),
    };
    let scheduled_time = command.at.as_deref().map(parse_scheduled_time).transpose()?;
    let duration_minutes = command
        .duration
        .as_deref()
        .map(|raw| parse_and_validate(raw, &context.bounds))
        .transpose()?;

    let mission = repo
        .add_mission(NewMissionData {
            title: command.title,
            notes: command.notes,
            due_date,
            scheduled_time,
            duration_minutes,
            battlefront_name: command.battlefront,
        })
        .await?;

    let info_style = Style::new().blue();
    println!(
        "{} Created mission: {}",
        "✓".style(Style::new().green().bold()),
        mission.title.bright_white().bold()
    );
    println!("  {} ID: {}", "→".style(info_style), short_id(&mission.id).yellow());
    println!(
        "  {} Due: {}",
        "→".style(info_style),
        context.clock.format_relative_day(mission.due_date, now)
    );
    if let Some(minutes) = mission.duration_minutes {
        println!("  {} Duration: {}", "→".style(info_style), format_duration(minutes));
    }
    Ok(())
}

async fn list_missions(repo: &impl Repository, command: ListMissionsCommand, context: &Context) -> Result<()> {
    let mut filter = if command.all {
        MissionFilter::default()
    } else {
        MissionFilter::pending()
    };
    filter.battlefront_name = command.battlefront;

    let missions = repo.find_missions(&filter).await?;
    display_missions(&missions, &context.clock, Utc::now());
    Ok(())
}

async fn edit_mission(repo: &impl Repository, command: EditMissionCommand, context: &Context) -> Result<()> {
    let id = resolve_mission_id(repo, &command.id).await?;
    let now = Utc::now();

    let scheduled_time = if command.at_clear {
        Some(None)
    } else {
        command
            .at
            .as_deref()
            .map(|at| parse_scheduled_time(at).map(Some))
            .transpose()?
    };
    let duration_minutes = if command.duration_clear {
        Some(None)
    } else {
        command
            .duration
            .as_deref()
            .map(|raw| parse_and_validate(raw, &context.bounds).map(Some))
            .transpose()?
    };

    let update = UpdateMissionData {
        title: command.title,
        notes: if command.notes_clear { Some(None) } else { command.notes.map(Some) },
        due_date: command
            .due
            .as_deref()
            .map(|due| parse_due_date(due, &context.clock, now))
            .transpose()?,
        scheduled_time,
        duration_minutes,
        battlefront_name: if command.battlefront_clear {
            Some(None)
        } else {
            command.battlefront.map(Some)
        },
    };

    if update.is_empty() {
        return Err(anyhow!(CoreError::InvalidInput(
            "Nothing to change. Pass at least one field to edit.".to_string()
        )));
    }

    let mission = repo.update_mission(id, update).await?;
    println!("Updated mission: '{}'", mission.title);
    Ok(())
}

async fn set_duration<R>(repo: &R, command: DurationCommand, context: &Context) -> Result<()>
where
    R: Repository + DurationSink + Sync,
{
    let id = resolve_mission_id(repo, &command.id).await?;

    match commit_duration_edit(repo, id, &command.duration, &context.bounds).await {
        DurationEditOutcome::Saved(minutes) => {
            println!(
                "{} Duration set to {}",
                "✓".style(Style::new().green().bold()),
                format_duration(minutes).bright_white().bold()
            );
            Ok(())
        }
        outcome => Err(anyhow!(outcome
            .message()
            .unwrap_or_else(|| "Duration was not saved".to_string()))),
    }
}

async fn delete_mission(repo: &impl Repository, command: DeleteMissionCommand) -> Result<()> {
    let id = resolve_mission_id(repo, &command.id).await?;
    let mission = repo
        .find_mission_by_id(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Mission '{}' not found", id)))?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete mission '{}'?",
                mission.title
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_mission(id).await?;
    println!("Deleted mission: '{}'", mission.title);
    Ok(())
}
