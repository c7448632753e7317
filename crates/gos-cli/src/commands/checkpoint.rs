use anyhow::Result;
use gos_core::repository::Repository;
use owo_colors::OwoColorize;

use crate::cli::{CheckpointCommand, CheckpointSubcommand};
use crate::config::Context;
use crate::util::{resolve_checkpoint_id, short_id};
use crate::views::table::display_checkpoints;

pub async fn checkpoint_command(
    repo: &impl Repository,
    command: CheckpointCommand,
    context: &Context,
) -> Result<()> {
    match command.command {
        CheckpointSubcommand::Add(cmd) => {
            let checkpoint = repo.add_checkpoint(&cmd.battlefront, cmd.title).await?;
            println!(
                "{} Added checkpoint #{} to '{}': {} ({})",
                "✓".green().bold(),
                checkpoint.position,
                cmd.battlefront,
                checkpoint.title.bright_white().bold(),
                short_id(&checkpoint.id).yellow()
            );
        }
        CheckpointSubcommand::List(cmd) => {
            let checkpoints = repo.find_checkpoints(&cmd.battlefront).await?;
            display_checkpoints(&checkpoints, &context.clock);
        }
        CheckpointSubcommand::Done(cmd) => {
            let id = resolve_checkpoint_id(repo, &cmd.id).await?;
            let checkpoint = repo.complete_checkpoint(id).await?;
            println!("Reached checkpoint: '{}'", checkpoint.title);
        }
        CheckpointSubcommand::Reopen(cmd) => {
            let id = resolve_checkpoint_id(repo, &cmd.id).await?;
            let checkpoint = repo.reopen_checkpoint(id).await?;
            println!("Reopened checkpoint: '{}'", checkpoint.title);
        }
        CheckpointSubcommand::Move(cmd) => {
            let id = resolve_checkpoint_id(repo, &cmd.id).await?;
            let checkpoint = repo.move_checkpoint(id, cmd.position).await?;
            println!(
                "Moved checkpoint '{}' to position {}",
                checkpoint.title, checkpoint.position
            );
        }
        CheckpointSubcommand::Delete(cmd) => {
            let id = resolve_checkpoint_id(repo, &cmd.id).await?;
            repo.delete_checkpoint(id).await?;
            println!("Deleted checkpoint {}", short_id(&id));
        }
    }
    Ok(())
}
