use anyhow::Result;
use dialoguer::Confirm;
use gos_core::models::NewBattlefrontData;
use gos_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

use crate::cli::{AddBattlefrontCommand, BattlefrontCommand, BattlefrontSubcommand, DeleteBattlefrontCommand};
use crate::views::table::display_battlefronts;

pub async fn battlefront_command(repo: &impl Repository, command: BattlefrontCommand) -> Result<()> {
    match command.command {
        BattlefrontSubcommand::Add(cmd) => add_battlefront(repo, cmd).await,
        BattlefrontSubcommand::List => list_battlefronts(repo).await,
        BattlefrontSubcommand::Delete(cmd) => delete_battlefront(repo, cmd).await,
    }
}

async fn add_battlefront(repo: &impl Repository, command: AddBattlefrontCommand) -> Result<()> {
    let battlefront = repo
        .add_battlefront(NewBattlefrontData {
            name: command.name,
            description: command.description,
            color: command.color,
        })
        .await?;

    println!(
        "{} Created battlefront: {}",
        "✓".style(Style::new().green().bold()),
        battlefront.name.bright_white().bold()
    );
    println!("  {} Color: {}", "→".blue(), battlefront.color);
    Ok(())
}

async fn list_battlefronts(repo: &impl Repository) -> Result<()> {
    let battlefronts = repo.find_battlefronts().await?;
    display_battlefronts(&battlefronts);
    Ok(())
}

async fn delete_battlefront(repo: &impl Repository, command: DeleteBattlefrontCommand) -> Result<()> {
    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete battlefront '{}' and its checkpoints?",
                command.name
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_battlefront(&command.name).await?;
    println!("Deleted battlefront: '{}'", command.name);
    Ok(())
}
