use clap::Parser;
use gos_core::db;
use gos_core::error::CoreError;
use gos_core::repository::SqliteRepository;
use owo_colors::{OwoColorize, Style};

mod cli;
mod commands;
mod config;
mod logging;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Failed to load configuration: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_tracing(&config.log_level) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    let context = match config::Context::from_config(&config) {
        Ok(context) => context,
        Err(e) => {
            handle_error(e.into());
            std::process::exit(1);
        }
    };

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool);
    tracing::debug!(database = %config.database_path, timezone = %config.timezone, "starting");

    let result = match cli.command {
        cli::Commands::Battlefront(command) => {
            commands::battlefront::battlefront_command(&repository, command).await
        }
        cli::Commands::Mission(command) => {
            commands::mission::mission_command(&repository, command, &context).await
        }
        cli::Commands::Checkpoint(command) => {
            commands::checkpoint::checkpoint_command(&repository, command, &context).await
        }
        cli::Commands::Today => commands::today::show_today(&repository, &context).await,
        cli::Commands::Week => commands::week::show_week(&repository, &context).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.downcast_ref::<CoreError>() {
        Some(CoreError::NotFound(s)) => {
            eprintln!("{} {}", "Error:".style(error_style), s);
        }
        Some(CoreError::AmbiguousId(candidates)) => {
            eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
            eprintln!("Did you mean one of these?");
            for (id, title) in candidates {
                eprintln!("  {} ({})", id.yellow(), title);
            }
        }
        Some(CoreError::InvalidInput(s)) => {
            eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
        }
        Some(CoreError::InvalidTimezone(tz)) => {
            eprintln!(
                "{} Unknown timezone '{}'. Use an IANA name such as 'Europe/Berlin'.",
                "Error:".style(error_style),
                tz.yellow()
            );
        }
        _ => eprintln!("{} {}", "Error:".style(error_style), err),
    }
}
