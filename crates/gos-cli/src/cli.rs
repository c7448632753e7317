use clap::{Parser, Subcommand};

/// GOS: plan missions across your battlefronts and run the day from the war room
#[derive(Parser, Debug)]
#[command(name = "gos", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage battlefronts
    #[command(visible_alias = "bf")]
    Battlefront(BattlefrontCommand),
    /// Manage missions
    #[command(visible_alias = "m")]
    Mission(MissionCommand),
    /// Manage the checkpoints of a battlefront
    #[command(visible_alias = "cp")]
    Checkpoint(CheckpointCommand),
    /// Show today's missions and the time left before the end-of-day cutoff
    Today,
    /// Show this week's missions, Monday to Sunday
    Week,
}

// ========== Battlefronts ==========

#[derive(Parser, Debug, Clone)]
pub struct BattlefrontCommand {
    #[command(subcommand)]
    pub command: BattlefrontSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum BattlefrontSubcommand {
    /// Add a new battlefront
    Add(AddBattlefrontCommand),
    /// List battlefronts
    List,
    /// Delete a battlefront
    Delete(DeleteBattlefrontCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddBattlefrontCommand {
    /// The name of the battlefront
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Color name (e.g. 'red', 'teal') or '#rrggbb'
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteBattlefrontCommand {
    /// The name of the battlefront to delete
    pub name: String,
    /// Delete without confirmation
    #[clap(short, long)]
    pub force: bool,
}

// ========== Missions ==========

#[derive(Parser, Debug, Clone)]
pub struct MissionCommand {
    #[command(subcommand)]
    pub command: MissionSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum MissionSubcommand {
    /// Add a new mission
    Add(AddMissionCommand),
    /// List missions
    List(ListMissionsCommand),
    /// Edit a mission
    Edit(EditMissionCommand),
    /// Set how long a mission takes (e.g. '90', '1h30', '1:30')
    Duration(DurationCommand),
    /// Mark a mission as completed
    Done(MissionIdCommand),
    /// Abandon a mission
    Abandon(MissionIdCommand),
    /// Delete a mission
    Delete(DeleteMissionCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddMissionCommand {
    /// The title of the mission
    pub title: String,
    /// Due date ('today', 'tomorrow', '2026-10-21', 'next friday'); defaults to today
    #[clap(short, long)]
    pub due: Option<String>,
    /// Scheduled time of day (e.g. '14:30', '9am')
    #[clap(long)]
    pub at: Option<String>,
    /// How long the mission takes (e.g. '45m', '1h30', '1:30')
    #[clap(long)]
    pub duration: Option<String>,
    /// The battlefront the mission belongs to
    #[clap(short, long)]
    pub battlefront: Option<String>,
    #[clap(short, long)]
    pub notes: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListMissionsCommand {
    /// Include completed and abandoned missions
    #[clap(short, long)]
    pub all: bool,
    /// Only missions of this battlefront
    #[clap(short, long)]
    pub battlefront: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditMissionCommand {
    /// The ID of the mission to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub due: Option<String>,

    #[arg(long)]
    pub at: Option<String>,
    #[arg(long, conflicts_with = "at")]
    pub at_clear: bool,

    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long, conflicts_with = "notes")]
    pub notes_clear: bool,

    #[arg(long, conflicts_with = "duration_clear")]
    pub duration: Option<String>,
    #[arg(long)]
    pub duration_clear: bool,

    #[arg(long)]
    pub battlefront: Option<String>,
    #[arg(long, conflicts_with = "battlefront")]
    pub battlefront_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DurationCommand {
    /// The ID of the mission
    pub id: String,
    /// The new duration (e.g. '90', '2h', '45m', '1h30m', '1:30')
    pub duration: String,
}

#[derive(Parser, Debug, Clone)]
pub struct MissionIdCommand {
    /// The ID of the mission
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteMissionCommand {
    /// The ID of the mission to delete
    pub id: String,
    /// Delete without confirmation
    #[clap(short, long)]
    pub force: bool,
}

// ========== Checkpoints ==========

#[derive(Parser, Debug, Clone)]
pub struct CheckpointCommand {
    #[command(subcommand)]
    pub command: CheckpointSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CheckpointSubcommand {
    /// Append a checkpoint to a battlefront
    Add(AddCheckpointCommand),
    /// List the checkpoints of a battlefront in order
    List(ListCheckpointsCommand),
    /// Mark a checkpoint as reached
    Done(CheckpointIdCommand),
    /// Mark a checkpoint as not reached
    Reopen(CheckpointIdCommand),
    /// Move a checkpoint to another position
    Move(MoveCheckpointCommand),
    /// Delete a checkpoint
    Delete(CheckpointIdCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCheckpointCommand {
    /// The battlefront to add the checkpoint to
    pub battlefront: String,
    /// The title of the checkpoint
    pub title: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCheckpointsCommand {
    /// The battlefront whose checkpoints to list
    pub battlefront: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckpointIdCommand {
    /// The ID of the checkpoint
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct MoveCheckpointCommand {
    /// The ID of the checkpoint
    pub id: String,
    /// The new 1-based position
    pub position: i64,
}
