use chrono::{DateTime, NaiveDate, Utc};
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use gos_core::duration::format_duration;
use gos_core::models::{Battlefront, Checkpoint, MissionStatus, MissionWithBattlefront};
use gos_core::palette::hex_to_rgb;
use gos_core::timezone::Clock;

use crate::util::short_id;

fn color_cell(text: &str, hex: Option<&str>) -> Cell {
    match hex.and_then(hex_to_rgb) {
        Some((r, g, b)) => Cell::new(text).fg(Color::Rgb { r, g, b }),
        None => Cell::new(text),
    }
}

fn mission_row(entry: &MissionWithBattlefront, clock: &Clock, now: DateTime<Utc>, show_date: bool) -> Row {
    let mission = &entry.mission;
    let today = clock.today(now);
    let mut row = Row::new();
    row.add_cell(Cell::new(short_id(&mission.id)));

    let mut title_cell = Cell::new(&mission.title);
    title_cell = match mission.status {
        MissionStatus::Completed | MissionStatus::Abandoned => title_cell
            .add_attribute(Attribute::CrossedOut)
            .fg(Color::DarkGrey),
        MissionStatus::Pending if mission.due_date < today => {
            title_cell.fg(Color::Red).add_attribute(Attribute::Bold)
        }
        MissionStatus::Pending => title_cell,
    };
    row.add_cell(title_cell);

    let status_cell = Cell::new(mission.status.to_string());
    row.add_cell(match mission.status {
        MissionStatus::Completed => status_cell.fg(Color::Green),
        MissionStatus::Abandoned => status_cell.fg(Color::DarkGrey),
        MissionStatus::Pending => status_cell,
    });

    if show_date {
        let due_text = clock.format_relative_day(mission.due_date, now);
        let due_cell = if mission.is_open() && mission.due_date < today {
            Cell::new(due_text).fg(Color::Red) // Overdue
        } else if mission.is_open() && mission.due_date == today {
            Cell::new(due_text).fg(Color::Yellow)
        } else {
            Cell::new(due_text)
        };
        row.add_cell(due_cell);
    }

    row.add_cell(Cell::new(
        mission
            .scheduled_time
            .map(|t| clock.format_time(t))
            .unwrap_or_else(|| "-".to_string()),
    ));
    row.add_cell(Cell::new(
        mission
            .duration_minutes
            .map(format_duration)
            .unwrap_or_else(|| "-".to_string()),
    ));
    row.add_cell(color_cell(
        entry.battlefront_name.as_deref().unwrap_or("-"),
        entry.battlefront_color.as_deref(),
    ));
    row
}

pub fn display_missions(missions: &[MissionWithBattlefront], clock: &Clock, now: DateTime<Utc>) {
    if missions.is_empty() {
        println!("No missions found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Status", "Due", "At", "Duration", "Battlefront"]);
    for mission in missions {
        table.add_row(mission_row(mission, clock, now, true));
    }

    println!("{table}");
}

/// Missions of a single day; the date column is left out.
pub fn display_day(missions: &[&MissionWithBattlefront], clock: &Clock, now: DateTime<Utc>) {
    if missions.is_empty() {
        println!("  No missions.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Status", "At", "Duration", "Battlefront"]);
    for mission in missions {
        table.add_row(mission_row(mission, clock, now, false));
    }

    println!("{table}");
}

pub fn display_battlefronts(battlefronts: &[Battlefront]) {
    if battlefronts.is_empty() {
        println!("No battlefronts found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Color", "Description", "Created"]);

    for battlefront in battlefronts {
        let mut row = Row::new();
        row.add_cell(color_cell(&battlefront.name, Some(&battlefront.color)).add_attribute(Attribute::Bold));
        row.add_cell(color_cell(&battlefront.color, Some(&battlefront.color)));
        row.add_cell(Cell::new(battlefront.description.as_deref().unwrap_or("None")));
        row.add_cell(Cell::new(battlefront.created_at.humanize()));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_checkpoints(checkpoints: &[Checkpoint], clock: &Clock) {
    if checkpoints.is_empty() {
        println!("No checkpoints found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "ID", "Checkpoint", "Reached"]);

    for checkpoint in checkpoints {
        let mut row = Row::new();
        row.add_cell(Cell::new(checkpoint.position));
        row.add_cell(Cell::new(short_id(&checkpoint.id)));
        let title = Cell::new(&checkpoint.title);
        row.add_cell(if checkpoint.is_reached() {
            title.fg(Color::Green)
        } else {
            title
        });
        row.add_cell(Cell::new(
            checkpoint
                .completed_at
                .map(|at| clock.format_datetime(at))
                .unwrap_or_else(|| "-".to_string()),
        ));
        table.add_row(row);
    }

    println!("{table}");
}

/// Splits missions by due date, keeping the order they came in.
pub fn group_by_day<'a>(
    missions: &'a [MissionWithBattlefront],
    days: &[NaiveDate],
) -> Vec<(NaiveDate, Vec<&'a MissionWithBattlefront>)> {
    days.iter()
        .map(|day| {
            let on_day = missions
                .iter()
                .filter(|m| m.mission.due_date == *day)
                .collect();
            (*day, on_day)
        })
        .collect()
}
