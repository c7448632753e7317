use anyhow::Result;
use chrono::{Days, Utc};
use gos_core::duration::format_duration;
use gos_core::models::{MissionFilter, MissionStatus};
use gos_core::repository::Repository;
use owo_colors::OwoColorize;

use crate::config::Context;
use crate::views::table::{display_day, display_missions};

/// The war room: today's missions, overdue leftovers and the time left.
pub async fn show_today(repo: &impl Repository, context: &Context) -> Result<()> {
    let clock = &context.clock;
    let now = Utc::now();
    let today = clock.today(now);

    println!(
        "{} {}",
        clock.format_date(today).bright_white().bold(),
        format!("({})", clock.timezone().name()).bright_black()
    );

    let left = clock.minutes_until_end_of_day(now);
    if left > 0 {
        let left = u32::try_from(left).unwrap_or(u32::MAX);
        println!("{} left before the day ends", format_duration(left).cyan());
    } else {
        println!("{}", "The day is over.".yellow());
    }
    println!();

    if let Some(yesterday) = today.checked_sub_days(Days::new(1)) {
        let overdue = repo
            .find_missions(&MissionFilter {
                status: Some(MissionStatus::Pending),
                due_until: Some(yesterday),
                ..Default::default()
            })
            .await?;
        if !overdue.is_empty() {
            println!("{}", "Overdue".red().bold());
            display_missions(&overdue, clock, now);
            println!();
        }
    }

    let day = clock.day_range(now);
    let missions = repo
        .find_missions(&MissionFilter::due_between(day.first_day(), day.last_day()))
        .await?;
    println!("{}", "Today".bold());
    display_day(&missions.iter().collect::<Vec<_>>(), clock, now);

    let stats = repo.mission_stats(day.first_day(), day.last_day()).await?;
    if stats.total > 0 {
        println!();
        println!(
            "{}/{} done, {} planned",
            stats.completed,
            stats.total,
            format_duration(u32::try_from(stats.planned_minutes).unwrap_or(u32::MAX))
        );
    }
    Ok(())
}
