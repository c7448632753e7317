use anyhow::Result;
use chrono::Utc;
use gos_core::duration::format_duration;
use gos_core::models::MissionFilter;
use gos_core::repository::Repository;
use owo_colors::OwoColorize;

use crate::config::Context;
use crate::views::table::{display_day, group_by_day};

pub async fn show_week(repo: &impl Repository, context: &Context) -> Result<()> {
    let clock = &context.clock;
    let now = Utc::now();
    let week = clock.week_range(now);
    let days = week.days();
    let (first, last) = (week.first_day(), week.last_day());

    println!(
        "{} {} - {}",
        "Week".bright_white().bold(),
        clock.format_date(first),
        clock.format_date(last)
    );

    let missions = repo.find_missions(&MissionFilter::due_between(first, last)).await?;
    for (day, on_day) in group_by_day(&missions, &days) {
        println!();
        let date = clock.format_date(day);
        let relative = clock.format_relative_day(day, now);
        let label = if relative == date {
            date
        } else {
            format!("{} {}", relative, date.bright_black())
        };
        if day == clock.today(now) {
            println!("{}", label.cyan().bold());
        } else {
            println!("{}", label.bold());
        }
        display_day(&on_day, clock, now);
    }

    let stats = repo.mission_stats(first, last).await?;
    println!();
    println!(
        "{} missions: {} done, {} pending, {} abandoned",
        stats.total, stats.completed, stats.pending, stats.abandoned
    );
    println!(
        "Planned {} / completed {}",
        format_duration(u32::try_from(stats.planned_minutes).unwrap_or(u32::MAX)),
        format_duration(u32::try_from(stats.completed_minutes).unwrap_or(u32::MAX))
    );
    Ok(())
}
