use anyhow::{anyhow, Result};
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use chrono_english::{parse_date_string, Dialect};
use gos_core::timezone::Clock;

/// Resolves a due date relative to `now` in the clock's timezone.
pub fn parse_due_date(input: &str, clock: &Clock, now: DateTime<Utc>) -> Result<NaiveDate> {
    let normalized = input.trim().to_lowercase();
    let today = clock.today(now);

    match normalized.as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return Ok(today + Days::new(1)),
        "yesterday" => return Ok(today - Days::new(1)),
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        return Ok(date);
    }

    parse_date_string(&normalized, clock.zoned(now).fixed_offset(), Dialect::Us)
        .map(|dt| dt.date_naive())
        .map_err(|e| anyhow!("Failed to parse due date '{}': {}", input, e))
}

/// Parses a time of day like "14:30", "9:15 pm", "9am", "noon" or "midnight".
pub fn parse_scheduled_time(input: &str) -> Result<NaiveTime> {
    let normalized = input.trim().to_lowercase();

    match normalized.as_str() {
        "noon" => return Ok(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)),
        "midnight" => return Ok(NaiveTime::MIN),
        _ => {}
    }

    let formats = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];
    for format in &formats {
        if let Ok(time) = NaiveTime::parse_from_str(&normalized, format) {
            return Ok(time);
        }
    }

    parse_hour_with_meridiem(&normalized).ok_or_else(|| {
        anyhow!(
            "Invalid time format: '{}'\n\nSupported formats:\n  • 24-hour: '14:30', '09:00'\n  • 12-hour: '2:30 pm', '9:00 am'\n  • Compact: '2pm', '9am'\n  • Special: 'noon', 'midnight'",
            input
        )
    })
}

/// "9am", "12 pm"
fn parse_hour_with_meridiem(input: &str) -> Option<NaiveTime> {
    let (hour, pm) = if let Some(hour) = input.strip_suffix("am") {
        (hour, false)
    } else {
        (input.strip_suffix("pm")?, true)
    };
    let hour: u32 = hour.trim().parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    NaiveTime::from_hms_opt(hour, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn clock() -> Clock {
        Clock::from_name("America/New_York", 23).unwrap()
    }

    fn now() -> DateTime<Utc> {
        // Monday 2026-10-19 22:00 in New York
        DateTime::parse_from_rfc3339("2026-10-20T02:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("today", date(2026, 10, 19))]
    #[case("Tomorrow", date(2026, 10, 20))]
    #[case("yesterday", date(2026, 10, 18))]
    #[case("2026-12-31", date(2026, 12, 31))]
    fn test_parse_due_date(#[case] input: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_due_date(input, &clock(), now()).unwrap(), expected);
    }

    #[test]
    fn test_due_date_uses_clock_timezone() {
        let utc_clock = Clock::default();
        assert_eq!(parse_due_date("today", &utc_clock, now()).unwrap(), date(2026, 10, 20));
    }

    #[test]
    fn test_invalid_due_date() {
        assert!(parse_due_date("whenever-ish", &clock(), now()).is_err());
    }

    #[rstest]
    #[case("14:30", 14, 30)]
    #[case("09:05", 9, 5)]
    #[case("9:15 pm", 21, 15)]
    #[case("9:15PM", 21, 15)]
    #[case("9am", 9, 0)]
    #[case("12am", 0, 0)]
    #[case("12 pm", 12, 0)]
    #[case("noon", 12, 0)]
    #[case("midnight", 0, 0)]
    fn test_parse_scheduled_time(#[case] input: &str, #[case] hour: u32, #[case] minute: u32) {
        assert_eq!(
            parse_scheduled_time(input).unwrap(),
            NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
        );
    }

    #[rstest]
    #[case("25:00")]
    #[case("13pm")]
    #[case("later")]
    fn test_invalid_scheduled_time(#[case] input: &str) {
        assert!(parse_scheduled_time(input).is_err());
    }
}
