use crate::error::CoreError;
use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};
use chrono_tz::Tz;
use std::str::FromStr;

/// Hour of the local day after which the day counts as over.
pub const DEFAULT_END_OF_DAY_HOUR: u32 = 23;

/// Validate IANA timezone name
pub fn validate_timezone(timezone: &str) -> Result<Tz, CoreError> {
    Tz::from_str(timezone).map_err(|_| {
        CoreError::InvalidTimezone(format!(
            "'{}'. Use IANA timezone names like 'America/New_York'",
            timezone
        ))
    })
}

/// A half-open span of local time, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedRange {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl ZonedRange {
    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// The last calendar day inside the range.
    pub fn last_day(&self) -> NaiveDate {
        let end = self.end.date_naive();
        if self.end.time() == NaiveTime::MIN {
            end.pred_opt().unwrap_or(end)
        } else {
            end
        }
    }

    /// Every calendar day the range touches, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let last = self.last_day();
        self.first_day()
            .iter_days()
            .take_while(|day| *day <= last)
            .collect()
    }
}

/// Clock anchored to one fixed timezone.
///
/// Every method is a pure function of the instant it is given, so the
/// server or terminal timezone never leaks into the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    tz: Tz,
    end_of_day_hour: u32,
}

impl Clock {
    pub fn new(tz: Tz, end_of_day_hour: u32) -> Result<Self, CoreError> {
        if end_of_day_hour > 24 {
            return Err(CoreError::InvalidInput(format!(
                "End-of-day hour must be between 0 and 24, got {}",
                end_of_day_hour
            )));
        }
        Ok(Self { tz, end_of_day_hour })
    }

    pub fn from_name(timezone: &str, end_of_day_hour: u32) -> Result<Self, CoreError> {
        Self::new(validate_timezone(timezone)?, end_of_day_hour)
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn end_of_day_hour(&self) -> u32 {
        self.end_of_day_hour
    }

    pub fn zoned(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.tz)
    }

    /// Local calendar date of `instant`.
    pub fn today(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.zoned(instant).date_naive()
    }

    /// Resolves a local wall-clock time to an instant in this timezone.
    ///
    /// Ambiguous times (DST fall back) take the earliest mapping. Times that
    /// do not exist (DST spring forward) move forward one hour.
    pub fn localize(&self, local: NaiveDateTime) -> DateTime<Tz> {
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                let shifted = local + Duration::hours(1);
                self.tz
                    .from_local_datetime(&shifted)
                    .earliest()
                    .unwrap_or_else(|| self.tz.from_utc_datetime(&local))
            }
        }
    }

    /// Local midnight starting `date`.
    pub fn start_of(&self, date: NaiveDate) -> DateTime<Tz> {
        self.localize(date.and_time(NaiveTime::MIN))
    }

    /// The end-of-day cutoff on the local date of `instant`.
    pub fn end_of_day(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        let date = self.today(instant);
        if self.end_of_day_hour == 24 {
            return self.start_of(date + Days::new(1));
        }
        let cutoff = NaiveTime::from_hms_opt(self.end_of_day_hour, 0, 0).unwrap_or(NaiveTime::MIN);
        self.localize(date.and_time(cutoff))
    }

    /// Whole minutes left before the end-of-day cutoff; zero once it passed.
    pub fn minutes_until_end_of_day(&self, instant: DateTime<Utc>) -> i64 {
        let remaining = self.end_of_day(instant).with_timezone(&Utc) - instant;
        remaining.num_minutes().max(0)
    }

    /// Local midnight to the next local midnight around `instant`.
    pub fn day_range(&self, instant: DateTime<Utc>) -> ZonedRange {
        let date = self.today(instant);
        ZonedRange {
            start: self.start_of(date),
            end: self.start_of(date + Days::new(1)),
        }
    }

    /// Monday 00:00 (inclusive) to the following Monday 00:00 (exclusive).
    pub fn week_range(&self, instant: DateTime<Utc>) -> ZonedRange {
        let date = self.today(instant);
        let monday = date - Days::new(u64::from(date.weekday().num_days_from_monday()));
        ZonedRange {
            start: self.start_of(monday),
            end: self.start_of(monday + Days::new(7)),
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format("%a, %b %-d").to_string()
    }

    pub fn format_time(&self, time: NaiveTime) -> String {
        time.format("%H:%M").to_string()
    }

    pub fn format_datetime(&self, instant: DateTime<Utc>) -> String {
        self.zoned(instant).format("%Y-%m-%d %H:%M %Z").to_string()
    }

    /// "Today", "Tomorrow", "Yesterday" or the formatted date.
    pub fn format_relative_day(&self, date: NaiveDate, instant: DateTime<Utc>) -> String {
        let today = self.today(instant);
        match (date - today).num_days() {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            -1 => "Yesterday".to_string(),
            _ => self.format_date(date),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            tz: Tz::UTC,
            end_of_day_hour: DEFAULT_END_OF_DAY_HOUR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Weekday};

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn new_york() -> Clock {
        Clock::from_name("America/New_York", 23).unwrap()
    }

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("America/New_York").is_ok());
        assert!(matches!(
            validate_timezone("Invalid/Timezone"),
            Err(CoreError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_end_of_day_hour_range() {
        assert!(Clock::new(Tz::UTC, 24).is_ok());
        assert!(Clock::new(Tz::UTC, 25).is_err());
    }

    #[test]
    fn test_today_uses_clock_timezone() {
        // 02:00 UTC on the 20th is still the evening of the 19th in New York.
        let instant = utc("2026-10-20T02:00:00Z");
        assert_eq!(
            new_york().today(instant),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
        assert_eq!(
            Clock::default().today(instant),
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
        );
    }

    #[test]
    fn test_end_of_day_and_minutes_remaining() {
        let clock = new_york();
        // 20:30 EDT
        let instant = utc("2026-10-20T00:30:00Z");
        let cutoff = clock.end_of_day(instant);
        assert_eq!(cutoff.hour(), 23);
        assert_eq!(cutoff.date_naive(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(clock.minutes_until_end_of_day(instant), 150);

        // 23:45 EDT, past the cutoff
        let late = utc("2026-10-20T03:45:00Z");
        assert_eq!(clock.minutes_until_end_of_day(late), 0);
    }

    #[test]
    fn test_midnight_cutoff() {
        let clock = Clock::new(Tz::UTC, 24).unwrap();
        let instant = utc("2026-10-19T22:00:00Z");
        assert_eq!(clock.end_of_day(instant), clock.start_of(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()));
        assert_eq!(clock.minutes_until_end_of_day(instant), 120);
    }

    #[test]
    fn test_week_range_starts_monday() {
        let clock = new_york();
        // Sunday evening local, Monday UTC
        let instant = utc("2026-10-19T01:00:00Z");
        let week = clock.week_range(instant);
        assert_eq!(week.start.weekday(), Weekday::Mon);
        assert_eq!(week.start.date_naive(), NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        assert_eq!(week.start.time(), NaiveTime::MIN);
        assert_eq!(week.end.date_naive(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());

        let days = week.days();
        assert_eq!(days.len(), 7);
        assert_eq!(days[6].weekday(), Weekday::Sun);
        assert_eq!(days[0], week.first_day());
        assert_eq!(week.last_day(), days[6]);
        assert!(week.start.with_timezone(&Utc) <= instant && instant < week.end.with_timezone(&Utc));
    }

    #[test]
    fn test_day_range_across_dst_change() {
        let clock = new_york();
        // 2026-11-01 is the fall-back day in New York: 25 hours long.
        let instant = utc("2026-11-01T15:00:00Z");
        let day = clock.day_range(instant);
        assert_eq!((day.end - day.start).num_hours(), 25);
        assert_eq!(day.first_day(), day.last_day());
        assert_eq!(day.days(), vec![day.first_day()]);
    }

    #[test]
    fn test_localize_skips_nonexistent_time() {
        let clock = new_york();
        // 02:30 does not exist on 2026-03-08 in New York.
        let local = NaiveDate::from_ymd_opt(2026, 3, 8)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let resolved = clock.localize(local);
        assert_eq!(resolved.hour(), 3);
        assert_eq!(resolved.minute(), 30);
    }

    #[test]
    fn test_formatting() {
        let clock = new_york();
        let instant = utc("2026-10-19T18:30:00Z");
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(clock.format_date(date), "Mon, Oct 19");
        assert_eq!(clock.format_time(NaiveTime::from_hms_opt(9, 5, 0).unwrap()), "09:05");
        assert_eq!(clock.format_datetime(instant), "2026-10-19 14:30 EDT");
        assert_eq!(clock.format_relative_day(date, instant), "Today");
        assert_eq!(clock.format_relative_day(date.succ_opt().unwrap(), instant), "Tomorrow");
        assert_eq!(clock.format_relative_day(date.pred_opt().unwrap(), instant), "Yesterday");
        assert_eq!(
            clock.format_relative_day(NaiveDate::from_ymd_opt(2026, 10, 30).unwrap(), instant),
            "Fri, Oct 30"
        );
    }
}
