//! Mission duration parsing, formatting and validation.
//!
//! Durations are whole minutes. The accepted text forms are:
//!
//! | Input     | Minutes |
//! |-----------|---------|
//! | `90`      | 90      |
//! | `2h`      | 120     |
//! | `45m`     | 45      |
//! | `1h30m`   | 90      |
//! | `1h30`    | 90      |
//! | `1h 30m`  | 90      |
//! | `1:30`    | 90      |
//!
//! Matching is anchored and case-insensitive after trimming. Anything else
//! (fractions, negatives, trailing text) is rejected as a whole.

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use crate::error::CoreError;

#[derive(Parser)]
#[grammar = "duration.pest"]
struct DurationParser;

/// Lower bound applied when no bounds are configured.
pub const DEFAULT_MIN_MINUTES: u32 = 5;
/// Upper bound applied when no bounds are configured (12 hours).
pub const DEFAULT_MAX_MINUTES: u32 = 720;

/// Parses a duration string into minutes.
///
/// Returns `None` for anything outside the grammar, including values that
/// would overflow a `u32` minute count.
pub fn parse_duration(input: &str) -> Option<u32> {
    let normalized = input.trim().to_lowercase();
    let form = DurationParser::parse(Rule::duration, &normalized)
        .ok()?
        .next()?
        .into_inner()
        .next()?;

    let rule = form.as_rule();
    let values = form
        .into_inner()
        .map(|pair| pair.as_str().parse::<u32>().ok())
        .collect::<Option<Vec<u32>>>()?;

    match (rule, values.as_slice()) {
        (Rule::bare_minutes | Rule::minutes_only, [minutes]) => Some(*minutes),
        (Rule::hours_only, [hours]) => hours.checked_mul(60),
        (Rule::hours_minutes | Rule::clock, [hours, minutes]) => {
            hours.checked_mul(60)?.checked_add(*minutes)
        }
        _ => None,
    }
}

/// Renders minutes as `45m`, `2h` or `1h 30m`.
pub fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Inclusive range a mission duration must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationBounds {
    min: u32,
    max: u32,
}

impl DurationBounds {
    pub fn new(min: u32, max: u32) -> Result<Self, CoreError> {
        if min > max {
            return Err(CoreError::InvalidInput(format!(
                "Duration bounds are inverted: minimum {} is greater than maximum {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for DurationBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_MINUTES,
            max: DEFAULT_MAX_MINUTES,
        }
    }
}

/// Why a duration was rejected. The `Display` text is meant for end users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("Invalid duration format")]
    InvalidFormat,

    #[error("Duration must be at least {min} minutes")]
    TooShort { min: u32 },

    #[error("Duration cannot exceed {} ({max} minutes)", hours_label(.max))]
    TooLong { max: u32 },
}

fn hours_label(minutes: &u32) -> String {
    match (minutes / 60, minutes % 60) {
        (1, 0) => "1 hour".to_string(),
        (h, 0) => format!("{h} hours"),
        _ => format_duration(*minutes),
    }
}

/// Checks a parse result against `bounds`.
///
/// `None` stands for a parse failure and is reported as
/// [`DurationError::InvalidFormat`].
pub fn validate_duration(
    minutes: Option<u32>,
    bounds: &DurationBounds,
) -> Result<u32, DurationError> {
    let minutes = minutes.ok_or(DurationError::InvalidFormat)?;
    if minutes < bounds.min {
        return Err(DurationError::TooShort { min: bounds.min });
    }
    if minutes > bounds.max {
        return Err(DurationError::TooLong { max: bounds.max });
    }
    Ok(minutes)
}

/// Parses and validates in one step.
pub fn parse_and_validate(input: &str, bounds: &DurationBounds) -> Result<u32, DurationError> {
    validate_duration(parse_duration(input), bounds)
}
