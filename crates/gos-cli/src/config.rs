use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use gos_core::duration::{DurationBounds, DEFAULT_MAX_MINUTES, DEFAULT_MIN_MINUTES};
use gos_core::error::CoreError;
use gos_core::timezone::{Clock, DEFAULT_END_OF_DAY_HOUR};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "gos.toml";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub database_path: String,
    /// IANA timezone every date is anchored to
    pub timezone: String,
    /// Local hour (0-24) at which the day is considered over
    pub end_of_day_hour: u32,
    pub duration_min: u32,
    pub duration_max: u32,
    /// `tracing` filter directive, overridden by `GOS_LOG`
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "gos.db".to_string(),
            timezone: "UTC".to_string(),
            end_of_day_hour: DEFAULT_END_OF_DAY_HOUR,
            duration_min: DEFAULT_MIN_MINUTES,
            duration_max: DEFAULT_MAX_MINUTES,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("GOS_"))
    }

    pub fn clock(&self) -> Result<Clock, CoreError> {
        Clock::from_name(&self.timezone, self.end_of_day_hour)
    }

    pub fn duration_bounds(&self) -> Result<DurationBounds, CoreError> {
        DurationBounds::new(self.duration_min, self.duration_max)
    }
}

/// Values every command needs, resolved once from [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub clock: Clock,
    pub bounds: DurationBounds,
}

impl Context {
    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        Ok(Self {
            clock: config.clock()?,
            bounds: config.duration_bounds()?,
        })
    }
}
