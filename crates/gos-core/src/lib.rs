//! # GOS Core Library
//!
//! Mission planning primitives for GOS: battlefronts (projects), missions
//! (tasks with a due date, optional scheduled time and duration) and ordered
//! checkpoints, with every calendar computation anchored to one configured
//! timezone.
//!
//! ## Core Modules
//!
//! - [`duration`]: Parsing, formatting and validation of mission durations
//! - [`timezone`]: Timezone-anchored clock (today, end of day, week ranges)
//! - [`palette`]: Battlefront color names
//! - [`editing`]: Parse, validate and persist a duration edit
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use gos_core::duration::{format_duration, parse_duration, validate_duration, DurationBounds};
//!
//! let minutes = parse_duration("1h30");
//! assert_eq!(minutes, Some(90));
//! assert_eq!(validate_duration(minutes, &DurationBounds::default()), Ok(90));
//! assert_eq!(format_duration(90), "1h 30m");
//! ```

pub mod db;
pub mod duration;
pub mod editing;
pub mod error;
pub mod models;
pub mod palette;
pub mod repository;
pub mod timezone;
