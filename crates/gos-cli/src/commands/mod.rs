pub mod battlefront;
pub mod checkpoint;
pub mod mission;
pub mod today;
pub mod week;
