use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid latitude {0}° (must be between -90° and +90°)")]
    InvalidLatitude(f64),
    #[error("invalid longitude {0}° (must be between -180° and +180°)")]
    InvalidLongitude(f64),
    #[error("invalid clock time {hour}:{minute:02} (hour 0-23, minute 0-59)")]
    InvalidClockTime { hour: u32, minute: u32 },
    #[error("invalid time string {0:?} (expected HH:MM)")]
    InvalidTimeFormat(String),
    #[error("invalid hour label {0:?} (expected HH:00)")]
    InvalidHourLabel(String),
    #[error("hour {0} out of range (must be between 0 and 23)")]
    HourOutOfRange(u32),
    #[error("invalid day of year {0} (must be between 1 and 366)")]
    InvalidDayOfYear(u32),
    #[error("invalid calendar date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
}
