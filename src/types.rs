use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Local clock reading at the observer's location, not UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(Error::InvalidClockTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    pub fn decimal_hours(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::InvalidTimeFormat(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(bad)?;
        let digits = |part: &str, max_len: usize| {
            !part.is_empty() && part.len() <= max_len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(h, 2) || !digits(m, 2) || m.len() != 2 {
            return Err(bad());
        }
        let hour = h.parse().map_err(|_| bad())?;
        let minute = m.parse().map_err(|_| bad())?;
        Self::new(hour, minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HourLabel(u32);

impl HourLabel {
    pub const COUNT: u32 = 24;

    pub fn new(hour: u32) -> Result<Self> {
        if hour >= Self::COUNT {
            return Err(Error::HourOutOfRange(hour));
        }
        Ok(Self(hour))
    }

    pub fn hour(&self) -> u32 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = HourLabel> {
        (0..Self::COUNT).map(HourLabel)
    }

    pub fn clock_time(&self) -> ClockTime {
        ClockTime {
            hour: self.0,
            minute: 0,
        }
    }
}

impl FromStr for HourLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let time: ClockTime = s
            .parse()
            .map_err(|_| Error::InvalidHourLabel(s.to_string()))?;
        if time.minute != 0 {
            return Err(Error::InvalidHourLabel(s.to_string()));
        }
        Ok(Self(time.hour))
    }
}

impl fmt::Display for HourLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub azimuth: f64,
    pub altitude: f64,
}

impl SolarPosition {
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarGeometry {
    pub day_of_year: u32,
    pub declination: f64,
    pub equation_of_time: f64,
    pub solar_time: f64,
    pub hour_angle: f64,
    pub altitude: f64,
    pub azimuth: f64,
}

impl SolarGeometry {
    pub fn position(&self) -> SolarPosition {
        SolarPosition {
            azimuth: self.azimuth,
            altitude: self.altitude,
        }
    }
}

/// One position per day of year, `points[i]` being day `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct HourTrace {
    pub hour: HourLabel,
    pub points: Vec<SolarPosition>,
}

impl HourTrace {
    pub fn point_on_day(&self, day_of_year: u32) -> Option<&SolarPosition> {
        let idx = day_of_year.checked_sub(1)? as usize;
        self.points.get(idx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Today {
    pub day_of_year: u32,
    pub time: ClockTime,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    pub max_altitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedTrace {
    pub hour: HourLabel,
    pub points: Vec<ProjectedPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub suppress_below_horizon: bool,
    pub show_today_path: bool,
    pub margin_fraction: f64,
    pub hit_threshold_fraction: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            suppress_below_horizon: true,
            show_today_path: true,
            margin_fraction: 0.08,
            hit_threshold_fraction: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub margin: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub hit_threshold: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridLine {
    Altitude {
        degrees: u32,
        y: f64,
        label: String,
    },
    Azimuth {
        degrees: u32,
        x: f64,
        label: Option<&'static str>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub layout: ChartLayout,
    pub scale: ChartScale,
    pub selected: HourLabel,
    pub traces: Vec<ProjectedTrace>,
    pub grid: Vec<GridLine>,
    pub today_path: Vec<Vec<ProjectedPoint>>,
    pub today_marker: Option<ProjectedPoint>,
    pub sun_now: Option<ProjectedPoint>,
}
