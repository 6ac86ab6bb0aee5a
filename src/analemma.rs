use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::angles::{self, DAYS_PER_YEAR};
use crate::error::{Error, Result};
use crate::types::{ClockTime, GeoCoordinate, HourLabel, HourTrace, SolarPosition, Today};

pub const DAY_PATH_INTERVAL_MINUTES: u32 = 15;

fn intervals_per_day(interval_minutes: u32) -> u32 {
    1440 / interval_minutes
}

fn positions_for_time(coord: GeoCoordinate, time: ClockTime) -> Vec<SolarPosition> {
    (1..=DAYS_PER_YEAR)
        .map(|doy| angles::solar_position(coord, doy, time))
        .collect()
}

pub fn generate_trace(coord: GeoCoordinate, time: ClockTime) -> Vec<SolarPosition> {
    let points = positions_for_time(coord, time);
    if log::log_enabled!(log::Level::Debug) {
        let visible = points.iter().filter(|p| p.is_above_horizon()).count();
        log::debug!(
            "generated {} points ({} above horizon) for {} at {:.4}, {:.4}",
            points.len(),
            visible,
            time,
            coord.latitude(),
            coord.longitude()
        );
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            log::debug!("first point: {:?}, last point: {:?}", first, last);
        }
    }
    points
}

pub fn generate_hour_trace(coord: GeoCoordinate, hour: HourLabel) -> HourTrace {
    HourTrace {
        hour,
        points: generate_trace(coord, hour.clock_time()),
    }
}

pub fn day_path(
    coord: GeoCoordinate,
    day_of_year: u32,
) -> Result<Vec<(ClockTime, SolarPosition)>> {
    let day_of_year = angles::check_day_of_year(day_of_year)?;
    (0..intervals_per_day(DAY_PATH_INTERVAL_MINUTES))
        .map(|i| {
            let mins = i * DAY_PATH_INTERVAL_MINUTES;
            let time = ClockTime::new(mins / 60, mins % 60)?;
            Ok((time, angles::solar_position(coord, day_of_year, time)))
        })
        .collect()
}

/// Reads the clock as given. The model expects the longitude-derived zone,
/// not civil time with daylight saving; see `today_in_zone`.
pub fn today_from<Tz: TimeZone>(now: &DateTime<Tz>) -> Result<Today> {
    Ok(Today {
        day_of_year: now.ordinal(),
        time: ClockTime::new(now.hour(), now.minute())?,
    })
}

pub fn today_in_zone<Tz: TimeZone>(instant: &DateTime<Tz>, longitude: f64) -> Result<Today> {
    let offset = FixedOffset::east_opt(angles::zone_offset_hours(longitude) * 3600)
        .ok_or(Error::InvalidLongitude(longitude))?;
    today_from(&instant.with_timezone(&offset))
}

#[derive(Debug, Clone)]
pub struct TraceCache {
    location: GeoCoordinate,
    traces: BTreeMap<HourLabel, HourTrace>,
}

impl TraceCache {
    pub fn new(location: GeoCoordinate) -> Self {
        Self {
            location,
            traces: BTreeMap::new(),
        }
    }

    pub fn location(&self) -> GeoCoordinate {
        self.location
    }

    pub fn set_location(&mut self, location: GeoCoordinate) {
        if location != self.location {
            log::debug!(
                "location changed to {:.4}, {:.4}; dropping {} cached traces",
                location.latitude(),
                location.longitude(),
                self.traces.len()
            );
            self.location = location;
            self.invalidate();
        }
    }

    pub fn invalidate(&mut self) {
        self.traces.clear();
    }

    pub fn get(&mut self, hour: HourLabel) -> &HourTrace {
        let location = self.location;
        self.traces.entry(hour).or_insert_with(|| {
            log::trace!("trace cache miss for {}", hour);
            generate_hour_trace(location, hour)
        })
    }

    pub fn contains(&self, hour: HourLabel) -> bool {
        self.traces.contains_key(&hour)
    }

    pub fn fill_all(&mut self) {
        let missing: Vec<HourLabel> = HourLabel::all().filter(|h| !self.contains(*h)).collect();
        if missing.is_empty() {
            return;
        }
        log::debug!("filling {} missing hour traces", missing.len());
        for trace in generate_many(self.location, missing) {
            self.traces.insert(trace.hour, trace);
        }
    }

    pub fn traces(&self) -> impl Iterator<Item = &HourTrace> {
        self.traces.values()
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

#[cfg(feature = "parallel")]
fn generate_many(location: GeoCoordinate, hours: Vec<HourLabel>) -> Vec<HourTrace> {
    hours
        .into_par_iter()
        .map(|hour| generate_hour_trace(location, hour))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn generate_many(location: GeoCoordinate, hours: Vec<HourLabel>) -> Vec<HourTrace> {
    hours
        .into_iter()
        .map(|hour| generate_hour_trace(location, hour))
        .collect()
}
