use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};
use crate::types::{ClockTime, GeoCoordinate, SolarGeometry, SolarPosition};

pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const MINUTES_PER_DEGREE: f64 = 4.0;
pub const DAYS_PER_YEAR: u32 = 365;

const DEGENERATE_EPSILON: f64 = 1e-12;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / PI)
}

/// Maps into `[0, 360)`. `rem_euclid` can round up to exactly 360.0 for
/// tiny negative inputs, which is folded back to 0.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

pub fn wrap_hour_angle(angle: f64) -> f64 {
    normalize_angle(angle + 180.0) - 180.0
}

pub fn day_of_year(year: i32, month: u32, day: u32) -> Result<u32> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.ordinal())
        .ok_or(Error::InvalidDate { year, month, day })
}

pub fn check_day_of_year(day_of_year: u32) -> Result<u32> {
    if (1..=366).contains(&day_of_year) {
        Ok(day_of_year)
    } else {
        Err(Error::InvalidDayOfYear(day_of_year))
    }
}

pub fn fractional_year(day_of_year: u32) -> f64 {
    2.0 * PI * (day_of_year as f64 - 1.0) / DAYS_PER_YEAR as f64
}

/// Spencer (1971) series, radians.
pub fn solar_declination(day_of_year: u32) -> f64 {
    let x = fractional_year(day_of_year);
    0.006918 - 0.399912 * x.cos() + 0.070257 * x.sin() - 0.006758 * (2.0 * x).cos()
        + 0.000907 * (2.0 * x).sin()
        - 0.002697 * (3.0 * x).cos()
        + 0.00148 * (3.0 * x).sin()
}

/// Spencer (1971) series, minutes.
pub fn equation_of_time(day_of_year: u32) -> f64 {
    let x = fractional_year(day_of_year);
    229.18
        * (0.000075 + 0.001868 * x.cos()
            - 0.032077 * x.sin()
            - 0.014615 * (2.0 * x).cos()
            - 0.040849 * (2.0 * x).sin())
}

pub fn zone_offset_hours(longitude: f64) -> i32 {
    (longitude / DEGREES_PER_HOUR).round() as i32
}

pub fn zone_label(longitude: f64) -> String {
    let offset = zone_offset_hours(longitude);
    if offset >= 0 {
        format!("UTC+{}", offset)
    } else {
        format!("UTC{}", offset)
    }
}

pub fn local_solar_time(longitude: f64, time: ClockTime, eot: f64) -> f64 {
    let zone_meridian = DEGREES_PER_HOUR * zone_offset_hours(longitude) as f64;
    time.decimal_hours() + eot / 60.0 + (longitude - zone_meridian) * MINUTES_PER_DEGREE / 60.0
}

pub fn hour_angle(solar_time: f64) -> f64 {
    wrap_hour_angle(DEGREES_PER_HOUR * (solar_time - 12.0))
}

/// Altitude and azimuth in degrees. Declination in radians, hour angle in
/// degrees within `[-180, 180)`.
pub fn altitude_azimuth(latitude: f64, declination: f64, hour_angle: f64) -> (f64, f64) {
    let lat_rad = deg_to_rad(latitude);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_alt =
        lat_rad.sin() * declination.sin() + lat_rad.cos() * declination.cos() * ha_rad.cos();
    let alt_rad = sin_alt.clamp(-1.0, 1.0).asin();

    let denom = lat_rad.cos() * alt_rad.cos();
    if denom.abs() < DEGENERATE_EPSILON {
        return (rad_to_deg(alt_rad), 0.0);
    }
    let cos_az = (declination.sin() - lat_rad.sin() * alt_rad.sin()) / denom;
    let az = rad_to_deg(cos_az.clamp(-1.0, 1.0).acos());
    let az = if hour_angle > 0.0 { 360.0 - az } else { az };
    (rad_to_deg(alt_rad), normalize_angle(az))
}

pub fn solar_geometry(coord: GeoCoordinate, day_of_year: u32, time: ClockTime) -> SolarGeometry {
    let declination = solar_declination(day_of_year);
    let eot = equation_of_time(day_of_year);
    let solar_time = local_solar_time(coord.longitude(), time, eot);
    let ha = hour_angle(solar_time);
    let (altitude, azimuth) = altitude_azimuth(coord.latitude(), declination, ha);
    SolarGeometry {
        day_of_year,
        declination: rad_to_deg(declination),
        equation_of_time: eot,
        solar_time,
        hour_angle: ha,
        altitude,
        azimuth,
    }
}

pub fn solar_position(coord: GeoCoordinate, day_of_year: u32, time: ClockTime) -> SolarPosition {
    solar_geometry(coord, day_of_year, time).position()
}
