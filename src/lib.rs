pub mod analemma;
pub mod angles;
pub mod chart;
pub mod error;
pub mod hit_test;
pub mod types;

pub use analemma::{
    day_path, generate_hour_trace, generate_trace, today_from, today_in_zone, TraceCache,
    DAY_PATH_INTERVAL_MINUTES,
};

pub use angles::{
    altitude_azimuth, check_day_of_year, day_of_year, deg_to_rad, equation_of_time,
    fractional_year, hour_angle, local_solar_time, normalize_angle, rad_to_deg,
    solar_declination, solar_geometry, solar_position, wrap_hour_angle, zone_label,
    zone_offset_hours, DAYS_PER_YEAR, DEGREES_PER_HOUR, MINUTES_PER_DEGREE,
};

pub use chart::{
    build_frame, compass_label, compute_scale, grid_lines, project, project_trace,
    ALTITUDE_STEP, AZIMUTH_STEP, MIN_MAX_ALTITUDE,
};

pub use error::{Error, Result};

pub use hit_test::{distance, nearest};

pub use types::{
    ChartConfig, ChartFrame, ChartLayout, ChartScale, ClockTime, GeoCoordinate, GridLine,
    HourLabel, HourTrace, ProjectedPoint, ProjectedTrace, SolarGeometry, SolarPosition, Today,
};
