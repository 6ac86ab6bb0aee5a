use std::sync::LazyLock;

use chrono::TimeZone;
use chrono_tz::Europe::Stockholm;

use analemma::analemma::*;
use analemma::angles::solar_position;
use analemma::error::Error;
use analemma::types::*;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn stockholm() -> GeoCoordinate {
    GeoCoordinate::new(59.3293, 18.0686).unwrap()
}

fn hour(h: u32) -> HourLabel {
    HourLabel::new(h).unwrap()
}

static STOCKHOLM_NOON: LazyLock<HourTrace> =
    LazyLock::new(|| generate_hour_trace(stockholm(), hour(12)));

// ── Generator ──

#[test]
fn test_trace_has_365_points_in_day_order() {
    let c = GeoCoordinate::new(-33.8688, 151.2093).unwrap();
    let time = ClockTime::new(9, 30).unwrap();
    let points = generate_trace(c, time);
    assert_eq!(points.len(), 365);
    for (i, p) in points.iter().enumerate() {
        assert_eq!(*p, solar_position(c, i as u32 + 1, time), "day {}", i + 1);
    }
}

#[test]
fn test_trace_keeps_below_horizon_points() {
    let midnight = generate_hour_trace(stockholm(), hour(0));
    assert_eq!(midnight.points.len(), 365);
    assert!(midnight.points.iter().all(|p| !p.is_above_horizon()));
}

#[test]
fn test_stockholm_noon_seasons() {
    let trace = &*STOCKHOLM_NOON;
    assert_eq!(trace.hour, hour(12));
    assert_eq!(trace.points.len(), 365);

    let (max_day, max_alt) = trace
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i + 1, p.altitude))
        .fold((0, f64::MIN), |acc, cur| if cur.1 > acc.1 { cur } else { acc });
    let (min_day, min_alt) = trace
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i + 1, p.altitude))
        .fold((0, f64::MAX), |acc, cur| if cur.1 < acc.1 { cur } else { acc });

    assert_approx!(max_day as f64, 172.0, 5.0);
    assert_approx!(min_day as f64, 355.0, 5.0);
    assert!(max_alt <= 55.0, "max altitude {}", max_alt);
    assert!(min_alt >= 5.0, "min altitude {}", min_alt);
}

#[test]
fn test_point_on_day() {
    let trace = &*STOCKHOLM_NOON;
    assert!(trace.point_on_day(0).is_none());
    assert!(trace.point_on_day(366).is_none());
    assert_eq!(trace.point_on_day(1), trace.points.first());
    assert_eq!(trace.point_on_day(365), trace.points.last());
}

// ── Trace cache ──

#[test]
fn test_cache_populates_lazily() {
    let mut cache = TraceCache::new(stockholm());
    assert!(cache.is_empty());

    let first = cache.get(hour(12)).clone();
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(hour(12)));
    assert!(!cache.contains(hour(13)));
    assert_eq!(first, *STOCKHOLM_NOON);

    let again = cache.get(hour(12)).clone();
    assert_eq!(cache.len(), 1);
    assert_eq!(first, again);
}

#[test]
fn test_cache_fill_all_in_hour_order() {
    let mut cache = TraceCache::new(stockholm());
    cache.get(hour(5));
    cache.fill_all();
    assert_eq!(cache.len(), 24);
    let hours: Vec<u32> = cache.traces().map(|t| t.hour.hour()).collect();
    assert_eq!(hours, (0..24).collect::<Vec<u32>>());
    for trace in cache.traces() {
        assert_eq!(*trace, generate_hour_trace(stockholm(), trace.hour));
    }
}

#[test]
fn test_cache_same_location_keeps_entries() {
    let mut cache = TraceCache::new(stockholm());
    cache.fill_all();
    cache.set_location(stockholm());
    assert_eq!(cache.len(), 24);
}

#[test]
fn test_cache_location_change_invalidates_everything() {
    let mut cache = TraceCache::new(stockholm());
    cache.fill_all();

    let quito = GeoCoordinate::new(-0.1807, -78.4678).unwrap();
    cache.set_location(quito);
    assert!(cache.is_empty());
    assert_eq!(cache.location(), quito);
    assert_eq!(*cache.get(hour(12)), generate_hour_trace(quito, hour(12)));
}

#[test]
fn test_cache_invalidate() {
    let mut cache = TraceCache::new(stockholm());
    cache.get(hour(8));
    cache.get(hour(9));
    cache.invalidate();
    assert!(cache.is_empty());
}

// ── Day path ──

#[test]
fn test_day_path_samples() {
    let path = day_path(stockholm(), 172).unwrap();
    assert_eq!(path.len(), 96);
    assert_eq!(path[0].0, ClockTime::new(0, 0).unwrap());
    assert_eq!(path[95].0, ClockTime::new(23, 45).unwrap());
    for (time, pos) in &path {
        assert_eq!(*pos, solar_position(stockholm(), 172, *time));
    }
    assert!(path.iter().any(|(_, p)| p.is_above_horizon()));
    assert!(path.iter().any(|(_, p)| !p.is_above_horizon()));
}

#[test]
fn test_day_path_rejects_bad_day() {
    assert_eq!(day_path(stockholm(), 0), Err(Error::InvalidDayOfYear(0)));
    assert_eq!(day_path(stockholm(), 367), Err(Error::InvalidDayOfYear(367)));
    assert_eq!(day_path(stockholm(), 366).map(|p| p.len()), Ok(96));
}

#[test]
fn test_today_from_local_datetime() {
    let now = Stockholm.with_ymd_and_hms(2026, 6, 21, 14, 30, 0).unwrap();
    let today = today_from(&now).unwrap();
    assert_eq!(today.day_of_year, 172);
    assert_eq!(today.time, ClockTime::new(14, 30).unwrap());
}

#[test]
fn test_today_in_zone_ignores_daylight_saving() {
    // 14:30 CEST is 12:30 UTC; Stockholm's longitude zone is UTC+1.
    let now = Stockholm.with_ymd_and_hms(2026, 6, 21, 14, 30, 0).unwrap();
    let today = today_in_zone(&now, stockholm().longitude()).unwrap();
    assert_eq!(today.day_of_year, 172);
    assert_eq!(today.time, ClockTime::new(13, 30).unwrap());

    let winter = Stockholm.with_ymd_and_hms(2026, 1, 10, 14, 30, 0).unwrap();
    let today = today_in_zone(&winter, stockholm().longitude()).unwrap();
    assert_eq!(today.time, ClockTime::new(14, 30).unwrap());
}

#[test]
fn test_today_in_zone_crosses_midnight() {
    let late = chrono::Utc.with_ymd_and_hms(2026, 3, 20, 23, 30, 0).unwrap();
    let today = today_in_zone(&late, 18.0686).unwrap();
    assert_eq!(today.day_of_year, 80);
    assert_eq!(today.time, ClockTime::new(0, 30).unwrap());

    let west = today_in_zone(&late, -122.4).unwrap();
    assert_eq!(west.day_of_year, 79);
    assert_eq!(west.time, ClockTime::new(15, 30).unwrap());
}
