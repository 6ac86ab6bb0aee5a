use chrono::Utc;

use analemma::analemma::{today_in_zone, TraceCache};
use analemma::angles::{solar_geometry, zone_label};
use analemma::chart::build_frame;
use analemma::types::{ChartConfig, GeoCoordinate, HourLabel};

fn main() -> Result<(), analemma::Error> {
    let location = GeoCoordinate::new(59.3293, 18.0686)?;
    let selected: HourLabel = "12:00".parse()?;

    // The wall clock is read here and nowhere inside the library.
    let today = today_in_zone(&Utc::now(), location.longitude())?;

    let g = solar_geometry(location, today.day_of_year, today.time);

    println!("=== Analemma Example ===");
    println!(
        "Location: Stockholm ({:.4}°N, {:.4}°E), {}",
        location.latitude(),
        location.longitude(),
        zone_label(location.longitude())
    );
    println!("Local time: {} (day {})", today.time, today.day_of_year);
    println!();
    println!("--- Solar Position ---");
    println!("Declination: {:.2}°", g.declination);
    println!("Equation of Time: {:.2} minutes", g.equation_of_time);
    println!("Solar Time: {:.2} hours", g.solar_time);
    println!("Hour Angle: {:.2}°", g.hour_angle);
    println!("Altitude: {:.2}°", g.altitude);
    println!("Azimuth: {:.2}° (0°=N, 90°=E, 180°=S)", g.azimuth);
    println!();

    let mut cache = TraceCache::new(location);
    let config = ChartConfig::default();
    let frame = build_frame(&mut cache, &config, selected, Some(today))?;

    println!("--- Chart ---");
    println!(
        "Canvas {}x{}, plot {:.0}x{:.0}, altitude axis 0-{}°",
        config.width,
        config.height,
        frame.layout.plot_width,
        frame.layout.plot_height,
        frame.scale.max_altitude
    );
    for trace in &frame.traces {
        let marker = if trace.hour == frame.selected { " *" } else { "" };
        println!("{}: {} visible days{}", trace.hour, trace.points.len(), marker);
    }
    println!("Today's path segments: {}", frame.today_path.len());

    if let Some(p) = frame.today_marker {
        let (cx, cy) = frame.layout.plot_to_canvas(p);
        match frame.hit(cx, cy) {
            Some(hour) => println!("Click on today's marker selects {}", hour),
            None => println!("Click on today's marker selects nothing"),
        }
    }
    Ok(())
}
