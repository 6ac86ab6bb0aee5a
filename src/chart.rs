use crate::analemma::{self, TraceCache, DAY_PATH_INTERVAL_MINUTES};
use crate::error::{Error, Result};
use crate::types::{
    ChartConfig, ChartFrame, ChartLayout, ChartScale, GridLine, HourLabel, HourTrace,
    ProjectedPoint, ProjectedTrace, SolarPosition, Today,
};

pub const MIN_MAX_ALTITUDE: f64 = 60.0;
pub const ALTITUDE_STEP: u32 = 10;
pub const AZIMUTH_STEP: u32 = 30;

impl ChartLayout {
    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        let (width, height) = (config.width, config.height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidCanvas { width, height });
        }
        let short_side = width.min(height);
        let margin = short_side * config.margin_fraction;
        Ok(Self {
            canvas_width: width,
            canvas_height: height,
            margin,
            plot_width: (width - 2.0 * margin).max(0.0),
            plot_height: (height - 2.0 * margin).max(0.0),
            hit_threshold: short_side * config.hit_threshold_fraction,
        })
    }

    /// Canvas pixels (origin top-left, y down) to plot space (origin at the
    /// plot's bottom-left corner, altitude growing toward negative y).
    pub fn pointer_to_plot(&self, canvas_x: f64, canvas_y: f64) -> ProjectedPoint {
        ProjectedPoint {
            x: canvas_x - self.margin,
            y: canvas_y - (self.canvas_height - self.margin),
        }
    }

    pub fn plot_to_canvas(&self, point: ProjectedPoint) -> (f64, f64) {
        (
            point.x + self.margin,
            point.y + self.canvas_height - self.margin,
        )
    }
}

pub fn project(
    position: &SolarPosition,
    scale: ChartScale,
    width: f64,
    height: f64,
) -> ProjectedPoint {
    ProjectedPoint {
        x: (position.azimuth / 360.0) * width,
        y: -(position.altitude / scale.max_altitude) * height,
    }
}

fn rendered(position: &SolarPosition, suppress_below_horizon: bool) -> bool {
    !suppress_below_horizon || position.is_above_horizon()
}

pub fn compute_scale<'a, I>(traces: I, suppress_below_horizon: bool) -> ChartScale
where
    I: IntoIterator<Item = &'a HourTrace>,
{
    let max_altitude = traces
        .into_iter()
        .flat_map(|t| t.points.iter())
        .filter(|p| rendered(p, suppress_below_horizon))
        .map(|p| (p.altitude / ALTITUDE_STEP as f64).ceil() * ALTITUDE_STEP as f64)
        .fold(MIN_MAX_ALTITUDE, f64::max);
    ChartScale { max_altitude }
}

pub fn project_trace(
    trace: &HourTrace,
    scale: ChartScale,
    layout: &ChartLayout,
    suppress_below_horizon: bool,
) -> ProjectedTrace {
    ProjectedTrace {
        hour: trace.hour,
        points: trace
            .points
            .iter()
            .filter(|p| rendered(p, suppress_below_horizon))
            .map(|p| project(p, scale, layout.plot_width, layout.plot_height))
            .collect(),
    }
}

pub fn compass_label(azimuth: u32) -> Option<&'static str> {
    match azimuth {
        0 | 360 => Some("N"),
        90 => Some("E"),
        180 => Some("S"),
        270 => Some("W"),
        _ => None,
    }
}

pub fn grid_lines(scale: ChartScale, layout: &ChartLayout) -> Vec<GridLine> {
    let top = scale.max_altitude as u32;
    let altitude = (0..=top)
        .step_by(ALTITUDE_STEP as usize)
        .map(|deg| GridLine::Altitude {
            degrees: deg,
            y: -(deg as f64 / scale.max_altitude) * layout.plot_height,
            label: format!("{}°", deg),
        });
    let azimuth = (0..=360)
        .step_by(AZIMUTH_STEP as usize)
        .map(|deg| GridLine::Azimuth {
            degrees: deg,
            x: (deg as f64 / 360.0) * layout.plot_width,
            label: compass_label(deg),
        });
    altitude.chain(azimuth).collect()
}

fn split_visible(
    samples: &[SolarPosition],
    scale: ChartScale,
    layout: &ChartLayout,
    suppress_below_horizon: bool,
) -> Vec<Vec<ProjectedPoint>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for p in samples {
        if rendered(p, suppress_below_horizon) {
            current.push(project(p, scale, layout.plot_width, layout.plot_height));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

pub fn build_frame(
    cache: &mut TraceCache,
    config: &ChartConfig,
    selected: HourLabel,
    today: Option<Today>,
) -> Result<ChartFrame> {
    let layout = ChartLayout::from_config(config)?;
    let suppress = config.suppress_below_horizon;

    cache.fill_all();
    let scale = compute_scale(cache.traces(), suppress);
    let traces: Vec<ProjectedTrace> = cache
        .traces()
        .map(|t| project_trace(t, scale, &layout, suppress))
        .collect();
    let grid = grid_lines(scale, &layout);

    let mut today_path = Vec::new();
    let mut today_marker = None;
    let mut sun_now = None;
    if let Some(today) = today {
        let samples = analemma::day_path(cache.location(), today.day_of_year)?;
        if config.show_today_path {
            let positions: Vec<SolarPosition> = samples.iter().map(|(_, p)| *p).collect();
            today_path = split_visible(&positions, scale, &layout, suppress);
        }

        let slot = (today.time.minutes_since_midnight() / DAY_PATH_INTERVAL_MINUTES) as usize;
        sun_now = samples
            .get(slot)
            .map(|(_, p)| p)
            .filter(|p| rendered(p, suppress))
            .map(|p| project(p, scale, layout.plot_width, layout.plot_height));

        today_marker = cache
            .get(selected)
            .point_on_day(today.day_of_year)
            .filter(|p| rendered(p, suppress))
            .map(|p| project(p, scale, layout.plot_width, layout.plot_height));
    }

    log::debug!(
        "built frame: {} traces, max altitude {}°, selected {}",
        traces.len(),
        scale.max_altitude,
        selected
    );

    Ok(ChartFrame {
        layout,
        scale,
        selected,
        traces,
        grid,
        today_path,
        today_marker,
        sun_now,
    })
}

impl ChartFrame {
    pub fn selected_trace(&self) -> Option<&ProjectedTrace> {
        self.traces.iter().find(|t| t.hour == self.selected)
    }
}
