use crate::types::{ChartFrame, HourLabel, ProjectedPoint, ProjectedTrace};

pub fn distance(a: ProjectedPoint, b: ProjectedPoint) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Hour owning the globally closest point, if it lies strictly within
/// `threshold`. Ties go to the first point in hour-then-day order.
pub fn nearest(
    pointer: ProjectedPoint,
    traces: &[ProjectedTrace],
    threshold: f64,
) -> Option<HourLabel> {
    let mut best: Option<(HourLabel, f64)> = None;
    for trace in traces {
        for &point in &trace.points {
            let d = distance(pointer, point);
            if best.map_or(true, |(_, closest)| d < closest) {
                best = Some((trace.hour, d));
            }
        }
    }
    best.filter(|&(_, d)| d < threshold).map(|(hour, _)| hour)
}

impl ChartFrame {
    pub fn hit(&self, canvas_x: f64, canvas_y: f64) -> Option<HourLabel> {
        let pointer = self.layout.pointer_to_plot(canvas_x, canvas_y);
        nearest(pointer, &self.traces, self.layout.hit_threshold)
    }
}
