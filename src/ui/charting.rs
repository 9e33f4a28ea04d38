use crate::trail::{Axis, Trail};

/// Points for one coordinate graph.
///
/// A coordinate `c` on an axis of extent `extent` is plotted at
/// `c / extent * graph_height` against its trail index, so larger canvas
/// coordinates sit higher in the graph. The path starts at mid-height.
pub fn graph_points(trail: &Trail, axis: Axis, extent: f64, graph_height: f64) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(trail.len() + 1);
    points.push((0.0, graph_height / 2.0));
    if extent <= 0.0 {
        return points;
    }
    points.extend(
        trail
            .series(axis)
            .map(|(i, c)| (i, c / extent * graph_height)),
    );
    points
}

/// Upper bound of the time axis for a trail of `len` points
pub fn time_bound(len: usize) -> f64 {
    (len.saturating_sub(1) as f64).max(1.0)
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
