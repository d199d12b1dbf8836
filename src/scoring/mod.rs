pub mod style;

pub use self::style::{judge_style, StyleScore};
use crate::core_types::{HillScoringParams, Wind};
use crate::event::EventKind;

/// 60 points at K, `points_per_meter` per meter either side.
pub fn distance_points(distance: f64, k_point: f64, params: &HillScoringParams) -> f64 {
    60.0 + (distance - k_point) * params.points_per_meter
}

/// A lowered bar (negative delta) is compensated with positive points.
pub fn gate_points(gate_delta: i32, params: &HillScoringParams) -> f64 {
    -(gate_delta as f64) * params.points_per_gate
}

/// Headwind (`average >= 0`) costs points, tailwind earns them.
pub fn wind_points(wind: &Wind, params: &HillScoringParams) -> f64 {
    if wind.average >= 0.0 {
        -wind.average * params.wind_headwind_per_ms
    } else {
        wind.average.abs() * params.wind_tailwind_per_ms
    }
}

pub fn has_style_points(kind: EventKind) -> bool {
    matches!(
        kind,
        EventKind::Qualification | EventKind::Individual | EventKind::Duet | EventKind::MixedTeam
    )
}

/// Sum of the components, rounded to 0.1 and floored at zero.
pub fn jump_points(
    distance_points: f64,
    gate_points: f64,
    wind_points: f64,
    style_points: Option<f64>,
) -> f64 {
    let total = distance_points + gate_points + wind_points + style_points.unwrap_or(0.0);
    ((total * 10.0).round() / 10.0).max(0.0)
}
