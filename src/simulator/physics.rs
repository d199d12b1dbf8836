//! Pure distance terms. Nothing here draws randomness.

use crate::config::PhysicsParams;
use crate::core_types::{Hill, JumperSkills};
use crate::random::smoothstep;

/// Small/big hill skill blended by a smoothstep over the K window.
pub fn effective_skill(skills: &JumperSkills, k_point: f64, p: &PhysicsParams) -> f64 {
    let t = smoothstep(p.skill_blend_k_min, p.skill_blend_k_max, k_point);
    skills.small_hill_skill * (1.0 - t) + skills.big_hill_skill * t
}

/// Meters gained per rating point.
pub fn rating_slope(k_point: f64, p: &PhysicsParams) -> f64 {
    k_point * p.rating_slope_per_k
}

/// Flight matters more on bigger hills.
pub fn dynamic_flight_ratio(k_point: f64, p: &PhysicsParams) -> f64 {
    (p.flight_ratio_base + (k_point - 120.0) * p.flight_ratio_per_k).clamp(0.6, 1.5)
}

pub fn starting_distance(k_point: f64, p: &PhysicsParams) -> f64 {
    k_point / p.starting_distance_divisor
}

/// Power-law meters per m/s, boosted on flying hills.
pub fn wind_meters_per_ms(k_point: f64, p: &PhysicsParams) -> f64 {
    let base = p.wind_meters_coefficient * k_point.max(1.0).powf(p.wind_meters_exponent);
    if k_point > p.ski_flying_k {
        base * p.ski_flying_wind_boost
    } else {
        base
    }
}

/// Tailwind costs more than an equal headwind gives; grows smoothly with speed.
pub fn tailwind_multiplier(average: f64, p: &PhysicsParams) -> f64 {
    1.0 + p.tailwind_extra * smoothstep(0.0, p.tailwind_saturation_ms, average.abs())
}

/// Signed wind meters. `factor` is the per-jump random scale:
/// `[0, 1]` for headwind, `[1, 1 + instability]` for tailwind.
pub fn wind_contribution(average: f64, factor: f64, k_point: f64, p: &PhysicsParams) -> f64 {
    let per_ms = wind_meters_per_ms(k_point, p);
    if average >= 0.0 {
        average * per_ms * factor.clamp(0.0, 1.0)
    } else {
        average * per_ms * tailwind_multiplier(average, p) * factor.max(1.0)
    }
}

pub fn gender_offset(k_point: f64, is_women: bool, p: &PhysicsParams) -> f64 {
    if is_women {
        k_point * p.women_offset_ratio
    } else {
        0.0
    }
}

/// Logarithmic soft cap on distance past the compression start.
pub fn compress_beyond_hs(raw: f64, hill: &Hill, p: &PhysicsParams) -> f64 {
    let start = hill.real_hs * p.hs_compression_start;
    if raw <= start {
        return raw;
    }
    let excess = raw - start;
    start + (1.0 + excess * p.hs_compression_strength).ln() / p.hs_compression_strength
}
