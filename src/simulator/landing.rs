use crate::config::LandingTable;
use crate::core_types::Landing;
use crate::random::RandomSource;

/// Regime index from the distance/HS ratio.
pub fn landing_regime(distance: f64, real_hs: f64, table: &LandingTable) -> usize {
    let ratio = if real_hs > 0.0 { distance / real_hs } else { 0.0 };
    table
        .limits
        .iter()
        .position(|&limit| ratio <= limit)
        .unwrap_or(table.limits.len())
}

/// One uniform, bucketed by the regime's cumulative thresholds.
pub fn draw_landing(
    distance: f64,
    real_hs: f64,
    table: &LandingTable,
    rng: &mut dyn RandomSource,
) -> Landing {
    let [fall, touch_down, parallel] = table.thresholds[landing_regime(distance, real_hs, table)];
    let u = rng.next_f64();
    if u < fall {
        Landing::Fall
    } else if u < touch_down {
        Landing::TouchDown
    } else if u < parallel {
        Landing::Parallel
    } else {
        Landing::Telemark
    }
}
