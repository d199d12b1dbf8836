//! Five-judge style simulation.
//!
//! Each jump draws one landing-dependent "base" term shared by the panel,
//! then one narrower "specific" term per judge. Lowest and highest notes
//! are dropped.

use crate::core_types::{Hill, Jump, Jumper, Landing};
use crate::random::{round_half, RandomSource};

pub const JUDGES: usize = 5;
pub const NOTE_MIN: f64 = 1.0;
pub const NOTE_MAX: f64 = 20.0;
pub const STYLE_MAX: f64 = 60.0;

const BASE_NOTE: f64 = 17.5;
const LANDING_TENDENCY_WEIGHT: f64 = 0.3;
const HS_BONUS_CAP: f64 = 1.01;
const K_BONUS_SCALE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleScore {
    pub notes: [f64; JUDGES],
    pub sum: f64,
}

/// (base range, specific half-width) per landing.
fn landing_ranges(landing: Landing) -> ((f64, f64), f64) {
    match landing {
        Landing::Telemark => ((-1.0, 0.5), 0.5),
        Landing::Parallel => ((-2.5, -1.5), 0.5),
        Landing::TouchDown => ((-6.5, -5.0), 0.75),
        Landing::Fall => ((-10.5, -8.5), 1.0),
    }
}

fn clamp_note(x: f64) -> f64 {
    x.clamp(NOTE_MIN, NOTE_MAX)
}

/// Draws `1 + JUDGES` uniforms.
pub fn judge_style(jump: &Jump, jumper: &Jumper, hill: &Hill, rng: &mut dyn RandomSource) -> StyleScore {
    let mut base = clamp_note(BASE_NOTE + jumper.skills.landing_tendency * LANDING_TENDENCY_WEIGHT);

    let counted = jump.distance.min(hill.real_hs * HS_BONUS_CAP);
    if hill.k_point > 0.0 {
        base = clamp_note(base + (counted - hill.k_point) / (hill.k_point * K_BONUS_SCALE));
    }

    let ((lo, hi), spread) = landing_ranges(jump.landing);
    base = clamp_note(base + rng.uniform(lo, hi));

    let mut notes = [0.0; JUDGES];
    for note in notes.iter_mut() {
        *note = clamp_note(round_half(base + rng.uniform(-spread, spread)));
    }

    StyleScore {
        notes,
        sum: trimmed_sum(&notes),
    }
}

/// Drop the lowest and highest note and sum the middle three.
pub fn trimmed_sum(notes: &[f64; JUDGES]) -> f64 {
    let mut sorted = *notes;
    sorted.sort_by(|a, b| a.total_cmp(b));
    let middle: f64 = sorted[1..JUDGES - 1].iter().sum();
    round_half(middle).clamp(0.0, STYLE_MAX)
}
