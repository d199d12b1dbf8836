//! Roster-wide form evolution between events.
//!
//! A change is drawn from a heavy-tailed t(2)-like distribution, scaled so the
//! median magnitude equals the effective alpha, and then dampened whenever it
//! pushes a jumper further from the centre of the scale.

use crate::config::FormParams;
use crate::core_types::Jumper;
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

pub const FORM_MIN: f64 = 0.0;
pub const FORM_MAX: f64 = 10.0;
pub const FORM_CENTER: f64 = 5.0;
const HALF_RANGE: f64 = FORM_MAX - FORM_CENTER;

/// Points in a game where the roster's form is re-rolled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum FormMilestone {
    GameStart,
    PostSaturday,
    PostSunday,
}

impl FormParams {
    pub fn alpha_for(&self, milestone: FormMilestone) -> f64 {
        match milestone {
            FormMilestone::GameStart => self.form_alpha_game_start,
            FormMilestone::PostSaturday => self.form_alpha_post_saturday,
            FormMilestone::PostSunday => self.form_alpha_post_sunday,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormChangeEngine {
    pub params: FormParams,
}

impl FormChangeEngine {
    pub fn new(params: FormParams) -> Self {
        Self { params }
    }

    /// Alpha after the form-dependent multiplier: full strength at the centre,
    /// falling linearly to the configured fractions at either end.
    pub fn effective_alpha(&self, alpha: f64, form: f64) -> f64 {
        let form = form.clamp(FORM_MIN, FORM_MAX);
        let multiplier = if form <= FORM_CENTER {
            let t = form / HALF_RANGE;
            self.params.form_alpha_at_zero + (1.0 - self.params.form_alpha_at_zero) * t
        } else {
            let t = (form - FORM_CENTER) / HALF_RANGE;
            1.0 + (self.params.form_alpha_at_ten - 1.0) * t
        };
        alpha.max(0.0) * multiplier
    }

    /// Raw change before dampening. Three uniforms: gaussian (two) then
    /// exponential (one).
    pub fn draw_delta(&self, alpha: f64, form: f64, rng: &mut dyn RandomSource) -> f64 {
        let z = rng.gaussian(0.0, 1.0);
        let chi = rng.exponential(1.0).max(f64::MIN_POSITIVE);
        let t2 = z / chi.sqrt();
        t2 * self.effective_alpha(alpha, form) / self.params.form_t2_median
    }

    /// Applies `delta` to `form`. Movement toward the centre passes through;
    /// movement away from it is compressed by a power law so the ends of the
    /// scale are approached ever more slowly.
    pub fn dampen(&self, form: f64, delta: f64) -> f64 {
        let form = form.clamp(FORM_MIN, FORM_MAX);
        if delta == 0.0 {
            return form;
        }

        let offset = form - FORM_CENTER;
        let toward_center = offset != 0.0 && offset.signum() != delta.signum();
        let (start, away) = if toward_center {
            if delta.abs() <= offset.abs() {
                return form + delta;
            }
            // Crosses the centre; only the overshoot is compressed.
            (FORM_CENTER, delta + offset)
        } else {
            (form, delta)
        };

        let direction = away.signum();
        let exponent = if direction > 0.0 {
            self.params.form_exponent_high
        } else {
            self.params.form_exponent_low
        };

        let x0 = ((start - FORM_CENTER).abs() / HALF_RANGE).min(1.0);
        let room = 1.0 - x0;
        if room <= 0.0 {
            return start.clamp(FORM_MIN, FORM_MAX);
        }
        let ratio = away.abs() / HALF_RANGE / room;
        let consumed = ratio / (1.0 + ratio.powf(1.0 / exponent)).powf(exponent);
        let x1 = x0 + room * consumed;

        (FORM_CENTER + direction * x1 * HALF_RANGE).clamp(FORM_MIN, FORM_MAX)
    }

    /// New form for one jumper; the input is left untouched.
    pub fn apply(&self, jumper: &Jumper, alpha: f64, rng: &mut dyn RandomSource) -> Jumper {
        let form = jumper.skills.form;
        let delta = self.draw_delta(alpha, form, rng);
        let next = self.dampen(form, delta);
        debug!(
            "Form {}: {:.2} -> {:.2} (raw delta {:+.3})",
            jumper.id, form, next, delta
        );
        jumper.with_form(next)
    }
}

/// Independent draw per jumper, in roster order. Returns a new roster.
pub fn apply_form_change_to_roster(
    jumpers: &[Jumper],
    alpha: f64,
    engine: &FormChangeEngine,
    rng: &mut dyn RandomSource,
) -> Vec<Jumper> {
    jumpers.iter().map(|j| engine.apply(j, alpha, rng)).collect()
}
