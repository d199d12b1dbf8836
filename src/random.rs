//! Random source shared by every stochastic component.
//!
//! Reproducibility depends on the *order and count* of draws, so each
//! provided method documents how many uniforms it consumes.

use std::f64::consts::PI;

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Inclusive integer draw. One uniform.
    fn random_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = (max - min + 1) as f64;
        let offset = (self.next_f64() * span).floor() as i64;
        min + offset.min(max - min)
    }

    /// One uniform.
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    /// Box-Muller. Two uniforms, the sine branch is discarded.
    fn gaussian(&mut self, mean: f64, stddev: f64) -> f64 {
        let u1 = 1.0 - self.next_f64(); // (0, 1]
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + stddev * z
    }

    /// Inverse-CDF Laplace. One uniform.
    fn laplace(&mut self, mean: f64, scale: f64) -> f64 {
        let u = self.next_f64() - 0.5;
        let tail = (1.0 - 2.0 * u.abs()).max(f64::MIN_POSITIVE);
        mean - scale * u.signum() * tail.ln()
    }

    /// Inverse-CDF exponential. One uniform.
    fn exponential(&mut self, rate: f64) -> f64 {
        let u = 1.0 - self.next_f64(); // (0, 1]
        -u.ln() / rate
    }
}

impl RandomSource for fastrand::Rng {
    #[inline(always)]
    fn next_f64(&mut self) -> f64 {
        self.f64()
    }
}

/// Fisher-Yates, back to front. `len - 1` draws.
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.random_int(0, i as i64) as usize;
        items.swap(i, j);
    }
}

/// Replays a fixed cycle of uniforms. Used to pin down draw-order behaviour.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
    drawn: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() { vec![0.5] } else { values };
        Self {
            values,
            cursor: 0,
            drawn: 0,
        }
    }

    /// A source that always returns the same uniform.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Total number of uniforms handed out so far.
    pub fn draws(&self) -> usize {
        self.drawn
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        self.drawn += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

pub(crate) fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Rounds to the nearest half unit (distances, judge notes).
pub fn round_half(x: f64) -> f64 {
    (x * 2.0).round() / 2.0
}
