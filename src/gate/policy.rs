use crate::core_types::{Jumper, SeriesJump, SeriesResult, Wind};
use std::collections::HashMap;

/// Everything a gate policy may look at before the next jump.
#[derive(Debug, Clone, Copy)]
pub struct GateState<'a> {
    pub series_index: usize,
    pub jump_index: usize,
    pub start_gate: i32,
    pub current_series: &'a [SeriesJump],
    pub previous_series: &'a [SeriesResult],
    pub next_jumper: &'a Jumper,
    pub wind: Wind,
}

/// Returns the gate delta relative to the series' start gate.
/// The event runner clamps the answer to its configured limit.
pub trait GatePolicy {
    fn get_gate(&mut self, state: &GateState) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantGatePolicy(pub i32);

impl GatePolicy for ConstantGatePolicy {
    fn get_gate(&mut self, _state: &GateState) -> i32 {
        self.0
    }
}

/// Manual overrides keyed by `(series_index, jump_index)`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGatePolicy {
    pub overrides: HashMap<(usize, usize), i32>,
    pub fallback: i32,
}

impl ScriptedGatePolicy {
    pub fn with_override(mut self, series_index: usize, jump_index: usize, delta: i32) -> Self {
        self.overrides.insert((series_index, jump_index), delta);
        self
    }
}

impl GatePolicy for ScriptedGatePolicy {
    fn get_gate(&mut self, state: &GateState) -> i32 {
        self.overrides
            .get(&(state.series_index, state.jump_index))
            .copied()
            .unwrap_or(self.fallback)
    }
}

/// Lowers the bar one step for the rest of a series once any jump in it
/// reached `threshold` meters.
#[derive(Debug, Clone, Copy)]
pub struct SafetyGatePolicy {
    pub threshold: f64,
}

impl SafetyGatePolicy {
    pub fn new(real_hs: f64, hs_ratio: f64) -> Self {
        Self {
            threshold: real_hs * hs_ratio,
        }
    }
}

impl GatePolicy for SafetyGatePolicy {
    fn get_gate(&mut self, state: &GateState) -> i32 {
        let reached = state
            .current_series
            .iter()
            .any(|j| j.result.distance >= self.threshold);
        if reached {
            -1
        } else {
            0
        }
    }
}
