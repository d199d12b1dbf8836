use super::{individual, team, EventInput, EventKind, EventResult};
use crate::core_types::{
    Hill, HillScoringParams, JumpResult, SeriesJump, SeriesResult, SimulationContext,
    StartListEntry,
};
use crate::error::SjResult;
use crate::gate::{GatePolicy, GateState};
use crate::random::RandomSource;
use crate::scoring::{self, has_style_points, judge_style};
use crate::simulator::JumpSimulator;
use crate::wind::WindProvider;
use tracing::{info, warn};

/// Collaborators of one event run, injected explicitly.
pub struct EventRunner<'a> {
    pub simulator: &'a dyn JumpSimulator,
    pub wind_provider: &'a mut dyn WindProvider,
    pub gate_policy: &'a mut dyn GatePolicy,
    pub rng: &'a mut dyn RandomSource,
    /// Largest gate delta (either direction) a policy may request.
    pub gate_delta_limit: i32,
}

/// Position of a single jump inside an event.
pub struct JumpSlot<'s> {
    pub kind: EventKind,
    pub hill: &'s Hill,
    pub scoring: &'s HillScoringParams,
    pub series_index: usize,
    pub jump_index: usize,
    pub start_gate: i32,
    pub current_series: &'s [SeriesJump],
    pub previous_series: &'s [SeriesResult],
    pub entry: &'s StartListEntry,
}

impl<'a> EventRunner<'a> {
    pub fn new(
        simulator: &'a dyn JumpSimulator,
        wind_provider: &'a mut dyn WindProvider,
        gate_policy: &'a mut dyn GatePolicy,
        rng: &'a mut dyn RandomSource,
        gate_delta_limit: i32,
    ) -> Self {
        Self {
            simulator,
            wind_provider,
            gate_policy,
            rng,
            gate_delta_limit,
        }
    }

    pub fn run_event(&mut self, input: &EventInput) -> SjResult<EventResult> {
        let kind = input.kind();
        info!("▶ Running {} event", kind);

        let result = match input {
            EventInput::Training { event, series } => {
                individual::run(self, kind, event, (*series).max(1), None)?
            }
            EventInput::Trial { event } => individual::run(self, kind, event, 1, None)?,
            EventInput::Qualification { event, advance } => {
                individual::run(self, kind, event, 1, Some(*advance))?
            }
            EventInput::Individual {
                event,
                final_round_size,
            } => individual::run(self, kind, event, 2, Some(*final_round_size))?,
            EventInput::Duet { event, cuts } => {
                EventResult::Duet(team::run_duet(self, event, *cuts)?)
            }
            EventInput::MixedTeam { event } => {
                EventResult::MixedTeam(team::run_mixed_team(self, event)?)
            }
            EventInput::TeamTrial { event } => {
                EventResult::TeamTrial(team::run_team_trial(self, event)?)
            }
        };

        info!(
            "■ {} event finished: {} series, {} jumps",
            kind,
            result.series().len(),
            result.series().iter().map(|s| s.jumps.len()).sum::<usize>()
        );
        Ok(result)
    }

    /// Wind, gate, simulation, style, score. In that draw order.
    pub fn run_one_jump(&mut self, slot: &JumpSlot) -> JumpResult {
        let wind = self.wind_provider.get_wind(&mut *self.rng);

        let state = GateState {
            series_index: slot.series_index,
            jump_index: slot.jump_index,
            start_gate: slot.start_gate,
            current_series: slot.current_series,
            previous_series: slot.previous_series,
            next_jumper: &slot.entry.jumper,
            wind,
        };
        let requested = self.gate_policy.get_gate(&state);
        let limit = self.gate_delta_limit.max(0);
        let gate_delta = requested.clamp(-limit, limit);
        if gate_delta != requested {
            warn!(
                "Gate delta {} for bib {} clamped to {}",
                requested, slot.entry.bib, gate_delta
            );
        }

        let jumper = &slot.entry.jumper;
        let ctx = SimulationContext {
            jumper,
            hill: slot.hill,
            gate: slot.start_gate + gate_delta,
            wind,
            round_kind: slot.kind.round_kind(),
        };
        let jump = self.simulator.simulate(&ctx, &mut *self.rng);

        let style = has_style_points(slot.kind)
            .then(|| judge_style(&jump, jumper, slot.hill, &mut *self.rng));

        let points = scoring::jump_points(
            scoring::distance_points(jump.distance, slot.hill.k_point, slot.scoring),
            scoring::gate_points(gate_delta, slot.scoring),
            scoring::wind_points(&wind, slot.scoring),
            style.map(|s| s.sum),
        );

        JumpResult {
            distance: jump.distance,
            landing: jump.landing,
            points,
            gate_delta,
            wind,
            style_points: style.map(|s| s.sum),
            style_notes: style.map(|s| s.notes),
        }
    }

    /// Runs `order` as consecutive jumps of `series`, numbering from the
    /// series' current length. Returns the points of each jump.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn run_group(
        &mut self,
        kind: EventKind,
        hill: &Hill,
        scoring: &HillScoringParams,
        series_index: usize,
        series: &mut SeriesResult,
        previous_series: &[SeriesResult],
        order: &[StartListEntry],
    ) -> Vec<f64> {
        let mut points = Vec::with_capacity(order.len());
        for entry in order {
            let slot = JumpSlot {
                kind,
                hill,
                scoring,
                series_index,
                jump_index: series.jumps.len(),
                start_gate: series.start_gate,
                current_series: &series.jumps,
                previous_series,
                entry,
            };
            let result = self.run_one_jump(&slot);
            points.push(result.points);
            series.jumps.push(SeriesJump {
                bib: entry.bib,
                jumper: entry.jumper.clone(),
                result,
            });
        }
        points
    }
}
