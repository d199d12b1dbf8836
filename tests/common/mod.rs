#![allow(dead_code)]

use skijump::core_types::{
    Hill, HillScoringParams, Jump, Jumper, JumperSkills, Landing, SimulationContext,
    StartListEntry, TeamEntry, Wind,
};
use skijump::event::{EventInput, EventResult, EventRunner, IndividualEventInput, TeamEventInput};
use skijump::gate::{ConstantGatePolicy, GatePolicy};
use skijump::random::{RandomSource, ScriptedRandom};
use skijump::simulator::JumpSimulator;
use skijump::wind::ConstantWind;
use std::collections::HashMap;

pub fn hill_k120() -> Hill {
    Hill::new(120.0, 137.0, 1.0)
}

pub fn scoring_k120() -> HillScoringParams {
    HillScoringParams {
        points_per_gate: 7.4,
        points_per_meter: 1.8,
        wind_headwind_per_ms: 10.8,
        wind_tailwind_per_ms: 13.1,
    }
}

pub fn jumper(id: &str, skill: f64) -> Jumper {
    Jumper::new(
        id,
        JumperSkills {
            small_hill_skill: skill,
            big_hill_skill: skill,
            ..Default::default()
        },
    )
}

/// `J01`, `J02`, ... all of average skill.
pub fn field(n: usize) -> Vec<Jumper> {
    (1..=n).map(|i| jumper(&format!("J{:02}", i), 5.0)).collect()
}

pub fn entries(jumpers: &[Jumper]) -> Vec<StartListEntry> {
    jumpers
        .iter()
        .enumerate()
        .map(|(i, j)| StartListEntry::individual(i as u32 + 1, j.clone()))
        .collect()
}

pub fn individual_event(start_list: Vec<StartListEntry>) -> IndividualEventInput {
    IndividualEventInput {
        hill: hill_k120(),
        scoring: scoring_k120(),
        start_gate: 0,
        start_list,
    }
}

pub fn team_event(teams: Vec<TeamEntry>) -> TeamEventInput {
    TeamEventInput {
        hill: hill_k120(),
        scoring: scoring_k120(),
        start_gate: 0,
        teams,
    }
}

/// Team `T01`.. with `members` men (or alternating women/men when `mixed`).
pub fn teams(count: usize, members: usize, mixed: bool) -> Vec<TeamEntry> {
    (1..=count)
        .map(|t| TeamEntry {
            team_id: format!("T{:02}", t),
            country: format!("C{:02}", t),
            nations_cup_rank: Some(t as u32),
            members: (0..members)
                .map(|m| {
                    let j = jumper(&format!("T{:02}M{}", t, m), 5.0);
                    if mixed && m % 2 == 0 {
                        j.women()
                    } else {
                        j
                    }
                })
                .collect(),
        })
        .collect()
}

/// Distance per jumper id plus a per-gate slope. Never draws.
#[derive(Debug, Clone, Default)]
pub struct FixedDistanceSimulator {
    pub distances: HashMap<String, f64>,
    pub default: f64,
    pub per_gate: f64,
    pub landing: Option<Landing>,
}

impl FixedDistanceSimulator {
    pub fn uniform(distance: f64) -> Self {
        Self {
            default: distance,
            ..Default::default()
        }
    }

    pub fn with(mut self, id: &str, distance: f64) -> Self {
        self.distances.insert(id.to_string(), distance);
        self
    }

    pub fn per_gate(mut self, meters: f64) -> Self {
        self.per_gate = meters;
        self
    }
}

impl JumpSimulator for FixedDistanceSimulator {
    fn simulate(&self, ctx: &SimulationContext, _rng: &mut dyn RandomSource) -> Jump {
        let base = self
            .distances
            .get(&ctx.jumper.id)
            .copied()
            .unwrap_or(self.default);
        Jump {
            distance: base + ctx.gate as f64 * self.per_gate,
            landing: self.landing.unwrap_or(Landing::Telemark),
        }
    }
}

/// Runs one event with calm wind, a fixed gate and mid-range uniforms.
pub fn run_with(
    input: &EventInput,
    simulator: &dyn JumpSimulator,
    gate_policy: &mut dyn GatePolicy,
    gate_delta_limit: i32,
) -> EventResult {
    let mut wind = ConstantWind(Wind::default());
    let mut rng = ScriptedRandom::constant(0.5);
    let mut runner = EventRunner::new(
        simulator,
        &mut wind,
        gate_policy,
        &mut rng,
        gate_delta_limit,
    );
    runner.run_event(input).expect("event should run")
}

pub fn run_fixed(input: &EventInput, simulator: &dyn JumpSimulator) -> EventResult {
    run_with(input, simulator, &mut ConstantGatePolicy(0), 10)
}

/// A spread-out field of `n` jumpers with World Cup ranks for the better half.
pub fn weekend_roster(n: usize) -> skijump::core_types::Roster {
    let jumpers: Vec<Jumper> = (1..=n)
        .map(|i| {
            let skill = 3.0 + 5.0 * (i as f64 / n as f64);
            jumper(&format!("R{:02}", i), skill).with_name(format!("Rider {}", i), "SLO")
        })
        .collect();
    let world_cup_ranks = jumpers
        .iter()
        .rev()
        .take(n / 2)
        .enumerate()
        .map(|(rank, j)| (j.id.clone(), rank as u32 + 1))
        .collect();
    skijump::core_types::Roster {
        jumpers,
        world_cup_ranks,
    }
}
