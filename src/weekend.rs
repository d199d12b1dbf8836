//! Two-day World Cup weekend: training, qualification, trial and the
//! individual competition each day, followed by a form update.

use crate::config::Config;
use crate::core_types::{Bib, Hill, HillScoringParams, Jumper, Roster, StartListEntry};
use crate::error::SjResult;
use crate::event::standings::shared_ranks;
use crate::event::{EventInput, EventKind, EventResult, EventRunner, IndividualEventInput};
use crate::form::{apply_form_change_to_roster, FormChangeEngine, FormMilestone};
use crate::gate::{select_starting_gate, SafetyGatePolicy, StartingGateRequest};
use crate::random::{shuffle, RandomSource};
use crate::simulator::SimpleJumpSimulator;
use crate::start_list::individual_first_round;
use crate::wind::GaussianWind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

pub const WEEKEND_DAYS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRow {
    pub rank: usize,
    pub bib: Bib,
    pub name: String,
    pub country: String,
    pub distances: Vec<f64>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekendStep {
    pub day: usize,
    pub label: String,
    pub kind: EventKind,
    pub start_gate: i32,
    pub rows: Vec<StepRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekendReport {
    pub steps: Vec<WeekendStep>,
    /// Roster after the last form update.
    pub roster: Roster,
}

/// Display rows for any event result, best first. Equal totals share a rank.
pub fn ranked_rows(result: &EventResult) -> Vec<StepRow> {
    let standings = result.standings();
    let totals: Vec<f64> = standings.iter().map(|s| s.total).collect();
    let ranks = shared_ranks(&totals);

    standings
        .iter()
        .zip(ranks)
        .map(|(s, rank)| {
            let jumps: Vec<_> = result
                .series()
                .iter()
                .filter_map(|series| series.jump_of(s.bib))
                .collect();
            let (name, country) = jumps
                .first()
                .map(|j| (j.jumper.name.clone(), j.jumper.country.clone()))
                .unwrap_or_default();
            StepRow {
                rank,
                bib: s.bib,
                name,
                country,
                distances: jumps.iter().map(|j| j.result.distance).collect(),
                total: s.total,
            }
        })
        .collect()
}

/// Runs the fixed weekend program on one hill.
pub struct Weekend<'c> {
    config: &'c Config,
    simulator: SimpleJumpSimulator,
    form_engine: FormChangeEngine,
    hill: Hill,
    scoring: HillScoringParams,
}

impl<'c> Weekend<'c> {
    pub fn new(config: &'c Config, hill: Hill) -> SjResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            simulator: SimpleJumpSimulator::new(config.physics.clone())?,
            form_engine: FormChangeEngine::new(config.form.clone()),
            scoring: HillScoringParams::for_hill(&hill),
            hill,
        })
    }

    pub fn run(&self, roster: &Roster, rng: &mut dyn RandomSource) -> SjResult<WeekendReport> {
        roster.validate()?;
        let mut roster = roster.clone();
        let mut steps = Vec::new();

        for day in 1..=WEEKEND_DAYS {
            info!("📅 Day {} on K{} / HS{}", day, self.hill.k_point, self.hill.real_hs);
            self.run_day(day, &roster, &mut steps, rng)?;

            let milestone = if day == 1 {
                FormMilestone::PostSaturday
            } else {
                FormMilestone::PostSunday
            };
            let alpha = self.config.form.alpha_for(milestone);
            roster.jumpers =
                apply_form_change_to_roster(&roster.jumpers, alpha, &self.form_engine, rng);
            info!("🔄 Form updated ({}, alpha {:.2})", milestone, alpha);
        }

        Ok(WeekendReport { steps, roster })
    }

    fn run_day(
        &self,
        day: usize,
        roster: &Roster,
        steps: &mut Vec<WeekendStep>,
        rng: &mut dyn RandomSource,
    ) -> SjResult<()> {
        let comp = &self.config.competition;
        let full_field =
            individual_first_round(&roster.jumpers, &roster.world_cup_ranks, |xs| {
                shuffle(&mut *rng, xs)
            });

        let training = self.run_step(
            day,
            "Training",
            &roster.jumpers,
            rng,
            |event| EventInput::Training {
                event,
                series: comp.training_series,
            },
            full_field.clone(),
        )?;
        steps.push(training.0);

        let (step, qualification) = self.run_step(
            day,
            "Qualification",
            &roster.jumpers,
            rng,
            |event| EventInput::Qualification {
                event,
                advance: comp.qualification_advance,
            },
            full_field.clone(),
        )?;
        steps.push(step);

        let qualified: HashSet<Bib> = match &qualification {
            EventResult::Qualification { qualified_bibs, .. } => {
                qualified_bibs.iter().copied().collect()
            }
            _ => HashSet::new(),
        };
        let qualified_entries: Vec<StartListEntry> = full_field
            .into_iter()
            .filter(|e| qualified.contains(&e.bib))
            .collect();
        let qualified_jumpers: Vec<Jumper> =
            qualified_entries.iter().map(|e| e.jumper.clone()).collect();

        let (step, _) = self.run_step(
            day,
            "Trial",
            &qualified_jumpers,
            rng,
            |event| EventInput::Trial { event },
            qualified_entries,
        )?;
        steps.push(step);

        let competition_list =
            individual_first_round(&qualified_jumpers, &roster.world_cup_ranks, |xs| {
                shuffle(&mut *rng, xs)
            });
        let (step, _) = self.run_step(
            day,
            "Competition",
            &qualified_jumpers,
            rng,
            |event| EventInput::Individual {
                event,
                final_round_size: comp.final_round_size,
            },
            competition_list,
        )?;
        steps.push(step);
        Ok(())
    }

    /// Selects a starting gate for `field`, then runs the event built by `make`.
    fn run_step<F>(
        &self,
        day: usize,
        label: &str,
        field: &[Jumper],
        rng: &mut dyn RandomSource,
        make: F,
        start_list: Vec<StartListEntry>,
    ) -> SjResult<(WeekendStep, EventResult)>
    where
        F: FnOnce(IndividualEventInput) -> EventInput,
    {
        let mut wind = GaussianWind::from(&self.config.wind);
        let start_gate = select_starting_gate(
            StartingGateRequest {
                simulator: &self.simulator,
                wind_provider: &mut wind,
                jury_bravery: self.config.competition.jury_bravery,
                jumpers: field,
                hill: &self.hill,
            },
            rng,
        )?;

        let input = make(IndividualEventInput {
            hill: self.hill,
            scoring: self.scoring,
            start_gate,
            start_list,
        });
        let kind = input.kind();

        let mut policy =
            SafetyGatePolicy::new(self.hill.real_hs, self.config.competition.safety_gate_hs_ratio);
        let mut runner = EventRunner::new(
            &self.simulator,
            &mut wind,
            &mut policy,
            rng,
            self.config.competition.gate_delta_limit,
        );
        let result = runner.run_event(&input)?;

        let step = WeekendStep {
            day,
            label: format!("Day {} {}", day, label),
            kind,
            start_gate,
            rows: ranked_rows(&result),
        };
        info!("✅ {} done from gate {}", step.label, start_gate);
        Ok((step, result))
    }
}
