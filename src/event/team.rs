use super::standings::{add_points, TeamStanding};
use super::{EventKind, EventRunner, TeamEventInput, TeamEventResult};
use crate::core_types::{SeriesResult, StartListEntry};
use crate::error::SjResult;
use crate::start_list::{
    as_built_group, ensure_unique_bibs, get_duet_group_start_list,
    get_mixed_team_group_start_list, team_lineups, team_trial_start_list, TeamLineup, DUET_SLOTS,
    MIXED_TEAM_SLOTS,
};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info};

type GroupBuilder = fn(&[TeamLineup], usize, &HashMap<String, f64>) -> Vec<StartListEntry>;

/// Descending total, then descending base bib.
fn team_order(a: (f64, u32), b: (f64, u32)) -> Ordering {
    b.0.total_cmp(&a.0).then(b.1.cmp(&a.1))
}

fn ranked_lineups<'l>(
    lineups: &'l [TeamLineup],
    totals: &HashMap<String, f64>,
) -> Vec<&'l TeamLineup> {
    let mut ranked: Vec<&TeamLineup> = lineups.iter().collect();
    ranked.sort_by(|a, b| {
        let ka = (totals.get(&a.team_id).copied().unwrap_or(0.0), a.base_bib());
        let kb = (totals.get(&b.team_id).copied().unwrap_or(0.0), b.base_bib());
        team_order(ka, kb)
    });
    ranked
}

/// Shared engine for duet and mixed team: `slots.len()` groups per series,
/// and after series `i` the field is cut to `cuts[i]` when present.
#[allow(clippy::too_many_arguments)]
fn run_grouped(
    runner: &mut EventRunner,
    kind: EventKind,
    event: &TeamEventInput,
    slots: usize,
    num_series: usize,
    lineups: Vec<TeamLineup>,
    cuts: &[usize],
    later_groups: GroupBuilder,
) -> SjResult<TeamEventResult> {
    let all_entries: Vec<StartListEntry> =
        lineups.iter().flat_map(|l| l.entries.clone()).collect();
    ensure_unique_bibs(&all_entries)?;

    let mut totals: HashMap<String, f64> = lineups
        .iter()
        .map(|l| (l.team_id.clone(), 0.0))
        .collect();
    // Teams eliminated after series `i` are stored as finishing in round `i`.
    let mut reached: HashMap<String, usize> = HashMap::new();
    let mut active: Vec<TeamLineup> = lineups.clone();
    let mut completed: Vec<SeriesResult> = Vec::with_capacity(num_series);

    for series_index in 0..num_series {
        let mut series = SeriesResult::new(event.start_gate);
        for slot in 0..slots {
            let group = if series_index == 0 && slot == 0 {
                as_built_group(&active, slot)
            } else {
                later_groups(&active, slot, &totals)
            };
            debug!(
                "  {} series {} group {}: {} jumpers",
                kind,
                series_index + 1,
                slot + 1,
                group.len()
            );
            let points = runner.run_group(
                kind,
                &event.hill,
                &event.scoring,
                series_index,
                &mut series,
                &completed,
                &group,
            );
            for (entry, p) in group.iter().zip(points) {
                if let Some(team_id) = &entry.team_id {
                    let t = totals.entry(team_id.clone()).or_insert(0.0);
                    *t = add_points(*t, p);
                }
            }
        }
        completed.push(series);
        for l in &active {
            reached.insert(l.team_id.clone(), series_index);
        }

        if let Some(&cut) = cuts.get(series_index) {
            if series_index + 1 < num_series && cut < active.len() {
                let survivors: Vec<TeamLineup> = ranked_lineups(&active, &totals)
                    .into_iter()
                    .take(cut)
                    .cloned()
                    .collect();
                info!(
                    "  {} cut after series {}: {} of {} teams continue",
                    kind,
                    series_index + 1,
                    survivors.len(),
                    active.len()
                );
                active = survivors;
            }
        }
    }

    Ok(finish(completed, lineups, &totals, &reached))
}

fn finish(
    series: Vec<SeriesResult>,
    lineups: Vec<TeamLineup>,
    totals: &HashMap<String, f64>,
    reached: &HashMap<String, usize>,
) -> TeamEventResult {
    let mut ranked: Vec<&TeamLineup> = lineups.iter().collect();
    ranked.sort_by(|a, b| {
        let ra = reached.get(&a.team_id).copied().unwrap_or(0);
        let rb = reached.get(&b.team_id).copied().unwrap_or(0);
        rb.cmp(&ra).then_with(|| {
            let ka = (totals.get(&a.team_id).copied().unwrap_or(0.0), a.base_bib());
            let kb = (totals.get(&b.team_id).copied().unwrap_or(0.0), b.base_bib());
            team_order(ka, kb)
        })
    });

    let team_totals: Vec<TeamStanding> = ranked
        .iter()
        .map(|l| TeamStanding {
            team_id: l.team_id.clone(),
            total: totals.get(&l.team_id).copied().unwrap_or(0.0),
        })
        .collect();
    let final_order = team_totals.iter().map(|t| t.team_id.clone()).collect();

    TeamEventResult {
        series,
        lineups,
        team_totals,
        final_order,
    }
}

/// Three series of two groups; the field shrinks to `cuts[0]` then `cuts[1]`.
pub(crate) fn run_duet(
    runner: &mut EventRunner,
    event: &TeamEventInput,
    cuts: [usize; 2],
) -> SjResult<TeamEventResult> {
    let lineups = team_lineups(&event.teams, &DUET_SLOTS)?;
    run_grouped(
        runner,
        EventKind::Duet,
        event,
        DUET_SLOTS.len(),
        3,
        lineups,
        &cuts,
        get_duet_group_start_list,
    )
}

/// Two series of four groups (women, men, women, men), no cuts.
pub(crate) fn run_mixed_team(
    runner: &mut EventRunner,
    event: &TeamEventInput,
) -> SjResult<TeamEventResult> {
    let lineups = team_lineups(&event.teams, &MIXED_TEAM_SLOTS)?;
    run_grouped(
        runner,
        EventKind::MixedTeam,
        event,
        MIXED_TEAM_SLOTS.len(),
        2,
        lineups,
        &[],
        get_mixed_team_group_start_list,
    )
}

/// One series, every member of every team in fixed team order.
pub(crate) fn run_team_trial(
    runner: &mut EventRunner,
    event: &TeamEventInput,
) -> SjResult<TeamEventResult> {
    let start_list = team_trial_start_list(&event.teams);
    ensure_unique_bibs(&start_list)?;

    let mut lineups: Vec<TeamLineup> = Vec::new();
    for entry in &start_list {
        let team_id = entry.team_id.clone().unwrap_or_default();
        match lineups.iter_mut().find(|l| l.team_id == team_id) {
            Some(l) => l.entries.push(entry.clone()),
            None => lineups.push(TeamLineup {
                team_id,
                country: entry.country.clone().unwrap_or_default(),
                entries: vec![entry.clone()],
            }),
        }
    }

    let mut series = SeriesResult::new(event.start_gate);
    let points = runner.run_group(
        EventKind::TeamTrial,
        &event.hill,
        &event.scoring,
        0,
        &mut series,
        &[],
        &start_list,
    );

    let mut totals: HashMap<String, f64> = HashMap::new();
    for (entry, p) in start_list.iter().zip(points) {
        let t = totals
            .entry(entry.team_id.clone().unwrap_or_default())
            .or_insert(0.0);
        *t = add_points(*t, p);
    }
    info!("  Team trial: {} teams, {} jumps", lineups.len(), start_list.len());

    let reached = lineups.iter().map(|l| (l.team_id.clone(), 0)).collect();
    Ok(finish(vec![series], lineups, &totals, &reached))
}
