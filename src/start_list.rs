//! Start order rules. Bibs are unique within one list.

use crate::core_types::{Bib, Jumper, JumperId, StartListEntry, TeamEntry};
use crate::error::{SjResult, SkiJumpError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Gender requirement of a team slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotRule {
    Any,
    Women,
    Men,
}

pub const DUET_SLOTS: [SlotRule; 2] = [SlotRule::Any, SlotRule::Any];
pub const MIXED_TEAM_SLOTS: [SlotRule; 4] = [
    SlotRule::Women,
    SlotRule::Men,
    SlotRule::Women,
    SlotRule::Men,
];

/// A team with its members assigned to slots (index = slot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLineup {
    pub team_id: String,
    pub country: String,
    pub entries: Vec<StartListEntry>,
}

impl TeamLineup {
    /// Bib of the first slot; the team's tie-break key.
    pub fn base_bib(&self) -> Bib {
        self.entries.first().map(|e| e.bib).unwrap_or(0)
    }
}

pub fn ensure_unique_bibs(entries: &[StartListEntry]) -> SjResult<()> {
    let mut seen = HashSet::new();
    for e in entries {
        if !seen.insert(e.bib) {
            return Err(SkiJumpError::Validation(format!("Duplicate bib {}", e.bib)));
        }
    }
    Ok(())
}

/// Round 1 of an individual event: unranked jumpers first in the order the
/// caller's shuffle leaves them, then ranked jumpers from the worst rank to
/// the best. Bibs follow start order.
pub fn individual_first_round<F>(
    jumpers: &[Jumper],
    ranks: &HashMap<JumperId, u32>,
    shuffle: F,
) -> Vec<StartListEntry>
where
    F: FnOnce(&mut [Jumper]),
{
    let mut unranked: Vec<Jumper> = Vec::new();
    let mut ranked: Vec<(u32, Jumper)> = Vec::new();
    for j in jumpers {
        match ranks.get(&j.id) {
            Some(&rank) => ranked.push((rank, j.clone())),
            None => unranked.push(j.clone()),
        }
    }

    shuffle(&mut unranked);
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    unranked
        .into_iter()
        .chain(ranked.into_iter().map(|(_, j)| j))
        .enumerate()
        .map(|(i, j)| StartListEntry::individual(i as Bib + 1, j))
        .collect()
}

/// Later rounds: weakest running total first; on equal totals the higher
/// bib starts later.
pub fn individual_next_round(
    entries: &[StartListEntry],
    totals: &HashMap<Bib, f64>,
) -> Vec<StartListEntry> {
    let mut next = entries.to_vec();
    next.sort_by(|a, b| {
        let ta = totals.get(&a.bib).copied().unwrap_or(0.0);
        let tb = totals.get(&b.bib).copied().unwrap_or(0.0);
        ta.total_cmp(&tb).then(a.bib.cmp(&b.bib))
    });
    next
}

/// Teams ordered by Nations Cup rank; unranked teams keep their relative
/// order after the ranked ones.
pub fn teams_by_nations_cup(teams: &[TeamEntry]) -> Vec<&TeamEntry> {
    let mut ordered: Vec<&TeamEntry> = teams.iter().collect();
    ordered.sort_by_key(|t| t.nations_cup_rank.unwrap_or(u32::MAX));
    ordered
}

fn pick_members(team: &TeamEntry, slots: &[SlotRule]) -> SjResult<Vec<Jumper>> {
    let mut women = team.members.iter().filter(|m| m.is_women);
    let mut men = team.members.iter().filter(|m| !m.is_women);
    let mut any = team.members.iter();

    let mut picked = Vec::with_capacity(slots.len());
    for (slot, rule) in slots.iter().enumerate() {
        let member = match rule {
            SlotRule::Any => any.next(),
            SlotRule::Women => women.next(),
            SlotRule::Men => men.next(),
        };
        match member {
            Some(m) => picked.push(m.clone()),
            None => {
                return Err(SkiJumpError::Validation(format!(
                    "Team '{}' cannot fill slot {} ({:?})",
                    team.team_id, slot, rule
                )))
            }
        }
    }
    Ok(picked)
}

/// Round-1 lineups for duet / mixed-team events.
/// `bib = slot * team_count + team_index + 1`.
pub fn team_lineups(teams: &[TeamEntry], slots: &[SlotRule]) -> SjResult<Vec<TeamLineup>> {
    let ordered = teams_by_nations_cup(teams);
    let team_count = ordered.len();

    let mut lineups = Vec::with_capacity(team_count);
    for (index, team) in ordered.into_iter().enumerate() {
        let members = pick_members(team, slots)?;
        let entries = members
            .into_iter()
            .enumerate()
            .map(|(slot, jumper)| StartListEntry {
                bib: (slot * team_count + index + 1) as Bib,
                jumper,
                country: Some(team.country.clone()),
                team_id: Some(team.team_id.clone()),
                slot_in_team: Some(slot),
            })
            .collect();
        lineups.push(TeamLineup {
            team_id: team.team_id.clone(),
            country: team.country.clone(),
            entries,
        });
    }
    Ok(lineups)
}

/// The first group of an event: slot 0 of every team in lineup order.
pub fn as_built_group(lineups: &[TeamLineup], slot: usize) -> Vec<StartListEntry> {
    lineups
        .iter()
        .filter_map(|l| l.entries.get(slot).cloned())
        .collect()
}

fn group_by_team_total(
    lineups: &[TeamLineup],
    slot: usize,
    team_totals: &HashMap<String, f64>,
) -> Vec<StartListEntry> {
    let mut order: Vec<&TeamLineup> = lineups.iter().collect();
    order.sort_by(|a, b| {
        let ta = team_totals.get(&a.team_id).copied().unwrap_or(0.0);
        let tb = team_totals.get(&b.team_id).copied().unwrap_or(0.0);
        ta.total_cmp(&tb).then(a.base_bib().cmp(&b.base_bib()))
    });
    order
        .into_iter()
        .filter_map(|l| l.entries.get(slot).cloned())
        .collect()
}

/// Duet group list: the weakest team so far starts first.
pub fn get_duet_group_start_list(
    lineups: &[TeamLineup],
    slot: usize,
    team_totals: &HashMap<String, f64>,
) -> Vec<StartListEntry> {
    group_by_team_total(lineups, slot, team_totals)
}

/// Mixed-team group list: the weakest team so far starts first.
pub fn get_mixed_team_group_start_list(
    lineups: &[TeamLineup],
    slot: usize,
    team_totals: &HashMap<String, f64>,
) -> Vec<StartListEntry> {
    group_by_team_total(lineups, slot, team_totals)
}

/// Team trial: fixed Nations Cup order, every member in turn, sequential bibs.
pub fn team_trial_start_list(teams: &[TeamEntry]) -> Vec<StartListEntry> {
    let mut bib: Bib = 0;
    let mut list = Vec::new();
    for team in teams_by_nations_cup(teams) {
        for (slot, jumper) in team.members.iter().enumerate() {
            bib += 1;
            list.push(StartListEntry {
                bib,
                jumper: jumper.clone(),
                country: Some(team.country.clone()),
                team_id: Some(team.team_id.clone()),
                slot_in_team: Some(slot),
            });
        }
    }
    list
}
