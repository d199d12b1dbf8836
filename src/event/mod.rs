pub mod individual;
pub mod runner;
pub mod standings;
pub mod team;

pub use self::runner::{EventRunner, JumpSlot};
pub use self::standings::{order_by_total_then_bib, Standing, TeamStanding};

use crate::core_types::{Bib, Hill, HillScoringParams, RoundKind, SeriesResult, StartListEntry, TeamEntry};
use crate::start_list::TeamLineup;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Training,
    Trial,
    Qualification,
    Individual,
    Duet,
    MixedTeam,
    TeamTrial,
}

impl EventKind {
    pub fn round_kind(&self) -> RoundKind {
        match self {
            Self::Training => RoundKind::Training,
            Self::Trial | Self::TeamTrial => RoundKind::Trial,
            Self::Qualification => RoundKind::Qualification,
            Self::Individual | Self::Duet | Self::MixedTeam => RoundKind::Competition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualEventInput {
    pub hill: Hill,
    pub scoring: HillScoringParams,
    pub start_gate: i32,
    pub start_list: Vec<StartListEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEventInput {
    pub hill: Hill,
    pub scoring: HillScoringParams,
    pub start_gate: i32,
    pub teams: Vec<TeamEntry>,
}

pub const DEFAULT_TRAINING_SERIES: usize = 1;
pub const DEFAULT_QUALIFICATION_ADVANCE: usize = 50;
pub const DEFAULT_FINAL_ROUND_SIZE: usize = 30;
pub const DEFAULT_DUET_CUTS: [usize; 2] = [12, 8];

fn default_training_series() -> usize {
    DEFAULT_TRAINING_SERIES
}

fn default_qualification_advance() -> usize {
    DEFAULT_QUALIFICATION_ADVANCE
}

fn default_final_round_size() -> usize {
    DEFAULT_FINAL_ROUND_SIZE
}

fn default_duet_cuts() -> [usize; 2] {
    DEFAULT_DUET_CUTS
}

/// Omitted counts fall back to the World Cup defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EventInput {
    Training {
        event: IndividualEventInput,
        #[serde(default = "default_training_series")]
        series: usize,
    },
    Trial {
        event: IndividualEventInput,
    },
    Qualification {
        event: IndividualEventInput,
        #[serde(default = "default_qualification_advance")]
        advance: usize,
    },
    Individual {
        event: IndividualEventInput,
        #[serde(default = "default_final_round_size")]
        final_round_size: usize,
    },
    Duet {
        event: TeamEventInput,
        #[serde(default = "default_duet_cuts")]
        cuts: [usize; 2],
    },
    MixedTeam {
        event: TeamEventInput,
    },
    TeamTrial {
        event: TeamEventInput,
    },
}

impl EventInput {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Training { .. } => EventKind::Training,
            Self::Trial { .. } => EventKind::Trial,
            Self::Qualification { .. } => EventKind::Qualification,
            Self::Individual { .. } => EventKind::Individual,
            Self::Duet { .. } => EventKind::Duet,
            Self::MixedTeam { .. } => EventKind::MixedTeam,
            Self::TeamTrial { .. } => EventKind::TeamTrial,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEventResult {
    pub series: Vec<SeriesResult>,
    pub lineups: Vec<TeamLineup>,
    pub team_totals: Vec<TeamStanding>,
    /// Team ids, winner first.
    pub final_order: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EventResult {
    Training {
        series: Vec<SeriesResult>,
    },
    Trial {
        series: Vec<SeriesResult>,
    },
    Qualification {
        series: Vec<SeriesResult>,
        qualified_bibs: Vec<Bib>,
        standings: Vec<Standing>,
    },
    Individual {
        series: Vec<SeriesResult>,
        final_order: Vec<Bib>,
        standings: Vec<Standing>,
    },
    Duet(TeamEventResult),
    MixedTeam(TeamEventResult),
    TeamTrial(TeamEventResult),
}

impl EventResult {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Training { .. } => EventKind::Training,
            Self::Trial { .. } => EventKind::Trial,
            Self::Qualification { .. } => EventKind::Qualification,
            Self::Individual { .. } => EventKind::Individual,
            Self::Duet(_) => EventKind::Duet,
            Self::MixedTeam(_) => EventKind::MixedTeam,
            Self::TeamTrial(_) => EventKind::TeamTrial,
        }
    }

    pub fn series(&self) -> &[SeriesResult] {
        match self {
            Self::Training { series }
            | Self::Trial { series }
            | Self::Qualification { series, .. }
            | Self::Individual { series, .. } => series,
            Self::Duet(r) | Self::MixedTeam(r) | Self::TeamTrial(r) => &r.series,
        }
    }

    /// Per-bib totals ranked by total then bib, for display. Training and
    /// trial results carry no ranking of their own, so one is derived here.
    pub fn standings(&self) -> Vec<Standing> {
        match self {
            Self::Qualification { standings, .. } | Self::Individual { standings, .. } => {
                standings.clone()
            }
            _ => {
                let mut s = standings::totals_by_bib(self.series());
                order_by_total_then_bib(&mut s);
                s
            }
        }
    }
}
