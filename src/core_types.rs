use crate::error::{SjResult, SkiJumpError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

pub type JumperId = String;
pub type Bib = u32;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JumperSkills {
    pub small_hill_skill: f64,       // 1..=10
    pub big_hill_skill: f64,         // 1..=10
    pub landing_tendency: f64,       // -3..=3
    pub form: f64,                   // 0..=10
    pub bonus_important_jumps: f64,  // -3..=3
}

impl Default for JumperSkills {
    fn default() -> Self {
        Self {
            small_hill_skill: 5.0,
            big_hill_skill: 5.0,
            landing_tendency: 0.0,
            form: 5.0,
            bonus_important_jumps: 0.0,
        }
    }
}

/// Immutable athlete value. Form changes produce a new `Jumper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jumper {
    pub id: JumperId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub skills: JumperSkills,
    #[serde(default)]
    pub is_women: bool,
}

impl Jumper {
    pub fn new(id: impl Into<String>, skills: JumperSkills) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            country: String::new(),
            skills,
            is_women: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>, country: impl Into<String>) -> Self {
        self.name = name.into();
        self.country = country.into();
        self
    }

    pub fn women(mut self) -> Self {
        self.is_women = true;
        self
    }

    /// Copy with a replaced form value, clamped to `[0, 10]`.
    pub fn with_form(&self, form: f64) -> Self {
        let mut next = self.clone();
        next.skills.form = form.clamp(0.0, 10.0);
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hill {
    pub k_point: f64,
    pub real_hs: f64,
    pub meters_by_gate: f64,
}

impl Hill {
    pub fn new(k_point: f64, real_hs: f64, meters_by_gate: f64) -> Self {
        Self {
            k_point,
            real_hs,
            meters_by_gate,
        }
    }
}

/// Static per-hill scoring constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HillScoringParams {
    pub points_per_gate: f64,
    pub points_per_meter: f64,
    pub wind_headwind_per_ms: f64,
    pub wind_tailwind_per_ms: f64,
}

impl HillScoringParams {
    /// FIS-style defaults derived from the K-point.
    pub fn for_hill(hill: &Hill) -> Self {
        let k = hill.k_point;
        let points_per_meter = if k >= 170.0 {
            1.2
        } else if k >= 100.0 {
            1.8
        } else if k >= 80.0 {
            2.0
        } else {
            2.2
        };
        let points_per_gate = (hill.meters_by_gate * points_per_meter * 10.0).round() / 10.0;
        let wind_headwind_per_ms = ((k - 36.0) * 0.108 * 10.0).round() / 10.0;
        Self {
            points_per_gate,
            points_per_meter,
            wind_headwind_per_ms,
            wind_tailwind_per_ms: (wind_headwind_per_ms * 1.21 * 10.0).round() / 10.0,
        }
    }
}

/// `average >= 0` is headwind, `< 0` tailwind (m/s).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    pub average: f64,
    pub instability: f64,
}

impl Wind {
    pub const LIMIT: f64 = 5.0;

    pub fn new(average: f64, instability: f64) -> Self {
        Self {
            average: average.clamp(-Self::LIMIT, Self::LIMIT),
            instability,
        }
    }

    pub fn is_headwind(&self) -> bool {
        self.average >= 0.0
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum RoundKind {
    Training,
    Trial,
    Qualification,
    Competition,
}

impl RoundKind {
    /// Sign of the important-jump bonus: competition and qualification gain
    /// exactly what training loses.
    pub fn importance(&self) -> f64 {
        match self {
            Self::Competition | Self::Qualification => 1.0,
            Self::Trial => 0.0,
            Self::Training => -1.0,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum Landing {
    Telemark,
    Parallel,
    TouchDown,
    Fall,
}

/// One jump's full input. Built per call, never stored.
#[derive(Debug, Clone, Copy)]
pub struct SimulationContext<'a> {
    pub jumper: &'a Jumper,
    pub hill: &'a Hill,
    pub gate: i32,
    pub wind: Wind,
    pub round_kind: RoundKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jump {
    pub distance: f64,
    pub landing: Landing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpResult {
    pub distance: f64,
    pub landing: Landing,
    pub points: f64,
    pub gate_delta: i32,
    pub wind: Wind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_notes: Option<[f64; 5]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesJump {
    pub bib: Bib,
    pub jumper: Jumper,
    pub result: JumpResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResult {
    pub start_gate: i32,
    pub jumps: Vec<SeriesJump>,
}

impl SeriesResult {
    pub fn new(start_gate: i32) -> Self {
        Self {
            start_gate,
            jumps: Vec::new(),
        }
    }

    pub fn jump_of(&self, bib: Bib) -> Option<&SeriesJump> {
        self.jumps.iter().find(|j| j.bib == bib)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartListEntry {
    pub bib: Bib,
    pub jumper: Jumper,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_in_team: Option<usize>,
}

impl StartListEntry {
    pub fn individual(bib: Bib, jumper: Jumper) -> Self {
        let country = (!jumper.country.is_empty()).then(|| jumper.country.clone());
        Self {
            bib,
            jumper,
            country,
            team_id: None,
            slot_in_team: None,
        }
    }
}

/// A nation's squad for duet / mixed-team / team-trial events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEntry {
    pub team_id: String,
    pub country: String,
    /// Nations Cup rank; `None` sorts after every ranked team.
    #[serde(default)]
    pub nations_cup_rank: Option<u32>,
    pub members: Vec<Jumper>,
}

/// A roster snapshot plus the externally supplied World Cup order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    pub jumpers: Vec<Jumper>,
    #[serde(default)]
    pub world_cup_ranks: HashMap<JumperId, u32>,
}

impl Roster {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SjResult<Self> {
        let content = fs::read_to_string(path)?;
        let roster: Roster = serde_json::from_str(&content)?;
        roster.validate()?;
        Ok(roster)
    }

    pub fn validate(&self) -> SjResult<()> {
        if self.jumpers.is_empty() {
            return Err(SkiJumpError::Validation("Roster has no jumpers".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for j in &self.jumpers {
            if !seen.insert(j.id.as_str()) {
                return Err(SkiJumpError::Validation(format!(
                    "Duplicate jumper id '{}'",
                    j.id
                )));
            }
        }
        Ok(())
    }

    pub fn rank_of(&self, id: &str) -> Option<u32> {
        self.world_cup_ranks.get(id).copied()
    }
}
