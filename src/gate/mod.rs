pub mod policy;
pub mod selector;

pub use self::policy::{
    ConstantGatePolicy, GatePolicy, GateState, SafetyGatePolicy, ScriptedGatePolicy,
};
pub use self::selector::{select_starting_gate, GateSelection, StartingGateRequest};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Jury risk tolerance for the starting gate search.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum JuryBravery {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl JuryBravery {
    /// Jumpers per fifty allowed to land beyond HS.
    pub fn overshoots_per_fifty(&self) -> usize {
        match self {
            Self::VeryHigh => 5,
            Self::High => 3,
            Self::Medium => 1,
            Self::Low | Self::VeryLow => 0,
        }
    }

    pub fn overshoot_share(&self) -> f64 {
        self.overshoots_per_fifty() as f64 / 50.0
    }

    /// `floor(field_size * share)`, computed exactly.
    pub fn allowed_overshoots(&self, field_size: usize) -> usize {
        field_size * self.overshoots_per_fifty() / 50
    }

    /// Extra bars taken off after the search converges.
    pub fn post_adjustment(&self) -> i32 {
        match self {
            Self::VeryLow => -2,
            Self::Low => -1,
            _ => 0,
        }
    }
}
