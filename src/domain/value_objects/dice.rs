//! Dice roll results for action and resistance rolls

use serde::{Deserialize, Serialize};

use super::Action;

/// Faces on every die this game uses
pub const DIE_FACES: u8 = 6;

/// Classification of a roll's selected result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RollOutcome {
    Failure,
    PartialSuccess,
    Success,
    CriticalSuccess,
}

impl RollOutcome {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Failure => "Failure",
            Self::PartialSuccess => "Partial Success",
            Self::Success => "Success",
            Self::CriticalSuccess => "Critical Success",
        }
    }

    /// Parse the labels the backend sends, which vary in case and spacing
    pub fn parse(label: &str) -> Option<Self> {
        let normalized: String = label
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "failure" => Some(Self::Failure),
            "partialsuccess" => Some(Self::PartialSuccess),
            "success" => Some(Self::Success),
            "criticalsuccess" | "critical" => Some(Self::CriticalSuccess),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::CriticalSuccess)
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Where a roll was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollSource {
    Local,
    Backend,
}

/// The full result of one roll request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollOutcome {
    pub action: Option<Action>,
    /// Face values in roll order, each 1..=6
    pub dice: Vec<u8>,
    /// Lowest of two dice for a zero-dice roll, otherwise the highest die
    pub result: u8,
    pub outcome: RollOutcome,
    /// Only set for resistance rolls: `6 - result`
    pub stress_cost: Option<i32>,
    pub zero_dice: bool,
    pub desperate_action: bool,
    pub resistance_roll: bool,
    /// Short human-readable note such as a critical callout
    pub special: String,
    pub source: RollSource,
}

impl DiceRollOutcome {
    pub fn sixes(&self) -> usize {
        self.dice.iter().filter(|&&d| d == DIE_FACES).count()
    }

    pub fn is_local(&self) -> bool {
        self.source == RollSource::Local
    }
}
