//! Roll DTOs for the backend's roll-action endpoint

use serde::{Deserialize, Serialize};

use super::field_map::{action_from_external, action_to_external};
use crate::domain::services::RollRequest;
use crate::domain::value_objects::{DiceRollOutcome, RollOutcome, RollSource, DIE_FACES};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollActionRequest {
    /// Backend action key, absent for a plain resistance roll
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub dice_count: u32,
    pub is_resistance_roll: bool,
    pub is_desperate_action: bool,
}

impl From<&RollRequest> for RollActionRequest {
    fn from(request: &RollRequest) -> Self {
        Self {
            action: request
                .action
                .map(|action| action_to_external(action).to_string()),
            dice_count: request.dice_count,
            is_resistance_roll: request.resistance_roll,
            is_desperate_action: request.desperate_action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollActionResponse {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub dice: Vec<u8>,
    #[serde(alias = "highest", default)]
    pub highest_result: u8,
    pub outcome: String,
    #[serde(default)]
    pub special: Option<String>,
    #[serde(default)]
    pub stress_cost: Option<i32>,
    #[serde(default)]
    pub xp_gained: u32,
}

impl RollActionResponse {
    /// Convert into a domain outcome for the request that produced it.
    ///
    /// Returns `None` when the backend sends an outcome label or face value
    /// this crate does not understand.
    pub fn to_outcome(&self, request: &RollRequest) -> Option<DiceRollOutcome> {
        let outcome = RollOutcome::parse(&self.outcome)?;
        if self.dice.iter().any(|&d| d == 0 || d > DIE_FACES) || self.highest_result > DIE_FACES {
            return None;
        }

        let action = match &self.action {
            Some(key) => action_from_external(key).or(request.action),
            None => request.action,
        };
        let stress_cost = self.stress_cost.or_else(|| {
            request
                .resistance_roll
                .then(|| i32::from(DIE_FACES) - i32::from(self.highest_result))
        });

        Some(DiceRollOutcome {
            action,
            dice: self.dice.clone(),
            result: self.highest_result,
            outcome,
            stress_cost,
            zero_dice: request.is_zero_dice(),
            desperate_action: request.desperate_action,
            resistance_roll: request.resistance_roll,
            special: self.special.clone().unwrap_or_default(),
            source: RollSource::Backend,
        })
    }
}
