//! Dice resolution rules
//!
//! Turns a set of already-rolled faces into a selected result and an outcome.
//! Drawing the faces is left to the caller so the rules stay deterministic.

use crate::domain::value_objects::{Action, DiceRollOutcome, RollOutcome, RollSource, DIE_FACES};

/// Dice drawn for a zero-dice roll
pub const ZERO_DICE_POOL: usize = 2;

const PARTIAL_THRESHOLD: u8 = 4;

/// What the player asked to roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollRequest {
    pub action: Option<Action>,
    pub dice_count: u32,
    pub resistance_roll: bool,
    pub desperate_action: bool,
}

impl RollRequest {
    pub fn action(action: Action, dice_count: u32) -> Self {
        Self {
            action: Some(action),
            dice_count,
            resistance_roll: false,
            desperate_action: false,
        }
    }

    pub fn resistance(dice_count: u32) -> Self {
        Self {
            action: None,
            dice_count,
            resistance_roll: true,
            desperate_action: false,
        }
    }

    pub fn desperate(mut self) -> Self {
        self.desperate_action = true;
        self
    }

    pub fn is_zero_dice(&self) -> bool {
        self.dice_count == 0
    }

    /// How many dice must actually be thrown for this request
    pub fn pool_size(&self) -> usize {
        if self.is_zero_dice() {
            ZERO_DICE_POOL
        } else {
            self.dice_count as usize
        }
    }
}

fn classify(result: u8) -> RollOutcome {
    if result >= DIE_FACES {
        RollOutcome::Success
    } else if result >= PARTIAL_THRESHOLD {
        RollOutcome::PartialSuccess
    } else {
        RollOutcome::Failure
    }
}

/// Resolve a roll from its thrown faces.
///
/// `dice` must hold `request.pool_size()` faces in 1..=6. A zero-dice roll keeps
/// the lower of its two dice and can never crit; otherwise the highest die
/// counts and more than one six is a critical.
pub fn resolve_faces(request: &RollRequest, dice: Vec<u8>) -> DiceRollOutcome {
    let zero_dice = request.is_zero_dice();
    let sixes = dice.iter().filter(|&&d| d == DIE_FACES).count();

    let (result, outcome, special) = if zero_dice {
        let result = dice.iter().copied().min().unwrap_or(0);
        (result, classify(result), "0 dice: Roll 2d6, take lower".to_string())
    } else {
        let result = dice.iter().copied().max().unwrap_or(0);
        if sixes > 1 {
            (
                result,
                RollOutcome::CriticalSuccess,
                format!("Critical! ({sixes} sixes)"),
            )
        } else {
            (result, classify(result), String::new())
        }
    };

    // Left unclamped; a result never exceeds six so the cost is never negative.
    let stress_cost = request
        .resistance_roll
        .then(|| i32::from(DIE_FACES) - i32::from(result));

    DiceRollOutcome {
        action: request.action,
        dice,
        result,
        outcome,
        stress_cost,
        zero_dice,
        desperate_action: request.desperate_action,
        resistance_roll: request.resistance_roll,
        special,
        source: RollSource::Local,
    }
}
