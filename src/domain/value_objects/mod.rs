//! Value objects - Immutable objects defined by their attributes

mod actions;
mod bounds;
mod coin_stats;
mod dice;
mod harm;
mod ids;
mod loadout;
mod playbook;

pub use actions::{
    Action, ActionDots, Attribute, ACTION_DOTS_AT_CREATION, MAX_DOTS_AT_CREATION,
};
pub use bounds::OutOfRange;
pub use coin_stats::{CoinStat, CoinStats, Grade, COIN_POINTS_AT_CREATION};
pub use dice::{DiceRollOutcome, RollOutcome, RollSource, DIE_FACES};
pub use harm::{ArmorUse, ClockSegments, HarmLevel};
pub use ids::*;
pub use loadout::{LoadCategory, Loadout};
pub use playbook::{AbilityMode, ArmorType, Playbook, StandType};
