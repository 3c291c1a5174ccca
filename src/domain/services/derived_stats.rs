//! Derived attribute calculator
//!
//! Pure functions from draft selections to the numbers the wizard shows and
//! enforces: heritage hit points and the ability slot counts driven by coin
//! stat grades. Nothing here is stored; callers recompute on every read.

use crate::domain::entities::{CharacterDraft, Heritage, ReferenceData};
use crate::domain::value_objects::{AbilityMode, BenefitId, CoinStats, DetrimentId, Grade};

/// Custom ability slots before A-grade bonuses
const BASE_STAND_ABILITIES: usize = 3;
/// Extra custom ability slots per A-grade coin stat
const STAND_ABILITIES_PER_A: usize = 2;
const BASE_STANDARD_ABILITIES: usize = 1;

/// Heritage hit points for the given selections.
///
/// Selected ids that are not part of this heritage's own benefit or detriment
/// lists are ignored, so stale selections left over from a previous heritage
/// never affect the total.
pub fn heritage_hp(
    heritage: &Heritage,
    selected_benefits: &[BenefitId],
    selected_detriments: &[DetrimentId],
    bonus_hp_from_xp: i32,
) -> i32 {
    let benefit_cost: i32 = selected_benefits
        .iter()
        .filter_map(|id| heritage.benefit(*id))
        .map(|b| b.hp_cost)
        .sum();
    let detriment_gain: i32 = selected_detriments
        .iter()
        .filter_map(|id| heritage.detriment(*id))
        .map(|d| d.hp_value)
        .sum();

    heritage.base_hp + bonus_hp_from_xp - benefit_cost + detriment_gain
}

/// Number of coin stats at grade A
pub fn grade_a_count(coin_stats: &CoinStats) -> usize {
    coin_stats
        .iter()
        .filter(|(_, points)| *points == Grade::A.points())
        .count()
}

pub fn total_stand_abilities(mode: AbilityMode, grade_a_count: usize) -> usize {
    match mode {
        AbilityMode::SingleWithThreeUses => 1,
        AbilityMode::ThreeSeparateUses => BASE_STAND_ABILITIES + STAND_ABILITIES_PER_A * grade_a_count,
    }
}

pub fn total_standard_abilities(grade_a_count: usize) -> usize {
    BASE_STANDARD_ABILITIES + grade_a_count
}

/// Snapshot of every derived value for one draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedCharacterStats {
    /// Zero until a heritage present in the catalog is selected
    pub heritage_hp: i32,
    pub grade_a_count: usize,
    pub total_stand_abilities: usize,
    pub total_standard_abilities: usize,
    pub action_dots_used: u32,
    pub coin_points_used: u32,
}

impl DerivedCharacterStats {
    pub fn compute(draft: &CharacterDraft, reference: &ReferenceData) -> Self {
        let heritage_hp = draft
            .heritage_id
            .and_then(|id| reference.heritage(id))
            .map(|heritage| {
                heritage_hp(
                    heritage,
                    &draft.selected_benefits,
                    &draft.selected_detriments,
                    draft.bonus_hp_from_xp,
                )
            })
            .unwrap_or(0);
        let grade_a = grade_a_count(&draft.coin_stats);

        Self {
            heritage_hp,
            grade_a_count: grade_a,
            total_stand_abilities: total_stand_abilities(draft.ability_mode, grade_a),
            total_standard_abilities: total_standard_abilities(grade_a),
            action_dots_used: draft.action_dots.total(),
            coin_points_used: draft.coin_stats.total(),
        }
    }
}
