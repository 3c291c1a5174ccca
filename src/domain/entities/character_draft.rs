//! Character draft - the in-progress state of a character being created
//!
//! A draft starts empty when the wizard opens, is edited field by field as the
//! player moves through the steps, and is converted exactly once into the
//! backend payload when the final step is submitted.

use crate::domain::value_objects::{
    AbilityId, AbilityMode, ActionDots, ArmorType, BenefitId, CoinStats, DetrimentId, HeritageId,
    Loadout, Playbook, StandType, ViceId,
};

/// A player-authored stand ability
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomAbility {
    pub name: String,
    pub description: String,
}

impl CustomAbility {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// The chosen vice: a catalog entry or a player-named custom one
///
/// Modelled as an enum so a draft can never carry both a catalog id and a
/// custom name at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViceSelection {
    Catalog(ViceId),
    Custom { name: String },
}

impl ViceSelection {
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom { name: name.into() }
    }

    pub fn vice_id(&self) -> Option<ViceId> {
        match self {
            Self::Catalog(id) => Some(*id),
            Self::Custom { .. } => None,
        }
    }

    pub fn custom_name(&self) -> Option<&str> {
        match self {
            Self::Catalog(_) => None,
            Self::Custom { name } => Some(name),
        }
    }
}

/// Stand metadata entered on the stand step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandProfile {
    pub stand_type: Option<StandType>,
    pub name: String,
    pub form: String,
    pub conscious: bool,
}

impl Default for StandProfile {
    fn default() -> Self {
        Self {
            stand_type: None,
            name: String::new(),
            form: String::new(),
            conscious: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterDraft {
    pub playbook: Option<Playbook>,

    // Heritage and background
    pub heritage_id: Option<HeritageId>,
    pub background_note: String,
    pub background_note2: String,
    pub selected_benefits: Vec<BenefitId>,
    pub selected_detriments: Vec<DetrimentId>,
    pub bonus_hp_from_xp: i32,

    pub action_dots: ActionDots,

    // Stand
    pub stand: StandProfile,
    pub coin_stats: CoinStats,

    // Abilities
    pub ability_mode: AbilityMode,
    pub custom_ability_description: String,
    pub stand_abilities: Vec<CustomAbility>,
    pub selected_standard_abilities: Vec<AbilityId>,

    pub armor_type: Option<ArmorType>,

    // Relationships
    pub close_friend: String,
    pub rival: String,

    // Vice
    pub vice: Option<ViceSelection>,
    pub vice_details: String,

    // Identity
    pub true_name: String,
    pub alias: String,
    pub appearance: String,

    pub loadout: Loadout,
}

impl CharacterDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name to show on summaries: the alias when given, otherwise the true name
    pub fn display_name(&self) -> &str {
        if self.alias.trim().is_empty() {
            &self.true_name
        } else {
            &self.alias
        }
    }
}
