//! Character DTOs - The backend's view of a created character
//!
//! `CharacterPayload` is what the backend accepts on create/update; converting
//! a draft to a payload and back yields the same draft. `CharacterRecord` is
//! what the backend returns on read, nulls and nested details included.

use std::collections::BTreeMap;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};

use super::field_map::{action_from_external, action_to_external};
use crate::domain::entities::{
    CharacterDraft, CustomAbility, Heritage, StandProfile, Vice, ViceSelection, XpTracks,
};
use crate::domain::value_objects::{
    AbilityId, AbilityMode, ActionDots, ArmorType, BenefitId, CharacterId, CoinStat, CoinStats,
    DetrimentId, HarmLevel, HeritageId, Loadout, OutOfRange, Playbook, StandType, ViceId,
};

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Unknown action key: {0}")]
    UnknownAction(String),
    #[error("Unknown coin stat: {0}")]
    UnknownCoinStat(String),
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
}

/// Custom ability as the backend stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAbilityDto {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
}

impl From<&CustomAbility> for CustomAbilityDto {
    fn from(ability: &CustomAbility) -> Self {
        Self {
            name: ability.name.clone(),
            description: ability.description.clone(),
        }
    }
}

impl From<CustomAbilityDto> for CustomAbility {
    fn from(dto: CustomAbilityDto) -> Self {
        CustomAbility::new(dto.name, dto.description)
    }
}

fn default_true() -> bool {
    true
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playbook: Option<Playbook>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heritage: Option<HeritageId>,
    #[serde(default)]
    pub background_note: String,
    #[serde(default)]
    pub background_note2: String,
    /// Keyed by backend action name
    #[serde(default)]
    pub action_dots: BTreeMap<String, u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stand_type: Option<StandType>,
    #[serde(default)]
    pub stand_name: String,
    #[serde(default)]
    pub stand_form: String,
    #[serde(default = "default_true")]
    pub stand_conscious: bool,
    #[serde(default)]
    pub coin_stats: BTreeMap<String, u8>,
    #[serde(default)]
    pub custom_ability_type: AbilityMode,
    #[serde(default)]
    pub custom_ability_description: String,
    #[serde(default)]
    pub extra_custom_abilities: Vec<CustomAbilityDto>,
    #[serde(default)]
    pub standard_abilities: Vec<AbilityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor_type: Option<ArmorType>,
    #[serde(default)]
    pub vice_details: String,
    #[serde(default)]
    pub true_name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub appearance: Option<String>,
    #[serde(default)]
    pub loadout: Loadout,
    #[serde(default)]
    pub close_friend: String,
    #[serde(default)]
    pub rival: String,
    #[serde(default)]
    pub bonus_hp_from_xp: i32,
    #[serde(default)]
    pub selected_benefits: Vec<BenefitId>,
    #[serde(default)]
    pub selected_detriments: Vec<DetrimentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vice: Option<ViceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_vice: Option<String>,
}

impl CharacterPayload {
    pub fn from_draft(draft: &CharacterDraft) -> Self {
        let action_dots = draft
            .action_dots
            .iter()
            .map(|(action, dots)| (action_to_external(action).to_string(), dots))
            .collect();
        let coin_stats = draft
            .coin_stats
            .iter()
            .map(|(stat, points)| (stat.as_str().to_string(), points))
            .collect();

        let (vice, custom_vice) = match &draft.vice {
            Some(ViceSelection::Catalog(id)) => (Some(*id), None),
            Some(ViceSelection::Custom { name }) => (None, Some(name.clone())),
            None => (None, None),
        };

        Self {
            playbook: draft.playbook,
            heritage: draft.heritage_id,
            background_note: draft.background_note.clone(),
            background_note2: draft.background_note2.clone(),
            action_dots,
            stand_type: draft.stand.stand_type,
            stand_name: draft.stand.name.clone(),
            stand_form: draft.stand.form.clone(),
            stand_conscious: draft.stand.conscious,
            coin_stats,
            custom_ability_type: draft.ability_mode,
            custom_ability_description: draft.custom_ability_description.clone(),
            extra_custom_abilities: draft.stand_abilities.iter().map(Into::into).collect(),
            standard_abilities: draft.selected_standard_abilities.clone(),
            armor_type: draft.armor_type,
            vice_details: draft.vice_details.clone(),
            true_name: draft.true_name.clone(),
            alias: non_empty(&draft.alias),
            appearance: non_empty(&draft.appearance),
            loadout: draft.loadout,
            close_friend: draft.close_friend.clone(),
            rival: draft.rival.clone(),
            bonus_hp_from_xp: draft.bonus_hp_from_xp,
            selected_benefits: draft.selected_benefits.clone(),
            selected_detriments: draft.selected_detriments.clone(),
            vice,
            custom_vice,
        }
    }

    pub fn into_draft(self) -> Result<CharacterDraft, PayloadError> {
        let mut action_dots = ActionDots::new();
        for (key, dots) in &self.action_dots {
            let action =
                action_from_external(key).ok_or_else(|| PayloadError::UnknownAction(key.clone()))?;
            action_dots.set(action, *dots)?;
        }

        let mut coin_stats = CoinStats::new();
        for (key, points) in &self.coin_stats {
            let stat =
                CoinStat::from_name(key).ok_or_else(|| PayloadError::UnknownCoinStat(key.clone()))?;
            coin_stats.set(stat, *points)?;
        }

        let vice = match (self.custom_vice, self.vice) {
            (Some(name), _) => Some(ViceSelection::Custom { name }),
            (None, Some(id)) => Some(ViceSelection::Catalog(id)),
            (None, None) => None,
        };

        Ok(CharacterDraft {
            playbook: self.playbook,
            heritage_id: self.heritage,
            background_note: self.background_note,
            background_note2: self.background_note2,
            selected_benefits: self.selected_benefits,
            selected_detriments: self.selected_detriments,
            bonus_hp_from_xp: self.bonus_hp_from_xp,
            action_dots,
            stand: StandProfile {
                stand_type: self.stand_type,
                name: self.stand_name,
                form: self.stand_form,
                conscious: self.stand_conscious,
            },
            coin_stats,
            ability_mode: self.custom_ability_type,
            custom_ability_description: self.custom_ability_description,
            stand_abilities: self
                .extra_custom_abilities
                .into_iter()
                .map(Into::into)
                .collect(),
            selected_standard_abilities: self.standard_abilities,
            armor_type: self.armor_type,
            close_friend: self.close_friend,
            rival: self.rival,
            vice,
            vice_details: self.vice_details,
            true_name: self.true_name,
            alias: self.alias.unwrap_or_default(),
            appearance: self.appearance.unwrap_or_default(),
            loadout: self.loadout,
        })
    }
}

// ============================================================================
// Read side
// ============================================================================

/// `null` and missing both read as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Optional choice columns come back as `null`, `""` or a choice value
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(de::Error::custom),
    }
}

/// A stored character as the backend serializer returns it.
///
/// Nullable text columns arrive as `null`, heritage and vice carry nested
/// detail objects, and the sheet's play state rides along.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CharacterRecord {
    pub id: CharacterId,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub playbook: Option<Playbook>,
    #[serde(default)]
    pub heritage: Option<HeritageId>,
    #[serde(default)]
    pub heritage_details: Option<Heritage>,
    #[serde(default)]
    pub selected_benefits: Vec<BenefitId>,
    #[serde(default)]
    pub selected_detriments: Vec<DetrimentId>,
    #[serde(default)]
    pub bonus_hp_from_xp: i32,
    #[serde(default)]
    pub background_note: Option<String>,
    #[serde(default)]
    pub background_note2: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_dots: BTreeMap<String, u8>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub stand_type: Option<StandType>,
    #[serde(default)]
    pub stand_name: Option<String>,
    #[serde(default)]
    pub stand_form: Option<String>,
    #[serde(default = "default_true")]
    pub stand_conscious: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub coin_stats: BTreeMap<String, u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_ability_type: AbilityMode,
    #[serde(default)]
    pub custom_ability_description: Option<String>,
    #[serde(default)]
    pub extra_custom_abilities: Option<Vec<CustomAbilityDto>>,
    #[serde(default)]
    pub standard_abilities: Vec<AbilityId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub armor_type: Option<ArmorType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub close_friend: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rival: String,
    #[serde(default)]
    pub vice: Option<ViceId>,
    /// The serializer replaces the free-text column with the vice itself
    #[serde(default)]
    pub vice_details: Option<Vice>,
    #[serde(default)]
    pub true_name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub appearance: Option<String>,
    #[serde(default)]
    pub loadout: Loadout,
    #[serde(flatten)]
    pub sheet: SheetState,
}

/// Play state tracked on the character sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SheetState {
    #[serde(default)]
    pub stress: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trauma: Vec<String>,
    #[serde(default)]
    pub healing_clock_segments: u32,
    #[serde(default)]
    pub healing_clock_filled: u32,
    #[serde(default)]
    pub light_armor_used: bool,
    #[serde(default)]
    pub medium_armor_used: bool,
    #[serde(default)]
    pub heavy_armor_used: bool,
    #[serde(default)]
    pub harm_level1_used: bool,
    #[serde(default)]
    pub harm_level1_name: Option<String>,
    #[serde(default)]
    pub harm_level2_used: bool,
    #[serde(default)]
    pub harm_level2_name: Option<String>,
    #[serde(default)]
    pub harm_level3_used: bool,
    #[serde(default)]
    pub harm_level3_name: Option<String>,
    #[serde(default)]
    pub harm_level4_used: bool,
    #[serde(default)]
    pub harm_level4_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub xp_clocks: XpTracks,
}

impl SheetState {
    /// Names of the filled harm slots, most severe first
    pub fn harm(&self) -> Vec<(HarmLevel, String)> {
        [
            (HarmLevel::Fatal, self.harm_level4_used, &self.harm_level4_name),
            (HarmLevel::Severe, self.harm_level3_used, &self.harm_level3_name),
            (HarmLevel::Moderate, self.harm_level2_used, &self.harm_level2_name),
            (HarmLevel::Lesser, self.harm_level1_used, &self.harm_level1_name),
        ]
        .into_iter()
        .filter(|(_, used, _)| *used)
        .map(|(level, _, name)| (level, name.clone().unwrap_or_default()))
        .collect()
    }
}

impl CharacterRecord {
    /// Name of the character's vice, from the nested detail object
    pub fn vice_name(&self) -> Option<&str> {
        self.vice_details.as_ref().map(|vice| vice.name.as_str())
    }

    /// The write-side view of this record.
    ///
    /// A custom vice is stored as a new catalog vice, so it reads back as a
    /// catalog selection. The vice usage text is not returned by the backend.
    pub fn to_payload(&self) -> CharacterPayload {
        CharacterPayload {
            playbook: self.playbook,
            heritage: self.heritage,
            background_note: self.background_note.clone().unwrap_or_default(),
            background_note2: self.background_note2.clone().unwrap_or_default(),
            action_dots: self.action_dots.clone(),
            stand_type: self.stand_type,
            stand_name: self.stand_name.clone().unwrap_or_default(),
            stand_form: self.stand_form.clone().unwrap_or_default(),
            stand_conscious: self.stand_conscious,
            coin_stats: self.coin_stats.clone(),
            custom_ability_type: self.custom_ability_type,
            custom_ability_description: self.custom_ability_description.clone().unwrap_or_default(),
            extra_custom_abilities: self.extra_custom_abilities.clone().unwrap_or_default(),
            standard_abilities: self.standard_abilities.clone(),
            armor_type: self.armor_type,
            vice_details: String::new(),
            true_name: self.true_name.clone(),
            alias: self.alias.clone().filter(|alias| !alias.is_empty()),
            appearance: self.appearance.clone().filter(|text| !text.is_empty()),
            loadout: self.loadout,
            close_friend: self.close_friend.clone(),
            rival: self.rival.clone(),
            bonus_hp_from_xp: self.bonus_hp_from_xp,
            selected_benefits: self.selected_benefits.clone(),
            selected_detriments: self.selected_detriments.clone(),
            vice: self.vice,
            custom_vice: None,
        }
    }

    pub fn into_draft(self) -> Result<CharacterDraft, PayloadError> {
        self.to_payload().into_draft()
    }
}

/// Response body of a create call
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedCharacter {
    pub id: CharacterId,
}
