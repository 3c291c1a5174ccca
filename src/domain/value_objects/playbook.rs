//! Closed choice lists offered by the creation wizard

use serde::{Deserialize, Serialize};

/// The character's supernatural-power category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Playbook {
    Stand,
    Hamon,
    Spin,
}

impl Playbook {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Stand => "Stand",
            Self::Hamon => "Hamon",
            Self::Spin => "Spin",
        }
    }
}

/// Stand category chosen on the stand step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StandType {
    Colony,
    Toolbound,
    Phenomena,
    Automatic,
    Fighting,
}

impl StandType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Colony => "Colony Stand",
            Self::Toolbound => "Tool Bound",
            Self::Phenomena => "Phenomena",
            Self::Automatic => "Automatic",
            Self::Fighting => "Fighting Spirit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArmorType {
    Light,
    Medium,
    Heavy,
    Encumbered,
}

/// How the stand's custom abilities are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityMode {
    /// One custom ability with three internal uses
    #[default]
    #[serde(rename = "single_with_3_uses")]
    SingleWithThreeUses,
    /// Three (or more, with A grades) separate custom abilities
    ThreeSeparateUses,
}
