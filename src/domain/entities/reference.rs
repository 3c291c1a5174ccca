//! Reference catalog - heritages, vices and abilities served by the backend
//!
//! These records are read-only for the creation flow. They are fetched once when
//! a session starts; if the backend is unreachable a small built-in catalog is
//! used instead so the wizard never blocks on reference data.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AbilityId, BenefitId, DetrimentId, HeritageId, ViceId};

/// A heritage benefit, bought with heritage hit points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: BenefitId,
    pub name: String,
    pub hp_cost: i32,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// A heritage detriment, which grants heritage hit points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detriment {
    pub id: DetrimentId,
    pub name: String,
    pub hp_value: i32,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// A character-origin template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heritage {
    pub id: HeritageId,
    pub name: String,
    #[serde(default)]
    pub base_hp: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<Benefit>,
    #[serde(default)]
    pub detriments: Vec<Detriment>,
}

impl Heritage {
    pub fn new(id: HeritageId, name: impl Into<String>, base_hp: i32) -> Self {
        Self {
            id,
            name: name.into(),
            base_hp,
            description: String::new(),
            benefits: Vec::new(),
            detriments: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_benefit(mut self, benefit: Benefit) -> Self {
        self.benefits.push(benefit);
        self
    }

    pub fn with_detriment(mut self, detriment: Detriment) -> Self {
        self.detriments.push(detriment);
        self
    }

    pub fn benefit(&self, id: BenefitId) -> Option<&Benefit> {
        self.benefits.iter().find(|b| b.id == id)
    }

    pub fn detriment(&self, id: DetrimentId) -> Option<&Detriment> {
        self.detriments.iter().find(|d| d.id == id)
    }

    pub fn required_benefits(&self) -> Vec<BenefitId> {
        self.benefits.iter().filter(|b| b.required).map(|b| b.id).collect()
    }

    pub fn required_detriments(&self) -> Vec<DetrimentId> {
        self.detriments.iter().filter(|d| d.required).map(|d| d.id).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vice {
    pub id: ViceId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A standard (catalog) ability a character may pick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub ability_type: String,
}

/// Everything the wizard needs to look up while editing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    pub heritages: Vec<Heritage>,
    pub vices: Vec<Vice>,
    pub abilities: Vec<Ability>,
    /// Set when this catalog is the built-in fallback rather than backend data
    pub is_fallback: bool,
}

impl ReferenceData {
    pub fn new(heritages: Vec<Heritage>, vices: Vec<Vice>, abilities: Vec<Ability>) -> Self {
        Self {
            heritages,
            vices,
            abilities,
            is_fallback: false,
        }
    }

    /// Built-in catalog used when the backend cannot be reached
    pub fn fallback() -> Self {
        Self {
            heritages: vec![Heritage::new(HeritageId::new(1), "Human", 0)
                .with_description("Standard human heritage")],
            vices: vec![
                Vice {
                    id: ViceId::new(1),
                    name: "Gambling".to_string(),
                    description: "Risk-taking and chance".to_string(),
                },
                Vice {
                    id: ViceId::new(2),
                    name: "Violence".to_string(),
                    description: "Physical conflict and aggression".to_string(),
                },
            ],
            abilities: vec![
                Ability {
                    id: AbilityId::new(1),
                    name: "Iron Will".to_string(),
                    description: "Resist mental effects".to_string(),
                    ability_type: "standard".to_string(),
                },
                Ability {
                    id: AbilityId::new(2),
                    name: "Shadow".to_string(),
                    description: "Hide in darkness".to_string(),
                    ability_type: "standard".to_string(),
                },
            ],
            is_fallback: true,
        }
    }

    pub fn heritage(&self, id: HeritageId) -> Option<&Heritage> {
        self.heritages.iter().find(|h| h.id == id)
    }

    pub fn vice(&self, id: ViceId) -> Option<&Vice> {
        self.vices.iter().find(|v| v.id == id)
    }

    pub fn ability(&self, id: AbilityId) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.id == id)
    }
}
