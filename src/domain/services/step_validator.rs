//! Wizard steps and the per-step completeness rules
//!
//! Validation only looks at the slice of the draft a step edits. It never
//! mutates the draft, so asking twice always gives the same answer.

use crate::domain::entities::{CharacterDraft, ViceSelection};
use crate::domain::value_objects::{ACTION_DOTS_AT_CREATION, COIN_POINTS_AT_CREATION};

/// The creation wizard's screens, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WizardStep {
    Playbook = 1,
    Heritage = 2,
    Background = 3,
    ActionDots = 4,
    Stand = 5,
    Abilities = 6,
    Armor = 7,
    Relationships = 8,
    Vice = 9,
    Identity = 10,
    XpInfo = 11,
    Loadout = 12,
    /// Shown only after a successful submission
    Success = 13,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::Playbook;
    /// The final data-entry step; advancing from here submits
    pub const LAST_DATA_STEP: WizardStep = WizardStep::Loadout;
    /// Number of steps including the success screen
    pub const COUNT: u8 = 13;

    const ORDER: [WizardStep; 13] = [
        WizardStep::Playbook,
        WizardStep::Heritage,
        WizardStep::Background,
        WizardStep::ActionDots,
        WizardStep::Stand,
        WizardStep::Abilities,
        WizardStep::Armor,
        WizardStep::Relationships,
        WizardStep::Vice,
        WizardStep::Identity,
        WizardStep::XpInfo,
        WizardStep::Loadout,
        WizardStep::Success,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ORDER.get(usize::from(i)))
            .copied()
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(&self) -> Option<Self> {
        Self::from_index(self.index() - 1)
    }

    pub fn is_data_entry(&self) -> bool {
        *self != Self::Success
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Playbook => "Playbook",
            Self::Heritage => "Heritage",
            Self::Background => "Background",
            Self::ActionDots => "Action Dots",
            Self::Stand => "Stand",
            Self::Abilities => "Abilities",
            Self::Armor => "Armor",
            Self::Relationships => "Relationships",
            Self::Vice => "Vice",
            Self::Identity => "Identity",
            Self::XpInfo => "XP Triggers",
            Self::Loadout => "Loadout",
            Self::Success => "Character Created",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title(), self.index())
    }
}

/// One incomplete field, reported inline next to that field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldProblem {
    pub field: &'static str,
    pub message: String,
}

impl FieldProblem {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A step's required fields are incomplete
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("step {step} is incomplete: {}", summarize(.problems))]
pub struct ValidationError {
    pub step: WizardStep,
    pub problems: Vec<FieldProblem>,
}

fn summarize(problems: &[FieldProblem]) -> String {
    problems
        .iter()
        .map(|p| p.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check a step's portion of the draft, listing every incomplete field
pub fn validate_step(step: WizardStep, draft: &CharacterDraft) -> Result<(), ValidationError> {
    let mut problems = Vec::new();

    match step {
        WizardStep::Playbook => {
            if draft.playbook.is_none() {
                problems.push(FieldProblem::new("playbook", "Choose a playbook"));
            }
        }
        WizardStep::Heritage => {
            if draft.heritage_id.is_none() {
                problems.push(FieldProblem::new("heritage", "Choose a heritage"));
            }
            if is_blank(&draft.background_note) {
                problems.push(FieldProblem::new("background_note", "Describe your background"));
            }
        }
        WizardStep::Background => {
            if is_blank(&draft.background_note2) {
                problems.push(FieldProblem::new("background_note2", "Describe your background"));
            }
        }
        WizardStep::ActionDots => {
            let used = draft.action_dots.total();
            if used != ACTION_DOTS_AT_CREATION {
                problems.push(FieldProblem::new(
                    "action_dots",
                    format!("Distribute exactly {ACTION_DOTS_AT_CREATION} action dots ({used} used)"),
                ));
            }
        }
        WizardStep::Stand => {
            if draft.stand.stand_type.is_none() {
                problems.push(FieldProblem::new("stand_type", "Choose a stand type"));
            }
            if is_blank(&draft.stand.name) {
                problems.push(FieldProblem::new("stand_name", "Name your stand"));
            }
            let used = draft.coin_stats.total();
            if used != COIN_POINTS_AT_CREATION {
                problems.push(FieldProblem::new(
                    "coin_stats",
                    format!("Distribute exactly {COIN_POINTS_AT_CREATION} coin points ({used} used)"),
                ));
            }
        }
        WizardStep::Abilities => {
            if draft.stand_abilities.is_empty() {
                problems.push(FieldProblem::new("stand_abilities", "Add a stand ability"));
            } else if !draft.stand_abilities.iter().all(|a| a.is_complete()) {
                problems.push(FieldProblem::new(
                    "stand_abilities",
                    "Every stand ability needs a name and a description",
                ));
            }
            if draft.selected_standard_abilities.is_empty() {
                problems.push(FieldProblem::new(
                    "standard_abilities",
                    "Pick at least one standard ability",
                ));
            }
        }
        WizardStep::Armor => {
            if draft.armor_type.is_none() {
                problems.push(FieldProblem::new("armor_type", "Choose an armor type"));
            }
        }
        WizardStep::Relationships => {
            if is_blank(&draft.close_friend) {
                problems.push(FieldProblem::new("close_friend", "Name a close friend"));
            }
            if is_blank(&draft.rival) {
                problems.push(FieldProblem::new("rival", "Name a rival"));
            }
        }
        WizardStep::Vice => {
            match &draft.vice {
                None => problems.push(FieldProblem::new("vice", "Choose a vice")),
                Some(ViceSelection::Custom { name }) if is_blank(name) => {
                    problems.push(FieldProblem::new("custom_vice", "Name your custom vice"))
                }
                Some(_) => {}
            }
            if is_blank(&draft.vice_details) {
                problems.push(FieldProblem::new("vice_details", "Describe how you indulge"));
            }
        }
        WizardStep::Identity => {
            if is_blank(&draft.true_name) {
                problems.push(FieldProblem::new("true_name", "Enter a true name"));
            }
        }
        WizardStep::XpInfo | WizardStep::Loadout | WizardStep::Success => {}
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { step, problems })
    }
}

pub fn is_step_valid(step: WizardStep, draft: &CharacterDraft) -> bool {
    validate_step(step, draft).is_ok()
}

/// Validate by raw step number; numbers outside the wizard are never valid
pub fn is_step_index_valid(index: u8, draft: &CharacterDraft) -> bool {
    WizardStep::from_index(index).is_some_and(|step| is_step_valid(step, draft))
}
