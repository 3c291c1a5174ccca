//! Creation Wizard Aggregate - The step-by-step character creation session
//!
//! The wizard owns the draft, the current step and the submission status. All
//! edits go through it so the side effects that keep a draft consistent run
//! after every change: the custom ability list is resized to the number of
//! slots the coin stats allow, and choosing a heritage resets the benefit and
//! detriment picks to the ones that heritage requires.
//!
//! Submission is split in two halves so the aggregate stays synchronous:
//! `begin_submission` hands out a ticket carrying a snapshot of the draft, and
//! `complete_submission` records what the backend said. `abort_submission`
//! releases the slot when no answer will ever arrive.

use std::sync::Arc;

use crate::domain::entities::{CharacterDraft, CustomAbility, ReferenceData, ViceSelection};
use crate::domain::services::{
    grade_a_count, total_stand_abilities, validate_step, DerivedCharacterStats, ValidationError,
    WizardStep,
};
use crate::domain::value_objects::{
    AbilityMode, Action, CharacterId, CoinStat, HeritageId, OutOfRange,
};

/// Where the submission of this draft stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Succeeded(CharacterId),
    Failed(String),
}

/// Externally visible wizard state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    Editing(WizardStep),
    Submitting,
    Succeeded(CharacterId),
    /// The last submission failed; the wizard is back on the final data step
    Failed(String),
}

/// Result of a successful `advance`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Moved(WizardStep),
    /// The final step was completed; the caller must send this ticket
    Submit(SubmissionTicket),
}

/// A claim on the single in-flight submission slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub attempt: u32,
    pub draft: CharacterDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Incomplete(#[from] ValidationError),
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("no submission is in flight")]
    NoSubmissionInFlight,
    #[error("the character has already been created")]
    Completed,
    #[error("already on the first step")]
    AtFirstStep,
    #[error("submission is only possible from the {} step", WizardStep::LAST_DATA_STEP.title())]
    NotOnFinalStep,
    #[error("heritage {0} is not in the catalog")]
    UnknownHeritage(HeritageId),
}

#[derive(Debug, Clone)]
pub struct CreationWizard {
    draft: CharacterDraft,
    step: WizardStep,
    status: SubmissionStatus,
    reference: Arc<ReferenceData>,
    attempts: u32,
}

impl CreationWizard {
    /// Start a fresh wizard on the first step with an empty draft
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        let mut wizard = Self {
            draft: CharacterDraft::new(),
            step: WizardStep::FIRST,
            status: SubmissionStatus::Idle,
            reference,
            attempts: 0,
        };
        wizard.sync_stand_abilities();
        wizard
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn draft(&self) -> &CharacterDraft {
        &self.draft
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn state(&self) -> WizardState {
        match &self.status {
            SubmissionStatus::Submitting => WizardState::Submitting,
            SubmissionStatus::Succeeded(id) => WizardState::Succeeded(*id),
            SubmissionStatus::Failed(message) => WizardState::Failed(message.clone()),
            SubmissionStatus::Idle => WizardState::Editing(self.step),
        }
    }

    pub fn derived(&self) -> DerivedCharacterStats {
        DerivedCharacterStats::compute(&self.draft, &self.reference)
    }

    /// Check the current step without moving
    pub fn validate_current(&self) -> Result<(), ValidationError> {
        validate_step(self.step, &self.draft)
    }

    pub fn can_advance(&self) -> bool {
        self.status != SubmissionStatus::Submitting
            && self.step.is_data_entry()
            && self.validate_current().is_ok()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Move forward one step, or hand out a submission ticket from the last
    /// data-entry step.
    pub fn advance(&mut self) -> Result<Advance, WizardError> {
        self.ensure_editable()?;
        if self.step == WizardStep::LAST_DATA_STEP {
            return self.begin_submission().map(Advance::Submit);
        }
        self.validate_current()?;

        // Data-entry steps before the last one always have a successor.
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(Advance::Moved(self.step))
    }

    /// Step back one screen; never validated
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;
        let prev = self.step.prev().ok_or(WizardError::AtFirstStep)?;
        self.step = prev;
        if matches!(self.status, SubmissionStatus::Failed(_)) {
            self.status = SubmissionStatus::Idle;
        }
        Ok(prev)
    }

    // ========================================================================
    // Submission
    // ========================================================================

    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, WizardError> {
        match self.status {
            SubmissionStatus::Submitting => return Err(WizardError::SubmissionInFlight),
            SubmissionStatus::Succeeded(_) => return Err(WizardError::Completed),
            SubmissionStatus::Idle | SubmissionStatus::Failed(_) => {}
        }
        if self.step != WizardStep::LAST_DATA_STEP {
            return Err(WizardError::NotOnFinalStep);
        }
        self.validate_current()?;

        self.attempts += 1;
        self.status = SubmissionStatus::Submitting;
        Ok(SubmissionTicket {
            attempt: self.attempts,
            draft: self.draft.clone(),
        })
    }

    /// Record the backend's answer for the in-flight submission
    pub fn complete_submission(
        &mut self,
        result: Result<CharacterId, String>,
    ) -> Result<WizardState, WizardError> {
        if self.status != SubmissionStatus::Submitting {
            return Err(WizardError::NoSubmissionInFlight);
        }
        match result {
            Ok(id) => {
                self.status = SubmissionStatus::Succeeded(id);
                self.step = WizardStep::Success;
            }
            Err(message) => {
                self.status = SubmissionStatus::Failed(message);
                self.step = WizardStep::LAST_DATA_STEP;
            }
        }
        Ok(self.state())
    }

    /// Give up on submission `attempt` without a backend answer.
    ///
    /// The wizard goes back to editing the final data step. Returns `false`
    /// when that attempt is no longer the one in flight.
    pub fn abort_submission(&mut self, attempt: u32) -> bool {
        if self.status != SubmissionStatus::Submitting || self.attempts != attempt {
            return false;
        }
        self.status = SubmissionStatus::Idle;
        self.step = WizardStep::LAST_DATA_STEP;
        true
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Apply an arbitrary change to the draft, then re-run the draft's side
    /// effects.
    pub fn edit<T>(&mut self, change: impl FnOnce(&mut CharacterDraft) -> T) -> Result<T, WizardError> {
        self.ensure_editable()?;
        let previous_heritage = self.draft.heritage_id;
        let output = change(&mut self.draft);
        if self.draft.heritage_id != previous_heritage {
            self.apply_required_modifiers();
        }
        self.sync_stand_abilities();
        Ok(output)
    }

    pub fn select_heritage(&mut self, id: HeritageId) -> Result<(), WizardError> {
        if self.reference.heritage(id).is_none() {
            return Err(WizardError::UnknownHeritage(id));
        }
        self.edit(|draft| draft.heritage_id = Some(id))
    }

    pub fn set_action_dots(&mut self, action: Action, dots: u8) -> Result<(), WizardError> {
        self.edit(|draft| draft.action_dots.set(action, dots))?
            .map_err(WizardError::from)
    }

    pub fn set_coin_stat(&mut self, stat: CoinStat, points: u8) -> Result<(), WizardError> {
        self.edit(|draft| draft.coin_stats.set(stat, points))?
            .map_err(WizardError::from)
    }

    pub fn set_ability_mode(&mut self, mode: AbilityMode) -> Result<(), WizardError> {
        self.edit(|draft| draft.ability_mode = mode)
    }

    /// Fill one custom ability slot; indexes past the current slot count are ignored
    pub fn set_stand_ability(
        &mut self,
        index: usize,
        ability: CustomAbility,
    ) -> Result<bool, WizardError> {
        self.edit(|draft| match draft.stand_abilities.get_mut(index) {
            Some(slot) => {
                *slot = ability;
                true
            }
            None => false,
        })
    }

    pub fn set_vice(&mut self, vice: ViceSelection) -> Result<(), WizardError> {
        self.edit(|draft| draft.vice = Some(vice))
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        match self.status {
            SubmissionStatus::Submitting => Err(WizardError::SubmissionInFlight),
            SubmissionStatus::Succeeded(_) => Err(WizardError::Completed),
            SubmissionStatus::Idle | SubmissionStatus::Failed(_) => Ok(()),
        }
    }

    fn apply_required_modifiers(&mut self) {
        let heritage = self.draft.heritage_id.and_then(|id| self.reference.heritage(id));
        match heritage {
            Some(heritage) => {
                self.draft.selected_benefits = heritage.required_benefits();
                self.draft.selected_detriments = heritage.required_detriments();
            }
            None => {
                self.draft.selected_benefits.clear();
                self.draft.selected_detriments.clear();
            }
        }
    }

    /// Truncate from the end or pad with empty entries; existing entries keep
    /// their positions.
    fn sync_stand_abilities(&mut self) {
        let target = total_stand_abilities(
            self.draft.ability_mode,
            grade_a_count(&self.draft.coin_stats),
        );
        self.draft
            .stand_abilities
            .resize_with(target, CustomAbility::default);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Benefit, Detriment, Heritage};
    use crate::domain::value_objects::{
        AbilityId, ArmorType, BenefitId, DetrimentId, Playbook, StandType, ViceId,
    };

    fn reference() -> Arc<ReferenceData> {
        let vampire = Heritage::new(HeritageId::new(2), "Vampire", 8)
            .with_benefit(Benefit {
                id: BenefitId::new(20),
                name: "Bloodsucker".to_string(),
                hp_cost: 2,
                required: true,
                description: String::new(),
            })
            .with_benefit(Benefit {
                id: BenefitId::new(21),
                name: "Zombie Thralls".to_string(),
                hp_cost: 3,
                required: false,
                description: String::new(),
            })
            .with_detriment(Detriment {
                id: DetrimentId::new(30),
                name: "Sunlight".to_string(),
                hp_value: 4,
                required: true,
                description: String::new(),
            });
        Arc::new(ReferenceData::new(
            vec![Heritage::new(HeritageId::new(1), "Human", 0), vampire],
            vec![],
            vec![],
        ))
    }

    /// Walk a wizard all the way to the loadout step with a complete draft
    fn completed_wizard() -> CreationWizard {
        let mut wizard = CreationWizard::new(reference());
        wizard
            .edit(|d| {
                d.playbook = Some(Playbook::Stand);
                d.background_note = "Dock worker".to_string();
                d.background_note2 = "Owes the mob".to_string();
                d.stand.stand_type = Some(StandType::Fighting);
                d.stand.name = "Gold Experience".to_string();
                d.selected_standard_abilities = vec![AbilityId::new(1)];
                d.armor_type = Some(ArmorType::Light);
                d.close_friend = "Mista".to_string();
                d.rival = "Diavolo".to_string();
                d.vice = Some(ViceSelection::Catalog(ViceId::new(1)));
                d.vice_details = "Card games".to_string();
                d.true_name = "Giorno".to_string();
            })
            .unwrap();
        wizard.select_heritage(HeritageId::new(1)).unwrap();
        for action in [Action::Hunt, Action::Study, Action::Finesse] {
            wizard.set_action_dots(action, 2).unwrap();
        }
        wizard.set_action_dots(Action::Sway, 1).unwrap();
        for (stat, points) in [(CoinStat::Power, 3), (CoinStat::Speed, 3), (CoinStat::Precision, 4)] {
            wizard.set_coin_stat(stat, points).unwrap();
        }
        wizard
            .set_stand_ability(0, CustomAbility::new("Life Giver", "Turns objects into life"))
            .unwrap();

        while wizard.step() != WizardStep::LAST_DATA_STEP {
            match wizard.advance().unwrap() {
                Advance::Moved(_) => {}
                Advance::Submit(_) => panic!("submitted early"),
            }
        }
        wizard
    }

    #[test]
    fn test_new_wizard_starts_on_first_step() {
        let wizard = CreationWizard::new(reference());
        assert_eq!(wizard.state(), WizardState::Editing(WizardStep::Playbook));
        assert_eq!(wizard.draft().stand_abilities.len(), 1);
    }

    #[test]
    fn test_advance_blocked_by_incomplete_step() {
        let mut wizard = CreationWizard::new(reference());
        let err = wizard.advance().unwrap_err();
        assert!(matches!(err, WizardError::Incomplete(_)));
        assert_eq!(wizard.step(), WizardStep::Playbook);

        wizard.edit(|d| d.playbook = Some(Playbook::Hamon)).unwrap();
        assert_eq!(wizard.advance().unwrap(), Advance::Moved(WizardStep::Heritage));
    }

    #[test]
    fn test_retreat_never_validates() {
        let mut wizard = CreationWizard::new(reference());
        assert_eq!(wizard.retreat().unwrap_err(), WizardError::AtFirstStep);

        wizard.edit(|d| d.playbook = Some(Playbook::Spin)).unwrap();
        wizard.advance().unwrap();
        wizard.edit(|d| d.playbook = None).unwrap();
        assert_eq!(wizard.retreat().unwrap(), WizardStep::Playbook);
    }

    #[test]
    fn test_retreat_then_advance_round_trip() {
        let mut wizard = completed_wizard();
        let before = wizard.draft().clone();
        let step = wizard.step();

        wizard.retreat().unwrap();
        assert_eq!(wizard.advance().unwrap(), Advance::Moved(step));
        assert_eq!(wizard.draft(), &before);
    }

    #[test]
    fn test_stand_abilities_resize_with_grades() {
        let mut wizard = CreationWizard::new(reference());
        wizard
            .set_stand_ability(0, CustomAbility::new("First", "kept"))
            .unwrap();
        wizard.set_ability_mode(AbilityMode::ThreeSeparateUses).unwrap();
        assert_eq!(wizard.draft().stand_abilities.len(), 3);
        assert_eq!(wizard.draft().stand_abilities[0].name, "First");

        wizard.set_coin_stat(CoinStat::Power, 4).unwrap();
        assert_eq!(wizard.draft().stand_abilities.len(), 5);
        assert_eq!(wizard.draft().stand_abilities[4], CustomAbility::default());

        wizard.set_coin_stat(CoinStat::Power, 3).unwrap();
        wizard.set_ability_mode(AbilityMode::SingleWithThreeUses).unwrap();
        assert_eq!(wizard.draft().stand_abilities.len(), 1);
        assert_eq!(wizard.draft().stand_abilities[0].name, "First");
    }

    #[test]
    fn test_selecting_heritage_applies_required_modifiers() {
        let mut wizard = CreationWizard::new(reference());
        wizard
            .edit(|d| d.selected_benefits = vec![BenefitId::new(99)])
            .unwrap();
        wizard.select_heritage(HeritageId::new(2)).unwrap();
        assert_eq!(wizard.draft().selected_benefits, vec![BenefitId::new(20)]);
        assert_eq!(wizard.draft().selected_detriments, vec![DetrimentId::new(30)]);
        assert_eq!(wizard.derived().heritage_hp, 8 - 2 + 4);

        assert_eq!(
            wizard.select_heritage(HeritageId::new(7)).unwrap_err(),
            WizardError::UnknownHeritage(HeritageId::new(7))
        );
    }

    #[test]
    fn test_advance_from_last_step_submits() {
        let mut wizard = completed_wizard();
        let ticket = match wizard.advance().unwrap() {
            Advance::Submit(ticket) => ticket,
            other => panic!("expected a submission, got {other:?}"),
        };
        assert_eq!(ticket.attempt, 1);
        assert_eq!(&ticket.draft, wizard.draft());
        assert_eq!(wizard.state(), WizardState::Submitting);
    }

    #[test]
    fn test_double_submit_is_rejected() {
        let mut wizard = completed_wizard();
        wizard.begin_submission().unwrap();
        let snapshot = wizard.clone();

        assert_eq!(
            wizard.begin_submission().unwrap_err(),
            WizardError::SubmissionInFlight
        );
        assert_eq!(wizard.state(), snapshot.state());
        assert_eq!(wizard.attempts, snapshot.attempts);
        assert!(wizard.edit(|d| d.alias.push('x')).is_err());
    }

    #[test]
    fn test_failed_submission_allows_retry() {
        let mut wizard = completed_wizard();
        wizard.begin_submission().unwrap();
        let state = wizard
            .complete_submission(Err("Error creating character: boom".to_string()))
            .unwrap();
        assert_eq!(state, WizardState::Failed("Error creating character: boom".to_string()));
        assert_eq!(wizard.step(), WizardStep::Loadout);

        let ticket = wizard.begin_submission().unwrap();
        assert_eq!(ticket.attempt, 2);
        let state = wizard.complete_submission(Ok(CharacterId::new(12))).unwrap();
        assert_eq!(state, WizardState::Succeeded(CharacterId::new(12)));
        assert_eq!(wizard.step(), WizardStep::Success);
        assert_eq!(wizard.advance().unwrap_err(), WizardError::Completed);
    }

    #[test]
    fn test_abandoned_submission_reopens_editing() {
        let mut wizard = completed_wizard();
        let first = wizard.begin_submission().unwrap();
        assert!(wizard.abort_submission(first.attempt));
        assert_eq!(wizard.state(), WizardState::Editing(WizardStep::Loadout));
        assert!(wizard.edit(|d| d.alias = "JoJo".to_string()).is_ok());

        // A late abort for an older attempt must not cancel the current one.
        let second = wizard.begin_submission().unwrap();
        assert!(!wizard.abort_submission(first.attempt));
        assert_eq!(wizard.state(), WizardState::Submitting);
        assert!(wizard.abort_submission(second.attempt));
        assert!(!wizard.abort_submission(second.attempt));
    }

    #[test]
    fn test_submission_only_from_final_step() {
        let mut wizard = CreationWizard::new(reference());
        assert_eq!(
            wizard.begin_submission().unwrap_err(),
            WizardError::NotOnFinalStep
        );
        assert_eq!(
            wizard.complete_submission(Ok(CharacterId::new(1))).unwrap_err(),
            WizardError::NoSubmissionInFlight
        );
    }

    #[test]
    fn test_out_of_range_edit_leaves_draft_untouched() {
        let mut wizard = CreationWizard::new(reference());
        let err = wizard.set_action_dots(Action::Wreck, 3).unwrap_err();
        assert!(matches!(err, WizardError::OutOfRange(_)));
        assert_eq!(wizard.draft().action_dots.get(Action::Wreck), 0);
    }
}
