//! Character Creation Service - Drives one wizard session against the backend
//!
//! Wraps a `CreationWizard` and performs the only asynchronous step of the
//! flow: sending the finished draft to the character backend. The wizard is
//! locked only around state changes, never across the network call, so reads
//! stay responsive while a submission is in flight and a second submission is
//! rejected by the wizard itself.
//!
//! After a successful submission a delayed navigation signal is scheduled;
//! after an authentication failure a delayed signal to log in again is
//! scheduled. Both are canceled by `shutdown` or when the service is dropped.
//!
//! A submission whose future is dropped before the backend answers (timeout,
//! `select!`, a torn-down caller) releases the wizard again, so the user can
//! edit and retry.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::application::dto::CharacterPayload;
use crate::application::ports::outbound::{ApiError, CharacterApiPort};
use crate::domain::aggregates::{
    Advance, CreationWizard, SubmissionTicket, WizardError, WizardState,
};
use crate::domain::entities::{CharacterDraft, ReferenceData};
use crate::domain::services::{DerivedCharacterStats, ValidationError, WizardStep};
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::scheduler::ScheduledTask;

pub const AUTHENTICATION_MESSAGE: &str = "Authentication error. Please log in again.";
pub const NO_RESPONSE_MESSAGE: &str = "No response from server. Please check your connection.";

/// Where the consumer should go next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationSignal {
    CharacterSheet(CharacterId),
    Login,
}

/// Delays before navigation signals fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreationTimings {
    pub redirect_delay: Duration,
    pub reauth_redirect_delay: Duration,
}

impl Default for CreationTimings {
    fn default() -> Self {
        Self {
            redirect_delay: Duration::from_millis(5000),
            reauth_redirect_delay: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("A submission is already in flight")]
    AlreadySubmitting,
    #[error("Submission is only possible from the final step")]
    NotOnFinalStep,
    #[error("The character has already been created")]
    AlreadyCreated,
    #[error("{0}")]
    Authentication(String),
    #[error("{0}")]
    Submission(String),
    #[error(transparent)]
    Wizard(WizardError),
}

impl From<WizardError> for SubmitError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Incomplete(validation) => Self::Validation(validation),
            WizardError::SubmissionInFlight => Self::AlreadySubmitting,
            WizardError::NotOnFinalStep => Self::NotOnFinalStep,
            WizardError::Completed => Self::AlreadyCreated,
            other => Self::Wizard(other),
        }
    }
}

/// User-facing message for a failed create call
pub fn submission_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Authentication(_) => AUTHENTICATION_MESSAGE.to_string(),
        ApiError::Unavailable(_) => NO_RESPONSE_MESSAGE.to_string(),
        ApiError::Rejected { message, .. } => format!("Error creating character: {message}"),
        ApiError::Decode(message) => format!("Error creating character: {message}"),
    }
}

/// RAII guard that releases the submission slot if `send` never finishes
struct InFlightSubmission {
    wizard: Arc<Mutex<CreationWizard>>,
    attempt: Option<u32>,
}

impl InFlightSubmission {
    fn new(wizard: Arc<Mutex<CreationWizard>>, attempt: u32) -> Self {
        Self {
            wizard,
            attempt: Some(attempt),
        }
    }

    /// The backend answered; nothing to release
    fn settle(&mut self) {
        self.attempt = None;
    }
}

impl Drop for InFlightSubmission {
    fn drop(&mut self) {
        let Some(attempt) = self.attempt.take() else {
            return;
        };
        warn!(attempt, "Submission dropped before the backend answered");
        match self.wizard.try_lock() {
            Ok(mut wizard) => {
                wizard.abort_submission(attempt);
            }
            Err(_) => {
                // Someone else holds the wizard; release it once they are done.
                let wizard = self.wizard.clone();
                if let Ok(handle) = tokio::runtime::Handle::try_current() {
                    handle.spawn(async move {
                        wizard.lock().await.abort_submission(attempt);
                    });
                }
            }
        }
    }
}

pub struct CharacterCreationService {
    /// Correlates the log lines of one session
    session_id: Uuid,
    api: Arc<dyn CharacterApiPort>,
    wizard: Arc<Mutex<CreationWizard>>,
    timings: CreationTimings,
    navigation: mpsc::UnboundedSender<NavigationSignal>,
    pending_navigation: Mutex<Option<ScheduledTask>>,
}

impl CharacterCreationService {
    /// Start a fresh session over the given catalog.
    ///
    /// Navigation signals arrive on the returned receiver.
    pub fn new(
        api: Arc<dyn CharacterApiPort>,
        reference: Arc<ReferenceData>,
        timings: CreationTimings,
    ) -> (Self, mpsc::UnboundedReceiver<NavigationSignal>) {
        Self::with_wizard(api, CreationWizard::new(reference), timings)
    }

    pub fn with_wizard(
        api: Arc<dyn CharacterApiPort>,
        wizard: CreationWizard,
        timings: CreationTimings,
    ) -> (Self, mpsc::UnboundedReceiver<NavigationSignal>) {
        let (navigation, receiver) = mpsc::unbounded_channel();
        let service = Self {
            session_id: Uuid::new_v4(),
            api,
            wizard: Arc::new(Mutex::new(wizard)),
            timings,
            navigation,
            pending_navigation: Mutex::new(None),
        };
        (service, receiver)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub async fn state(&self) -> WizardState {
        self.wizard.lock().await.state()
    }

    pub async fn step(&self) -> WizardStep {
        self.wizard.lock().await.step()
    }

    pub async fn draft(&self) -> CharacterDraft {
        self.wizard.lock().await.draft().clone()
    }

    pub async fn derived(&self) -> DerivedCharacterStats {
        self.wizard.lock().await.derived()
    }

    pub async fn can_advance(&self) -> bool {
        self.wizard.lock().await.can_advance()
    }

    // ========================================================================
    // Edits and navigation
    // ========================================================================

    /// Run a change against the wizard
    pub async fn update<T>(
        &self,
        change: impl FnOnce(&mut CreationWizard) -> Result<T, WizardError>,
    ) -> Result<T, WizardError> {
        let mut wizard = self.wizard.lock().await;
        change(&mut wizard)
    }

    pub async fn retreat(&self) -> Result<WizardStep, WizardError> {
        self.wizard.lock().await.retreat()
    }

    /// Move forward one step; from the final data step this submits.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn advance(&self) -> Result<WizardState, SubmitError> {
        let advance = self.wizard.lock().await.advance()?;
        match advance {
            Advance::Moved(step) => {
                debug!(step = %step, "Advanced wizard");
                Ok(WizardState::Editing(step))
            }
            Advance::Submit(ticket) => {
                let id = self.send(ticket).await?;
                Ok(WizardState::Succeeded(id))
            }
        }
    }

    /// Submit the draft from the final data step
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn submit(&self) -> Result<CharacterId, SubmitError> {
        let ticket = self.wizard.lock().await.begin_submission()?;
        self.send(ticket).await
    }

    /// Cancel any scheduled navigation
    pub async fn shutdown(&self) {
        if let Some(mut task) = self.pending_navigation.lock().await.take() {
            task.cancel();
            debug!("Canceled pending navigation");
        }
    }

    async fn send(&self, ticket: SubmissionTicket) -> Result<CharacterId, SubmitError> {
        let payload = CharacterPayload::from_draft(&ticket.draft);
        info!(
            attempt = ticket.attempt,
            true_name = %ticket.draft.true_name,
            "Submitting character"
        );

        let mut in_flight = InFlightSubmission::new(self.wizard.clone(), ticket.attempt);
        let result = self.api.create_character(&payload).await;

        let mut wizard = self.wizard.lock().await;
        in_flight.settle();
        match result {
            Ok(id) => {
                wizard
                    .complete_submission(Ok(id))
                    .map_err(SubmitError::from)?;
                drop(wizard);
                info!(character_id = %id, "Character created");
                self.schedule_navigation(
                    NavigationSignal::CharacterSheet(id),
                    self.timings.redirect_delay,
                )
                .await;
                Ok(id)
            }
            Err(err) => {
                let message = submission_error_message(&err);
                wizard
                    .complete_submission(Err(message.clone()))
                    .map_err(SubmitError::from)?;
                drop(wizard);

                if err.is_authentication() {
                    warn!(error = %err, "Backend rejected credentials");
                    self.schedule_navigation(
                        NavigationSignal::Login,
                        self.timings.reauth_redirect_delay,
                    )
                    .await;
                    Err(SubmitError::Authentication(message))
                } else {
                    error!(error = %err, "Character submission failed");
                    Err(SubmitError::Submission(message))
                }
            }
        }
    }

    async fn schedule_navigation(&self, signal: NavigationSignal, delay: Duration) {
        let sender = self.navigation.clone();
        debug!(?signal, delay_ms = delay.as_millis() as u64, "Scheduling navigation");
        let task = ScheduledTask::after(delay, async move {
            // The receiver may already be gone; nothing left to navigate then.
            let _ = sender.send(signal);
        });
        *self.pending_navigation.lock().await = Some(task);
    }
}
