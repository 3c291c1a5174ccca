//! Aggregates - Cluster of domain objects treated as a single unit

pub mod creation_wizard;

pub use creation_wizard::{
    Advance, CreationWizard, SubmissionStatus, SubmissionTicket, WizardError, WizardState,
};
