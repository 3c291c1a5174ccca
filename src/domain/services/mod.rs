//! Domain services - Pure rules over drafts and rolls

pub mod derived_stats;
pub mod dice_resolution;
pub mod step_validator;

pub use derived_stats::{
    grade_a_count, heritage_hp, total_stand_abilities, total_standard_abilities,
    DerivedCharacterStats,
};
pub use dice_resolution::{resolve_faces, RollRequest, ZERO_DICE_POOL};
pub use step_validator::{
    is_step_index_valid, is_step_valid, validate_step, FieldProblem, ValidationError, WizardStep,
};
