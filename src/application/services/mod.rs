//! Application services - Use case implementations
//!
//! Each service accepts its outbound ports as trait objects and keeps its
//! session state behind tokio locks.

pub mod character_creation_service;
pub mod character_sheet_service;
pub mod dice_rolling_service;
pub mod reference_data_service;
pub mod search_service;

pub use character_creation_service::{
    submission_error_message, CharacterCreationService, CreationTimings, NavigationSignal,
    SubmitError,
};
pub use character_sheet_service::{CharacterSheetService, SheetError};
pub use dice_rolling_service::{DiceEngine, DiceRollingService};
pub use reference_data_service::ReferenceDataService;
pub use search_service::SearchService;
