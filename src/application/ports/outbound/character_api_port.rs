//! Character backend port - Persistence, rolls and sheet actions for created characters

use async_trait::async_trait;

use super::ApiError;
use crate::application::dto::{
    AddXpRequest, AddXpResponse, ArmorExpenditureRequest, ArmorExpenditureResponse,
    CharacterPayload, CharacterRecord, HarmRequest, HarmResponse, IndulgeViceResponse,
    NewProgressClock, ProgressClockAdded, ProgressClockTick, ProgressClockTicked,
    RollActionRequest, RollActionResponse,
};
use crate::domain::value_objects::CharacterId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterApiPort: Send + Sync {
    // ========================================================================
    // Records
    // ========================================================================

    /// Create a character and return its backend id
    async fn create_character(&self, payload: &CharacterPayload) -> Result<CharacterId, ApiError>;

    /// Characters visible to the current user
    async fn list_characters(&self) -> Result<Vec<CharacterRecord>, ApiError>;

    async fn get_character(&self, id: CharacterId) -> Result<CharacterRecord, ApiError>;

    /// Partially update a character with the given payload
    async fn update_character(
        &self,
        id: CharacterId,
        payload: &CharacterPayload,
    ) -> Result<CharacterRecord, ApiError>;

    async fn delete_character(&self, id: CharacterId) -> Result<(), ApiError>;

    // ========================================================================
    // Play
    // ========================================================================

    /// Have the backend roll for an existing character
    async fn roll_action(
        &self,
        id: CharacterId,
        request: &RollActionRequest,
    ) -> Result<RollActionResponse, ApiError>;

    async fn add_xp(&self, id: CharacterId, request: &AddXpRequest)
        -> Result<AddXpResponse, ApiError>;

    async fn take_harm(&self, id: CharacterId, request: &HarmRequest)
        -> Result<HarmResponse, ApiError>;

    async fn heal_harm(&self, id: CharacterId, request: &HarmRequest)
        -> Result<HarmResponse, ApiError>;

    /// Recover stress by indulging the character's vice
    async fn indulge_vice(&self, id: CharacterId) -> Result<IndulgeViceResponse, ApiError>;

    async fn log_armor_expenditure(
        &self,
        id: CharacterId,
        request: &ArmorExpenditureRequest,
    ) -> Result<ArmorExpenditureResponse, ApiError>;

    async fn add_progress_clock(
        &self,
        id: CharacterId,
        clock: &NewProgressClock,
    ) -> Result<ProgressClockAdded, ApiError>;

    async fn update_progress_clock(
        &self,
        id: CharacterId,
        tick: &ProgressClockTick,
    ) -> Result<ProgressClockTicked, ApiError>;
}
