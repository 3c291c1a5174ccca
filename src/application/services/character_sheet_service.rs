//! Character Sheet Service - Play-time management of one saved character
//!
//! Keeps the last record read from the backend. Actions whose effect the
//! backend does not echo back drop the cached record so the next read fetches
//! a fresh one.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::application::dto::{
    ArmorExpenditureRequest, ArmorExpenditureResponse, CharacterPayload, CharacterRecord,
    HarmRequest, HarmResponse, IndulgeViceResponse, NewProgressClock, PayloadError,
    ProgressClockAdded, ProgressClockTick, ProgressClockTicked,
};
use crate::application::ports::outbound::{ApiError, CharacterApiPort};
use crate::domain::entities::CharacterDraft;
use crate::domain::value_objects::{
    ArmorUse, CharacterId, ClockSegments, HarmLevel, OutOfRange,
};

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("No stress to recover")]
    NoStress,
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct CharacterSheetService {
    api: Arc<dyn CharacterApiPort>,
    id: CharacterId,
    record: RwLock<Option<CharacterRecord>>,
}

impl CharacterSheetService {
    pub fn new(api: Arc<dyn CharacterApiPort>, id: CharacterId) -> Self {
        Self {
            api,
            id,
            record: RwLock::new(None),
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    // ========================================================================
    // Record
    // ========================================================================

    /// The character as last read, fetched if nothing is cached
    pub async fn record(&self) -> Result<CharacterRecord, SheetError> {
        if let Some(record) = &*self.record.read().await {
            return Ok(record.clone());
        }
        self.refresh().await
    }

    #[instrument(skip(self), fields(character_id = %self.id))]
    pub async fn refresh(&self) -> Result<CharacterRecord, SheetError> {
        let record = self.api.get_character(self.id).await?;
        debug!(stress = record.sheet.stress, "Loaded character sheet");
        *self.record.write().await = Some(record.clone());
        Ok(record)
    }

    /// The saved character as an editable draft
    pub async fn draft(&self) -> Result<CharacterDraft, SheetError> {
        Ok(self.record().await?.into_draft()?)
    }

    #[instrument(skip(self, draft), fields(character_id = %self.id))]
    pub async fn save(&self, draft: &CharacterDraft) -> Result<CharacterRecord, SheetError> {
        let payload = CharacterPayload::from_draft(draft);
        let record = self.api.update_character(self.id, &payload).await?;
        info!("Saved character sheet");
        *self.record.write().await = Some(record.clone());
        Ok(record)
    }

    /// Delete the character; the service is spent afterwards
    #[instrument(skip(self), fields(character_id = %self.id))]
    pub async fn delete(self) -> Result<(), SheetError> {
        self.api.delete_character(self.id).await?;
        info!("Deleted character");
        Ok(())
    }

    // ========================================================================
    // Harm and stress
    // ========================================================================

    #[instrument(skip(self, description), fields(character_id = %self.id))]
    pub async fn take_harm(
        &self,
        level: HarmLevel,
        description: &str,
    ) -> Result<HarmResponse, SheetError> {
        let request = HarmRequest::physical(level, description.trim());
        let response = self.api.take_harm(self.id, &request).await?;
        info!(level = ?response.harm_level, "Harm taken");
        self.invalidate().await;
        Ok(response)
    }

    #[instrument(skip(self), fields(character_id = %self.id))]
    pub async fn heal_harm(&self, level: HarmLevel) -> Result<HarmResponse, SheetError> {
        let response = self
            .api
            .heal_harm(self.id, &HarmRequest::physical(level, ""))
            .await?;
        info!(level = ?response.harm_level, "Harm healed");
        self.invalidate().await;
        Ok(response)
    }

    /// Recover stress through the character's vice.
    ///
    /// A cached sheet with no stress is refused without asking the backend.
    #[instrument(skip(self), fields(character_id = %self.id))]
    pub async fn indulge_vice(&self) -> Result<IndulgeViceResponse, SheetError> {
        if matches!(&*self.record.read().await, Some(record) if record.sheet.stress == 0) {
            return Err(SheetError::NoStress);
        }
        let response = self.api.indulge_vice(self.id).await?;
        info!(
            recovered = response.stress_recovered,
            stress = response.current_stress,
            "Indulged vice"
        );
        if let Some(record) = self.record.write().await.as_mut() {
            record.sheet.stress = response.current_stress;
        }
        Ok(response)
    }

    #[instrument(skip(self), fields(character_id = %self.id))]
    pub async fn use_armor(
        &self,
        armor: ArmorUse,
        harm_reduced: u32,
    ) -> Result<ArmorExpenditureResponse, SheetError> {
        let max = u32::from(HarmLevel::Fatal.severity());
        if !(1..=max).contains(&harm_reduced) {
            return Err(OutOfRange {
                field: "harm reduced",
                value: i64::from(harm_reduced),
                min: 1,
                max: i64::from(max),
            }
            .into());
        }
        let request = ArmorExpenditureRequest {
            armor,
            harm_reduced,
        };
        let response = self.api.log_armor_expenditure(self.id, &request).await?;
        self.invalidate().await;
        Ok(response)
    }

    // ========================================================================
    // Progress clocks
    // ========================================================================

    #[instrument(skip(self, description), fields(character_id = %self.id))]
    pub async fn add_clock(
        &self,
        name: &str,
        segments: u8,
        description: &str,
    ) -> Result<ProgressClockAdded, SheetError> {
        let name = required_name(name)?;
        let clock = NewProgressClock {
            name,
            segments: ClockSegments::new(segments)?,
            description: description.trim().to_string(),
        };
        let added = self.api.add_progress_clock(self.id, &clock).await?;
        info!(clock = %added.clock.name, segments = added.clock.segments.value(), "Added progress clock");
        Ok(added)
    }

    #[instrument(skip(self), fields(character_id = %self.id))]
    pub async fn tick_clock(&self, name: &str, ticks: u32) -> Result<ProgressClockTicked, SheetError> {
        let tick = ProgressClockTick {
            name: required_name(name)?,
            ticks: ticks.max(1),
        };
        Ok(self.api.update_progress_clock(self.id, &tick).await?)
    }

    async fn invalidate(&self) {
        *self.record.write().await = None;
    }
}

fn required_name(name: &str) -> Result<String, SheetError> {
    let name = name.trim();
    if name.is_empty() {
        Err(SheetError::Required("Clock name"))
    } else {
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::MockCharacterApiPort;
    use serde_json::json;

    fn record(stress: u32) -> CharacterRecord {
        serde_json::from_value(json!({
            "id": 9,
            "true_name": "Jolyne Cujoh",
            "playbook": "STAND",
            "action_dots": {"attune": 1},
            "stress": stress,
            "background_note": null
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_record_is_cached_until_harm() {
        let mut api = MockCharacterApiPort::new();
        api.expect_get_character()
            .times(2)
            .returning(|_| Ok(record(1)));
        api.expect_take_harm()
            .times(1)
            .withf(|id, request| {
                *id == CharacterId::new(9)
                    && request.level == HarmLevel::Moderate
                    && request.description == "Shot"
            })
            .returning(|_, _| {
                Ok(HarmResponse {
                    message: "Took moderate physical harm".to_string(),
                    harm_level: HarmLevel::Moderate,
                    harm_type: "physical".to_string(),
                    description: Some("Shot".to_string()),
                })
            });
        let service = CharacterSheetService::new(Arc::new(api), CharacterId::new(9));

        service.record().await.unwrap();
        service.record().await.unwrap();
        service.take_harm(HarmLevel::Moderate, "  Shot ").await.unwrap();
        assert_eq!(service.draft().await.unwrap().true_name, "Jolyne Cujoh");
    }

    #[tokio::test]
    async fn test_indulge_vice_without_stress_is_refused() {
        let mut api = MockCharacterApiPort::new();
        api.expect_get_character().returning(|_| Ok(record(0)));
        api.expect_indulge_vice().never();
        let service = CharacterSheetService::new(Arc::new(api), CharacterId::new(9));

        service.refresh().await.unwrap();
        assert!(matches!(service.indulge_vice().await, Err(SheetError::NoStress)));
    }

    #[tokio::test]
    async fn test_indulge_vice_updates_cached_stress() {
        let mut api = MockCharacterApiPort::new();
        api.expect_get_character()
            .times(1)
            .returning(|_| Ok(record(3)));
        api.expect_indulge_vice().times(1).returning(|_| {
            Ok(IndulgeViceResponse {
                message: "Recovered 2 stress".to_string(),
                stress_recovered: 2,
                current_stress: 1,
            })
        });
        let service = CharacterSheetService::new(Arc::new(api), CharacterId::new(9));

        service.refresh().await.unwrap();
        service.indulge_vice().await.unwrap();
        assert_eq!(service.record().await.unwrap().sheet.stress, 1);
    }

    #[tokio::test]
    async fn test_clock_input_is_checked_before_sending() {
        let mut api = MockCharacterApiPort::new();
        api.expect_add_progress_clock()
            .times(1)
            .withf(|_, clock| clock.name == "Escape the prison" && clock.segments.value() == 8)
            .returning(|_, clock| {
                Ok(ProgressClockAdded {
                    message: format!("Added progress clock: {}", clock.name),
                    clock: NewProgressClock {
                        name: clock.name.clone(),
                        segments: clock.segments,
                        description: clock.description.clone(),
                    },
                })
            });
        let service = CharacterSheetService::new(Arc::new(api), CharacterId::new(9));

        assert!(matches!(
            service.add_clock("   ", 4, "").await,
            Err(SheetError::Required(_))
        ));
        assert!(matches!(
            service.add_clock("Escape the prison", 2, "").await,
            Err(SheetError::OutOfRange(_))
        ));
        let added = service.add_clock(" Escape the prison ", 8, "").await.unwrap();
        assert_eq!(added.clock.segments.value(), 8);
    }

    #[tokio::test]
    async fn test_armor_must_reduce_some_harm() {
        let service =
            CharacterSheetService::new(Arc::new(MockCharacterApiPort::new()), CharacterId::new(9));
        assert!(matches!(
            service.use_armor(ArmorUse::Regular, 0).await,
            Err(SheetError::OutOfRange(_))
        ));
    }
}
