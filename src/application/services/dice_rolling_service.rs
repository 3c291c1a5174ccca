//! Dice Rolling Service - Local and backend-delegated rolls
//!
//! Rolls for a saved character go to the backend first. Any backend failure,
//! or a response this crate cannot read, falls back to the local engine so a
//! roll always produces an outcome.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::application::dto::{AddXpRequest, RollActionRequest};
use crate::application::ports::outbound::{CharacterApiPort, RandomPort};
use crate::domain::entities::XpTracks;
use crate::domain::services::{resolve_faces, RollRequest};
use crate::domain::value_objects::{CharacterId, DiceRollOutcome, DIE_FACES};

/// XP marked locally for each desperate action
const DESPERATE_XP: u32 = 1;

/// Local dice engine: draws faces from a `RandomPort` and resolves them
#[derive(Clone)]
pub struct DiceEngine {
    rng: Arc<dyn RandomPort>,
}

impl DiceEngine {
    pub fn new(rng: Arc<dyn RandomPort>) -> Self {
        Self { rng }
    }

    pub fn roll(&self, request: &RollRequest) -> DiceRollOutcome {
        let dice = (0..request.pool_size())
            .map(|_| {
                let face = self.rng.random_range(1, i32::from(DIE_FACES));
                face.clamp(1, i32::from(DIE_FACES)) as u8
            })
            .collect();
        resolve_faces(request, dice)
    }
}

#[derive(Debug, Default)]
struct RollLog {
    xp: XpTracks,
    last_roll: Option<DiceRollOutcome>,
}

pub struct DiceRollingService {
    engine: DiceEngine,
    api: Arc<dyn CharacterApiPort>,
    character_id: Option<CharacterId>,
    log: Mutex<RollLog>,
}

impl DiceRollingService {
    pub fn new(engine: DiceEngine, api: Arc<dyn CharacterApiPort>) -> Self {
        Self {
            engine,
            api,
            character_id: None,
            log: Mutex::new(RollLog::default()),
        }
    }

    /// Delegate rolls for this saved character to the backend
    pub fn for_character(mut self, id: CharacterId) -> Self {
        self.character_id = Some(id);
        self
    }

    pub async fn xp(&self) -> XpTracks {
        self.log.lock().await.xp
    }

    pub async fn last_roll(&self) -> Option<DiceRollOutcome> {
        self.log.lock().await.last_roll.clone()
    }

    #[instrument(skip(self), fields(character_id = ?self.character_id))]
    pub async fn roll(&self, request: RollRequest) -> DiceRollOutcome {
        let (outcome, xp_award) = match self.character_id {
            Some(id) => match self.roll_remote(id, &request).await {
                Some(remote) => remote,
                None => (self.engine.roll(&request), DESPERATE_XP),
            },
            None => (self.engine.roll(&request), DESPERATE_XP),
        };

        info!(
            action = ?outcome.action,
            dice = ?outcome.dice,
            result = outcome.result,
            outcome = %outcome.outcome,
            source = ?outcome.source,
            "Dice rolled"
        );

        let mut log = self.log.lock().await;
        if outcome.desperate_action && !outcome.resistance_roll {
            if let Some(action) = outcome.action {
                let marked = log.xp.mark(action.attribute(), xp_award);
                debug!(attribute = ?action.attribute(), marked, "Marked desperate XP");
            }
        }
        log.last_roll = Some(outcome.clone());
        outcome
    }

    /// Upgrade the last action roll to a desperate action and mark its XP.
    ///
    /// Returns the updated roll, or `None` when there is nothing to upgrade:
    /// no roll yet, a resistance roll, an already desperate roll, or an
    /// attribute track that is already full.
    #[instrument(skip(self))]
    pub async fn mark_as_desperate(&self) -> Option<DiceRollOutcome> {
        let (attribute, updated) = {
            let mut guard = self.log.lock().await;
            let log = &mut *guard;
            let last = log.last_roll.as_mut()?;
            if last.resistance_roll || last.desperate_action {
                return None;
            }
            let attribute = last.action?.attribute();
            if log.xp.mark(attribute, DESPERATE_XP) == 0 {
                debug!(?attribute, "Attribute track full, roll left as is");
                return None;
            }
            last.desperate_action = true;
            (attribute, last.clone())
        };

        if let Some(id) = self.character_id {
            let request = AddXpRequest::desperate_action(attribute, DESPERATE_XP);
            if let Err(e) = self.api.add_xp(id, &request).await {
                warn!(error = %e, character_id = %id, "Could not record desperate XP on backend");
            }
        }
        Some(updated)
    }

    async fn roll_remote(
        &self,
        id: CharacterId,
        request: &RollRequest,
    ) -> Option<(DiceRollOutcome, u32)> {
        let body = RollActionRequest::from(request);
        match self.api.roll_action(id, &body).await {
            Ok(response) => match response.to_outcome(request) {
                Some(outcome) => Some((outcome, response.xp_gained)),
                None => {
                    warn!(outcome = %response.outcome, "Unreadable backend roll, rolling locally");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "Backend roll failed, rolling locally");
                None
            }
        }
    }
}
