//! Data Transfer Objects - For the backend boundary
//!
//! DTOs live in the application layer so the REST client can
//! serialize/deserialize without pulling wire names into the domain model.

pub mod character;
pub mod field_map;
pub mod roll;
pub mod search;
pub mod sheet;
pub mod xp;

pub use character::{
    CharacterPayload, CharacterRecord, CreatedCharacter, CustomAbilityDto, PayloadError, SheetState,
};
pub use field_map::{action_from_external, action_to_external};
pub use roll::{RollActionRequest, RollActionResponse};
pub use search::{SearchHit, SearchResponse, SearchResult};
pub use sheet::{
    ArmorExpenditureRequest, ArmorExpenditureResponse, HarmRequest, HarmResponse,
    IndulgeViceResponse, NewProgressClock, ProgressClockAdded, ProgressClockTick,
    ProgressClockTicked,
};
pub use xp::{AddXpRequest, AddXpResponse};
