//! Domain entities - The draft being built and the catalog it draws from

mod character_draft;
mod reference;
mod xp;

pub use character_draft::{CharacterDraft, CustomAbility, StandProfile, ViceSelection};
pub use reference::{Ability, Benefit, Detriment, Heritage, ReferenceData, Vice};
pub use xp::{XpTracks, ATTRIBUTE_TRACK_MAX};
