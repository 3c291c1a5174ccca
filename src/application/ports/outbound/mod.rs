//! Outbound ports - Interfaces that the application requires from external systems

mod api_error;
mod character_api_port;
mod random_port;
mod reference_data_port;
mod search_port;

pub use api_error::ApiError;
pub use character_api_port::CharacterApiPort;
pub use random_port::{FixedRandomPort, RandomPort};
pub use reference_data_port::ReferenceDataPort;
pub use search_port::SearchPort;

#[cfg(test)]
pub use character_api_port::MockCharacterApiPort;
#[cfg(test)]
pub use random_port::MockRandomPort;
#[cfg(test)]
pub use reference_data_port::MockReferenceDataPort;
#[cfg(test)]
pub use search_port::MockSearchPort;
