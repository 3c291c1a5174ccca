//! XP award DTOs

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Attribute;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddXpRequest {
    pub amount: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
    /// Attribute track the award belongs to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<Attribute>,
}

impl AddXpRequest {
    pub fn desperate_action(attribute: Attribute, amount: u32) -> Self {
        Self {
            amount,
            reason: "Desperate action".to_string(),
            track: Some(attribute),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddXpResponse {
    #[serde(default)]
    pub xp_gained: u32,
    #[serde(default)]
    pub total_xp: Option<u32>,
}
