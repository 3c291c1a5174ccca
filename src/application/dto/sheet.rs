//! Character sheet DTOs - harm, vice, armor and progress clock actions
//!
//! Each action posts a small body to `characters/{id}/<action>/` and gets a
//! confirmation back. The backend echoes what it applied, plus a `message`.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ArmorUse, ClockSegments, HarmLevel};

const PHYSICAL_HARM: &str = "physical";

fn physical() -> String {
    PHYSICAL_HARM.to_string()
}

/// Body of take-harm and heal-harm
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarmRequest {
    pub level: HarmLevel,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl HarmRequest {
    pub fn physical(level: HarmLevel, description: impl Into<String>) -> Self {
        Self {
            level,
            kind: physical(),
            description: description.into(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HarmResponse {
    #[serde(default)]
    pub message: String,
    pub harm_level: HarmLevel,
    #[serde(default = "physical")]
    pub harm_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndulgeViceResponse {
    #[serde(default)]
    pub message: String,
    pub stress_recovered: u32,
    pub current_stress: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArmorExpenditureRequest {
    #[serde(rename = "type")]
    pub armor: ArmorUse,
    pub harm_reduced: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArmorExpenditureResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub armor_type: ArmorUse,
    pub harm_reduced: u32,
}

/// A progress clock to add to the sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProgressClock {
    pub name: String,
    #[serde(default)]
    pub segments: ClockSegments,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgressClockAdded {
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub clock: NewProgressClock,
}

/// Fill `ticks` segments of the named clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressClockTick {
    pub name: String,
    pub ticks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgressClockTicked {
    #[serde(default)]
    pub message: String,
    pub name: String,
    pub ticks_added: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harm_request_shape() {
        let json = serde_json::to_value(HarmRequest::physical(HarmLevel::Severe, "")).unwrap();
        assert_eq!(json, serde_json::json!({"level": "severe", "type": "physical"}));

        let json =
            serde_json::to_value(HarmRequest::physical(HarmLevel::Lesser, "Cut").with_kind("mental"))
                .unwrap();
        assert_eq!(json["type"], "mental");
        assert_eq!(json["description"], "Cut");
    }

    #[test]
    fn test_clock_added_reads_echo() {
        let json = r#"{"message": "Added progress clock: Escape", "name": "Escape", "segments": 6, "description": ""}"#;
        let added: ProgressClockAdded = serde_json::from_str(json).unwrap();
        assert_eq!(added.clock.name, "Escape");
        assert_eq!(added.clock.segments.value(), 6);
    }

    #[test]
    fn test_armor_request_uses_type_key() {
        let request = ArmorExpenditureRequest {
            armor: ArmorUse::Special,
            harm_reduced: 2,
        };
        let json = serde_json::to_value(request).unwrap();
        assert_eq!(json, serde_json::json!({"type": "special", "harm_reduced": 2}));
    }
}
