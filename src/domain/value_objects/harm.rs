//! Harm, armor and progress clocks on the character sheet

use serde::{Deserialize, Serialize};

use super::bounds::{check_range, OutOfRange};

/// Harm severity, from a bruise to a fatal wound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmLevel {
    Lesser,
    Moderate,
    Severe,
    Fatal,
}

impl HarmLevel {
    /// Sheet row holding harm of this level (1-4)
    pub fn severity(&self) -> u8 {
        match self {
            Self::Lesser => 1,
            Self::Moderate => 2,
            Self::Severe => 3,
            Self::Fatal => 4,
        }
    }
}

/// Which armor box was checked to reduce harm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorUse {
    #[default]
    Regular,
    Special,
    Resistance,
}

/// Number of segments on a new progress clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ClockSegments(u8);

impl ClockSegments {
    pub const MIN: u8 = 4;
    pub const MAX: u8 = 12;

    pub fn new(segments: u8) -> Result<Self, OutOfRange> {
        check_range("clock segments", segments.into(), Self::MIN.into(), Self::MAX.into())?;
        Ok(Self(segments))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for ClockSegments {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for ClockSegments {
    type Error = OutOfRange;

    fn try_from(segments: u8) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl From<ClockSegments> for u8 {
    fn from(segments: ClockSegments) -> Self {
        segments.0
    }
}
