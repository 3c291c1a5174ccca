//! Experience tracks

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Attribute;

/// Attribute tracks fill to this many marks before they must be spent
pub const ATTRIBUTE_TRACK_MAX: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpTracks {
    #[serde(default)]
    pub insight: u32,
    #[serde(default)]
    pub prowess: u32,
    #[serde(default)]
    pub resolve: u32,
    #[serde(default)]
    pub heritage: u32,
    #[serde(default)]
    pub playbook: u32,
}

impl XpTracks {
    pub fn attribute(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Insight => self.insight,
            Attribute::Prowess => self.prowess,
            Attribute::Resolve => self.resolve,
        }
    }

    /// Mark XP on an attribute track, capped at the track maximum.
    ///
    /// Returns the number of marks actually added.
    pub fn mark(&mut self, attribute: Attribute, amount: u32) -> u32 {
        let track = match attribute {
            Attribute::Insight => &mut self.insight,
            Attribute::Prowess => &mut self.prowess,
            Attribute::Resolve => &mut self.resolve,
        };
        let before = *track;
        *track = before.saturating_add(amount).min(ATTRIBUTE_TRACK_MAX).max(before);
        *track - before
    }

    pub fn total(&self) -> u32 {
        self.insight + self.prowess + self.resolve + self.heritage + self.playbook
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_caps_at_five() {
        let mut xp = XpTracks::default();
        assert_eq!(xp.mark(Attribute::Prowess, 3), 3);
        assert_eq!(xp.mark(Attribute::Prowess, 3), 2);
        assert_eq!(xp.mark(Attribute::Prowess, 1), 0);
        assert_eq!(xp.attribute(Attribute::Prowess), 5);
        assert_eq!(xp.total(), 5);
    }
}
