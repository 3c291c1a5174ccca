//! Actions, their parent attributes, and the dot allocation across them

use serde::{Deserialize, Serialize};

use super::bounds::{check_range, OutOfRange};

/// Maximum dots a single action may hold at creation
pub const MAX_DOTS_AT_CREATION: u8 = 2;
/// Dots a new character distributes across all actions
pub const ACTION_DOTS_AT_CREATION: u32 = 7;

/// One of the twelve skill-like actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Hunt,
    Study,
    Survey,
    Tinker,
    Finesse,
    Prowl,
    Skirmish,
    Wreck,
    Bizarre,
    Command,
    Consort,
    Sway,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::Hunt,
        Action::Study,
        Action::Survey,
        Action::Tinker,
        Action::Finesse,
        Action::Prowl,
        Action::Skirmish,
        Action::Wreck,
        Action::Bizarre,
        Action::Command,
        Action::Consort,
        Action::Sway,
    ];

    /// Internal (wizard-side) name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hunt => "hunt",
            Self::Study => "study",
            Self::Survey => "survey",
            Self::Tinker => "tinker",
            Self::Finesse => "finesse",
            Self::Prowl => "prowl",
            Self::Skirmish => "skirmish",
            Self::Wreck => "wreck",
            Self::Bizarre => "bizarre",
            Self::Command => "command",
            Self::Consort => "consort",
            Self::Sway => "sway",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(name))
    }

    /// The attribute whose XP track this action feeds
    pub fn attribute(&self) -> Attribute {
        match self {
            Self::Hunt | Self::Study | Self::Survey | Self::Tinker => Attribute::Insight,
            Self::Finesse | Self::Prowl | Self::Skirmish | Self::Wreck => Attribute::Prowess,
            Self::Bizarre | Self::Command | Self::Consort | Self::Sway => Attribute::Resolve,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Insight,
    Prowess,
    Resolve,
}

impl Attribute {
    pub fn actions(&self) -> [Action; 4] {
        match self {
            Self::Insight => [Action::Hunt, Action::Study, Action::Survey, Action::Tinker],
            Self::Prowess => [Action::Finesse, Action::Prowl, Action::Skirmish, Action::Wreck],
            Self::Resolve => [Action::Bizarre, Action::Command, Action::Consort, Action::Sway],
        }
    }
}

/// Dots allocated to each action, 0..=2 each at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionDots {
    dots: [u8; 12],
}

impl ActionDots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, action: Action) -> u8 {
        self.dots[action.index()]
    }

    pub fn set(&mut self, action: Action, dots: u8) -> Result<(), OutOfRange> {
        check_range("action dots", dots.into(), 0, MAX_DOTS_AT_CREATION.into())?;
        self.dots[action.index()] = dots;
        Ok(())
    }

    pub fn with(mut self, action: Action, dots: u8) -> Result<Self, OutOfRange> {
        self.set(action, dots)?;
        Ok(self)
    }

    pub fn total(&self) -> u32 {
        self.dots.iter().map(|&d| u32::from(d)).sum()
    }

    /// Number of actions in an attribute with at least one dot
    pub fn attribute_rating(&self, attribute: Attribute) -> u8 {
        attribute
            .actions()
            .iter()
            .filter(|action| self.get(**action) > 0)
            .count() as u8
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, u8)> + '_ {
        Action::ALL.into_iter().map(move |action| (action, self.get(action)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_rejects_three_dots() {
        let mut dots = ActionDots::new();
        assert!(dots.set(Action::Hunt, 2).is_ok());
        let err = dots.set(Action::Hunt, 3).unwrap_err();
        assert_eq!(err.max, 2);
        assert_eq!(dots.get(Action::Hunt), 2);
    }

    #[test]
    fn test_total_and_attribute_rating() {
        let dots = ActionDots::new()
            .with(Action::Hunt, 2)
            .and_then(|d| d.with(Action::Study, 1))
            .and_then(|d| d.with(Action::Sway, 2))
            .unwrap();
        assert_eq!(dots.total(), 5);
        assert_eq!(dots.attribute_rating(Attribute::Insight), 2);
        assert_eq!(dots.attribute_rating(Attribute::Prowess), 0);
        assert_eq!(dots.attribute_rating(Attribute::Resolve), 1);
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(Action::from_name("BIZARRE"), Some(Action::Bizarre));
        assert_eq!(Action::from_name("wreck"), Some(Action::Wreck));
        assert_eq!(Action::from_name("attune"), None);
    }

    #[test]
    fn test_every_action_has_an_attribute() {
        for attribute in [Attribute::Insight, Attribute::Prowess, Attribute::Resolve] {
            for action in attribute.actions() {
                assert_eq!(action.attribute(), attribute);
            }
        }
    }
}
