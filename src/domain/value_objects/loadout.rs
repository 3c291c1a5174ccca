//! Loadout - how much gear a character habitually carries

use serde::{Deserialize, Serialize};

use super::bounds::{check_range, OutOfRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Loadout(u8);

impl Loadout {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    pub fn new(load: u8) -> Result<Self, OutOfRange> {
        check_range("loadout", load.into(), Self::MIN.into(), Self::MAX.into())?;
        Ok(Self(load))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn category(&self) -> LoadCategory {
        match self.0 {
            1..=3 => LoadCategory::Light,
            4..=5 => LoadCategory::Normal,
            6 => LoadCategory::Heavy,
            _ => LoadCategory::Encumbered,
        }
    }
}

impl Default for Loadout {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for Loadout {
    type Error = OutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Loadout> for u8 {
    fn from(loadout: Loadout) -> u8 {
        loadout.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadCategory {
    Light,
    Normal,
    Heavy,
    Encumbered,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let categories: Vec<_> = (1..=9)
            .map(|l| Loadout::new(l).unwrap().category())
            .collect();
        assert_eq!(
            categories,
            vec![
                LoadCategory::Light,
                LoadCategory::Light,
                LoadCategory::Light,
                LoadCategory::Normal,
                LoadCategory::Normal,
                LoadCategory::Heavy,
                LoadCategory::Encumbered,
                LoadCategory::Encumbered,
                LoadCategory::Encumbered,
            ]
        );
    }

    #[test]
    fn test_out_of_range() {
        assert!(Loadout::new(0).is_err());
        assert!(Loadout::new(10).is_err());
        assert!(serde_json::from_str::<Loadout>("12").is_err());
        assert_eq!(Loadout::default().value(), 1);
    }
}
