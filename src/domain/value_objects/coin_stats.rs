//! Coin stats - the six letter-graded attributes of a stand

use serde::{Deserialize, Serialize};

use super::bounds::{check_range, OutOfRange};

/// Points a new stand distributes across its coin stats
pub const COIN_POINTS_AT_CREATION: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinStat {
    Power,
    Speed,
    Range,
    Durability,
    Precision,
    Development,
}

impl CoinStat {
    pub const ALL: [CoinStat; 6] = [
        CoinStat::Power,
        CoinStat::Speed,
        CoinStat::Range,
        CoinStat::Durability,
        CoinStat::Precision,
        CoinStat::Development,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Speed => "speed",
            Self::Range => "range",
            Self::Durability => "durability",
            Self::Precision => "precision",
            Self::Development => "development",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|stat| stat.as_str().eq_ignore_ascii_case(name))
    }
}

/// Letter grade, F (0 points) through A (4 points)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
}

impl Grade {
    pub fn from_points(points: u8) -> Result<Self, OutOfRange> {
        match points {
            0 => Ok(Self::F),
            1 => Ok(Self::D),
            2 => Ok(Self::C),
            3 => Ok(Self::B),
            4 => Ok(Self::A),
            other => Err(OutOfRange {
                field: "coin stat points",
                value: other.into(),
                min: 0,
                max: 4,
            }),
        }
    }

    pub fn points(&self) -> u8 {
        *self as u8
    }

    pub fn letter(&self) -> char {
        match self {
            Self::F => 'F',
            Self::D => 'D',
            Self::C => 'C',
            Self::B => 'B',
            Self::A => 'A',
        }
    }
}

/// Grade points per coin stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoinStats {
    points: [u8; 6],
}

impl CoinStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: CoinStat) -> u8 {
        self.points[stat as usize]
    }

    pub fn grade(&self, stat: CoinStat) -> Grade {
        // Setters keep every slot within 0..=4.
        Grade::from_points(self.get(stat)).unwrap_or(Grade::F)
    }

    pub fn set(&mut self, stat: CoinStat, points: u8) -> Result<(), OutOfRange> {
        check_range("coin stat points", points.into(), 0, Grade::A.points().into())?;
        self.points[stat as usize] = points;
        Ok(())
    }

    pub fn with(mut self, stat: CoinStat, points: u8) -> Result<Self, OutOfRange> {
        self.set(stat, points)?;
        Ok(self)
    }

    pub fn set_grade(&mut self, stat: CoinStat, grade: Grade) {
        self.points[stat as usize] = grade.points();
    }

    pub fn total(&self) -> u32 {
        self.points.iter().map(|&p| u32::from(p)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CoinStat, u8)> + '_ {
        CoinStat::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }
}
