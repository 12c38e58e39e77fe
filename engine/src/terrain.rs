use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Dice, EngineError};

/// Battlefield condition. A monster whose ideal terrain matches the active one
/// hits harder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Plains,
    Forest,
    Lake,
    Mountain,
    Desert,
    Cave,
}

impl Terrain {
    pub const ALL: [Terrain; 6] = [
        Terrain::Plains,
        Terrain::Forest,
        Terrain::Lake,
        Terrain::Mountain,
        Terrain::Desert,
        Terrain::Cave,
    ];

    pub fn random(dice: &mut Dice) -> Terrain {
        Self::ALL[dice.roll_range(0..Self::ALL.len() as u32) as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Terrain::Plains => "plains",
            Terrain::Forest => "forest",
            Terrain::Lake => "lake",
            Terrain::Mountain => "mountain",
            Terrain::Desert => "desert",
            Terrain::Cave => "cave",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Terrain {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| EngineError::UnknownTerrain(s.to_string()))
    }
}
