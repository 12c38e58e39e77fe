use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("roster '{name}' already holds {max} monsters")]
    RosterFull { name: String, max: usize },
    #[error("level must be at least 1 (got {0})")]
    InvalidLevel(u32),
    #[error("level {level} is above the cap of {max}")]
    LevelTooHigh { level: u32, max: u32 },
    #[error("unknown terrain '{0}'")]
    UnknownTerrain(String),
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),
    #[error("unknown party '{0}'")]
    UnknownParty(String),
    #[error("lunge distance and speed must be positive (distance={distance}, speed={speed})")]
    InvalidLunge { distance: i32, speed: i32 },
}
