use serde::{Deserialize, Serialize};

use super::Side;
use crate::EngineError;

/// Cosmetic attack timing: how far an attacker travels and how fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LungeConfig {
    pub distance: i32,
    pub speed: i32,
}

impl Default for LungeConfig {
    fn default() -> Self {
        Self { distance: 100, speed: 10 }
    }
}

impl LungeConfig {
    pub fn validate(self) -> Result<Self, EngineError> {
        if self.distance <= 0 || self.speed <= 0 {
            return Err(EngineError::InvalidLunge { distance: self.distance, speed: self.speed });
        }
        Ok(self)
    }
}

/// Position/velocity/goal of the attack in flight. Side one moves toward
/// positive positions, side two toward negative ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lunge {
    pub position: i32,
    pub velocity: i32,
    pub goal: i32,
}

impl Lunge {
    pub fn toward(side: Side, cfg: LungeConfig) -> Self {
        let dir = match side {
            Side::One => 1,
            Side::Two => -1,
        };
        Self {
            position: 0,
            velocity: cfg.speed.max(1) * dir,
            goal: cfg.distance.max(1) * dir,
        }
    }

    /// Move one step; returns the percentage of the distance covered.
    pub fn step(&mut self) -> u8 {
        self.position = self.position.saturating_add(self.velocity);
        self.progress()
    }

    pub fn progress(&self) -> u8 {
        if self.goal == 0 {
            return 100;
        }
        (self.position as i64 * 100 / self.goal as i64).clamp(0, 100) as u8
    }

    pub fn has_landed(&self) -> bool {
        if self.goal >= 0 {
            self.position >= self.goal
        } else {
            self.position <= self.goal
        }
    }
}
