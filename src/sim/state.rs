//! Game state and core simulation types
//!
//! [`GameState`] is the aggregate the engine owns and mutates each tick.
//! Presentation layers read it between ticks.

use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, Shard};
use super::events::GameEvent;
use super::ship::Ship;

/// World temperature, cycled Normal → Low → High within every level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Temperature {
    /// Frozen: slow fire, asteroids shatter without splitting
    Low,
    #[default]
    Normal,
    /// Burning: twin guns, double score
    High,
}

impl Temperature {
    /// Multiplier on the ship's minimum time between volleys
    pub fn fire_wait_multiplier(&self) -> f32 {
        match self {
            Temperature::Low => 2.0,
            Temperature::Normal => 1.0,
            Temperature::High => 0.5,
        }
    }

    /// Multiplier on asteroid drift speed
    pub fn drift_multiplier(&self) -> f32 {
        match self {
            Temperature::Low => 0.5,
            Temperature::Normal => 1.0,
            Temperature::High => 1.5,
        }
    }

    /// Whether a hit asteroid breaks into live fragments
    pub fn splits_asteroids(&self) -> bool {
        *self != Temperature::Low
    }
}

/// Top-level session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Constructed, no level started yet
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Ship destroyed (terminal)
    Lost,
    /// Session won by the host's rule (terminal)
    Won,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Lost | GameStatus::Won)
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub ship: Ship,
    /// Live asteroids (order carries no meaning)
    pub asteroids: Vec<Asteroid>,
    /// Explosion debris, never collides
    pub shards: Vec<Shard>,
    /// Events since the last drain, oldest first
    pub events: Vec<GameEvent>,
    pub score: u64,
    /// Levels started so far
    pub level: u32,
    pub temperature: Temperature,
}

impl GameState {
    pub fn new(ship: Ship) -> Self {
        Self {
            ship,
            asteroids: Vec::new(),
            shards: Vec::new(),
            events: Vec::new(),
            score: 0,
            level: 0,
            temperature: Temperature::Normal,
        }
    }
}
