//! Events emitted by the engine
//!
//! Each event carries enough data for a renderer to play the matching effect
//! without querying engine state again.

use serde::{Deserialize, Serialize};

use super::asteroid::AsteroidSize;
use super::entity::EntityId;
use crate::geometry::Point;

/// Bonuses the host application can hand out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    /// Temporary immunity to asteroid damage
    Shield,
    /// Instant partial repair
    Repair,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletHit {
        bullet_id: EntityId,
        asteroid_id: EntityId,
        size: AsteroidSize,
        coords: Point,
        /// Destroyed outright by cold instead of splitting
        shattered: bool,
    },
    ShipHit {
        asteroid_id: EntityId,
        size: AsteroidSize,
        /// Life actually removed
        damage: f32,
        shielded: bool,
        coords: Point,
    },
    GotBonus {
        kind: BonusKind,
        coords: Point,
    },
    LevelUp {
        level: u32,
        coords: Point,
    },
    Burn {
        coords: Point,
    },
    Freeze {
        coords: Point,
    },
}

impl GameEvent {
    /// Where the effect should play
    pub fn coords(&self) -> Point {
        match self {
            GameEvent::BulletHit { coords, .. }
            | GameEvent::ShipHit { coords, .. }
            | GameEvent::GotBonus { coords, .. }
            | GameEvent::LevelUp { coords, .. }
            | GameEvent::Burn { coords }
            | GameEvent::Freeze { coords } => *coords,
        }
    }
}
