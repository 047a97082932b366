//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives as explicit millisecond arguments
//! - Seeded RNG only
//! - Expired and destroyed entities are compacted once per tick, never
//!   removed mid-iteration
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod bullet;
pub mod collision;
pub mod engine;
pub mod entity;
pub mod events;
pub mod scoring;
pub mod ship;
pub mod spawner;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidSize, Shard};
pub use bullet::Bullet;
pub use collision::{BroadPhase, Circle, PairwiseScan};
pub use engine::GameEngine;
pub use entity::{Body, EntityId, EntityIds, EntityKind};
pub use events::{BonusKind, GameEvent};
pub use scoring::{base_score, bullet_hit_score};
pub use ship::Ship;
pub use spawner::{SpawnRequest, Spawner};
pub use state::{GameState, GameStatus, Temperature};
pub use tick::{ShipControls, TickInput};
