//! Asteroids and the debris they leave behind

use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityId, EntityKind};
use super::state::Temperature;
use crate::consts::*;
use crate::geometry::{Point, Rect};

/// Size tier, ordered Small < Medium < Large
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    /// Tier index (Small = 0)
    pub fn tier(&self) -> u32 {
        match self {
            AsteroidSize::Small => 0,
            AsteroidSize::Medium => 1,
            AsteroidSize::Large => 2,
        }
    }

    /// Size of the two fragments this tier breaks into, if any
    pub fn split_size(&self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    pub fn hit_box_radius(&self) -> f32 {
        match self {
            AsteroidSize::Large => 60.0,
            AsteroidSize::Medium => 35.0,
            AsteroidSize::Small => 18.0,
        }
    }

    /// Drift speed before temperature and per-rock variation
    pub fn base_speed(&self) -> f32 {
        match self {
            AsteroidSize::Large => 1.0,
            AsteroidSize::Medium => 1.6,
            AsteroidSize::Small => 2.2,
        }
    }

    /// Life taken from the ship on contact
    pub fn damage(&self) -> f32 {
        match self {
            AsteroidSize::Large => 0.3,
            AsteroidSize::Medium => 0.2,
            AsteroidSize::Small => 0.1,
        }
    }

    /// Shards thrown out when this tier explodes
    pub fn shard_count(&self) -> usize {
        (self.tier() * 10 + 10) as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
}

impl Asteroid {
    pub fn new(
        id: EntityId,
        size: AsteroidSize,
        coords: Point,
        direction: f32,
        speed: f32,
        spin: f32,
        now: u64,
    ) -> Self {
        let body = Body::new(id, EntityKind::Asteroid, coords, size.hit_box_radius(), now)
            .with_motion(direction, speed)
            .with_spin(spin)
            .with_tail(ASTEROID_TAIL_LENGTH);
        Self { body, size }
    }

    pub fn id(&self) -> EntityId {
        self.body.id
    }

    /// Drift one tick; cold slows rocks down, heat speeds them up
    pub fn update(&mut self, temperature: Temperature, world: Rect) {
        self.body.advance(world, temperature.drift_multiplier());
    }
}

/// Transient explosion debris for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shard {
    pub body: Body,
    /// Palette slot in `0..SHARD_COLORS`
    pub color_index: usize,
    /// Size of the asteroid it came from
    pub size: AsteroidSize,
}

impl Shard {
    pub fn new(
        id: EntityId,
        size: AsteroidSize,
        color_index: usize,
        coords: Point,
        direction: f32,
        speed: f32,
        now: u64,
    ) -> Self {
        let body = Body::new(id, EntityKind::Shard, coords, SHARD_RADIUS, now)
            .with_motion(direction, speed)
            .with_duration(SHARD_DURATION_MS)
            .with_tail(SHARD_TAIL_LENGTH);
        Self {
            body,
            color_index,
            size,
        }
    }

    pub fn update(&mut self, world: Rect) {
        self.body.advance(world, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_chain() {
        assert_eq!(AsteroidSize::Large.split_size(), Some(AsteroidSize::Medium));
        assert_eq!(AsteroidSize::Medium.split_size(), Some(AsteroidSize::Small));
        assert_eq!(AsteroidSize::Small.split_size(), None);
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(AsteroidSize::Large > AsteroidSize::Medium);
        assert!(AsteroidSize::Medium > AsteroidSize::Small);
        assert!(AsteroidSize::Large.hit_box_radius() > AsteroidSize::Small.hit_box_radius());
        assert_eq!(AsteroidSize::Large.shard_count(), 30);
        assert_eq!(AsteroidSize::Small.shard_count(), 10);
    }

    #[test]
    fn test_drift_scales_with_temperature() {
        let world = Rect::new(1000.0, 1000.0);
        let start = Point::new(500.0, 500.0);
        let travelled = |temperature| {
            let mut a = Asteroid::new(EntityId(1), AsteroidSize::Large, start, 0.0, 2.0, 0.0, 0);
            a.update(temperature, world);
            a.body.coords.x - start.x
        };
        assert!((travelled(Temperature::Low) - 1.0).abs() < 1e-4);
        assert!((travelled(Temperature::Normal) - 2.0).abs() < 1e-4);
        assert!((travelled(Temperature::High) - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_shards_expire() {
        let shard = Shard::new(EntityId(9), AsteroidSize::Medium, 2, Point::ZERO, 0.0, 1.0, 100);
        assert!(!shard.body.is_expired(100 + SHARD_DURATION_MS - 1));
        assert!(shard.body.is_expired(100 + SHARD_DURATION_MS));
    }
}
