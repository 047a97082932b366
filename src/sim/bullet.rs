//! Projectiles fired by the ship

use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityId, EntityKind};
use crate::consts::*;
use crate::geometry::Point;

/// A short-lived projectile. Expires on its own after [`BULLET_DURATION_MS`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
}

impl Bullet {
    pub fn new(id: EntityId, coords: Point, direction: f32, speed: f32, now: u64) -> Self {
        let body = Body::new(id, EntityKind::Bullet, coords, BULLET_RADIUS, now)
            .with_motion(direction, speed)
            .with_duration(BULLET_DURATION_MS)
            .with_tail(BULLET_TAIL_LENGTH);
        Self { body }
    }

    pub fn id(&self) -> EntityId {
        self.body.id
    }
}
