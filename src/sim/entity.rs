//! Shared entity data
//!
//! Ships, bullets, asteroids and shards all carry a [`Body`]: position,
//! heading, speed, spin, hit box, lifetime and a short trail of recent
//! positions. The [`EntityKind`] tag says which collection the body lives in.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{Collidable, Point, Rect, wrap_into};
use crate::heading;

/// Stable identifier, unique within one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Monotonic id allocator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    /// Allocate a new entity ID
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Bullet,
    Asteroid,
    Shard,
}

/// Motion and lifecycle data common to every entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub kind: EntityKind,
    pub coords: Point,
    /// Heading in radians
    pub direction: f32,
    /// World units per tick
    pub speed: f32,
    /// Spin in radians per tick
    pub angular_speed: f32,
    /// Visual orientation, advanced by `angular_speed`
    pub rotation: f32,
    hit_box_radius: f32,
    /// Simulation time (ms) the entity was created at
    pub created_at: u64,
    /// Lifetime in ms; `None` lives until removed
    pub duration: Option<u64>,
    /// Recent positions, newest first
    tail: Vec<Point>,
    tail_length: usize,
}

impl Body {
    /// Create a resting body.
    ///
    /// Panics on a non-positive radius or non-finite coordinates.
    pub fn new(
        id: EntityId,
        kind: EntityKind,
        coords: Point,
        hit_box_radius: f32,
        created_at: u64,
    ) -> Self {
        assert!(hit_box_radius > 0.0, "hit box radius must be positive");
        assert!(coords.is_finite(), "entity coordinates must be finite");
        Self {
            id,
            kind,
            coords,
            direction: 0.0,
            speed: 0.0,
            angular_speed: 0.0,
            rotation: 0.0,
            hit_box_radius,
            created_at,
            duration: None,
            tail: Vec::new(),
            tail_length: 0,
        }
    }

    pub fn with_motion(mut self, direction: f32, speed: f32) -> Self {
        assert!(direction.is_finite() && speed.is_finite(), "motion must be finite");
        self.direction = direction;
        self.speed = speed;
        self
    }

    pub fn with_spin(mut self, angular_speed: f32) -> Self {
        self.angular_speed = angular_speed;
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    pub fn with_tail(mut self, tail_length: usize) -> Self {
        self.tail_length = tail_length;
        self.tail = Vec::with_capacity(tail_length);
        self
    }

    /// Advance one tick: record the trail, move along the heading (scaled by
    /// `speed_scale`), wrap around the world and spin.
    pub fn advance(&mut self, world: Rect, speed_scale: f32) {
        self.record_tail();
        if self.speed != 0.0 {
            let step = heading(self.direction) * self.speed * speed_scale;
            self.coords = wrap_into(self.coords + step, world);
        }
        self.rotation = crate::normalize_angle(self.rotation + self.angular_speed);
    }

    fn record_tail(&mut self) {
        if self.tail_length == 0 {
            return;
        }
        self.tail.insert(0, self.coords);
        self.tail.truncate(self.tail_length);
    }

    pub fn tail(&self) -> &[Point] {
        &self.tail
    }

    pub fn tail_length(&self) -> usize {
        self.tail_length
    }

    /// Milliseconds since creation
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }

    /// True once a bounded lifetime has fully elapsed
    pub fn is_expired(&self, now: u64) -> bool {
        self.duration.is_some_and(|d| self.age(now) >= d)
    }

    /// Unit vector of the current heading
    pub fn heading(&self) -> Vec2 {
        heading(self.direction)
    }
}

impl Collidable for Body {
    fn coords(&self) -> Point {
        self.coords
    }

    fn hit_box_radius(&self) -> f32 {
        self.hit_box_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WORLD: Rect = Rect::new(1000.0, 500.0);

    fn body() -> Body {
        Body::new(EntityId(1), EntityKind::Bullet, Vec2::new(10.0, 10.0), 3.0, 0)
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids = EntityIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_advance_moves_along_heading() {
        let mut b = body().with_motion(0.0, 5.0);
        b.advance(WORLD, 1.0);
        assert!((b.coords.x - 15.0).abs() < 1e-4);
        assert!((b.coords.y - 10.0).abs() < 1e-4);
        assert!(b.tail().is_empty());
    }

    #[test]
    fn test_advance_wraps_world_edges() {
        let mut b = body().with_motion(std::f32::consts::PI, 20.0);
        b.advance(WORLD, 1.0);
        assert!((b.coords.x - 990.0).abs() < 1e-3);
    }

    #[test]
    fn test_tail_is_newest_first() {
        let mut b = body().with_motion(0.0, 1.0).with_tail(3);
        b.advance(WORLD, 1.0);
        b.advance(WORLD, 1.0);
        assert_eq!(b.tail().len(), 2);
        assert!(b.tail()[0].x > b.tail()[1].x);
    }

    #[test]
    fn test_expiry() {
        let forever = body();
        assert!(!forever.is_expired(u64::MAX));

        let short = body().with_duration(100);
        assert!(!short.is_expired(99));
        assert!(short.is_expired(100));
    }

    #[test]
    #[should_panic(expected = "hit box radius must be positive")]
    fn test_rejects_zero_radius() {
        let _ = Body::new(EntityId(1), EntityKind::Shard, Vec2::ZERO, 0.0, 0);
    }

    #[test]
    #[should_panic(expected = "entity coordinates must be finite")]
    fn test_rejects_nan_coords() {
        let _ = Body::new(EntityId(1), EntityKind::Shard, Vec2::new(f32::NAN, 0.0), 1.0, 0);
    }

    proptest! {
        #[test]
        fn prop_tail_never_exceeds_length(len in 0usize..20, ticks in 0usize..60, dir in -3.0f32..3.0) {
            let mut b = body().with_motion(dir, 4.0).with_tail(len);
            for _ in 0..ticks {
                b.advance(WORLD, 1.0);
                prop_assert!(b.tail().len() <= b.tail_length());
            }
        }
    }
}
