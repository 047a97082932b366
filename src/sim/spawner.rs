//! Asteroid and shard creation
//!
//! All randomness in the simulation comes from the spawner's seeded PCG
//! stream, so two engines built with the same seed and fed the same inputs
//! stay identical.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::asteroid::{Asteroid, AsteroidSize, Shard};
use super::entity::EntityIds;
use crate::consts::*;
use crate::error::SimResult;
use crate::geometry::{Point, Rect, not_direction, random_coords_far_from};
use crate::tuning::Tuning;

/// A batch of asteroids to create
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub count: u32,
    pub size: AsteroidSize,
    /// Fixed spawn point; random and away from the ship when `None`
    pub coords: Option<Point>,
    /// Heading to stay clear of (usually the ship's)
    pub not_direction: Option<f32>,
}

impl SpawnRequest {
    pub fn new(count: u32, size: AsteroidSize) -> Self {
        Self {
            count,
            size,
            coords: None,
            not_direction: None,
        }
    }

    pub fn at(mut self, coords: Point) -> Self {
        self.coords = Some(coords);
        self
    }

    pub fn avoiding(mut self, direction: f32) -> Self {
        self.not_direction = Some(direction);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    world: Rect,
    /// Minimum distance from the ship for randomly placed asteroids
    clearance: f32,
    retry_budget: u32,
    avoid_cone: f32,
}

impl Spawner {
    pub fn new(seed: u64, world: Rect, tuning: &Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            world,
            clearance: tuning.spawn_clearance * SHIP_RADIUS,
            retry_budget: tuning.spawn_retry_budget,
            avoid_cone: tuning.avoid_cone,
        }
    }

    /// Create a batch of asteroids.
    ///
    /// Fails without creating anything when a position or heading cannot be
    /// found within the retry budget.
    pub fn spawn_asteroids(
        &mut self,
        request: SpawnRequest,
        ship_coords: Point,
        ids: &mut EntityIds,
        now: u64,
    ) -> SimResult<Vec<Asteroid>> {
        use std::f32::consts::PI;

        let mut asteroids = Vec::with_capacity(request.count as usize);
        for _ in 0..request.count {
            let coords = match request.coords {
                Some(coords) => coords,
                None => random_coords_far_from(
                    ship_coords,
                    self.clearance,
                    self.world,
                    &mut self.rng,
                    self.retry_budget,
                )?,
            };
            let direction = match request.not_direction {
                Some(avoid) => not_direction(avoid, self.avoid_cone, &mut self.rng, self.retry_budget)?,
                None => self.rng.random_range(-PI..PI),
            };
            let speed = request.size.base_speed() * self.rng.random_range(0.75..1.25);
            let spin = self.rng.random_range(-0.03..0.03);
            asteroids.push(Asteroid::new(
                ids.next_id(),
                request.size,
                coords,
                direction,
                speed,
                spin,
                now,
            ));
        }

        log::debug!(
            "Spawned {} {:?} asteroid(s){}",
            asteroids.len(),
            request.size,
            if request.coords.is_some() { " as fragments" } else { "" }
        );
        Ok(asteroids)
    }

    /// Debris for an exploding asteroid, flying out in every direction
    pub fn explosion_shards(&mut self, asteroid: &Asteroid, ids: &mut EntityIds, now: u64) -> Vec<Shard> {
        use std::f32::consts::PI;

        (0..asteroid.size.shard_count())
            .map(|_| {
                let color_index = self.rng.random_range(0..SHARD_COLORS);
                let direction = self.rng.random_range(-PI..PI);
                let speed = self.rng.random_range(1.0..4.0);
                Shard::new(
                    ids.next_id(),
                    asteroid.size,
                    color_index,
                    asteroid.body.coords,
                    direction,
                    speed,
                    now,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimError;
    use crate::geometry::{center_of, distance};
    use crate::normalize_angle;

    const WORLD: Rect = Rect::new(4000.0, 2000.0);

    #[test]
    fn test_random_batch_keeps_clear_of_ship() {
        let mut spawner = Spawner::new(42, WORLD, &Tuning::default());
        let mut ids = EntityIds::default();
        let ship = center_of(WORLD);
        let batch = spawner
            .spawn_asteroids(SpawnRequest::new(25, AsteroidSize::Large), ship, &mut ids, 0)
            .unwrap();

        assert_eq!(batch.len(), 25);
        for asteroid in &batch {
            assert_eq!(asteroid.size, AsteroidSize::Large);
            assert!(distance(asteroid.body.coords, ship) >= SPAWN_CLEARANCE * SHIP_RADIUS);
        }
    }

    #[test]
    fn test_fragments_avoid_heading() {
        let mut spawner = Spawner::new(7, WORLD, &Tuning::default());
        let mut ids = EntityIds::default();
        let at = Point::new(100.0, 100.0);
        let heading = -std::f32::consts::FRAC_PI_2;
        let batch = spawner
            .spawn_asteroids(
                SpawnRequest::new(2, AsteroidSize::Medium).at(at).avoiding(heading),
                center_of(WORLD),
                &mut ids,
                0,
            )
            .unwrap();

        assert_eq!(batch.len(), 2);
        for fragment in &batch {
            assert_eq!(fragment.body.coords, at);
            assert!(normalize_angle(fragment.body.direction - heading).abs() > AVOID_CONE / 2.0);
        }
    }

    #[test]
    fn test_impossible_placement_is_an_error() {
        let tiny = Rect::new(200.0, 200.0);
        let mut spawner = Spawner::new(1, tiny, &Tuning::default());
        let mut ids = EntityIds::default();
        let result = spawner.spawn_asteroids(
            SpawnRequest::new(3, AsteroidSize::Large),
            center_of(tiny),
            &mut ids,
            0,
        );
        assert!(matches!(result, Err(SimError::PlacementExhausted { attempts: 100, .. })));
    }

    #[test]
    fn test_same_seed_same_batch() {
        let spawn = || {
            let mut spawner = Spawner::new(99, WORLD, &Tuning::default());
            let mut ids = EntityIds::default();
            spawner
                .spawn_asteroids(SpawnRequest::new(5, AsteroidSize::Small), Point::ZERO, &mut ids, 0)
                .unwrap()
                .into_iter()
                .map(|a| (a.body.coords, a.body.direction))
                .collect::<Vec<_>>()
        };
        assert_eq!(spawn(), spawn());
    }

    #[test]
    fn test_shards_scale_with_size() {
        let mut spawner = Spawner::new(5, WORLD, &Tuning::default());
        let mut ids = EntityIds::default();
        let rock = Asteroid::new(ids.next_id(), AsteroidSize::Large, Point::new(10.0, 10.0), 0.0, 1.0, 0.0, 0);
        let shards = spawner.explosion_shards(&rock, &mut ids, 0);
        assert_eq!(shards.len(), 30);
        assert!(shards.iter().all(|s| s.color_index < SHARD_COLORS && s.size == AsteroidSize::Large));
    }
}
