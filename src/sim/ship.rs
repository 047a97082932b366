//! The player's ship
//!
//! Turning and throttle are driven by input. Firing is automatic and gated by
//! a temperature-scaled cooldown measured in simulation milliseconds, so the
//! fire rate does not depend on how regularly ticks arrive.

use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::entity::{Body, EntityId, EntityIds, EntityKind};
use super::state::Temperature;
use crate::consts::*;
use crate::geometry::{Point, Rect};
use crate::tuning::Tuning;
use crate::{circle_fraction, heading, normalize_angle};

/// Where a bullet leaves the hull, relative to the heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Muzzle {
    Center,
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    /// Remaining hull integrity in [0, 1]
    pub life: f32,
    /// Live bullets, owned by the ship
    pub bullets: Vec<Bullet>,
    /// Time of the last volley
    fired_at: Option<u64>,
    /// Damage immunity ends at this time
    shield_until: Option<u64>,
    min_time_to_fire_ms: u64,
    life_regen_rate: f32,
}

impl Ship {
    /// Create a ship at rest facing up the screen
    pub fn new(id: EntityId, coords: Point, now: u64, tuning: &Tuning) -> Self {
        let body = Body::new(id, EntityKind::Ship, coords, SHIP_RADIUS, now)
            .with_motion(-circle_fraction(4.0), 0.0)
            .with_tail(SHIP_TAIL_LENGTH);
        Self {
            body,
            life: 1.0,
            bullets: Vec::new(),
            fired_at: None,
            shield_until: None,
            min_time_to_fire_ms: tuning.min_time_to_fire_ms,
            life_regen_rate: tuning.life_regen_rate,
        }
    }

    /// Advance one tick: move, fire if the cooldown allows, move and prune
    /// bullets, resume cruise thrust, regenerate.
    pub fn update(&mut self, temperature: Temperature, now: u64, world: Rect, ids: &mut EntityIds) {
        self.body.advance(world, 1.0);
        self.fire(temperature, now, ids);
        self.update_bullets(now, world);
        self.accelerate();
        self.restore_life(temperature);
    }

    pub fn turn_left(&mut self) {
        self.change_direction(-1.0);
    }

    pub fn turn_right(&mut self) {
        self.change_direction(1.0);
    }

    pub fn accelerate(&mut self) {
        self.body.speed = (self.body.speed + SHIP_ACCELERATION_STEP).min(SHIP_MAX_SPEED);
    }

    /// Brake twice as hard as the cruise thrust, so holding it slows the ship
    pub fn decelerate(&mut self) {
        self.body.speed = (self.body.speed - SHIP_ACCELERATION_STEP * 2.0).max(0.0);
    }

    /// Minimum gap between volleys at `temperature`
    pub fn fire_interval(&self, temperature: Temperature) -> u64 {
        (self.min_time_to_fire_ms as f32 * temperature.fire_wait_multiplier()) as u64
    }

    /// Fire a volley if the cooldown has elapsed. Returns the number of
    /// bullets created.
    pub fn fire(&mut self, temperature: Temperature, now: u64, ids: &mut EntityIds) -> usize {
        let can_fire = match self.fired_at {
            Some(at) => now.saturating_sub(at) > self.fire_interval(temperature),
            None => true,
        };
        if !can_fire {
            return 0;
        }

        self.fired_at = Some(now);
        let muzzles: &[Muzzle] = match temperature {
            Temperature::High => &[Muzzle::Left, Muzzle::Right],
            _ => &[Muzzle::Center],
        };
        for &muzzle in muzzles {
            let bullet = self.make_bullet(muzzle, ids.next_id(), now);
            self.bullets.push(bullet);
        }
        muzzles.len()
    }

    /// Passive repair, only while the temperature is Normal
    pub fn restore_life(&mut self, temperature: Temperature) {
        if temperature == Temperature::Normal {
            self.life = (self.life + self.life_regen_rate).min(1.0);
        }
    }

    /// Remove a bullet that hit something
    pub fn remove_bullet(&mut self, bullet_id: EntityId) -> Option<Bullet> {
        let index = self.bullets.iter().position(|b| b.id() == bullet_id)?;
        Some(self.bullets.remove(index))
    }

    pub fn is_shielded(&self, now: u64) -> bool {
        self.shield_until.is_some_and(|until| now < until)
    }

    pub fn raise_shield(&mut self, now: u64, duration_ms: u64) {
        self.shield_until = Some(now + duration_ms);
    }

    pub fn repair(&mut self, amount: f32) {
        self.life = (self.life + amount).clamp(0.0, 1.0);
    }

    /// Apply a hit. Returns the damage actually taken (zero while shielded).
    pub fn take_damage(&mut self, damage: f32, now: u64) -> f32 {
        if self.is_shielded(now) {
            return 0.0;
        }
        self.life = (self.life - damage).clamp(0.0, 1.0);
        damage
    }

    pub fn is_destroyed(&self) -> bool {
        self.life <= 0.0
    }

    fn update_bullets(&mut self, now: u64, world: Rect) {
        for bullet in &mut self.bullets {
            bullet.body.advance(world, 1.0);
        }
        self.bullets.retain(|b| !b.body.is_expired(now));
    }

    fn change_direction(&mut self, sign: f32) {
        let step = circle_fraction(SHIP_ROTATION_DIVISOR);
        self.body.direction = normalize_angle(self.body.direction + step * sign);
    }

    fn make_bullet(&self, muzzle: Muzzle, id: EntityId, now: u64) -> Bullet {
        let lateral = heading(self.body.direction + circle_fraction(4.0)) * SHIP_TWIN_GUN_OFFSET;
        let offset = match muzzle {
            Muzzle::Center => Point::ZERO,
            Muzzle::Left => -lateral,
            Muzzle::Right => lateral,
        };
        let speed = self.body.speed.max(0.0) + BULLET_MUZZLE_SPEED;
        Bullet::new(id, self.body.coords + offset, self.body.direction, speed, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const WORLD: Rect = Rect::new(4000.0, 2000.0);

    fn ship() -> (Ship, EntityIds) {
        let mut ids = EntityIds::default();
        let ship = Ship::new(ids.next_id(), Vec2::new(2000.0, 1000.0), 0, &Tuning::default());
        (ship, ids)
    }

    #[test]
    fn test_fire_cadence_normal() {
        let (mut ship, mut ids) = ship();
        assert_eq!(ship.fire(Temperature::Normal, 1_000, &mut ids), 1);
        // Inside the 200 ms window
        assert_eq!(ship.fire(Temperature::Normal, 1_150, &mut ids), 0);
        assert_eq!(ship.fire(Temperature::Normal, 1_200, &mut ids), 0);
        // Past it
        assert_eq!(ship.fire(Temperature::Normal, 1_201, &mut ids), 1);
        assert_eq!(ship.bullets.len(), 2);
    }

    #[test]
    fn test_fire_cadence_scales_with_temperature() {
        let (mut ship, mut ids) = ship();
        assert_eq!(ship.fire_interval(Temperature::Low), 400);
        assert_eq!(ship.fire_interval(Temperature::Normal), 200);
        assert_eq!(ship.fire_interval(Temperature::High), 100);

        ship.fire(Temperature::Low, 1_000, &mut ids);
        assert_eq!(ship.fire(Temperature::Low, 1_300, &mut ids), 0);
        assert_eq!(ship.fire(Temperature::Low, 1_401, &mut ids), 1);

        ship.fire(Temperature::High, 2_000, &mut ids);
        assert_eq!(ship.fire(Temperature::High, 2_050, &mut ids), 0);
        assert_eq!(ship.fire(Temperature::High, 2_101, &mut ids), 2);
    }

    #[test]
    fn test_high_temperature_fires_twin_bullets_beside_heading() {
        let (mut ship, mut ids) = ship();
        ship.fire(Temperature::High, 0, &mut ids);
        assert_eq!(ship.bullets.len(), 2);

        let center = ship.body.coords;
        let left = ship.bullets[0].body.coords;
        let right = ship.bullets[1].body.coords;
        assert!((left.distance(center) - SHIP_TWIN_GUN_OFFSET).abs() < 1e-3);
        assert!((right.distance(center) - SHIP_TWIN_GUN_OFFSET).abs() < 1e-3);
        // Heading is straight up, so the guns sit side by side on the x axis
        assert!((left.y - center.y).abs() < 1e-3);
        assert!(left.x < center.x && right.x > center.x);
    }

    #[test]
    fn test_throttle_is_clamped() {
        let (mut ship, _) = ship();
        for _ in 0..100 {
            ship.accelerate();
        }
        assert_eq!(ship.body.speed, SHIP_MAX_SPEED);
        for _ in 0..100 {
            ship.decelerate();
        }
        assert_eq!(ship.body.speed, 0.0);
    }

    #[test]
    fn test_turning_changes_heading_by_fixed_step() {
        let (mut ship, _) = ship();
        let start = ship.body.direction;
        ship.turn_right();
        assert!((ship.body.direction - start - circle_fraction(SHIP_ROTATION_DIVISOR)).abs() < 1e-5);
        ship.turn_left();
        ship.turn_left();
        assert!((start - ship.body.direction - circle_fraction(SHIP_ROTATION_DIVISOR)).abs() < 1e-5);
    }

    #[test]
    fn test_life_regenerates_only_when_normal() {
        let (mut ship, _) = ship();
        ship.life = 0.5;
        ship.restore_life(Temperature::Low);
        ship.restore_life(Temperature::High);
        assert_eq!(ship.life, 0.5);
        ship.restore_life(Temperature::Normal);
        assert!(ship.life > 0.5);

        ship.life = 1.0;
        ship.restore_life(Temperature::Normal);
        assert_eq!(ship.life, 1.0);
    }

    #[test]
    fn test_bullets_expire_during_update() {
        let (mut ship, mut ids) = ship();
        ship.update(Temperature::Normal, 0, WORLD, &mut ids);
        assert_eq!(ship.bullets.len(), 1);

        // Every bullet from the first volley is gone once its lifetime passes
        let first = ship.bullets[0].id();
        ship.update(Temperature::Normal, BULLET_DURATION_MS, WORLD, &mut ids);
        assert!(ship.bullets.iter().all(|b| b.id() != first));
    }

    #[test]
    fn test_shield_blocks_damage() {
        let (mut ship, _) = ship();
        ship.raise_shield(1_000, 500);
        assert_eq!(ship.take_damage(0.3, 1_200), 0.0);
        assert_eq!(ship.life, 1.0);
        assert_eq!(ship.take_damage(0.3, 1_500), 0.3);
        assert!((ship.life - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_remove_bullet() {
        let (mut ship, mut ids) = ship();
        ship.fire(Temperature::Normal, 0, &mut ids);
        let id = ship.bullets[0].id();
        assert!(ship.remove_bullet(id).is_some());
        assert!(ship.remove_bullet(id).is_none());
        assert!(ship.bullets.is_empty());
    }
}
