//! Thermal Asteroids - an asteroid-field arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, levels, game state)
//! - `geometry`: Pure 2D helpers shared by the simulation and presentation layers
//! - `highscores`: Best-score persistence
//! - `tuning`: Data-driven game balance
//!
//! Rendering, input polling and animation live outside this crate. They read
//! [`sim::GameEngine::state`] between ticks and drain events once per frame.

pub mod error;
pub mod geometry;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use error::{SimError, SimResult};
pub use geometry::{Point, Rect};
pub use highscores::{BestScoreStore, JsonFileStore, MemoryStore};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const TICK_MS: u64 = 16;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Level length before the next batch of asteroids arrives
    pub const LEVEL_DURATION_MS: u64 = 30_000;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 30.0;
    pub const SHIP_TAIL_LENGTH: usize = 7;
    pub const SHIP_MAX_SPEED: f32 = 6.0;
    pub const SHIP_ACCELERATION_STEP: f32 = 0.25;
    /// Heading change per turn command (1/80 of a circle)
    pub const SHIP_ROTATION_DIVISOR: f32 = 80.0;
    pub const SHIP_MIN_TIME_TO_FIRE_MS: u64 = 200;
    /// Life regained per tick while the temperature is Normal
    pub const SHIP_LIFE_REGEN_RATE: f32 = 0.0005;
    /// Lateral distance of the twin bullets fired under High temperature
    pub const SHIP_TWIN_GUN_OFFSET: f32 = 20.0;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const BULLET_DURATION_MS: u64 = 1_500;
    pub const BULLET_TAIL_LENGTH: usize = 15;
    /// Speed added on top of the ship's own speed
    pub const BULLET_MUZZLE_SPEED: f32 = 12.0;

    /// Asteroid defaults
    pub const ASTEROID_TAIL_LENGTH: usize = 0;
    pub const BASE_ASTEROID_COUNT: u32 = 20;
    pub const ASTEROIDS_PER_LEVEL: f32 = 1.5;

    /// Shard defaults
    pub const SHARD_RADIUS: f32 = 2.0;
    pub const SHARD_DURATION_MS: u64 = 600;
    pub const SHARD_TAIL_LENGTH: usize = 4;
    pub const SHARD_COLORS: usize = 4;

    /// Spawner defaults
    /// Free space around the ship, in ship radii, when placing new asteroids
    pub const SPAWN_CLEARANCE: f32 = 10.0;
    pub const SPAWN_RETRY_BUDGET: u32 = 100;
    /// Headings inside this cone around the ship's heading are rejected for fragments
    pub const AVOID_CONE: f32 = std::f32::consts::FRAC_PI_2;

    /// Bonus defaults
    pub const SHIELD_DURATION_MS: u64 = 5_000;
    pub const REPAIR_AMOUNT: f32 = 0.25;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// `1/n` of a full turn, in radians
#[inline]
pub fn circle_fraction(n: f32) -> f32 {
    std::f32::consts::TAU / n
}

/// Unit vector pointing along `direction`
#[inline]
pub fn heading(direction: f32) -> glam::Vec2 {
    glam::Vec2::new(direction.cos(), direction.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        // 3π lands on the ±π seam; rounding may put it on either side
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(1.5 * PI) - (-PI / 2.0)).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) - (-PI / 2.0)).abs() < 1e-6);
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_fraction() {
        assert!((circle_fraction(4.0) - PI / 2.0).abs() < 1e-6);
        assert!((circle_fraction(1.0) - 2.0 * PI).abs() < 1e-6);
    }
}
