//! Data-driven game balance
//!
//! [`Tuning`] mirrors the balance constants in [`crate::consts`]. Missing keys
//! in a tuning file fall back to those defaults, so a file only needs the
//! values it overrides.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult};

/// Runtime-tunable balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Level cycle ===
    /// Length of one level (Normal → Low → High) in milliseconds
    pub level_duration_ms: u64,
    /// Large asteroids spawned on the first level
    pub base_asteroid_count: u32,
    /// Extra asteroids per completed level
    pub asteroids_per_level: f32,
    /// Reaching this level ends the session as Won. `None` leaves the win
    /// rule to the host application.
    pub max_level: Option<u32>,

    // === Ship ===
    pub min_time_to_fire_ms: u64,
    pub life_regen_rate: f32,

    // === Spawner ===
    /// Free space kept around the ship, in ship radii
    pub spawn_clearance: f32,
    pub spawn_retry_budget: u32,
    /// Full angle (radians) of the cone fragments may not head into
    pub avoid_cone: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            level_duration_ms: LEVEL_DURATION_MS,
            base_asteroid_count: BASE_ASTEROID_COUNT,
            asteroids_per_level: ASTEROIDS_PER_LEVEL,
            max_level: None,

            min_time_to_fire_ms: SHIP_MIN_TIME_TO_FIRE_MS,
            life_regen_rate: SHIP_LIFE_REGEN_RATE,

            spawn_clearance: SPAWN_CLEARANCE,
            spawn_retry_budget: SPAWN_RETRY_BUDGET,
            avoid_cone: AVOID_CONE,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> SimResult<Self> {
        let tuning: Tuning = serde_json::from_str(json).map_err(|e| SimError::InvalidTuning {
            reason: e.to_string(),
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SimResult<()> {
        let invalid = |reason: &str| {
            Err(SimError::InvalidTuning {
                reason: reason.to_string(),
            })
        };

        if self.level_duration_ms < 3 {
            return invalid("level_duration_ms must be at least 3");
        }
        if self.spawn_retry_budget == 0 {
            return invalid("spawn_retry_budget must be positive");
        }
        if self.spawn_clearance.is_nan() || self.spawn_clearance < 0.0 {
            return invalid("spawn_clearance must be non-negative");
        }
        // Fragments need at least half of the circle to head into
        if !(0.0..=std::f32::consts::PI).contains(&self.avoid_cone) {
            return invalid("avoid_cone must be in [0, π]");
        }
        if self.max_level == Some(0) {
            return invalid("max_level must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.life_regen_rate) {
            return invalid("life_regen_rate must be in [0, 1]");
        }
        if self.asteroids_per_level.is_nan() || self.asteroids_per_level < 0.0 {
            return invalid("asteroids_per_level must be non-negative");
        }
        Ok(())
    }

    /// Number of Large asteroids spawned when `level` begins
    pub fn asteroids_for_level(&self, level: u32) -> u32 {
        (self.base_asteroid_count as f32 + level as f32 * self.asteroids_per_level).floor() as u32
    }
}
