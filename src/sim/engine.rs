//! Game engine
//!
//! Owns the [`GameState`] and drives it. The host calls [`GameEngine::update`]
//! at a fixed rate and [`GameEngine::maybe_advance_level`] with the same
//! clock; the engine never reads time on its own.
//!
//! Per-tick pipeline, in order:
//! 1. ship (motion, firing, bullets, throttle, regeneration)
//! 2. asteroids
//! 3. shards, then pruning of expired shards
//! 4. collisions (asteroid × bullet, then asteroid × ship)
//! 5. loss check

use std::mem;

use super::asteroid::{Asteroid, AsteroidSize};
use super::collision::{BroadPhase, Circle, PairwiseScan};
use super::entity::{EntityId, EntityIds};
use super::events::{BonusKind, GameEvent};
use super::scoring::bullet_hit_score;
use super::ship::Ship;
use super::spawner::{SpawnRequest, Spawner};
use super::state::{GameState, GameStatus, Temperature};
use super::tick::{ShipControls, TickInput};
use crate::consts::*;
use crate::error::{SimError, SimResult};
use crate::geometry::{Rect, center_of};
use crate::highscores::{BestScoreStore, MemoryStore};
use crate::tuning::Tuning;

/// Pending transitions of the current level, as absolute due times
#[derive(Debug, Clone, Copy, Default)]
struct LevelSchedule {
    freeze_at: Option<u64>,
    burn_at: Option<u64>,
    next_level_at: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Freeze,
    Burn,
    NextLevel(u64),
}

impl LevelSchedule {
    /// Freeze at 1/3, burn at 2/3, next level at the end
    fn starting_at(start: u64, duration: u64) -> Self {
        let third = duration / 3;
        Self {
            freeze_at: Some(start + third),
            burn_at: Some(start + third * 2),
            next_level_at: Some(start + duration),
        }
    }

    /// Pop the earliest transition that is due at `now`
    fn take_due(&mut self, now: u64) -> Option<Stage> {
        if self.freeze_at.is_some_and(|at| at <= now) {
            self.freeze_at = None;
            return Some(Stage::Freeze);
        }
        if self.burn_at.is_some_and(|at| at <= now) {
            self.burn_at = None;
            return Some(Stage::Burn);
        }
        let at = self.next_level_at.filter(|&at| at <= now)?;
        self.next_level_at = None;
        Some(Stage::NextLevel(at))
    }
}

pub struct GameEngine {
    state: GameState,
    status: GameStatus,
    world: Rect,
    tuning: Tuning,
    spawner: Spawner,
    ids: EntityIds,
    high_score: u64,
    store: Box<dyn BestScoreStore>,
    broad_phase: Box<dyn BroadPhase>,
    schedule: LevelSchedule,
}

impl GameEngine {
    /// Engine with default tuning and an in-memory best score
    pub fn new(world: Rect, seed: u64) -> Self {
        Self::with_parts(world, seed, Tuning::default(), Box::new(MemoryStore::new()))
    }

    pub fn with_parts(
        world: Rect,
        seed: u64,
        tuning: Tuning,
        store: Box<dyn BestScoreStore>,
    ) -> Self {
        let mut ids = EntityIds::default();
        let ship = Ship::new(ids.next_id(), center_of(world), 0, &tuning);
        let high_score = store.get();
        Self {
            state: GameState::new(ship),
            status: GameStatus::Idle,
            world,
            spawner: Spawner::new(seed, world, &tuning),
            tuning,
            ids,
            high_score,
            store,
            broad_phase: Box::new(PairwiseScan),
            schedule: LevelSchedule::default(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn world(&self) -> Rect {
        self.world
    }

    /// Best score known to the engine (stored value, or this session's if higher)
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Replace the collision broad phase
    pub fn set_broad_phase(&mut self, broad_phase: Box<dyn BroadPhase>) {
        self.broad_phase = broad_phase;
    }

    /// Steering handle for input layers
    pub fn controls(&mut self) -> ShipControls<'_> {
        ShipControls::new(&mut self.state.ship)
    }

    /// Apply one tick of input. Ignored unless the game is being played.
    pub fn apply_input(&mut self, input: &TickInput) {
        if self.status == GameStatus::Playing {
            self.controls().apply(input);
        }
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.state.events)
    }

    /// Begin the session: spawn the first wave and arm the level schedule.
    ///
    /// Only valid from `Idle`; finished sessions cannot be resumed.
    pub fn start_level(&mut self, now: u64) -> SimResult<()> {
        if self.status != GameStatus::Idle {
            return Err(SimError::InvalidTransition {
                from: self.status,
                action: "start a level",
            });
        }

        self.status = GameStatus::Playing;
        if let Err(e) = self.update_level(now) {
            self.status = GameStatus::Idle;
            return Err(e);
        }
        Ok(())
    }

    /// Run every level transition due at `now` (freeze, burn, next level),
    /// catching up in order if several are overdue. Does nothing once the
    /// session has ended.
    pub fn maybe_advance_level(&mut self, now: u64) -> SimResult<()> {
        while self.status == GameStatus::Playing {
            let Some(stage) = self.schedule.take_due(now) else {
                break;
            };
            match stage {
                Stage::Freeze => self.start_frozen_stage(),
                Stage::Burn => self.start_burning_stage(),
                Stage::NextLevel(at) => {
                    if let Err(e) = self.update_level(at) {
                        // Keep the transition pending so the next call retries it
                        self.schedule.next_level_at = Some(at);
                        return Err(e);
                    }
                }
            }
        }
        Ok(())
    }

    /// Advance the simulation by one fixed tick
    pub fn update(&mut self, now: u64) -> SimResult<()> {
        if self.status != GameStatus::Playing {
            return Ok(());
        }

        let temperature = self.state.temperature;
        self.state
            .ship
            .update(temperature, now, self.world, &mut self.ids);
        for asteroid in &mut self.state.asteroids {
            asteroid.update(temperature, self.world);
        }
        self.update_shards(now);
        self.check_collisions(now)?;
        self.check_game_lost();
        Ok(())
    }

    /// Level transitions followed by one tick
    pub fn step(&mut self, now: u64) -> SimResult<()> {
        self.maybe_advance_level(now)?;
        self.update(now)
    }

    /// End the session as won. The win rule belongs to the host.
    pub fn declare_won(&mut self) -> SimResult<()> {
        if self.status != GameStatus::Playing {
            return Err(SimError::InvalidTransition {
                from: self.status,
                action: "declare a win",
            });
        }
        self.finish(GameStatus::Won);
        Ok(())
    }

    /// Hand the ship a bonus
    pub fn grant_bonus(&mut self, kind: BonusKind, now: u64) -> SimResult<()> {
        if self.status != GameStatus::Playing {
            return Err(SimError::InvalidTransition {
                from: self.status,
                action: "grant a bonus",
            });
        }

        let ship = &mut self.state.ship;
        match kind {
            BonusKind::Shield => ship.raise_shield(now, SHIELD_DURATION_MS),
            BonusKind::Repair => ship.repair(REPAIR_AMOUNT),
        }
        self.state.events.push(GameEvent::GotBonus {
            kind,
            coords: ship.body.coords,
        });
        Ok(())
    }

    fn update_shards(&mut self, now: u64) {
        for shard in &mut self.state.shards {
            shard.update(self.world);
        }
        self.state.shards.retain(|s| !s.body.is_expired(now));
    }

    fn check_collisions(&mut self, now: u64) -> SimResult<()> {
        let fragments = self.check_asteroid_bullet_collisions(now)?;
        self.check_asteroid_ship_collisions(now);
        // Fragments join after the ship pass so they cannot hit it on the tick they appear
        self.state.asteroids.extend(fragments);
        Ok(())
    }

    /// Resolve bullet hits. Each asteroid and each bullet takes part in at
    /// most one hit per tick. Returns the fragments to add.
    fn check_asteroid_bullet_collisions(&mut self, now: u64) -> SimResult<Vec<Asteroid>> {
        let asteroid_circles: Vec<Circle> =
            self.state.asteroids.iter().map(|a| Circle::of(&a.body)).collect();
        let bullet_circles: Vec<Circle> = self
            .state
            .ship
            .bullets
            .iter()
            .map(|b| Circle::of(&b.body))
            .collect();

        let mut asteroid_hit = vec![false; asteroid_circles.len()];
        let mut bullet_spent = vec![false; bullet_circles.len()];
        let mut hits = Vec::new();
        for (a, b) in self
            .broad_phase
            .overlapping_pairs(&asteroid_circles, &bullet_circles)
        {
            if asteroid_hit[a] || bullet_spent[b] {
                continue;
            }
            asteroid_hit[a] = true;
            bullet_spent[b] = true;
            hits.push((a, b));
        }
        if hits.is_empty() {
            return Ok(Vec::new());
        }

        let temperature = self.state.temperature;
        let shattered = !temperature.splits_asteroids();

        // Build every fragment batch before touching the state, so a failed
        // spawn leaves the tick unapplied
        let mut fragments = Vec::new();
        for &(a, _) in &hits {
            let asteroid = &self.state.asteroids[a];
            if let Some(next) = asteroid.size.split_size().filter(|_| !shattered) {
                let request = SpawnRequest::new(2, next)
                    .at(asteroid.body.coords)
                    .avoiding(self.state.ship.body.direction);
                let pieces = self.spawner.spawn_asteroids(
                    request,
                    self.state.ship.body.coords,
                    &mut self.ids,
                    now,
                )?;
                fragments.extend(pieces);
            }
        }

        let mut spent_bullets: Vec<EntityId> = Vec::with_capacity(hits.len());
        for &(a, b) in &hits {
            let asteroid = &self.state.asteroids[a];
            let bullet_id = self.state.ship.bullets[b].id();
            spent_bullets.push(bullet_id);

            let shards = self.spawner.explosion_shards(asteroid, &mut self.ids, now);
            self.state.shards.extend(shards);
            self.state.events.push(GameEvent::BulletHit {
                bullet_id,
                asteroid_id: asteroid.id(),
                size: asteroid.size,
                coords: asteroid.body.coords,
                shattered,
            });
            self.state.score += bullet_hit_score(asteroid.size, temperature);
        }

        let mut index = 0;
        self.state.asteroids.retain(|_| {
            let keep = !asteroid_hit[index];
            index += 1;
            keep
        });
        for bullet_id in spent_bullets {
            self.state.ship.remove_bullet(bullet_id);
        }
        Ok(fragments)
    }

    fn check_asteroid_ship_collisions(&mut self, now: u64) {
        let asteroid_circles: Vec<Circle> =
            self.state.asteroids.iter().map(|a| Circle::of(&a.body)).collect();
        let ship_circle = [Circle::of(&self.state.ship.body)];

        let mut asteroid_hit = vec![false; asteroid_circles.len()];
        let pairs = self
            .broad_phase
            .overlapping_pairs(&asteroid_circles, &ship_circle);
        if pairs.is_empty() {
            return;
        }

        for (a, _) in pairs {
            asteroid_hit[a] = true;
            let asteroid = &self.state.asteroids[a];

            let shards = self.spawner.explosion_shards(asteroid, &mut self.ids, now);
            self.state.shards.extend(shards);

            let shielded = self.state.ship.is_shielded(now);
            let damage = if shielded { 0.0 } else { asteroid.size.damage() };
            self.state.events.push(GameEvent::ShipHit {
                asteroid_id: asteroid.id(),
                size: asteroid.size,
                damage,
                shielded,
                coords: asteroid.body.coords,
            });
            self.state.ship.take_damage(asteroid.size.damage(), now);
            log::debug!(
                "Ship hit by {:?} asteroid, life now {:.2}",
                asteroid.size,
                self.state.ship.life
            );
        }

        let mut index = 0;
        self.state.asteroids.retain(|_| {
            let keep = !asteroid_hit[index];
            index += 1;
            keep
        });
    }

    fn check_game_lost(&mut self) {
        if self.state.ship.is_destroyed() {
            self.finish(GameStatus::Lost);
        }
    }

    /// Enter a terminal status: cancel pending transitions and save the best score
    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        self.schedule = LevelSchedule::default();

        let score = self.state.score;
        if score > self.high_score {
            self.store.set(score);
            self.high_score = score;
            log::info!("New best score: {}", score);
        }
        log::info!(
            "Game {:?} on level {} with score {}",
            status,
            self.state.level,
            score
        );
    }

    /// Start the next level: Normal temperature, a fresh batch of Large
    /// asteroids and a new freeze/burn schedule. Nothing changes when the
    /// batch cannot be placed.
    fn update_level(&mut self, now: u64) -> SimResult<()> {
        if self
            .tuning
            .max_level
            .is_some_and(|max| self.state.level >= max)
        {
            self.finish(GameStatus::Won);
            return Ok(());
        }

        let count = self.tuning.asteroids_for_level(self.state.level);
        let batch = self.spawner.spawn_asteroids(
            SpawnRequest::new(count, AsteroidSize::Large),
            self.state.ship.body.coords,
            &mut self.ids,
            now,
        )?;
        self.state.temperature = Temperature::Normal;
        self.state.asteroids.extend(batch);

        if self.state.level > 0 {
            self.state.events.push(GameEvent::LevelUp {
                level: self.state.level + 1,
                coords: self.state.ship.body.coords,
            });
        }
        self.state.level += 1;
        self.schedule = LevelSchedule::starting_at(now, self.tuning.level_duration_ms);

        log::info!(
            "Level {} started with {} new asteroids",
            self.state.level,
            count
        );
        Ok(())
    }

    fn start_frozen_stage(&mut self) {
        self.state.temperature = Temperature::Low;
        self.state.events.push(GameEvent::Freeze {
            coords: self.state.ship.body.coords,
        });
        log::info!("Level {}: freeze", self.state.level);
    }

    fn start_burning_stage(&mut self) {
        self.state.temperature = Temperature::High;
        self.state.events.push(GameEvent::Burn {
            coords: self.state.ship.body.coords,
        });
        log::info!("Level {}: burn", self.state.level);
    }
}
