//! Thermal Asteroids headless runner
//!
//! Drives the engine with a fixed-step accumulator and a simple autopilot,
//! logging events the way a renderer would consume them.
//!
//! Usage: `thermal-asteroids [seed] [tuning.json]`

use std::process::ExitCode;

use thermal_asteroids::consts::*;
use thermal_asteroids::geometry::{Rect, distance};
use thermal_asteroids::sim::{GameEngine, GameEvent, GameState, GameStatus, TickInput};
use thermal_asteroids::{JsonFileStore, SimResult, Tuning, normalize_angle};

/// Simulated display frame length (60 fps)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after this much simulated time
const SESSION_LIMIT_MS: u64 = 5 * 60 * 1000;
const BEST_SCORE_PATH: &str = "best_score.json";

/// Runner holding the engine and its clock
struct Runner {
    engine: GameEngine,
    accumulator: f64,
    now: u64,
    frames: u64,
}

impl Runner {
    fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            accumulator: 0.0,
            now: 0,
            frames: 0,
        }
    }

    /// Run simulation ticks for one display frame
    fn frame(&mut self, dt: f64) -> SimResult<()> {
        self.accumulator += dt.min(100.0);

        let mut substeps = 0;
        while self.accumulator >= TICK_MS as f64 && substeps < MAX_SUBSTEPS {
            self.now += TICK_MS;
            let input = autopilot(self.engine.state());
            self.engine.apply_input(&input);
            self.engine.step(self.now)?;
            self.accumulator -= TICK_MS as f64;
            substeps += 1;
        }

        // The "renderer" drains once per frame
        for event in self.engine.drain_events() {
            log_event(&event);
        }
        self.frames += 1;
        Ok(())
    }
}

/// Steer away from the closest asteroid and brake when one is dead ahead
fn autopilot(state: &GameState) -> TickInput {
    let ship = &state.ship.body;
    let Some(nearest) = state
        .asteroids
        .iter()
        .min_by(|a, b| {
            distance(a.body.coords, ship.coords).total_cmp(&distance(b.body.coords, ship.coords))
        })
    else {
        return TickInput::default();
    };

    let to_rock = nearest.body.coords - ship.coords;
    let bearing = normalize_angle(to_rock.y.atan2(to_rock.x) - ship.direction);
    let close = to_rock.length() < 400.0;

    TickInput {
        // Keep the nose on distant rocks, turn away from close ones
        turn_left: if close { bearing > 0.0 } else { bearing < -0.05 },
        turn_right: if close { bearing <= 0.0 } else { bearing > 0.05 },
        accelerate: false,
        decelerate: close && bearing.abs() < 0.5,
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::BulletHit {
            size, shattered, ..
        } => log::debug!("Hit {:?} asteroid (shattered: {})", size, shattered),
        GameEvent::ShipHit {
            size,
            damage,
            shielded,
            ..
        } => log::info!(
            "Ship struck by {:?} asteroid: damage {:.2}, shielded {}",
            size,
            damage,
            shielded
        ),
        GameEvent::GotBonus { kind, .. } => log::info!("Bonus: {:?}", kind),
        GameEvent::LevelUp { level, .. } => log::info!("Level up: {}", level),
        GameEvent::Burn { .. } => log::info!("Burning!"),
        GameEvent::Freeze { .. } => log::info!("Freezing!"),
    }
}

fn load_tuning(path: Option<String>) -> Result<Tuning, String> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = std::fs::read_to_string(&path).map_err(|e| format!("{}: {}", path, e))?;
    Tuning::from_json(&json).map_err(|e| format!("{}: {}", path, e))
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Thermal Asteroids (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let tuning = match load_tuning(args.next()) {
        Ok(tuning) => tuning,
        Err(e) => {
            eprintln!("Invalid tuning file {}", e);
            return ExitCode::FAILURE;
        }
    };

    let world = Rect::new(4000.0, 2000.0);
    let store = JsonFileStore::new(BEST_SCORE_PATH);
    let engine = GameEngine::with_parts(world, seed, tuning, Box::new(store));
    let mut runner = Runner::new(engine);

    if let Err(e) = runner.engine.start_level(0) {
        eprintln!("Could not start: {}", e);
        return ExitCode::FAILURE;
    }

    while runner.engine.status() == GameStatus::Playing && runner.now < SESSION_LIMIT_MS {
        if let Err(e) = runner.frame(FRAME_MS) {
            eprintln!("Simulation failed: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let state = runner.engine.state();
    println!(
        "\n{:?} after {:.1}s ({} frames): level {}, score {}, best {}",
        runner.engine.status(),
        runner.now as f64 / 1000.0,
        runner.frames,
        state.level,
        state.score,
        runner.engine.high_score()
    );
    ExitCode::SUCCESS
}
