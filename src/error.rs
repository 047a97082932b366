//! Simulation error types.
//!
//! Motion, collision and scoring are total; the only runtime failures are
//! unsatisfiable spawn constraints, illegal status transitions and bad tuning
//! files.

use std::fmt;

use crate::sim::GameStatus;

/// Top-level error enum for the simulation core.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// No position far enough from the ship was found within the retry budget.
    /// Usually the world is too small for the configured clearance.
    PlacementExhausted {
        /// Number of samples drawn before giving up.
        attempts: u32,
        /// Required distance from the ship, in world units.
        clearance: f32,
    },

    /// No heading outside the avoidance cone was found within the retry budget.
    HeadingExhausted {
        attempts: u32,
        /// Full angle of the rejected cone, in radians.
        cone: f32,
    },

    /// The engine was asked to do something its current status forbids,
    /// such as starting a session that already ended.
    InvalidTransition {
        from: GameStatus,
        action: &'static str,
    },

    /// Tuning data could not be parsed or holds unusable values.
    InvalidTuning { reason: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::PlacementExhausted {
                attempts,
                clearance,
            } => write!(
                f,
                "could not place asteroid at least {} units from the ship after {} attempts",
                clearance, attempts
            ),
            SimError::HeadingExhausted { attempts, cone } => write!(
                f,
                "could not pick a heading outside a {:.3} rad cone after {} attempts",
                cone, attempts
            ),
            SimError::InvalidTransition { from, action } => {
                write!(f, "cannot {} while the game is {:?}", action, from)
            }
            SimError::InvalidTuning { reason } => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;
