//! Player input
//!
//! Steering and throttle are the only ways the outside world may change the
//! simulation between ticks.

use super::ship::Ship;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub accelerate: bool,
    pub decelerate: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        *self == TickInput::default()
    }
}

/// Steering handle on the ship. Exposes movement only, never the bullets or
/// life bookkeeping.
pub struct ShipControls<'a> {
    ship: &'a mut Ship,
}

impl<'a> ShipControls<'a> {
    pub(crate) fn new(ship: &'a mut Ship) -> Self {
        Self { ship }
    }

    pub fn turn_left(&mut self) {
        self.ship.turn_left();
    }

    pub fn turn_right(&mut self) {
        self.ship.turn_right();
    }

    pub fn accelerate(&mut self) {
        self.ship.accelerate();
    }

    pub fn decelerate(&mut self) {
        self.ship.decelerate();
    }

    /// Apply every command held in `input`
    pub fn apply(&mut self, input: &TickInput) {
        if input.turn_left {
            self.turn_left();
        }
        if input.turn_right {
            self.turn_right();
        }
        if input.accelerate {
            self.accelerate();
        }
        if input.decelerate {
            self.decelerate();
        }
    }
}
