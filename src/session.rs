use std::time::Duration;

use crate::physics::{Bounds, Position, Vec2, Velocity};
use crate::timer::ElapsedTimer;
use crate::trail::Trail;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub bounds: Bounds,
    /// How long a key counts as held after its latest press, for terminals
    /// that never report releases. `None` when releases are reported.
    pub key_hold: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(800.0, 600.0),
            key_hold: None,
        }
    }
}

/// Everything a game session mutates
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub position: Position,
    pub velocity: Velocity,
    pub trail: Trail,
    pub game_started: bool,
    pub timer: ElapsedTimer,
}

impl SessionState {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            position: bounds.center(),
            velocity: Vec2::ZERO,
            trail: Trail::new(),
            game_started: false,
            timer: ElapsedTimer::new(),
        }
    }

    pub fn timer_started(&self) -> bool {
        self.timer.is_running()
    }
}
