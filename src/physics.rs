use std::time::Duration;

use crate::input::InputState;

/// Velocity added per tick for each held direction
pub const ACCELERATION: f64 = 0.2;
/// Per-axis speed cap, in canvas units per tick
pub const MAX_SPEED: f64 = 5.0;
/// Multiplicative decay applied to velocity every tick
pub const FRICTION: f64 = 0.95;

pub const MOTION_PERIOD: Duration = Duration::from_millis(20);
pub const CLOCK_PERIOD: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

pub type Position = Vec2;
pub type Velocity = Vec2;

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from(v: (f64, f64)) -> Self {
        Vec2 { x: v.0, y: v.1 }
    }
}

impl From<Vec2> for (f64, f64) {
    fn from(v: Vec2) -> Self {
        (v.x, v.y)
    }
}

/// Canvas extent in world units. The y axis points down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Position {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn clamp(&self, p: Position) -> Position {
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}

/// Unit step on each axis for one held direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn nudge(self, v: Velocity) -> Velocity {
        match self {
            Direction::Up => Vec2::new(v.x, (v.y - ACCELERATION).max(-MAX_SPEED)),
            Direction::Down => Vec2::new(v.x, (v.y + ACCELERATION).min(MAX_SPEED)),
            Direction::Left => Vec2::new((v.x - ACCELERATION).max(-MAX_SPEED), v.y),
            Direction::Right => Vec2::new((v.x + ACCELERATION).min(MAX_SPEED), v.y),
        }
    }
}

/// Apply every held direction to `velocity`, then friction.
///
/// Inputs mapping to the same direction (an arrow and its letter key) each
/// contribute a nudge, so they stack before friction is applied.
pub fn steer(velocity: Velocity, input: &InputState) -> Velocity {
    let v = input
        .held_directions()
        .fold(velocity, |v, direction| direction.nudge(v));

    Vec2::new(v.x * FRICTION, v.y * FRICTION)
}

/// Move `position` by `velocity` and clamp the result into `bounds`
pub fn integrate(position: Position, velocity: Velocity, bounds: Bounds) -> Position {
    bounds.clamp(Vec2::new(position.x + velocity.x, position.y + velocity.y))
}

/// Velocity of magnitude [`MAX_SPEED`] pointing from `from` toward `to`.
///
/// Returns `None` when both points coincide.
pub fn touch_velocity(from: Position, to: Position) -> Option<Velocity> {
    let offset = Vec2::new(to.x - from.x, to.y - from.y);
    let dist = offset.length();

    if dist > 0.0 {
        Some(Vec2::new(offset.x / dist * MAX_SPEED, offset.y / dist * MAX_SPEED))
    } else {
        None
    }
}
