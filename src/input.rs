use std::collections::BTreeMap;
use std::time::Duration;

use crossterm::event::KeyCode;

use crate::physics::Direction;

/// Inputs the game reacts to. Declaration order is the order in which held
/// directions are applied during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum_macros::Display)]
pub enum InputId {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    S,
    A,
    D,
    Touch,
}

impl InputId {
    /// Map a terminal key to a steering input. Letter keys are matched
    /// lowercase only.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up => Some(InputId::ArrowUp),
            KeyCode::Down => Some(InputId::ArrowDown),
            KeyCode::Left => Some(InputId::ArrowLeft),
            KeyCode::Right => Some(InputId::ArrowRight),
            KeyCode::Char('w') => Some(InputId::W),
            KeyCode::Char('s') => Some(InputId::S),
            KeyCode::Char('a') => Some(InputId::A),
            KeyCode::Char('d') => Some(InputId::D),
            _ => None,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            InputId::ArrowUp | InputId::W => Some(Direction::Up),
            InputId::ArrowDown | InputId::S => Some(Direction::Down),
            InputId::ArrowLeft | InputId::A => Some(Direction::Left),
            InputId::ArrowRight | InputId::D => Some(Direction::Right),
            InputId::Touch => None,
        }
    }
}

/// Currently pressed inputs, with the virtual time of each one's latest press
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: BTreeMap<InputId, Duration>,
}

impl InputState {
    /// Mark `id` as pressed at `at`. Returns true if it was not already held.
    pub fn press(&mut self, id: InputId, at: Duration) -> bool {
        self.pressed.insert(id, at).is_none()
    }

    /// Returns true if `id` was held.
    pub fn release(&mut self, id: InputId) -> bool {
        self.pressed.remove(&id).is_some()
    }

    pub fn is_pressed(&self, id: InputId) -> bool {
        self.pressed.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn held_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.pressed.keys().filter_map(|id| id.direction())
    }

    /// Release keys whose latest press is at least `hold` old.
    ///
    /// Used for terminals that never report key releases. Touch is released
    /// explicitly by touch-end and is never expired here.
    pub fn expire(&mut self, now: Duration, hold: Duration) -> Vec<InputId> {
        let stale: Vec<InputId> = self
            .pressed
            .iter()
            .filter(|(id, at)| **id != InputId::Touch && now.saturating_sub(**at) >= hold)
            .map(|(id, _)| *id)
            .collect();

        for id in &stale {
            self.pressed.remove(id);
        }
        stale
    }
}
