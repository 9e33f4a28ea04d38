use std::time::Duration;

use tracing::{debug, info, trace};

use crate::input::{InputId, InputState};
use crate::physics::{self, Bounds, Position, Vec2, Velocity, CLOCK_PERIOD, MOTION_PERIOD};
use crate::schedule::{Scheduler, Task};
use crate::session::{SessionConfig, SessionState};

/// Owns one game session and the periodic tasks that drive it
#[derive(Debug)]
pub struct Game {
    pub session_config: SessionConfig,
    pub session_state: SessionState,
    input: InputState,
    scheduler: Scheduler,
    redraw: bool,
}

impl Game {
    pub fn new(session_config: SessionConfig) -> Self {
        Self {
            session_state: SessionState::new(session_config.bounds),
            session_config,
            input: InputState::default(),
            scheduler: Scheduler::new(),
            redraw: true,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.session_config.bounds
    }

    pub fn position(&self) -> Position {
        self.session_state.position
    }

    pub fn velocity(&self) -> Velocity {
        self.session_state.velocity
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.session_state.timer.seconds()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.session_state.game_started
    }

    pub fn can_start(&self) -> bool {
        !self.session_state.game_started
    }

    /// Begin the motion loop. Returns false if a session is already running.
    pub fn start(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        self.session_state.game_started = true;
        self.scheduler.schedule(Task::Motion, MOTION_PERIOD);
        info!(at = ?self.scheduler.now(), "game started");
        true
    }

    /// Cancel both periodic tasks and put everything back to the initial state
    pub fn reset(&mut self) {
        self.scheduler.cancel(Task::Motion);
        self.scheduler.cancel(Task::Clock);
        self.session_state = SessionState::new(self.bounds());
        self.input.clear();
        self.redraw = true;
        info!(at = ?self.scheduler.now(), "game reset");
    }

    pub fn on_key_down(&mut self, id: InputId) {
        let fresh = self.input.press(id, self.scheduler.now());
        if fresh {
            debug!(input = %id, "pressed");
            self.on_motion_tick();
        }
    }

    pub fn on_key_up(&mut self, id: InputId) {
        if self.input.release(id) {
            debug!(input = %id, "released");
        }
    }

    pub fn on_touch_start(&mut self, at: Position) {
        if !self.is_running() {
            return;
        }
        self.input.press(InputId::Touch, self.scheduler.now());
        self.steer_toward(at);
    }

    pub fn on_touch_move(&mut self, at: Position) {
        if !self.is_running() {
            return;
        }
        self.steer_toward(at);
    }

    pub fn on_touch_end(&mut self) {
        self.input.release(InputId::Touch);
    }

    fn steer_toward(&mut self, at: Position) {
        if let Some(v) = physics::touch_velocity(self.session_state.position, at) {
            debug!(x = at.x, y = at.y, vx = v.x, vy = v.y, "touch steering");
            self.session_state.velocity = v;
        }
        self.start_timer_on_movement();
    }

    /// One step of the motion loop: steer, integrate, record.
    pub fn on_motion_tick(&mut self) {
        if !self.is_running() {
            return;
        }

        if let Some(hold) = self.session_config.key_hold {
            for id in self.input.expire(self.scheduler.now(), hold) {
                debug!(input = %id, "hold expired");
            }
        }

        let state = &mut self.session_state;
        state.velocity = physics::steer(state.velocity, &self.input);
        state.position = physics::integrate(state.position, state.velocity, self.session_config.bounds);
        state.trail.push(state.position);
        trace!(
            x = state.position.x,
            y = state.position.y,
            vx = state.velocity.x,
            vy = state.velocity.y,
            "motion tick"
        );

        self.redraw = true;
        self.start_timer_on_movement();
    }

    pub fn on_clock_tick(&mut self) {
        self.session_state.timer.on_second();
        self.redraw = true;
    }

    fn start_timer_on_movement(&mut self) {
        if self.session_state.velocity == Vec2::ZERO || !self.session_state.timer.start() {
            return;
        }
        self.scheduler.schedule(Task::Clock, CLOCK_PERIOD);
        info!(at = ?self.scheduler.now(), "timer started");
    }

    /// Advance virtual time by `dt`, running every task that falls due.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        while let Some(task) = self.scheduler.pop_due(until) {
            match task {
                Task::Motion => self.on_motion_tick(),
                Task::Clock => self.on_clock_tick(),
            }
        }
        self.scheduler.settle(until);
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }
}
