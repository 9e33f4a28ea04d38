/// Whole seconds elapsed since the first movement of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElapsedTimer {
    state: TimerState,
    seconds: u64,
}

impl ElapsedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    /// Idle -> Running. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    /// Count one second; ignored while idle.
    pub fn on_second(&mut self) {
        if self.is_running() {
            self.seconds += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_counts_only_while_running() {
        let mut t = ElapsedTimer::new();
        t.on_second();
        assert_eq!(t.seconds(), 0);
        assert_eq!(t.state(), TimerState::Idle);

        assert!(t.start());
        t.on_second();
        t.on_second();
        assert_eq!(t.seconds(), 2);
    }

    #[test]
    fn start_is_idempotent() {
        let mut t = ElapsedTimer::new();
        assert!(t.start());
        t.on_second();
        assert!(!t.start());
        assert_eq!(t.seconds(), 1);
    }
}
