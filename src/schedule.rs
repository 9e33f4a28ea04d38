use std::time::Duration;

/// Periodic jobs driven by the game controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Task {
    Motion,
    Clock,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Periodic {
    task: Task,
    period: Duration,
    next_due: Duration,
}

/// Virtual-time replacement for interval timers.
///
/// Time only moves when the owner calls [`Scheduler::pop_due`] or
/// [`Scheduler::settle`], so tests can step it deterministically.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    tasks: Vec<Periodic>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm `task` to fire every `period`, first at `now + period`.
    /// Replaces any existing schedule for the same task.
    pub fn schedule(&mut self, task: Task, period: Duration) {
        self.cancel(task);
        self.tasks.push(Periodic {
            task,
            period,
            next_due: self.now + period,
        });
    }

    /// Returns true if the task was armed.
    pub fn cancel(&mut self, task: Task) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|p| p.task != task);
        self.tasks.len() != before
    }

    pub fn is_scheduled(&self, task: Task) -> bool {
        self.tasks.iter().any(|p| p.task == task)
    }

    /// Pop the earliest firing due at or before `until`.
    ///
    /// Moves `now` to the firing's due time and re-arms the task one period
    /// later. Ties go to the task declared first in [`Task`].
    pub fn pop_due(&mut self, until: Duration) -> Option<Task> {
        let next = self
            .tasks
            .iter_mut()
            .filter(|p| p.next_due <= until)
            .min_by_key(|p| (p.next_due, p.task))?;

        let task = next.task;
        self.now = self.now.max(next.next_due);
        next.next_due += next.period.max(Duration::from_nanos(1));
        Some(task)
    }

    /// Move `now` forward to `until` once every due firing has been popped.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler, until: Duration) -> Vec<(Task, Duration)> {
        let mut fired = Vec::new();
        while let Some(task) = s.pop_due(until) {
            fired.push((task, s.now()));
        }
        s.settle(until);
        fired
    }

    #[test]
    fn fires_at_each_period() {
        let mut s = Scheduler::new();
        s.schedule(Task::Motion, Duration::from_millis(20));

        let fired = drain(&mut s, Duration::from_millis(65));
        assert_eq!(
            fired,
            vec![
                (Task::Motion, Duration::from_millis(20)),
                (Task::Motion, Duration::from_millis(40)),
                (Task::Motion, Duration::from_millis(60)),
            ]
        );
        assert_eq!(s.now(), Duration::from_millis(65));
    }

    #[test]
    fn first_firing_is_relative_to_schedule_time() {
        let mut s = Scheduler::new();
        s.settle(Duration::from_millis(15));
        s.schedule(Task::Clock, Duration::from_millis(1000));

        assert!(drain(&mut s, Duration::from_millis(1014)).is_empty());
        assert_eq!(
            drain(&mut s, Duration::from_millis(1015)),
            vec![(Task::Clock, Duration::from_millis(1015))]
        );
    }

    #[test]
    fn ties_run_motion_first() {
        let mut s = Scheduler::new();
        s.schedule(Task::Clock, Duration::from_millis(40));
        s.schedule(Task::Motion, Duration::from_millis(20));

        let fired: Vec<Task> = drain(&mut s, Duration::from_millis(40))
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(fired, vec![Task::Motion, Task::Motion, Task::Clock]);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut s = Scheduler::new();
        s.schedule(Task::Motion, Duration::from_millis(20));
        assert!(s.is_scheduled(Task::Motion));
        assert!(s.cancel(Task::Motion));
        assert!(!s.cancel(Task::Motion));
        assert!(!s.is_scheduled(Task::Motion));

        assert!(drain(&mut s, Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn reschedule_replaces_previous_timing() {
        let mut s = Scheduler::new();
        s.schedule(Task::Motion, Duration::from_millis(20));
        s.settle(Duration::from_millis(10));
        s.schedule(Task::Motion, Duration::from_millis(20));

        assert_eq!(
            drain(&mut s, Duration::from_millis(30)),
            vec![(Task::Motion, Duration::from_millis(30))]
        );
    }
}
