use std::time::{Duration, Instant};

/// Identifies one scheduled repeating task. A new id is issued per `schedule`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy)]
struct ActiveTask {
    id: TaskId,
    period: Duration,
    next_due: Instant,
}

/// Cancellable repeating timer driven by explicit clock readings.
///
/// Holds at most one active task, so scheduling always replaces whatever was
/// running before. `poll` fires at most once per call and never catches up
/// on missed periods.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    active: Option<ActiveTask>,
    issued: u64,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any active task and starts a new one, first due at `now + period`.
    pub fn schedule(&mut self, period: Duration, now: Instant) -> TaskId {
        self.issued += 1;
        let id = TaskId(self.issued);
        self.active = Some(ActiveTask {
            id,
            period,
            next_due: now + period,
        });
        id
    }

    /// Cancels the active task, returning its id.
    pub fn cancel(&mut self) -> Option<TaskId> {
        self.active.take().map(|task| task.id)
    }

    /// Returns the active task id when it is due at `now`, and re-arms it.
    pub fn poll(&mut self, now: Instant) -> Option<TaskId> {
        let task = self.active.as_mut()?;
        if now < task.next_due {
            return None;
        }

        let next_due = task.next_due + task.period;
        task.next_due = if next_due > now {
            next_due
        } else {
            now + task.period
        };
        Some(task.id)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn active_task(&self) -> Option<TaskId> {
        self.active.map(|task| task.id)
    }

    #[must_use]
    pub fn period(&self) -> Option<Duration> {
        self.active.map(|task| task.period)
    }

    /// Time left until the active task is due.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.active
            .map(|task| task.next_due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TickScheduler;

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn fires_once_per_period() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new();
        let id = scheduler.schedule(PERIOD, start);

        assert_eq!(scheduler.poll(start + Duration::from_millis(99)), None);
        assert_eq!(scheduler.poll(start + PERIOD), Some(id));
        assert_eq!(scheduler.poll(start + PERIOD), None);
        assert_eq!(scheduler.poll(start + PERIOD * 2), Some(id));
    }

    #[test]
    fn late_poll_fires_once_and_reanchors() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.schedule(PERIOD, start);

        let late = start + PERIOD * 5;
        assert!(scheduler.poll(late).is_some());
        assert!(scheduler.poll(late).is_none());
        assert_eq!(scheduler.time_until_due(late), Some(PERIOD));
    }

    #[test]
    fn rescheduling_replaces_the_active_task() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new();
        let first = scheduler.schedule(PERIOD, start);
        let second = scheduler.schedule(PERIOD * 2, start);

        assert_ne!(first, second);
        assert_eq!(scheduler.active_task(), Some(second));
        assert_eq!(scheduler.poll(start + PERIOD), None);
        assert_eq!(scheduler.poll(start + PERIOD * 2), Some(second));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new();
        let id = scheduler.schedule(PERIOD, start);

        assert_eq!(scheduler.cancel(), Some(id));
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.poll(start + PERIOD * 3), None);
        assert_eq!(scheduler.cancel(), None);
    }
}
