//! Interval-driven task table for the cooperative main loop.
//!
//! Each [`TimedTask`] remembers when it last ran. [`TaskTable::poll`] stamps
//! and returns every task whose interval has elapsed, in registration order.
//! A task that missed several periods runs once, not once per missed period,
//! and its new period is measured from the poll instant (drift is accepted).

use crate::time::{TimeInstant, has_elapsed};
use heapless::Vec;

/// Errors from task table lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskError {
    /// No task with the requested key is registered.
    UnknownTask,
}

impl core::fmt::Display for TaskError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TaskError::UnknownTask => write!(f, "no task registered under that key"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TaskError {}

/// A periodic behavior's timing record.
#[derive(Debug, Clone, Copy)]
pub struct TimedTask<I: TimeInstant> {
    last_run: I,
    interval_ms: u32,
}

impl<I: TimeInstant> TimedTask<I> {
    /// Creates a task whose first period starts at `now`.
    pub fn new(interval_ms: u32, now: I) -> Self {
        Self {
            last_run: now,
            interval_ms,
        }
    }

    /// True if the interval has elapsed since the last run.
    #[inline]
    pub fn is_due(&self, now: I) -> bool {
        has_elapsed(now, self.last_run, self.interval_ms)
    }

    /// Stamps the task and returns true if it is due.
    pub fn poll(&mut self, now: I) -> bool {
        if self.is_due(now) {
            self.last_run = now;
            true
        } else {
            false
        }
    }

    /// Restarts the current period from `now`.
    pub fn reset(&mut self, now: I) {
        self.last_run = now;
    }

    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn last_run(&self) -> I {
        self.last_run
    }
}

/// Tasks that ran during one poll, in dispatch order.
pub type DueTasks<K, const N: usize> = Vec<K, N>;

/// A fixed, ordered set of keyed tasks.
///
/// # Type Parameters
/// * `K` - Task key (usually a small `Copy` enum)
/// * `I` - Time instant type
/// * `N` - Number of tasks
pub struct TaskTable<K, I: TimeInstant, const N: usize> {
    entries: [(K, TimedTask<I>); N],
}

impl<K, I, const N: usize> TaskTable<K, I, N>
where
    K: Copy + PartialEq,
    I: TimeInstant,
{
    /// Builds the table from `(key, interval_ms)` pairs, all starting at `now`.
    ///
    /// Dispatch order is the order of `tasks`. Keys are expected to be
    /// unique; lookups by key act on the first match.
    pub fn new(tasks: [(K, u32); N], now: I) -> Self {
        Self {
            entries: tasks.map(|(key, interval)| (key, TimedTask::new(interval, now))),
        }
    }

    /// Stamps and returns every due task.
    pub fn poll(&mut self, now: I) -> DueTasks<K, N> {
        let mut due = Vec::new();
        for (key, task) in self.entries.iter_mut() {
            if task.poll(now) {
                // Capacity equals the number of entries
                let _ = due.push(*key);
            }
        }
        due
    }

    /// Returns the timing record for `key`.
    pub fn get(&self, key: K) -> Option<&TimedTask<I>> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, task)| task)
    }

    fn get_mut(&mut self, key: K) -> Result<&mut TimedTask<I>, TaskError> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, task)| task)
            .ok_or(TaskError::UnknownTask)
    }

    /// Changes a task's interval. The current period keeps its start.
    pub fn set_interval(&mut self, key: K, interval_ms: u32) -> Result<(), TaskError> {
        self.get_mut(key)?.set_interval(interval_ms);
        Ok(())
    }

    /// Restarts a task's period from `now`.
    pub fn reset(&mut self, key: K, now: I) -> Result<(), TaskError> {
        self.get_mut(key)?.reset(now);
        Ok(())
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestInstant;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Key {
        Fast,
        Slow,
        Every,
    }

    fn table() -> TaskTable<Key, TestInstant, 3> {
        TaskTable::new(
            [(Key::Fast, 10), (Key::Slow, 100), (Key::Every, 0)],
            TestInstant(0),
        )
    }

    #[test]
    fn task_runs_only_once_interval_has_elapsed() {
        let mut task = TimedTask::new(10, TestInstant(0));
        assert!(!task.poll(TestInstant(9)));
        assert!(task.poll(TestInstant(10)));
        assert!(!task.poll(TestInstant(10)));
        assert!(!task.poll(TestInstant(19)));
        assert!(task.poll(TestInstant(20)));
    }

    #[test]
    fn run_stamps_now_not_the_scheduled_instant() {
        let mut task = TimedTask::new(10, TestInstant(0));
        assert!(task.poll(TestInstant(13)));
        assert_eq!(task.last_run(), TestInstant(13));
        // Next period is measured from 13, so 20 is too early
        assert!(!task.poll(TestInstant(20)));
        assert!(task.poll(TestInstant(23)));
    }

    #[test]
    fn missed_periods_produce_a_single_catch_up_run() {
        let mut table = table();
        let due = table.poll(TestInstant(1000));
        assert_eq!(due.as_slice(), &[Key::Fast, Key::Slow, Key::Every]);

        let due = table.poll(TestInstant(1000));
        assert_eq!(due.as_slice(), &[Key::Every]);
    }

    #[test]
    fn poll_preserves_registration_order() {
        let mut table = table();
        let due = table.poll(TestInstant(10));
        assert_eq!(due.as_slice(), &[Key::Fast, Key::Every]);
    }

    #[test]
    fn zero_interval_runs_every_poll() {
        let mut table = table();
        for t in 0..5 {
            assert!(table.poll(TestInstant(t)).contains(&Key::Every));
        }
    }

    #[test]
    fn set_interval_and_reset_apply_to_the_keyed_task() {
        let mut table = table();
        table.set_interval(Key::Slow, 20).unwrap();
        assert_eq!(table.get(Key::Slow).unwrap().interval_ms(), 20);

        table.reset(Key::Slow, TestInstant(15)).unwrap();
        assert!(!table.poll(TestInstant(30)).contains(&Key::Slow));
        assert!(table.poll(TestInstant(35)).contains(&Key::Slow));
    }

    #[test]
    fn unknown_key_is_reported() {
        let mut table: TaskTable<Key, TestInstant, 1> =
            TaskTable::new([(Key::Fast, 10)], TestInstant(0));
        assert_eq!(table.set_interval(Key::Slow, 5), Err(TaskError::UnknownTask));
        assert_eq!(table.reset(Key::Slow, TestInstant(0)), Err(TaskError::UnknownTask));
        assert!(table.get(Key::Slow).is_none());
        assert_eq!(table.len(), 1);
    }
}
