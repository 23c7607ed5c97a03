//! Cancellable repeating task capability

use std::{collections::BTreeMap, fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Identity of one scheduled countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// Something that can fire `task` every `period` until cancelled
///
/// Implementations deliver ticks back to the controller as
/// `Command::Tick(task)`. After `cancel` returns, ticks for that task may
/// still be in flight; the controller discards them by id.
pub trait RepeatingScheduler {
    fn schedule(&mut self, task: TaskId, period: Duration);
    fn cancel(&mut self, task: TaskId);
}

#[derive(Debug, Clone, Copy)]
struct ManualTask {
    period: Duration,
    next_due: Duration,
}

/// Fake clock scheduler. Time only moves when `advance` is called.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    tasks: BTreeMap<TaskId, ManualTask>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn active_tasks(&self) -> Vec<TaskId> {
        self.tasks.keys().copied().collect()
    }

    pub fn is_active(&self, task: TaskId) -> bool {
        self.tasks.contains_key(&task)
    }

    /// Move the clock forward and return every tick that came due, in order
    pub fn advance(&mut self, by: Duration) -> Vec<TaskId> {
        let target = self.now + by;
        let mut fired = Vec::new();
        for (id, task) in self.tasks.iter_mut() {
            if task.period.is_zero() {
                continue;
            }
            while task.next_due <= target {
                fired.push((task.next_due, *id));
                task.next_due += task.period;
            }
        }
        self.now = target;
        fired.sort();
        fired.into_iter().map(|(_, id)| id).collect()
    }
}

impl RepeatingScheduler for ManualScheduler {
    fn schedule(&mut self, task: TaskId, period: Duration) {
        self.tasks.insert(
            task,
            ManualTask {
                period,
                next_due: self.now + period,
            },
        );
    }

    fn cancel(&mut self, task: TaskId) {
        self.tasks.remove(&task);
    }
}
