//! Deferred execution for the outbound queue. One task runs per tick.

use std::{cell::RefCell, collections::VecDeque};

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Runs `task` on a later tick, never inside this call.
    fn schedule(&self, task: Task);
}

/// Keeps tasks until the owner advances the clock; for hosts that drive
/// their own loop and for tests.
#[derive(Default)]
pub struct ManualScheduler {
    tasks: RefCell<VecDeque<Task>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Runs the oldest task. Returns false when nothing was waiting.
    pub fn run_next(&self) -> bool {
        let next = self.tasks.borrow_mut().pop_front();
        match next {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Ticks until no task is left, including ones scheduled along the way.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

/// Spawns each task onto the current tokio `LocalSet`.
///
/// Must be used from inside `LocalSet::run_until` or `LocalSet::block_on`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTaskScheduler;

impl Scheduler for LocalTaskScheduler {
    fn schedule(&self, task: Task) {
        tokio::task::spawn_local(async move { task() });
    }
}
