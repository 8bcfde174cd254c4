//! Animation System - explicitly ticked periodic tasks and tweens.
//!
//! Nothing here runs in the background. A [`Timers`] registry holds
//! periodic tasks with their interval and elapsed time, and something
//! outside (the application's input loop, or a test) advances it with
//! [`Timers::advance`]. A task is cancelled through its [`TaskHandle`],
//! which components hand to `ComponentBase::own_task` so destruction
//! cancels it.
//!
//! # Example
//!
//! ```ignore
//! use spark_cells::state::Timers;
//! use std::time::Duration;
//!
//! let timers = Timers::new();
//! let blink = timers.every(Duration::from_millis(250), || toggle_cursor());
//!
//! timers.advance(Duration::from_millis(500)); // fires twice
//! blink.cancel();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::warn;

// =============================================================================
// TASK REGISTRY
// =============================================================================

type TaskCallback = Rc<RefCell<dyn FnMut()>>;

struct Task {
    id: u64,
    interval: Duration,
    elapsed: Duration,
    callback: TaskCallback,
}

type TaskList = RefCell<Vec<Task>>;

/// Registry of periodic tasks. Clones share the same registry.
#[derive(Clone)]
pub struct Timers {
    tasks: Rc<TaskList>,
    next_id: Rc<Cell<u64>>,
}

/// Cancels a task registered with [`Timers::every`].
#[derive(Clone)]
pub struct TaskHandle {
    id: u64,
    tasks: Weak<TaskList>,
}

impl Timers {
    pub fn new() -> Self {
        Self {
            tasks: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Run `callback` once per `interval` of advanced time.
    ///
    /// A zero interval would fire forever; it is rejected with an inert
    /// handle.
    pub fn every(&self, interval: Duration, callback: impl FnMut() + 'static) -> TaskHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        if interval.is_zero() {
            warn!(task = id, "ignoring periodic task with zero interval");
            return TaskHandle { id, tasks: Weak::new() };
        }

        let callback: TaskCallback = Rc::new(RefCell::new(callback));
        self.tasks.borrow_mut().push(Task {
            id,
            interval,
            elapsed: Duration::ZERO,
            callback,
        });

        TaskHandle {
            id,
            tasks: Rc::downgrade(&self.tasks),
        }
    }

    /// Advance the clock by `dt`, firing each task once per whole interval.
    ///
    /// Returns the number of callbacks run.
    pub fn advance(&self, dt: Duration) -> usize {
        // Collect due work first; callbacks may cancel or schedule tasks.
        let due: Vec<(u64, u32, TaskCallback)> = {
            let mut tasks = self.tasks.borrow_mut();
            tasks
                .iter_mut()
                .filter_map(|task| {
                    task.elapsed += dt;
                    let mut fires = 0u32;
                    while task.elapsed >= task.interval {
                        task.elapsed -= task.interval;
                        fires += 1;
                    }
                    (fires > 0).then(|| (task.id, fires, task.callback.clone()))
                })
                .collect()
        };

        let mut ran = 0;
        for (id, fires, callback) in due {
            for _ in 0..fires {
                if !self.contains(id) {
                    break;
                }
                (&mut *callback.borrow_mut())();
                ran += 1;
            }
        }
        ran
    }

    /// Number of active tasks.
    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: u64) -> bool {
        self.tasks.borrow().iter().any(|t| t.id == id)
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskHandle {
    /// Remove the task. Safe to call more than once.
    pub fn cancel(&self) {
        if let Some(tasks) = self.tasks.upgrade() {
            tasks.borrow_mut().retain(|t| t.id != self.id);
        }
    }

    /// True while the task is still registered.
    pub fn is_active(&self) -> bool {
        self.tasks
            .upgrade()
            .is_some_and(|tasks| tasks.borrow().iter().any(|t| t.id == self.id))
    }
}

// =============================================================================
// TWEEN
// =============================================================================

/// Linear interpolation from one value to another over a fixed duration.
///
/// Progress bars and similar widgets keep one of these and advance it from
/// a periodic task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: Duration,
    total: Duration,
}

impl Tween {
    pub fn new(from: f32, to: f32, total: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            total,
        }
    }

    /// Advance by `dt` (saturating at the end) and return the new value.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.total);
        self.value()
    }

    /// Fraction complete in `0.0..=1.0`. A zero-length tween is complete.
    pub fn progress(&self) -> f32 {
        if self.total.is_zero() {
            return 1.0;
        }
        self.elapsed.as_secs_f32() / self.total.as_secs_f32()
    }

    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.progress()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total
    }

    /// Start a new tween from the current value toward `to`.
    pub fn retarget(&mut self, to: f32, total: Duration) {
        *self = Self::new(self.value(), to, total);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        (count, move || count_clone.set(count_clone.get() + 1))
    }

    #[test]
    fn test_task_fires_per_interval() {
        let timers = Timers::new();
        let (count, tick) = counter();
        let _task = timers.every(Duration::from_millis(100), tick);

        timers.advance(Duration::from_millis(50));
        assert_eq!(count.get(), 0);

        timers.advance(Duration::from_millis(50));
        assert_eq!(count.get(), 1);

        assert_eq!(timers.advance(Duration::from_millis(250)), 2);
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_cancel_stops_task() {
        let timers = Timers::new();
        let (count, tick) = counter();
        let task = timers.every(Duration::from_millis(10), tick);
        assert!(task.is_active());

        task.cancel();
        task.cancel();
        assert!(!task.is_active());
        assert!(timers.is_empty());

        timers.advance(Duration::from_secs(1));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_task_can_cancel_itself() {
        let timers = Timers::new();
        let count = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<TaskHandle>>> = Rc::new(RefCell::new(None));

        let count_clone = count.clone();
        let slot_clone = slot.clone();
        let handle = timers.every(Duration::from_millis(10), move || {
            count_clone.set(count_clone.get() + 1);
            if let Some(task) = slot_clone.borrow().as_ref() {
                task.cancel();
            }
        });
        *slot.borrow_mut() = Some(handle);

        timers.advance(Duration::from_millis(100));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_zero_interval_is_inert() {
        let timers = Timers::new();
        let (count, tick) = counter();
        let task = timers.every(Duration::ZERO, tick);
        assert!(!task.is_active());
        timers.advance(Duration::from_secs(1));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_handle_outliving_registry() {
        let task = {
            let timers = Timers::new();
            timers.every(Duration::from_millis(10), || {})
        };
        assert!(!task.is_active());
        task.cancel();
    }

    #[test]
    fn test_tween_progress() {
        let mut tween = Tween::new(0.0, 100.0, Duration::from_millis(200));
        assert_eq!(tween.advance(Duration::from_millis(50)), 25.0);
        assert!(!tween.is_finished());

        assert_eq!(tween.advance(Duration::from_secs(5)), 100.0);
        assert!(tween.is_finished());

        tween.retarget(50.0, Duration::from_millis(100));
        assert_eq!(tween.value(), 100.0);
        assert_eq!(tween.advance(Duration::from_millis(100)), 50.0);
    }

    #[test]
    fn test_zero_length_tween_is_done() {
        let tween = Tween::new(1.0, 2.0, Duration::ZERO);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 2.0);
    }
}
