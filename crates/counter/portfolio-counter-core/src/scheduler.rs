//! Repeating-timer abstraction.
//!
//! Sessions never talk to a clock directly. A host registers them with a
//! [`Scheduler`]: the browser adapter forwards to `setInterval`, while
//! [`VirtualScheduler`] steps a simulated clock so animations can be driven
//! deterministically.

use std::ops::ControlFlow;

use crate::ids::TaskId;

/// Body of a repeating task. Returning `Break` cancels the task.
pub type IntervalTask = Box<dyn FnMut() -> ControlFlow<()>>;

pub trait Scheduler {
    /// Run `task` every `period_ms` until it returns `Break` or is cleared.
    fn set_interval(&mut self, period_ms: u32, task: IntervalTask) -> TaskId;

    /// Cancel a task. Unknown or already finished ids are ignored.
    fn clear_interval(&mut self, id: TaskId);

    /// Number of tasks still scheduled.
    fn active(&self) -> usize;
}

struct Slot {
    id: TaskId,
    period_ms: u64,
    next_due: u64,
    task: Option<IntervalTask>,
}

/// Simulated clock in whole milliseconds.
///
/// Ticks fire in due-time order; ties go to the task registered first. Ticks of
/// a single task are strictly sequential.
#[derive(Default)]
pub struct VirtualScheduler {
    now_ms: u64,
    next_id: u32,
    slots: Vec<Slot>,
}

impl std::fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualScheduler")
            .field("now_ms", &self.now_ms)
            .field("active", &self.slots.len())
            .finish()
    }
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock forward by `ms`, running every tick due on the way.
    /// Returns the number of ticks executed.
    pub fn advance(&mut self, ms: u64) -> usize {
        let target = self.now_ms.saturating_add(ms);
        let mut ran = 0;
        while let Some(idx) = self.next_due_before(target) {
            let slot = &mut self.slots[idx];
            self.now_ms = slot.next_due;
            let Some(mut task) = slot.task.take() else {
                self.slots.remove(idx);
                continue;
            };
            ran += 1;
            match task() {
                ControlFlow::Continue(()) => {
                    let slot = &mut self.slots[idx];
                    slot.next_due += slot.period_ms;
                    slot.task = Some(task);
                }
                ControlFlow::Break(()) => {
                    self.slots.remove(idx);
                }
            }
        }
        self.now_ms = target;
        ran
    }

    /// Advance until nothing is scheduled or `limit_ms` elapsed.
    /// Returns the simulated time spent.
    pub fn run_until_idle(&mut self, limit_ms: u64) -> u64 {
        let start = self.now_ms;
        let deadline = start.saturating_add(limit_ms);
        while !self.slots.is_empty() {
            let Some(due) = self.slots.iter().map(|s| s.next_due).min() else {
                break;
            };
            if due > deadline {
                self.now_ms = deadline;
                break;
            }
            self.advance(due - self.now_ms);
        }
        self.now_ms - start
    }

    fn next_due_before(&self, target: u64) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.next_due <= target)
            .min_by_key(|(_, s)| (s.next_due, s.id.0))
            .map(|(i, _)| i)
    }
}

impl Scheduler for VirtualScheduler {
    fn set_interval(&mut self, period_ms: u32, task: IntervalTask) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        // Browsers clamp a zero delay to at least one millisecond.
        let period_ms = u64::from(period_ms.max(1));
        self.slots.push(Slot {
            id,
            period_ms,
            next_due: self.now_ms + period_ms,
            task: Some(task),
        });
        id
    }

    fn clear_interval(&mut self, id: TaskId) {
        self.slots.retain(|s| s.id != id);
    }

    fn active(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_task(hits: &Rc<Cell<u32>>, stop_after: u32) -> IntervalTask {
        let hits = Rc::clone(hits);
        Box::new(move || {
            hits.set(hits.get() + 1);
            if hits.get() >= stop_after {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    #[test]
    fn ticks_follow_period() {
        let mut sched = VirtualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        sched.set_interval(50, counting_task(&hits, u32::MAX));

        assert_eq!(sched.advance(49), 0);
        assert_eq!(sched.advance(1), 1);
        assert_eq!(sched.advance(200), 4);
        assert_eq!(hits.get(), 5);
        assert_eq!(sched.now_ms(), 250);
    }

    #[test]
    fn break_removes_task() {
        let mut sched = VirtualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        sched.set_interval(10, counting_task(&hits, 3));

        let spent = sched.run_until_idle(10_000);
        assert_eq!(spent, 30);
        assert_eq!(hits.get(), 3);
        assert_eq!(sched.active(), 0);
    }

    #[test]
    fn clear_interval_cancels() {
        let mut sched = VirtualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let id = sched.set_interval(10, counting_task(&hits, u32::MAX));
        sched.advance(25);
        sched.clear_interval(id);
        sched.advance(100);
        assert_eq!(hits.get(), 2);
        // Clearing twice is harmless.
        sched.clear_interval(id);
    }

    #[test]
    fn run_until_idle_respects_limit() {
        let mut sched = VirtualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        sched.set_interval(50, counting_task(&hits, u32::MAX));
        assert_eq!(sched.run_until_idle(1_000), 1_000);
        assert_eq!(hits.get(), 20);
        assert_eq!(sched.active(), 1);
    }
}
