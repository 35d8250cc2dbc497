//! [`Scheduler`] backed by `window.setInterval`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use portfolio_counter_core::{IntervalTask, Scheduler, TaskId};

struct LiveInterval {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

#[derive(Default)]
struct Registry {
    next_id: u32,
    live: HashMap<u32, LiveInterval>,
    /// Tasks that cancelled themselves. Their closures are dropped by the next
    /// scheduler call or the next tick of any other interval, never from
    /// inside their own invocation.
    finished: Vec<u32>,
}

impl Registry {
    fn reap(&mut self) {
        for id in self.finished.drain(..) {
            self.live.remove(&id);
        }
    }
}

pub struct IntervalScheduler {
    window: Window,
    registry: Rc<RefCell<Registry>>,
}

impl IntervalScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            registry: Rc::new(RefCell::new(Registry::default())),
        }
    }

    /// Interval closures still held, including finished ones not yet released.
    pub fn retained_callbacks(&self) -> usize {
        self.registry.borrow().live.len()
    }

    /// Cancel every interval and release its closure.
    pub fn clear_all(&mut self) {
        let mut reg = self.registry.borrow_mut();
        for (_, live) in reg.live.drain() {
            self.window.clear_interval_with_handle(live.handle);
        }
        reg.finished.clear();
    }
}

impl Scheduler for IntervalScheduler {
    fn set_interval(&mut self, period_ms: u32, mut task: IntervalTask) -> TaskId {
        let mut reg = self.registry.borrow_mut();
        reg.reap();
        let id = reg.next_id;
        reg.next_id = reg.next_id.wrapping_add(1);

        let handle = Rc::new(Cell::new(0));
        let callback = {
            let handle = Rc::clone(&handle);
            let registry = Rc::clone(&self.registry);
            let window = self.window.clone();
            Closure::<dyn FnMut()>::new(move || {
                // This task is still live, so reaping cannot drop the running closure.
                registry.borrow_mut().reap();
                if let ControlFlow::Break(()) = task() {
                    window.clear_interval_with_handle(handle.get());
                    registry.borrow_mut().finished.push(id);
                }
            })
        };

        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                timeout,
            ) {
            Ok(h) => {
                handle.set(h);
                reg.live.insert(
                    id,
                    LiveInterval {
                        handle: h,
                        _callback: callback,
                    },
                );
            }
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
        TaskId(id)
    }

    fn clear_interval(&mut self, id: TaskId) {
        let mut reg = self.registry.borrow_mut();
        reg.reap();
        if let Some(live) = reg.live.remove(&id.0) {
            self.window.clear_interval_with_handle(live.handle);
        }
    }

    fn active(&self) -> usize {
        let mut reg = self.registry.borrow_mut();
        reg.reap();
        reg.live.len()
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.clear_all();
    }
}
