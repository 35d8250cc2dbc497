//! IntersectionObserver glue for the stats watcher.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use portfolio_counter_core::{Intersection, StatsWatcher};

use crate::dom::DomStats;
use crate::timer::IntervalScheduler;

/// Observes the stats container until its watcher fires, then unobserves it.
/// Dropping the handle disconnects the observer.
pub struct StatsObserver {
    observer: IntersectionObserver,
    watcher: Rc<RefCell<StatsWatcher<DomStats>>>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

fn to_intersection(entry: &IntersectionObserverEntry) -> Intersection {
    Intersection {
        is_intersecting: entry.is_intersecting(),
        ratio: entry.intersection_ratio(),
    }
}

impl StatsObserver {
    pub fn install(
        watcher: StatsWatcher<DomStats>,
        scheduler: Rc<RefCell<IntervalScheduler>>,
        threshold: f64,
    ) -> Result<Self, JsValue> {
        let target: Element = watcher.container().root().clone();
        let watcher = Rc::new(RefCell::new(watcher));

        let callback = {
            let watcher = Rc::clone(&watcher);
            Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, observer: IntersectionObserver| {
                    let batch: Vec<Intersection> = entries
                        .iter()
                        .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
                        .map(|e| to_intersection(&e))
                        .collect();
                    let mut watcher = watcher.borrow_mut();
                    let fired = {
                        let mut scheduler = scheduler.borrow_mut();
                        watcher.on_intersection(&batch, &mut *scheduler)
                    };
                    if fired.is_some() {
                        observer.unobserve(watcher.container().root());
                    }
                },
            )
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        observer.observe(&target);
        log::debug!("watching stats container at threshold {threshold}");

        Ok(Self {
            observer,
            watcher,
            _callback: callback,
        })
    }

    pub fn is_armed(&self) -> bool {
        self.watcher.borrow().is_armed()
    }
}

impl Drop for StatsObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
