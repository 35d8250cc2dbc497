//! wasm-bindgen interface wiring portfolio counters to the page.
//!
//! `new PortfolioCounters(config?)` installs console logging, the global error
//! log and the stats watcher against the current document; `teardown()` undoes
//! all of it.

use std::cell::RefCell;
use std::rc::Rc;

use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use portfolio_counter_core::{Config, CounterAnimator, Scheduler, StatsWatcher};

pub mod diagnostics;
pub mod dom;
pub mod logger;
pub mod observer;
pub mod timer;

use diagnostics::GlobalErrorLog;
use dom::{DomStats, ElementSink};
use observer::StatsObserver;
use timer::IntervalScheduler;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn js_error(context: &str, err: JsValue) -> JsError {
    JsError::new(&format!("{context}: {err:?}"))
}

#[wasm_bindgen]
pub struct PortfolioCounters {
    scheduler: Rc<RefCell<IntervalScheduler>>,
    animator: CounterAnimator,
    observer: Option<StatsObserver>,
    diagnostics: Option<GlobalErrorLog>,
}

#[wasm_bindgen]
impl PortfolioCounters {
    /// Set up counters for the current page. Pass a JSON config object or
    /// undefined/null for defaults.
    /// Example:
    ///   new PortfolioCounters({ threshold: 0.5, container_selector: "#stats" })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PortfolioCounters, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        cfg.validate()
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;
        if let Ok(level) = cfg.level_filter() {
            logger::init(level);
        }

        let window = web_sys::window().ok_or_else(|| JsError::new("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("window has no document"))?;

        let diagnostics =
            GlobalErrorLog::install(&window).map_err(|e| js_error("error listeners", e))?;
        let scheduler = Rc::new(RefCell::new(IntervalScheduler::new(window)));

        let container = document
            .query_selector(&cfg.container_selector)
            .map_err(|e| js_error("container selector", e))?
            .map(|root| DomStats::new(root, &cfg));
        let observer = match StatsWatcher::watch(container, &cfg) {
            Some(watcher) => Some(
                StatsObserver::install(watcher, Rc::clone(&scheduler), cfg.threshold)
                    .map_err(|e| js_error("intersection observer", e))?,
            ),
            None => None,
        };

        log::info!("portfolio counters initialised");
        Ok(PortfolioCounters {
            scheduler,
            animator: CounterAnimator::new(&cfg),
            observer,
            diagnostics: Some(diagnostics),
        })
    }

    /// Animate `element` toward `target` (e.g. "2.5K", "120+", "42").
    /// Returns the session id.
    #[wasm_bindgen(js_name = animate_counter)]
    pub fn animate_counter(&mut self, element: web_sys::Element, target: String) -> u32 {
        let mut scheduler = self.scheduler.borrow_mut();
        self.animator
            .animate(&mut *scheduler, ElementSink::new(element), &target)
            .0
    }

    /// True while the stats trigger has not fired. False when the page has no
    /// stats container or after teardown.
    #[wasm_bindgen(getter)]
    pub fn armed(&self) -> bool {
        self.observer.as_ref().is_some_and(StatsObserver::is_armed)
    }

    /// Counter animations still ticking.
    #[wasm_bindgen(js_name = active_counters)]
    pub fn active_counters(&self) -> u32 {
        u32::try_from(self.scheduler.borrow().active()).unwrap_or(u32::MAX)
    }

    /// Interval callbacks the page still holds, finished ones included until
    /// the scheduler releases them.
    #[wasm_bindgen(js_name = retained_callbacks)]
    pub fn retained_callbacks(&self) -> u32 {
        u32::try_from(self.scheduler.borrow().retained_callbacks()).unwrap_or(u32::MAX)
    }

    /// Disconnect the observer, remove the global listeners and stop any
    /// counter still running. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.observer = None;
        self.diagnostics = None;
        self.scheduler.borrow_mut().clear_all();
        log::debug!("portfolio counters torn down");
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
