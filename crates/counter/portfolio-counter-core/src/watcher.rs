//! StatsWatcher: wires the visibility trigger to the counter animator.
//!
//! When the watched container first becomes visible enough, every counter
//! inside it is started once and the trigger disarms.

use crate::animator::CounterAnimator;
use crate::config::Config;
use crate::ids::SessionId;
use crate::scheduler::Scheduler;
use crate::session::TextSink;
use crate::trigger::{Intersection, VisibilityTrigger};

/// A counter found inside the container: where to write, and the literal
/// target read from its attribute (if the attribute exists).
#[derive(Clone, Debug)]
pub struct CounterElement<S> {
    pub sink: S,
    pub target: Option<String>,
}

/// Source of counter elements, enumerated at the moment the trigger fires.
pub trait CounterContainer {
    type Sink: TextSink + 'static;

    fn counters(&self) -> Vec<CounterElement<Self::Sink>>;
}

#[derive(Debug)]
pub struct StatsWatcher<C: CounterContainer> {
    container: C,
    trigger: VisibilityTrigger,
    animator: CounterAnimator,
}

impl<C: CounterContainer> StatsWatcher<C> {
    /// Install a watcher. A missing container yields `None`: nothing is ever
    /// observed and no counter ever starts.
    pub fn watch(container: Option<C>, cfg: &Config) -> Option<Self> {
        let Some(container) = container else {
            log::debug!(
                "no `{}` container on this page; counters stay idle",
                cfg.container_selector
            );
            return None;
        };
        Some(Self {
            container,
            trigger: VisibilityTrigger::new(cfg.threshold),
            animator: CounterAnimator::new(cfg),
        })
    }

    /// Handle one intersection batch. Returns the sessions started when this
    /// batch fired the trigger, `None` otherwise.
    pub fn on_intersection(
        &mut self,
        entries: &[Intersection],
        scheduler: &mut dyn Scheduler,
    ) -> Option<Vec<SessionId>> {
        if !self.trigger.observe(entries) {
            return None;
        }

        let mut started = Vec::new();
        for counter in self.container.counters() {
            match counter.target {
                Some(target) => {
                    started.push(self.animator.animate(scheduler, counter.sink, &target));
                }
                None => log::warn!("counter element without a target attribute; skipped"),
            }
        }
        log::info!("stats visible: started {} counter(s)", started.len());
        Some(started)
    }

    pub fn is_armed(&self) -> bool {
        self.trigger.is_armed()
    }

    pub fn trigger(&self) -> &VisibilityTrigger {
        &self.trigger
    }

    pub fn container(&self) -> &C {
        &self.container
    }
}
