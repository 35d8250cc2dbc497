//! CounterAnimator: turns a target string into a scheduled animation session.

use crate::config::Config;
use crate::ids::{IdAllocator, SessionId};
use crate::scheduler::Scheduler;
use crate::session::{AnimationSession, TextSink};
use crate::target::TargetSpec;

/// Starts counter sessions. Sessions share nothing; animating the same element
/// twice runs two independent sessions and whichever ticks last wins the text.
#[derive(Debug)]
pub struct CounterAnimator {
    interval_ms: u32,
    steps: u32,
    guard_unparsable: bool,
    ids: IdAllocator,
}

impl CounterAnimator {
    pub fn new(cfg: &Config) -> Self {
        Self {
            interval_ms: cfg.interval_ms,
            steps: cfg.steps,
            guard_unparsable: cfg.guard_unparsable,
            ids: IdAllocator::new(),
        }
    }

    /// Parse `raw_text` and register a session writing into `sink`.
    /// Fire-and-forget: the session cancels its own timer once the target text
    /// has been written.
    pub fn animate<S>(&mut self, scheduler: &mut dyn Scheduler, sink: S, raw_text: &str) -> SessionId
    where
        S: TextSink + 'static,
    {
        let id = self.ids.alloc_session();
        let spec = TargetSpec::parse(raw_text);
        log::debug!(
            "counter {:?}: animating to {:?} ({:?}, magnitude {})",
            id,
            spec.raw_text,
            spec.format,
            spec.magnitude
        );
        if !spec.is_number() && !self.guard_unparsable {
            log::warn!(
                "counter {:?}: target {:?} is not a number and will never finish",
                id,
                spec.raw_text
            );
        }

        let mut session = AnimationSession::new(id, spec, self.steps, self.guard_unparsable, sink);
        scheduler.set_interval(self.interval_ms, Box::new(move || session.tick()));
        id
    }
}
