//! Animation sessions: one per counter element.
//!
//! The per-tick computation lives in [`next_frame`], a pure function, so the
//! interpolation can be checked without any timer. [`AnimationSession`] adds the
//! mutable state and the exclusively owned output sink on top of it.

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::format::render;
use crate::ids::SessionId;
use crate::target::TargetSpec;

/// Destination of rendered counter text (a DOM text node in the browser).
pub trait TextSink {
    fn set_text(&mut self, text: &str);
}

/// Sink that keeps every write. Clones share the same log, so a test can hand
/// one clone to a session and inspect the other.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    writes: Rc<RefCell<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }
}

impl TextSink for RecordingSink {
    fn set_text(&mut self, text: &str) {
        self.writes.borrow_mut().push(text.to_string());
    }
}

/// Result of one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    /// Set on the tick that reached the target; `text` is then the raw target.
    pub finished: bool,
}

/// Advance `current` by `step` and render the result.
///
/// Once the new value reaches the magnitude the frame carries the raw target
/// text verbatim, whatever drift the accumulated steps picked up. A `NaN`
/// magnitude never compares as reached.
pub fn next_frame(spec: &TargetSpec, current: f64, step: f64) -> (f64, Frame) {
    let next = current + step;
    let frame = if next >= spec.magnitude {
        Frame {
            text: spec.raw_text.clone(),
            finished: true,
        }
    } else {
        Frame {
            text: render(spec.format, next),
            finished: false,
        }
    };
    (next, frame)
}

/// Mutable state of one running counter.
#[derive(Debug)]
pub struct AnimationSession<S: TextSink> {
    id: SessionId,
    spec: TargetSpec,
    current: f64,
    step: f64,
    ticks: u32,
    finished: bool,
    guard_unparsable: bool,
    sink: S,
}

impl<S: TextSink> AnimationSession<S> {
    pub fn new(id: SessionId, spec: TargetSpec, steps: u32, guard_unparsable: bool, sink: S) -> Self {
        let step = spec.magnitude / f64::from(steps.max(1));
        Self {
            id,
            spec,
            current: 0.0,
            step,
            ticks: 0,
            finished: false,
            guard_unparsable,
            sink,
        }
    }

    /// Run one tick, writing its frame to the sink.
    /// Returns `Break` once the target text has been written.
    pub fn tick(&mut self) -> ControlFlow<()> {
        if self.finished {
            return ControlFlow::Break(());
        }
        self.ticks += 1;

        let frame = if self.guard_unparsable && !self.spec.is_number() {
            log::warn!(
                "counter {:?}: target {:?} is not a number; showing it as-is",
                self.id,
                self.spec.raw_text
            );
            Frame {
                text: self.spec.raw_text.clone(),
                finished: true,
            }
        } else {
            let (next, frame) = next_frame(&self.spec, self.current, self.step);
            self.current = next;
            frame
        };

        self.sink.set_text(&frame.text);
        if frame.finished {
            self.finished = true;
            log::debug!(
                "counter {:?} reached {:?} after {} ticks",
                self.id,
                self.spec.raw_text,
                self.ticks
            );
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_frame_is_pure() {
        let spec = TargetSpec::parse("120+");
        let (next, frame) = next_frame(&spec, 10.0, 2.0);
        assert_eq!(next, 12.0);
        assert_eq!(frame.text, "12+");
        assert!(!frame.finished);

        let (_, last) = next_frame(&spec, 118.5, 2.0);
        assert_eq!(last.text, "120+");
        assert!(last.finished);
    }

    #[test]
    fn zero_target_finishes_on_first_tick() {
        let sink = RecordingSink::new();
        let mut session =
            AnimationSession::new(SessionId(0), TargetSpec::parse("0"), 60, true, sink.clone());
        assert_eq!(session.tick(), ControlFlow::Break(()));
        assert_eq!(sink.writes(), vec!["0".to_string()]);
        // Finished sessions stay silent.
        assert_eq!(session.tick(), ControlFlow::Break(()));
        assert_eq!(sink.writes().len(), 1);
        assert_eq!(session.ticks(), 1);
    }

    #[test]
    fn unguarded_nan_never_finishes() {
        let sink = RecordingSink::new();
        let mut session =
            AnimationSession::new(SessionId(0), TargetSpec::parse("n/a"), 60, false, sink.clone());
        for _ in 0..500 {
            assert_eq!(session.tick(), ControlFlow::Continue(()));
        }
        assert_eq!(session.ticks(), 500);
        assert_eq!(sink.last().as_deref(), Some("NaN"));
        assert!(!session.is_finished());
    }

    #[test]
    fn guarded_nan_shows_raw_text() {
        let sink = RecordingSink::new();
        let mut session =
            AnimationSession::new(SessionId(3), TargetSpec::parse("n/a"), 60, true, sink.clone());
        assert_eq!(session.tick(), ControlFlow::Break(()));
        assert_eq!(sink.writes(), vec!["n/a".to_string()]);
    }
}
