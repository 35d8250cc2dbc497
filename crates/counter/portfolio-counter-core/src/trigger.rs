//! One-shot visibility trigger.
//!
//! Explicit two-state machine: `Armed` until the first qualifying intersection,
//! then `Disarmed` for good. Scrolling away and back never fires again.

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TriggerState {
    Armed,
    Disarmed,
}

/// Host-neutral view of an intersection observer entry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    pub is_intersecting: bool,
    /// Visible fraction of the observed element, in `[0, 1]`.
    pub ratio: f64,
}

impl Intersection {
    pub fn visible(ratio: f64) -> Self {
        Self {
            is_intersecting: ratio > 0.0,
            ratio,
        }
    }

    pub fn hidden() -> Self {
        Self {
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct VisibilityTrigger {
    threshold: f64,
    state: TriggerState,
}

impl VisibilityTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            state: TriggerState::Armed,
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == TriggerState::Armed
    }

    pub fn qualifies(&self, entry: &Intersection) -> bool {
        entry.is_intersecting && entry.ratio >= self.threshold
    }

    /// Feed one observer batch. Returns `true` exactly once per trigger: on the
    /// first batch holding a qualifying entry, which also disarms it.
    pub fn observe(&mut self, entries: &[Intersection]) -> bool {
        if self.state == TriggerState::Disarmed {
            return false;
        }
        if entries.iter().any(|e| self.qualifies(e)) {
            self.state = TriggerState::Disarmed;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_then_disarms() {
        let mut trigger = VisibilityTrigger::new(0.3);
        assert!(trigger.is_armed());
        assert!(!trigger.observe(&[Intersection::visible(0.1)]));
        assert!(trigger.observe(&[Intersection::visible(0.3)]));
        assert_eq!(trigger.state(), TriggerState::Disarmed);

        assert!(!trigger.observe(&[Intersection::hidden()]));
        assert!(!trigger.observe(&[Intersection::visible(1.0)]));
    }

    #[test]
    fn batch_with_several_hits_fires_once() {
        let mut trigger = VisibilityTrigger::new(0.3);
        let batch = [Intersection::visible(0.5), Intersection::visible(0.9)];
        assert!(trigger.observe(&batch));
        assert!(!trigger.observe(&batch));
    }

    #[test]
    fn ratio_without_intersecting_flag_does_not_fire() {
        let mut trigger = VisibilityTrigger::new(0.0);
        let entry = Intersection {
            is_intersecting: false,
            ratio: 0.0,
        };
        assert!(!trigger.observe(&[entry]));
        assert!(trigger.is_armed());
    }
}
