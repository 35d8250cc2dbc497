//! Identifiers and simple allocators for sessions and scheduled tasks.

/// One running (or finished) counter animation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(pub u32);

/// Handle of a repeating task registered with a [`Scheduler`](crate::Scheduler).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskId(pub u32);

/// Monotonic allocator for SessionId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_session: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_session(&mut self) -> SessionId {
        let id = SessionId(self.next_session);
        self.next_session = self.next_session.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_session(), SessionId(0));
        assert_eq!(alloc.alloc_session(), SessionId(1));
        assert_eq!(alloc.alloc_session(), SessionId(2));
    }
}
