//! A single pending delayed action, polled against `Instant`s.

use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending<A>
{
    handle: TimerHandle,
    due: Instant,
    action: A,
}

/// Holds at most one scheduled action. Scheduling replaces (and so cancels)
/// whatever was pending.
#[derive(Debug)]
pub struct DelaySlot<A>
{
    pending: Option<Pending<A>>,
    next_handle: u64,
}

impl<A> DelaySlot<A>
{
    pub fn new() -> Self
    {
        Self {
            pending: None,
            next_handle: 0,
        }
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, action: A) -> TimerHandle
    {
        self.cancel();
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        trace!(handle = handle.0, delay_ms = delay.as_millis() as u64, "timer scheduled");
        self.pending = Some(Pending {
            handle,
            due: now + delay,
            action,
        });
        handle
    }

    pub fn cancel(&mut self) -> Option<TimerHandle>
    {
        let pending = self.pending.take()?;
        trace!(handle = pending.handle.0, "timer cancelled");
        Some(pending.handle)
    }

    pub fn handle(&self) -> Option<TimerHandle>
    {
        self.pending.as_ref().map(|pending| pending.handle)
    }

    pub fn due_at(&self) -> Option<Instant>
    {
        self.pending.as_ref().map(|pending| pending.due)
    }

    pub fn action(&self) -> Option<&A>
    {
        self.pending.as_ref().map(|pending| &pending.action)
    }

    /// Take the action if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<A>
    {
        if self.pending.as_ref().is_some_and(|pending| now >= pending.due) {
            return self.pending.take().map(|pending| pending.action);
        }
        None
    }

    /// Take the action for an external timer callback, but only if `handle`
    /// is still the one pending. Stale handles get nothing.
    pub fn take_if_current(&mut self, handle: TimerHandle) -> Option<A>
    {
        if self.handle() == Some(handle) {
            return self.pending.take().map(|pending| pending.action);
        }
        trace!(handle = handle.0, "ignoring stale timer");
        None
    }
}

impl<A> Default for DelaySlot<A>
{
    fn default() -> Self
    {
        Self::new()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn fires_only_after_deadline()
    {
        let start = Instant::now();
        let mut slot = DelaySlot::new();
        slot.schedule(start, Duration::from_secs(2), "reset");
        assert_eq!(slot.take_due(start + Duration::from_millis(1999)), None);
        assert_eq!(slot.take_due(start + Duration::from_secs(2)), Some("reset"));
        assert_eq!(slot.take_due(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn scheduling_replaces_previous()
    {
        let start = Instant::now();
        let mut slot = DelaySlot::new();
        let first = slot.schedule(start, Duration::from_secs(1), 1);
        let second = slot.schedule(start, Duration::from_secs(3), 2);
        assert_ne!(first, second);
        assert_eq!(slot.take_due(start + Duration::from_secs(2)), None);
        assert_eq!(slot.take_if_current(first), None);
        assert_eq!(slot.take_if_current(second), Some(2));
    }

    #[test]
    fn cancel_clears_pending()
    {
        let start = Instant::now();
        let mut slot = DelaySlot::new();
        let handle = slot.schedule(start, Duration::from_secs(1), ());
        assert_eq!(slot.cancel(), Some(handle));
        assert_eq!(slot.handle(), None);
        assert_eq!(slot.take_due(start + Duration::from_secs(10)), None);
        assert_eq!(slot.cancel(), None);
    }
}
