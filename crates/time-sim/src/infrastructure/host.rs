//! Host framework primitives
//!
//! The "real" side of the framework the engine simulates: the timer objects
//! application code owns and the deferred-invocation queue of the host event
//! loop. Writes through these types bypass simulation entirely.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use tempo_core::{TimerId, TimerKind};

use crate::application::FakeTime;

/// Timeout notification handler attached to a timer
///
/// Receives the engine so it can start, stop or reschedule timers itself.
pub type TimeoutHandler = Box<dyn FnMut(TimerId, &mut FakeTime)>;

/// Work queued for the next event-loop pass
pub type DeferredCall = Box<dyn FnOnce(&mut FakeTime)>;

/// A scheduled-timer object as the framework stores it
pub struct TimerObject {
    pub interval_ms: i32,
    pub kind: TimerKind,
    /// Created for a fire-and-forget single shot; disposed once it can no
    /// longer fire
    pub transient: bool,
    handler: Option<TimeoutHandler>,
}

impl fmt::Debug for TimerObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerObject")
            .field("interval_ms", &self.interval_ms)
            .field("kind", &self.kind)
            .field("transient", &self.transient)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// Live timer objects, keyed by identity
#[derive(Debug, Default)]
pub struct TimerTable {
    objects: HashMap<TimerId, TimerObject>,
    next_id: u64,
}

impl TimerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, interval_ms: i32, kind: TimerKind) -> TimerId {
        self.insert(interval_ms, kind, false)
    }

    /// Create a timer the engine disposes of itself
    pub fn create_transient(&mut self, interval_ms: i32) -> TimerId {
        self.insert(interval_ms, TimerKind::SingleShot, true)
    }

    fn insert(&mut self, interval_ms: i32, kind: TimerKind, transient: bool) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.objects.insert(
            id,
            TimerObject {
                interval_ms,
                kind,
                transient,
                handler: None,
            },
        );
        id
    }

    pub fn is_transient(&self, id: TimerId) -> bool {
        self.objects.get(&id).is_some_and(|object| object.transient)
    }

    /// Drop every transient timer, returning how many were dropped
    pub fn remove_transient(&mut self) -> usize {
        let before = self.objects.len();
        self.objects.retain(|_, object| !object.transient);
        before - self.objects.len()
    }

    pub fn get(&self, id: TimerId) -> Option<&TimerObject> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn remove(&mut self, id: TimerId) -> Option<TimerObject> {
        self.objects.remove(&id)
    }

    /// Raw interval write; no rescheduling happens here
    pub fn set_interval_raw(&mut self, id: TimerId, interval_ms: i32) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.interval_ms = interval_ms;
                true
            }
            None => false,
        }
    }

    pub fn set_kind(&mut self, id: TimerId, kind: TimerKind) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.kind = kind;
                true
            }
            None => false,
        }
    }

    pub fn set_handler(&mut self, id: TimerId, handler: TimeoutHandler) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.handler = Some(handler);
                true
            }
            None => false,
        }
    }

    /// Detach the handler for the duration of a delivery
    pub fn take_handler(&mut self, id: TimerId) -> Option<TimeoutHandler> {
        self.objects.get_mut(&id)?.handler.take()
    }

    /// Reattach a handler after delivery
    ///
    /// Dropped if the timer was destroyed or a new handler was installed
    /// while it was detached.
    pub fn restore_handler(&mut self, id: TimerId, handler: TimeoutHandler) {
        if let Some(object) = self.objects.get_mut(&id) {
            if object.handler.is_none() {
                object.handler = Some(handler);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }
}

/// A unit of deferred work
pub enum Deferred {
    /// Deliver a timeout to a zero-interval single-shot timer
    Timeout(TimerId),
    /// Run arbitrary queued work
    Call(DeferredCall),
}

/// The host event loop's deferred-invocation queue
///
/// Work is drained in rounds: a round covers everything queued before it
/// began, so work queued while a round runs waits for the next one.
#[derive(Default)]
pub struct DeferredQueue {
    tasks: VecDeque<(u64, Deferred)>,
    next_seq: u64,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: Deferred) {
        self.tasks.push_back((self.next_seq, task));
        self.next_seq += 1;
    }

    /// Marker for the end of the round starting now
    pub fn round_end(&self) -> u64 {
        self.next_seq
    }

    /// Next task queued before `round_end`
    pub fn pop_before(&mut self, round_end: u64) -> Option<Deferred> {
        match self.tasks.front() {
            Some((seq, _)) if *seq < round_end => self.tasks.pop_front().map(|(_, task)| task),
            _ => None,
        }
    }

    pub fn has_timeout(&self, id: TimerId) -> bool {
        self.tasks
            .iter()
            .any(|(_, task)| matches!(task, Deferred::Timeout(pending) if *pending == id))
    }

    /// Drop any pending timeout delivery for `id`
    pub fn cancel_timeout(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks
            .retain(|(_, task)| !matches!(task, Deferred::Timeout(pending) if *pending == id));
        self.tasks.len() != before
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_handler() -> TimeoutHandler {
        Box::new(|_: TimerId, _: &mut FakeTime| {})
    }

    #[test]
    fn test_create_and_raw_writes() {
        let mut table = TimerTable::new();
        let id = table.create(1000, TimerKind::Repeating);

        assert!(table.set_interval_raw(id, 250));
        assert!(table.set_kind(id, TimerKind::SingleShot));

        let object = table.get(id).unwrap();
        assert_eq!(object.interval_ms, 250);
        assert_eq!(object.kind, TimerKind::SingleShot);

        table.remove(id);
        assert!(!table.set_interval_raw(id, 10));
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_remove_transient_keeps_owned_timers() {
        let mut table = TimerTable::new();
        let owned = table.create(100, TimerKind::Repeating);
        let transient = table.create_transient(100);

        assert!(table.is_transient(transient));
        assert!(!table.is_transient(owned));
        assert_eq!(table.get(transient).unwrap().kind, TimerKind::SingleShot);

        assert_eq!(table.remove_transient(), 1);
        assert!(table.contains(owned));
        assert!(!table.contains(transient));
    }

    #[test]
    fn test_handler_take_and_restore() {
        let mut table = TimerTable::new();
        let id = table.create(0, TimerKind::SingleShot);
        table.set_handler(id, noop_handler());

        let handler = table.take_handler(id).unwrap();
        assert!(table.take_handler(id).is_none());

        table.restore_handler(id, handler);
        assert!(table.take_handler(id).is_some());
    }

    #[test]
    fn test_restore_keeps_replacement_handler() {
        let mut table = TimerTable::new();
        let id = table.create(0, TimerKind::SingleShot);
        table.set_handler(id, noop_handler());

        let original = table.take_handler(id).unwrap();
        table.set_handler(id, noop_handler());
        table.restore_handler(id, original);

        // Still exactly one handler attached
        assert!(table.take_handler(id).is_some());
        assert!(table.take_handler(id).is_none());
    }

    #[test]
    fn test_deferred_rounds() {
        let mut queue = DeferredQueue::new();
        queue.push(Deferred::Timeout(TimerId(1)));
        queue.push(Deferred::Timeout(TimerId(2)));

        let round_end = queue.round_end();
        queue.push(Deferred::Timeout(TimerId(3)));

        assert!(matches!(queue.pop_before(round_end), Some(Deferred::Timeout(TimerId(1)))));
        assert!(matches!(queue.pop_before(round_end), Some(Deferred::Timeout(TimerId(2)))));
        assert!(queue.pop_before(round_end).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_cancel_timeout() {
        let mut queue = DeferredQueue::new();
        queue.push(Deferred::Timeout(TimerId(1)));
        queue.push(Deferred::Call(Box::new(|_: &mut FakeTime| {})));

        assert!(queue.has_timeout(TimerId(1)));
        assert!(queue.cancel_timeout(TimerId(1)));
        assert!(!queue.has_timeout(TimerId(1)));
        assert!(!queue.cancel_timeout(TimerId(1)));
        assert_eq!(queue.len(), 1);
    }
}
