use priority_queue::PriorityQueue;
use std::cmp::Ordering;
use tempo_core::{Millis, TimerId};

/// Position of an active timer in the firing order
///
/// Ordered so that the *greatest* key is the next to fire: earliest due time
/// first, then the timer armed first (lowest arm sequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueKey {
    pub due: Millis,
    pub seq: u64,
}

impl Ord for DueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-first out of a max priority queue
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for DueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Due instants of every active scheduled timer
///
/// Presence in the registry is what "active" means to the simulation.
pub struct TimerRegistry {
    queue: PriorityQueue<TimerId, DueKey>,
    next_seq: u64,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
            next_seq: 0,
        }
    }

    /// Activate (or re-arm) a timer to fire at `due`
    ///
    /// Re-arming overwrites the previous entry and takes a fresh arm sequence.
    pub fn arm(&mut self, id: TimerId, due: Millis) -> DueKey {
        let key = DueKey {
            due,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.push(id, key);
        key
    }

    /// Move an active timer's due instant, keeping its arm sequence
    pub fn advance(&mut self, id: TimerId, due: Millis) -> Option<DueKey> {
        let seq = self.queue.get_priority(&id)?.seq;
        let key = DueKey { due, seq };
        self.queue.change_priority(&id, key);
        Some(key)
    }

    /// Deactivate a timer, returning the due instant it had
    pub fn remove(&mut self, id: TimerId) -> Option<Millis> {
        self.queue.remove(&id).map(|(_, key)| key.due)
    }

    pub fn key(&self, id: TimerId) -> Option<DueKey> {
        self.queue.get_priority(&id).copied()
    }

    pub fn due_time(&self, id: TimerId) -> Option<Millis> {
        self.key(id).map(|key| key.due)
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.queue.get_priority(&id).is_some()
    }

    /// The next timer to fire and its due instant
    pub fn next_due(&self) -> Option<(TimerId, Millis)> {
        self.queue.peek().map(|(id, key)| (*id, key.due))
    }

    /// All active timers in firing order
    pub fn snapshot(&self) -> Vec<(TimerId, Millis)> {
        let mut entries: Vec<(TimerId, DueKey)> =
            self.queue.iter().map(|(id, key)| (*id, *key)).collect();
        // Greatest key fires first
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.into_iter().map(|(id, key)| (id, key.due)).collect()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_due_is_earliest() {
        let mut registry = TimerRegistry::new();
        registry.arm(TimerId(1), 300);
        registry.arm(TimerId(2), 100);
        registry.arm(TimerId(3), 200);

        assert_eq!(registry.next_due(), Some((TimerId(2), 100)));
    }

    #[test]
    fn test_equal_due_times_fire_in_arm_order() {
        let mut registry = TimerRegistry::new();
        registry.arm(TimerId(9), 500);
        registry.arm(TimerId(4), 500);
        registry.arm(TimerId(6), 500);

        let order: Vec<TimerId> = registry.snapshot().into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![TimerId(9), TimerId(4), TimerId(6)]);
        assert_eq!(registry.next_due(), Some((TimerId(9), 500)));
    }

    #[test]
    fn test_rearm_overwrites_and_resequences() {
        let mut registry = TimerRegistry::new();
        let first = registry.arm(TimerId(1), 100);
        registry.arm(TimerId(2), 100);
        let second = registry.arm(TimerId(1), 100);

        assert_eq!(registry.len(), 2);
        assert_ne!(first, second);
        // Timer 2 is now the earlier-armed of the two
        assert_eq!(registry.next_due(), Some((TimerId(2), 100)));
    }

    #[test]
    fn test_advance_keeps_sequence() {
        let mut registry = TimerRegistry::new();
        let armed = registry.arm(TimerId(1), 100);

        let moved = registry.advance(TimerId(1), 200).unwrap();
        assert_eq!(moved.seq, armed.seq);
        assert_eq!(registry.due_time(TimerId(1)), Some(200));

        assert!(registry.advance(TimerId(2), 200).is_none());
    }

    #[test]
    fn test_remove() {
        let mut registry = TimerRegistry::new();
        registry.arm(TimerId(1), 100);

        assert_eq!(registry.remove(TimerId(1)), Some(100));
        assert_eq!(registry.remove(TimerId(1)), None);
        assert!(!registry.contains(TimerId(1)));
        assert!(registry.next_due().is_none());
    }
}
