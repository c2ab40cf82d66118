use std::collections::HashMap;
use tempo_core::{Millis, StopwatchId};

use crate::error::{FakeTimeError, Result};

/// Start instants of running stopwatches, keyed by identity token
///
/// Stopwatches give no destruction notification, so entries can outlive the
/// stopwatch they describe. Tokens are never dereferenced; stale entries are
/// harmless apart from memory and are dropped by `clear()` at teardown.
#[derive(Debug, Default)]
pub struct StopwatchRegistry {
    starts: HashMap<StopwatchId, Millis>,
}

impl StopwatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `now` as the start instant (overwrites a previous start)
    pub fn start(&mut self, id: StopwatchId, now: Millis) {
        self.starts.insert(id, now);
    }

    /// Time since start
    pub fn elapsed(&self, id: StopwatchId, now: Millis) -> Result<Millis> {
        self.starts
            .get(&id)
            .map(|start| now - start)
            .ok_or(FakeTimeError::InvalidStopwatch(id))
    }

    /// Elapsed time before the restart, then start again from `now`
    pub fn restart(&mut self, id: StopwatchId, now: Millis) -> Result<Millis> {
        let elapsed = self.elapsed(id, now)?;
        self.start(id, now);
        Ok(elapsed)
    }

    pub fn has_expired(&self, id: StopwatchId, timeout: Millis, now: Millis) -> Result<bool> {
        Ok(self.elapsed(id, now)? >= timeout)
    }

    /// Returns whether the stopwatch was running
    pub fn invalidate(&mut self, id: StopwatchId) -> bool {
        self.starts.remove(&id).is_some()
    }

    pub fn is_valid(&self, id: StopwatchId) -> bool {
        self.starts.contains_key(&id)
    }

    /// Pull every start instant later than `now` back to `now`
    ///
    /// Returns the number of entries moved.
    pub fn clamp_to(&mut self, now: Millis) -> usize {
        let mut clamped = 0;
        for start in self.starts.values_mut() {
            if *start > now {
                *start = now;
                clamped += 1;
            }
        }
        clamped
    }

    pub fn clear(&mut self) {
        self.starts.clear();
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: StopwatchId = StopwatchId(1);
    const B: StopwatchId = StopwatchId(2);

    #[test]
    fn test_elapsed_requires_start() {
        let registry = StopwatchRegistry::new();

        assert!(!registry.is_valid(A));
        assert!(matches!(
            registry.elapsed(A, 100),
            Err(FakeTimeError::InvalidStopwatch(id)) if id == A
        ));
    }

    #[test]
    fn test_restart_returns_previous_elapsed() {
        let mut registry = StopwatchRegistry::new();
        registry.start(A, 1_000);

        assert_eq!(registry.restart(A, 1_750).unwrap(), 750);
        assert_eq!(registry.elapsed(A, 1_750).unwrap(), 0);
        assert_eq!(registry.elapsed(A, 1_800).unwrap(), 50);
    }

    #[test]
    fn test_has_expired_boundary() {
        let mut registry = StopwatchRegistry::new();
        registry.start(A, 0);

        assert!(registry.has_expired(A, 500, 500).unwrap());
        assert!(!registry.has_expired(A, 501, 500).unwrap());
    }

    #[test]
    fn test_clamp_only_moves_future_starts() {
        let mut registry = StopwatchRegistry::new();
        registry.start(A, 100);
        registry.start(B, 5_000);

        assert_eq!(registry.clamp_to(1_000), 1);
        assert_eq!(registry.elapsed(A, 1_000).unwrap(), 900);
        assert_eq!(registry.elapsed(B, 1_000).unwrap(), 0);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let mut registry = StopwatchRegistry::new();
        registry.start(A, 0);
        registry.start(B, 0);

        assert!(registry.invalidate(A));
        assert!(!registry.invalidate(A));
        assert!(!registry.is_valid(A));
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert_eq!(registry.len(), 0);
    }
}
