//! Elapsed-time stopwatches over the simulated clock

use log::trace;
use tempo_core::{Millis, StopwatchId};

use super::FakeTime;
use crate::error::{FakeTimeError, Result};

impl FakeTime {
    /// Allocate a fresh, not-yet-started stopwatch token
    pub fn create_stopwatch(&mut self) -> StopwatchId {
        self.allocate_stopwatch()
    }

    /// Start (or restart) measuring from the current time
    pub fn start_stopwatch(&mut self, id: StopwatchId) {
        let now = self.current_time();
        trace!("{} started at {}ms", id, now);
        self.stopwatches.start(id, now);
    }

    /// Time since the stopwatch was started
    pub fn elapsed(&self, id: StopwatchId) -> Result<Millis> {
        self.stopwatches.elapsed(id, self.current_time())
    }

    /// Restart the stopwatch, returning the time elapsed before the restart
    pub fn restart_stopwatch(&mut self, id: StopwatchId) -> Result<Millis> {
        let now = self.current_time();
        self.stopwatches.restart(id, now)
    }

    /// Stop tracking the stopwatch; returns whether it was running
    pub fn invalidate_stopwatch(&mut self, id: StopwatchId) -> bool {
        self.stopwatches.invalidate(id)
    }

    pub fn is_stopwatch_valid(&self, id: StopwatchId) -> bool {
        self.stopwatches.is_valid(id)
    }

    pub fn has_expired(&self, id: StopwatchId, timeout_ms: Millis) -> Result<bool> {
        self.stopwatches
            .has_expired(id, timeout_ms, self.current_time())
    }

    pub fn stopwatch_msecs_to(&self, _id: StopwatchId, _other: StopwatchId) -> Result<Millis> {
        Err(FakeTimeError::Unsupported("msecs_to"))
    }

    pub fn stopwatch_secs_to(&self, _id: StopwatchId, _other: StopwatchId) -> Result<i64> {
        Err(FakeTimeError::Unsupported("secs_to"))
    }

    pub fn stopwatch_nsecs_elapsed(&self, _id: StopwatchId) -> Result<i64> {
        Err(FakeTimeError::Unsupported("nsecs_elapsed"))
    }

    pub fn stopwatch_msecs_since_reference(&self, _id: StopwatchId) -> Result<Millis> {
        Err(FakeTimeError::Unsupported("msecs_since_reference"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_clock::ManualClock;

    const REAL: Millis = 1_700_000_000_000;

    #[test]
    fn test_elapsed_follows_faked_time() {
        let mut time = FakeTime::new(ManualClock::new(REAL));
        time.set_millis(10_000).unwrap();

        let watch = time.create_stopwatch();
        time.start_stopwatch(watch);
        time.fast_forward(1_500);

        assert_eq!(time.elapsed(watch).unwrap(), 1_500);
        assert!(time.has_expired(watch, 1_500).unwrap());
        assert!(!time.has_expired(watch, 1_501).unwrap());
    }

    #[test]
    fn test_unstarted_stopwatch_is_invalid() {
        let mut time = FakeTime::new(ManualClock::new(REAL));
        let watch = time.create_stopwatch();

        assert!(!time.is_stopwatch_valid(watch));
        assert!(matches!(
            time.elapsed(watch),
            Err(FakeTimeError::InvalidStopwatch(_))
        ));
    }

    #[test]
    fn test_tokens_are_distinct() {
        let mut time = FakeTime::new(ManualClock::new(REAL));
        assert_ne!(time.create_stopwatch(), time.create_stopwatch());
    }

    #[test]
    fn test_restart_and_invalidate() {
        let mut time = FakeTime::new(ManualClock::new(REAL));
        time.set_millis(50_000).unwrap();

        let watch = time.create_stopwatch();
        time.start_stopwatch(watch);
        time.fast_forward(400);

        assert_eq!(time.restart_stopwatch(watch).unwrap(), 400);
        assert_eq!(time.elapsed(watch).unwrap(), 0);

        assert!(time.invalidate_stopwatch(watch));
        assert!(!time.is_stopwatch_valid(watch));
    }

    #[test]
    fn test_unsupported_operations() {
        let mut time = FakeTime::new(ManualClock::new(REAL));
        let a = time.create_stopwatch();
        let b = time.create_stopwatch();

        assert!(matches!(
            time.stopwatch_msecs_to(a, b),
            Err(FakeTimeError::Unsupported("msecs_to"))
        ));
        assert!(time.stopwatch_secs_to(a, b).is_err());
        assert!(time.stopwatch_nsecs_elapsed(a).is_err());
        assert!(time.stopwatch_msecs_since_reference(a).is_err());
    }
}
