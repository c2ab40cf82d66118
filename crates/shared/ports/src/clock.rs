use tempo_core::{Millis, Timestamp, timestamp_from_millis};

use crate::error::{ClockError, ClockResult};

/// Port for the real (unfaked) time source
///
/// The engine never fakes this clock; it is the collaborator it falls back on
/// whenever faking is inactive, and the reference the idle reconciler uses to
/// measure real time passing. Implementations:
/// - Wall-clock time for normal test runs
/// - Hand-driven time for deterministic unit tests
/// - Runtime-instant time for async drivers
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch according to this clock
    fn now_ms(&self) -> Millis;

    /// Current time as a UTC timestamp
    fn now(&self) -> ClockResult<Timestamp> {
        let ms = self.now_ms();
        timestamp_from_millis(ms).ok_or(ClockError::OutOfRange(ms))
    }

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Frozen(Millis);

    impl Clock for Frozen {
        fn now_ms(&self) -> Millis {
            self.0
        }
    }

    #[test]
    fn test_default_now_conversion() {
        let clock = Frozen(1_000);
        assert_eq!(clock.now().unwrap().timestamp_millis(), 1_000);
        assert_eq!(clock.name(), "Clock");
    }

    #[test]
    fn test_out_of_range() {
        let clock = Frozen(i64::MAX);
        assert_eq!(clock.now(), Err(ClockError::OutOfRange(i64::MAX)));
    }
}
