use chrono::Utc;
use tempo_core::Millis;
use tempo_ports::Clock;

/// Real system clock
///
/// This simply returns the current wall-clock time. It is the real-time
/// collaborator used outside of deterministic unit tests.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        Utc::now().timestamp_millis()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
