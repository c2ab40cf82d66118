use chrono::Utc;
use tempo_core::Millis;
use tempo_ports::Clock;
use tokio::time::Instant;

/// Real clock derived from tokio's monotonic instants
///
/// Anchored to an epoch offset at construction and advanced by the elapsed
/// runtime time since then. Under a paused tokio runtime this clock moves only
/// as the runtime auto-advances, which makes real-time waits deterministic.
pub struct TokioClock {
    origin: Instant,
    origin_ms: Millis,
}

impl TokioClock {
    /// Anchor to the current wall-clock time
    pub fn new() -> Self {
        Self::starting_at(Utc::now().timestamp_millis())
    }

    /// Anchor to an explicit epoch offset
    pub fn starting_at(origin_ms: Millis) -> Self {
        Self {
            origin: Instant::now(),
            origin_ms,
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now_ms(&self) -> Millis {
        self.origin_ms + self.origin.elapsed().as_millis() as Millis
    }

    fn name(&self) -> &str {
        "TokioClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_follows_paused_runtime() {
        let clock = TokioClock::starting_at(10_000);
        assert_eq!(clock.now_ms(), 10_000);

        tokio::time::sleep(std::time::Duration::from_millis(250)).await;

        assert_eq!(clock.now_ms(), 10_250);
    }
}
