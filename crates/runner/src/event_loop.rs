use log::debug;
use std::time::Duration;
use tempo_clock::TokioClock;
use tempo_sim::{FakeTime, FakeTimeConfig};
use tokio::time::{Instant, sleep};

use crate::error::{Result, RunnerError};

/// Pumps a `FakeTime` context while real time passes
pub struct EventLoop {
    fake: FakeTime,
    /// Real time slept between event-loop passes
    poll_interval: Duration,
}

impl EventLoop {
    pub fn new(fake: FakeTime) -> Self {
        Self {
            fake,
            poll_interval: Duration::from_millis(1),
        }
    }

    /// Build a context whose real clock is the tokio runtime's clock
    pub fn on_tokio_clock(config: FakeTimeConfig) -> Result<Self> {
        let fake = FakeTime::builder()
            .real_clock(TokioClock::new())
            .config(config)
            .build()?;
        Ok(Self::new(fake))
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(Duration::from_millis(1));
        self
    }

    pub fn fake_time(&self) -> &FakeTime {
        &self.fake
    }

    pub fn fake_time_mut(&mut self) -> &mut FakeTime {
        &mut self.fake
    }

    pub fn into_inner(self) -> FakeTime {
        self.fake
    }

    /// Wait `duration` of real time, processing events throughout
    ///
    /// Returns the number of deferred tasks run.
    pub async fn wait_while_processing_events(&mut self, duration: Duration) -> usize {
        let end = Instant::now() + duration;
        let mut ran = 0;

        loop {
            ran += self.fake.process_events();

            let now = Instant::now();
            if now >= end {
                break;
            }
            sleep(self.poll_interval.min(end - now)).await;
        }

        debug!("Waited {:?} processing events, {} deferred tasks", duration, ran);
        ran
    }

    /// Process events until `condition` holds, for at most `timeout` of real time
    pub async fn run_until<F>(&mut self, timeout: Duration, mut condition: F) -> Result<()>
    where
        F: FnMut(&FakeTime) -> bool,
    {
        let end = Instant::now() + timeout;

        loop {
            self.fake.process_events();
            if condition(&self.fake) {
                return Ok(());
            }

            let now = Instant::now();
            if now >= end {
                debug!("Condition still unmet after {:?}", timeout);
                return Err(RunnerError::Timeout(timeout));
            }
            sleep(self.poll_interval.min(end - now)).await;
        }
    }
}
