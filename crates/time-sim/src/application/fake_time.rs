use chrono::NaiveTime;
use log::debug;
use std::sync::Arc;
use tempo_clock::{ClockState, SystemClock};
use tempo_core::{Millis, StopwatchId, Timestamp, millis_from_timestamp, timestamp_from_millis};
use tempo_ports::{Clock, ClockError};

use crate::application::idle::IdleState;
use crate::config::FakeTimeConfig;
use crate::error::{FakeTimeError, Result};
use crate::infrastructure::{DeferredQueue, StopwatchRegistry, TimerRegistry, TimerTable};

/// Simulation context: faked clock, stopwatches and scheduled timers
///
/// Every operation runs on the caller's thread through `&mut self`. Timeout
/// handlers and deferred work receive the context back, so code reacting to a
/// timer can drive other timers without any shared state or locking.
/// Independent contexts never observe each other.
pub struct FakeTime {
    /// Real time source used whenever faking is inactive
    pub(crate) real: Arc<dyn Clock>,
    /// Faked-time register
    pub(crate) clock: ClockState,
    /// Running stopwatches (may hold stale tokens)
    pub(crate) stopwatches: StopwatchRegistry,
    /// Due instants of active timers
    pub(crate) timers: TimerRegistry,
    /// Framework-owned timer objects
    pub(crate) objects: TimerTable,
    /// Host event-loop deferred work
    pub(crate) deferred: DeferredQueue,
    /// Idle reconciler bookkeeping
    pub(crate) idle: IdleState,
    pub(crate) config: FakeTimeConfig,
    next_stopwatch: u64,
}

impl FakeTime {
    /// Create a context over `real` with the default configuration
    pub fn new(real: impl Clock + 'static) -> Self {
        Self::from_parts(Arc::new(real), FakeTimeConfig::default())
    }

    /// Create a context over the system wall clock
    pub fn with_system_clock() -> Self {
        Self::new(SystemClock::new())
    }

    pub fn builder() -> FakeTimeBuilder {
        FakeTimeBuilder::default()
    }

    fn from_parts(real: Arc<dyn Clock>, config: FakeTimeConfig) -> Self {
        let first_idle_tick = real.now_ms() + config.idle_tick_ms as Millis;

        Self {
            real,
            clock: ClockState::new(),
            stopwatches: StopwatchRegistry::new(),
            timers: TimerRegistry::new(),
            objects: TimerTable::new(),
            deferred: DeferredQueue::new(),
            idle: IdleState::new(first_idle_tick),
            config,
            next_stopwatch: 0,
        }
    }

    pub fn config(&self) -> &FakeTimeConfig {
        &self.config
    }

    /// Name of the real clock collaborator
    pub fn real_clock_name(&self) -> &str {
        self.real.name()
    }

    // ------------------------------------------------------------------
    // Clock state
    // ------------------------------------------------------------------

    /// Current time in ms since the epoch: faked if faking, otherwise real
    pub fn current_time(&self) -> Millis {
        self.clock.current_time(self.real.as_ref())
    }

    /// Unfaked time from the real clock
    pub fn real_time(&self) -> Millis {
        self.real.now_ms()
    }

    /// Current time as a UTC timestamp
    pub fn now(&self) -> Result<Timestamp> {
        let ms = self.current_time();
        timestamp_from_millis(ms).ok_or(FakeTimeError::Clock(ClockError::OutOfRange(ms)))
    }

    /// Current time in whole seconds since the epoch
    pub fn now_secs(&self) -> i64 {
        self.current_time() / 1000
    }

    /// Time-of-day component of `now()`
    pub fn time_of_day(&self) -> Result<NaiveTime> {
        Ok(self.now()?.time())
    }

    pub fn is_faking(&self) -> bool {
        self.clock.is_faking()
    }

    /// Fake the current time to an arbitrary point
    ///
    /// Active stopwatches and timers are reconciled against the new time:
    /// small jumps leave them as they are, large ones reset or cancel them.
    /// Faked time keeps advancing with real time while events are processed.
    pub fn set(&mut self, time: Timestamp) -> Result<()> {
        self.set_millis(millis_from_timestamp(&time))
    }

    /// Fake the current time to `ms` milliseconds since the epoch
    pub fn set_millis(&mut self, ms: Millis) -> Result<()> {
        if ms <= 0 {
            return Err(FakeTimeError::InvalidTime(ms));
        }

        debug!("Faked time set to {}ms (was {:?})", ms, self.clock.faked());
        self.clock.assign(ms);
        self.reconcile();
        Ok(())
    }

    /// Return to real chronological time
    pub fn reset(&mut self) {
        debug!("Faked time reset (was {:?})", self.clock.faked());
        self.clock.clear();
        self.reconcile();
    }

    /// Drop all simulation state ahead of the next test
    ///
    /// Stopwatch tokens have no destruction notification, so this is the point
    /// where stale entries are purged. Timer objects survive but are stopped;
    /// fire-and-forget single shots that never fired are disposed of.
    pub fn teardown(&mut self) {
        let stopped = self.timers.len();
        let stopwatches = self.stopwatches.len();

        self.idle.resync();
        self.timers.clear();
        self.deferred.clear();
        self.stopwatches.clear();
        let transient = self.objects.remove_transient();

        debug!(
            "Teardown: stopped {} timers, purged {} stopwatches and {} pending single shots",
            stopped, stopwatches, transient
        );
    }

    pub(crate) fn allocate_stopwatch(&mut self) -> StopwatchId {
        let id = StopwatchId(self.next_stopwatch);
        self.next_stopwatch += 1;
        id
    }
}

/// Builder for a `FakeTime` context
///
/// The real clock is a required collaborator; building without one fails.
#[derive(Default)]
pub struct FakeTimeBuilder {
    real: Option<Arc<dyn Clock>>,
    config: Option<FakeTimeConfig>,
}

impl FakeTimeBuilder {
    pub fn real_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.real = Some(Arc::new(clock));
        self
    }

    /// Use a real clock that is shared with other owners
    pub fn shared_real_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.real = Some(clock);
        self
    }

    pub fn config(mut self, config: FakeTimeConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<FakeTime> {
        let real = self
            .real
            .ok_or(FakeTimeError::MissingCollaborator("real clock"))?;
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(FakeTime::from_parts(real, config))
    }
}
