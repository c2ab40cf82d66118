//! Idle reconciler
//!
//! A low-period real tick that keeps faked time moving with real time while a
//! test waits in the event loop instead of fast-forwarding. When time is not
//! being faked it simply fires whatever became due in real time.

use log::trace;
use tempo_core::Millis;

use super::FakeTime;

/// Faked and real times seen at the previous idle tick
#[derive(Debug, Clone, Default)]
pub(crate) struct IdleState {
    faked_at_last_tick: Option<Millis>,
    real_at_last_tick: Option<Millis>,
    /// Real instant the next tick is scheduled for
    next_tick_real: Millis,
}

impl IdleState {
    pub(crate) fn new(next_tick_real: Millis) -> Self {
        Self {
            next_tick_real,
            ..Default::default()
        }
    }

    /// Forget the last tick so the next one only records
    pub(crate) fn resync(&mut self) {
        self.faked_at_last_tick = None;
        self.real_at_last_tick = None;
    }
}

impl FakeTime {
    /// One event-loop pass
    ///
    /// Runs the deferred work queued before the pass began, then the idle tick
    /// if its real period has elapsed. Returns the number of deferred tasks run.
    pub fn process_events(&mut self) -> usize {
        let ran = self.run_deferred_round();

        if self.config.idle_reconciler {
            let real_now = self.real.now_ms();
            if real_now >= self.idle.next_tick_real {
                self.idle_tick();
                self.idle.next_tick_real = self.real.now_ms() + self.config.idle_tick_ms as Millis;
            }
        }

        ran
    }

    /// Reconcile faked time with real time elapsed since the previous tick
    ///
    /// While faking, faked time that has not moved since the last tick is
    /// fast-forwarded by the real time that passed. An explicit fast-forward or
    /// `set` in between takes precedence and is left alone.
    pub fn idle_tick(&mut self) {
        let Some(faked) = self.clock.faked() else {
            self.idle.resync();
            self.flush_overdue();
            return;
        };

        let real_now = self.real.now_ms();
        if let (Some(last_faked), Some(last_real)) =
            (self.idle.faked_at_last_tick, self.idle.real_at_last_tick)
        {
            let real_elapsed = real_now - last_real;
            if last_faked == faked && real_elapsed > 0 {
                trace!("Idle tick absorbing {}ms of real time", real_elapsed);
                self.fast_forward(real_elapsed as u64);
            }
        }

        self.idle.faked_at_last_tick = self.clock.faked();
        self.idle.real_at_last_tick = Some(real_now);
    }
}
