//! Scheduled timers over the simulated clock
//!
//! Timer objects live in the host table. Starting one either arms it in the
//! timer registry (due at `now + interval`) or, for a zero-interval one-shot,
//! hands it to the host's deferred queue so it fires on the next event-loop
//! pass without touching simulation at all.

use log::{debug, trace, warn};
use tempo_core::{Millis, TimerId, TimerKind};

use super::FakeTime;
use crate::error::{FakeTimeError, Result};
use crate::infrastructure::Deferred;

impl FakeTime {
    /// Create an inactive timer object
    pub fn create_timer(&mut self, interval_ms: i32, kind: TimerKind) -> Result<TimerId> {
        if interval_ms < 0 {
            return Err(FakeTimeError::InvalidInterval(interval_ms));
        }
        Ok(self.objects.create(interval_ms, kind))
    }

    /// Attach the timeout handler, replacing any previous one
    pub fn on_timeout<F>(&mut self, id: TimerId, handler: F) -> Result<()>
    where
        F: FnMut(TimerId, &mut FakeTime) + 'static,
    {
        if self.objects.set_handler(id, Box::new(handler)) {
            Ok(())
        } else {
            Err(FakeTimeError::UnknownTimer(id))
        }
    }

    /// Start (or restart) the timer with its current interval
    pub fn start(&mut self, id: TimerId) -> Result<()> {
        let (interval, kind) = self.timer_settings(id)?;

        if kind.is_single_shot() && interval == 0 {
            self.timers.remove(id);
            if !self.deferred.has_timeout(id) {
                trace!("{} deferred to the next event-loop pass", id);
                self.deferred.push(Deferred::Timeout(id));
            }
            return Ok(());
        }

        self.deferred.cancel_timeout(id);
        let due = self.current_time().saturating_add(interval as Millis);
        self.timers.arm(id, due);
        trace!("{} armed, due at {}ms", id, due);
        Ok(())
    }

    /// Set the interval through the host primitive, then start
    pub fn start_with_interval(&mut self, id: TimerId, interval_ms: i32) -> Result<()> {
        if interval_ms < 0 {
            return Err(FakeTimeError::InvalidInterval(interval_ms));
        }
        if !self.objects.set_interval_raw(id, interval_ms) {
            return Err(FakeTimeError::UnknownTimer(id));
        }
        self.start(id)
    }

    /// Deactivate the timer; a stopped fire-and-forget timer is disposed of
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if !self.objects.contains(id) {
            return Err(FakeTimeError::UnknownTimer(id));
        }
        if self.objects.is_transient(id) {
            self.destroy_timer(id);
            return Ok(());
        }
        self.timers.remove(id);
        self.deferred.cancel_timeout(id);
        Ok(())
    }

    /// Change the interval; an active timer is restarted from now
    pub fn set_interval(&mut self, id: TimerId, interval_ms: i32) -> Result<()> {
        if interval_ms < 0 {
            return Err(FakeTimeError::InvalidInterval(interval_ms));
        }
        let was_active = self.is_active(id);
        if was_active {
            self.timers.remove(id);
            self.deferred.cancel_timeout(id);
        }
        if !self.objects.set_interval_raw(id, interval_ms) {
            return Err(FakeTimeError::UnknownTimer(id));
        }
        if was_active {
            self.start(id)?;
        }
        Ok(())
    }

    pub fn set_single_shot(&mut self, id: TimerId, single_shot: bool) -> Result<()> {
        if self
            .objects
            .set_kind(id, TimerKind::from_single_shot(single_shot))
        {
            Ok(())
        } else {
            Err(FakeTimeError::UnknownTimer(id))
        }
    }

    pub fn interval(&self, id: TimerId) -> Result<i32> {
        Ok(self.timer_settings(id)?.0)
    }

    pub fn is_single_shot(&self, id: TimerId) -> Result<bool> {
        Ok(self.timer_settings(id)?.1.is_single_shot())
    }

    /// Armed in the registry, or a zero-interval delivery is pending
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains(id) || self.deferred.has_timeout(id)
    }

    /// Time until the timer is due, `0` for a pending zero-interval delivery,
    /// and `-1` when inactive
    pub fn remaining_time(&self, id: TimerId) -> Millis {
        match self.timers.due_time(id) {
            Some(due) => due.saturating_sub(self.current_time()),
            None if self.deferred.has_timeout(id) => 0,
            None => -1,
        }
    }

    /// Every armed timer with its due time, in firing order
    pub fn active_timers(&self) -> Vec<(TimerId, Millis)> {
        self.timers.snapshot()
    }

    /// Number of live timer objects
    pub fn timer_count(&self) -> usize {
        self.objects.len()
    }

    /// Destruction notification: drop the timer object and all its state
    ///
    /// Returns whether the timer existed.
    pub fn destroy_timer(&mut self, id: TimerId) -> bool {
        self.timers.remove(id);
        self.deferred.cancel_timeout(id);
        if self.objects.remove(id).is_some() {
            true
        } else {
            warn!("Destroy requested for unknown {}", id);
            false
        }
    }

    /// Fire-and-forget: run `callback` once after `ms`, then dispose of the timer
    ///
    /// The timer is also disposed of if it is stopped, cancelled by a clock
    /// jump, or purged by `teardown()` before it fires.
    pub fn single_shot<F>(&mut self, ms: i32, callback: F) -> Result<TimerId>
    where
        F: FnOnce(&mut FakeTime) + 'static,
    {
        if ms < 0 {
            return Err(FakeTimeError::InvalidInterval(ms));
        }
        let id = self.objects.create_transient(ms);
        let mut callback = Some(callback);
        self.on_timeout(id, move |id, time| {
            if let Some(callback) = callback.take() {
                callback(time);
            }
            // The callback may already have stopped it
            if time.objects.contains(id) {
                time.destroy_timer(id);
            }
        })?;
        self.start(id)?;
        Ok(id)
    }

    /// Queue work for the next event-loop pass
    pub fn invoke_later<F>(&mut self, callback: F)
    where
        F: FnOnce(&mut FakeTime) + 'static,
    {
        self.deferred.push(Deferred::Call(Box::new(callback)));
    }

    /// Number of deferred tasks waiting for an event-loop pass
    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    // ------------------------------------------------------------------
    // Simulation internals
    // ------------------------------------------------------------------

    fn timer_settings(&self, id: TimerId) -> Result<(i32, TimerKind)> {
        self.objects
            .get(id)
            .map(|object| (object.interval_ms, object.kind))
            .ok_or(FakeTimeError::UnknownTimer(id))
    }

    pub(crate) fn next_due(&self) -> Option<(TimerId, Millis)> {
        self.timers.next_due()
    }

    /// Deliver a due timer, then advance it unless the handler rescheduled it
    pub(crate) fn fire(&mut self, id: TimerId) {
        let Some(before) = self.timers.key(id) else {
            return;
        };
        trace!("{} fired at {}ms", id, self.current_time());

        self.deliver(id);

        // Handler stopped, restarted or destroyed the timer
        if self.timers.key(id) != Some(before) {
            return;
        }
        match self.objects.get(id) {
            Some(object) if !object.kind.is_single_shot() => {
                let step = (object.interval_ms as Millis).max(1);
                let next = before.due.saturating_add(step);
                if next > before.due {
                    self.timers.advance(id, next);
                } else {
                    debug!("{} deactivated: next due time past the end of the clock", id);
                    self.timers.remove(id);
                }
            }
            _ => {
                self.timers.remove(id);
            }
        }
    }

    /// Run the timer's handler with the context lent back to it
    fn deliver(&mut self, id: TimerId) {
        match self.objects.take_handler(id) {
            Some(mut handler) => {
                handler(id, self);
                self.objects.restore_handler(id, handler);
            }
            None => trace!("{} has no timeout handler", id),
        }
    }

    /// Run what was queued before this round began
    ///
    /// Work queued while the round runs waits for the next round, so a task
    /// that requeues itself cannot keep the caller busy.
    pub(crate) fn run_deferred_round(&mut self) -> usize {
        let round_end = self.deferred.round_end();
        let mut ran = 0;
        while let Some(task) = self.deferred.pop_before(round_end) {
            match task {
                Deferred::Timeout(id) => self.deliver(id),
                Deferred::Call(call) => call(self),
            }
            ran += 1;
        }
        ran
    }
}
