//! Invariant repair after a discontinuous clock change

use log::debug;
use tempo_core::Millis;

use super::FakeTime;

impl FakeTime {
    /// Bring stopwatches and timers back in line with the current time
    ///
    /// Runs after every `set`/`reset`. Stopwatches never report negative
    /// elapsed time. A timer the clock jumped behind, or far past, is cancelled
    /// (one-shot) or restarted from now (repeating); a timer that is only
    /// mildly overdue is left to fire.
    pub(crate) fn reconcile(&mut self) {
        self.idle.resync();

        let now = self.current_time();
        let clamped = self.stopwatches.clamp_to(now);
        if clamped > 0 {
            debug!("Clamped {} stopwatches to {}ms", clamped, now);
        }

        let grace_intervals = Millis::from(self.config.overdue_grace_intervals);

        for (id, due) in self.timers.snapshot() {
            let Some(object) = self.objects.get(id) else {
                self.timers.remove(id);
                continue;
            };
            let interval = object.interval_ms as Millis;
            let single_shot = object.kind.is_single_shot();
            let transient = object.transient;

            let started_at = due.saturating_sub(interval);
            let grace = interval.saturating_mul(grace_intervals);
            let went_back = now < started_at;
            let grossly_overdue = now > due.saturating_add(grace);
            if !went_back && !grossly_overdue {
                continue;
            }

            if single_shot {
                debug!(
                    "Cancelled {} after clock jump to {}ms (was due at {}ms)",
                    id, now, due
                );
                if transient {
                    self.destroy_timer(id);
                } else {
                    self.timers.remove(id);
                }
            } else {
                debug!(
                    "Restarted {} after clock jump to {}ms (was due at {}ms)",
                    id, now, due
                );
                self.timers.arm(id, now.saturating_add(interval));
            }
        }

        self.flush_overdue();
    }

    /// Fire every timer already due, oldest first
    ///
    /// Returns the number of timers fired.
    pub(crate) fn flush_overdue(&mut self) -> usize {
        let mut fired = 0;
        while let Some((id, due)) = self.next_due() {
            if due > self.current_time() {
                break;
            }
            self.fire(id);
            fired += 1;
        }
        fired
    }
}
