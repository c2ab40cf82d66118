use log::debug;
use tempo_core::Millis;

use super::FakeTime;

impl FakeTime {
    /// Advance faked time by `ms`, firing every timer that falls due on the way
    ///
    /// Faked time steps to each due instant in turn, so handlers observe the
    /// time they were scheduled for. After each timeout, and once more at the
    /// end, one round of deferred work runs: whatever was queued before that
    /// round began. Work that keeps requeueing itself therefore cannot stall
    /// the loop. Faking starts from the real current time if it was not
    /// already active.
    pub fn fast_forward(&mut self, ms: u64) {
        if !self.clock.is_faking() {
            let real = self.real.now_ms();
            self.clock.assign(real);
        }

        let start = self.current_time();
        let target = start.saturating_add(Millis::try_from(ms).unwrap_or(Millis::MAX));
        let mut fired = 0usize;

        while let Some((id, due)) = self.next_due() {
            if due > target {
                break;
            }
            // Never step backwards past a handler that moved the clock on
            let step_to = due.max(self.current_time());
            self.clock.assign(step_to);
            self.fire(id);
            self.run_deferred_round();
            fired += 1;
        }

        self.clock.assign(target.max(self.current_time()));
        self.run_deferred_round();

        debug!(
            "Fast-forwarded {}ms ({}ms -> {}ms), {} timeouts",
            ms,
            start,
            self.current_time(),
            fired
        );
    }
}
