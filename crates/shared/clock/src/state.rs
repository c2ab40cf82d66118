use tempo_core::Millis;
use tempo_ports::Clock;

/// The faked-time register
///
/// `None` means time is not being faked and reads fall through to the real
/// clock. Callers validate values before assigning them; the register itself
/// only stores what it is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockState {
    faked: Option<Millis>,
}

impl ClockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Faked time, if faking is active
    pub fn faked(&self) -> Option<Millis> {
        self.faked
    }

    pub fn is_faking(&self) -> bool {
        self.faked.is_some()
    }

    /// Faked time when faking, otherwise the real clock's reading
    pub fn current_time(&self, real: &dyn Clock) -> Millis {
        match self.faked {
            Some(faked) => faked,
            None => real.now_ms(),
        }
    }

    /// Replace the faked time (entering faking mode if needed)
    pub fn assign(&mut self, time: Millis) {
        self.faked = Some(time);
    }

    /// Stop faking
    pub fn clear(&mut self) {
        self.faked = None;
    }
}
