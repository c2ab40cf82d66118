use std::fmt;

/// Identity of a scheduled timer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Firing behaviour of a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimerKind {
    /// Fires once, then becomes inactive
    SingleShot,
    /// Fires every interval until stopped
    #[default]
    Repeating,
}

impl TimerKind {
    pub fn is_single_shot(&self) -> bool {
        matches!(self, TimerKind::SingleShot)
    }

    pub fn from_single_shot(single_shot: bool) -> Self {
        if single_shot {
            TimerKind::SingleShot
        } else {
            TimerKind::Repeating
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_kind_flags() {
        assert!(TimerKind::SingleShot.is_single_shot());
        assert!(!TimerKind::Repeating.is_single_shot());
        assert_eq!(TimerKind::from_single_shot(true), TimerKind::SingleShot);
        assert_eq!(TimerKind::default(), TimerKind::Repeating);
    }

    #[test]
    fn test_display() {
        assert_eq!(TimerId(7).to_string(), "timer#7");
    }
}
