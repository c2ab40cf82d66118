use std::fmt;

/// Opaque identity token for a stopwatch
///
/// A token may outlive the stopwatch it was issued for. Nothing is ever
/// reached through it; it is only compared and hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopwatchId(pub u64);

impl fmt::Display for StopwatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stopwatch#{}", self.0)
    }
}
