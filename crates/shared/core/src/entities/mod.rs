mod stopwatch;
mod timer;

pub use stopwatch::StopwatchId;
pub use timer::{TimerId, TimerKind};
