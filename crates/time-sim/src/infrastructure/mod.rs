pub mod host;
pub mod stopwatch;
pub mod timer;

pub use host::{Deferred, DeferredCall, DeferredQueue, TimeoutHandler, TimerObject, TimerTable};
pub use stopwatch::StopwatchRegistry;
pub use timer::{DueKey, TimerRegistry};
