//! Tempo Runner - event-loop driver for simulated time
//!
//! Tests that mix explicit fast-forwards with real waiting need an event loop
//! that keeps processing while real time passes. `EventLoop` owns a
//! `FakeTime` context and pumps it from the current tokio task:
//!
//! ```text
//!   test ──await──> EventLoop::wait_while_processing_events(d)
//!                        │
//!                        ├── FakeTime::process_events()   deferred work + idle tick
//!                        └── tokio::time::sleep(poll)      real time passes
//! ```
//!
//! Nothing is spawned, so the engine stays on the caller's thread. Under a
//! paused tokio runtime (`start_paused = true`) paired with a `TokioClock`,
//! real waits become exact and instant.

pub mod error;
pub mod event_loop;

pub use error::{Result, RunnerError};
pub use event_loop::EventLoop;
