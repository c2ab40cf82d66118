//! Tempo Sim - controllable time for event-driven tests
//!
//! A discrete-event simulation of a framework's clock and timers:
//!
//! - **Clock State**: faked "current" time, or fall-through to the real clock
//! - **Stopwatch Registry**: start instants of elapsed-time stopwatches
//! - **Timer Registry**: next due instant of every active scheduled timer
//! - **Reconciliation**: invariant repair after set/reset clock jumps
//! - **Fast-Forward**: stepwise advance of faked time, firing due timers in order
//! - **Idle Reconciler**: keeps faked time moving with real time between fast-forwards
//!
//! ## Usage
//!
//! ```ignore
//! use tempo_sim::{FakeTime, TimerKind};
//! use tempo_clock::SystemClock;
//!
//! let mut time = FakeTime::new(SystemClock::new());
//!
//! let timer = time.create_timer(1000, TimerKind::Repeating)?;
//! time.on_timeout(timer, |_, _| println!("tick"))?;
//! time.start(timer)?;
//!
//! time.fast_forward(2500); // prints "tick" twice
//! ```

// Application layer
pub mod application;

// Infrastructure layer
pub mod infrastructure;

// Cross-cutting concerns
pub mod config;
pub mod error;

// Re-export main types for convenience
pub use application::{FakeTime, FakeTimeBuilder};
pub use config::{FakeTimeConfig, load_config, load_config_from_str, load_default_config};
pub use error::{FakeTimeError, Result};
pub use infrastructure::{DeferredCall, TimeoutHandler};
pub use tempo_core::{Millis, StopwatchId, TimerId, TimerKind, Timestamp};
