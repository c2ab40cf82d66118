//! Tempo Clock Infrastructure
//!
//! Provides the faked-time register and the real time sources it falls back on:
//!
//! ## Time Sources
//!
//! ```text
//! ClockState (faked time, or none)
//!     │
//!     └── falls back to a real Clock when not faking
//!             │
//!             ├── SystemClock (wall clock)
//!             ├── ManualClock (moved by hand, for unit tests)
//!             └── TokioClock  (runtime instants, pausable in tests)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use tempo_clock::{ClockState, ManualClock};
//!
//! let real = ManualClock::new(1_000_000);
//! let mut state = ClockState::new();
//!
//! assert_eq!(state.current_time(&real), 1_000_000);
//! state.assign(5_000);
//! assert_eq!(state.current_time(&real), 5_000);
//! ```

mod manual;
mod state;
mod system;
mod tokio_clock;

pub use manual::ManualClock;
pub use state::ClockState;
pub use system::SystemClock;
pub use tokio_clock::TokioClock;

// Re-export the Clock trait for convenience
pub use tempo_ports::Clock;
