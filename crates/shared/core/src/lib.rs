//! Tempo Core Domain
//!
//! Pure value types shared by the fake-time engine and its collaborators.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{StopwatchId, TimerId, TimerKind};
pub use values::{Millis, Timestamp, millis_from_timestamp, timestamp_from_millis};
