//! Tempo Ports
//!
//! Port definitions (traits) for the Tempo fake-time engine.
//! These define the boundary between the simulation and the real world.

mod clock;
mod error;

pub use clock::Clock;
pub use error::{ClockError, ClockResult};
