//! Simulation context and the operations tests drive it with
//!
//! `FakeTime` owns every registry. The operations are split by concern:
//!
//! - `stopwatches`: elapsed-time measurement
//! - `timers`: timer objects, arming, delivery and deferred work
//! - `reconcile`: repair after `set`/`reset`
//! - `fast_forward`: the stepwise simulation loop
//! - `idle`: the real-time idle reconciler

mod fake_time;
mod fast_forward;
pub(crate) mod idle;
mod reconcile;
mod stopwatches;
mod timers;

pub use fake_time::{FakeTime, FakeTimeBuilder};
