use tempo_core::{Millis, StopwatchId, TimerId};
use tempo_ports::ClockError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum FakeTimeError {
    #[error("Invalid time: {0}ms since epoch (must be positive)")]
    InvalidTime(Millis),

    #[error("Invalid timer interval: {0}ms")]
    InvalidInterval(i32),

    #[error("Stopwatch not started: {0}")]
    InvalidStopwatch(StopwatchId),

    #[error("Timer not found: {0}")]
    UnknownTimer(TimerId),

    #[error("Unsupported stopwatch operation: {0}")]
    Unsupported(&'static str),

    #[error("Missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("Clock error: {0}")]
    Clock(#[from] ClockError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, FakeTimeError>;
