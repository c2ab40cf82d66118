use std::time::Duration;
use tempo_sim::FakeTimeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Condition not met within {0:?}")]
    Timeout(Duration),

    #[error("Engine error: {0}")]
    Engine(#[from] FakeTimeError),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
