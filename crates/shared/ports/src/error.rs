use tempo_core::Millis;
use thiserror::Error;

/// Errors raised by clock ports
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Time out of representable range: {0}ms since epoch")]
    OutOfRange(Millis),
}

pub type ClockResult<T> = std::result::Result<T, ClockError>;
