use thiserror::Error;

/// Errors raised by the rolling window averager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("window size {requested} is outside 1..={capacity}")]
    OutOfRange { requested: usize, capacity: usize },
}
