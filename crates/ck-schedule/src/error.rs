use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule has no rows")]
    Empty,

    #[error("schedule row {index} starts at {start}s, not after the previous row ({previous}s)")]
    NonMonotonic {
        index:    usize,
        start:    u64,
        previous: u64,
    },

    #[error("schedule row {index}: {reason}")]
    InvalidValue { index: usize, reason: String },

    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
