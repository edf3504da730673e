use ck_core::Tick;
use ck_floor::FloorError;
use ck_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("floor error: {0}")]
    Floor(#[from] FloorError),

    /// The run reached a state it cannot make progress from.  `detail`
    /// carries the offending entities rendered for a post-mortem.
    #[error("invariant violated at {tick}: {detail}")]
    Invariant {
        tick:   Tick,
        detail: String,
    },
}

pub type SimResult<T> = Result<T, SimError>;
