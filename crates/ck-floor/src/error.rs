use ck_core::{CashierId, CustomerId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FloorError {
    #[error("{entity}: illegal transition {from} -> {to}")]
    IllegalTransition {
        entity: String,
        from:   &'static str,
        to:     &'static str,
    },

    #[error("{0} is not open for entry")]
    LaneClosed(CashierId),

    #[error("{customer} is already queued at {cashier}")]
    AlreadyQueued {
        customer: CustomerId,
        cashier:  CashierId,
    },

    #[error("{customer} is not queued at {cashier}")]
    NotQueued {
        customer: CustomerId,
        cashier:  CashierId,
    },

    #[error("{0} is not serving anyone")]
    NotServing(CashierId),
}

pub type FloorResult<T> = Result<T, FloorError>;
