use cosmwasm_std::{CheckedMultiplyRatioError, OverflowError};
use thiserror::Error;

use crate::DENOMINATOR;

#[derive(Error, Debug, PartialEq)]
pub enum FeeError {
    #[error(transparent)]
    Overflow(#[from] OverflowError),

    #[error(transparent)]
    MultiplyRatio(#[from] CheckedMultiplyRatioError),

    #[error("Rate {rate} exceeds the denominator {}", DENOMINATOR)]
    RateTooHigh { rate: u64 },
}
