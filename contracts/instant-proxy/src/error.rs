use cosmwasm_std::{OverflowError, StdError, Uint128};
use cw_ownable::OwnershipError;
use thiserror::Error;
use valence_instant_proxy_utils::error::FeeError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    #[error(transparent)]
    Overflow(#[from] OverflowError),

    #[error(transparent)]
    Fee(#[from] FeeError),

    #[error("Unauthorized, only the owner can execute this action")]
    Unauthorized {},

    #[error("Contract is already initialized")]
    AlreadyInitialized {},

    #[error("Contract is not initialized")]
    NotInitialized {},

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Swaps are paused")]
    Paused {},

    #[error("Router {router} is not allowed")]
    RouterNotAllowed { router: String },

    #[error("Asset {asset} has no swap bounds")]
    AssetNotAllowed { asset: String },

    #[error("Amount {amount} is outside of the allowed range [{min}, {max}]")]
    AmountOutOfBounds {
        amount: Uint128,
        min: Uint128,
        max: Uint128,
    },

    #[error("Insufficient allowance: {available} available, {required} required")]
    InsufficientAllowance {
        available: Uint128,
        required: Uint128,
    },

    #[error("Insufficient balance: {available} available, {required} required")]
    InsufficientBalance {
        available: Uint128,
        required: Uint128,
    },

    #[error("Attached funds mismatch: expected [{expected}], received [{received}]")]
    ValueMismatch { expected: String, received: String },

    #[error("Transfer of {amount} {asset} failed")]
    TransferFailed { asset: String, amount: Uint128 },

    #[error("Amount received {received} is less than amount expected {expected}")]
    AmntReceivedSubAmntExpected { received: Uint128, expected: Uint128 },

    #[error("Reentrant call, a swap is already in flight")]
    ReentrantCall {},

    #[error("No swap in flight")]
    NoSwapInFlight {},

    #[error("Unknown reply id: {0}")]
    UnknownReplyId(u64),
}
