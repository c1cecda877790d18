pub mod denoms {
    pub use cw_denom::{CheckedDenom, DenomError, UncheckedDenom};
}

pub mod asset;
pub mod error;
pub mod fees;
pub mod msg;

/// Fixed-point scale for every fee rate and share: 1_000_000 is 100%.
pub const DENOMINATOR: u64 = 1_000_000;
