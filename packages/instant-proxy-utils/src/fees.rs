use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

use crate::{error::FeeError, DENOMINATOR};

/// Platform-wide fee settings, used whenever no active integrator is involved.
#[cw_serde]
#[derive(Default)]
pub struct FeeConfig {
    /// Percentage fee, as a fraction of [`DENOMINATOR`].
    pub platform_token_fee_rate: u64,
    /// Flat fee in the native denom, charged once per fee-on-input swap.
    pub fixed_crypto_fee: Uint128,
}

impl FeeConfig {
    pub fn validate(&self) -> Result<(), FeeError> {
        validate_rate(self.platform_token_fee_rate)
    }
}

/// Negotiated terms for a revenue-share partner.
#[cw_serde]
pub struct IntegratorFeeInfo {
    pub is_active: bool,
    /// Percentage fee charged on swaps carrying this integrator.
    pub token_fee_rate: u64,
    /// Part of the percentage fee kept by the platform, the rest goes to the integrator.
    pub platform_share_of_token_fee: u64,
    /// Flat fee charged instead of the platform's fixed fee.
    pub fixed_crypto_fee: Uint128,
    /// Part of the flat fee kept by the platform.
    pub platform_share_of_fixed_fee: u64,
}

impl IntegratorFeeInfo {
    pub fn validate(&self) -> Result<(), FeeError> {
        validate_rate(self.token_fee_rate)?;
        validate_rate(self.platform_share_of_token_fee)?;
        validate_rate(self.platform_share_of_fixed_fee)
    }
}

#[cw_serde]
pub struct TokenFee {
    pub amount_without_fee: Uint128,
    pub total_fee: Uint128,
    pub platform_share: Uint128,
    pub integrator_share: Uint128,
}

#[cw_serde]
pub struct CryptoFee {
    pub total_fee: Uint128,
    pub platform_share: Uint128,
    pub integrator_share: Uint128,
}

pub fn validate_rate(rate: u64) -> Result<(), FeeError> {
    if rate > DENOMINATOR {
        return Err(FeeError::RateTooHigh { rate });
    }
    Ok(())
}

/// Percentage fee on `amount_with_fee`.
///
/// An active integrator's terms replace the platform rate and split the fee between the
/// platform and the integrator. Every division floors, so the amount passed on never rounds
/// up and the platform share never exceeds its exact value.
pub fn token_fee(
    config: &FeeConfig,
    integrator: Option<&IntegratorFeeInfo>,
    amount_with_fee: Uint128,
) -> Result<TokenFee, FeeError> {
    let (total_fee, platform_share) = match integrator.filter(|info| info.is_active) {
        Some(info) => {
            let total_fee = fraction_of(amount_with_fee, info.token_fee_rate)?;
            let platform_share = fraction_of(total_fee, info.platform_share_of_token_fee)?;
            (total_fee, platform_share)
        }
        None => {
            let total_fee = fraction_of(amount_with_fee, config.platform_token_fee_rate)?;
            (total_fee, total_fee)
        }
    };

    Ok(TokenFee {
        amount_without_fee: amount_with_fee.checked_sub(total_fee)?,
        total_fee,
        platform_share,
        integrator_share: total_fee.checked_sub(platform_share)?,
    })
}

/// Flat fee in the native denom, split with the same precedence as [`token_fee`].
pub fn crypto_fee(
    config: &FeeConfig,
    integrator: Option<&IntegratorFeeInfo>,
) -> Result<CryptoFee, FeeError> {
    let (total_fee, platform_share) = match integrator.filter(|info| info.is_active) {
        Some(info) => {
            let platform_share =
                fraction_of(info.fixed_crypto_fee, info.platform_share_of_fixed_fee)?;
            (info.fixed_crypto_fee, platform_share)
        }
        None => (config.fixed_crypto_fee, config.fixed_crypto_fee),
    };

    Ok(CryptoFee {
        total_fee,
        platform_share,
        integrator_share: total_fee.checked_sub(platform_share)?,
    })
}

// The product is computed in 256 bits, so any Uint128 amount is safe.
fn fraction_of(amount: Uint128, rate: u64) -> Result<Uint128, FeeError> {
    validate_rate(rate)?;
    Ok(amount.checked_multiply_ratio(rate, DENOMINATOR)?)
}
