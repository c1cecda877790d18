use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, StdResult, Uint128};

use crate::denoms::{CheckedDenom, UncheckedDenom};

/// How the source asset reaches the proxy.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum FundingKind {
    /// A cw20 token pulled from the caller through an allowance.
    Fungible,
    /// Bank coins attached to the call.
    Native,
}

/// When the percentage fee is assessed.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum FeeTiming {
    /// On the input amount, before the router call. The flat fee is charged as well.
    OnInput,
    /// On the router's output, after the router call. No flat fee.
    OnOutput,
}

impl FundingKind {
    pub fn matches(&self, asset: &CheckedDenom) -> bool {
        matches!(
            (self, asset),
            (FundingKind::Fungible, CheckedDenom::Cw20(_))
                | (FundingKind::Native, CheckedDenom::Native(_))
        )
    }
}

impl std::fmt::Display for FundingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FundingKind::Fungible => write!(f, "fungible"),
            FundingKind::Native => write!(f, "native"),
        }
    }
}

/// Permitted input range for one source asset.
#[cw_serde]
pub struct AssetBounds {
    pub asset: CheckedDenom,
    pub min_amount: Uint128,
    pub max_amount: Uint128,
}

impl AssetBounds {
    pub fn contains(&self, amount: Uint128) -> bool {
        self.min_amount <= amount && amount <= self.max_amount
    }
}

/// Storage key for an asset. The prefix keeps a bank denom and a cw20 address
/// from ever sharing a key.
pub fn asset_key(asset: &CheckedDenom) -> String {
    match asset {
        CheckedDenom::Native(denom) => format!("native:{denom}"),
        CheckedDenom::Cw20(addr) => format!("cw20:{addr}"),
    }
}

/// Converts a denom without querying the cw20 contract. Only the address is validated,
/// the registry decides whether the asset is actually usable.
pub fn check_asset(api: &dyn Api, asset: &UncheckedDenom) -> StdResult<CheckedDenom> {
    match asset {
        UncheckedDenom::Native(denom) => Ok(CheckedDenom::Native(denom.clone())),
        UncheckedDenom::Cw20(addr) => Ok(CheckedDenom::Cw20(api.addr_validate(addr)?)),
    }
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::{testing::MockApi, Addr};

    use super::*;

    #[test]
    fn keys_do_not_collide_across_kinds() {
        let native = CheckedDenom::Native("cosmwasm1token".to_string());
        let cw20 = CheckedDenom::Cw20(Addr::unchecked("cosmwasm1token"));

        assert_eq!(asset_key(&native), "native:cosmwasm1token");
        assert_ne!(asset_key(&native), asset_key(&cw20));
    }

    #[test]
    fn bounds_are_inclusive() {
        let bounds = AssetBounds {
            asset: CheckedDenom::Native("untrn".to_string()),
            min_amount: Uint128::new(10),
            max_amount: Uint128::new(20),
        };

        assert!(!bounds.contains(Uint128::new(9)));
        assert!(bounds.contains(Uint128::new(10)));
        assert!(bounds.contains(Uint128::new(20)));
        assert!(!bounds.contains(Uint128::new(21)));
    }

    #[test]
    fn funding_kind_matches_asset() {
        let api = MockApi::default();
        let token = check_asset(&api, &UncheckedDenom::Cw20(api.addr_make("token").to_string()))
            .unwrap();
        let coin = check_asset(&api, &UncheckedDenom::Native("untrn".to_string())).unwrap();

        assert!(FundingKind::Fungible.matches(&token));
        assert!(!FundingKind::Fungible.matches(&coin));
        assert!(FundingKind::Native.matches(&coin));
        assert!(!FundingKind::Native.matches(&token));
    }

    #[test]
    fn invalid_cw20_address_is_rejected() {
        let api = MockApi::default();
        assert!(check_asset(&api, &UncheckedDenom::Cw20("not an address".to_string())).is_err());
    }
}
