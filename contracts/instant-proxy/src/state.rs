use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Empty, Uint128};
use cw_storage_plus::{Item, Map};
use valence_instant_proxy_utils::{
    asset::{AssetBounds, FeeTiming},
    denoms::CheckedDenom,
    fees::{CryptoFee, FeeConfig, IntegratorFeeInfo, TokenFee},
    msg::{Config, Lifecycle},
};

pub const LIFECYCLE: Item<Lifecycle> = Item::new("lifecycle");
pub const CONFIG: Item<Config> = Item::new("config");
pub const FEE_CONFIG: Item<FeeConfig> = Item::new("fee_config");
pub const ALLOWED_ROUTERS: Map<&Addr, Empty> = Map::new("allowed_routers");
// Keyed by `asset_key`
pub const ASSET_BOUNDS: Map<&str, AssetBounds> = Map::new("asset_bounds");
pub const INTEGRATORS: Map<&Addr, IntegratorFeeInfo> = Map::new("integrators");
// Only present between the router call and its settlement
pub const PENDING_SWAP: Item<PendingSwap> = Item::new("pending_swap");

#[cw_serde]
pub struct PendingSwap {
    pub router: Addr,
    pub src_asset: CheckedDenom,
    pub src_amount: Uint128,
    pub dst_asset: CheckedDenom,
    pub dst_min_output_amount: Uint128,
    pub recipient: Addr,
    pub integrator: Option<Addr>,
    pub fee_timing: FeeTiming,
    /// Percentage fee withheld from the input, paid out on settlement.
    pub input_fee: Option<TokenFee>,
    /// Flat fee attached by the caller, paid out on settlement.
    pub crypto_fee: Option<CryptoFee>,
    /// Destination balance of the proxy right before the router call.
    pub baseline: Uint128,
}
