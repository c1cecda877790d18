use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};
use getset::{CopyGetters, Getters, Setters};

use crate::{
    asset::AssetBounds,
    denoms::UncheckedDenom,
    fees::{CryptoFee, FeeConfig, IntegratorFeeInfo, TokenFee},
};

#[cw_serde]
pub struct InstantiateMsg {
    // If not provided, the owner will be the sender
    pub owner: Option<String>,
    /// Denom in which flat fees are paid.
    pub native_denom: String,
    /// Receives the platform's share of every fee.
    pub fee_recipient: String,
    pub platform_token_fee_rate: u64,
    pub fixed_crypto_fee: Uint128,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// One-shot setup of the router allow-list and source asset bounds.
    /// `assets`, `min_amounts` and `max_amounts` are matched by position.
    Initialize {
        routers: Vec<String>,
        assets: Vec<UncheckedDenom>,
        min_amounts: Vec<Uint128>,
        max_amounts: Vec<Uint128>,
    },
    /// cw20 input pulled through an allowance, fee taken from the router output.
    Swap(SwapRequest),
    /// cw20 input pulled through an allowance, fee taken from the input and flat fee attached.
    SwapWithFee(SwapRequest),
    /// Native input attached to the call, fee taken from the router output.
    SwapNative(SwapRequest),
    /// Native input attached together with the flat fee, fee taken from the input.
    SwapNativeWithFee(SwapRequest),
    OwnerAction(OwnerMsg),
}

#[cw_serde]
pub struct SwapRequest {
    /// Must be on the allow-list.
    pub router: String,
    pub src_asset: UncheckedDenom,
    pub src_amount: Uint128,
    pub dst_asset: UncheckedDenom,
    /// The swap reverts if the router delivers less than this to the proxy.
    pub dst_min_output_amount: Uint128,
    pub recipient: String,
    pub integrator: Option<String>,
    /// Passed to the router untouched. For native input this is the wasm execute message,
    /// for cw20 input it is the payload of the cw20 `Send` hook.
    pub router_calldata: Binary,
}

#[cw_serde]
pub enum OwnerMsg {
    SetRouterAllowed {
        router: String,
        allowed: bool,
    },
    SetAssetBounds {
        asset: UncheckedDenom,
        min_amount: Uint128,
        max_amount: Uint128,
    },
    SetPlatformFee {
        rate: u64,
    },
    SetFixedCryptoFee {
        amount: Uint128,
    },
    SetIntegrator {
        integrator: String,
        fee_info: IntegratorFeeInfo,
    },
    SetFeeRecipient {
        recipient: String,
    },
    Pause {},
    Resume {},
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(bool)]
    IsInitialized {},
    #[returns(FeeConfig)]
    FeeConfig {},
    #[returns(Option<IntegratorFeeInfo>)]
    IntegratorFeeInfo { integrator: String },
    #[returns(Vec<IntegratorEntry>)]
    Integrators {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(Option<AssetBounds>)]
    AssetBounds { asset: UncheckedDenom },
    #[returns(Vec<AssetBounds>)]
    AllAssetBounds {
        start_after: Option<UncheckedDenom>,
        limit: Option<u32>,
    },
    #[returns(bool)]
    IsRouterAllowed { router: String },
    #[returns(Vec<Addr>)]
    AllowedRouters {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(TokenFee)]
    SimulateTokenFee {
        amount_with_fee: Uint128,
        integrator: Option<String>,
    },
    #[returns(CryptoFee)]
    SimulateCryptoFee { integrator: Option<String> },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
}

#[cw_serde]
#[derive(Getters, CopyGetters, Setters)]
pub struct Config {
    #[getset(get = "pub")]
    native_denom: String,
    #[getset(get = "pub", set = "pub")]
    fee_recipient: Addr,
    #[getset(get_copy = "pub", set = "pub")]
    paused: bool,
}

impl Config {
    pub fn new(native_denom: String, fee_recipient: Addr) -> Self {
        Config {
            native_denom,
            fee_recipient,
            paused: false,
        }
    }
}

#[cw_serde]
pub struct IntegratorEntry {
    pub integrator: Addr,
    pub fee_info: IntegratorFeeInfo,
}
