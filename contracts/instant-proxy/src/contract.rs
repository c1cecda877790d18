#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult,
};
use cw2::{get_contract_version, set_contract_version};
use valence_instant_proxy_utils::{
    asset::{FeeTiming, FundingKind},
    fees::FeeConfig,
    msg::{Config, ExecuteMsg, InstantiateMsg, Lifecycle, MigrateMsg, QueryMsg},
};

use crate::{
    error::ContractError,
    guard::assert_no_swap_in_flight,
    registry,
    state::{CONFIG, FEE_CONFIG, LIFECYCLE},
    swap::{execute_swap, settle, ROUTER_CALL_REPLY_ID},
};

// version info for migration info
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = msg.owner.unwrap_or(info.sender.to_string());
    cw_ownable::initialize_owner(deps.storage, deps.api, Some(&owner))?;

    let fee_config = FeeConfig {
        platform_token_fee_rate: msg.platform_token_fee_rate,
        fixed_crypto_fee: msg.fixed_crypto_fee,
    };
    fee_config
        .validate()
        .map_err(|err| ContractError::InvalidParameter(err.to_string()))?;
    if msg.native_denom.is_empty() {
        return Err(ContractError::InvalidParameter(
            "native denom cannot be empty".to_string(),
        ));
    }
    let fee_recipient = deps.api.addr_validate(&msg.fee_recipient)?;

    LIFECYCLE.save(deps.storage, &Lifecycle::Uninitialized)?;
    CONFIG.save(deps.storage, &Config::new(msg.native_denom, fee_recipient))?;
    FEE_CONFIG.save(deps.storage, &fee_config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    assert_no_swap_in_flight(deps.storage)?;

    match msg {
        ExecuteMsg::Initialize {
            routers,
            assets,
            min_amounts,
            max_amounts,
        } => execute::initialize(deps, info, routers, assets, min_amounts, max_amounts),
        ExecuteMsg::Swap(request) => execute_swap(
            deps,
            env,
            info,
            request,
            FundingKind::Fungible,
            FeeTiming::OnOutput,
        ),
        ExecuteMsg::SwapWithFee(request) => execute_swap(
            deps,
            env,
            info,
            request,
            FundingKind::Fungible,
            FeeTiming::OnInput,
        ),
        ExecuteMsg::SwapNative(request) => execute_swap(
            deps,
            env,
            info,
            request,
            FundingKind::Native,
            FeeTiming::OnOutput,
        ),
        ExecuteMsg::SwapNativeWithFee(request) => execute_swap(
            deps,
            env,
            info,
            request,
            FundingKind::Native,
            FeeTiming::OnInput,
        ),
        ExecuteMsg::OwnerAction(owner_msg) => execute::owner_action(deps, info, owner_msg),
        ExecuteMsg::UpdateOwnership(action) => {
            let ownership =
                cw_ownable::update_ownership(deps, &env.block, &info.sender, action)?;
            Ok(Response::new()
                .add_attribute("method", "update_ownership")
                .add_attributes(ownership.into_attributes()))
        }
    }
}

mod execute {
    use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};
    use valence_instant_proxy_utils::{denoms::UncheckedDenom, msg::OwnerMsg};

    use crate::{error::ContractError, guard::assert_owner, registry};

    pub fn initialize(
        deps: DepsMut,
        info: MessageInfo,
        routers: Vec<String>,
        assets: Vec<UncheckedDenom>,
        min_amounts: Vec<Uint128>,
        max_amounts: Vec<Uint128>,
    ) -> Result<Response, ContractError> {
        assert_owner(deps.storage, &info.sender)?;
        registry::initialize(deps, routers, assets, min_amounts, max_amounts)
    }

    pub fn owner_action(
        deps: DepsMut,
        info: MessageInfo,
        msg: OwnerMsg,
    ) -> Result<Response, ContractError> {
        assert_owner(deps.storage, &info.sender)?;

        match msg {
            OwnerMsg::SetRouterAllowed { router, allowed } => {
                registry::set_router_allowed(deps, router, allowed)
            }
            OwnerMsg::SetAssetBounds {
                asset,
                min_amount,
                max_amount,
            } => registry::set_asset_bounds(deps, asset, min_amount, max_amount),
            OwnerMsg::SetPlatformFee { rate } => registry::set_platform_fee(deps, rate),
            OwnerMsg::SetFixedCryptoFee { amount } => registry::set_fixed_crypto_fee(deps, amount),
            OwnerMsg::SetIntegrator {
                integrator,
                fee_info,
            } => registry::set_integrator(deps, integrator, fee_info),
            OwnerMsg::SetFeeRecipient { recipient } => {
                registry::set_fee_recipient(deps, recipient)
            }
            OwnerMsg::Pause {} => registry::set_paused(deps, true),
            OwnerMsg::Resume {} => registry::set_paused(deps, false),
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        ROUTER_CALL_REPLY_ID => settle(deps, env),
        _ => Err(ContractError::UnknownReplyId(msg.id)),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Ownership {} => to_json_binary(&cw_ownable::get_ownership(deps.storage)?),
        QueryMsg::Config {} => to_json_binary(&registry::get_config(deps)?),
        QueryMsg::IsInitialized {} => to_json_binary(&registry::is_initialized(deps)?),
        QueryMsg::FeeConfig {} => to_json_binary(&registry::get_fee_config(deps)?),
        QueryMsg::IntegratorFeeInfo { integrator } => {
            let integrator = deps.api.addr_validate(&integrator)?;
            to_json_binary(&registry::get_integrator_fee_info(deps, &integrator)?)
        }
        QueryMsg::Integrators { start_after, limit } => {
            to_json_binary(&registry::get_integrators(deps, start_after, limit)?)
        }
        QueryMsg::AssetBounds { asset } => {
            to_json_binary(&registry::get_asset_bounds(deps, &asset)?)
        }
        QueryMsg::AllAssetBounds { start_after, limit } => {
            to_json_binary(&registry::get_all_asset_bounds(deps, start_after, limit)?)
        }
        QueryMsg::IsRouterAllowed { router } => {
            let router = deps.api.addr_validate(&router)?;
            to_json_binary(&registry::is_router_allowed(deps, &router))
        }
        QueryMsg::AllowedRouters { start_after, limit } => {
            to_json_binary(&registry::get_allowed_routers(deps, start_after, limit)?)
        }
        QueryMsg::SimulateTokenFee {
            amount_with_fee,
            integrator,
        } => to_json_binary(&registry::simulate_token_fee(
            deps,
            amount_with_fee,
            integrator,
        )?),
        QueryMsg::SimulateCryptoFee { integrator } => {
            to_json_binary(&registry::simulate_crypto_fee(deps, integrator)?)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::InvalidParameter(format!(
            "cannot migrate from {} to {CONTRACT_NAME}",
            stored.contract
        )));
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
