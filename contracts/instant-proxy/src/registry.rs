use cosmwasm_std::{Addr, Deps, DepsMut, Empty, Order, Response, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;
use valence_instant_proxy_utils::{
    asset::{asset_key, check_asset, AssetBounds},
    denoms::UncheckedDenom,
    fees::{
        crypto_fee, token_fee, validate_rate, CryptoFee, FeeConfig, IntegratorFeeInfo, TokenFee,
    },
    msg::{Config, IntegratorEntry, Lifecycle},
};

use crate::{
    error::ContractError,
    guard::mark_initialized,
    state::{ALLOWED_ROUTERS, ASSET_BOUNDS, CONFIG, FEE_CONFIG, INTEGRATORS, LIFECYCLE},
};

// pagination info for queries
const MAX_PAGE_LIMIT: u32 = 250;

pub fn initialize(
    mut deps: DepsMut,
    routers: Vec<String>,
    assets: Vec<UncheckedDenom>,
    min_amounts: Vec<Uint128>,
    max_amounts: Vec<Uint128>,
) -> Result<Response, ContractError> {
    mark_initialized(deps.storage)?;

    if assets.len() != min_amounts.len() || assets.len() != max_amounts.len() {
        return Err(ContractError::InvalidParameter(format!(
            "{} assets, {} minimum amounts and {} maximum amounts",
            assets.len(),
            min_amounts.len(),
            max_amounts.len()
        )));
    }

    let num_routers = routers.len();
    let num_assets = assets.len();

    for router in routers {
        let router = deps.api.addr_validate(&router)?;
        ALLOWED_ROUTERS.save(deps.storage, &router, &Empty {})?;
    }

    for ((asset, min_amount), max_amount) in assets.into_iter().zip(min_amounts).zip(max_amounts) {
        save_asset_bounds(deps.branch(), asset, min_amount, max_amount)?;
    }

    Ok(Response::new()
        .add_attribute("method", "initialize")
        .add_attribute("routers", num_routers.to_string())
        .add_attribute("assets", num_assets.to_string()))
}

pub fn set_router_allowed(
    deps: DepsMut,
    router: String,
    allowed: bool,
) -> Result<Response, ContractError> {
    let router = deps.api.addr_validate(&router)?;

    if allowed {
        ALLOWED_ROUTERS.save(deps.storage, &router, &Empty {})?;
    } else {
        ALLOWED_ROUTERS.remove(deps.storage, &router);
    }

    Ok(Response::new()
        .add_attribute("method", "set_router_allowed")
        .add_attribute("router", router)
        .add_attribute("allowed", allowed.to_string()))
}

pub fn set_asset_bounds(
    deps: DepsMut,
    asset: UncheckedDenom,
    min_amount: Uint128,
    max_amount: Uint128,
) -> Result<Response, ContractError> {
    let bounds = save_asset_bounds(deps, asset, min_amount, max_amount)?;

    Ok(Response::new()
        .add_attribute("method", "set_asset_bounds")
        .add_attribute("asset", bounds.asset.to_string())
        .add_attribute("min_amount", bounds.min_amount)
        .add_attribute("max_amount", bounds.max_amount))
}

pub fn set_platform_fee(deps: DepsMut, rate: u64) -> Result<Response, ContractError> {
    validate_rate(rate).map_err(|err| ContractError::InvalidParameter(err.to_string()))?;

    FEE_CONFIG.update(deps.storage, |mut fee_config| -> StdResult<_> {
        fee_config.platform_token_fee_rate = rate;
        Ok(fee_config)
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_platform_fee")
        .add_attribute("rate", rate.to_string()))
}

pub fn set_fixed_crypto_fee(deps: DepsMut, amount: Uint128) -> Result<Response, ContractError> {
    FEE_CONFIG.update(deps.storage, |mut fee_config| -> StdResult<_> {
        fee_config.fixed_crypto_fee = amount;
        Ok(fee_config)
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_fixed_crypto_fee")
        .add_attribute("amount", amount))
}

pub fn set_integrator(
    deps: DepsMut,
    integrator: String,
    fee_info: IntegratorFeeInfo,
) -> Result<Response, ContractError> {
    let integrator = deps.api.addr_validate(&integrator)?;
    fee_info
        .validate()
        .map_err(|err| ContractError::InvalidParameter(err.to_string()))?;

    INTEGRATORS.save(deps.storage, &integrator, &fee_info)?;

    Ok(Response::new()
        .add_attribute("method", "set_integrator")
        .add_attribute("integrator", integrator)
        .add_attribute("is_active", fee_info.is_active.to_string())
        .add_attribute("token_fee_rate", fee_info.token_fee_rate.to_string())
        .add_attribute("fixed_crypto_fee", fee_info.fixed_crypto_fee))
}

pub fn set_fee_recipient(deps: DepsMut, recipient: String) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;

    CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.set_fee_recipient(recipient.clone());
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_fee_recipient")
        .add_attribute("recipient", recipient))
}

pub fn set_paused(deps: DepsMut, paused: bool) -> Result<Response, ContractError> {
    CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.set_paused(paused);
        Ok(config)
    })?;

    let method = if paused { "pause" } else { "resume" };
    Ok(Response::new().add_attribute("method", method))
}

fn save_asset_bounds(
    deps: DepsMut,
    asset: UncheckedDenom,
    min_amount: Uint128,
    max_amount: Uint128,
) -> Result<AssetBounds, ContractError> {
    if min_amount > max_amount {
        return Err(ContractError::InvalidParameter(format!(
            "minimum amount {min_amount} is greater than maximum amount {max_amount}"
        )));
    }

    let asset = asset
        .into_checked(deps.as_ref())
        .map_err(|err| ContractError::InvalidParameter(err.to_string()))?;
    let bounds = AssetBounds {
        asset,
        min_amount,
        max_amount,
    };
    ASSET_BOUNDS.save(deps.storage, &asset_key(&bounds.asset), &bounds)?;

    Ok(bounds)
}

// Reads

pub fn get_config(deps: Deps) -> StdResult<Config> {
    CONFIG.load(deps.storage)
}

pub fn is_initialized(deps: Deps) -> StdResult<bool> {
    Ok(LIFECYCLE.load(deps.storage)? == Lifecycle::Initialized)
}

pub fn get_fee_config(deps: Deps) -> StdResult<FeeConfig> {
    FEE_CONFIG.load(deps.storage)
}

pub fn get_integrator_fee_info(
    deps: Deps,
    integrator: &Addr,
) -> StdResult<Option<IntegratorFeeInfo>> {
    INTEGRATORS.may_load(deps.storage, integrator)
}

pub fn get_integrators(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<IntegratorEntry>> {
    let limit = limit.unwrap_or(MAX_PAGE_LIMIT).min(MAX_PAGE_LIMIT);
    let start_after = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_after.as_ref().map(Bound::exclusive);

    INTEGRATORS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit as usize)
        .map(|item| {
            let (integrator, fee_info) = item?;
            Ok(IntegratorEntry {
                integrator,
                fee_info,
            })
        })
        .collect()
}

pub fn get_asset_bounds(deps: Deps, asset: &UncheckedDenom) -> StdResult<Option<AssetBounds>> {
    let asset = check_asset(deps.api, asset)?;
    ASSET_BOUNDS.may_load(deps.storage, &asset_key(&asset))
}

pub fn get_all_asset_bounds(
    deps: Deps,
    start_after: Option<UncheckedDenom>,
    limit: Option<u32>,
) -> StdResult<Vec<AssetBounds>> {
    let limit = limit.unwrap_or(MAX_PAGE_LIMIT).min(MAX_PAGE_LIMIT);
    let start_after = start_after
        .map(|asset| check_asset(deps.api, &asset).map(|asset| asset_key(&asset)))
        .transpose()?;
    let start = start_after.as_deref().map(Bound::exclusive);

    ASSET_BOUNDS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit as usize)
        .map(|item| item.map(|(_, bounds)| bounds))
        .collect()
}

pub fn is_router_allowed(deps: Deps, router: &Addr) -> bool {
    ALLOWED_ROUTERS.has(deps.storage, router)
}

pub fn get_allowed_routers(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<Addr>> {
    let limit = limit.unwrap_or(MAX_PAGE_LIMIT).min(MAX_PAGE_LIMIT);
    let start_after = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_after.as_ref().map(Bound::exclusive);

    ALLOWED_ROUTERS
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit as usize)
        .collect()
}

/// Fee split a swap of `amount_with_fee` would get, using the same terms as settlement.
pub fn simulate_token_fee(
    deps: Deps,
    amount_with_fee: Uint128,
    integrator: Option<String>,
) -> StdResult<TokenFee> {
    let fee_info = integrator_terms(deps, integrator)?;
    let fee_config = FEE_CONFIG.load(deps.storage)?;
    token_fee(&fee_config, fee_info.as_ref(), amount_with_fee)
        .map_err(|err| StdError::generic_err(err.to_string()))
}

pub fn simulate_crypto_fee(deps: Deps, integrator: Option<String>) -> StdResult<CryptoFee> {
    let fee_info = integrator_terms(deps, integrator)?;
    let fee_config = FEE_CONFIG.load(deps.storage)?;
    crypto_fee(&fee_config, fee_info.as_ref())
        .map_err(|err| StdError::generic_err(err.to_string()))
}

fn integrator_terms(
    deps: Deps,
    integrator: Option<String>,
) -> StdResult<Option<IntegratorFeeInfo>> {
    match integrator {
        Some(addr) => {
            let integrator = deps.api.addr_validate(&addr)?;
            INTEGRATORS.may_load(deps.storage, &integrator)
        }
        None => Ok(None),
    }
}
