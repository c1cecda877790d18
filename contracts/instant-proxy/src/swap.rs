use cosmwasm_std::{
    coin, Addr, DepsMut, Env, Event, MessageInfo, Response, Storage, SubMsg, Uint128,
};
use valence_instant_proxy_utils::{
    asset::{asset_key, check_asset, FeeTiming, FundingKind},
    denoms::CheckedDenom,
    fees::{crypto_fee, token_fee, IntegratorFeeInfo},
    msg::SwapRequest,
};

use crate::{
    error::ContractError,
    guard::assert_initialized,
    state::{
        PendingSwap, ALLOWED_ROUTERS, ASSET_BOUNDS, CONFIG, FEE_CONFIG, INTEGRATORS, PENDING_SWAP,
    },
    transfer::{balance_of, Deliveries, TransferAdapter},
};

pub const ROUTER_CALL_REPLY_ID: u64 = 1;
pub const SWAP_EVENT_TYPE: &str = "instant_swap";
// Attribute values cannot be empty
const NO_INTEGRATOR: &str = "none";

/// Validates the request, collects the input and hands it to the router.
/// Settlement happens in [`settle`] once the router call succeeded.
pub fn execute_swap(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request: SwapRequest,
    kind: FundingKind,
    timing: FeeTiming,
) -> Result<Response, ContractError> {
    assert_initialized(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    if config.paused() {
        return Err(ContractError::Paused {});
    }

    let router = deps.api.addr_validate(&request.router)?;
    if !ALLOWED_ROUTERS.has(deps.storage, &router) {
        return Err(ContractError::RouterNotAllowed {
            router: router.to_string(),
        });
    }

    let src_asset = check_asset(deps.api, &request.src_asset)?;
    let bounds = ASSET_BOUNDS
        .may_load(deps.storage, &asset_key(&src_asset))?
        .ok_or_else(|| ContractError::AssetNotAllowed {
            asset: src_asset.to_string(),
        })?;
    if !bounds.contains(request.src_amount) {
        return Err(ContractError::AmountOutOfBounds {
            amount: request.src_amount,
            min: bounds.min_amount,
            max: bounds.max_amount,
        });
    }

    let dst_asset = check_asset(deps.api, &request.dst_asset)?;
    let recipient = deps.api.addr_validate(&request.recipient)?;
    let adapter = TransferAdapter::new(kind, &src_asset)?;

    let integrator = request
        .integrator
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let integrator_info = load_integrator(deps.storage, integrator.as_ref())?;
    let fee_config = FEE_CONFIG.load(deps.storage)?;

    let (input_fee, flat_fee) = match timing {
        FeeTiming::OnInput => (
            Some(token_fee(
                &fee_config,
                integrator_info.as_ref(),
                request.src_amount,
            )?),
            Some(crypto_fee(&fee_config, integrator_info.as_ref())?),
        ),
        FeeTiming::OnOutput => (None, None),
    };

    let forwarded = input_fee
        .as_ref()
        .map_or(request.src_amount, |fee| fee.amount_without_fee);
    if forwarded.is_zero() {
        return Err(ContractError::InvalidParameter(
            "nothing left to swap after fees".to_string(),
        ));
    }

    let attached = match &flat_fee {
        Some(fee) if !fee.total_fee.is_zero() => {
            vec![coin(fee.total_fee.u128(), config.native_denom())]
        }
        _ => vec![],
    };
    let pull_msgs =
        adapter.pull_from_caller(deps.as_ref(), &env, &info, request.src_amount, attached)?;

    // Native input is already credited at this point, cw20 input arrives with `pull_msgs`.
    // Whatever is withheld from a same-asset input stays until settlement.
    let mut baseline = balance_of(&deps.querier, &dst_asset, &env.contract.address)?;
    if src_asset == dst_asset {
        if kind == FundingKind::Fungible {
            baseline = baseline.checked_add(request.src_amount)?;
        }
        baseline = baseline.checked_sub(forwarded)?;
    }

    let router_msg = adapter.forward_to_router(&router, forwarded, request.router_calldata)?;

    PENDING_SWAP.save(
        deps.storage,
        &PendingSwap {
            router: router.clone(),
            src_asset: src_asset.clone(),
            src_amount: request.src_amount,
            dst_asset: dst_asset.clone(),
            dst_min_output_amount: request.dst_min_output_amount,
            recipient,
            integrator,
            fee_timing: timing,
            input_fee,
            crypto_fee: flat_fee,
            baseline,
        },
    )?;

    Ok(Response::new()
        .add_messages(pull_msgs)
        .add_submessage(SubMsg::reply_on_success(router_msg, ROUTER_CALL_REPLY_ID))
        .add_attribute("method", "swap")
        .add_attribute("router", router)
        .add_attribute("src_asset", src_asset.to_string())
        .add_attribute("src_amount", request.src_amount)
        .add_attribute("forwarded", forwarded))
}

/// Measures what the router delivered, enforces the minimum and pays everyone out.
pub fn settle(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let pending = PENDING_SWAP
        .may_load(deps.storage)?
        .ok_or(ContractError::NoSwapInFlight {})?;
    PENDING_SWAP.remove(deps.storage);

    let balance = balance_of(&deps.querier, &pending.dst_asset, &env.contract.address)?;
    let received = balance.saturating_sub(pending.baseline);
    if received < pending.dst_min_output_amount {
        return Err(ContractError::AmntReceivedSubAmntExpected {
            received,
            expected: pending.dst_min_output_amount,
        });
    }

    let config = CONFIG.load(deps.storage)?;
    let fees = FeeSplit {
        fee_recipient: config.fee_recipient(),
        integrator: pending.integrator.as_ref(),
    };
    let mut deliveries = Deliveries::default();

    let to_recipient = match pending.fee_timing {
        FeeTiming::OnInput => received,
        FeeTiming::OnOutput => {
            let integrator_info = load_integrator(deps.storage, pending.integrator.as_ref())?;
            let fee_config = FEE_CONFIG.load(deps.storage)?;
            let output_fee = token_fee(&fee_config, integrator_info.as_ref(), received)?;
            fees.add_to(
                &mut deliveries,
                &pending.dst_asset,
                output_fee.platform_share,
                output_fee.integrator_share,
            );
            output_fee.amount_without_fee
        }
    };
    deliveries.deliver_to(&pending.recipient, &pending.dst_asset, to_recipient);

    if let Some(fee) = &pending.input_fee {
        fees.add_to(
            &mut deliveries,
            &pending.src_asset,
            fee.platform_share,
            fee.integrator_share,
        );
    }
    if let Some(fee) = &pending.crypto_fee {
        let native = CheckedDenom::Native(config.native_denom().clone());
        fees.add_to(
            &mut deliveries,
            &native,
            fee.platform_share,
            fee.integrator_share,
        );
    }

    let msgs = deliveries.into_messages(&deps.querier, &env.contract.address)?;

    let event = Event::new(SWAP_EVENT_TYPE)
        .add_attribute("router", pending.router)
        .add_attribute("src_asset", pending.src_asset.to_string())
        .add_attribute("src_amount", pending.src_amount)
        .add_attribute("dst_asset", pending.dst_asset.to_string())
        .add_attribute("received", received)
        .add_attribute("recipient", pending.recipient)
        .add_attribute(
            "integrator",
            pending
                .integrator
                .map_or(NO_INTEGRATOR.to_string(), |addr| addr.to_string()),
        );

    Ok(Response::new()
        .add_messages(msgs)
        .add_event(event)
        .add_attribute("method", "settle")
        .add_attribute("amount_to_recipient", to_recipient))
}

fn load_integrator(
    store: &dyn Storage,
    integrator: Option<&Addr>,
) -> Result<Option<IntegratorFeeInfo>, ContractError> {
    match integrator {
        Some(addr) => Ok(INTEGRATORS.may_load(store, addr)?),
        None => Ok(None),
    }
}

struct FeeSplit<'a> {
    fee_recipient: &'a Addr,
    integrator: Option<&'a Addr>,
}

impl FeeSplit<'_> {
    fn add_to(
        &self,
        deliveries: &mut Deliveries,
        asset: &CheckedDenom,
        platform_share: Uint128,
        integrator_share: Uint128,
    ) {
        deliveries.deliver_to(self.fee_recipient, asset, platform_share);
        // Without an integrator there is no integrator share to pay
        if let Some(integrator) = self.integrator {
            deliveries.deliver_to(integrator, asset, integrator_share);
        }
    }
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::testing::{mock_dependencies, mock_env};

    use super::*;

    #[test]
    fn settle_needs_a_swap_in_flight() {
        let mut deps = mock_dependencies();
        assert_eq!(
            settle(deps.as_mut(), mock_env()),
            Err(ContractError::NoSwapInFlight {})
        );
    }
}
