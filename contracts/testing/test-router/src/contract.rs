#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_json, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    WasmMsg,
};

use crate::{
    error::ContractError,
    msg::{ExecuteMsg, InstantiateMsg, QueryMsg, RouteInstruction},
    state::ROUTED,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    ROUTED.save(deps.storage, &0)?;
    Ok(Response::new().add_attribute("method", "instantiate"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Route(instruction) => route(deps, instruction),
        ExecuteMsg::Receive(receive_msg) => route(deps, from_json(&receive_msg.msg)?),
    }
}

fn route(deps: DepsMut, instruction: RouteInstruction) -> Result<Response, ContractError> {
    let response = match instruction {
        RouteInstruction::Pay { asset, amount, to } => {
            let to = deps.api.addr_validate(&to)?;
            Response::new().add_message(asset.get_transfer_to_message(&to, amount)?)
        }
        RouteInstruction::Keep {} => Response::new(),
        RouteInstruction::CallBack { contract, msg } => {
            Response::new().add_message(WasmMsg::Execute {
                contract_addr: contract,
                msg,
                funds: vec![],
            })
        }
        RouteInstruction::Fail { reason } => return Err(ContractError::RouteFailed(reason)),
    };

    ROUTED.update(deps.storage, |count| -> StdResult<_> { Ok(count + 1) })?;

    Ok(response.add_attribute("method", "route"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::RoutedCount {} => to_json_binary(&ROUTED.load(deps.storage)?),
    }
}
