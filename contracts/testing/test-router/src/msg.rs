use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};
use cw20::Cw20ReceiveMsg;
use cw_denom::CheckedDenom;

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Native input arrives as funds attached to this call.
    Route(RouteInstruction),
    /// cw20 input arrives through `Send`, the hook message is a `RouteInstruction`.
    Receive(Cw20ReceiveMsg),
}

/// What the router does with the input it was handed.
#[cw_serde]
pub enum RouteInstruction {
    /// Pays `amount` of `asset` out of its own balance to `to`.
    Pay {
        asset: CheckedDenom,
        amount: Uint128,
        to: String,
    },
    /// Keeps the input and delivers nothing.
    Keep {},
    /// Executes `msg` on `contract`.
    CallBack { contract: String, msg: Binary },
    Fail { reason: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(u64)]
    RoutedCount {},
}
