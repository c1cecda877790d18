use std::collections::BTreeMap;

use cosmwasm_std::{
    coin, to_json_binary, Addr, Binary, Coin, CosmosMsg, Deps, Env, MessageInfo, QuerierWrapper,
    StdResult, Uint128, WasmMsg,
};
use cw20::{AllowanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_utils::NativeBalance;
use itertools::Itertools;
use valence_instant_proxy_utils::{
    asset::{asset_key, FundingKind},
    denoms::CheckedDenom,
};

use crate::error::ContractError;

/// Moves the source asset of a swap, one variant per funding kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferAdapter {
    Fungible { token: Addr },
    Native { denom: String },
}

impl TransferAdapter {
    pub fn new(kind: FundingKind, asset: &CheckedDenom) -> Result<Self, ContractError> {
        match (kind, asset) {
            (FundingKind::Fungible, CheckedDenom::Cw20(token)) => Ok(TransferAdapter::Fungible {
                token: token.clone(),
            }),
            (FundingKind::Native, CheckedDenom::Native(denom)) => Ok(TransferAdapter::Native {
                denom: denom.clone(),
            }),
            _ => Err(ContractError::InvalidParameter(format!(
                "{asset} cannot be used as input of a {kind} swap"
            ))),
        }
    }

    /// Checks what the caller supplies and returns the messages that move `amount` into the
    /// proxy. `attached` is what has to come with the call besides the input itself.
    pub fn pull_from_caller(
        &self,
        deps: Deps,
        env: &Env,
        info: &MessageInfo,
        amount: Uint128,
        attached: Vec<Coin>,
    ) -> Result<Vec<CosmosMsg>, ContractError> {
        match self {
            TransferAdapter::Fungible { token } => {
                assert_exact_funds(&info.funds, attached)?;

                let allowance: AllowanceResponse = deps.querier.query_wasm_smart(
                    token,
                    &Cw20QueryMsg::Allowance {
                        owner: info.sender.to_string(),
                        spender: env.contract.address.to_string(),
                    },
                )?;
                let available = if allowance.expires.is_expired(&env.block) {
                    Uint128::zero()
                } else {
                    allowance.allowance
                };
                if available < amount {
                    return Err(ContractError::InsufficientAllowance {
                        available,
                        required: amount,
                    });
                }

                let balance = balance_of(
                    &deps.querier,
                    &CheckedDenom::Cw20(token.clone()),
                    &info.sender,
                )?;
                if balance < amount {
                    return Err(ContractError::InsufficientBalance {
                        available: balance,
                        required: amount,
                    });
                }

                Ok(vec![CosmosMsg::Wasm(WasmMsg::Execute {
                    contract_addr: token.to_string(),
                    msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                        owner: info.sender.to_string(),
                        recipient: env.contract.address.to_string(),
                        amount,
                    })?,
                    funds: vec![],
                })])
            }
            TransferAdapter::Native { denom } => {
                let mut required = attached;
                required.push(coin(amount.u128(), denom));
                assert_exact_funds(&info.funds, required)?;

                // Already credited to the proxy by the time it executes
                Ok(vec![])
            }
        }
    }

    /// Hands `amount` to the router together with the caller's instructions.
    pub fn forward_to_router(
        &self,
        router: &Addr,
        amount: Uint128,
        calldata: Binary,
    ) -> StdResult<CosmosMsg> {
        let msg = match self {
            TransferAdapter::Fungible { token } => WasmMsg::Execute {
                contract_addr: token.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::Send {
                    contract: router.to_string(),
                    amount,
                    msg: calldata,
                })?,
                funds: vec![],
            },
            TransferAdapter::Native { denom } => WasmMsg::Execute {
                contract_addr: router.to_string(),
                msg: calldata,
                funds: vec![coin(amount.u128(), denom)],
            },
        };
        Ok(CosmosMsg::Wasm(msg))
    }
}

pub fn balance_of(
    querier: &QuerierWrapper,
    asset: &CheckedDenom,
    holder: &Addr,
) -> StdResult<Uint128> {
    asset.query_balance(querier, holder)
}

/// Outgoing transfers of one settlement. Either every entry is paid in full or none is.
#[derive(Debug, Default)]
pub struct Deliveries(Vec<(CheckedDenom, Addr, Uint128)>);

impl Deliveries {
    pub fn deliver_to(&mut self, recipient: &Addr, asset: &CheckedDenom, amount: Uint128) {
        if !amount.is_zero() {
            self.0.push((asset.clone(), recipient.clone(), amount));
        }
    }

    /// Verifies `holder` covers the total of every asset, then builds the transfers.
    pub fn into_messages(
        self,
        querier: &QuerierWrapper,
        holder: &Addr,
    ) -> Result<Vec<CosmosMsg>, ContractError> {
        let mut totals: BTreeMap<String, (&CheckedDenom, Uint128)> = BTreeMap::new();
        for (asset, _, amount) in &self.0 {
            let entry = totals
                .entry(asset_key(asset))
                .or_insert((asset, Uint128::zero()));
            entry.1 = entry.1.checked_add(*amount)?;
        }

        for (asset, total) in totals.values() {
            if balance_of(querier, asset, holder)? < *total {
                return Err(ContractError::TransferFailed {
                    asset: asset.to_string(),
                    amount: *total,
                });
            }
        }

        Ok(self
            .0
            .iter()
            .map(|(asset, recipient, amount)| asset.get_transfer_to_message(recipient, *amount))
            .collect::<StdResult<Vec<CosmosMsg>>>()?)
    }
}

fn assert_exact_funds(funds: &[Coin], required: Vec<Coin>) -> Result<(), ContractError> {
    let mut expected = NativeBalance(required);
    expected.normalize();
    let mut received = NativeBalance(funds.to_vec());
    received.normalize();

    if expected != received {
        return Err(ContractError::ValueMismatch {
            expected: expected.0.iter().join(","),
            received: received.0.iter().join(","),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::{
        coins,
        testing::{message_info, mock_dependencies, mock_dependencies_with_balance, mock_env},
        BankMsg,
    };

    use super::*;

    const NTRN: &str = "untrn";
    const ATOM: &str = "uatom";

    #[test]
    fn adapter_must_match_funding_kind() {
        let token = CheckedDenom::Cw20(Addr::unchecked("token"));
        let native = CheckedDenom::Native(NTRN.to_string());

        assert!(TransferAdapter::new(FundingKind::Fungible, &token).is_ok());
        assert!(TransferAdapter::new(FundingKind::Native, &native).is_ok());
        assert!(matches!(
            TransferAdapter::new(FundingKind::Native, &token),
            Err(ContractError::InvalidParameter(_))
        ));
        assert!(matches!(
            TransferAdapter::new(FundingKind::Fungible, &native),
            Err(ContractError::InvalidParameter(_))
        ));
    }

    #[test]
    fn native_pull_requires_exact_funds() {
        let deps = mock_dependencies();
        let env = mock_env();
        let sender = deps.api.addr_make("sender");
        let adapter = TransferAdapter::Native {
            denom: ATOM.to_string(),
        };
        let fee = vec![coin(5, NTRN)];

        // Input plus flat fee, in any order, is accepted and needs no message
        let info = message_info(&sender, &[coin(5, NTRN), coin(100, ATOM)]);
        let msgs = adapter
            .pull_from_caller(deps.as_ref(), &env, &info, Uint128::new(100), fee.clone())
            .unwrap();
        assert!(msgs.is_empty());

        // Missing the flat fee
        let info = message_info(&sender, &coins(100, ATOM));
        assert_eq!(
            adapter.pull_from_caller(deps.as_ref(), &env, &info, Uint128::new(100), fee.clone()),
            Err(ContractError::ValueMismatch {
                expected: "100uatom,5untrn".to_string(),
                received: "100uatom".to_string(),
            })
        );

        // Overpaying is rejected as well
        let info = message_info(&sender, &[coin(6, NTRN), coin(100, ATOM)]);
        assert!(matches!(
            adapter.pull_from_caller(deps.as_ref(), &env, &info, Uint128::new(100), fee),
            Err(ContractError::ValueMismatch { .. })
        ));
    }

    #[test]
    fn native_pull_merges_fee_and_input_of_same_denom() {
        let deps = mock_dependencies();
        let env = mock_env();
        let sender = deps.api.addr_make("sender");
        let adapter = TransferAdapter::Native {
            denom: NTRN.to_string(),
        };

        let info = message_info(&sender, &coins(105, NTRN));
        adapter
            .pull_from_caller(
                deps.as_ref(),
                &env,
                &info,
                Uint128::new(100),
                coins(5, NTRN),
            )
            .unwrap();
    }

    #[test]
    fn native_forward_attaches_funds() {
        let router = Addr::unchecked("router");
        let adapter = TransferAdapter::Native {
            denom: NTRN.to_string(),
        };
        let calldata = Binary::from(b"{}".to_vec());

        let msg = adapter
            .forward_to_router(&router, Uint128::new(42), calldata.clone())
            .unwrap();
        assert_eq!(
            msg,
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: router.to_string(),
                msg: calldata,
                funds: coins(42, NTRN),
            })
        );
    }

    #[test]
    fn deliveries_are_all_or_nothing() {
        let deps = mock_dependencies_with_balance(&coins(150, NTRN));
        let holder = mock_env().contract.address;
        let asset = CheckedDenom::Native(NTRN.to_string());
        let alice = deps.api.addr_make("alice");
        let bob = deps.api.addr_make("bob");

        let mut deliveries = Deliveries::default();
        deliveries.deliver_to(&alice, &asset, Uint128::new(100));
        deliveries.deliver_to(&bob, &asset, Uint128::new(50));
        deliveries.deliver_to(&bob, &asset, Uint128::zero());
        let msgs = deliveries
            .into_messages(&deps.as_ref().querier, &holder)
            .unwrap();
        assert_eq!(
            msgs,
            vec![
                CosmosMsg::Bank(BankMsg::Send {
                    to_address: alice.to_string(),
                    amount: coins(100, NTRN),
                }),
                CosmosMsg::Bank(BankMsg::Send {
                    to_address: bob.to_string(),
                    amount: coins(50, NTRN),
                }),
            ]
        );

        let mut deliveries = Deliveries::default();
        deliveries.deliver_to(&alice, &asset, Uint128::new(100));
        deliveries.deliver_to(&bob, &asset, Uint128::new(51));
        assert_eq!(
            deliveries.into_messages(&deps.as_ref().querier, &holder),
            Err(ContractError::TransferFailed {
                asset: NTRN.to_string(),
                amount: Uint128::new(151),
            })
        );
    }
}
