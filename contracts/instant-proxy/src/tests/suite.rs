use cosmwasm_std::{coin, coins, to_json_binary, Addr, Binary, Coin, StdResult, Uint128};
use cw20::Cw20Coin;
use cw_multi_test::{error::AnyResult, App, AppResponse, ContractWrapper, Executor};
use getset::Getters;
use serde::{de::DeserializeOwned, Serialize};
use valence_instant_proxy_utils::{
    denoms::{CheckedDenom, UncheckedDenom},
    msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, OwnerMsg, QueryMsg, SwapRequest},
};
use valence_test_router::msg::{
    ExecuteMsg as RouterExecuteMsg, InstantiateMsg as RouterInstantiateMsg,
    QueryMsg as RouterQueryMsg, RouteInstruction,
};

use crate::swap::SWAP_EVENT_TYPE;

pub const NTRN: &str = "untrn";
pub const ATOM: &str = "uatom";
pub const OSMO: &str = "uosmo";

pub const PLATFORM_FEE_RATE: u64 = 30_000;
pub const FIXED_CRYPTO_FEE: u128 = 1_000;
pub const MIN_AMOUNT: u128 = 100;
pub const MAX_AMOUNT: u128 = 1_000_000;
pub const INITIAL_BALANCE: u128 = 10_000_000;

#[derive(Getters)]
pub struct InstantProxyTestSuite {
    app: App,
    #[getset(get = "pub")]
    owner: Addr,
    #[getset(get = "pub")]
    user: Addr,
    #[getset(get = "pub")]
    recipient: Addr,
    #[getset(get = "pub")]
    fee_recipient: Addr,
    #[getset(get = "pub")]
    integrator: Addr,
    #[getset(get = "pub")]
    router: Addr,
    /// cw20 held by the user, used as swap input.
    #[getset(get = "pub")]
    token_in: Addr,
    /// cw20 held by the router, used as swap output.
    #[getset(get = "pub")]
    token_out: Addr,
    #[getset(get = "pub")]
    proxy_code_id: u64,
    #[getset(get = "pub")]
    proxy: Addr,
}

impl Default for InstantProxyTestSuite {
    fn default() -> Self {
        Self::new()
    }
}

impl InstantProxyTestSuite {
    /// Proxy instantiated but not initialized.
    pub fn new() -> Self {
        let mut app = App::default();

        let owner = app.api().addr_make("owner");
        let user = app.api().addr_make("user");
        let recipient = app.api().addr_make("recipient");
        let fee_recipient = app.api().addr_make("fee_recipient");
        let integrator = app.api().addr_make("integrator");

        // Router
        let router_code = ContractWrapper::new(
            valence_test_router::contract::execute,
            valence_test_router::contract::instantiate,
            valence_test_router::contract::query,
        );
        let router_code_id = app.store_code(Box::new(router_code));
        let router = app
            .instantiate_contract(
                router_code_id,
                owner.clone(),
                &RouterInstantiateMsg {},
                &[],
                "Router",
                None,
            )
            .unwrap();

        app.init_modules(|router_modules, _, store| {
            for addr in [&user, &router] {
                router_modules
                    .bank
                    .init_balance(
                        store,
                        addr,
                        vec![coin(INITIAL_BALANCE, ATOM), coin(INITIAL_BALANCE, NTRN)],
                    )
                    .unwrap();
            }
        });

        // cw20 tokens
        let cw20_code = ContractWrapper::new(
            cw20_base::contract::execute,
            cw20_base::contract::instantiate,
            cw20_base::contract::query,
        );
        let cw20_code_id = app.store_code(Box::new(cw20_code));
        let token_in = instantiate_cw20(&mut app, cw20_code_id, &owner, "TKA", &user);
        let token_out = instantiate_cw20(&mut app, cw20_code_id, &owner, "TKB", &router);

        // Proxy
        let proxy_code = ContractWrapper::new(
            crate::contract::execute,
            crate::contract::instantiate,
            crate::contract::query,
        )
        .with_reply(crate::contract::reply)
        .with_migrate(crate::contract::migrate);
        let proxy_code_id = app.store_code(Box::new(proxy_code));
        let proxy = app
            .instantiate_contract(
                proxy_code_id,
                owner.clone(),
                &InstantiateMsg {
                    owner: Some(owner.to_string()),
                    native_denom: NTRN.to_string(),
                    fee_recipient: fee_recipient.to_string(),
                    platform_token_fee_rate: PLATFORM_FEE_RATE,
                    fixed_crypto_fee: Uint128::new(FIXED_CRYPTO_FEE),
                },
                &[],
                "Instant Proxy",
                Some(owner.to_string()),
            )
            .unwrap();

        Self {
            app,
            owner,
            user,
            recipient,
            fee_recipient,
            integrator,
            router,
            token_in,
            token_out,
            proxy_code_id,
            proxy,
        }
    }

    /// Proxy initialized with the router and every test asset allowed.
    pub fn initialized() -> Self {
        let mut suite = Self::new();
        suite.initialize(vec![suite.router.to_string()]).unwrap();
        suite
    }

    pub fn tradable_assets(&self) -> Vec<UncheckedDenom> {
        vec![
            UncheckedDenom::Native(ATOM.to_string()),
            UncheckedDenom::Native(NTRN.to_string()),
            UncheckedDenom::Cw20(self.token_in.to_string()),
            UncheckedDenom::Cw20(self.token_out.to_string()),
        ]
    }

    pub fn initialize(&mut self, routers: Vec<String>) -> AnyResult<AppResponse> {
        let assets = self.tradable_assets();
        let msg = ExecuteMsg::Initialize {
            min_amounts: vec![Uint128::new(MIN_AMOUNT); assets.len()],
            max_amounts: vec![Uint128::new(MAX_AMOUNT); assets.len()],
            routers,
            assets,
        };
        let owner = self.owner.clone();
        self.execute(&owner, &msg, &[])
    }

    pub fn execute(
        &mut self,
        sender: &Addr,
        msg: &ExecuteMsg,
        funds: &[Coin],
    ) -> AnyResult<AppResponse> {
        self.app
            .execute_contract(sender.clone(), self.proxy.clone(), msg, funds)
    }

    pub fn owner_action(&mut self, msg: OwnerMsg) -> AnyResult<AppResponse> {
        let owner = self.owner.clone();
        self.execute(&owner, &ExecuteMsg::OwnerAction(msg), &[])
    }

    pub fn approve(
        &mut self,
        holder: &Addr,
        token: &Addr,
        amount: u128,
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            holder.clone(),
            token.clone(),
            &cw20::Cw20ExecuteMsg::IncreaseAllowance {
                spender: self.proxy.to_string(),
                amount: Uint128::new(amount),
                expires: None,
            },
            &[],
        )
    }

    pub fn migrate(&mut self) -> AnyResult<AppResponse> {
        self.app.migrate_contract(
            self.owner.clone(),
            self.proxy.clone(),
            &MigrateMsg {},
            self.proxy_code_id,
        )
    }

    /// Calldata for a router receiving native funds.
    pub fn route_calldata(&self, instruction: RouteInstruction) -> Binary {
        to_json_binary(&RouterExecuteMsg::Route(instruction)).unwrap()
    }

    /// Calldata for a router receiving a cw20 `Send`.
    pub fn hook_calldata(&self, instruction: RouteInstruction) -> Binary {
        to_json_binary(&instruction).unwrap()
    }

    /// Router instruction that pays `amount` of `asset` back to the proxy.
    pub fn pay_proxy(&self, asset: CheckedDenom, amount: u128) -> RouteInstruction {
        RouteInstruction::Pay {
            asset,
            amount: Uint128::new(amount),
            to: self.proxy.to_string(),
        }
    }

    pub fn swap_request(
        &self,
        src_asset: UncheckedDenom,
        src_amount: u128,
        dst_asset: UncheckedDenom,
        dst_min_output_amount: u128,
        router_calldata: Binary,
    ) -> SwapRequest {
        SwapRequest {
            router: self.router.to_string(),
            src_asset,
            src_amount: Uint128::new(src_amount),
            dst_asset,
            dst_min_output_amount: Uint128::new(dst_min_output_amount),
            recipient: self.recipient.to_string(),
            integrator: None,
            router_calldata,
        }
    }

    pub fn query<T: DeserializeOwned>(&self, msg: &QueryMsg) -> StdResult<T> {
        self.query_wasm(&self.proxy, msg)
    }

    pub fn query_wasm<T: DeserializeOwned>(
        &self,
        addr: &Addr,
        msg: &impl Serialize,
    ) -> StdResult<T> {
        self.app.wrap().query_wasm_smart::<T>(addr, msg)
    }

    pub fn addr_make(&self, name: &str) -> Addr {
        self.app.api().addr_make(name)
    }

    pub fn native_balance(&self, addr: &Addr, denom: &str) -> u128 {
        self.app.wrap().query_balance(addr, denom).unwrap().amount.u128()
    }

    pub fn cw20_balance(&self, token: &Addr, addr: &Addr) -> u128 {
        let res: cw20::BalanceResponse = self
            .query_wasm(
                token,
                &cw20::Cw20QueryMsg::Balance {
                    address: addr.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    pub fn routed_count(&self) -> u64 {
        self.query_wasm(&self.router, &RouterQueryMsg::RoutedCount {})
            .unwrap()
    }

    /// Replaces every bank balance of `addr`.
    pub fn set_balance(&mut self, addr: &Addr, denom: &str, amount: u128) {
        self.app.init_modules(|router, _, store| {
            router
                .bank
                .init_balance(store, addr, coins(amount, denom))
                .unwrap();
        });
    }
}

fn instantiate_cw20(
    app: &mut App,
    code_id: u64,
    owner: &Addr,
    symbol: &str,
    holder: &Addr,
) -> Addr {
    let msg = cw20_base::msg::InstantiateMsg {
        name: format!("Token {symbol}"),
        symbol: symbol.to_string(),
        decimals: 6,
        initial_balances: vec![Cw20Coin {
            address: holder.to_string(),
            amount: Uint128::new(INITIAL_BALANCE),
        }],
        mint: None,
        marketing: None,
    };

    app.instantiate_contract(
        code_id,
        owner.clone(),
        &msg,
        &[],
        format!("CW20 {symbol}"),
        None,
    )
    .unwrap()
}

/// Value of `key` on the swap event of `res`, if any.
pub fn swap_event_attribute(res: &AppResponse, key: &str) -> Option<String> {
    let ty = format!("wasm-{SWAP_EVENT_TYPE}");
    res.events
        .iter()
        .filter(|event| event.ty == ty)
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.clone())
}
