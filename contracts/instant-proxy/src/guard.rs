use cosmwasm_std::{Addr, Storage};
use cw_ownable::is_owner;
use valence_instant_proxy_utils::msg::Lifecycle;

use crate::{
    error::ContractError,
    state::{LIFECYCLE, PENDING_SWAP},
};

pub fn assert_owner(store: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if !is_owner(store, sender)? {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

/// Every execute path goes through this check, so a router cannot call back into the
/// proxy while the swap that invoked it is unsettled.
pub fn assert_no_swap_in_flight(store: &dyn Storage) -> Result<(), ContractError> {
    if PENDING_SWAP.exists(store) {
        return Err(ContractError::ReentrantCall {});
    }
    Ok(())
}

pub fn assert_initialized(store: &dyn Storage) -> Result<(), ContractError> {
    match LIFECYCLE.load(store)? {
        Lifecycle::Initialized => Ok(()),
        Lifecycle::Uninitialized => Err(ContractError::NotInitialized {}),
    }
}

/// Moves the contract from `Uninitialized` to `Initialized`. There is no way back.
pub fn mark_initialized(store: &mut dyn Storage) -> Result<(), ContractError> {
    match LIFECYCLE.load(store)? {
        Lifecycle::Uninitialized => Ok(LIFECYCLE.save(store, &Lifecycle::Initialized)?),
        Lifecycle::Initialized => Err(ContractError::AlreadyInitialized {}),
    }
}
