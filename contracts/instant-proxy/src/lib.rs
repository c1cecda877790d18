pub mod contract;
pub mod error;
pub mod state;

mod guard;
mod registry;
mod swap;
mod transfer;

#[cfg(test)]
mod tests;

pub use crate::error::ContractError;
