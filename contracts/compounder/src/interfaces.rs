//! Cross-contract clients for the collaborators the strategy drives.
//!
//! Calls go through the generated `try_*` methods and are settled into
//! [`StrategyError::ExternalCallFailure`], so a failing collaborator aborts
//! the enclosing entry point with a typed error instead of a host trap.

use soroban_sdk::{contractclient, Address, Env, Vec};

use crate::errors::StrategyError;
use crate::types::PoolAsset;

/// Staking farm holding the basket-token position.
///
/// `stake` pulls tokens from `from` with `transfer_from`, so the strategy
/// must keep the basket token approved for the farm.
#[contractclient(name = "FarmClient")]
pub trait Farm {
    fn stake(env: Env, from: Address, pid: u32, amount: i128);
    fn unstake(env: Env, to: Address, pid: u32, amount: i128);
    fn harvest_rewards(env: Env, to: Address, pid: u32);
    /// Returns the whole position and forfeits pending rewards.
    fn emergency_exit(env: Env, to: Address, pid: u32);
    fn position_balance(env: Env, pid: u32, owner: Address) -> i128;
    fn pending_rewards(env: Env, pid: u32, owner: Address) -> i128;
}

/// Swap router executing a fixed path.
#[contractclient(name = "RouterClient")]
pub trait Router {
    fn quote_output(env: Env, amount_in: i128, path: Vec<Address>) -> i128;
    fn swap(
        env: Env,
        from: Address,
        amount_in: i128,
        min_out: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> i128;
}

/// Weighted multi-asset pool minting the basket token.
#[contractclient(name = "LiquidityPoolClient")]
pub trait LiquidityPool {
    fn current_composition(env: Env) -> Vec<PoolAsset>;
    fn join(env: Env, from: Address, assets_in: Vec<PoolAsset>, min_out: i128) -> i128;
}

/// Forwards the strategist share of harvest fees.
#[contractclient(name = "FeeRouterClient")]
pub trait FeeRouter {
    fn route_payment(env: Env, from: Address, asset: Address, amount: i128);
}

/// Collapses a `try_*` client result into the strategy's error type.
pub(crate) fn settle<T, C, I>(result: Result<Result<T, C>, I>) -> Result<T, StrategyError> {
    match result {
        Ok(Ok(value)) => Ok(value),
        _ => Err(StrategyError::ExternalCallFailure),
    }
}
