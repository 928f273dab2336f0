//! Pause, unpause and panic.
//!
//! Allowances follow the lifecycle: granted while active, zero while paused.
//! State and allowances are updated before any external call.

use soroban_sdk::{token, Address, Env, Vec};

use crate::allowance;
use crate::engine;
use crate::errors::StrategyError;
use crate::events;
use crate::interfaces::{settle, FarmClient};
use crate::storage;
use crate::types::{AllowanceTarget, LifecycleState, StrategyConfig};

pub fn pause(env: &Env, caller: &Address) -> Result<(), StrategyError> {
    let config = storage::config(env)?;
    if storage::state(env) == LifecycleState::Paused {
        return Err(StrategyError::Paused);
    }
    enter_paused(env, &config)?;
    events::pause_changed(env, true, caller);
    Ok(())
}

/// Restores allowances and stakes whatever sits idle.
pub fn unpause(env: &Env, caller: &Address) -> Result<(), StrategyError> {
    let config = storage::config(env)?;
    if storage::state(env) == LifecycleState::Active {
        return Err(StrategyError::NotPaused);
    }
    storage::set_state(env, LifecycleState::Active);
    allowance::grant_all(env, &current_targets(env, &config)?, config.allowance_ttl_ledgers);
    engine::stake_idle(env, &config)?;
    events::pause_changed(env, false, caller);
    Ok(())
}

/// Pulls the whole position out of the farm, forfeiting pending rewards,
/// and pauses if still active. Returns the basket tokens recovered.
pub fn panic(env: &Env, caller: &Address) -> Result<i128, StrategyError> {
    let config = storage::config(env)?;
    let was_active = storage::state(env) == LifecycleState::Active;
    if was_active {
        enter_paused(env, &config)?;
    }

    let me = env.current_contract_address();
    let basket = token::Client::new(env, &config.basket_token);
    let before = basket.balance(&me);
    let farm = FarmClient::new(env, &config.farm);
    settle(farm.try_emergency_exit(&me, &config.farm_pool_id))?;
    let recovered = basket.balance(&me) - before;

    if was_active {
        events::pause_changed(env, true, caller);
    }
    events::panicked(env, caller, recovered);
    Ok(recovered)
}

/// Moves to Paused and zeroes every allowance. Also used by retirement.
pub fn enter_paused(env: &Env, config: &StrategyConfig) -> Result<(), StrategyError> {
    storage::set_state(env, LifecycleState::Paused);
    allowance::revoke_all(env, &current_targets(env, config)?);
    Ok(())
}

pub fn current_targets(
    env: &Env,
    config: &StrategyConfig,
) -> Result<Vec<AllowanceTarget>, StrategyError> {
    let underlyings = storage::underlyings(env)?;
    let reward_route = storage::reward_route(env)?;
    Ok(allowance::targets(env, config, &underlyings, &reward_route))
}
