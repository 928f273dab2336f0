//! Moves basket tokens between the strategy, the farm and the vault.

use soroban_sdk::{log, token, Env};

use crate::errors::StrategyError;
use crate::events;
use crate::fees;
use crate::interfaces::{settle, FarmClient};
use crate::position;
use crate::types::{FeeSchedule, StrategyConfig};

/// Stakes the whole idle basket balance. Returns the amount staked; zero
/// idle is a no-op.
pub fn stake_idle(env: &Env, config: &StrategyConfig) -> Result<i128, StrategyError> {
    let idle = position::idle(env, config);
    if idle <= 0 {
        return Ok(0);
    }
    let farm = FarmClient::new(env, &config.farm);
    settle(farm.try_stake(
        &env.current_contract_address(),
        &config.farm_pool_id,
        &idle,
    ))?;
    log!(env, "staked idle basket tokens", idle);
    events::deposited(env, idle);
    Ok(idle)
}

/// Pays `amount` minus the security fee to the vault, unstaking the
/// shortfall from the farm first. Returns the payout.
///
/// The farm may return more than asked; the excess stays idle.
pub fn withdraw(
    env: &Env,
    config: &StrategyConfig,
    fees: &FeeSchedule,
    amount: i128,
) -> Result<i128, StrategyError> {
    if amount <= 0 {
        return Err(StrategyError::InvalidAmount);
    }
    let me = env.current_contract_address();
    let basket = token::Client::new(env, &config.basket_token);

    let mut idle = basket.balance(&me);
    if idle < amount {
        let shortfall = amount - idle;
        if position::staked(env, config)? < shortfall {
            return Err(StrategyError::InsufficientLiquidity);
        }
        let farm = FarmClient::new(env, &config.farm);
        settle(farm.try_unstake(&me, &config.farm_pool_id, &shortfall))?;
        idle = basket.balance(&me);
        if idle < amount {
            return Err(StrategyError::InsufficientLiquidity);
        }
    }

    let fee = fees::security_fee(amount, fees)?;
    let payout = amount - fee;
    if payout > 0 {
        basket.transfer(&me, &config.vault, &payout);
    }
    events::withdrawn(env, amount, fee, payout);
    Ok(payout)
}

/// Exits the farm and sends every basket and reward token to the vault.
/// Returns the basket amount sent.
pub fn retire(env: &Env, config: &StrategyConfig) -> Result<i128, StrategyError> {
    let me = env.current_contract_address();
    let farm = FarmClient::new(env, &config.farm);
    settle(farm.try_emergency_exit(&me, &config.farm_pool_id))?;

    let basket = token::Client::new(env, &config.basket_token);
    let basket_returned = basket.balance(&me);
    if basket_returned > 0 {
        basket.transfer(&me, &config.vault, &basket_returned);
    }

    let reward = token::Client::new(env, &config.reward_token);
    let reward_returned = reward.balance(&me);
    if reward_returned > 0 {
        reward.transfer(&me, &config.vault, &reward_returned);
    }

    events::retired(env, basket_returned, reward_returned);
    Ok(basket_returned)
}
