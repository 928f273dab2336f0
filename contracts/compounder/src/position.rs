use soroban_sdk::{token, Env};

use crate::errors::StrategyError;
use crate::interfaces::{settle, FarmClient};
use crate::types::StrategyConfig;

/// Basket tokens held directly by the strategy.
pub fn idle(env: &Env, config: &StrategyConfig) -> i128 {
    token::Client::new(env, &config.basket_token).balance(&env.current_contract_address())
}

/// Basket tokens the farm reports for this strategy's position.
pub fn staked(env: &Env, config: &StrategyConfig) -> Result<i128, StrategyError> {
    let farm = FarmClient::new(env, &config.farm);
    settle(farm.try_position_balance(&config.farm_pool_id, &env.current_contract_address()))
}

pub fn total(env: &Env, config: &StrategyConfig) -> Result<i128, StrategyError> {
    idle(env, config)
        .checked_add(staked(env, config)?)
        .ok_or(StrategyError::MathOverflow)
}
