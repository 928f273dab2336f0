//! Route and weight tables.
//!
//! Basket members are kept as one ordered `Vec<UnderlyingAsset>` whose order
//! must match the pool's composition; the reward route is stored on its own
//! because the reward token may also be a basket member.

use soroban_sdk::{Address, Vec};

use crate::errors::StrategyError;
use crate::types::{FeeSchedule, PoolAsset, StrategyConfig, SwapRoute, UnderlyingAsset};

pub fn index_of(underlyings: &Vec<UnderlyingAsset>, token: &Address) -> Option<u32> {
    underlyings
        .iter()
        .position(|asset| asset.token == *token)
        .map(|index| index as u32)
}

pub fn weight_sum(underlyings: &Vec<UnderlyingAsset>) -> u64 {
    underlyings.iter().map(|asset| asset.weight as u64).sum()
}

/// Reward routes run reward token → base token over at least one hop.
pub fn validate_reward_route(config: &StrategyConfig, route: &SwapRoute) -> Result<(), StrategyError> {
    check_path(&route.path, &config.reward_token, &config.base_token)
}

/// Underlying routes run base token → `token`; the base token itself uses
/// the single-element `[base]` marker.
pub fn validate_underlying_route(
    config: &StrategyConfig,
    token: &Address,
    route: &SwapRoute,
) -> Result<(), StrategyError> {
    if *token == config.base_token {
        return match route.path.first() {
            Some(only) if route.path.len() == 1 && only == config.base_token => Ok(()),
            _ => Err(StrategyError::InvalidRoute),
        };
    }
    check_path(&route.path, &config.base_token, token)
}

fn check_path(path: &Vec<Address>, from: &Address, to: &Address) -> Result<(), StrategyError> {
    if path.len() < 2 {
        return Err(StrategyError::InvalidRoute);
    }
    match (path.first(), path.last()) {
        (Some(first), Some(last)) if first == *from && last == *to => Ok(()),
        _ => Err(StrategyError::InvalidRoute),
    }
}

/// Weights may sum to less than the divisor; the residue stays in the base
/// token and joins the pool only if the base token is a basket member.
pub fn validate_weights(
    underlyings: &Vec<UnderlyingAsset>,
    fees: &FeeSchedule,
) -> Result<(), StrategyError> {
    if weight_sum(underlyings) > fees.divisor as u64 {
        return Err(StrategyError::InvalidWeight);
    }
    Ok(())
}

pub fn validate_underlyings(
    config: &StrategyConfig,
    fees: &FeeSchedule,
    underlyings: &Vec<UnderlyingAsset>,
) -> Result<(), StrategyError> {
    if underlyings.is_empty() {
        return Err(StrategyError::ConfigurationError);
    }
    for (i, asset) in underlyings.iter().enumerate() {
        if index_of(underlyings, &asset.token) != Some(i as u32) {
            return Err(StrategyError::InvalidWeight);
        }
        validate_underlying_route(config, &asset.token, &asset.route)?;
    }
    validate_weights(underlyings, fees)
}

/// Declared basket members must be the pool's tokens, in the pool's order.
pub fn check_composition(
    underlyings: &Vec<UnderlyingAsset>,
    composition: &Vec<PoolAsset>,
) -> Result<(), StrategyError> {
    if underlyings.len() != composition.len() {
        return Err(StrategyError::ConfigurationError);
    }
    let matches = underlyings
        .iter()
        .zip(composition.iter())
        .all(|(asset, member)| asset.token == member.token);
    if !matches {
        return Err(StrategyError::ConfigurationError);
    }
    Ok(())
}
