//! Privileged route and weight updates.

use soroban_sdk::{Address, Env};

use crate::allowance;
use crate::errors::StrategyError;
use crate::events;
use crate::storage;
use crate::tables;
use crate::types::{LifecycleState, SwapRoute};

pub fn update_underlying_route(
    env: &Env,
    token: &Address,
    route: SwapRoute,
) -> Result<(), StrategyError> {
    let config = storage::config(env)?;
    let reward_route = storage::reward_route(env)?;
    let mut underlyings = storage::underlyings(env)?;
    let index = tables::index_of(&underlyings, token).ok_or(StrategyError::UnknownAsset)?;
    tables::validate_underlying_route(&config, token, &route)?;

    let before = allowance::targets(env, &config, &underlyings, &reward_route);
    let mut asset = underlyings.get_unchecked(index);
    asset.route = route.clone();
    underlyings.set(index, asset);
    storage::set_underlyings(env, &underlyings);
    let after = allowance::targets(env, &config, &underlyings, &reward_route);

    allowance::reconcile(
        env,
        &before,
        &after,
        storage::state(env) == LifecycleState::Active,
        config.allowance_ttl_ledgers,
    );
    events::route_updated(env, token, &route.router, route.path.len());
    Ok(())
}

pub fn update_reward_route(env: &Env, route: SwapRoute) -> Result<(), StrategyError> {
    let config = storage::config(env)?;
    let underlyings = storage::underlyings(env)?;
    tables::validate_reward_route(&config, &route)?;

    let before = allowance::targets(env, &config, &underlyings, &storage::reward_route(env)?);
    storage::set_reward_route(env, &route);
    let after = allowance::targets(env, &config, &underlyings, &route);

    allowance::reconcile(
        env,
        &before,
        &after,
        storage::state(env) == LifecycleState::Active,
        config.allowance_ttl_ledgers,
    );
    events::route_updated(env, &config.base_token, &route.router, route.path.len());
    Ok(())
}

pub fn update_underlying_weight(
    env: &Env,
    token: &Address,
    weight: u32,
) -> Result<(), StrategyError> {
    let fees = storage::fees(env)?;
    let mut underlyings = storage::underlyings(env)?;
    let index = tables::index_of(&underlyings, token).ok_or(StrategyError::UnknownAsset)?;

    let mut asset = underlyings.get_unchecked(index);
    let old_weight = asset.weight;
    asset.weight = weight;
    underlyings.set(index, asset);
    tables::validate_weights(&underlyings, &fees)?;
    storage::set_underlyings(env, &underlyings);

    events::weight_updated(env, token, old_weight, weight);
    Ok(())
}
