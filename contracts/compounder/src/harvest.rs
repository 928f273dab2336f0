//! The claim → convert → fee → rebalance → join → stake cycle.

use soroban_sdk::{log, token, Address, Env, Vec};

use crate::allowance;
use crate::engine;
use crate::errors::StrategyError;
use crate::events;
use crate::fees;
use crate::interfaces::{settle, FarmClient, LiquidityPoolClient, RouterClient};
use crate::math::{min_out, mul_div};
use crate::rebalance;
use crate::storage;
use crate::types::{
    HarvestEstimate, HarvestRecord, PoolAsset, SlippageConfig, StrategyConfig, SwapRoute,
    UnderlyingAsset,
};

/// Runs one harvest on behalf of `caller`, who receives the call fee.
///
/// The whole cycle is one invocation: any failing step returns an error and
/// nothing it did before persists.
pub fn harvest(env: &Env, caller: &Address) -> Result<HarvestRecord, StrategyError> {
    let config = storage::config(env)?;
    let fees = storage::fees(env)?;
    let slippage = storage::slippage(env);
    let underlyings = storage::underlyings(env)?;
    let reward_route = storage::reward_route(env)?;
    let deadline = swap_deadline(env, &config);

    let targets = allowance::targets(env, &config, &underlyings, &reward_route);
    allowance::grant_all(env, &targets, config.allowance_ttl_ledgers);

    let reward_claimed = claim(env, &config)?;
    let proceeds = convert_rewards(env, &config, &reward_route, &slippage, deadline)?;

    let split = fees::distribute(env, &config, &fees, caller, proceeds)?;
    let profit = proceeds - split.fee;

    rebalance::rebalance(
        env,
        &config,
        &underlyings,
        fees.divisor,
        storage::policy(env),
        &slippage,
        deadline,
    )?;
    let basket_minted = join_pool(env, &config, &underlyings, &slippage)?;
    engine::stake_idle(env, &config)?;

    let record = HarvestRecord {
        timestamp: env.ledger().timestamp(),
        reward_claimed,
        profit,
        basket_minted,
    };
    storage::set_last_harvest(env, &record);
    events::harvested(env, caller, &record);
    Ok(record)
}

/// Profit a harvest would reinvest now and the fee its caller would earn,
/// from the farm's pending rewards and the reward route's quote.
pub fn estimate(env: &Env) -> Result<HarvestEstimate, StrategyError> {
    let config = storage::config(env)?;
    let fees = storage::fees(env)?;
    let reward_route = storage::reward_route(env)?;

    let farm = FarmClient::new(env, &config.farm);
    let pending = settle(farm.try_pending_rewards(
        &config.farm_pool_id,
        &env.current_contract_address(),
    ))?;
    if pending <= 0 {
        return Ok(HarvestEstimate {
            profit: 0,
            caller_fee: 0,
        });
    }

    let router = RouterClient::new(env, &reward_route.router);
    let gross = settle(router.try_quote_output(&pending, &reward_route.path))?;
    let fee = mul_div(gross, fees.total_fee, fees.divisor)?;
    let caller_fee = mul_div(fee, fees.call_fee, fees.divisor)?;
    Ok(HarvestEstimate {
        profit: gross - fee,
        caller_fee,
    })
}

/// Swap deadline derived from the ledger clock.
pub fn swap_deadline(env: &Env, config: &StrategyConfig) -> u64 {
    env.ledger()
        .timestamp()
        .saturating_add(config.swap_deadline_secs)
}

/// Claims farm rewards and returns the amount received.
fn claim(env: &Env, config: &StrategyConfig) -> Result<i128, StrategyError> {
    let me = env.current_contract_address();
    let reward = token::Client::new(env, &config.reward_token);
    let before = reward.balance(&me);
    let farm = FarmClient::new(env, &config.farm);
    settle(farm.try_harvest_rewards(&me, &config.farm_pool_id))?;
    let claimed = reward.balance(&me) - before;
    log!(env, "harvest claimed rewards", claimed);
    Ok(claimed)
}

/// Swaps the entire reward balance to base tokens. Returns the base amount
/// received, measured on the strategy's balance, and zero when there was
/// nothing to swap or the quote was zero.
fn convert_rewards(
    env: &Env,
    config: &StrategyConfig,
    route: &SwapRoute,
    slippage: &SlippageConfig,
    deadline: u64,
) -> Result<i128, StrategyError> {
    let me = env.current_contract_address();
    let balance = token::Client::new(env, &config.reward_token).balance(&me);
    if balance <= 0 {
        return Ok(0);
    }
    let router = RouterClient::new(env, &route.router);
    let quote = settle(router.try_quote_output(&balance, &route.path))?;
    if quote <= 0 {
        events::swap_skipped(env, &config.base_token, balance);
        return Ok(0);
    }
    let floor = min_out(quote, slippage.reward_min_out_bps)?;
    let base = token::Client::new(env, &config.base_token);
    let before = base.balance(&me);
    settle(router.try_swap(&me, &balance, &floor, &route.path, &me, &deadline))?;
    let received = base.balance(&me) - before;
    log!(env, "converted rewards to base", balance, received);
    Ok(received)
}

/// Supplies the full balance of every underlying to the pool. Returns the
/// basket tokens minted; skips the join when every balance is zero.
fn join_pool(
    env: &Env,
    config: &StrategyConfig,
    underlyings: &Vec<UnderlyingAsset>,
    slippage: &SlippageConfig,
) -> Result<i128, StrategyError> {
    let me = env.current_contract_address();
    let mut assets_in = Vec::new(env);
    let mut supplied = false;
    for asset in underlyings.iter() {
        let amount = token::Client::new(env, &asset.token).balance(&me);
        supplied |= amount > 0;
        assets_in.push_back(PoolAsset {
            token: asset.token,
            amount,
        });
    }
    if !supplied {
        return Ok(0);
    }

    let pool = LiquidityPoolClient::new(env, &config.liquidity_pool);
    let minted = settle(pool.try_join(&me, &assets_in, &slippage.join_min_out))?;
    log!(env, "joined pool", minted);
    Ok(minted)
}
