//! Spending rights granted to the farm, routers, pool and fee router.
//!
//! Soroban allowances expire and are drawn down by `transfer_from`, so
//! grants are topped up at the start of every active-path invocation as
//! well as on unpause.

use soroban_sdk::{token, Address, Env, Vec};

use crate::storage::DAY_IN_LEDGERS;
use crate::types::{AllowanceTarget, StrategyConfig, SwapRoute, UnderlyingAsset};

/// Longest allowance lifetime accepted at initialization.
pub const MAX_TTL_LEDGERS: u32 = 30 * DAY_IN_LEDGERS;

/// Every (token, spender) pair the strategy needs while active, without
/// duplicates.
pub fn targets(
    env: &Env,
    config: &StrategyConfig,
    underlyings: &Vec<UnderlyingAsset>,
    reward_route: &SwapRoute,
) -> Vec<AllowanceTarget> {
    let mut targets = Vec::new(env);
    push_unique(&mut targets, &config.basket_token, &config.farm);
    push_unique(&mut targets, &config.reward_token, &reward_route.router);
    for asset in underlyings.iter() {
        if asset.token != config.base_token {
            push_unique(&mut targets, &config.base_token, &asset.route.router);
        }
        push_unique(&mut targets, &asset.token, &config.liquidity_pool);
    }
    push_unique(&mut targets, &config.base_token, &config.fee_router);
    targets
}

fn push_unique(targets: &mut Vec<AllowanceTarget>, token: &Address, spender: &Address) {
    let target = AllowanceTarget {
        token: token.clone(),
        spender: spender.clone(),
    };
    if !targets.contains(&target) {
        targets.push_back(target);
    }
}

/// Raises every allowance to `i128::MAX`; pairs already at the maximum are
/// left untouched.
pub fn grant_all(env: &Env, targets: &Vec<AllowanceTarget>, ttl_ledgers: u32) {
    let me = env.current_contract_address();
    let expiration = env.ledger().sequence().saturating_add(ttl_ledgers);
    for target in targets.iter() {
        let client = token::Client::new(env, &target.token);
        if client.allowance(&me, &target.spender) < i128::MAX {
            client.approve(&me, &target.spender, &i128::MAX, &expiration);
        }
    }
}

pub fn revoke_all(env: &Env, targets: &Vec<AllowanceTarget>) {
    let me = env.current_contract_address();
    let ledger = env.ledger().sequence();
    for target in targets.iter() {
        token::Client::new(env, &target.token).approve(&me, &target.spender, &0, &ledger);
    }
}

/// Revokes pairs dropped by a route change and, when active, grants the new
/// set.
pub fn reconcile(
    env: &Env,
    before: &Vec<AllowanceTarget>,
    after: &Vec<AllowanceTarget>,
    active: bool,
    ttl_ledgers: u32,
) {
    let mut stale = Vec::new(env);
    for target in before.iter() {
        if !after.contains(&target) {
            stale.push_back(target);
        }
    }
    revoke_all(env, &stale);
    if active {
        grant_all(env, after, ttl_ledgers);
    }
}
