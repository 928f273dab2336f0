//! Converts base tokens into the basket's underlying assets.

use soroban_sdk::{log, token, Env, Vec};

use crate::errors::StrategyError;
use crate::events;
use crate::interfaces::{settle, RouterClient};
use crate::math::{min_out, mul_div};
use crate::types::{AllocationPolicy, SlippageConfig, StrategyConfig, UnderlyingAsset};

/// Base tokens routed toward one underlying asset.
pub fn target_amount(basis: i128, weight: u32, divisor: u32) -> Result<i128, StrategyError> {
    mul_div(basis, weight, divisor)
}

/// Swaps base tokens into every non-base underlying per its weight.
///
/// Under [`AllocationPolicy::FixedSnapshot`] each weight applies to the base
/// balance read before the first swap; under
/// [`AllocationPolicy::RemainingBalance`] it applies to the balance left
/// after the earlier swaps. Assets whose quote is zero are skipped. Returns
/// the base amount routed.
pub fn rebalance(
    env: &Env,
    config: &StrategyConfig,
    underlyings: &Vec<UnderlyingAsset>,
    divisor: u32,
    policy: AllocationPolicy,
    slippage: &SlippageConfig,
    deadline: u64,
) -> Result<i128, StrategyError> {
    let me = env.current_contract_address();
    let base = token::Client::new(env, &config.base_token);
    let snapshot = base.balance(&me);
    let mut routed = 0_i128;

    for asset in underlyings.iter() {
        if asset.token == config.base_token {
            continue;
        }
        let basis = match policy {
            AllocationPolicy::FixedSnapshot => snapshot,
            AllocationPolicy::RemainingBalance => base.balance(&me),
        };
        let amount_in = target_amount(basis, asset.weight, divisor)?;
        if amount_in <= 0 {
            continue;
        }

        let router = RouterClient::new(env, &asset.route.router);
        let quote = settle(router.try_quote_output(&amount_in, &asset.route.path))?;
        if quote <= 0 {
            log!(env, "zero quote, skipping swap", asset.token);
            events::swap_skipped(env, &asset.token, amount_in);
            continue;
        }

        let floor = min_out(quote, slippage.rebalance_min_out_bps)?;
        settle(router.try_swap(
            &me,
            &amount_in,
            &floor,
            &asset.route.path,
            &me,
            &deadline,
        ))?;
        routed += amount_in;
    }

    log!(env, "rebalanced base tokens", routed);
    Ok(routed)
}
