//! # Weighted Compounder Strategy Contract
//!
//! An auto-compounding strategy behind a single vault. The vault hands the
//! strategy basket tokens (shares of a weighted multi-asset pool); the
//! strategy stakes them in a farm and periodically turns the farm's rewards
//! into more basket tokens.
//!
//! ## Architecture Overview
//!
//! The strategy never prices anything itself. Every collaborator is another
//! contract reached through a typed client (see [`interfaces`]):
//!
//! - **Farm** holds the staked position and pays the reward token
//! - **Routers** execute pre-configured swap paths
//! - **Liquidity pool** mints basket tokens from underlying assets
//! - **Fee router** forwards the strategist's share of fees
//!
//! ## Harvest Flow
//!
//! ```text
//! Keeper → [harvest()] → Farm.harvest_rewards → reward tokens
//!                      ↓
//!          Router: reward → base token
//!                      ↓
//!          Fees: keeper / treasury / fee router
//!                      ↓
//!          Routers: base → each underlying (by weight)
//!                      ↓
//!          Pool.join → basket tokens → Farm.stake
//! ```
//!
//! ## Deposit and Withdraw Flow
//!
//! ```text
//! Vault → [basket token transfer] → Strategy → [deposit()] → Farm.stake
//! Vault → [withdraw(amount)] → Farm.unstake(shortfall) → amount - fee → Vault
//! ```
//!
//! ## Lifecycle
//!
//! The strategy starts **Active**. `pause` and `panic` move it to
//! **Paused** and zero every allowance; `panic` also pulls the whole position
//! out of the farm. `unpause` restores allowances and restakes idle tokens.
//! Withdrawals keep working while paused so the vault can always recover
//! funds.
//!
//! ## Storage Layout
//!
//! All state lives in instance storage (see [`storage::DataKey`]): the
//! configuration, fee schedule, slippage floors, allocation policy,
//! lifecycle state, the underlying/route table, the reward route, the last
//! harvest record and the re-entrancy lock.
//!
//! # Examples
//!
//! ## Harvest as a keeper
//! ```ignore
//! let record = strategy_client.harvest(&keeper);
//! ```
//!
//! ## Withdraw from the vault
//! ```ignore
//! strategy_client.withdraw(&vault, &amount);
//! ```

#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub mod access;
pub mod admin;
pub mod allowance;
pub mod engine;
pub mod errors;
pub mod events;
pub mod fees;
pub mod harvest;
pub mod interfaces;
pub mod lifecycle;
mod math;
pub mod position;
pub mod rebalance;
pub mod storage;
pub mod tables;
pub mod types;

#[cfg(test)]
mod testutils;

pub use errors::StrategyError;
pub use types::{
    AllocationPolicy, AllowanceTarget, FeeSchedule, HarvestEstimate, HarvestRecord,
    LifecycleState, PoolAsset, SlippageConfig, StrategyConfig, SwapRoute, UnderlyingAsset,
};

use interfaces::{settle, LiquidityPoolClient};
use math::BPS_DIVISOR;

/// Weighted Compounder - harvest-and-rebalance strategy for a single vault.
///
/// # Security Model
///
/// - Only the vault can `deposit`, `withdraw` and `retire_strat`
/// - Any address may `harvest`; it must authorize and receives the call fee
/// - The owner or a registered strategist can `pause`, `panic` and update
///   routes and weights
/// - Only the owner can `unpause`
/// - Every mutating entry point holds a re-entrancy lock
#[contract]
pub struct WeightedCompounder;

#[contractimpl]
impl WeightedCompounder {

    // ==========================================================================
    // INITIALIZATION
    // ==========================================================================

    /// Configures the strategy and grants every allowance it needs.
    ///
    /// # Arguments
    /// * `env` - The Soroban environment
    /// * `config` - Identities and collaborator addresses
    /// * `fees` - Harvest and withdrawal fee schedule
    /// * `slippage` - Minimum-output floors; use `SlippageConfig::permissive`
    ///   for no swap floors and a nominal join floor
    /// * `policy` - Weight basis for rebalancing
    /// * `underlyings` - Basket members in the pool's order
    /// * `reward_route` - Route from the reward token to the base token
    ///
    /// # Errors
    /// - `AlreadyInitialized` if called twice
    /// - `InvalidFeeSchedule`, `InvalidRoute`, `InvalidWeight` on bad input
    /// - `ConfigurationError` if `underlyings` differ from the pool's
    ///   reported composition, a slippage floor is out of range, or
    ///   `allowance_ttl_ledgers` is zero or above
    ///   [`allowance::MAX_TTL_LEDGERS`]; nothing is stored in that case
    ///
    /// # Events
    /// Emits `InitializedEvent`
    pub fn initialize(
        env: Env,
        config: StrategyConfig,
        fees: FeeSchedule,
        slippage: SlippageConfig,
        policy: AllocationPolicy,
        underlyings: Vec<UnderlyingAsset>,
        reward_route: SwapRoute,
    ) -> Result<(), StrategyError> {
        if storage::is_initialized(&env) {
            return Err(StrategyError::AlreadyInitialized);
        }

        fees.validate()?;
        if slippage.reward_min_out_bps > BPS_DIVISOR
            || slippage.rebalance_min_out_bps > BPS_DIVISOR
            || slippage.join_min_out < 0
        {
            return Err(StrategyError::ConfigurationError);
        }
        if config.allowance_ttl_ledgers == 0
            || config.allowance_ttl_ledgers > allowance::MAX_TTL_LEDGERS
        {
            return Err(StrategyError::ConfigurationError);
        }
        tables::validate_reward_route(&config, &reward_route)?;
        tables::validate_underlyings(&config, &fees, &underlyings)?;

        let pool = LiquidityPoolClient::new(&env, &config.liquidity_pool);
        let composition = settle(pool.try_current_composition())?;
        tables::check_composition(&underlyings, &composition)?;

        storage::set_config(&env, &config);
        storage::set_fees(&env, &fees);
        storage::set_slippage(&env, &slippage);
        storage::set_policy(&env, policy);
        storage::set_underlyings(&env, &underlyings);
        storage::set_reward_route(&env, &reward_route);
        storage::set_state(&env, LifecycleState::Active);
        storage::extend_instance(&env);

        let targets = allowance::targets(&env, &config, &underlyings, &reward_route);
        allowance::grant_all(&env, &targets, config.allowance_ttl_ledgers);

        events::initialized(&env, &config.vault, &config.basket_token, underlyings.len());
        Ok(())
    }


    // ==========================================================================
    // VAULT SURFACE
    // ==========================================================================

    /// Stakes every idle basket token in the farm.
    ///
    /// The vault transfers basket tokens to the strategy first, then calls
    /// this. Zero idle balance is a no-op.
    ///
    /// # Returns
    /// The amount staked
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the vault
    /// - `Paused` while paused
    ///
    /// # Events
    /// Emits `DepositEvent` when something was staked
    pub fn deposit(env: Env, caller: Address) -> Result<i128, StrategyError> {
        storage::extend_instance(&env);
        let config = storage::config(&env)?;
        access::require_vault(&config, &caller)?;
        access::require_active(&env)?;

        access::guarded(&env, || {
            let targets = lifecycle::current_targets(&env, &config)?;
            allowance::grant_all(&env, &targets, config.allowance_ttl_ledgers);
            engine::stake_idle(&env, &config)
        })
    }

    /// Sends `amount` minus the security fee to the vault.
    ///
    /// Idle tokens are used first; the shortfall is unstaked from the farm.
    /// The fee stays in the strategy as idle balance. Works while paused.
    ///
    /// # Returns
    /// The amount transferred to the vault
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the vault
    /// - `InvalidAmount` if `amount` is not positive
    /// - `InsufficientLiquidity` if idle plus staked cannot cover `amount`
    ///
    /// # Events
    /// Emits `WithdrawEvent`
    pub fn withdraw(env: Env, caller: Address, amount: i128) -> Result<i128, StrategyError> {
        storage::extend_instance(&env);
        let config = storage::config(&env)?;
        access::require_vault(&config, &caller)?;
        let fees = storage::fees(&env)?;

        access::guarded(&env, || engine::withdraw(&env, &config, &fees, amount))
    }

    /// Exits the farm and returns everything to the vault, for migration.
    ///
    /// Pending rewards are forfeited. Stray reward tokens go to the vault
    /// with the basket tokens. The strategy is left paused with no
    /// allowances.
    ///
    /// # Returns
    /// Basket tokens sent to the vault
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the vault
    ///
    /// # Events
    /// Emits `RetiredEvent`
    pub fn retire_strat(env: Env, caller: Address) -> Result<i128, StrategyError> {
        storage::extend_instance(&env);
        let config = storage::config(&env)?;
        access::require_vault(&config, &caller)?;

        access::guarded(&env, || {
            if storage::state(&env) == LifecycleState::Active {
                lifecycle::enter_paused(&env, &config)?;
            }
            engine::retire(&env, &config)
        })
    }


    // ==========================================================================
    // KEEPER SURFACE
    // ==========================================================================

    /// Claims rewards, charges fees and compounds the rest into the farm.
    ///
    /// `caller` must authorize and receives the call fee in base tokens.
    ///
    /// # Errors
    /// - `Paused` while paused
    /// - `ExternalCallFailure` if any collaborator call fails; nothing from
    ///   the harvest persists
    ///
    /// # Events
    /// Emits `FeesChargedEvent` and `HarvestEvent`, plus `SwapSkippedEvent`
    /// for each zero-quote swap
    pub fn harvest(env: Env, caller: Address) -> Result<HarvestRecord, StrategyError> {
        storage::extend_instance(&env);
        caller.require_auth();
        access::require_active(&env)?;

        access::guarded(&env, || harvest::harvest(&env, &caller))
    }

    /// Profit the next harvest would reinvest and the fee its caller would
    /// earn at current quotes.
    pub fn estimate_harvest(env: Env) -> Result<HarvestEstimate, StrategyError> {
        harvest::estimate(&env)
    }


    // ==========================================================================
    // ADMINISTRATIVE - LIFECYCLE
    // ==========================================================================

    /// Pauses the strategy and revokes every allowance.
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` is the owner or a strategist
    /// - `Paused` if already paused
    ///
    /// # Events
    /// Emits `PauseEvent` with `paused: true`
    pub fn pause(env: Env, caller: Address) -> Result<(), StrategyError> {
        storage::extend_instance(&env);
        let config = storage::config(&env)?;
        access::require_privileged(&config, &caller)?;

        access::guarded(&env, || lifecycle::pause(&env, &caller))
    }

    /// Unpauses, regrants allowances and stakes idle basket tokens.
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` is the owner
    /// - `NotPaused` if already active
    ///
    /// # Events
    /// Emits `PauseEvent` with `paused: false`
    pub fn unpause(env: Env, caller: Address) -> Result<(), StrategyError> {
        storage::extend_instance(&env);
        let config = storage::config(&env)?;
        access::require_owner(&config, &caller)?;

        access::guarded(&env, || lifecycle::unpause(&env, &caller))
    }

    /// Emergency exit: withdraws the whole farm position, forfeiting
    /// pending rewards, and pauses if active. Valid in either state.
    ///
    /// # Returns
    /// Basket tokens recovered from the farm
    ///
    /// # Events
    /// Emits `PanicEvent`, and `PauseEvent` if the strategy was active
    pub fn panic(env: Env, caller: Address) -> Result<i128, StrategyError> {
        storage::extend_instance(&env);
        let config = storage::config(&env)?;
        access::require_privileged(&config, &caller)?;

        access::guarded(&env, || lifecycle::panic(&env, &caller))
    }


    // ==========================================================================
    // ADMINISTRATIVE - ROUTES AND WEIGHTS
    // ==========================================================================

    /// Replaces the base → `token` route of one underlying asset.
    ///
    /// Allowances for routers no longer referenced are revoked.
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` is the owner or a strategist
    /// - `UnknownAsset` if `token` is not a basket member
    /// - `InvalidRoute` if the path does not run base → `token`
    pub fn update_underlying_route(
        env: Env,
        caller: Address,
        token: Address,
        route: SwapRoute,
    ) -> Result<(), StrategyError> {
        storage::extend_instance(&env);
        let config = storage::config(&env)?;
        access::require_privileged(&config, &caller)?;

        access::guarded(&env, || admin::update_underlying_route(&env, &token, route))
    }

    /// Replaces the reward → base route.
    pub fn update_reward_route(
        env: Env,
        caller: Address,
        route: SwapRoute,
    ) -> Result<(), StrategyError> {
        storage::extend_instance(&env);
        let config = storage::config(&env)?;
        access::require_privileged(&config, &caller)?;

        access::guarded(&env, || admin::update_reward_route(&env, route))
    }

    /// Sets the weight of one underlying asset.
    ///
    /// # Errors
    /// - `InvalidWeight` if the weights would sum above the fee divisor
    pub fn update_underlying_weight(
        env: Env,
        caller: Address,
        token: Address,
        weight: u32,
    ) -> Result<(), StrategyError> {
        storage::extend_instance(&env);
        let config = storage::config(&env)?;
        access::require_privileged(&config, &caller)?;

        access::guarded(&env, || admin::update_underlying_weight(&env, &token, weight))
    }


    // ==========================================================================
    // READ FUNCTIONS
    // ==========================================================================

    /// Idle plus staked basket tokens, recomputed on every call.
    pub fn balance_of(env: Env) -> Result<i128, StrategyError> {
        let config = storage::config(&env)?;
        position::total(&env, &config)
    }

    /// Basket tokens held directly by the strategy.
    pub fn balance_of_want(env: Env) -> Result<i128, StrategyError> {
        let config = storage::config(&env)?;
        Ok(position::idle(&env, &config))
    }

    /// Basket tokens staked in the farm.
    pub fn balance_of_pool(env: Env) -> Result<i128, StrategyError> {
        let config = storage::config(&env)?;
        position::staked(&env, &config)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::state(&env) == LifecycleState::Paused
    }

    pub fn get_config(env: Env) -> Result<StrategyConfig, StrategyError> {
        storage::config(&env)
    }

    pub fn get_fees(env: Env) -> Result<FeeSchedule, StrategyError> {
        storage::fees(&env)
    }

    pub fn get_underlyings(env: Env) -> Result<Vec<UnderlyingAsset>, StrategyError> {
        storage::underlyings(&env)
    }

    pub fn get_reward_route(env: Env) -> Result<SwapRoute, StrategyError> {
        storage::reward_route(&env)
    }

    /// Every (token, spender) pair kept approved while active.
    pub fn allowance_targets(env: Env) -> Result<Vec<AllowanceTarget>, StrategyError> {
        let config = storage::config(&env)?;
        lifecycle::current_targets(&env, &config)
    }

    pub fn last_harvest(env: Env) -> Option<HarvestRecord> {
        storage::last_harvest(&env)
    }
}
