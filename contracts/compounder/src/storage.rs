use soroban_sdk::{contracttype, Env, Vec};

use crate::errors::StrategyError;
use crate::types::{
    AllocationPolicy, FeeSchedule, HarvestRecord, LifecycleState, SlippageConfig, StrategyConfig,
    SwapRoute, UnderlyingAsset,
};

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Storage keys for strategy state. Everything lives in instance storage.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Immutable identities and collaborators (`StrategyConfig`)
    Config,
    /// Harvest and withdrawal fee percentages (`FeeSchedule`)
    Fees,
    /// Minimum-output floors (`SlippageConfig`)
    Slippage,
    /// Weight basis used by the rebalancer (`AllocationPolicy`)
    Policy,
    /// Active or Paused
    State,
    /// Ordered basket members with weights and routes
    Underlyings,
    /// Reward token to base token route
    RewardRoute,
    /// Outcome of the last successful harvest
    LastHarvest,
    /// Set while a mutating entry point is running
    Locked,
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn config(env: &Env) -> Result<StrategyConfig, StrategyError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(StrategyError::NotInitialized)
}

pub fn set_config(env: &Env, config: &StrategyConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn fees(env: &Env) -> Result<FeeSchedule, StrategyError> {
    env.storage()
        .instance()
        .get(&DataKey::Fees)
        .ok_or(StrategyError::NotInitialized)
}

pub fn set_fees(env: &Env, fees: &FeeSchedule) {
    env.storage().instance().set(&DataKey::Fees, fees);
}

pub fn slippage(env: &Env) -> SlippageConfig {
    env.storage()
        .instance()
        .get(&DataKey::Slippage)
        .unwrap_or_else(SlippageConfig::permissive)
}

pub fn set_slippage(env: &Env, slippage: &SlippageConfig) {
    env.storage().instance().set(&DataKey::Slippage, slippage);
}

pub fn policy(env: &Env) -> AllocationPolicy {
    env.storage()
        .instance()
        .get(&DataKey::Policy)
        .unwrap_or(AllocationPolicy::FixedSnapshot)
}

pub fn set_policy(env: &Env, policy: AllocationPolicy) {
    env.storage().instance().set(&DataKey::Policy, &policy);
}

pub fn state(env: &Env) -> LifecycleState {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or(LifecycleState::Active)
}

pub fn set_state(env: &Env, state: LifecycleState) {
    env.storage().instance().set(&DataKey::State, &state);
}

pub fn underlyings(env: &Env) -> Result<Vec<UnderlyingAsset>, StrategyError> {
    env.storage()
        .instance()
        .get(&DataKey::Underlyings)
        .ok_or(StrategyError::NotInitialized)
}

pub fn set_underlyings(env: &Env, underlyings: &Vec<UnderlyingAsset>) {
    env.storage().instance().set(&DataKey::Underlyings, underlyings);
}

pub fn reward_route(env: &Env) -> Result<SwapRoute, StrategyError> {
    env.storage()
        .instance()
        .get(&DataKey::RewardRoute)
        .ok_or(StrategyError::NotInitialized)
}

pub fn set_reward_route(env: &Env, route: &SwapRoute) {
    env.storage().instance().set(&DataKey::RewardRoute, route);
}

pub fn last_harvest(env: &Env) -> Option<HarvestRecord> {
    env.storage().instance().get(&DataKey::LastHarvest)
}

pub fn set_last_harvest(env: &Env, record: &HarvestRecord) {
    env.storage().instance().set(&DataKey::LastHarvest, record);
}

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Locked)
        .unwrap_or(false)
}

pub fn set_locked(env: &Env, locked: bool) {
    if locked {
        env.storage().instance().set(&DataKey::Locked, &true);
    } else {
        env.storage().instance().remove(&DataKey::Locked);
    }
}
