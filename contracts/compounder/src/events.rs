//! Contract events.
//!
//! Every state change publishes one event. Topics are single short symbols.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::fees::FeeSplit;
use crate::types::HarvestRecord;

/// Emitted once by `initialize`.
///
/// # Topics
/// - `SymbolShort("init")`
#[contracttype]
pub struct InitializedEvent {
    pub vault: Address,
    pub basket_token: Address,
    /// Number of basket members
    pub underlyings: u32,
}

/// Emitted when idle basket tokens are staked in the farm.
///
/// # Topics
/// - `SymbolShort("deposit")`
#[contracttype]
pub struct DepositEvent {
    pub amount: i128,
}

/// Emitted when the vault withdraws.
///
/// # Topics
/// - `SymbolShort("withdraw")`
#[contracttype]
pub struct WithdrawEvent {
    /// Amount requested by the vault
    pub amount: i128,
    /// Security fee kept as idle balance
    pub fee: i128,
    /// Amount transferred to the vault
    pub payout: i128,
}

/// Emitted when harvest fees are paid out.
///
/// # Topics
/// - `SymbolShort("fees")`
#[contracttype]
pub struct FeesChargedEvent {
    pub caller: Address,
    pub fee: i128,
    pub call: i128,
    pub treasury: i128,
    pub strategist: i128,
}

/// Emitted when a swap is skipped because its quote was zero.
///
/// # Topics
/// - `SymbolShort("swap_skip")`
#[contracttype]
pub struct SwapSkippedEvent {
    pub token_out: Address,
    pub amount_in: i128,
}

/// # Topics
/// - `SymbolShort("harvest")`
#[contracttype]
pub struct HarvestEvent {
    pub caller: Address,
    pub reward_claimed: i128,
    pub profit: i128,
    pub basket_minted: i128,
}

/// Emitted when the strategy is paused or unpaused.
///
/// # Topics
/// - `SymbolShort("paused")` or `SymbolShort("unpaused")`
#[contracttype]
pub struct PauseEvent {
    /// True if the strategy is now paused
    pub paused: bool,
    pub caller: Address,
}

/// # Topics
/// - `SymbolShort("panic")`
#[contracttype]
pub struct PanicEvent {
    pub caller: Address,
    /// Basket tokens returned by the farm's emergency exit
    pub recovered: i128,
}

/// # Topics
/// - `SymbolShort("retired")`
#[contracttype]
pub struct RetiredEvent {
    pub basket_returned: i128,
    pub reward_returned: i128,
}

/// # Topics
/// - `SymbolShort("route")`
#[contracttype]
pub struct RouteUpdatedEvent {
    /// Destination token of the route
    pub token: Address,
    pub router: Address,
    pub hops: u32,
}

/// # Topics
/// - `SymbolShort("weight")`
#[contracttype]
pub struct WeightUpdatedEvent {
    pub token: Address,
    pub old_weight: u32,
    pub new_weight: u32,
}

pub(crate) fn initialized(env: &Env, vault: &Address, basket_token: &Address, underlyings: u32) {
    env.events().publish(
        (symbol_short!("init"),),
        InitializedEvent {
            vault: vault.clone(),
            basket_token: basket_token.clone(),
            underlyings,
        },
    );
}

pub(crate) fn deposited(env: &Env, amount: i128) {
    env.events()
        .publish((symbol_short!("deposit"),), DepositEvent { amount });
}

pub(crate) fn withdrawn(env: &Env, amount: i128, fee: i128, payout: i128) {
    env.events().publish(
        (symbol_short!("withdraw"),),
        WithdrawEvent {
            amount,
            fee,
            payout,
        },
    );
}

pub(crate) fn fees_charged(env: &Env, caller: &Address, split: &FeeSplit) {
    env.events().publish(
        (symbol_short!("fees"),),
        FeesChargedEvent {
            caller: caller.clone(),
            fee: split.fee,
            call: split.call,
            treasury: split.treasury,
            strategist: split.strategist,
        },
    );
}

pub(crate) fn swap_skipped(env: &Env, token_out: &Address, amount_in: i128) {
    env.events().publish(
        (symbol_short!("swap_skip"),),
        SwapSkippedEvent {
            token_out: token_out.clone(),
            amount_in,
        },
    );
}

pub(crate) fn harvested(env: &Env, caller: &Address, record: &HarvestRecord) {
    env.events().publish(
        (symbol_short!("harvest"),),
        HarvestEvent {
            caller: caller.clone(),
            reward_claimed: record.reward_claimed,
            profit: record.profit,
            basket_minted: record.basket_minted,
        },
    );
}

pub(crate) fn pause_changed(env: &Env, paused: bool, caller: &Address) {
    let topic = if paused {
        symbol_short!("paused")
    } else {
        symbol_short!("unpaused")
    };
    env.events().publish(
        (topic,),
        PauseEvent {
            paused,
            caller: caller.clone(),
        },
    );
}

pub(crate) fn panicked(env: &Env, caller: &Address, recovered: i128) {
    env.events().publish(
        (symbol_short!("panic"),),
        PanicEvent {
            caller: caller.clone(),
            recovered,
        },
    );
}

pub(crate) fn retired(env: &Env, basket_returned: i128, reward_returned: i128) {
    env.events().publish(
        (symbol_short!("retired"),),
        RetiredEvent {
            basket_returned,
            reward_returned,
        },
    );
}

pub(crate) fn route_updated(env: &Env, token: &Address, router: &Address, hops: u32) {
    env.events().publish(
        (symbol_short!("route"),),
        RouteUpdatedEvent {
            token: token.clone(),
            router: router.clone(),
            hops,
        },
    );
}

pub(crate) fn weight_updated(env: &Env, token: &Address, old_weight: u32, new_weight: u32) {
    env.events().publish(
        (symbol_short!("weight"),),
        WeightUpdatedEvent {
            token: token.clone(),
            old_weight,
            new_weight,
        },
    );
}
