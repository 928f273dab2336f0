//! Caller checks, lifecycle gates and the re-entrancy lock.

use soroban_sdk::{Address, Env};

use crate::errors::StrategyError;
use crate::storage;
use crate::types::{LifecycleState, StrategyConfig};

pub fn require_vault(config: &StrategyConfig, caller: &Address) -> Result<(), StrategyError> {
    if *caller != config.vault {
        return Err(StrategyError::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

pub fn require_owner(config: &StrategyConfig, caller: &Address) -> Result<(), StrategyError> {
    if *caller != config.owner {
        return Err(StrategyError::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

/// Owner or any registered strategist.
pub fn require_privileged(config: &StrategyConfig, caller: &Address) -> Result<(), StrategyError> {
    if *caller != config.owner && !config.strategists.contains(caller) {
        return Err(StrategyError::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

pub fn require_active(env: &Env) -> Result<(), StrategyError> {
    match storage::state(env) {
        LifecycleState::Active => Ok(()),
        LifecycleState::Paused => Err(StrategyError::Paused),
    }
}

/// Runs `body` holding the re-entrancy lock.
///
/// A failing body leaves the lock set; the error aborts the invocation and
/// the flag rolls back with everything else.
pub fn guarded<T>(
    env: &Env,
    body: impl FnOnce() -> Result<T, StrategyError>,
) -> Result<T, StrategyError> {
    if storage::is_locked(env) {
        return Err(StrategyError::Reentrant);
    }
    storage::set_locked(env, true);
    let value = body()?;
    storage::set_locked(env, false);
    Ok(value)
}
