//! Harvest fee split and the withdrawal security fee.

use soroban_sdk::{token, Address, Env};

use crate::errors::StrategyError;
use crate::events;
use crate::interfaces::{settle, FeeRouterClient};
use crate::math::mul_div;
use crate::types::{FeeSchedule, StrategyConfig};

/// Amounts carved out of one harvest's base-token proceeds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FeeSplit {
    /// Total fee taken from the balance.
    pub fee: i128,
    pub call: i128,
    pub treasury: i128,
    pub strategist: i128,
}

impl FeeSplit {
    /// Sum actually paid out; never more than `fee`.
    pub fn paid(&self) -> i128 {
        self.call + self.treasury + self.strategist
    }
}

impl FeeSchedule {
    pub fn validate(&self) -> Result<(), StrategyError> {
        let divisor = self.divisor;
        let within = |fee: u32| fee <= divisor;
        if divisor == 0
            || !within(self.total_fee)
            || !within(self.call_fee)
            || !within(self.treasury_fee)
            || !within(self.strategist_fee)
            || !within(self.security_fee)
            || self.call_fee as u64 + self.treasury_fee as u64 > divisor as u64
        {
            return Err(StrategyError::InvalidFeeSchedule);
        }
        Ok(())
    }
}

/// Splits `balance` per the schedule.
///
/// The strategist share comes out of the treasury share. Truncation residue
/// is not assigned to anyone and stays with the strategy.
pub fn split(balance: i128, fees: &FeeSchedule) -> Result<FeeSplit, StrategyError> {
    if balance <= 0 {
        return Ok(FeeSplit::default());
    }
    let fee = mul_div(balance, fees.total_fee, fees.divisor)?;
    let call = mul_div(fee, fees.call_fee, fees.divisor)?;
    let treasury = mul_div(fee, fees.treasury_fee, fees.divisor)?;
    let strategist = mul_div(treasury, fees.strategist_fee, fees.divisor)?;
    Ok(FeeSplit {
        fee,
        call,
        treasury: treasury - strategist,
        strategist,
    })
}

pub fn security_fee(amount: i128, fees: &FeeSchedule) -> Result<i128, StrategyError> {
    mul_div(amount, fees.security_fee, fees.divisor)
}

/// Charges fees on `proceeds`, the base tokens this harvest produced, and
/// pays the caller, the treasury and the fee router. Base tokens carried
/// over from earlier harvests are not charged again.
pub fn distribute(
    env: &Env,
    config: &StrategyConfig,
    fees: &FeeSchedule,
    caller: &Address,
    proceeds: i128,
) -> Result<FeeSplit, StrategyError> {
    let me = env.current_contract_address();
    let base = token::Client::new(env, &config.base_token);
    let split = split(proceeds, fees)?;
    if split.fee == 0 {
        return Ok(split);
    }

    if split.call > 0 {
        base.transfer(&me, caller, &split.call);
    }
    if split.treasury > 0 {
        base.transfer(&me, &config.treasury, &split.treasury);
    }
    if split.strategist > 0 {
        let fee_router = FeeRouterClient::new(env, &config.fee_router);
        settle(fee_router.try_route_payment(&me, &config.base_token, &split.strategist))?;
    }

    events::fees_charged(env, caller, &split);
    Ok(split)
}
