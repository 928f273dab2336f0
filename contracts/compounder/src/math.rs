use crate::errors::StrategyError;

pub(crate) const BPS_DIVISOR: u32 = 10_000;

/// `amount * numerator / divisor`, truncating toward zero.
pub(crate) fn mul_div(amount: i128, numerator: u32, divisor: u32) -> Result<i128, StrategyError> {
    if divisor == 0 {
        return Err(StrategyError::MathOverflow);
    }
    amount
        .checked_mul(numerator as i128)
        .and_then(|product| product.checked_div(divisor as i128))
        .ok_or(StrategyError::MathOverflow)
}

/// Minimum output accepted for a quote; zero bps means no floor.
pub(crate) fn min_out(quote: i128, bps: u32) -> Result<i128, StrategyError> {
    if bps == 0 {
        return Ok(0);
    }
    mul_div(quote, bps, BPS_DIVISOR)
}
