use soroban_sdk::contracterror;

/// Failure modes surfaced by the strategy's entry points.
///
/// Any `Err` returned from an entry point aborts the invocation, so every
/// storage write and token movement made before the failure is rolled back.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StrategyError {
    /// `initialize` was called on a configured strategy.
    AlreadyInitialized = 1,
    /// An entry point other than `initialize` ran before configuration.
    NotInitialized = 2,
    /// Caller is not the vault, the owner, or a registered strategist.
    Unauthorized = 3,
    /// The operation needs the strategy to be active.
    Paused = 4,
    /// `unpause` was called while active.
    NotPaused = 5,
    /// The farm position cannot cover a withdrawal.
    InsufficientLiquidity = 6,
    /// Declared underlying assets do not match the pool composition.
    ConfigurationError = 7,
    /// A swap route does not start or end at the expected tokens.
    InvalidRoute = 8,
    /// Weights exceed the divisor or an asset is listed twice.
    InvalidWeight = 9,
    /// A fee percentage exceeds the divisor.
    InvalidFeeSchedule = 10,
    /// Amount must be strictly positive.
    InvalidAmount = 11,
    /// Token is not one of the configured underlying assets.
    UnknownAsset = 12,
    /// A farm, router, pool or fee router call failed.
    ExternalCallFailure = 13,
    /// A mutating entry point was entered while another one was running.
    Reentrant = 14,
    MathOverflow = 15,
}
