use soroban_sdk::{contracttype, Address, Vec};

/// Identities and collaborators fixed at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyConfig {
    /// The vault that owns this strategy and receives withdrawals.
    pub vault: Address,
    /// Owner; the only address allowed to unpause.
    pub owner: Address,
    /// Addresses allowed to pause, panic and update routes or weights.
    pub strategists: Vec<Address>,
    /// Receives the treasury share of harvest fees.
    pub treasury: Address,
    /// Forwards the strategist share onward.
    pub fee_router: Address,
    /// Token every swap routes through and fees are paid in.
    pub base_token: Address,
    /// Token emitted by the farm.
    pub reward_token: Address,
    /// Pool share token staked in the farm.
    pub basket_token: Address,
    pub farm: Address,
    pub farm_pool_id: u32,
    pub liquidity_pool: Address,
    /// Seconds added to the ledger timestamp to form swap deadlines.
    pub swap_deadline_secs: u64,
    /// Lifetime in ledgers of the allowances granted to collaborators; at
    /// most `allowance::MAX_TTL_LEDGERS`.
    pub allowance_ttl_ledgers: u32,
}

/// A pre-configured hop sequence executed by a single router.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapRoute {
    pub router: Address,
    pub path: Vec<Address>,
}

/// One member of the basket with its target weight and its route from the
/// base token.
///
/// When `token` is the base token the route path is `[base]` and the router
/// is never called.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnderlyingAsset {
    pub token: Address,
    pub weight: u32,
    pub route: SwapRoute,
}

/// Harvest and withdrawal fees, all expressed over `divisor`.
///
/// `strategist_fee` is a fraction of the treasury share, not of the total.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSchedule {
    pub divisor: u32,
    pub total_fee: u32,
    pub call_fee: u32,
    pub treasury_fee: u32,
    pub strategist_fee: u32,
    pub security_fee: u32,
}

/// Minimum-output floors. Basis points are over 10_000 and applied to the
/// router's quote; zero disables the floor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlippageConfig {
    pub reward_min_out_bps: u32,
    pub rebalance_min_out_bps: u32,
    /// Nominal basket-token floor passed to the pool join.
    pub join_min_out: i128,
}

impl SlippageConfig {
    pub fn permissive() -> Self {
        SlippageConfig {
            reward_min_out_bps: 0,
            rebalance_min_out_bps: 0,
            join_min_out: 1,
        }
    }
}

/// Which base balance an underlying weight is applied to during rebalance.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AllocationPolicy {
    /// Balance read once before the first swap of the pass.
    FixedSnapshot,
    /// Balance re-read before each swap, after earlier swaps spent from it.
    RemainingBalance,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LifecycleState {
    Active,
    Paused,
}

/// A (token, spender) pair the strategy keeps approved while active.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowanceTarget {
    pub token: Address,
    pub spender: Address,
}

/// Token amount exchanged with the liquidity pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAsset {
    pub token: Address,
    pub amount: i128,
}

/// Outcome of the most recent harvest.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestRecord {
    pub timestamp: u64,
    pub reward_claimed: i128,
    /// Base tokens left for reinvestment after fees.
    pub profit: i128,
    pub basket_minted: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestEstimate {
    pub profit: i128,
    pub caller_fee: i128,
}
