#![cfg(test)]

//! In-memory collaborators and a wired-up strategy for the contract tests.
//!
//! The mocks move real Stellar asset tokens: the farm, router and pool pull
//! with `transfer_from` against the strategy's allowances and pay out of
//! balances minted to them at setup.

use soroban_sdk::{
    contract, contractimpl, contracttype, testutils::Address as _, token, vec, Address, Env, Vec,
};

use crate::{
    AllocationPolicy, FeeSchedule, PoolAsset, SlippageConfig, StrategyConfig, SwapRoute,
    UnderlyingAsset, WeightedCompounder, WeightedCompounderClient,
};

pub const LIQUIDITY: i128 = 1_000_000_000_000;
pub const DEADLINE_SECS: u64 = 600;
pub const ALLOWANCE_TTL: u32 = 100_000;

// ============================================================================
// MOCK FARM
// ============================================================================

#[contracttype]
#[derive(Clone)]
enum FarmKey {
    StakedToken,
    RewardToken,
    Position(Address),
    Pending(Address),
    UnstakeBonus,
    ExitAllowance,
}

fn farm_get(env: &Env, key: &FarmKey) -> i128 {
    env.storage().instance().get(key).unwrap_or(0)
}

fn farm_token(env: &Env, key: &FarmKey) -> token::Client<'static> {
    let address: Address = env.storage().instance().get(key).unwrap();
    token::Client::new(env, &address)
}

#[contract]
pub struct MockFarm;

#[contractimpl]
impl MockFarm {
    pub fn setup_farm(env: Env, staked_token: Address, reward_token: Address) {
        env.storage().instance().set(&FarmKey::StakedToken, &staked_token);
        env.storage().instance().set(&FarmKey::RewardToken, &reward_token);
    }

    pub fn set_pending(env: Env, owner: Address, amount: i128) {
        env.storage().instance().set(&FarmKey::Pending(owner), &amount);
    }

    /// Extra tokens returned on every unstake, taken from the position.
    pub fn set_unstake_bonus(env: Env, bonus: i128) {
        env.storage().instance().set(&FarmKey::UnstakeBonus, &bonus);
    }

    pub fn stake(env: Env, from: Address, _pid: u32, amount: i128) {
        from.require_auth();
        let me = env.current_contract_address();
        farm_token(&env, &FarmKey::StakedToken).transfer_from(&me, &from, &me, &amount);
        let position = farm_get(&env, &FarmKey::Position(from.clone()));
        env.storage()
            .instance()
            .set(&FarmKey::Position(from), &(position + amount));
    }

    pub fn unstake(env: Env, to: Address, _pid: u32, amount: i128) {
        to.require_auth();
        let position = farm_get(&env, &FarmKey::Position(to.clone()));
        if amount > position {
            panic!("unstake exceeds position");
        }
        let out = core::cmp::min(amount + farm_get(&env, &FarmKey::UnstakeBonus), position);
        farm_token(&env, &FarmKey::StakedToken).transfer(&env.current_contract_address(), &to, &out);
        env.storage()
            .instance()
            .set(&FarmKey::Position(to), &(position - out));
    }

    pub fn harvest_rewards(env: Env, to: Address, _pid: u32) {
        to.require_auth();
        let pending = farm_get(&env, &FarmKey::Pending(to.clone()));
        if pending > 0 {
            farm_token(&env, &FarmKey::RewardToken).transfer(
                &env.current_contract_address(),
                &to,
                &pending,
            );
        }
        env.storage().instance().set(&FarmKey::Pending(to), &0_i128);
    }

    pub fn emergency_exit(env: Env, to: Address, _pid: u32) {
        to.require_auth();
        let me = env.current_contract_address();
        let allowance = farm_token(&env, &FarmKey::StakedToken).allowance(&to, &me);
        env.storage().instance().set(&FarmKey::ExitAllowance, &allowance);
        let position = farm_get(&env, &FarmKey::Position(to.clone()));
        if position > 0 {
            farm_token(&env, &FarmKey::StakedToken).transfer(
                &env.current_contract_address(),
                &to,
                &position,
            );
        }
        env.storage().instance().set(&FarmKey::Position(to.clone()), &0_i128);
        env.storage().instance().set(&FarmKey::Pending(to), &0_i128);
    }

    /// Basket allowance the caller had granted the farm when it last exited.
    pub fn exit_allowance(env: Env) -> i128 {
        farm_get(&env, &FarmKey::ExitAllowance)
    }

    pub fn position_balance(env: Env, _pid: u32, owner: Address) -> i128 {
        farm_get(&env, &FarmKey::Position(owner))
    }

    pub fn pending_rewards(env: Env, _pid: u32, owner: Address) -> i128 {
        farm_get(&env, &FarmKey::Pending(owner))
    }
}

// ============================================================================
// MOCK ROUTER
// ============================================================================

#[contracttype]
#[derive(Clone)]
enum RouterKey {
    Rate(Address, Address),
    Swaps(Address, Address),
    Volume(Address, Address),
    LastDeadline,
    Failing,
}

fn router_quote(env: &Env, amount_in: i128, path: &Vec<Address>) -> i128 {
    let mut amount = amount_in;
    for hop in 1..path.len() {
        let key = RouterKey::Rate(path.get_unchecked(hop - 1), path.get_unchecked(hop));
        let (numerator, denominator): (i128, i128) =
            env.storage().instance().get(&key).unwrap_or((0, 1));
        amount = amount * numerator / denominator;
    }
    amount
}

/// Fixed-rate router. Unset pairs quote zero.
#[contract]
pub struct MockRouter;

#[contractimpl]
impl MockRouter {
    pub fn set_rate(env: Env, token_in: Address, token_out: Address, numerator: i128, denominator: i128) {
        env.storage()
            .instance()
            .set(&RouterKey::Rate(token_in, token_out), &(numerator, denominator));
    }

    pub fn set_failing(env: Env, failing: bool) {
        env.storage().instance().set(&RouterKey::Failing, &failing);
    }

    pub fn quote_output(env: Env, amount_in: i128, path: Vec<Address>) -> i128 {
        router_quote(&env, amount_in, &path)
    }

    pub fn swap(
        env: Env,
        from: Address,
        amount_in: i128,
        min_out: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> i128 {
        from.require_auth();
        if env.storage().instance().get(&RouterKey::Failing).unwrap_or(false) {
            panic!("router unavailable");
        }
        if env.ledger().timestamp() > deadline {
            panic!("deadline passed");
        }
        let out = router_quote(&env, amount_in, &path);
        if out <= 0 || out < min_out {
            panic!("insufficient output");
        }

        let token_in = path.first().unwrap();
        let token_out = path.last().unwrap();
        let me = env.current_contract_address();
        token::Client::new(&env, &token_in).transfer_from(&me, &from, &me, &amount_in);
        token::Client::new(&env, &token_out).transfer(&me, &to, &out);

        let swaps_key = RouterKey::Swaps(token_in.clone(), token_out.clone());
        let swaps: u32 = env.storage().instance().get(&swaps_key).unwrap_or(0);
        env.storage().instance().set(&swaps_key, &(swaps + 1));
        let volume_key = RouterKey::Volume(token_in, token_out);
        let volume: i128 = env.storage().instance().get(&volume_key).unwrap_or(0);
        env.storage().instance().set(&volume_key, &(volume + amount_in));
        env.storage().instance().set(&RouterKey::LastDeadline, &deadline);
        out
    }

    pub fn swap_count(env: Env, token_in: Address, token_out: Address) -> u32 {
        env.storage()
            .instance()
            .get(&RouterKey::Swaps(token_in, token_out))
            .unwrap_or(0)
    }

    /// Total amount swapped in from `token_in` to `token_out`.
    pub fn volume(env: Env, token_in: Address, token_out: Address) -> i128 {
        env.storage()
            .instance()
            .get(&RouterKey::Volume(token_in, token_out))
            .unwrap_or(0)
    }

    pub fn last_deadline(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&RouterKey::LastDeadline)
            .unwrap_or(0)
    }
}

// ============================================================================
// MOCK POOL
// ============================================================================

#[contracttype]
#[derive(Clone)]
enum PoolKey {
    Basket,
    Tokens,
    Joins,
}

/// Mints one basket token per unit supplied, whatever the asset.
#[contract]
pub struct MockPool;

#[contractimpl]
impl MockPool {
    pub fn setup_pool(env: Env, basket: Address, tokens: Vec<Address>) {
        env.storage().instance().set(&PoolKey::Basket, &basket);
        env.storage().instance().set(&PoolKey::Tokens, &tokens);
    }

    pub fn current_composition(env: Env) -> Vec<PoolAsset> {
        let me = env.current_contract_address();
        let tokens: Vec<Address> = env.storage().instance().get(&PoolKey::Tokens).unwrap();
        let mut composition = Vec::new(&env);
        for token in tokens.iter() {
            let amount = token::Client::new(&env, &token).balance(&me);
            composition.push_back(PoolAsset { token, amount });
        }
        composition
    }

    pub fn join(env: Env, from: Address, assets_in: Vec<PoolAsset>, min_out: i128) -> i128 {
        from.require_auth();
        let me = env.current_contract_address();
        let tokens: Vec<Address> = env.storage().instance().get(&PoolKey::Tokens).unwrap();
        if assets_in.len() != tokens.len() {
            panic!("asset count mismatch");
        }

        let mut minted = 0_i128;
        for (asset, token) in assets_in.iter().zip(tokens.iter()) {
            if asset.token != token {
                panic!("asset order mismatch");
            }
            if asset.amount > 0 {
                token::Client::new(&env, &token).transfer_from(&me, &from, &me, &asset.amount);
                minted += asset.amount;
            }
        }
        if minted < min_out {
            panic!("below minimum basket out");
        }

        let basket: Address = env.storage().instance().get(&PoolKey::Basket).unwrap();
        token::Client::new(&env, &basket).transfer(&me, &from, &minted);
        let joins: u32 = env.storage().instance().get(&PoolKey::Joins).unwrap_or(0);
        env.storage().instance().set(&PoolKey::Joins, &(joins + 1));
        minted
    }

    pub fn join_count(env: Env) -> u32 {
        env.storage().instance().get(&PoolKey::Joins).unwrap_or(0)
    }
}

// ============================================================================
// MOCK FEE ROUTER
// ============================================================================

#[contracttype]
#[derive(Clone)]
enum FeeRouterKey {
    Payee,
}

#[contract]
pub struct MockFeeRouter;

#[contractimpl]
impl MockFeeRouter {
    pub fn setup_fee_router(env: Env, payee: Address) {
        env.storage().instance().set(&FeeRouterKey::Payee, &payee);
    }

    pub fn route_payment(env: Env, from: Address, asset: Address, amount: i128) {
        from.require_auth();
        let payee: Address = env.storage().instance().get(&FeeRouterKey::Payee).unwrap();
        let me = env.current_contract_address();
        token::Client::new(&env, &asset).transfer_from(&me, &from, &payee, &amount);
    }
}

// ============================================================================
// HARNESS
// ============================================================================

/// Divisor 1000: 4.5% total, 5% of that to the caller, 95% to treasury of
/// which 0.5% goes to the strategist, 0.1% withdrawal fee.
pub fn default_fees() -> FeeSchedule {
    FeeSchedule {
        divisor: 1_000,
        total_fee: 45,
        call_fee: 50,
        treasury_fee: 950,
        strategist_fee: 5,
        security_fee: 1,
    }
}

/// Basket layout for [`Harness::build`]; `base_weight: None` leaves the base
/// token out of the pool.
pub struct BasketLayout {
    pub base_weight: Option<u32>,
    pub a_weight: u32,
    pub b_weight: u32,
}

pub struct Harness<'a> {
    pub env: Env,
    pub strategy: WeightedCompounderClient<'a>,
    pub vault: Address,
    pub owner: Address,
    pub strategist: Address,
    pub treasury: Address,
    pub strategist_payee: Address,
    pub keeper: Address,
    pub base: Address,
    pub reward: Address,
    pub basket: Address,
    pub token_a: Address,
    pub token_b: Address,
    pub farm: MockFarmClient<'a>,
    pub router: MockRouterClient<'a>,
    pub pool: MockPoolClient<'a>,
    pub config: StrategyConfig,
    pub underlyings: Vec<UnderlyingAsset>,
    pub reward_route: SwapRoute,
}

impl<'a> Harness<'a> {
    /// Base 200, token A 500, token B 300; snapshot weights; default fees.
    pub fn new() -> Self {
        let basket = BasketLayout {
            base_weight: Some(200),
            a_weight: 500,
            b_weight: 300,
        };
        Self::build(AllocationPolicy::FixedSnapshot, &basket, default_fees())
    }

    /// Rates: 1 reward = 2 base, 1 base = 1 token A, 1 base = 2 token B.
    pub fn build(policy: AllocationPolicy, layout: &BasketLayout, fees: FeeSchedule) -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let base = env.register_stellar_asset_contract(admin.clone());
        let reward = env.register_stellar_asset_contract(admin.clone());
        let basket = env.register_stellar_asset_contract(admin.clone());
        let token_a = env.register_stellar_asset_contract(admin.clone());
        let token_b = env.register_stellar_asset_contract(admin.clone());

        let farm = MockFarmClient::new(&env, &env.register_contract(None, MockFarm));
        let router = MockRouterClient::new(&env, &env.register_contract(None, MockRouter));
        let pool = MockPoolClient::new(&env, &env.register_contract(None, MockPool));
        let fee_router = MockFeeRouterClient::new(&env, &env.register_contract(None, MockFeeRouter));

        let vault = Address::generate(&env);
        let owner = Address::generate(&env);
        let strategist = Address::generate(&env);
        let treasury = Address::generate(&env);
        let strategist_payee = Address::generate(&env);
        let keeper = Address::generate(&env);

        farm.setup_farm(&basket, &reward);
        router.set_rate(&reward, &base, &2, &1);
        router.set_rate(&base, &token_a, &1, &1);
        router.set_rate(&base, &token_b, &2, &1);
        fee_router.setup_fee_router(&strategist_payee);

        mint(&env, &reward, &farm.address, LIQUIDITY);
        mint(&env, &base, &router.address, LIQUIDITY);
        mint(&env, &token_a, &router.address, LIQUIDITY);
        mint(&env, &token_b, &router.address, LIQUIDITY);
        mint(&env, &basket, &pool.address, LIQUIDITY);

        let config = StrategyConfig {
            vault: vault.clone(),
            owner: owner.clone(),
            strategists: vec![&env, strategist.clone()],
            treasury: treasury.clone(),
            fee_router: fee_router.address.clone(),
            base_token: base.clone(),
            reward_token: reward.clone(),
            basket_token: basket.clone(),
            farm: farm.address.clone(),
            farm_pool_id: 7,
            liquidity_pool: pool.address.clone(),
            swap_deadline_secs: DEADLINE_SECS,
            allowance_ttl_ledgers: ALLOWANCE_TTL,
        };

        let route = |to: &Address| SwapRoute {
            router: router.address.clone(),
            path: vec![&env, base.clone(), to.clone()],
        };
        let mut underlyings = Vec::new(&env);
        let mut pool_tokens = Vec::new(&env);
        if let Some(weight) = layout.base_weight {
            underlyings.push_back(UnderlyingAsset {
                token: base.clone(),
                weight,
                route: SwapRoute {
                    router: router.address.clone(),
                    path: vec![&env, base.clone()],
                },
            });
            pool_tokens.push_back(base.clone());
        }
        underlyings.push_back(UnderlyingAsset {
            token: token_a.clone(),
            weight: layout.a_weight,
            route: route(&token_a),
        });
        underlyings.push_back(UnderlyingAsset {
            token: token_b.clone(),
            weight: layout.b_weight,
            route: route(&token_b),
        });
        pool_tokens.push_back(token_a.clone());
        pool_tokens.push_back(token_b.clone());
        pool.setup_pool(&basket, &pool_tokens);

        let reward_route = SwapRoute {
            router: router.address.clone(),
            path: vec![&env, reward.clone(), base.clone()],
        };

        let strategy = WeightedCompounderClient::new(&env, &env.register_contract(None, WeightedCompounder));
        strategy.initialize(
            &config,
            &fees,
            &SlippageConfig::permissive(),
            &policy,
            &underlyings,
            &reward_route,
        );

        Harness {
            env,
            strategy,
            vault,
            owner,
            strategist,
            treasury,
            strategist_payee,
            keeper,
            base,
            reward,
            basket,
            token_a,
            token_b,
            farm,
            router,
            pool,
            config,
            underlyings,
            reward_route,
        }
    }

    pub fn balance(&self, token: &Address, owner: &Address) -> i128 {
        token::Client::new(&self.env, token).balance(owner)
    }

    pub fn allowance(&self, token: &Address, spender: &Address) -> i128 {
        token::Client::new(&self.env, token).allowance(&self.strategy.address, spender)
    }

    /// Vault hands `amount` basket tokens to the strategy and deposits.
    pub fn vault_deposit(&self, amount: i128) -> i128 {
        mint(&self.env, &self.basket, &self.vault, amount);
        token::Client::new(&self.env, &self.basket).transfer(&self.vault, &self.strategy.address, &amount);
        self.strategy.deposit(&self.vault)
    }

    pub fn set_pending_rewards(&self, amount: i128) {
        self.farm.set_pending(&self.strategy.address, &amount);
    }
}

pub fn mint(env: &Env, token: &Address, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, token).mint(to, &amount);
}
