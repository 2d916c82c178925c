use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::config::StakingConfig;

// ── Storage key constants ───────────────────────────────────────────────────

pub const INITIALIZED: Symbol = symbol_short!("INIT");
pub const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
pub const STAKING_TOKEN: Symbol = symbol_short!("STK_TOK");
pub const CONFIG: Symbol = symbol_short!("CONFIG");
pub const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
pub const REWARD_TOKENS: Symbol = symbol_short!("RWD_TOKS");
pub const PAUSED: Symbol = symbol_short!("PAUSED");

// Tuple-key prefixes.
const POOL: Symbol = symbol_short!("POOL");
const POSITION: Symbol = symbol_short!("POS");
const REWARD: Symbol = symbol_short!("RWD");

const DAY_IN_LEDGERS: u32 = 17_280;
const TTL_THRESHOLD: u32 = 29 * DAY_IN_LEDGERS;
const TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;

// ── Records ─────────────────────────────────────────────────────────────────

/// Global accounting for one reward token.
///
/// The record outlives deregistration so that a former reward token stays
/// protected from `sweep` and its accumulator keeps growing monotonically if
/// it is registered again.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolState {
    /// Cumulative reward per staked unit, scaled by `rewards::PRECISION`.
    pub acc_reward_per_share: i128,
    /// Reward balance already folded into the accumulator, net of payouts.
    pub last_reward_balance: i128,
    /// Discounted or forfeited rewards still held by the contract.
    pub forgone_rewards: i128,
    pub registered: bool,
    /// Bumped on every (re-)registration.
    pub epoch: u32,
    /// Accumulator value when the current epoch began.
    pub epoch_start_acc: i128,
}

/// Principal held by one user; shared by every reward token.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakePosition {
    pub amount: i128,
    /// Start of the multiplier clock.
    pub deposit_timestamp: u64,
}

/// Reward bookkeeping for one (user, reward token) pair.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RewardPosition {
    /// Pool epoch this record was last synced in.
    pub epoch: u32,
    /// `amount × acc / PRECISION` at the last sync.
    pub reward_debt: i128,
    /// Raw entitlement since the multiplier clock last restarted.
    pub accrued: i128,
    /// Paid out of `accrued` during the same clock epoch.
    pub claimed: i128,
}

// ── TTL ─────────────────────────────────────────────────────────────────────

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Instance helpers ────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn get_config(env: &Env) -> Option<StakingConfig> {
    env.storage().instance().get(&CONFIG)
}

pub fn set_config(env: &Env, config: &StakingConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn get_staking_token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&STAKING_TOKEN)
}

pub fn get_total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

pub fn set_total_staked(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_STAKED, &total);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}

/// Registered reward tokens in insertion order.
pub fn reward_tokens(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&REWARD_TOKENS)
        .unwrap_or(Vec::new(env))
}

pub fn set_reward_tokens(env: &Env, tokens: &Vec<Address>) {
    env.storage().instance().set(&REWARD_TOKENS, tokens);
}

// ── Pools ───────────────────────────────────────────────────────────────────

fn pool_key(token: &Address) -> (Symbol, Address) {
    (POOL, token.clone())
}

/// `None` for tokens that were never registered.
pub fn get_pool(env: &Env, token: &Address) -> Option<PoolState> {
    env.storage().persistent().get(&pool_key(token))
}

pub fn set_pool(env: &Env, token: &Address, pool: &PoolState) {
    let key = pool_key(token);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Positions ───────────────────────────────────────────────────────────────

fn position_key(user: &Address) -> (Symbol, Address) {
    (POSITION, user.clone())
}

pub fn get_position(env: &Env, user: &Address) -> StakePosition {
    env.storage()
        .persistent()
        .get(&position_key(user))
        .unwrap_or_default()
}

pub fn set_position(env: &Env, user: &Address, position: &StakePosition) {
    let key = position_key(user);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn reward_key(user: &Address, token: &Address) -> (Symbol, Address, Address) {
    (REWARD, user.clone(), token.clone())
}

/// Stored record for `(user, token)` as last written, regardless of epoch.
pub fn get_reward_position(env: &Env, user: &Address, token: &Address) -> RewardPosition {
    env.storage()
        .persistent()
        .get(&reward_key(user, token))
        .unwrap_or_default()
}

pub fn set_reward_position(env: &Env, user: &Address, token: &Address, record: &RewardPosition) {
    let key = reward_key(user, token);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
