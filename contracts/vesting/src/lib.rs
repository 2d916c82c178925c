#![no_std]

pub mod errors;
pub mod events;

use common::admin_tiers::{self, AdminTier};
use common::math::mul_div;
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol, Vec};

pub use errors::VestingError;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
const START: Symbol = symbol_short!("START");
const DURATION: Symbol = symbol_short!("DURATION");
const TOTAL_ALLOCATED: Symbol = symbol_short!("TOT_ALOC");
const TOTAL_CLAIMED: Symbol = symbol_short!("TOT_CLMD");

// Per-beneficiary persistent storage uses tuple keys: (prefix, beneficiary)
const ALLOCATION: Symbol = symbol_short!("ALLOC");

const DAY_IN_LEDGERS: u32 = 17_280;
const TTL_THRESHOLD: u32 = 29 * DAY_IN_LEDGERS;
const TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;

/// Tokens granted to one beneficiary and how much of them left the contract.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Allocation {
    pub total: i128,
    pub claimed: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Linear token vesting: every allocation is released pro rata from
/// `start` to `start + duration`.
#[contract]
pub struct VestingContract;

#[contractimpl]
impl VestingContract {
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        start: u64,
        duration: u64,
    ) -> Result<(), VestingError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(VestingError::AlreadyInitialized);
        }
        if duration == 0 {
            return Err(VestingError::InvalidDuration);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&START, &start);
        env.storage().instance().set(&DURATION, &duration);
        env.storage().instance().set(&TOTAL_ALLOCATED, &0i128);
        env.storage().instance().set(&TOTAL_CLAIMED, &0i128);
        Self::extend_instance_ttl(&env);

        admin_tiers::set_primary(&env, &admin);

        events::publish_initialized(&env, admin, token, start, duration);
        Ok(())
    }

    /// Grant `amounts[i]` to `beneficiaries[i]`. The tokens must already be
    /// held by the contract.
    ///
    /// Requires at least `ContractAdmin` tier.
    pub fn vest(
        env: Env,
        admin: Address,
        beneficiaries: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<(), VestingError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        if !admin_tiers::require_tier(&env, &admin, &AdminTier::ContractAdmin) {
            return Err(VestingError::Unauthorized);
        }
        if beneficiaries.len() != amounts.len() {
            return Err(VestingError::LengthMismatch);
        }

        let mut total_allocated = Self::total_allocated(env.clone());
        for amount in amounts.iter() {
            if amount <= 0 {
                return Err(VestingError::InvalidAmount);
            }
            total_allocated = total_allocated
                .checked_add(amount)
                .ok_or(VestingError::ArithmeticOverflow)?;
        }

        let claimed: i128 = env.storage().instance().get(&TOTAL_CLAIMED).unwrap_or(0);
        let outstanding = total_allocated
            .checked_sub(claimed)
            .ok_or(VestingError::ArithmeticOverflow)?;
        let held = token::Client::new(&env, &Self::token(&env)?)
            .balance(&env.current_contract_address());
        if outstanding > held {
            return Err(VestingError::InsufficientFunding);
        }

        for (beneficiary, amount) in beneficiaries.iter().zip(amounts.iter()) {
            let mut allocation = Self::get_allocation(env.clone(), beneficiary.clone());
            allocation.total = allocation
                .total
                .checked_add(amount)
                .ok_or(VestingError::ArithmeticOverflow)?;
            Self::store_allocation(&env, &beneficiary, &allocation);
            events::publish_vested(&env, beneficiary, amount, allocation.total);
        }
        env.storage()
            .instance()
            .set(&TOTAL_ALLOCATED, &total_allocated);
        Self::extend_instance_ttl(&env);

        Ok(())
    }

    /// Send `amount` of the beneficiary's released tokens to `to`.
    pub fn claim(
        env: Env,
        beneficiary: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), VestingError> {
        Self::require_initialized(&env)?;
        beneficiary.require_auth();
        if amount <= 0 {
            return Err(VestingError::InvalidAmount);
        }

        let releasable = Self::claimable(env.clone(), beneficiary.clone())?;
        if releasable == 0 {
            return Err(VestingError::NothingVested);
        }
        if amount > releasable {
            return Err(VestingError::ExceedsVested);
        }

        let mut allocation = Self::get_allocation(env.clone(), beneficiary.clone());
        allocation.claimed = allocation
            .claimed
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        Self::store_allocation(&env, &beneficiary, &allocation);

        let claimed: i128 = env.storage().instance().get(&TOTAL_CLAIMED).unwrap_or(0);
        let claimed = claimed
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        env.storage().instance().set(&TOTAL_CLAIMED, &claimed);
        Self::extend_instance_ttl(&env);

        token::Client::new(&env, &Self::token(&env)?).transfer(
            &env.current_contract_address(),
            &to,
            &amount,
        );

        events::publish_claimed(&env, beneficiary, to, amount);
        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Portion of the beneficiary's allocation released so far, claimed or not.
    pub fn vested_amount(env: Env, beneficiary: Address) -> Result<i128, VestingError> {
        Self::require_initialized(&env)?;
        let start: u64 = env.storage().instance().get(&START).unwrap_or(0);
        let duration: u64 = env.storage().instance().get(&DURATION).unwrap_or(1);
        let now = env.ledger().timestamp();
        let total = Self::get_allocation(env, beneficiary).total;

        if now < start {
            return Ok(0);
        }
        let elapsed = (now - start).min(duration);
        mul_div(total, elapsed as i128, duration as i128).ok_or(VestingError::ArithmeticOverflow)
    }

    pub fn claimable(env: Env, beneficiary: Address) -> Result<i128, VestingError> {
        let vested = Self::vested_amount(env.clone(), beneficiary.clone())?;
        let claimed = Self::get_allocation(env, beneficiary).claimed;
        Ok((vested - claimed).max(0))
    }

    pub fn get_allocation(env: Env, beneficiary: Address) -> Allocation {
        env.storage()
            .persistent()
            .get(&(ALLOCATION, beneficiary))
            .unwrap_or_default()
    }

    pub fn total_allocated(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_ALLOCATED).unwrap_or(0)
    }

    pub fn get_token(env: Env) -> Result<Address, VestingError> {
        Self::token(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, VestingError> {
        admin_tiers::primary(&env).ok_or(VestingError::NotInitialized)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), VestingError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(VestingError::NotInitialized);
        }
        Ok(())
    }

    fn token(env: &Env) -> Result<Address, VestingError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(VestingError::NotInitialized)
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    fn store_allocation(env: &Env, beneficiary: &Address, allocation: &Allocation) {
        let key = (ALLOCATION, beneficiary.clone());
        env.storage().persistent().set(&key, allocation);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
