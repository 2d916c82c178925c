#![no_std]

pub mod config;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod multiplier;
pub mod rewards;
pub mod storage;

use common::admin_tiers::{self, AdminTier};
use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, Vec};

pub use config::{ClockResetPolicy, StakingConfig, MAX_DEPOSIT_FEE_BPS};
pub use errors::ContractError;
pub use multiplier::{MultiplierCurve, MultiplierPoint, RewardMode, MULTIPLIER_ONE};
pub use rewards::PRECISION;

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// A user's position as seen by one reward token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserInfo {
    pub amount: i128,
    pub reward_debt: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `staking_token` – SAC address of the principal users deposit.
    /// * `reward_token`  – first reward token; more can be registered later.
    /// * `config`        – fee, reward mode and clock policy.
    pub fn initialize(
        env: Env,
        admin: Address,
        staking_token: Address,
        reward_token: Address,
        config: StakingConfig,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        config.validate()?;

        env.storage().instance().set(&storage::INITIALIZED, &true);
        env.storage()
            .instance()
            .set(&storage::STAKING_TOKEN, &staking_token);
        storage::set_config(&env, &config);
        storage::set_total_staked(&env, 0);

        ledger::add_reward_token(&env, &staking_token, &reward_token)?;

        admin_tiers::set_primary(&env, &admin);
        storage::extend_instance_ttl(&env);

        events::publish_initialized(
            &env,
            admin,
            staking_token,
            reward_token.clone(),
            config.deposit_fee_bps,
        );
        events::publish_reward_token_added(&env, reward_token);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the staking token and collect pending rewards.
    ///
    /// `amount == 0` only collects. A deposit fee, if configured, is taken
    /// out of `amount` and forwarded to the fee collector.
    pub fn deposit(env: Env, user: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_not_paused(&env)?;
        user.require_auth();

        let config = Self::config(&env)?;
        let staking_token = Self::staking_token(&env)?;
        let (fee, payouts) = ledger::deposit(&env, &config, &user, amount)?;
        storage::extend_instance_ttl(&env);

        let this = env.current_contract_address();
        let stake = token::Client::new(&env, &staking_token);
        if amount > 0 {
            stake.transfer(&user, &this, &amount);
        }
        if fee > 0 {
            stake.transfer(&this, &config.fee_collector, &fee);
        }
        ledger::pay_out(&env, &user, &payouts);

        Ok(())
    }

    /// Withdraw `amount` of principal and collect pending rewards.
    pub fn withdraw(env: Env, user: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_not_paused(&env)?;
        user.require_auth();

        let config = Self::config(&env)?;
        let staking_token = Self::staking_token(&env)?;
        let payouts = ledger::withdraw(&env, &config, &user, amount)?;
        storage::extend_instance_ttl(&env);

        if amount > 0 {
            token::Client::new(&env, &staking_token).transfer(
                &env.current_contract_address(),
                &user,
                &amount,
            );
        }
        ledger::pay_out(&env, &user, &payouts);

        Ok(())
    }

    /// Withdraw `amount` and claim a pro-rata share of every forgone pool.
    ///
    /// Only positions at full multiplier holding at least the configured
    /// minimum qualify. `amount` may be zero, which claims without touching
    /// the principal or the multiplier clock.
    pub fn withdraw_and_claim_extra(
        env: Env,
        user: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_not_paused(&env)?;
        user.require_auth();

        let config = Self::config(&env)?;
        let staking_token = Self::staking_token(&env)?;
        let payouts = ledger::withdraw_and_claim_extra(&env, &config, &user, amount)?;
        storage::extend_instance_ttl(&env);

        if amount > 0 {
            token::Client::new(&env, &staking_token).transfer(
                &env.current_contract_address(),
                &user,
                &amount,
            );
        }
        ledger::pay_out(&env, &user, &payouts);

        Ok(())
    }

    /// Return the whole principal without touching any reward token.
    /// Every unpaid reward is forfeited. Works while paused.
    pub fn emergency_withdraw(env: Env, user: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        let staking_token = Self::staking_token(&env)?;
        let amount = ledger::emergency_withdraw(&env, &user);
        storage::extend_instance_ttl(&env);

        if amount > 0 {
            token::Client::new(&env, &staking_token).transfer(
                &env.current_contract_address(),
                &user,
                &amount,
            );
        }
        Ok(amount)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_user_info(env: Env, user: Address, token: Address) -> Result<UserInfo, ContractError> {
        Ok(UserInfo {
            amount: storage::get_position(&env, &user).amount,
            reward_debt: ledger::reward_debt(&env, &user, &token)?,
        })
    }

    /// Reward `user` would receive for `token` if they interacted now.
    pub fn pending_reward(env: Env, user: Address, token: Address) -> Result<i128, ContractError> {
        let config = Self::config(&env)?;
        ledger::pending_reward(&env, &config, &user, &token)
    }

    /// Extra reward a full withdrawal by `user` would receive now.
    pub fn pending_extra_rewards(
        env: Env,
        user: Address,
        token: Address,
    ) -> Result<i128, ContractError> {
        let config = Self::config(&env)?;
        ledger::pending_extra_reward(&env, &config, &user, &token)
    }

    pub fn get_staking_multiplier(env: Env, user: Address) -> Result<u32, ContractError> {
        let config = Self::config(&env)?;
        let position = storage::get_position(&env, &user);
        Ok(ledger::multiplier_for(&env, &config, &position))
    }

    pub fn reward_tokens_length(env: Env) -> u32 {
        storage::reward_tokens(&env).len()
    }

    pub fn reward_token_at(env: Env, index: u32) -> Option<Address> {
        storage::reward_tokens(&env).get(index)
    }

    pub fn get_reward_tokens(env: Env) -> Vec<Address> {
        storage::reward_tokens(&env)
    }

    pub fn is_reward_token(env: Env, token: Address) -> bool {
        storage::get_pool(&env, &token)
            .map(|pool| pool.registered)
            .unwrap_or(false)
    }

    pub fn forgone_rewards_pool(env: Env, token: Address) -> i128 {
        storage::get_pool(&env, &token)
            .map(|pool| pool.forgone_rewards)
            .unwrap_or(0)
    }

    pub fn acc_reward_per_share(env: Env, token: Address) -> i128 {
        storage::get_pool(&env, &token)
            .map(|pool| pool.acc_reward_per_share)
            .unwrap_or(0)
    }

    pub fn last_reward_balance(env: Env, token: Address) -> i128 {
        storage::get_pool(&env, &token)
            .map(|pool| pool.last_reward_balance)
            .unwrap_or(0)
    }

    /// Return the sum of all currently staked principal.
    pub fn get_total_staked(env: Env) -> i128 {
        storage::get_total_staked(&env)
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        Self::config(&env)
    }

    pub fn get_staking_token(env: Env) -> Result<Address, ContractError> {
        Self::staking_token(&env)
    }

    pub fn deposit_fee_bps(env: Env) -> Result<u32, ContractError> {
        Ok(Self::config(&env)?.deposit_fee_bps)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        admin_tiers::primary(&env).ok_or(ContractError::NotInitialized)
    }

    // ── Reward-token registry ───────────────────────────────────────────────

    /// Register an additional reward token.
    ///
    /// Requires at least `ContractAdmin` tier.
    pub fn add_reward_token(env: Env, caller: Address, token: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        let staking_token = Self::staking_token(&env)?;
        ledger::add_reward_token(&env, &staking_token, &token)?;
        storage::extend_instance_ttl(&env);

        events::publish_reward_token_added(&env, token);
        Ok(())
    }

    /// Deregister a reward token. Unclaimed rewards in it stay in the
    /// contract and cannot be swept.
    ///
    /// Requires at least `ContractAdmin` tier.
    pub fn remove_reward_token(
        env: Env,
        caller: Address,
        token: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        ledger::remove_reward_token(&env, &token)?;
        storage::extend_instance_ttl(&env);

        events::publish_reward_token_removed(&env, token);
        Ok(())
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Update the deposit fee (basis points, at most `MAX_DEPOSIT_FEE_BPS`).
    ///
    /// Requires at least `ContractAdmin` tier.
    pub fn set_deposit_fee(env: Env, caller: Address, bps: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        if bps > MAX_DEPOSIT_FEE_BPS {
            return Err(ContractError::FeeTooHigh);
        }
        let mut config = Self::config(&env)?;
        let old_bps = config.deposit_fee_bps;
        config.deposit_fee_bps = bps;
        storage::set_config(&env, &config);

        events::publish_deposit_fee_set(&env, old_bps, bps);
        Ok(())
    }

    /// Requires at least `ContractAdmin` tier.
    pub fn set_fee_collector(
        env: Env,
        caller: Address,
        collector: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        let mut config = Self::config(&env)?;
        let old_collector = config.fee_collector.clone();
        config.fee_collector = collector.clone();
        storage::set_config(&env, &config);

        events::publish_fee_collector_set(&env, old_collector, collector);
        Ok(())
    }

    /// Move the contract's whole balance of a stray `token` to `to`.
    ///
    /// Requires at least `ContractAdmin` tier.
    pub fn sweep(
        env: Env,
        caller: Address,
        token: Address,
        to: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        let staking_token = Self::staking_token(&env)?;
        if !ledger::is_sweepable(&env, &staking_token, &token) {
            return Err(ContractError::TokenNotSweepable);
        }

        let amount = ledger::balance_of(&env, &token);
        if amount > 0 {
            token::Client::new(&env, &token).transfer(&env.current_contract_address(), &to, &amount);
        }

        events::publish_sweep(&env, token, to, amount);
        Ok(amount)
    }

    /// Halt deposits and withdrawals. Emergency withdraw stays available.
    ///
    /// Requires at least `OperatorAdmin` tier.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::OperatorAdmin)?;

        storage::set_paused(&env, true);
        events::publish_paused(&env, caller);
        Ok(())
    }

    /// Requires at least `OperatorAdmin` tier.
    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::OperatorAdmin)?;

        storage::set_paused(&env, false);
        events::publish_unpaused(&env, caller);
        Ok(())
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new primary admin. Only the current primary admin can call
    /// this. The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_primary(&env, &current_admin)?;

        env.storage()
            .instance()
            .set(&storage::PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed admin can call
    /// this. The previous primary admin loses its tier.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&storage::PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;

        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin = admin_tiers::primary(&env).ok_or(ContractError::NotInitialized)?;

        admin_tiers::clear_tier(&env, &old_admin);
        admin_tiers::set_primary(&env, &new_admin);
        env.storage().instance().remove(&storage::PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the primary admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_primary(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&storage::PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;

        env.storage().instance().remove(&storage::PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    /// Get the pending admin address, if any.
    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&storage::PENDING_ADMIN)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Assign `tier` to `target`.
    ///
    /// Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::promote(&env, &caller, &target, tier) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Remove every tier held by `target`. The primary admin cannot be
    /// demoted.
    ///
    /// Only a `SuperAdmin` may call this.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::demote(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Returns the admin tier of the given address, if any.
    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::get_tier(&env, &admin)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_not_paused(env: &Env) -> Result<(), ContractError> {
        if storage::is_paused(env) {
            return Err(ContractError::Paused);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the primary admin.
    fn require_primary(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin = admin_tiers::primary(env).ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` does not hold at least `min_tier`.
    fn require_admin_tier(
        env: &Env,
        caller: &Address,
        min_tier: &AdminTier,
    ) -> Result<(), ContractError> {
        if admin_tiers::require_tier(env, caller, min_tier) {
            return Ok(());
        }
        Err(ContractError::Unauthorized)
    }

    fn config(env: &Env) -> Result<StakingConfig, ContractError> {
        storage::get_config(env).ok_or(ContractError::NotInitialized)
    }

    fn staking_token(env: &Env) -> Result<Address, ContractError> {
        storage::get_staking_token(env).ok_or(ContractError::NotInitialized)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
