//! Reward accounting shared by every entry point.
//!
//! Each function here applies its storage effects and returns the transfers
//! the caller still owes. Entry points run those transfers last, after every
//! write of the invocation has been made.

use soroban_sdk::{token, Address, Env, Vec};

use crate::config::StakingConfig;
use crate::errors::ContractError;
use crate::events;
use crate::multiplier::MULTIPLIER_ONE;
use crate::rewards;
use crate::storage::{self, PoolState, RewardPosition, StakePosition};

/// Reward transfers owed to a user: `(reward token, amount)`.
pub type Payouts = Vec<(Address, i128)>;

fn checked<T>(value: Option<T>) -> Result<T, ContractError> {
    value.ok_or(ContractError::ArithmeticOverflow)
}

pub fn balance_of(env: &Env, token: &Address) -> i128 {
    token::Client::new(env, token).balance(&env.current_contract_address())
}

pub fn pay_out(env: &Env, user: &Address, payouts: &Payouts) {
    let this = env.current_contract_address();
    for (token, amount) in payouts.iter() {
        if amount > 0 {
            token::Client::new(env, &token).transfer(&this, user, &amount);
        }
    }
}

// ── Pools ───────────────────────────────────────────────────────────────────

/// Fold rewards that arrived since the last update into the accumulator.
///
/// With nothing staked the balance stays unaccounted, so the stakers present
/// at the next update receive it.
pub fn update_pool(
    env: &Env,
    token: &Address,
    pool: &mut PoolState,
    total_staked: i128,
) -> Result<(), ContractError> {
    let balance = balance_of(env, token);
    let delta = checked(balance.checked_sub(pool.last_reward_balance))?;
    if total_staked <= 0 || delta <= 0 {
        return Ok(());
    }
    pool.acc_reward_per_share = checked(rewards::accrue(
        pool.acc_reward_per_share,
        delta,
        total_staked,
    ))?;
    pool.last_reward_balance = balance;
    Ok(())
}

/// Accumulator value `update_pool` would produce now, without writing it.
pub fn projected_acc(
    env: &Env,
    token: &Address,
    pool: &PoolState,
    total_staked: i128,
) -> Result<i128, ContractError> {
    let mut pool = pool.clone();
    update_pool(env, token, &mut pool, total_staked)?;
    Ok(pool.acc_reward_per_share)
}

fn registered_pool(env: &Env, token: &Address) -> Option<PoolState> {
    storage::get_pool(env, token).filter(|pool| pool.registered)
}

// ── Positions ───────────────────────────────────────────────────────────────

/// The user's record for the pool's current epoch.
///
/// A record written in an earlier registration of the token is stale: it is
/// rebased to the accumulator at which the current registration began.
pub fn effective_record(
    pool: &PoolState,
    stored: RewardPosition,
    amount: i128,
) -> Result<RewardPosition, ContractError> {
    if stored.epoch == pool.epoch {
        return Ok(stored);
    }
    Ok(RewardPosition {
        epoch: pool.epoch,
        reward_debt: checked(rewards::debt_for(amount, pool.epoch_start_acc))?,
        accrued: 0,
        claimed: 0,
    })
}

/// Multiplier currently applied to `position`. Empty positions have none.
pub fn multiplier_for(env: &Env, config: &StakingConfig, position: &StakePosition) -> u32 {
    if position.amount <= 0 {
        return 0;
    }
    let elapsed = env
        .ledger()
        .timestamp()
        .saturating_sub(position.deposit_timestamp);
    config.reward_mode.multiplier_at(elapsed)
}

/// Settle `user` against every registered reward token before the position
/// moves from `position.amount` to `new_amount`.
///
/// Pays what the multiplier allows, forgoes the remainder when `close_epoch`
/// is set, and re-syncs each reward debt to `new_amount`.
pub fn settle_all(
    env: &Env,
    config: &StakingConfig,
    user: &Address,
    position: &StakePosition,
    new_amount: i128,
    close_epoch: bool,
) -> Result<Payouts, ContractError> {
    let total_staked = storage::get_total_staked(env);
    let multiplier = multiplier_for(env, config, position);
    let mut payouts = Payouts::new(env);

    for token in storage::reward_tokens(env).iter() {
        let mut pool = match registered_pool(env, &token) {
            Some(pool) => pool,
            None => continue,
        };
        update_pool(env, &token, &mut pool, total_staked)?;

        let stored = storage::get_reward_position(env, user, &token);
        let record = effective_record(&pool, stored, position.amount)?;
        let accrued_now = checked(rewards::accrued_now(
            record.accrued,
            position.amount,
            pool.acc_reward_per_share,
            record.reward_debt,
        ))?;
        let s = checked(rewards::settle(
            accrued_now,
            record.claimed,
            multiplier,
            close_epoch,
        ))?;

        pool.forgone_rewards = checked(pool.forgone_rewards.checked_add(s.forgone))?;
        pool.last_reward_balance = checked(pool.last_reward_balance.checked_sub(s.paid))?;
        storage::set_pool(env, &token, &pool);
        storage::set_reward_position(
            env,
            user,
            &token,
            &RewardPosition {
                epoch: pool.epoch,
                reward_debt: checked(rewards::debt_for(new_amount, pool.acc_reward_per_share))?,
                accrued: s.accrued,
                claimed: s.claimed,
            },
        );

        if s.forgone > 0 {
            events::publish_forgone(
                env,
                user.clone(),
                token.clone(),
                s.forgone,
                pool.forgone_rewards,
            );
        }
        if s.paid > 0 {
            events::publish_reward_claimed(env, user.clone(), token.clone(), s.paid);
            payouts.push_back((token, s.paid));
        }
    }
    Ok(payouts)
}

// ── Deposit / withdraw ──────────────────────────────────────────────────────

/// Storage effects of a deposit. Returns `(fee, reward payouts)`.
pub fn deposit(
    env: &Env,
    config: &StakingConfig,
    user: &Address,
    amount: i128,
) -> Result<(i128, Payouts), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    let fee = checked(common::math::bps_of(amount, config.deposit_fee_bps))?;
    let staked = checked(amount.checked_sub(fee))?;

    let mut position = storage::get_position(env, user);
    let new_amount = checked(position.amount.checked_add(staked))?;
    let restart = config.deposit_restarts_clock(position.amount, staked);

    let payouts = settle_all(env, config, user, &position, new_amount, restart)?;

    let total = checked(storage::get_total_staked(env).checked_add(staked))?;
    position.amount = new_amount;
    if restart {
        position.deposit_timestamp = env.ledger().timestamp();
    }
    storage::set_position(env, user, &position);
    storage::set_total_staked(env, total);

    events::publish_deposit(env, user.clone(), amount, fee, new_amount, total);
    Ok((fee, payouts))
}

/// Storage effects of a withdrawal. Returns the reward payouts.
pub fn withdraw(
    env: &Env,
    config: &StakingConfig,
    user: &Address,
    amount: i128,
) -> Result<Payouts, ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    let mut position = storage::get_position(env, user);
    if amount > position.amount {
        return Err(ContractError::InsufficientBalance);
    }
    let new_amount = position.amount - amount;
    let close_epoch = config.withdraw_closes_epoch(position.amount, amount);

    let payouts = settle_all(env, config, user, &position, new_amount, close_epoch)?;

    let total = checked(storage::get_total_staked(env).checked_sub(amount))?;
    position.amount = new_amount;
    // An emptied position keeps its timestamp; the next deposit restarts it.
    if close_epoch && new_amount > 0 {
        position.deposit_timestamp = env.ledger().timestamp();
    }
    storage::set_position(env, user, &position);
    storage::set_total_staked(env, total);

    events::publish_withdraw(env, user.clone(), amount, new_amount, total);
    Ok(payouts)
}

/// Return the whole principal and forfeit every unpaid entitlement into the
/// forgone pools. Reward-token contracts are never called, so a broken
/// reward token cannot trap the principal.
pub fn emergency_withdraw(env: &Env, user: &Address) -> i128 {
    let mut position = storage::get_position(env, user);
    let amount = position.amount;

    for token in storage::reward_tokens(env).iter() {
        let mut pool = match registered_pool(env, &token) {
            Some(pool) => pool,
            None => continue,
        };
        let stored = storage::get_reward_position(env, user, &token);
        let forfeited = forfeitable(&pool, stored, amount).unwrap_or(0);
        if forfeited > 0 {
            if let Some(new_pool) = pool.forgone_rewards.checked_add(forfeited) {
                pool.forgone_rewards = new_pool;
                storage::set_pool(env, &token, &pool);
                events::publish_forgone(env, user.clone(), token.clone(), forfeited, new_pool);
            }
        }
        storage::set_reward_position(
            env,
            user,
            &token,
            &RewardPosition {
                epoch: pool.epoch,
                ..RewardPosition::default()
            },
        );
    }

    position.amount = 0;
    storage::set_position(env, user, &position);
    let total = storage::get_total_staked(env).saturating_sub(amount).max(0);
    storage::set_total_staked(env, total);

    events::publish_emergency_withdraw(env, user.clone(), amount);
    amount
}

fn forfeitable(pool: &PoolState, stored: RewardPosition, amount: i128) -> Option<i128> {
    let record = effective_record(pool, stored, amount).ok()?;
    let accrued_now = rewards::accrued_now(
        record.accrued,
        amount,
        pool.acc_reward_per_share,
        record.reward_debt,
    )?;
    Some(accrued_now.checked_sub(record.claimed)?.max(0))
}

// ── Extra rewards ───────────────────────────────────────────────────────────

/// Whether `position` may claim extra rewards: it must hold at least the
/// configured minimum and sit at full multiplier.
pub fn is_eligible_for_extra(
    env: &Env,
    config: &StakingConfig,
    position: &StakePosition,
) -> bool {
    position.amount > 0
        && position.amount >= config.extra_rewards_min_stake
        && multiplier_for(env, config, position) == MULTIPLIER_ONE
}

/// Withdraw `amount` (possibly zero) and take a pro-rata slice of every
/// forgone pool. Returns all payouts, regular rewards first.
pub fn withdraw_and_claim_extra(
    env: &Env,
    config: &StakingConfig,
    user: &Address,
    amount: i128,
) -> Result<Payouts, ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    let position = storage::get_position(env, user);
    if amount > position.amount {
        return Err(ContractError::InsufficientBalance);
    }
    if !is_eligible_for_extra(env, config, &position) {
        return Err(ContractError::NotEligibleForExtraRewards);
    }

    // Shares are fixed against the position before it shrinks.
    let total_staked = storage::get_total_staked(env);
    let tokens = storage::reward_tokens(env);
    let mut shares = Payouts::new(env);
    for token in tokens.iter() {
        if let Some(pool) = registered_pool(env, &token) {
            let share = checked(rewards::extra_share(
                pool.forgone_rewards,
                position.amount,
                total_staked,
            ))?;
            shares.push_back((token, share));
        }
    }

    // At full multiplier the settlement forgoes nothing, so the pools read
    // above are still current.
    let mut payouts = withdraw(env, config, user, amount)?;

    for (token, share) in shares.iter() {
        if share <= 0 {
            continue;
        }
        let mut pool = registered_pool(env, &token).ok_or(ContractError::RewardTokenNotRegistered)?;
        pool.forgone_rewards = checked(pool.forgone_rewards.checked_sub(share))?;
        pool.last_reward_balance = checked(pool.last_reward_balance.checked_sub(share))?;
        storage::set_pool(env, &token, &pool);
        events::publish_extra_claimed(env, user.clone(), token.clone(), share, pool.forgone_rewards);
        payouts.push_back((token, share));
    }
    Ok(payouts)
}

// ── Queries ─────────────────────────────────────────────────────────────────

pub fn pending_reward(
    env: &Env,
    config: &StakingConfig,
    user: &Address,
    token: &Address,
) -> Result<i128, ContractError> {
    let pool = match registered_pool(env, token) {
        Some(pool) => pool,
        None => return Ok(0),
    };
    let position = storage::get_position(env, user);
    let acc = projected_acc(env, token, &pool, storage::get_total_staked(env))?;
    let stored = storage::get_reward_position(env, user, token);
    let record = effective_record(&pool, stored, position.amount)?;
    let accrued_now = checked(rewards::accrued_now(
        record.accrued,
        position.amount,
        acc,
        record.reward_debt,
    ))?;
    let multiplier = multiplier_for(env, config, &position);
    checked(rewards::claimable(accrued_now, record.claimed, multiplier))
}

/// Extra share a full-multiplier holder would receive now; 0 if ineligible.
pub fn pending_extra_reward(
    env: &Env,
    config: &StakingConfig,
    user: &Address,
    token: &Address,
) -> Result<i128, ContractError> {
    let position = storage::get_position(env, user);
    if !is_eligible_for_extra(env, config, &position) {
        return Ok(0);
    }
    match registered_pool(env, token) {
        Some(pool) => checked(rewards::extra_share(
            pool.forgone_rewards,
            position.amount,
            storage::get_total_staked(env),
        )),
        None => Ok(0),
    }
}

/// Reward debt of `user` for `token` as the ledger currently sees it.
pub fn reward_debt(env: &Env, user: &Address, token: &Address) -> Result<i128, ContractError> {
    let pool = match storage::get_pool(env, token) {
        Some(pool) => pool,
        None => return Ok(0),
    };
    let amount = storage::get_position(env, user).amount;
    let stored = storage::get_reward_position(env, user, token);
    Ok(effective_record(&pool, stored, amount)?.reward_debt)
}

// ── Registry ────────────────────────────────────────────────────────────────

/// Register `token`, opening a new epoch for it. Balance already held is not
/// distributed.
pub fn add_reward_token(
    env: &Env,
    staking_token: &Address,
    token: &Address,
) -> Result<(), ContractError> {
    if token == staking_token {
        return Err(ContractError::RewardTokenIsStakingToken);
    }
    let mut pool = storage::get_pool(env, token).unwrap_or_default();
    if pool.registered {
        return Err(ContractError::RewardTokenAlreadyRegistered);
    }
    pool.registered = true;
    pool.epoch = checked(pool.epoch.checked_add(1))?;
    pool.epoch_start_acc = pool.acc_reward_per_share;
    pool.last_reward_balance = balance_of(env, token);
    storage::set_pool(env, token, &pool);

    let mut tokens = storage::reward_tokens(env);
    tokens.push_back(token.clone());
    storage::set_reward_tokens(env, &tokens);
    Ok(())
}

/// Deregister `token`. Its pool record stays behind.
pub fn remove_reward_token(env: &Env, token: &Address) -> Result<(), ContractError> {
    let mut pool = registered_pool(env, token).ok_or(ContractError::RewardTokenNotRegistered)?;
    pool.registered = false;
    storage::set_pool(env, token, &pool);

    let mut remaining = Vec::new(env);
    for t in storage::reward_tokens(env).iter() {
        if &t != token {
            remaining.push_back(t);
        }
    }
    storage::set_reward_tokens(env, &remaining);
    Ok(())
}

/// Whether `sweep` may move `token`. The staking token and every current or
/// former reward token are off limits.
pub fn is_sweepable(env: &Env, staking_token: &Address, token: &Address) -> bool {
    token != staking_token && storage::get_pool(env, token).is_none()
}
