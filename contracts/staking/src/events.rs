#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    pub deposit_fee_bps: u32,
    pub timestamp: u64,
}

/// Fired on every deposit, including zero-amount claims.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub user: Address,
    pub amount: i128,
    pub fee: i128,
    pub new_position: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired on every withdrawal, including zero-amount claims.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub user: Address,
    pub amount: i128,
    pub new_position: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub user: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired per reward token actually paid.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub user: Address,
    pub token: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtraRewardClaimedEvent {
    pub user: Address,
    pub token: Address,
    pub amount: i128,
    pub remaining_pool: i128,
    pub timestamp: u64,
}

/// Fired whenever a settlement moves rewards into a forgone pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardForgoneEvent {
    pub user: Address,
    pub token: Address,
    pub amount: i128,
    pub new_pool: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardTokenEvent {
    pub token: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositFeeSetEvent {
    pub old_bps: u32,
    pub new_bps: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeCollectorSetEvent {
    pub old_collector: Address,
    pub new_collector: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SweepEvent {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseEvent {
    pub caller: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    staking_token: Address,
    reward_token: Address,
    deposit_fee_bps: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            staking_token,
            reward_token,
            deposit_fee_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit(
    env: &Env,
    user: Address,
    amount: i128,
    fee: i128,
    new_position: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone()),
        DepositEvent {
            user,
            amount,
            fee,
            new_position,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw(
    env: &Env,
    user: Address,
    amount: i128,
    new_position: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone()),
        WithdrawEvent {
            user,
            amount,
            new_position,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdraw(env: &Env, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMRG_WDR"), user.clone()),
        EmergencyWithdrawEvent {
            user,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, user: Address, token: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLAIM"), user.clone()),
        RewardClaimedEvent {
            user,
            token,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_extra_claimed(
    env: &Env,
    user: Address,
    token: Address,
    amount: i128,
    remaining_pool: i128,
) {
    env.events().publish(
        (symbol_short!("EXTRA"), user.clone()),
        ExtraRewardClaimedEvent {
            user,
            token,
            amount,
            remaining_pool,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_forgone(env: &Env, user: Address, token: Address, amount: i128, new_pool: i128) {
    env.events().publish(
        (symbol_short!("FORGONE"), token.clone()),
        RewardForgoneEvent {
            user,
            token,
            amount,
            new_pool,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_token_added(env: &Env, token: Address) {
    env.events().publish(
        (symbol_short!("RWD_ADD"), token.clone()),
        RewardTokenEvent {
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_token_removed(env: &Env, token: Address) {
    env.events().publish(
        (symbol_short!("RWD_REM"), token.clone()),
        RewardTokenEvent {
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit_fee_set(env: &Env, old_bps: u32, new_bps: u32) {
    env.events().publish(
        (symbol_short!("FEE_SET"),),
        DepositFeeSetEvent {
            old_bps,
            new_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fee_collector_set(env: &Env, old_collector: Address, new_collector: Address) {
    env.events().publish(
        (symbol_short!("FEE_COLL"),),
        FeeCollectorSetEvent {
            old_collector,
            new_collector,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_sweep(env: &Env, token: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("SWEEP"), token.clone()),
        SweepEvent {
            token,
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        PauseEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unpaused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("UNPAUSED"),),
        PauseEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
