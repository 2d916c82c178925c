#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

/// Fired once when the schedule is created.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleCreatedEvent {
    pub admin: Address,
    pub token: Address,
    pub start: u64,
    pub duration: u64,
}

/// Fired per beneficiary allocation.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestedEvent {
    pub beneficiary: Address,
    pub amount: i128,
    pub new_total: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingClaimedEvent {
    pub beneficiary: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, token: Address, start: u64, duration: u64) {
    env.events().publish(
        (symbol_short!("INIT"),),
        ScheduleCreatedEvent {
            admin,
            token,
            start,
            duration,
        },
    );
}

pub fn publish_vested(env: &Env, beneficiary: Address, amount: i128, new_total: i128) {
    env.events().publish(
        (symbol_short!("VESTED"), beneficiary.clone()),
        VestedEvent {
            beneficiary,
            amount,
            new_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claimed(env: &Env, beneficiary: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("VST_CLM"), beneficiary.clone()),
        VestingClaimedEvent {
            beneficiary,
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
