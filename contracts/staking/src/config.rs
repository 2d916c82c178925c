use soroban_sdk::{contracttype, Address, Env};

use crate::errors::ContractError;
use crate::multiplier::{MultiplierCurve, RewardMode};

/// Highest deposit fee the admin may configure: 10%.
pub const MAX_DEPOSIT_FEE_BPS: u32 = 1_000;

/// When the multiplier clock of a position starts over.
///
/// A restart also closes the position's reward epoch: whatever the current
/// multiplier does not release is moved to the forgone pool.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClockResetPolicy {
    /// Every deposit and every partial withdrawal restarts the clock.
    OnEveryChange,
    /// Only a deposit into an empty position restarts the clock.
    OnFreshEntry,
}

/// Ledger policy supplied at `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// Receives the deposit fee.
    pub fee_collector: Address,
    /// Share of each deposit routed to `fee_collector`, in basis points.
    pub deposit_fee_bps: u32,
    pub reward_mode: RewardMode,
    pub clock_reset: ClockResetPolicy,
    /// Smallest position allowed to claim extra rewards.
    pub extra_rewards_min_stake: i128,
}

impl StakingConfig {
    /// Plain proportional staking with an optional deposit fee.
    pub fn flat(fee_collector: Address, deposit_fee_bps: u32) -> Self {
        StakingConfig {
            fee_collector,
            deposit_fee_bps,
            reward_mode: RewardMode::Flat,
            clock_reset: ClockResetPolicy::OnEveryChange,
            extra_rewards_min_stake: 0,
        }
    }

    /// Time-weighted staking on the default curve, no fee.
    pub fn default_time_weighted(env: &Env, fee_collector: Address) -> Self {
        StakingConfig {
            fee_collector,
            deposit_fee_bps: 0,
            reward_mode: RewardMode::TimeWeighted(MultiplierCurve::default_curve(env)),
            clock_reset: ClockResetPolicy::OnEveryChange,
            extra_rewards_min_stake: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        if self.deposit_fee_bps > MAX_DEPOSIT_FEE_BPS {
            return Err(ContractError::FeeTooHigh);
        }
        if self.extra_rewards_min_stake < 0 {
            return Err(ContractError::InvalidConfig);
        }
        self.reward_mode.validate()
    }

    /// Whether a deposit of `staked` into a position currently holding
    /// `current` restarts the clock.
    pub fn deposit_restarts_clock(&self, current: i128, staked: i128) -> bool {
        if staked <= 0 {
            return false;
        }
        current == 0 || self.clock_reset == ClockResetPolicy::OnEveryChange
    }

    /// Whether withdrawing `amount` out of `current` closes the reward epoch.
    /// Emptying a position always does; a partial withdrawal only under
    /// `OnEveryChange`.
    pub fn withdraw_closes_epoch(&self, current: i128, amount: i128) -> bool {
        if amount <= 0 {
            return false;
        }
        amount == current || self.clock_reset == ClockResetPolicy::OnEveryChange
    }
}
