#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Shared ledger fixture and the operation model driven by the property
//! tests.

use multi_reward_staking::{
    ClockResetPolicy, StakingConfig, StakingContract, StakingContractClient,
};
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};

pub const UNIT: i128 = 10_000_000;
pub const USERS: usize = 3;
const DAY: u64 = 86_400;
const START: u64 = 1_700_000_000;

// ── Operations ────────────────────────────────────────────────────────────────

/// One step of a random session against the ledger.
#[derive(Clone, Debug, Arbitrary)]
pub enum Op {
    Deposit {
        #[proptest(strategy = "0..USERS")]
        user: usize,
        #[proptest(strategy = "0i128..=500 * UNIT")]
        amount: i128,
    },
    /// Withdraw `bps / 10_000` of the current position.
    Withdraw {
        #[proptest(strategy = "0..USERS")]
        user: usize,
        #[proptest(strategy = "0i128..=10_000")]
        bps: i128,
    },
    /// Withdraw `bps / 10_000` of the position and claim extras.
    ClaimExtra {
        #[proptest(strategy = "0..USERS")]
        user: usize,
        #[proptest(strategy = "0i128..=10_000")]
        bps: i128,
    },
    Emergency {
        #[proptest(strategy = "0..USERS")]
        user: usize,
    },
    Fund {
        #[proptest(strategy = "1i128..=200 * UNIT")]
        amount: i128,
    },
    Advance {
        #[proptest(strategy = "0u64..=120")]
        days: u64,
        #[proptest(strategy = "0u64..86_400")]
        seconds: u64,
    },
}

impl Op {
    /// The user whose position the operation settles, if any.
    pub fn settled_user(&self) -> Option<usize> {
        match self {
            Op::Deposit { user, .. } | Op::Withdraw { user, .. } | Op::ClaimExtra { user, .. } => {
                Some(*user)
            }
            _ => None,
        }
    }
}

// ── Fixture ───────────────────────────────────────────────────────────────────

pub struct Ledger {
    pub env: Env,
    pub client: StakingContractClient<'static>,
    pub staking_token: Address,
    pub reward_token: Address,
    pub users: [Address; USERS],
}

impl Ledger {
    pub fn new(policy: ClockResetPolicy) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(START);

        let staking_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let reward_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();

        let contract_id = env.register(StakingContract, ());
        let client = StakingContractClient::new(&env, &contract_id);

        let mut config = StakingConfig::default_time_weighted(&env, Address::generate(&env));
        config.clock_reset = policy;
        client.initialize(
            &Address::generate(&env),
            &staking_token,
            &reward_token,
            &config,
        );

        let users = [
            Address::generate(&env),
            Address::generate(&env),
            Address::generate(&env),
        ];
        let minter = StellarAssetClient::new(&env, &staking_token);
        for user in users.iter() {
            minter.mint(user, &(1_000_000 * UNIT));
        }

        Ledger {
            env,
            client,
            staking_token,
            reward_token,
            users,
        }
    }

    pub fn position(&self, user: usize) -> i128 {
        self.client
            .get_user_info(&self.users[user], &self.reward_token)
            .amount
    }

    pub fn reward_balance(&self) -> i128 {
        TokenClient::new(&self.env, &self.reward_token).balance(&self.client.address)
    }

    pub fn total_pending(&self) -> i128 {
        self.users
            .iter()
            .map(|u| self.client.pending_reward(u, &self.reward_token))
            .sum()
    }

    pub fn sum_of_positions(&self) -> i128 {
        (0..USERS).map(|u| self.position(u)).sum()
    }

    /// Apply `op`. Returns whether the ledger accepted it; rejected
    /// operations must leave no trace.
    pub fn apply(&self, op: &Op) -> bool {
        match *op {
            Op::Deposit { user, amount } => self
                .client
                .try_deposit(&self.users[user], &amount)
                .is_ok(),
            Op::Withdraw { user, bps } => {
                let amount = self.position(user) * bps / 10_000;
                self.client
                    .try_withdraw(&self.users[user], &amount)
                    .is_ok()
            }
            Op::ClaimExtra { user, bps } => {
                let amount = self.position(user) * bps / 10_000;
                self.client
                    .try_withdraw_and_claim_extra(&self.users[user], &amount)
                    .is_ok()
            }
            Op::Emergency { user } => self
                .client
                .try_emergency_withdraw(&self.users[user])
                .is_ok(),
            Op::Fund { amount } => {
                StellarAssetClient::new(&self.env, &self.reward_token)
                    .mint(&self.client.address, &amount);
                true
            }
            Op::Advance { days, seconds } => {
                let now = self.env.ledger().timestamp();
                self.env.ledger().set_timestamp(now + days * DAY + seconds);
                true
            }
        }
    }
}
