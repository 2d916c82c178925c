#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use multi_reward_staking::{StakingConfig, StakingContract, StakingContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

const USERS: usize = 4;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { user: u8, amount: u32 },
    Withdraw { user: u8, amount: u32 },
    ClaimExtra { user: u8, amount: u32 },
    Emergency { user: u8 },
    Fund { amount: u32 },
    Advance { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let staking_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let config = StakingConfig::default_time_weighted(&env, Address::generate(&env));
    client.initialize(
        &Address::generate(&env),
        &staking_token,
        &reward_token,
        &config,
    );

    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    for user in users.iter() {
        StellarAssetClient::new(&env, &staking_token).mint(user, &(u32::MAX as i128 * 64));
    }
    let rewards = TokenClient::new(&env, &reward_token);

    for action in actions.into_iter().take(64) {
        match action {
            FuzzAction::Deposit { user, amount } => {
                let _ = client.try_deposit(&users[user as usize % USERS], &(amount as i128));
            }
            FuzzAction::Withdraw { user, amount } => {
                let _ = client.try_withdraw(&users[user as usize % USERS], &(amount as i128));
            }
            FuzzAction::ClaimExtra { user, amount } => {
                let _ = client
                    .try_withdraw_and_claim_extra(&users[user as usize % USERS], &(amount as i128));
            }
            FuzzAction::Emergency { user } => {
                let _ = client.try_emergency_withdraw(&users[user as usize % USERS]);
            }
            FuzzAction::Fund { amount } => {
                if amount > 0 {
                    StellarAssetClient::new(&env, &reward_token)
                        .mint(&contract_id, &(amount as i128));
                }
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + seconds as u64);
            }
        }

        // Claims on the reward token stay covered by what the ledger holds.
        let pending: i128 = users
            .iter()
            .map(|u| client.pending_reward(u, &reward_token))
            .sum();
        let held = rewards.balance(&contract_id);
        assert!(pending <= held, "pending {pending} > held {held}");
        assert!(client.forgone_rewards_pool(&reward_token) >= 0);
    }
});
