extern crate std;

use common::admin_tiers::AdminTier;
use soroban_sdk::{
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

use crate::{ContractError, StakingConfig, StakingContract, StakingContractClient};

const UNIT: i128 = 10_000_000;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Flat ledger with no fee. Returns `(env, client, admin, staking_token, reward_token)`.
fn setup() -> (
    Env,
    StakingContractClient<'static>,
    Address,
    Address,
    Address,
) {
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

    let admin = Address::generate(&env);
    let config = StakingConfig::flat(Address::generate(&env), 0);
    client.initialize(&admin, &staking_token, &reward_token, &config);

    (env, client, admin, staking_token, reward_token)
}

fn new_token(env: &Env) -> Address {
    env.register_stellar_asset_contract_v2(Address::generate(env))
        .address()
}

fn mint(env: &Env, token: &Address, to: &Address, amount: i128) {
    StellarAssetClient::new(env, token).mint(to, &amount);
}

// ── Reward-token registry ────────────────────────────────────────────────────

#[test]
fn test_admin_adds_and_removes_reward_token() {
    let (env, client, admin, _, reward_token) = setup();
    let second = new_token(&env);

    client.add_reward_token(&admin, &second);
    assert!(client.is_reward_token(&second));
    assert_eq!(client.reward_tokens_length(), 2);
    assert_eq!(client.reward_token_at(&1), Some(second.clone()));

    client.remove_reward_token(&admin, &reward_token);
    assert!(!client.is_reward_token(&reward_token));
    assert_eq!(client.reward_tokens_length(), 1);
    assert_eq!(client.reward_token_at(&0), Some(second.clone()));
    assert_eq!(client.reward_token_at(&1), None);
    assert_eq!(client.get_reward_tokens().len(), 1);
}

#[test]
fn test_non_admin_cannot_add_reward_token() {
    let (env, client, _admin, _, _) = setup();
    let intruder = Address::generate(&env);
    let token = new_token(&env);

    let result = client.try_add_reward_token(&intruder, &token);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert!(!client.is_reward_token(&token));
}

#[test]
fn test_duplicate_reward_token_rejected() {
    let (_env, client, admin, _, reward_token) = setup();

    let result = client.try_add_reward_token(&admin, &reward_token);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::RewardTokenAlreadyRegistered),
        _ => unreachable!("Expected RewardTokenAlreadyRegistered error"),
    }
    assert_eq!(client.reward_tokens_length(), 1);
}

#[test]
fn test_staking_token_cannot_be_reward_token() {
    let (_env, client, admin, staking_token, _) = setup();

    let result = client.try_add_reward_token(&admin, &staking_token);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::RewardTokenIsStakingToken),
        _ => unreachable!("Expected RewardTokenIsStakingToken error"),
    }
}

#[test]
fn test_remove_unknown_token_rejected() {
    let (env, client, admin, _, _) = setup();

    let result = client.try_remove_reward_token(&admin, &new_token(&env));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::RewardTokenNotRegistered),
        _ => unreachable!("Expected RewardTokenNotRegistered error"),
    }
}

#[test]
fn test_existing_balance_is_not_distributed_on_add() {
    let (env, client, admin, staking_token, _) = setup();
    let alice = Address::generate(&env);
    mint(&env, &staking_token, &alice, 100 * UNIT);
    client.deposit(&alice, &(100 * UNIT));

    let second = new_token(&env);
    mint(&env, &second, &client.address, 9 * UNIT);
    client.add_reward_token(&admin, &second);
    assert_eq!(client.last_reward_balance(&second), 9 * UNIT);
    assert_eq!(client.pending_reward(&alice, &second), 0);

    mint(&env, &second, &client.address, 4 * UNIT);
    assert_eq!(client.pending_reward(&alice, &second), 4 * UNIT);
}

#[test]
fn test_removed_token_stops_paying_and_readd_starts_fresh() {
    let (env, client, admin, staking_token, _) = setup();
    let alice = Address::generate(&env);
    mint(&env, &staking_token, &alice, 200 * UNIT);
    client.deposit(&alice, &(100 * UNIT));

    let second = new_token(&env);
    client.add_reward_token(&admin, &second);
    mint(&env, &second, &client.address, 10 * UNIT);
    assert_eq!(client.pending_reward(&alice, &second), 10 * UNIT);

    client.remove_reward_token(&admin, &second);
    assert_eq!(client.pending_reward(&alice, &second), 0);

    // The position changes while the token is not tracked.
    client.deposit(&alice, &(100 * UNIT));
    assert_eq!(TokenClient::new(&env, &second).balance(&alice), 0);

    client.add_reward_token(&admin, &second);
    assert_eq!(client.pending_reward(&alice, &second), 0);

    mint(&env, &second, &client.address, 20 * UNIT);
    assert_eq!(client.pending_reward(&alice, &second), 20 * UNIT);

    let acc_before = client.acc_reward_per_share(&second);
    client.withdraw(&alice, &0);
    assert_eq!(TokenClient::new(&env, &second).balance(&alice), 20 * UNIT);
    assert!(client.acc_reward_per_share(&second) >= acc_before);
    assert_eq!(client.pending_reward(&alice, &second), 0);
}

// ── Sweep ────────────────────────────────────────────────────────────────────

#[test]
fn test_sweep_moves_stray_tokens() {
    let (env, client, admin, _, _) = setup();
    let stray = new_token(&env);
    let to = Address::generate(&env);
    mint(&env, &stray, &client.address, 42);

    assert_eq!(client.sweep(&admin, &stray, &to), 42);
    assert_eq!(TokenClient::new(&env, &stray).balance(&to), 42);
    assert_eq!(TokenClient::new(&env, &stray).balance(&client.address), 0);
}

#[test]
fn test_sweep_refuses_protected_tokens() {
    let (env, client, admin, staking_token, reward_token) = setup();
    let to = Address::generate(&env);

    for token in [staking_token, reward_token.clone()] {
        match client.try_sweep(&admin, &token, &to) {
            Err(Ok(e)) => assert_eq!(e, ContractError::TokenNotSweepable),
            _ => unreachable!("Expected TokenNotSweepable error"),
        }
    }

    // A former reward token stays protected.
    client.remove_reward_token(&admin, &reward_token);
    match client.try_sweep(&admin, &reward_token, &to) {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokenNotSweepable),
        _ => unreachable!("Expected TokenNotSweepable error"),
    }
}

#[test]
fn test_non_admin_cannot_sweep() {
    let (env, client, _admin, _, _) = setup();
    let intruder = Address::generate(&env);
    let stray = new_token(&env);

    match client.try_sweep(&intruder, &stray, &intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Fee administration ───────────────────────────────────────────────────────

#[test]
fn test_set_deposit_fee() {
    let (_env, client, admin, _, _) = setup();

    client.set_deposit_fee(&admin, &250);
    assert_eq!(client.deposit_fee_bps(), 250);

    match client.try_set_deposit_fee(&admin, &1_001) {
        Err(Ok(e)) => assert_eq!(e, ContractError::FeeTooHigh),
        _ => unreachable!("Expected FeeTooHigh error"),
    }
    assert_eq!(client.deposit_fee_bps(), 250);
}

#[test]
fn test_new_fee_collector_receives_fees() {
    let (env, client, admin, staking_token, reward_token) = setup();
    let collector = Address::generate(&env);
    client.set_fee_collector(&admin, &collector);
    client.set_deposit_fee(&admin, &1_000);
    assert_eq!(client.get_config().fee_collector, collector);

    let alice = Address::generate(&env);
    mint(&env, &staking_token, &alice, 50 * UNIT);
    client.deposit(&alice, &(50 * UNIT));

    assert_eq!(TokenClient::new(&env, &staking_token).balance(&collector), 5 * UNIT);
    assert_eq!(client.get_user_info(&alice, &reward_token).amount, 45 * UNIT);
}

// ── Admin tiers ──────────────────────────────────────────────────────────────

#[test]
fn test_admin_is_super_admin_after_init() {
    let (_env, client, admin, _, _) = setup();
    assert_eq!(client.get_admin_tier(&admin), Some(AdminTier::SuperAdmin));
}

#[test]
fn test_contract_admin_manages_registry() {
    let (env, client, admin, _, _) = setup();
    let contract_admin = Address::generate(&env);
    let token = new_token(&env);

    client.promote_admin(&admin, &contract_admin, &AdminTier::ContractAdmin);
    client.add_reward_token(&contract_admin, &token);
    assert!(client.is_reward_token(&token));
}

#[test]
fn test_operator_admin_pauses_but_cannot_manage_registry() {
    let (env, client, admin, _, _) = setup();
    let operator = Address::generate(&env);
    client.promote_admin(&admin, &operator, &AdminTier::OperatorAdmin);

    client.pause(&operator);
    assert!(client.is_paused());
    client.unpause(&operator);
    assert!(!client.is_paused());

    match client.try_add_reward_token(&operator, &new_token(&env)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_set_deposit_fee(&operator, &10) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_non_admin_cannot_pause() {
    let (env, client, _admin, _, _) = setup();
    let intruder = Address::generate(&env);

    match client.try_pause(&intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_contract_admin_cannot_promote() {
    let (env, client, admin, _, _) = setup();
    let contract_admin = Address::generate(&env);
    let target = Address::generate(&env);

    client.promote_admin(&admin, &contract_admin, &AdminTier::ContractAdmin);

    let result = client.try_promote_admin(&contract_admin, &target, &AdminTier::OperatorAdmin);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_super_admin_demotes_admin() {
    let (env, client, admin, _, _) = setup();
    let target = Address::generate(&env);

    client.promote_admin(&admin, &target, &AdminTier::ContractAdmin);
    client.demote_admin(&admin, &target);
    assert_eq!(client.get_admin_tier(&target), None);

    match client.try_add_reward_token(&target, &new_token(&env)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_primary_admin_cannot_be_demoted() {
    let (env, client, admin, _, _) = setup();
    let other = Address::generate(&env);
    client.promote_admin(&admin, &other, &AdminTier::SuperAdmin);

    match client.try_demote_admin(&other, &admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_admin_tier(&admin), Some(AdminTier::SuperAdmin));
}

// ── Admin transfer (two-step) ────────────────────────────────────────────────

#[test]
fn test_admin_transfer_flow() {
    let (env, client, admin, _, _) = setup();
    let successor = Address::generate(&env);

    client.propose_admin(&admin, &successor);
    assert_eq!(client.get_pending_admin(), Some(successor.clone()));
    assert_eq!(client.get_admin(), admin);

    client.accept_admin(&successor);
    assert_eq!(client.get_admin(), successor);
    assert_eq!(client.get_pending_admin(), None);
    assert_eq!(client.get_admin_tier(&successor), Some(AdminTier::SuperAdmin));
    assert_eq!(client.get_admin_tier(&admin), None);
}

#[test]
fn test_only_proposed_admin_can_accept() {
    let (env, client, admin, _, _) = setup();
    let successor = Address::generate(&env);
    let intruder = Address::generate(&env);

    match client.try_accept_admin(&successor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAdmin),
        _ => unreachable!("Expected NoPendingAdmin error"),
    }

    client.propose_admin(&admin, &successor);
    match client.try_accept_admin(&intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_cancel_admin_transfer() {
    let (env, client, admin, _, _) = setup();
    let successor = Address::generate(&env);

    match client.try_cancel_admin_transfer(&admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAdmin),
        _ => unreachable!("Expected NoPendingAdmin error"),
    }

    client.propose_admin(&admin, &successor);
    client.cancel_admin_transfer(&admin);
    assert_eq!(client.get_pending_admin(), None);

    match client.try_accept_admin(&successor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAdmin),
        _ => unreachable!("Expected NoPendingAdmin error"),
    }
}

#[test]
fn test_only_primary_admin_can_propose() {
    let (env, client, admin, _, _) = setup();
    let other_super = Address::generate(&env);
    client.promote_admin(&admin, &other_super, &AdminTier::SuperAdmin);

    match client.try_propose_admin(&other_super, &other_super) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}
