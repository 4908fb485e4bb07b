extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::{CampaignEscrow, CampaignEscrowClient, CampaignStatus, Error};

const DAY: u64 = 86_400;

fn setup<'a>(fee_basis_points: u32) -> (Env, CampaignEscrowClient<'a>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CampaignEscrow, ());
    let client = CampaignEscrowClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.initialize(&owner, &fee_basis_points, &0);
    (env, client, owner)
}

fn create_token<'a>(env: &Env) -> (token::Client<'a>, token::StellarAssetClient<'a>) {
    let admin = Address::generate(env);
    let sac = env.register_stellar_asset_contract_v2(admin);
    (
        token::Client::new(env, &sac.address()),
        token::StellarAssetClient::new(env, &sac.address()),
    )
}

fn fund(
    env: &Env,
    token: &token::Client,
    sac: &token::StellarAssetClient,
    who: &Address,
    spender: &Address,
    amount: i128,
) {
    sac.mint(who, &amount);
    token.approve(who, spender, &amount, &(env.ledger().sequence() + 100));
}

// ─────────────────────────────────────────────────────────────
// Pause / resume
// ─────────────────────────────────────────────────────────────

#[test]
fn pause_blocks_all_mutations_but_not_reads() {
    let (env, client, _owner) = setup(0);
    let (token, sac) = create_token(&env);
    let creator = Address::generate(&env);
    let counterparty = Address::generate(&env);
    fund(&env, &token, &sac, &creator, &client.address, 2_000);

    let deadline = env.ledger().timestamp() + DAY;
    let id = client.create_targeted(&creator, &counterparty, &1_000, &deadline, &token.address);

    client.pause();
    assert!(client.get_config().paused);

    // Every mutating entry point fails immediately, however valid the input.
    assert_eq!(
        client.try_create_targeted(&creator, &counterparty, &1_000, &deadline, &token.address),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        client.try_update_targeted(&creator, &id, &counterparty, &deadline, &500),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        client.try_fulfil_targeted(&counterparty, &id),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        client.try_discard_targeted(&creator, &id),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        client.try_create_public(&creator, &500, &deadline, &token.address),
        Err(Ok(Error::ContractPaused))
    );

    // Read-only surface stays up.
    assert_eq!(client.get_targeted(&id).status, CampaignStatus::Published);
    assert!(client.campaign_exists(&id));
    let (_, total) = client.list_campaigns(&0, &10);
    assert_eq!(total, 1);
    assert_eq!(client.campaigns_for_creator(&creator).len(), 1);
    assert_eq!(client.total_obligations(&token.address), 1_000);

    client.resume();
    client.fulfil_targeted(&counterparty, &id);
    assert_eq!(token.balance(&counterparty), 1_000);
}

// ─────────────────────────────────────────────────────────────
// Fee administration
// ─────────────────────────────────────────────────────────────

#[test]
fn fee_above_divider_rejected() {
    let (_env, client, _owner) = setup(0);
    assert_eq!(
        client.try_set_fee_basis_points(&100_001),
        Err(Ok(Error::InvalidAmount))
    );
    // The divider itself (100%) is the inclusive bound.
    client.set_fee_basis_points(&100_000);
    assert_eq!(client.get_config().fee_basis_points, 100_000);
}

#[test]
fn fee_applies_at_fulfilment_not_creation() {
    let (env, client, owner) = setup(0);
    let (token, sac) = create_token(&env);
    let creator = Address::generate(&env);
    let counterparty = Address::generate(&env);
    fund(&env, &token, &sac, &creator, &client.address, 1_000);

    // Created under a 0% fee...
    let id = client.create_targeted(
        &creator,
        &counterparty,
        &1_000,
        &(env.ledger().timestamp() + DAY),
        &token.address,
    );

    // ...but fulfilled under 10%: the rate at fulfilment wins.
    client.set_fee_basis_points(&10_000);
    client.fulfil_targeted(&counterparty, &id);

    assert_eq!(token.balance(&counterparty), 900);
    assert_eq!(token.balance(&owner), 100);
}

// ─────────────────────────────────────────────────────────────
// Minimum offering
// ─────────────────────────────────────────────────────────────

#[test]
fn minimum_offering_applies_to_new_campaigns_only() {
    let (env, client, _owner) = setup(0);
    let (token, sac) = create_token(&env);
    let creator = Address::generate(&env);
    let counterparty = Address::generate(&env);
    fund(&env, &token, &sac, &creator, &client.address, 1_000);

    let deadline = env.ledger().timestamp() + DAY;
    let id = client.create_targeted(&creator, &counterparty, &100, &deadline, &token.address);

    client.set_minimum_offering(&200);
    assert_eq!(client.get_config().minimum_offering, 200);

    // New creations below the floor are rejected.
    assert_eq!(
        client.try_create_targeted(&creator, &counterparty, &100, &deadline, &token.address),
        Err(Ok(Error::InvalidAmount))
    );

    // The existing smaller campaign is untouched and still resolvable.
    client.discard_targeted(&creator, &id);
    assert_eq!(token.balance(&creator), 1_000);
}

#[test]
fn minimum_offering_rejects_negative_value() {
    let (_env, client, _owner) = setup(0);
    assert_eq!(
        client.try_set_minimum_offering(&-1),
        Err(Ok(Error::InvalidAmount))
    );
}

// ─────────────────────────────────────────────────────────────
// Emergency withdrawal
// ─────────────────────────────────────────────────────────────

#[test]
fn withdraw_token_sweeps_entire_balance() {
    let (env, client, owner) = setup(0);
    let (token, sac) = create_token(&env);
    let creator = Address::generate(&env);
    let counterparty = Address::generate(&env);
    fund(&env, &token, &sac, &creator, &client.address, 1_000);

    let id = client.create_targeted(
        &creator,
        &counterparty,
        &1_000,
        &(env.ledger().timestamp() + DAY),
        &token.address,
    );

    // The sweep is not scoped to excess: it drains escrowed funds too.
    client.withdraw_token(&token.address);
    assert_eq!(token.balance(&owner), 1_000);
    assert_eq!(token.balance(&client.address), 0);

    // The record still claims its obligation, so settlement now fails the
    // custody check instead of silently shorting someone.
    assert_eq!(client.total_obligations(&token.address), 1_000);
    assert_eq!(
        client.try_fulfil_targeted(&counterparty, &id),
        Err(Ok(Error::InsufficientCustody))
    );
}

#[test]
fn withdraw_token_with_empty_balance_is_a_noop() {
    let (env, client, owner) = setup(0);
    let (token, _) = create_token(&env);
    client.withdraw_token(&token.address);
    assert_eq!(token.balance(&owner), 0);
}
