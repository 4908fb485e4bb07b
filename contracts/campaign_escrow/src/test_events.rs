extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Events, Ledger},
    symbol_short, token, Address, Env, IntoVal, TryIntoVal,
};

use crate::events::{
    CampaignCreated, CampaignDiscarded, CampaignFulfilled, PlatformFeesUpdated,
    PublicCampaignCompleted,
};
use crate::{CampaignEscrow, CampaignEscrowClient};

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

#[test]
fn creation_publishes_created_event() {
    let (env, client, _owner) = setup(0);
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

    // The contract event is published last, after the escrow transfer.
    let (emitter, topics, data) = env.events().all().last().unwrap();
    assert_eq!(emitter, client.address);
    assert_eq!(
        topics,
        (symbol_short!("created"), id.clone()).into_val(&env)
    );
    let payload: CampaignCreated = data.try_into_val(&env).unwrap();
    assert_eq!(payload.id, id);
    assert_eq!(payload.creator, creator);
    assert_eq!(payload.amount, 1_000);
}

#[test]
fn fulfilment_publishes_fulfilled_event() {
    let (env, client, _owner) = setup(10_000);
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
    client.fulfil_targeted(&counterparty, &id);

    let (emitter, topics, data) = env.events().all().last().unwrap();
    assert_eq!(emitter, client.address);
    assert_eq!(
        topics,
        (symbol_short!("fulfilled"), id.clone()).into_val(&env)
    );
    let payload: CampaignFulfilled = data.try_into_val(&env).unwrap();
    assert_eq!(payload.id, id);
    assert_eq!(payload.fulfilled_by, counterparty);
}

#[test]
fn discard_publishes_discarded_event() {
    let (env, client, _owner) = setup(0);
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
    client.discard_targeted(&creator, &id);

    let (emitter, topics, data) = env.events().all().last().unwrap();
    assert_eq!(emitter, client.address);
    assert_eq!(
        topics,
        (symbol_short!("discarded"), id.clone()).into_val(&env)
    );
    let payload: CampaignDiscarded = data.try_into_val(&env).unwrap();
    assert_eq!(payload.discarded_by, creator);
}

#[test]
fn public_completion_publishes_pcomplete_event() {
    let (env, client, _owner) = setup(0);
    let (token, sac) = create_token(&env);
    let creator = Address::generate(&env);
    fund(&env, &token, &sac, &creator, &client.address, 500);

    let id = client.create_public(
        &creator,
        &500,
        &(env.ledger().timestamp() + DAY),
        &token.address,
    );
    client.complete_public(&creator, &id, &true);

    let (emitter, topics, data) = env.events().all().last().unwrap();
    assert_eq!(emitter, client.address);
    assert_eq!(
        topics,
        (symbol_short!("pcomplete"), id.clone()).into_val(&env)
    );
    let payload: PublicCampaignCompleted = data.try_into_val(&env).unwrap();
    assert_eq!(payload.id, id);
    assert_eq!(payload.completed_by, creator);
}

#[test]
fn fee_change_publishes_old_and_new_rate() {
    let (env, client, _owner) = setup(2_500);

    client.set_fee_basis_points(&5_000);

    let (emitter, topics, data) = env.events().all().last().unwrap();
    assert_eq!(emitter, client.address);
    assert_eq!(topics, (symbol_short!("fee_set"),).into_val(&env));
    let payload: PlatformFeesUpdated = data.try_into_val(&env).unwrap();
    assert_eq!(payload.old_fee, 2_500);
    assert_eq!(payload.new_fee, 5_000);
}
