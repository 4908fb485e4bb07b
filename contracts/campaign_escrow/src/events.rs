//! Contract event payloads and publication helpers.
//!
//! Every successful state transition publishes exactly one event, after the
//! transition is durably recorded. Topics follow the `(symbol, campaign_id)`
//! shape so off-chain indexers can filter by campaign without decoding the
//! payload; payloads are typed structs so they decode losslessly.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub id: BytesN<32>,
    pub creator: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignUpdated {
    pub id: BytesN<32>,
    pub updated_by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignFulfilled {
    pub id: BytesN<32>,
    pub fulfilled_by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignDiscarded {
    pub id: BytesN<32>,
    pub discarded_by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicCampaignCreated {
    pub id: BytesN<32>,
    pub creator: Address,
    pub pool_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicCampaignCompleted {
    pub id: BytesN<32>,
    pub completed_by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicCampaignDiscarded {
    pub id: BytesN<32>,
    pub discarded_by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlatformFeesUpdated {
    pub old_fee: u32,
    pub new_fee: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinimumOfferingUpdated {
    pub old_minimum: i128,
    pub new_minimum: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensSwept {
    pub token: Address,
    pub amount: i128,
}

pub fn campaign_created(env: &Env, id: &BytesN<32>, creator: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("created"), id.clone()),
        CampaignCreated {
            id: id.clone(),
            creator: creator.clone(),
            amount,
        },
    );
}

pub fn campaign_updated(env: &Env, id: &BytesN<32>, updated_by: &Address) {
    env.events().publish(
        (symbol_short!("updated"), id.clone()),
        CampaignUpdated {
            id: id.clone(),
            updated_by: updated_by.clone(),
        },
    );
}

pub fn campaign_fulfilled(env: &Env, id: &BytesN<32>, fulfilled_by: &Address) {
    env.events().publish(
        (symbol_short!("fulfilled"), id.clone()),
        CampaignFulfilled {
            id: id.clone(),
            fulfilled_by: fulfilled_by.clone(),
        },
    );
}

pub fn campaign_discarded(env: &Env, id: &BytesN<32>, discarded_by: &Address) {
    env.events().publish(
        (symbol_short!("discarded"), id.clone()),
        CampaignDiscarded {
            id: id.clone(),
            discarded_by: discarded_by.clone(),
        },
    );
}

pub fn public_created(env: &Env, id: &BytesN<32>, creator: &Address, pool_amount: i128) {
    env.events().publish(
        (symbol_short!("pcreated"), id.clone()),
        PublicCampaignCreated {
            id: id.clone(),
            creator: creator.clone(),
            pool_amount,
        },
    );
}

pub fn public_completed(env: &Env, id: &BytesN<32>, completed_by: &Address) {
    env.events().publish(
        (symbol_short!("pcomplete"), id.clone()),
        PublicCampaignCompleted {
            id: id.clone(),
            completed_by: completed_by.clone(),
        },
    );
}

pub fn public_discarded(env: &Env, id: &BytesN<32>, discarded_by: &Address) {
    env.events().publish(
        (symbol_short!("pdiscard"), id.clone()),
        PublicCampaignDiscarded {
            id: id.clone(),
            discarded_by: discarded_by.clone(),
        },
    );
}

pub fn fees_updated(env: &Env, old_fee: u32, new_fee: u32) {
    env.events().publish(
        (symbol_short!("fee_set"),),
        PlatformFeesUpdated { old_fee, new_fee },
    );
}

pub fn minimum_updated(env: &Env, old_minimum: i128, new_minimum: i128) {
    env.events().publish(
        (symbol_short!("min_set"),),
        MinimumOfferingUpdated {
            old_minimum,
            new_minimum,
        },
    );
}

pub fn paused(env: &Env, owner: &Address) {
    env.events()
        .publish((symbol_short!("paused"),), owner.clone());
}

pub fn resumed(env: &Env, owner: &Address) {
    env.events()
        .publish((symbol_short!("unpaused"),), owner.clone());
}

pub fn tokens_swept(env: &Env, token: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("swept"),),
        TokensSwept {
            token: token.clone(),
            amount,
        },
    );
}
