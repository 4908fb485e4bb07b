//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the escrow:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type             | Description                        |
//! |-----------------|------------------|------------------------------------|
//! | `Config`        | `PlatformConfig` | Owner, fee, minimum, pause flag    |
//! | `CampaignCount` | `u64`            | Monotonic creation counter         |
//! | `Guard`         | `bool`           | Call-scoped reentrancy flag        |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                    | Type               | Description                     |
//! |------------------------|--------------------|---------------------------------|
//! | `Targeted(id)`         | `TargetedCampaign` | Targeted campaign record        |
//! | `Public(id)`           | `PublicCampaign`   | Public campaign record          |
//! | `CampaignIndex`        | `Vec<BytesN<32>>`  | All ids, insertion order        |
//! | `CreatorIndex(addr)`   | `Vec<BytesN<32>>`  | Per-creator ids, insertion order|
//! | `Obligations(token)`   | `i128`             | Total escrowed per token        |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining. Campaign records are never deleted; terminal campaigns remain
//! enumerable for audit.
//!
//! ## Why an explicit obligations ledger?
//!
//! The contract's raw token balance conflates "funds available" with "funds
//! already earmarked for another campaign". `Obligations(token)` tracks the
//! sum the contract still owes per token, so custody checks can distinguish
//! the two and one campaign's payout can never be starved by another's.

use soroban_sdk::{contracttype, xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

use crate::types::{PlatformConfig, PublicCampaign, TargetedCampaign};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Platform configuration (Instance).
    Config,
    /// Monotonic campaign creation counter (Instance).
    CampaignCount,
    /// Reentrancy guard flag (Instance).
    Guard,
    /// Targeted campaign record keyed by id (Persistent).
    Targeted(BytesN<32>),
    /// Public campaign record keyed by id (Persistent).
    Public(BytesN<32>),
    /// Insertion-ordered list of every campaign id (Persistent).
    CampaignIndex,
    /// Insertion-ordered list of a creator's campaign ids (Persistent).
    CreatorIndex(Address),
    /// Total amount still escrowed for a token (Persistent).
    Obligations(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Read the platform configuration, or `None` before `initialize`.
pub fn load_config(env: &Env) -> Option<PlatformConfig> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Config)
}

pub fn save_config(env: &Env, config: &PlatformConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

/// Atomically reads, increments, and stores the creation counter.
/// Returns the pre-increment value for the *current* campaign.
fn get_and_increment_campaign_count(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::CampaignCount, &(current + 1));
    current
}

/// Derive a fresh campaign identifier.
///
/// SHA-256 over the XDR encoding of the creator, a caller-supplied salt
/// (counterparty address or pool parameters), the current ledger sequence
/// and timestamp, and the monotonic creation counter. The counter term is
/// what makes ids collision-resistant: two creations in the same ledger with
/// identical parameters still hash differently.
pub fn next_campaign_id(env: &Env, creator: &Address, salt: &Bytes) -> BytesN<32> {
    let count = get_and_increment_campaign_count(env);

    let mut preimage = Bytes::new(env);
    preimage.append(&creator.clone().to_xdr(env));
    preimage.append(salt);
    preimage.append(&env.ledger().sequence().to_xdr(env));
    preimage.append(&env.ledger().timestamp().to_xdr(env));
    preimage.append(&count.to_xdr(env));

    env.crypto().sha256(&preimage).to_bytes()
}

// ── Reentrancy Guard ─────────────────────────────────────────────────

/// Returns `true` if a guarded call is already executing on this instance.
pub fn guard_held(env: &Env) -> bool {
    env.storage().instance().get(&DataKey::Guard).unwrap_or(false)
}

pub fn set_guard(env: &Env, held: bool) {
    env.storage().instance().set(&DataKey::Guard, &held);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn save_targeted(env: &Env, campaign: &TargetedCampaign) {
    let key = DataKey::Targeted(campaign.id.clone());
    env.storage().persistent().set(&key, campaign);
    bump_persistent(env, &key);
}

pub fn load_targeted(env: &Env, id: &BytesN<32>) -> Option<TargetedCampaign> {
    let key = DataKey::Targeted(id.clone());
    let campaign: Option<TargetedCampaign> = env.storage().persistent().get(&key);
    if campaign.is_some() {
        bump_persistent(env, &key);
    }
    campaign
}

pub fn save_public(env: &Env, campaign: &PublicCampaign) {
    let key = DataKey::Public(campaign.id.clone());
    env.storage().persistent().set(&key, campaign);
    bump_persistent(env, &key);
}

pub fn load_public(env: &Env, id: &BytesN<32>) -> Option<PublicCampaign> {
    let key = DataKey::Public(id.clone());
    let campaign: Option<PublicCampaign> = env.storage().persistent().get(&key);
    if campaign.is_some() {
        bump_persistent(env, &key);
    }
    campaign
}

/// `true` if `id` names a campaign of either kind.
pub fn has_campaign(env: &Env, id: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Targeted(id.clone()))
        || env.storage().persistent().has(&DataKey::Public(id.clone()))
}

// ── Enumeration Indices ──────────────────────────────────────────────

/// Append a freshly created campaign to the global and per-creator indices.
/// Called exactly once per campaign, at creation.
pub fn index_campaign(env: &Env, id: &BytesN<32>, creator: &Address) {
    let all_key = DataKey::CampaignIndex;
    let mut all: Vec<BytesN<32>> = env
        .storage()
        .persistent()
        .get(&all_key)
        .unwrap_or_else(|| Vec::new(env));
    all.push_back(id.clone());
    env.storage().persistent().set(&all_key, &all);
    bump_persistent(env, &all_key);

    let creator_key = DataKey::CreatorIndex(creator.clone());
    let mut mine: Vec<BytesN<32>> = env
        .storage()
        .persistent()
        .get(&creator_key)
        .unwrap_or_else(|| Vec::new(env));
    mine.push_back(id.clone());
    env.storage().persistent().set(&creator_key, &mine);
    bump_persistent(env, &creator_key);
}

/// Return the window `[offset, min(offset + limit, total))` of the global
/// index plus the unclamped total, so callers can always repage.
pub fn campaign_page(env: &Env, offset: u32, limit: u32) -> (Vec<BytesN<32>>, u32) {
    let all: Vec<BytesN<32>> = env
        .storage()
        .persistent()
        .get(&DataKey::CampaignIndex)
        .unwrap_or_else(|| Vec::new(env));
    let total = all.len();

    let mut page = Vec::new(env);
    if offset >= total {
        return (page, total);
    }
    let end = offset.saturating_add(limit).min(total);
    for i in offset..end {
        page.push_back(all.get_unchecked(i));
    }
    (page, total)
}

/// All campaign ids ever created by `creator`, in insertion order.
pub fn creator_campaigns(env: &Env, creator: &Address) -> Vec<BytesN<32>> {
    env.storage()
        .persistent()
        .get(&DataKey::CreatorIndex(creator.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

// ── Obligations Ledger ───────────────────────────────────────────────

/// Total amount the contract still owes across all `Published` campaigns
/// denominated in `token`.
pub fn obligations(env: &Env, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Obligations(token.clone()))
        .unwrap_or(0)
}

/// Apply a signed delta to the obligations ledger for `token`.
/// Creation and amount increases pass positive deltas; fulfilments,
/// discards, and amount decreases pass negative ones.
pub fn adjust_obligations(env: &Env, token: &Address, delta: i128) {
    let key = DataKey::Obligations(token.clone());
    let current: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    env.storage().persistent().set(&key, &(current + delta));
    bump_persistent(env, &key);
}
