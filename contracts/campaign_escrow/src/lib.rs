//! # Campaign Escrow Contract
//!
//! This is the root crate of the campaign escrow and settlement engine for
//! influencer-marketing campaigns. It exposes the single Soroban contract
//! `CampaignEscrow` whose entry points cover the full campaign lifecycle:
//!
//! | Phase      | Entry Point(s)                                               |
//! |------------|--------------------------------------------------------------|
//! | Bootstrap  | [`CampaignEscrow::initialize`]                               |
//! | Targeted   | `create_targeted`, `update_targeted`, `fulfil_targeted`, `discard_targeted` |
//! | Public     | `create_public`, `complete_public`, `discard_public`         |
//! | Admin      | `set_fee_basis_points`, `set_minimum_offering`, `pause`, `resume`, `withdraw_token` |
//! | Queries    | `get_targeted`, `get_public`, `campaign_exists`, `is_expired`, `list_campaigns`, `campaigns_for_creator`, `get_config`, `total_obligations` |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`storage`], token compliance probing
//! to [`validation`], and event publication to [`events`]. This file contains
//! only the entry points and the transition rules themselves.
//!
//! Every mutating entry point runs the same gauntlet, in order: pause guard,
//! reentrancy guard, caller authorization, input validation, registry
//! mutation, token movement, event. Status flips to its terminal value and is
//! persisted *before* any outbound transfer, so a reentrant call through a
//! misbehaving token observes the terminal status and is rejected. Returning
//! `Err` rolls the whole invocation back, so no failure leaves a partial
//! effect.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, BytesN, Env, Vec};

mod events;
mod storage;
mod types;
mod validation;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_admin;
#[cfg(test)]
mod test_events;

use soroban_sdk::xdr::ToXdr;

pub use types::{CampaignStatus, PlatformConfig, PublicCampaign, TargetedCampaign, FEE_DIVIDER};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    ContractPaused = 3,
    ReentrantCall = 4,
    Unauthorized = 5,
    CampaignNotFound = 6,
    InvalidCampaignStatus = 7,
    InvalidAddress = 8,
    InvalidAmount = 9,
    InvalidDeadline = 10,
    CampaignExpired = 11,
    TokenNotCompliant = 12,
    InsufficientAllowance = 13,
    InsufficientCustody = 14,
    TransferFailed = 15,
}

#[contract]
pub struct CampaignEscrow;

#[contractimpl]
impl CampaignEscrow {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract and set the platform owner.
    ///
    /// Must be called exactly once after deployment. The owner collects
    /// fees, may override deadlines, and holds the admin surface.
    pub fn initialize(
        env: Env,
        owner: Address,
        fee_basis_points: u32,
        minimum_offering: i128,
    ) -> Result<(), Error> {
        if storage::load_config(&env).is_some() {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        if fee_basis_points > FEE_DIVIDER {
            return Err(Error::InvalidAmount);
        }
        if minimum_offering < 0 {
            return Err(Error::InvalidAmount);
        }

        storage::save_config(
            &env,
            &PlatformConfig {
                owner,
                fee_basis_points,
                minimum_offering,
                paused: false,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Targeted campaigns
    // ─────────────────────────────────────────────────────────

    /// Create a targeted campaign, pulling `amount` from the creator's
    /// pre-approved allowance into contract custody.
    ///
    /// Preconditions, first failure wins: counterparty is not the creator;
    /// amount is positive and at least the configured minimum; the token
    /// passes the compliance probe; the deadline is strictly in the future;
    /// the creator's allowance covers the amount.
    pub fn create_targeted(
        env: Env,
        creator: Address,
        counterparty: Address,
        amount: i128,
        deadline: u64,
        token: Address,
    ) -> Result<BytesN<32>, Error> {
        let config = enter(&env)?;
        creator.require_auth();

        if counterparty == creator {
            return Err(Error::InvalidAddress);
        }
        if amount <= 0 || amount < config.minimum_offering {
            return Err(Error::InvalidAmount);
        }
        validation::validate_token(&env, &token)?;
        if deadline <= env.ledger().timestamp() {
            return Err(Error::InvalidDeadline);
        }

        collect(&env, &token, &creator, amount)?;

        let id = storage::next_campaign_id(&env, &creator, &counterparty.clone().to_xdr(&env));
        let campaign = TargetedCampaign {
            id: id.clone(),
            creator: creator.clone(),
            counterparty,
            deadline,
            amount,
            token: token.clone(),
            status: CampaignStatus::Published,
        };
        storage::save_targeted(&env, &campaign);
        storage::index_campaign(&env, &id, &creator);
        storage::adjust_obligations(&env, &token, amount);

        events::campaign_created(&env, &id, &creator, amount);
        exit(&env);
        Ok(id)
    }

    /// Update a published targeted campaign's counterparty, deadline, and
    /// amount.
    ///
    /// Callable by the creator or the owner. Decreasing the amount refunds
    /// the difference to the **creator**; increasing it pulls the difference
    /// from the **caller's** allowance. Equal amounts move nothing.
    pub fn update_targeted(
        env: Env,
        caller: Address,
        id: BytesN<32>,
        new_counterparty: Address,
        new_deadline: u64,
        new_amount: i128,
    ) -> Result<(), Error> {
        let config = enter(&env)?;
        caller.require_auth();

        let mut campaign = storage::load_targeted(&env, &id).ok_or(Error::CampaignNotFound)?;
        if campaign.status != CampaignStatus::Published {
            return Err(Error::InvalidCampaignStatus);
        }
        if caller != campaign.creator && caller != config.owner {
            return Err(Error::Unauthorized);
        }
        if new_counterparty == campaign.creator {
            return Err(Error::InvalidAddress);
        }
        if new_amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if new_deadline <= env.ledger().timestamp() {
            return Err(Error::InvalidDeadline);
        }

        let old_amount = campaign.amount;
        campaign.counterparty = new_counterparty;
        campaign.deadline = new_deadline;
        campaign.amount = new_amount;

        // Record fields and the obligations ledger are committed before the
        // balancing transfer; an Err from the transfer rolls everything back.
        if new_amount < old_amount {
            let refund = old_amount - new_amount;
            let client = require_custody(&env, &campaign.token, refund)?;
            let creator = campaign.creator.clone();
            storage::save_targeted(&env, &campaign);
            storage::adjust_obligations(&env, &campaign.token, -refund);
            pay_out(&env, &client, &creator, refund)?;
        } else if new_amount > old_amount {
            let extra = new_amount - old_amount;
            storage::save_targeted(&env, &campaign);
            storage::adjust_obligations(&env, &campaign.token, extra);
            collect(&env, &campaign.token, &caller, extra)?;
        } else {
            storage::save_targeted(&env, &campaign);
        }

        events::campaign_updated(&env, &id, &caller);
        exit(&env);
        Ok(())
    }

    /// Release a targeted campaign's funds: payout to the counterparty, fee
    /// to the owner.
    ///
    /// Callable by the counterparty before the deadline, or by the owner at
    /// any time (the owner override is the one canonical deadline exception).
    /// `fee = amount * fee_basis_points / 100_000`, floor division; the
    /// counterparty receives the remainder, so `payout + fee == amount`
    /// exactly.
    pub fn fulfil_targeted(env: Env, caller: Address, id: BytesN<32>) -> Result<(), Error> {
        let config = enter(&env)?;
        caller.require_auth();

        let mut campaign = storage::load_targeted(&env, &id).ok_or(Error::CampaignNotFound)?;
        if campaign.status != CampaignStatus::Published {
            return Err(Error::InvalidCampaignStatus);
        }
        if caller != campaign.counterparty && caller != config.owner {
            return Err(Error::Unauthorized);
        }
        if caller != config.owner && env.ledger().timestamp() > campaign.deadline {
            return Err(Error::CampaignExpired);
        }

        let fee = campaign
            .amount
            .checked_mul(config.fee_basis_points as i128)
            .ok_or(Error::InvalidAmount)?
            / FEE_DIVIDER as i128;
        let payout = campaign.amount - fee;

        let client = require_custody(&env, &campaign.token, campaign.amount)?;

        // Terminal status first, transfers second.
        campaign.status = CampaignStatus::Fulfilled;
        storage::save_targeted(&env, &campaign);
        storage::adjust_obligations(&env, &campaign.token, -campaign.amount);

        pay_out(&env, &client, &campaign.counterparty, payout)?;
        if fee > 0 {
            pay_out(&env, &client, &config.owner, fee)?;
        }

        events::campaign_fulfilled(&env, &id, &caller);
        exit(&env);
        Ok(())
    }

    /// Discard a targeted campaign, refunding the full amount to the creator.
    /// Callable by the creator or the owner while the campaign is published.
    pub fn discard_targeted(env: Env, caller: Address, id: BytesN<32>) -> Result<(), Error> {
        let config = enter(&env)?;
        caller.require_auth();

        let mut campaign = storage::load_targeted(&env, &id).ok_or(Error::CampaignNotFound)?;
        if campaign.status != CampaignStatus::Published {
            return Err(Error::InvalidCampaignStatus);
        }
        if caller != campaign.creator && caller != config.owner {
            return Err(Error::Unauthorized);
        }

        let client = require_custody(&env, &campaign.token, campaign.amount)?;

        campaign.status = CampaignStatus::Discarded;
        storage::save_targeted(&env, &campaign);
        storage::adjust_obligations(&env, &campaign.token, -campaign.amount);

        pay_out(&env, &client, &campaign.creator, campaign.amount)?;

        events::campaign_discarded(&env, &id, &caller);
        exit(&env);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Public campaigns
    // ─────────────────────────────────────────────────────────

    /// Create a public (pool) campaign with no named counterparty.
    pub fn create_public(
        env: Env,
        creator: Address,
        pool_amount: i128,
        deadline: u64,
        token: Address,
    ) -> Result<BytesN<32>, Error> {
        let config = enter(&env)?;
        creator.require_auth();

        if pool_amount <= 0 || pool_amount < config.minimum_offering {
            return Err(Error::InvalidAmount);
        }
        validation::validate_token(&env, &token)?;
        if deadline <= env.ledger().timestamp() {
            return Err(Error::InvalidDeadline);
        }

        collect(&env, &token, &creator, pool_amount)?;

        let id = storage::next_campaign_id(&env, &creator, &pool_amount.to_xdr(&env));
        let campaign = PublicCampaign {
            id: id.clone(),
            creator: creator.clone(),
            deadline,
            pool_amount,
            token: token.clone(),
            status: CampaignStatus::Published,
        };
        storage::save_public(&env, &campaign);
        storage::index_campaign(&env, &id, &creator);
        storage::adjust_obligations(&env, &token, pool_amount);

        events::public_created(&env, &id, &creator, pool_amount);
        exit(&env);
        Ok(id)
    }

    /// Resolve a public campaign with an explicit outcome.
    ///
    /// Callable by the creator before the deadline, or by the owner at any
    /// time. `is_fulfilled = true` transfers the full pool to the owner for
    /// out-of-band distribution (no fee deduction); `is_fulfilled = false`
    /// discards the campaign and refunds the pool to the creator.
    pub fn complete_public(
        env: Env,
        caller: Address,
        id: BytesN<32>,
        is_fulfilled: bool,
    ) -> Result<(), Error> {
        let config = enter(&env)?;
        caller.require_auth();

        let mut campaign = storage::load_public(&env, &id).ok_or(Error::CampaignNotFound)?;
        if campaign.status != CampaignStatus::Published {
            return Err(Error::InvalidCampaignStatus);
        }
        if caller != campaign.creator && caller != config.owner {
            return Err(Error::Unauthorized);
        }
        if caller != config.owner && env.ledger().timestamp() > campaign.deadline {
            return Err(Error::CampaignExpired);
        }

        let client = require_custody(&env, &campaign.token, campaign.pool_amount)?;

        if is_fulfilled {
            campaign.status = CampaignStatus::Fulfilled;
            storage::save_public(&env, &campaign);
            storage::adjust_obligations(&env, &campaign.token, -campaign.pool_amount);
            pay_out(&env, &client, &config.owner, campaign.pool_amount)?;
            events::public_completed(&env, &id, &caller);
        } else {
            campaign.status = CampaignStatus::Discarded;
            storage::save_public(&env, &campaign);
            storage::adjust_obligations(&env, &campaign.token, -campaign.pool_amount);
            pay_out(&env, &client, &campaign.creator, campaign.pool_amount)?;
            events::public_discarded(&env, &id, &caller);
        }

        exit(&env);
        Ok(())
    }

    /// Discard a public campaign, refunding the full pool to the creator.
    pub fn discard_public(env: Env, caller: Address, id: BytesN<32>) -> Result<(), Error> {
        let config = enter(&env)?;
        caller.require_auth();

        let mut campaign = storage::load_public(&env, &id).ok_or(Error::CampaignNotFound)?;
        if campaign.status != CampaignStatus::Published {
            return Err(Error::InvalidCampaignStatus);
        }
        if caller != campaign.creator && caller != config.owner {
            return Err(Error::Unauthorized);
        }

        let client = require_custody(&env, &campaign.token, campaign.pool_amount)?;

        campaign.status = CampaignStatus::Discarded;
        storage::save_public(&env, &campaign);
        storage::adjust_obligations(&env, &campaign.token, -campaign.pool_amount);

        pay_out(&env, &client, &campaign.creator, campaign.pool_amount)?;

        events::public_discarded(&env, &id, &caller);
        exit(&env);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Platform administration (owner-gated)
    // ─────────────────────────────────────────────────────────

    /// Set the platform fee in parts-per-100,000. Applies to all subsequent
    /// fulfilments; campaigns realise whatever rate is active when they
    /// resolve, not when they were opened.
    pub fn set_fee_basis_points(env: Env, new_fee: u32) -> Result<(), Error> {
        let mut config = require_owner(&env)?;
        if new_fee > FEE_DIVIDER {
            return Err(Error::InvalidAmount);
        }
        let old_fee = config.fee_basis_points;
        config.fee_basis_points = new_fee;
        storage::save_config(&env, &config);
        events::fees_updated(&env, old_fee, new_fee);
        Ok(())
    }

    /// Set the minimum offering for newly created campaigns. Existing
    /// smaller campaigns are unaffected.
    pub fn set_minimum_offering(env: Env, value: i128) -> Result<(), Error> {
        let mut config = require_owner(&env)?;
        if value < 0 {
            return Err(Error::InvalidAmount);
        }
        let old = config.minimum_offering;
        config.minimum_offering = value;
        storage::save_config(&env, &config);
        events::minimum_updated(&env, old, value);
        Ok(())
    }

    /// Halt every mutating escrow operation. Read-only queries stay up, and
    /// the admin surface stays up so the owner can always `resume`.
    pub fn pause(env: Env) -> Result<(), Error> {
        let mut config = require_owner(&env)?;
        config.paused = true;
        storage::save_config(&env, &config);
        events::paused(&env, &config.owner);
        Ok(())
    }

    /// Lift the pause.
    pub fn resume(env: Env) -> Result<(), Error> {
        let mut config = require_owner(&env)?;
        config.paused = false;
        storage::save_config(&env, &config);
        events::resumed(&env, &config.owner);
        Ok(())
    }

    /// Emergency sweep of the contract's entire balance of `token` to the
    /// owner. Not scoped to excess beyond escrowed obligations; this trusts
    /// the owner with funds still logically owed to campaigns.
    pub fn withdraw_token(env: Env, token: Address) -> Result<(), Error> {
        let config = require_owner(&env)?;
        if storage::guard_held(&env) {
            return Err(Error::ReentrantCall);
        }
        storage::set_guard(&env, true);

        let client = token::Client::new(&env, &token);
        let balance = client.balance(&env.current_contract_address());
        if balance > 0 {
            pay_out(&env, &client, &config.owner, balance)?;
        }

        events::tokens_swept(&env, &token, balance);
        exit(&env);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Read-only queries (available while paused)
    // ─────────────────────────────────────────────────────────

    /// Fetch a targeted campaign by id.
    pub fn get_targeted(env: Env, id: BytesN<32>) -> Result<TargetedCampaign, Error> {
        storage::load_targeted(&env, &id).ok_or(Error::CampaignNotFound)
    }

    /// Fetch a public campaign by id.
    pub fn get_public(env: Env, id: BytesN<32>) -> Result<PublicCampaign, Error> {
        storage::load_public(&env, &id).ok_or(Error::CampaignNotFound)
    }

    /// `true` if `id` names a campaign of either kind.
    pub fn campaign_exists(env: Env, id: BytesN<32>) -> bool {
        storage::has_campaign(&env, &id)
    }

    /// `true` if the campaign's deadline has passed. The deadline is a
    /// business-logic boundary checked synchronously, not a scheduled event;
    /// an expired campaign stays `Published` until someone resolves it.
    pub fn is_expired(env: Env, id: BytesN<32>) -> Result<bool, Error> {
        let deadline = if let Some(c) = storage::load_targeted(&env, &id) {
            c.deadline
        } else if let Some(c) = storage::load_public(&env, &id) {
            c.deadline
        } else {
            return Err(Error::CampaignNotFound);
        };
        Ok(env.ledger().timestamp() > deadline)
    }

    /// Paginated enumeration of every campaign id, insertion-ordered.
    /// Returns the requested window plus the unclamped total; an
    /// out-of-range offset yields an empty page and the correct total.
    pub fn list_campaigns(env: Env, offset: u32, limit: u32) -> (Vec<BytesN<32>>, u32) {
        storage::campaign_page(&env, offset, limit)
    }

    /// Every campaign id created by `creator`, in insertion order.
    pub fn campaigns_for_creator(env: Env, creator: Address) -> Vec<BytesN<32>> {
        storage::creator_campaigns(&env, &creator)
    }

    /// The current platform configuration.
    pub fn get_config(env: Env) -> Result<PlatformConfig, Error> {
        storage::load_config(&env).ok_or(Error::NotInitialized)
    }

    /// Total amount still escrowed for `token` across published campaigns.
    pub fn total_obligations(env: Env, token: Address) -> i128 {
        storage::obligations(&env, &token)
    }
}

// ─────────────────────────────────────────────────────────────
// Internal guards and token plumbing
// ─────────────────────────────────────────────────────────────

/// Entry gauntlet for mutating escrow operations: pause flag first, then the
/// call-scoped reentrancy flag. Returns the config for the caller's own
/// authorization and fee checks.
fn enter(env: &Env) -> Result<PlatformConfig, Error> {
    let config = storage::load_config(env).ok_or(Error::NotInitialized)?;
    if config.paused {
        return Err(Error::ContractPaused);
    }
    if storage::guard_held(env) {
        return Err(Error::ReentrantCall);
    }
    storage::set_guard(env, true);
    Ok(config)
}

/// Release the reentrancy flag. Error paths skip this deliberately: an `Err`
/// return rolls the whole invocation back, flag included.
fn exit(env: &Env) {
    storage::set_guard(env, false);
}

/// Load config and authenticate the owner for admin operations. Admin entry
/// points bypass the pause gate so the owner can always intervene.
fn require_owner(env: &Env) -> Result<PlatformConfig, Error> {
    let config = storage::load_config(env).ok_or(Error::NotInitialized)?;
    config.owner.require_auth();
    Ok(config)
}

/// Pull `amount` of `token` from `from` into contract custody through the
/// caller's pre-approved allowance.
fn collect(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), Error> {
    let client = token::Client::new(env, token);
    let contract = env.current_contract_address();
    if client.allowance(from, &contract) < amount {
        return Err(Error::InsufficientAllowance);
    }
    match client.try_transfer_from(&contract, from, &contract, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

/// Check the contract can cover `needed` of `token` — both the raw balance
/// and the obligations ledger must cover it, so one campaign's payout cannot
/// consume funds earmarked for another.
fn require_custody<'a>(
    env: &Env,
    token: &Address,
    needed: i128,
) -> Result<token::Client<'a>, Error> {
    let client = token::Client::new(env, token);
    if client.balance(&env.current_contract_address()) < needed {
        return Err(Error::InsufficientCustody);
    }
    if storage::obligations(env, token) < needed {
        return Err(Error::InsufficientCustody);
    }
    Ok(client)
}

/// Move `amount` out of contract custody to `to`.
fn pay_out(env: &Env, client: &token::Client, to: &Address, amount: i128) -> Result<(), Error> {
    match client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}
