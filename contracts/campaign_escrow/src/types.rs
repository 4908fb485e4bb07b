//! # Types
//!
//! Shared data structures used across all modules of the campaign escrow.
//!
//! ## Design decisions
//!
//! ### Two record kinds
//!
//! A campaign is either *targeted* (names the counterparty entitled to the
//! payout) or *public* (a pool the platform owner distributes off-chain after
//! the creator signals the outcome). The two kinds never share a storage
//! entry; only the identifier space and the status lifecycle are common.
//!
//! ### Status as a Finite-State Machine
//!
//! [`CampaignStatus`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Published ──► Fulfilled
//!     └───────► Discarded
//! ```
//!
//! `Fulfilled` and `Discarded` are terminal. Every transition out of them is
//! rejected with `InvalidCampaignStatus`, which is what makes the
//! state-change-before-transfer ordering in `lib.rs` an effective reentrancy
//! defence: a nested call observes the terminal status and bails.

use soroban_sdk::{contracttype, Address, BytesN};

/// Lifecycle status of a campaign.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    /// Escrow funded and open; the only mutable state.
    Published,
    /// Funds released to the intended recipient. Terminal.
    Fulfilled,
    /// Funds returned to the creator. Terminal.
    Discarded,
}

/// An escrow naming one specific counterparty as the payout recipient.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetedCampaign {
    /// Unique identifier (SHA-256 digest, see `storage::next_campaign_id`).
    pub id: BytesN<32>,
    /// Depositor; receives refunds on discard and amount decreases.
    pub creator: Address,
    /// The party entitled to the payout on fulfilment.
    pub counterparty: Address,
    /// Ledger timestamp after which only the owner may fulfil.
    pub deadline: u64,
    /// Escrowed amount in token base units.
    pub amount: i128,
    /// The token the escrow is denominated in.
    pub token: Address,
    /// Current lifecycle status.
    pub status: CampaignStatus,
}

/// An escrow with no named counterparty. On fulfilment the pool moves to the
/// platform owner for manual off-chain distribution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicCampaign {
    pub id: BytesN<32>,
    pub creator: Address,
    /// Ledger timestamp after which only the owner may complete.
    pub deadline: u64,
    /// Escrowed pool in token base units.
    pub pool_amount: i128,
    pub token: Address,
    pub status: CampaignStatus,
}

/// Process-wide platform configuration.
///
/// Stored as a single instance-storage value, read by every escrow operation
/// and mutated only through the owner-gated admin entry points. The fee is
/// applied at fulfilment time, never captured at creation, so a campaign's
/// realised fee is whatever rate is active when it resolves.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlatformConfig {
    /// Platform owner: admin authority, fee recipient, override actor.
    pub owner: Address,
    /// Fee in parts-per-100,000 of the escrowed amount (see [`FEE_DIVIDER`]).
    pub fee_basis_points: u32,
    /// Floor on the amount of newly created campaigns. Not retroactive.
    pub minimum_offering: i128,
    /// Global circuit breaker; gates every mutating entry point.
    pub paused: bool,
}

/// Fee denominator: fees are expressed as parts-per-100,000, so a
/// `fee_basis_points` of 10_000 is a 10% fee.
pub const FEE_DIVIDER: u32 = 100_000;
