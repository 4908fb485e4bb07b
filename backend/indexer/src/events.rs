//! Canonical event types emitted by the campaign escrow contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/campaign_escrow/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the escrow contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A targeted campaign was created and funded (`created` topic).
    CampaignCreated,
    /// A targeted campaign's terms were amended (`updated` topic).
    CampaignUpdated,
    /// A targeted campaign paid out (`fulfilled` topic).
    CampaignFulfilled,
    /// A targeted campaign was cancelled and refunded (`discarded` topic).
    CampaignDiscarded,
    /// A public pool campaign was created (`pcreated` topic).
    PublicCreated,
    /// A public pool campaign was completed successfully (`pcomplete` topic).
    PublicCompleted,
    /// A public pool campaign was discarded (`pdiscard` topic).
    PublicDiscarded,
    /// The platform fee rate changed (`fee_set` topic).
    FeeUpdated,
    /// The minimum offering floor changed (`min_set` topic).
    MinimumUpdated,
    /// Escrow operations were paused (`paused` topic).
    Paused,
    /// Escrow operations were resumed (`unpaused` topic).
    Unpaused,
    /// A token balance was swept to the owner (`swept` topic).
    TokensSwept,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::CampaignCreated,
            "updated" => Self::CampaignUpdated,
            "fulfilled" => Self::CampaignFulfilled,
            "discarded" => Self::CampaignDiscarded,
            "pcreated" => Self::PublicCreated,
            "pcomplete" => Self::PublicCompleted,
            "pdiscard" => Self::PublicDiscarded,
            "fee_set" => Self::FeeUpdated,
            "min_set" => Self::MinimumUpdated,
            "paused" => Self::Paused,
            "unpaused" => Self::Unpaused,
            "swept" => Self::TokensSwept,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignCreated => "campaign_created",
            Self::CampaignUpdated => "campaign_updated",
            Self::CampaignFulfilled => "campaign_fulfilled",
            Self::CampaignDiscarded => "campaign_discarded",
            Self::PublicCreated => "public_created",
            Self::PublicCompleted => "public_completed",
            Self::PublicDiscarded => "public_discarded",
            Self::FeeUpdated => "fee_updated",
            Self::MinimumUpdated => "minimum_updated",
            Self::Paused => "paused",
            Self::Unpaused => "unpaused",
            Self::TokensSwept => "tokens_swept",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded escrow event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignEvent {
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
