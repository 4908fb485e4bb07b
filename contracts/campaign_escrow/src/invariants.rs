#![allow(dead_code)]

extern crate std;

use crate::types::{CampaignStatus, PublicCampaign, TargetedCampaign, FEE_DIVIDER};

/// INV-1: Escrowed amounts must always be positive while published.
pub fn assert_amount_positive(campaign: &TargetedCampaign) {
    assert!(
        campaign.amount > 0,
        "INV-1 violated: campaign {:?} has non-positive amount ({})",
        campaign.id,
        campaign.amount
    );
}

/// INV-2: Campaign deadlines must be positive.
pub fn assert_deadline_positive(deadline: u64) {
    assert!(deadline > 0, "INV-2 violated: zero deadline");
}

/// INV-3: Status transition validity. Only forward transitions are allowed:
///   Published -> Fulfilled | Discarded
///   Fulfilled -> (none)
///   Discarded -> (none)
pub fn assert_valid_status_transition(from: &CampaignStatus, to: &CampaignStatus) {
    let valid = matches!(
        (from, to),
        (CampaignStatus::Published, CampaignStatus::Fulfilled)
            | (CampaignStatus::Published, CampaignStatus::Discarded)
    );

    assert!(
        valid,
        "INV-3 violated: invalid status transition from {:?} to {:?}",
        from, to
    );
}

/// INV-4: Fulfilment conservation — the fee split must partition the escrowed
/// amount exactly, with any floor-division remainder landing in the payout.
pub fn assert_fee_split(amount: i128, fee_basis_points: u32) {
    let fee = amount * fee_basis_points as i128 / FEE_DIVIDER as i128;
    let payout = amount - fee;
    assert_eq!(
        payout + fee,
        amount,
        "INV-4 violated: payout {} + fee {} != amount {}",
        payout,
        fee,
        amount
    );
    assert!(fee >= 0 && fee <= amount, "INV-4 violated: fee {} out of range", fee);
}

/// INV-5: Immutable targeted fields — identity fields never change after
/// creation (counterparty, deadline, and amount may change via update).
pub fn assert_targeted_immutable_fields(original: &TargetedCampaign, current: &TargetedCampaign) {
    assert_eq!(original.id, current.id, "INV-5 violated: id changed");
    assert_eq!(
        original.creator, current.creator,
        "INV-5 violated: creator changed"
    );
    assert_eq!(original.token, current.token, "INV-5 violated: token changed");
}

/// INV-6: Immutable public fields.
pub fn assert_public_immutable_fields(original: &PublicCampaign, current: &PublicCampaign) {
    assert_eq!(original.id, current.id, "INV-6 violated: id changed");
    assert_eq!(
        original.creator, current.creator,
        "INV-6 violated: creator changed"
    );
    assert_eq!(original.token, current.token, "INV-6 violated: token changed");
}

/// INV-7: The obligations ledger never goes negative.
pub fn assert_obligations_non_negative(obligations: i128) {
    assert!(
        obligations >= 0,
        "INV-7 violated: obligations ledger is negative ({})",
        obligations
    );
}

/// INV-8: Custody covers obligations — the contract's token balance must be
/// at least the total it still owes for that token.
pub fn assert_custody_covers_obligations(balance: i128, obligations: i128) {
    assert!(
        balance >= obligations,
        "INV-8 violated: custody {} below obligations {}",
        balance,
        obligations
    );
}
