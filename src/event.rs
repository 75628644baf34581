use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{msg, pubkey::Pubkey};

/// Notifications emitted on every successful state transition, one per
/// mutating instruction. Observers (indexers, frontends) reconstruct the
/// registry history from these without reading account state.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub enum BountyEvent {
    BountyIssued {
        bounty_id: u64,
        issuer: Pubkey,
        amount: u64,
    },
    BountyFulfilled {
        bounty_id: u64,
        fulfiller: Pubkey,
        fulfillment_id: u64,
    },
    FulfillmentAccepted {
        bounty_id: u64,
        issuer: Pubkey,
        fulfiller: Pubkey,
        fulfillment_id: u64,
        amount: u64,
    },
    BountyCancelled {
        bounty_id: u64,
        issuer: Pubkey,
        amount: u64,
    },
}

impl BountyEvent {
    /// Writes the event to the program log.
    pub fn log(&self) {
        match self {
            BountyEvent::BountyIssued {
                bounty_id,
                issuer,
                amount,
            } => {
                msg!(
                    "BountyIssued: bounty_id {}, issuer {}, amount {}",
                    bounty_id,
                    issuer,
                    amount
                );
            }
            BountyEvent::BountyFulfilled {
                bounty_id,
                fulfiller,
                fulfillment_id,
            } => {
                msg!(
                    "BountyFulfilled: bounty_id {}, fulfiller {}, fulfillment_id {}",
                    bounty_id,
                    fulfiller,
                    fulfillment_id
                );
            }
            BountyEvent::FulfillmentAccepted {
                bounty_id,
                issuer,
                fulfiller,
                fulfillment_id,
                amount,
            } => {
                msg!(
                    "FulfillmentAccepted: bounty_id {}, issuer {}, fulfiller {}, fulfillment_id {}, amount {}",
                    bounty_id,
                    issuer,
                    fulfiller,
                    fulfillment_id,
                    amount
                );
            }
            BountyEvent::BountyCancelled {
                bounty_id,
                issuer,
                amount,
            } => {
                msg!(
                    "BountyCancelled: bounty_id {}, issuer {}, amount {}",
                    bounty_id,
                    issuer,
                    amount
                );
            }
        }
    }
}
