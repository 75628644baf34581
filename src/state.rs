use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::{error::BountyError, event::BountyEvent};

/// Seed for the singleton registry PDA.
pub const REGISTRY_SEED: &[u8] = b"registry";

/// Seed prefix for per-bounty vault PDAs; the full seed is
/// `[VAULT_SEED, bounty_id.to_le_bytes()]`.
pub const VAULT_SEED: &[u8] = b"vault";

/// Size of the registry account buffer, fixed at initialization.
pub const REGISTRY_SPACE: usize = 64 * 1024;

/// Upper bound on the opaque `data` payload of bounties and fulfillments.
/// Large content lives off-chain (e.g. IPFS); callers store a reference here.
pub const MAX_DATA_LEN: usize = 256;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BountyStatus {
    /// Accepting fulfillments; the only state that permits mutation.
    Open,
    /// Issuer accepted a fulfillment and the reward was released. Terminal.
    Accepted,
    /// Issuer cancelled and the reward was refunded. Terminal.
    Cancelled,
}

/// A submission of completed work against an open bounty. Immutable once
/// recorded; its id is its index in the parent bounty's sequence.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Fulfillment {
    pub fulfiller: Pubkey,
    pub data: String,
}

/// An escrowed task posting. Never deleted; terminal bounties remain as
/// historical records. The bounty id is its index in the registry.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Bounty {
    pub issuer: Pubkey,
    /// Opaque task description; not interpreted by the program.
    pub data: String,
    /// Unix timestamp (seconds). Fulfillments require `now < deadline`.
    pub deadline: i64,
    /// Lamports in custody. Zeroed when the reward is released on acceptance.
    pub amount: u64,
    pub status: BountyStatus,
    /// Set exactly once, on acceptance. At most one fulfillment per bounty
    /// is ever accepted.
    pub accepted_fulfillment: Option<u64>,
    pub fulfillments: Vec<Fulfillment>,
}

/// The whole registry state: an append-only sequence of bounties, each
/// owning an append-only sequence of fulfillments. Ids on both levels are
/// dense indices starting at 0.
///
/// All four operations are pure state transitions: the caller identity and
/// the current ledger time come in as arguments, every precondition is
/// checked before any mutation, and success returns the notification to
/// emit. Custody movement (lamports in and out of the vaults) is the
/// processor's job, driven by the returned event.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Default)]
pub struct BountyRegistry {
    initialized: bool,
    bounties: Vec<Bounty>,
}

impl BountyRegistry {
    pub fn new() -> Self {
        BountyRegistry {
            initialized: true,
            bounties: Vec::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of bounties ever issued; also the id the next issuance gets.
    pub fn len(&self) -> u64 {
        self.bounties.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bounties.is_empty()
    }

    pub fn bounty(&self, bounty_id: u64) -> Result<&Bounty, BountyError> {
        self.bounties
            .get(bounty_id as usize)
            .ok_or(BountyError::UnknownBounty)
    }

    pub fn fulfillment(
        &self,
        bounty_id: u64,
        fulfillment_id: u64,
    ) -> Result<&Fulfillment, BountyError> {
        self.bounty(bounty_id)?
            .fulfillments
            .get(fulfillment_id as usize)
            .ok_or(BountyError::UnknownFulfillment)
    }

    /// Records a new open bounty funded with `amount` lamports and returns
    /// its id. The deadline comparison is strict: a deadline of exactly
    /// `now` is rejected.
    pub fn issue_bounty(
        &mut self,
        issuer: Pubkey,
        data: String,
        deadline: i64,
        amount: u64,
        now: i64,
    ) -> Result<(u64, BountyEvent), BountyError> {
        if amount == 0 {
            return Err(BountyError::InsufficientValue);
        }
        if deadline <= now {
            return Err(BountyError::InvalidDeadline);
        }
        if data.len() > MAX_DATA_LEN {
            return Err(BountyError::DataTooLong);
        }

        let bounty_id = self.len();
        self.bounties.push(Bounty {
            issuer,
            data,
            deadline,
            amount,
            status: BountyStatus::Open,
            accepted_fulfillment: None,
            fulfillments: Vec::new(),
        });

        Ok((
            bounty_id,
            BountyEvent::BountyIssued {
                bounty_id,
                issuer,
                amount,
            },
        ))
    }

    /// Appends a fulfillment to an open bounty and returns its id. Issuers
    /// may not fulfill their own bounties, and submissions at or after the
    /// deadline are rejected.
    pub fn fulfill_bounty(
        &mut self,
        fulfiller: Pubkey,
        bounty_id: u64,
        data: String,
        now: i64,
    ) -> Result<(u64, BountyEvent), BountyError> {
        {
            let bounty = self.bounty(bounty_id)?;
            if bounty.status != BountyStatus::Open {
                return Err(BountyError::NotOpen);
            }
            if now >= bounty.deadline {
                return Err(BountyError::DeadlineExpired);
            }
            if fulfiller == bounty.issuer {
                return Err(BountyError::Unauthorized);
            }
        }
        if data.len() > MAX_DATA_LEN {
            return Err(BountyError::DataTooLong);
        }

        let bounty = &mut self.bounties[bounty_id as usize];
        let fulfillment_id = bounty.fulfillments.len() as u64;
        bounty.fulfillments.push(Fulfillment { fulfiller, data });

        Ok((
            fulfillment_id,
            BountyEvent::BountyFulfilled {
                bounty_id,
                fulfiller,
                fulfillment_id,
            },
        ))
    }

    /// Marks a fulfillment as accepted and releases custody. Only the
    /// issuer may accept, and only while the bounty is open. The returned
    /// event names the fulfiller owed the reward and the amount to release.
    pub fn accept_fulfillment(
        &mut self,
        caller: Pubkey,
        bounty_id: u64,
        fulfillment_id: u64,
    ) -> Result<BountyEvent, BountyError> {
        {
            let bounty = self.bounty(bounty_id)?;
            if bounty.status != BountyStatus::Open {
                return Err(BountyError::NotOpen);
            }
            if caller != bounty.issuer {
                return Err(BountyError::Unauthorized);
            }
        }
        let fulfiller = self.fulfillment(bounty_id, fulfillment_id)?.fulfiller;

        let bounty = &mut self.bounties[bounty_id as usize];
        let amount = bounty.amount;
        bounty.status = BountyStatus::Accepted;
        bounty.accepted_fulfillment = Some(fulfillment_id);
        bounty.amount = 0;

        Ok(BountyEvent::FulfillmentAccepted {
            bounty_id,
            issuer: caller,
            fulfiller,
            fulfillment_id,
            amount,
        })
    }

    /// Cancels an open bounty and returns custody to the issuer. Only the
    /// issuer may cancel; cancellation is valid any time while open,
    /// before or after the deadline.
    pub fn cancel_bounty(
        &mut self,
        caller: Pubkey,
        bounty_id: u64,
    ) -> Result<BountyEvent, BountyError> {
        {
            let bounty = self.bounty(bounty_id)?;
            if bounty.status != BountyStatus::Open {
                return Err(BountyError::NotOpen);
            }
            if caller != bounty.issuer {
                return Err(BountyError::Unauthorized);
            }
        }

        let bounty = &mut self.bounties[bounty_id as usize];
        let amount = bounty.amount;
        bounty.status = BountyStatus::Cancelled;

        Ok(BountyEvent::BountyCancelled {
            bounty_id,
            issuer: caller,
            amount,
        })
    }
}
