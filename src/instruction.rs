use borsh::{BorshDeserialize, BorshSerialize};

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq)]
pub enum BountyInstruction {
    /// Create and initialize the registry account
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Payer account - funds the registry account creation
    /// 1. `[writable]` Registry account (PDA) - holds all bounty state
    /// 2. `[]` System program
    InitializeRegistry,

    /// Issue a new bounty with lamports locked in its vault
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Issuer account - creates and funds the bounty
    /// 1. `[writable]` Registry account (PDA)
    /// 2. `[writable]` Vault account (PDA) - holds the locked lamports
    /// 3. `[]` System program
    IssueBounty {
        /// Opaque task description (e.g. an IPFS hash)
        data: String,
        /// Deadline as unix timestamp in seconds; must be strictly in the future
        deadline: i64,
        /// Amount in lamports to take into custody
        amount: u64,
    },

    /// Submit completed work against an open bounty
    ///
    /// Accounts:
    /// 0. `[signer]` Fulfiller account - must not be the bounty's issuer
    /// 1. `[writable]` Registry account (PDA)
    FulfillBounty {
        /// Bounty to fulfill
        bounty_id: u64,
        /// Opaque description of the submitted work
        data: String,
    },

    /// Accept a fulfillment and release the reward to its fulfiller
    ///
    /// Accounts:
    /// 0. `[signer]` Issuer account - only the issuer may accept
    /// 1. `[writable]` Registry account (PDA)
    /// 2. `[writable]` Vault account (PDA) - holds the lamports to release
    /// 3. `[writable]` Fulfiller account - receives the reward
    /// 4. `[]` System program
    AcceptFulfillment { bounty_id: u64, fulfillment_id: u64 },

    /// Cancel an open bounty and refund the issuer
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Issuer account - only the issuer may cancel
    /// 1. `[writable]` Registry account (PDA)
    /// 2. `[writable]` Vault account (PDA) - holds the lamports to refund
    /// 3. `[]` System program
    CancelBounty { bounty_id: u64 },
}
