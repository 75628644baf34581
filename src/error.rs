use solana_program::{decode_error::DecodeError, program_error::ProgramError};
use thiserror::Error;

/// Every rejected operation surfaces as one of these. Each maps to a
/// distinct `ProgramError::Custom` code so callers can tell rejections apart.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BountyError {
    #[error("Invalid instruction")]
    InvalidInstruction,

    #[error("Bounty must be funded with a non-zero amount")]
    InsufficientValue,

    #[error("Deadline must be strictly in the future")]
    InvalidDeadline,

    #[error("No bounty with that id")]
    UnknownBounty,

    #[error("No fulfillment with that id under this bounty")]
    UnknownFulfillment,

    #[error("Bounty is not open")]
    NotOpen,

    #[error("Bounty deadline has passed")]
    DeadlineExpired,

    #[error("Caller is not permitted to perform this operation")]
    Unauthorized,

    #[error("Payload exceeds the maximum length")]
    DataTooLong,

    #[error("Registry already initialized")]
    RegistryAlreadyInitialized,

    #[error("Registry not initialized")]
    RegistryNotInitialized,
}

impl From<BountyError> for ProgramError {
    fn from(e: BountyError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for BountyError {
    fn type_of() -> &'static str {
        "BountyError"
    }
}
