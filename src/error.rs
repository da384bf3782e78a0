//! Registry errors.
//!
//! Every failure is terminal for the triggering call and leaves state exactly
//! as it was before the call.

use crate::escrow::FlightId;
use crate::identity::AccountId;
use crate::treasury::TransferError;

/// Errors surfaced by registry operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Registry is not operational")]
    NotOperational,

    #[error("Caller {0} is not the owner")]
    Unauthorized(AccountId),

    #[error("Caller {0} is not a registered member")]
    NotRegistered(AccountId),

    #[error("Caller {0} has not reached the funding threshold")]
    NotFunded(AccountId),

    #[error("{voter} has already approved candidate {candidate}")]
    DuplicateVote {
        voter: AccountId,
        candidate: AccountId,
    },

    #[error("Candidate {0} is already a registered member")]
    AlreadyRegistered(AccountId),

    #[error("Candidate {candidate} was proposed as {expected:?}, not {got:?}")]
    CandidateNameMismatch {
        candidate: AccountId,
        expected: String,
        got: String,
    },

    #[error("{payer} already holds a policy for flight {flight}")]
    AlreadyInsured { payer: AccountId, flight: FlightId },

    #[error("Premium must be greater than zero")]
    ZeroPremium,

    #[error("Premium {premium} exceeds the cap of {max}")]
    PremiumTooHigh { premium: u128, max: u128 },

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Funds transfer failed: {0}")]
    FundsTransferFailed(#[from] TransferError),

    #[error("Credits of {requested} for flight {flight} exceed recorded premiums of {available}")]
    PayoutExceedsPremiums {
        flight: FlightId,
        requested: u128,
        available: u128,
    },

    #[error("No uncredited policy for {payer} on flight {flight}")]
    UnknownPolicy { payer: AccountId, flight: FlightId },

    #[error("No credit recorded for {payer} on flight {flight}")]
    NoCredit { payer: AccountId, flight: FlightId },

    #[error("Credit for {payer} on flight {flight} has already been paid")]
    AlreadyPaid { payer: AccountId, flight: FlightId },

    #[error("Escrow balance {available} cannot cover payout of {requested}")]
    InsufficientEscrow { requested: u128, available: u128 },
}

/// Registry result type.
pub type RegistryResult<T> = Result<T, RegistryError>;
