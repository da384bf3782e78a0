//! Trait abstraction for external funds transfers.
//!
//! Enables mock implementations for testing, including injected failures.

use crate::identity::AccountId;
use serde::{Deserialize, Serialize};

/// Where a payout is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutSource {
    /// The registry's own retained escrow balance.
    Escrow,
    /// A reserve held outside the registry.
    Reserve,
}

/// A completed transfer, as recorded by ledgers and mocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transfer {
    Forward {
        to: AccountId,
        amount: u128,
    },
    Disburse {
        source: PayoutSource,
        to: AccountId,
        amount: u128,
    },
}

/// Transfer errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("transfer to {to} rejected: {reason}")]
    Rejected { to: AccountId, reason: String },

    #[error("reserve holds {available}, cannot pay {requested}")]
    InsufficientReserve { requested: u128, available: u128 },

    #[error("treasury unavailable: {0}")]
    Unavailable(String),
}

/// Result type for transfers.
pub type TransferResult<T> = Result<T, TransferError>;

/// External funds movement.
///
/// Each call either moves the full amount or fails without moving anything.
/// The registry calls these before committing its own state, so a failure
/// aborts the whole enclosing operation.
pub trait Treasury {
    /// Forward an incoming contribution or premium to `to`.
    fn forward(&mut self, to: &AccountId, amount: u128) -> TransferResult<()>;

    /// Pay `amount` to `to`, drawn from `source`.
    fn disburse(
        &mut self,
        source: PayoutSource,
        to: &AccountId,
        amount: u128,
    ) -> TransferResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_display() {
        let to = AccountId::from_bytes([1u8; 32]);
        let err = TransferError::Rejected {
            to,
            reason: "frozen".to_string(),
        };
        assert!(err.to_string().ends_with("rejected: frozen"));

        assert_eq!(
            TransferError::InsufficientReserve {
                requested: 10,
                available: 3
            }
            .to_string(),
            "reserve holds 3, cannot pay 10"
        );
    }
}
