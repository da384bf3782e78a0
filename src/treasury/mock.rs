//! Mock treasury for testing.
//!
//! Records every transfer and can be told to fail, so callers can check that
//! a failed transfer leaves registry state untouched.

use super::traits::{PayoutSource, Transfer, TransferError, TransferResult, Treasury};
use crate::identity::AccountId;

/// Mock treasury for testing.
#[derive(Debug, Clone, Default)]
pub struct MockTreasury {
    transfers: Vec<Transfer>,
    fail_remaining: usize,
    fail_always: bool,
}

impl MockTreasury {
    /// Create a mock that accepts every transfer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` transfers, then accept again.
    pub fn fail_next(&mut self, count: usize) {
        self.fail_remaining = count;
    }

    /// Fail every transfer until switched off.
    pub fn set_fail_always(&mut self, fail: bool) {
        self.fail_always = fail;
    }

    /// Transfers accepted so far, oldest first.
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Sum of amounts forwarded to `to`.
    pub fn forwarded_to(&self, to: &AccountId) -> u128 {
        self.transfers
            .iter()
            .filter_map(|t| match t {
                Transfer::Forward { to: dest, amount } if dest == to => Some(*amount),
                _ => None,
            })
            .sum()
    }

    /// Sum of amounts disbursed to `to`.
    pub fn disbursed_to(&self, to: &AccountId) -> u128 {
        self.transfers
            .iter()
            .filter_map(|t| match t {
                Transfer::Disburse {
                    to: dest, amount, ..
                } if dest == to => Some(*amount),
                _ => None,
            })
            .sum()
    }

    fn check(&mut self) -> TransferResult<()> {
        if self.fail_always {
            return Err(TransferError::Unavailable("mock failure".to_string()));
        }
        if self.fail_remaining > 0 {
            self.fail_remaining -= 1;
            return Err(TransferError::Unavailable("mock failure".to_string()));
        }
        Ok(())
    }
}

impl Treasury for MockTreasury {
    fn forward(&mut self, to: &AccountId, amount: u128) -> TransferResult<()> {
        self.check()?;
        self.transfers.push(Transfer::Forward { to: *to, amount });
        Ok(())
    }

    fn disburse(
        &mut self,
        source: PayoutSource,
        to: &AccountId,
        amount: u128,
    ) -> TransferResult<()> {
        self.check()?;
        self.transfers.push(Transfer::Disburse {
            source,
            to: *to,
            amount,
        });
        Ok(())
    }
}
