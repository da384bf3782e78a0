//! In-memory treasury that keeps account balances.

use super::traits::{PayoutSource, Transfer, TransferError, TransferResult, Treasury};
use crate::identity::AccountId;
use std::collections::BTreeMap;

/// Treasury backed by an in-memory balance sheet.
///
/// Forwarded amounts and payouts are credited to the recipient's balance.
/// Payouts drawn from `PayoutSource::Reserve` debit the external reserve;
/// payouts from `PayoutSource::Escrow` are already accounted for by the
/// registry's escrow balance.
#[derive(Debug, Clone, Default)]
pub struct LedgerTreasury {
    balances: BTreeMap<AccountId, u128>,
    reserve: u128,
    history: Vec<Transfer>,
}

impl LedgerTreasury {
    /// Create an empty ledger with no reserve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger whose external reserve holds `reserve`.
    pub fn with_reserve(reserve: u128) -> Self {
        Self {
            reserve,
            ..Self::default()
        }
    }

    /// Balance received by `account`.
    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Remaining external reserve.
    pub fn reserve(&self) -> u128 {
        self.reserve
    }

    /// Completed transfers, oldest first.
    pub fn history(&self) -> &[Transfer] {
        &self.history
    }

    fn credit(&mut self, to: &AccountId, amount: u128) -> TransferResult<()> {
        let balance = self.balances.entry(*to).or_insert(0);
        *balance = balance.checked_add(amount).ok_or_else(|| TransferError::Rejected {
            to: *to,
            reason: "balance overflow".to_string(),
        })?;
        Ok(())
    }
}

impl Treasury for LedgerTreasury {
    fn forward(&mut self, to: &AccountId, amount: u128) -> TransferResult<()> {
        self.credit(to, amount)?;
        self.history.push(Transfer::Forward { to: *to, amount });
        Ok(())
    }

    fn disburse(
        &mut self,
        source: PayoutSource,
        to: &AccountId,
        amount: u128,
    ) -> TransferResult<()> {
        let remaining = match source {
            PayoutSource::Reserve => {
                self.reserve
                    .checked_sub(amount)
                    .ok_or(TransferError::InsufficientReserve {
                        requested: amount,
                        available: self.reserve,
                    })?
            }
            PayoutSource::Escrow => self.reserve,
        };
        self.credit(to, amount)?;
        self.reserve = remaining;
        self.history.push(Transfer::Disburse {
            source,
            to: *to,
            amount,
        });
        Ok(())
    }
}
