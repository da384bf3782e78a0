//! Funding gate.
//!
//! A registered member becomes funded once its cumulative contribution
//! reaches the configured threshold. Funded status is what unlocks voting
//! and sponsorship, and it never reverts.

use crate::config::{CustodyMode, RegistryConfig};
use crate::error::{RegistryError, RegistryResult};
use crate::gatekeeper::{require_operational, require_registered};
use crate::identity::AccountId;
use crate::registry::state::RegistryState;
use crate::treasury::Treasury;
use tracing::{info, warn};

/// Result of a successful `contribute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingOutcome {
    /// Cumulative contribution after this call.
    pub contributed: u128,
    pub funded: bool,
    /// True only on the call that crossed the threshold.
    pub newly_funded: bool,
}

/// Add `amount` to `caller`'s contribution.
///
/// Requires the registry to be operational and `caller` to be registered
/// (not funded: this is how a member gets funded). The amount is forwarded
/// to the owner or retained in escrow depending on custody mode; the
/// transfer happens before any state is written, so a failed transfer
/// leaves the contribution unrecorded.
pub fn contribute<T: Treasury + ?Sized>(
    state: &mut RegistryState,
    config: &RegistryConfig,
    treasury: &mut T,
    caller: &AccountId,
    amount: u128,
) -> RegistryResult<FundingOutcome> {
    require_operational(state)?;
    require_registered(state, caller)?;

    let (previous, was_funded) = state
        .member(caller)
        .map(|m| (m.contributed, m.funded))
        .ok_or(RegistryError::NotRegistered(*caller))?;
    let contributed = previous
        .checked_add(amount)
        .ok_or(RegistryError::Overflow)?;

    let escrow_balance = match config.custody {
        CustodyMode::Forward => {
            treasury.forward(&state.owner, amount).map_err(|e| {
                warn!(member = %caller.short(), amount, error = %e, "contribution forward failed");
                RegistryError::FundsTransferFailed(e)
            })?;
            state.escrow_balance
        }
        CustodyMode::Retain => state
            .escrow_balance
            .checked_add(amount)
            .ok_or(RegistryError::Overflow)?,
    };

    let funded = was_funded || contributed >= config.funding_threshold;
    state.escrow_balance = escrow_balance;
    if let Some(member) = state.members.get_mut(caller) {
        member.contributed = contributed;
        member.funded = funded;
    }

    let newly_funded = funded && !was_funded;
    if newly_funded {
        info!(member = %caller.short(), contributed, "member funded");
    }

    Ok(FundingOutcome {
        contributed,
        funded,
        newly_funded,
    })
}
