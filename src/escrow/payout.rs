//! Payout hooks.
//!
//! How much an insuree is owed for a given flight outcome is not decided
//! here. A `PayoutStrategy` computes per-payer credits; this module enforces
//! what any strategy must respect:
//!
//! - credits are computed only from recorded policies
//! - credits for a flight never exceed the premiums recorded for it
//! - each policy is credited at most once, and each credit paid at most once

use crate::config::{CustodyMode, RegistryConfig};
use crate::error::{RegistryError, RegistryResult};
use crate::escrow::{Credit, FlightId, FlightStatus, InsurancePolicy};
use crate::gatekeeper::{require_operational, require_owner};
use crate::identity::AccountId;
use crate::registry::state::RegistryState;
use crate::treasury::{PayoutSource, Treasury};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Computes insuree credits for a settled flight.
pub trait PayoutStrategy {
    /// Credits owed for `flight` given `status`.
    ///
    /// `policies` holds only policies not yet credited. Returned entries
    /// must name payers from that list; entries for the same payer are
    /// summed, and payers left out are credited nothing.
    fn credits(
        &self,
        flight: FlightId,
        status: FlightStatus,
        policies: &[InsurancePolicy],
    ) -> Vec<(AccountId, u128)>;
}

impl<F> PayoutStrategy for F
where
    F: Fn(FlightId, FlightStatus, &[InsurancePolicy]) -> Vec<(AccountId, u128)>,
{
    fn credits(
        &self,
        flight: FlightId,
        status: FlightStatus,
        policies: &[InsurancePolicy],
    ) -> Vec<(AccountId, u128)> {
        self(flight, status, policies)
    }
}

fn sum(values: impl IntoIterator<Item = u128>) -> RegistryResult<u128> {
    values
        .into_iter()
        .try_fold(0u128, |acc, v| acc.checked_add(v))
        .ok_or(RegistryError::Overflow)
}

/// Credit insurees of `flight` according to `strategy`.
///
/// Owner only, while operational. Every not-yet-credited policy on the
/// flight gets a credit record (possibly zero), so repeating the call is a
/// no-op. Returns the total newly credited.
pub fn credit_insurees(
    state: &mut RegistryState,
    caller: &AccountId,
    flight: FlightId,
    status: FlightStatus,
    strategy: &dyn PayoutStrategy,
) -> RegistryResult<u128> {
    require_operational(state)?;
    require_owner(state, caller)?;

    let Some(book) = state.policies.get(&flight) else {
        return Ok(0);
    };
    let credited = state.credits.get(&flight);
    let pending: Vec<InsurancePolicy> = book
        .values()
        .filter(|p| credited.map_or(true, |c| !c.contains_key(&p.payer)))
        .cloned()
        .collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let mut awarded: BTreeMap<AccountId, u128> = BTreeMap::new();
    for (payer, amount) in strategy.credits(flight, status, &pending) {
        if !pending.iter().any(|p| p.payer == payer) {
            return Err(RegistryError::UnknownPolicy { payer, flight });
        }
        let entry = awarded.entry(payer).or_insert(0);
        *entry = entry.checked_add(amount).ok_or(RegistryError::Overflow)?;
    }

    let available = sum(book.values().map(|p| p.premium))?;
    let previously = sum(
        credited
            .into_iter()
            .flat_map(|book| book.values().map(|credit| credit.amount)),
    )?;
    let new_total = sum(awarded.values().copied())?;
    let requested = previously
        .checked_add(new_total)
        .ok_or(RegistryError::Overflow)?;
    if requested > available {
        return Err(RegistryError::PayoutExceedsPremiums {
            flight,
            requested,
            available,
        });
    }

    let credits = state.credits.entry(flight).or_default();
    for policy in &pending {
        credits.insert(
            policy.payer,
            Credit {
                amount: awarded.get(&policy.payer).copied().unwrap_or(0),
                paid: false,
            },
        );
    }

    info!(
        %flight,
        status = status.code(),
        policies = pending.len(),
        credited = new_total,
        "insurees credited"
    );
    Ok(new_total)
}

/// Pay `payer` the credit recorded for `flight`.
///
/// Caller is the payer. Operational only. In `Retain` custody the payout
/// is drawn from the escrow balance; in `Forward` custody from the external
/// reserve. Returns the amount paid.
pub fn pay_insuree<T: Treasury + ?Sized>(
    state: &mut RegistryState,
    config: &RegistryConfig,
    treasury: &mut T,
    payer: &AccountId,
    flight: FlightId,
) -> RegistryResult<u128> {
    require_operational(state)?;

    let credit = state
        .credit(flight, payer)
        .copied()
        .ok_or(RegistryError::NoCredit {
            payer: *payer,
            flight,
        })?;
    if credit.paid {
        return Err(RegistryError::AlreadyPaid {
            payer: *payer,
            flight,
        });
    }
    if credit.amount == 0 {
        return Err(RegistryError::NoCredit {
            payer: *payer,
            flight,
        });
    }

    let (source, escrow_balance) = match config.custody {
        CustodyMode::Retain => {
            let remaining = state.escrow_balance.checked_sub(credit.amount).ok_or(
                RegistryError::InsufficientEscrow {
                    requested: credit.amount,
                    available: state.escrow_balance,
                },
            )?;
            (PayoutSource::Escrow, remaining)
        }
        CustodyMode::Forward => (PayoutSource::Reserve, state.escrow_balance),
    };

    treasury
        .disburse(source, payer, credit.amount)
        .map_err(|e| {
            warn!(payer = %payer.short(), %flight, error = %e, "payout failed");
            RegistryError::FundsTransferFailed(e)
        })?;

    state.escrow_balance = escrow_balance;
    if let Some(entry) = state
        .credits
        .get_mut(&flight)
        .and_then(|book| book.get_mut(payer))
    {
        entry.paid = true;
    }

    info!(payer = %payer.short(), %flight, amount = credit.amount, "insuree paid");
    Ok(credit.amount)
}
