//! Policy purchase.

use crate::config::{CustodyMode, RegistryConfig};
use crate::error::{RegistryError, RegistryResult};
use crate::escrow::{FlightId, InsurancePolicy};
use crate::gatekeeper::require_operational;
use crate::identity::AccountId;
use crate::registry::state::RegistryState;
use crate::treasury::Treasury;
use tracing::{info, warn};

/// Record a policy for (`flight`, `payer`) carrying `premium`.
///
/// Open to any identity while the registry is operational. Validation order:
/// existing policy, zero premium, premium above the cap. The premium is
/// forwarded or retained per custody mode before the policy is written.
pub fn purchase_policy<T: Treasury + ?Sized>(
    state: &mut RegistryState,
    config: &RegistryConfig,
    treasury: &mut T,
    payer: &AccountId,
    flight: FlightId,
    premium: u128,
) -> RegistryResult<()> {
    require_operational(state)?;

    if state.policy(flight, payer).is_some() {
        return Err(RegistryError::AlreadyInsured {
            payer: *payer,
            flight,
        });
    }
    if premium == 0 {
        return Err(RegistryError::ZeroPremium);
    }
    if premium > config.max_premium {
        return Err(RegistryError::PremiumTooHigh {
            premium,
            max: config.max_premium,
        });
    }

    let escrow_balance = match config.custody {
        CustodyMode::Forward => {
            treasury.forward(&state.owner, premium).map_err(|e| {
                warn!(payer = %payer.short(), %flight, error = %e, "premium forward failed");
                RegistryError::FundsTransferFailed(e)
            })?;
            state.escrow_balance
        }
        CustodyMode::Retain => state
            .escrow_balance
            .checked_add(premium)
            .ok_or(RegistryError::Overflow)?,
    };

    state.escrow_balance = escrow_balance;
    state.policies.entry(flight).or_default().insert(
        *payer,
        InsurancePolicy {
            flight,
            payer: *payer,
            premium,
        },
    );

    info!(payer = %payer.short(), %flight, premium, "policy purchased");
    Ok(())
}

/// Premium recorded for (`flight`, `payer`), or 0 if none.
pub fn policy_amount(state: &RegistryState, payer: &AccountId, flight: FlightId) -> u128 {
    state.policy(flight, payer).map_or(0, |p| p.premium)
}
