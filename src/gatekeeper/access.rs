//! Access guard predicates.
//!
//! Pure reads against current state, each failing closed. The one write here
//! is `set_operational`, the owner-only switch that is itself exempt from the
//! operational check.

use crate::error::{RegistryError, RegistryResult};
use crate::identity::AccountId;
use crate::registry::state::RegistryState;
use tracing::info;

/// Fail with `NotOperational` unless the registry is switched on.
pub fn require_operational(state: &RegistryState) -> RegistryResult<()> {
    if state.operational {
        Ok(())
    } else {
        Err(RegistryError::NotOperational)
    }
}

/// Fail with `Unauthorized` unless `caller` is the owner.
pub fn require_owner(state: &RegistryState, caller: &AccountId) -> RegistryResult<()> {
    if *caller == state.owner {
        Ok(())
    } else {
        Err(RegistryError::Unauthorized(*caller))
    }
}

/// Fail with `NotRegistered` unless `caller` is an admitted member.
pub fn require_registered(state: &RegistryState, caller: &AccountId) -> RegistryResult<()> {
    if state.is_registered(caller) {
        Ok(())
    } else {
        Err(RegistryError::NotRegistered(*caller))
    }
}

/// Fail with `NotFunded` unless `caller` has crossed the funding threshold.
pub fn require_funded(state: &RegistryState, caller: &AccountId) -> RegistryResult<()> {
    if state.is_funded(caller) {
        Ok(())
    } else {
        Err(RegistryError::NotFunded(*caller))
    }
}

/// Set the global operational switch. Owner only.
pub fn set_operational(
    state: &mut RegistryState,
    caller: &AccountId,
    mode: bool,
) -> RegistryResult<()> {
    require_owner(state, caller)?;
    if state.operational != mode {
        info!(operational = mode, "operational mode changed");
    }
    state.operational = mode;
    Ok(())
}
