//! Member registry.
//!
//! - `state`: the single owned store (members, ballots, policies, counters)
//! - `admission`: consensus over who joins
//! - `funding`: contribution tracking and the funded flag
//!
//! `FlightRegistry` bundles a store with its parameters and treasury and
//! exposes every external operation. Each call runs to completion before
//! the next, and either commits fully or returns an error with the store
//! unchanged.

pub mod admission;
pub mod funding;
pub mod state;

#[cfg(test)]
mod proptests;

use crate::config::{ConfigError, RegistryConfig};
use crate::error::RegistryResult;
use crate::escrow::{self, FlightId, FlightStatus, PayoutStrategy};
use crate::gatekeeper;
use crate::identity::AccountId;
use crate::treasury::Treasury;
use tracing::debug;

pub use admission::{admission_threshold, AdmissionOutcome};
pub use funding::FundingOutcome;
pub use state::{AdmissionBallot, InvariantViolation, MemberAccount, RegistryState};

/// Why a stored registry could not be resumed.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResumeError {
    #[error("invalid registry parameters: {0}")]
    Config(#[from] ConfigError),

    #[error("inconsistent registry state: {0}")]
    InvalidState(#[from] InvariantViolation),
}

/// Registry store plus the parameters and treasury its operations need.
#[derive(Debug)]
pub struct FlightRegistry<T: Treasury> {
    state: RegistryState,
    config: RegistryConfig,
    treasury: T,
}

impl<T: Treasury> FlightRegistry<T> {
    /// Create a registry seeded with `owner` as its only member.
    pub fn new(
        owner: AccountId,
        owner_name: impl Into<String>,
        config: RegistryConfig,
        treasury: T,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: RegistryState::new(owner, owner_name),
            config,
            treasury,
        })
    }

    /// Resume from an existing store, typically a decoded snapshot.
    ///
    /// The store must pass [`RegistryState::check_invariants`], which also
    /// rejects snapshots written by a newer schema.
    pub fn from_state(
        state: RegistryState,
        config: RegistryConfig,
        treasury: T,
    ) -> Result<Self, ResumeError> {
        config.validate()?;
        state.check_invariants()?;
        Ok(Self {
            state,
            config,
            treasury,
        })
    }

    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn treasury(&self) -> &T {
        &self.treasury
    }

    pub fn treasury_mut(&mut self) -> &mut T {
        &mut self.treasury
    }

    pub fn into_parts(self) -> (RegistryState, RegistryConfig, T) {
        (self.state, self.config, self.treasury)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn owner(&self) -> AccountId {
        self.state.owner
    }

    pub fn is_operational(&self) -> bool {
        self.state.operational
    }

    /// Whether `id` is a registered member.
    pub fn is_member(&self, id: &AccountId) -> bool {
        self.state.is_registered(id)
    }

    pub fn is_funded(&self, id: &AccountId) -> bool {
        self.state.is_funded(id)
    }

    pub fn member(&self, id: &AccountId) -> Option<&MemberAccount> {
        self.state.member(id)
    }

    pub fn registered_count(&self) -> u64 {
        self.state.registered_count
    }

    /// Approvals recorded so far for a pending candidate.
    pub fn ballot_approvals(&self, candidate: &AccountId) -> usize {
        self.state
            .ballots
            .get(candidate)
            .map_or(0, |b| b.approvals.len())
    }

    /// Premium recorded for (`flight`, `payer`), or 0.
    pub fn get_policy_amount(&self, payer: &AccountId, flight: FlightId) -> u128 {
        escrow::policy_amount(&self.state, payer, flight)
    }

    /// Unpaid credit for (`flight`, `payer`), or 0.
    pub fn credit_for(&self, payer: &AccountId, flight: FlightId) -> u128 {
        self.state
            .credit(flight, payer)
            .filter(|c| !c.paid)
            .map_or(0, |c| c.amount)
    }

    pub fn escrow_balance(&self) -> u128 {
        self.state.escrow_balance
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Switch the registry on or off. Owner only; allowed while paused.
    pub fn set_operational(&mut self, caller: &AccountId, mode: bool) -> RegistryResult<()> {
        gatekeeper::set_operational(&mut self.state, caller, mode).inspect_err(|e| {
            debug!(caller = %caller.short(), error = %e, "set_operational rejected");
        })
    }

    /// Sponsor or vote for `candidate`. See [`admission::propose_or_vote`].
    pub fn propose_or_vote(
        &mut self,
        sponsor: &AccountId,
        candidate: AccountId,
        name: &str,
    ) -> RegistryResult<AdmissionOutcome> {
        admission::propose_or_vote(&mut self.state, sponsor, candidate, name)
            .inspect_err(|e| debug!(sponsor = %sponsor.short(), error = %e, "vote rejected"))
    }

    /// Record a contribution. See [`funding::contribute`].
    pub fn contribute(
        &mut self,
        caller: &AccountId,
        amount: u128,
    ) -> RegistryResult<FundingOutcome> {
        funding::contribute(
            &mut self.state,
            &self.config,
            &mut self.treasury,
            caller,
            amount,
        )
        .inspect_err(|e| {
            debug!(caller = %caller.short(), error = %e, "contribution rejected");
        })
    }

    /// Buy a policy. See [`escrow::purchase_policy`].
    pub fn purchase_policy(
        &mut self,
        payer: &AccountId,
        flight: FlightId,
        premium: u128,
    ) -> RegistryResult<()> {
        escrow::purchase_policy(
            &mut self.state,
            &self.config,
            &mut self.treasury,
            payer,
            flight,
            premium,
        )
        .inspect_err(|e| {
            debug!(payer = %payer.short(), %flight, error = %e, "purchase rejected");
        })
    }

    /// Credit insurees of a settled flight. See [`escrow::credit_insurees`].
    pub fn credit_insurees(
        &mut self,
        caller: &AccountId,
        flight: FlightId,
        status: FlightStatus,
        strategy: &dyn PayoutStrategy,
    ) -> RegistryResult<u128> {
        escrow::credit_insurees(&mut self.state, caller, flight, status, strategy)
            .inspect_err(|e| debug!(%flight, error = %e, "crediting rejected"))
    }

    /// Pay out a recorded credit. See [`escrow::pay_insuree`].
    pub fn pay_insuree(&mut self, payer: &AccountId, flight: FlightId) -> RegistryResult<u128> {
        escrow::pay_insuree(
            &mut self.state,
            &self.config,
            &mut self.treasury,
            payer,
            flight,
        )
        .inspect_err(|e| {
            debug!(payer = %payer.short(), %flight, error = %e, "payout rejected");
        })
    }
}
