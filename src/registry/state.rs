//! Registry state: the single owned store every operation reads and writes.
//!
//! - Members: one account per admitted identity, keyed by `AccountId`
//! - Ballots: one per candidate awaiting admission, removed on admission
//! - Policies and credits: nested by flight, then payer
//! - Counters: owner, operational flag, registered count, escrow balance
//!
//! All maps are `BTreeMap` so snapshots encode deterministically.

use crate::escrow::{Credit, FlightId, InsurancePolicy};
use crate::identity::AccountId;
use crate::serialization::{from_cbor, to_cbor, SerializationError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Current snapshot schema.
pub const SCHEMA_VERSION: u64 = 1;

/// An admitted identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAccount {
    pub id: AccountId,
    /// Display label, fixed at admission.
    pub name: String,
    pub registered: bool,
    pub funded: bool,
    /// Cumulative contribution. Never decreases.
    pub contributed: u128,
}

impl MemberAccount {
    /// A freshly admitted member: registered, unfunded, nothing contributed.
    pub fn admitted(id: AccountId, name: String) -> Self {
        Self {
            id,
            name,
            registered: true,
            funded: false,
            contributed: 0,
        }
    }
}

/// Approval tally for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionBallot {
    pub candidate: AccountId,
    /// Name supplied by the first vote. Later votes must match it.
    pub name: String,
    /// Distinct voters who approved this candidate.
    pub approvals: BTreeSet<AccountId>,
}

impl AdmissionBallot {
    pub fn new(candidate: AccountId, name: String) -> Self {
        Self {
            candidate,
            name,
            approvals: BTreeSet::new(),
        }
    }
}

/// Registry state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    /// Schema version for evolution.
    pub schema_version: u64,

    /// Deploying identity, set once.
    pub owner: AccountId,

    /// Global operational switch.
    pub operational: bool,

    /// Number of admitted members.
    pub registered_count: u64,

    pub members: BTreeMap<AccountId, MemberAccount>,

    pub ballots: BTreeMap<AccountId, AdmissionBallot>,

    /// Policies: flight -> payer -> policy.
    pub policies: BTreeMap<FlightId, BTreeMap<AccountId, InsurancePolicy>>,

    /// Credits: flight -> payer -> credit.
    #[serde(default)]
    pub credits: BTreeMap<FlightId, BTreeMap<AccountId, Credit>>,

    /// Funds retained by the registry (custody mode `Retain` only).
    #[serde(default)]
    pub escrow_balance: u128,
}

/// A broken state invariant, reported by `check_invariants`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("snapshot schema v{found} is newer than supported v{supported}")]
    UnsupportedSchema { found: u64, supported: u64 },

    #[error("member {0} is funded but not registered")]
    FundedNotRegistered(AccountId),

    #[error("member table key {key} holds account {id}")]
    MismatchedKey { key: AccountId, id: AccountId },

    #[error("registered_count is {recorded} but {actual} members are registered")]
    CountMismatch { recorded: u64, actual: u64 },

    #[error("owner {0} is not a registered, funded member")]
    OwnerNotSeeded(AccountId),

    #[error("ballot open for already registered {0}")]
    BallotForMember(AccountId),

    #[error("policy for {payer} on flight {flight} is misfiled or has zero premium")]
    BadPolicy { flight: FlightId, payer: AccountId },

    #[error("credit for {payer} on flight {flight} has no matching policy")]
    OrphanCredit { flight: FlightId, payer: AccountId },
}

impl RegistryState {
    /// Initial state: the owner is the only member, registered and funded.
    pub fn new(owner: AccountId, owner_name: impl Into<String>) -> Self {
        let mut members = BTreeMap::new();
        members.insert(
            owner,
            MemberAccount {
                id: owner,
                name: owner_name.into(),
                registered: true,
                funded: true,
                contributed: 0,
            },
        );

        Self {
            schema_version: SCHEMA_VERSION,
            owner,
            operational: true,
            registered_count: 1,
            members,
            ballots: BTreeMap::new(),
            policies: BTreeMap::new(),
            credits: BTreeMap::new(),
            escrow_balance: 0,
        }
    }

    pub fn member(&self, id: &AccountId) -> Option<&MemberAccount> {
        self.members.get(id)
    }

    pub fn is_registered(&self, id: &AccountId) -> bool {
        self.members.get(id).is_some_and(|m| m.registered)
    }

    pub fn is_funded(&self, id: &AccountId) -> bool {
        self.members.get(id).is_some_and(|m| m.funded)
    }

    pub fn policy(&self, flight: FlightId, payer: &AccountId) -> Option<&InsurancePolicy> {
        self.policies.get(&flight).and_then(|book| book.get(payer))
    }

    pub fn credit(&self, flight: FlightId, payer: &AccountId) -> Option<&Credit> {
        self.credits.get(&flight).and_then(|book| book.get(payer))
    }

    /// Total number of recorded policies across all flights.
    pub fn policy_count(&self) -> usize {
        self.policies.values().map(BTreeMap::len).sum()
    }

    /// Encode as a CBOR snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        to_cbor(self)
    }

    /// Decode a CBOR snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        from_cbor(bytes)
    }

    /// Verify the structural invariants of the store.
    ///
    /// Operations preserve these by construction; this is for snapshots
    /// loaded from outside.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(InvariantViolation::UnsupportedSchema {
                found: self.schema_version,
                supported: SCHEMA_VERSION,
            });
        }

        let mut registered = 0u64;
        for (key, member) in &self.members {
            if *key != member.id {
                return Err(InvariantViolation::MismatchedKey {
                    key: *key,
                    id: member.id,
                });
            }
            if member.funded && !member.registered {
                return Err(InvariantViolation::FundedNotRegistered(member.id));
            }
            if member.registered {
                registered += 1;
            }
        }

        if registered != self.registered_count {
            return Err(InvariantViolation::CountMismatch {
                recorded: self.registered_count,
                actual: registered,
            });
        }

        if !self.is_funded(&self.owner) {
            return Err(InvariantViolation::OwnerNotSeeded(self.owner));
        }

        if let Some(candidate) = self.ballots.keys().find(|c| self.is_registered(c)) {
            return Err(InvariantViolation::BallotForMember(*candidate));
        }

        for (flight, book) in &self.policies {
            for (payer, policy) in book {
                if policy.flight != *flight || policy.payer != *payer || policy.premium == 0 {
                    return Err(InvariantViolation::BadPolicy {
                        flight: *flight,
                        payer: *payer,
                    });
                }
            }
        }

        for (flight, book) in &self.credits {
            for payer in book.keys() {
                if self.policy(*flight, payer).is_none() {
                    return Err(InvariantViolation::OrphanCredit {
                        flight: *flight,
                        payer: *payer,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> AccountId {
        AccountId::from_label("owner")
    }

    #[test]
    fn test_new_seeds_owner() {
        let state = RegistryState::new(owner(), "Seed Air");

        assert!(state.operational);
        assert_eq!(state.registered_count, 1);
        assert!(state.is_registered(&owner()));
        assert!(state.is_funded(&owner()));

        let seed = state.member(&owner()).unwrap();
        assert_eq!(seed.contributed, 0);
        assert_eq!(seed.name, "Seed Air");
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_unknown_identity_is_neither_registered_nor_funded() {
        let state = RegistryState::new(owner(), "Seed Air");
        let stranger = AccountId::from_label("stranger");

        assert!(!state.is_registered(&stranger));
        assert!(!state.is_funded(&stranger));
        assert!(state.member(&stranger).is_none());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut state = RegistryState::new(owner(), "Seed Air");
        let payer = AccountId::from_label("passenger");
        state.policies.entry(FlightId(7)).or_default().insert(
            payer,
            InsurancePolicy {
                flight: FlightId(7),
                payer,
                premium: 500,
            },
        );
        state.escrow_balance = u128::MAX;

        let bytes = state.to_bytes().unwrap();
        let restored = RegistryState::from_bytes(&bytes).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_invariants_detect_funded_unregistered() {
        let mut state = RegistryState::new(owner(), "Seed Air");
        let rogue = AccountId::from_label("rogue");
        state.members.insert(
            rogue,
            MemberAccount {
                id: rogue,
                name: "Rogue".to_string(),
                registered: false,
                funded: true,
                contributed: 0,
            },
        );

        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::FundedNotRegistered(rogue))
        );
    }

    #[test]
    fn test_invariants_detect_count_mismatch() {
        let mut state = RegistryState::new(owner(), "Seed Air");
        state.registered_count = 3;

        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::CountMismatch {
                recorded: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn test_invariants_detect_ballot_for_member() {
        let mut state = RegistryState::new(owner(), "Seed Air");
        state
            .ballots
            .insert(owner(), AdmissionBallot::new(owner(), "Seed Air".to_string()));

        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::BallotForMember(owner()))
        );
    }

    #[test]
    fn test_invariants_detect_orphan_credit() {
        let mut state = RegistryState::new(owner(), "Seed Air");
        let payer = AccountId::from_label("passenger");
        state.credits.entry(FlightId(1)).or_default().insert(
            payer,
            Credit {
                amount: 1,
                paid: false,
            },
        );

        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::OrphanCredit {
                flight: FlightId(1),
                payer
            })
        );
    }

    #[test]
    fn test_invariants_reject_newer_schema() {
        let mut state = RegistryState::new(owner(), "Seed Air");
        state.schema_version = SCHEMA_VERSION + 1;

        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::UnsupportedSchema {
                found: SCHEMA_VERSION + 1,
                supported: SCHEMA_VERSION
            })
        );
    }
}
