//! Property-based tests for the registry.
//!
//! - Bootstrap: every sponsored candidate is admitted while the registry is small
//! - Consensus: admission exactly when distinct approvals reach floor(n / 2)
//! - Funding: contributions never decrease and funded never reverts
//! - Escrow: one policy per (flight, payer), premium bounds enforced

use super::admission::{admission_threshold, propose_or_vote, AdmissionOutcome};
use super::funding::contribute;
use super::state::{MemberAccount, RegistryState};
use crate::config::{CustodyMode, RegistryConfig, BOOTSTRAP_MEMBER_LIMIT};
use crate::error::RegistryError;
use crate::escrow::{policy_amount, purchase_policy, FlightId};
use crate::identity::AccountId;
use crate::treasury::MockTreasury;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn id(n: usize) -> AccountId {
    AccountId::from_label(&format!("account-{}", n))
}

/// Registry of `n` registered and funded members, `id(0)` as owner.
fn funded_registry(n: usize) -> RegistryState {
    let mut state = RegistryState::new(id(0), "Member 0");
    for i in 1..n {
        let mut account = MemberAccount::admitted(id(i), format!("Member {}", i));
        account.funded = true;
        state.members.insert(id(i), account);
        state.registered_count += 1;
    }
    state
}

fn config(max_premium: u128, threshold: u128) -> RegistryConfig {
    RegistryConfig {
        funding_threshold: threshold,
        max_premium,
        custody: CustodyMode::Forward,
    }
}

proptest! {
    /// Property: below the bootstrap limit, each sponsorship admits exactly one member
    #[test]
    fn bootstrap_admits_immediately(extra in 1usize..(BOOTSTRAP_MEMBER_LIMIT as usize)) {
        let mut state = funded_registry(1);

        for i in 0..extra {
            let before = state.registered_count;
            let outcome = propose_or_vote(&mut state, &id(0), id(100 + i), "Air").unwrap();
            prop_assert_eq!(outcome, AdmissionOutcome::Admitted);
            prop_assert_eq!(state.registered_count, before + 1);
        }
        prop_assert!(state.check_invariants().is_ok());
    }

    /// Property: a candidate is admitted on exactly the vote that reaches floor(n/2)
    #[test]
    fn admission_at_half_of_registry(
        size in 4usize..12,
        voters in prop::collection::vec(0usize..12, 1..24),
    ) {
        let mut state = funded_registry(size);
        let threshold = admission_threshold(size as u64) as usize;
        let candidate = id(1_000);
        let mut distinct = BTreeSet::new();
        let mut admitted = false;

        for v in voters.into_iter().filter(|v| *v < size) {
            let result = propose_or_vote(&mut state, &id(v), candidate, "Candidate Air");
            if state.is_registered(&candidate) {
                prop_assert_eq!(result, Ok(AdmissionOutcome::Admitted));
                prop_assert!(!distinct.contains(&v));
                prop_assert_eq!(distinct.len() + 1, threshold);
                admitted = true;
                break;
            }
            if distinct.insert(v) {
                prop_assert_eq!(
                    result,
                    Ok(AdmissionOutcome::Queued {
                        approvals: distinct.len(),
                        threshold: threshold as u64,
                    })
                );
            } else {
                let is_duplicate = matches!(result, Err(RegistryError::DuplicateVote { .. }));
                prop_assert!(is_duplicate);
            }
        }

        prop_assert_eq!(state.is_registered(&candidate), admitted);
        prop_assert_eq!(state.ballots.contains_key(&candidate), !admitted && !distinct.is_empty());
        prop_assert!(state.check_invariants().is_ok());
    }

    /// Property: votes for one candidate never move another candidate's tally
    #[test]
    fn tallies_are_independent(
        size in 6usize..12,
        votes in prop::collection::vec((0usize..12, any::<bool>()), 1..30),
    ) {
        let mut state = funded_registry(size);
        let x = id(2_000);
        let y = id(2_001);

        for (voter, for_x) in votes.into_iter().filter(|(v, _)| *v < size) {
            let (target, other) = if for_x { (x, y) } else { (y, x) };
            let other_before = state.ballots.get(&other).map(|b| b.approvals.clone());
            let other_registered = state.is_registered(&other);

            let _ = propose_or_vote(&mut state, &id(voter), target, "Air");

            if !other_registered && !state.is_registered(&other) {
                let other_after = state.ballots.get(&other).map(|b| b.approvals.clone());
                prop_assert_eq!(other_before, other_after);
            }
        }
        prop_assert!(state.check_invariants().is_ok());
    }

    /// Property: contributions are monotone and funded flips exactly at the threshold
    #[test]
    fn funding_is_monotone(
        threshold in 1u128..10_000,
        amounts in prop::collection::vec(0u128..3_000, 1..20),
    ) {
        let mut state = funded_registry(1);
        let airline = id(1);
        state.members.insert(airline, MemberAccount::admitted(airline, "Air".to_string()));
        state.registered_count += 1;
        let config = config(1, threshold);
        let mut treasury = MockTreasury::new();

        let mut previous = 0u128;
        let mut was_funded = false;
        for amount in amounts {
            let outcome = contribute(&mut state, &config, &mut treasury, &airline, amount).unwrap();
            prop_assert!(outcome.contributed >= previous);
            prop_assert_eq!(outcome.funded, outcome.contributed >= threshold);
            prop_assert!(!was_funded || outcome.funded);
            prop_assert_eq!(outcome.newly_funded, outcome.funded && !was_funded);
            previous = outcome.contributed;
            was_funded = outcome.funded;
        }
        prop_assert_eq!(treasury.forwarded_to(&id(0)), previous);
    }

    /// Property: a second purchase for the same pair always fails, whatever the premium
    #[test]
    fn one_policy_per_pair(
        flight in any::<u64>(),
        first in 1u128..=1_000,
        second in any::<u128>(),
    ) {
        let mut state = funded_registry(1);
        let config = config(1_000, 1);
        let mut treasury = MockTreasury::new();
        let payer = id(7);

        purchase_policy(&mut state, &config, &mut treasury, &payer, FlightId(flight), first).unwrap();
        let result = purchase_policy(&mut state, &config, &mut treasury, &payer, FlightId(flight), second);

        let is_already_insured = matches!(result, Err(RegistryError::AlreadyInsured { .. }));
        prop_assert!(is_already_insured);
        prop_assert_eq!(policy_amount(&state, &payer, FlightId(flight)), first);
    }

    /// Property: premiums in 1..=max are accepted, 0 and anything above max rejected
    #[test]
    fn premium_bounds(max in 1u128..1_000_000, premium in any::<u128>()) {
        let mut state = funded_registry(1);
        let config = config(max, 1);
        let mut treasury = MockTreasury::new();

        let result = purchase_policy(&mut state, &config, &mut treasury, &id(3), FlightId(1), premium);

        if premium == 0 {
            prop_assert_eq!(result, Err(RegistryError::ZeroPremium));
        } else if premium > max {
            prop_assert_eq!(result, Err(RegistryError::PremiumTooHigh { premium, max }));
        } else {
            prop_assert_eq!(result, Ok(()));
            prop_assert_eq!(policy_amount(&state, &id(3), FlightId(1)), premium);
        }
    }
}
