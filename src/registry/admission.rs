//! Admission consensus.
//!
//! While the registry holds fewer than `BOOTSTRAP_MEMBER_LIMIT` members, any
//! funded member admits a candidate on their own. From then on a sponsor's
//! call is a vote, and the candidate is admitted once distinct approvals
//! reach `floor(registered_count / 2)`.
//!
//! The threshold is read at vote time, not fixed when the ballot opens, so
//! it moves with the registry while a ballot is pending. Each candidate has
//! its own tally; votes for one candidate never count toward another.

use crate::config::BOOTSTRAP_MEMBER_LIMIT;
use crate::error::{RegistryError, RegistryResult};
use crate::gatekeeper::{require_funded, require_operational, require_registered};
use crate::identity::AccountId;
use crate::registry::state::{AdmissionBallot, MemberAccount, RegistryState};
use tracing::{debug, info};

/// Result of a successful `propose_or_vote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// Candidate is now a registered member.
    Admitted,
    /// Vote recorded; the candidate still needs more approvals.
    Queued { approvals: usize, threshold: u64 },
}

/// Approvals needed for admission at the current registry size.
pub fn admission_threshold(registered_count: u64) -> u64 {
    registered_count / 2
}

/// Sponsor or vote for `candidate`.
///
/// Requires the registry to be operational and `sponsor` to be registered
/// and funded. Either admits the candidate or records the vote; on error
/// nothing changes.
pub fn propose_or_vote(
    state: &mut RegistryState,
    sponsor: &AccountId,
    candidate: AccountId,
    name: &str,
) -> RegistryResult<AdmissionOutcome> {
    require_operational(state)?;
    require_registered(state, sponsor)?;
    require_funded(state, sponsor)?;

    if state.is_registered(&candidate) {
        return Err(RegistryError::AlreadyRegistered(candidate));
    }

    if state.registered_count < BOOTSTRAP_MEMBER_LIMIT {
        admit(state, candidate, name.to_string())?;
        info!(
            candidate = %candidate.short(),
            sponsor = %sponsor.short(),
            registered = state.registered_count,
            "candidate admitted during bootstrap"
        );
        return Ok(AdmissionOutcome::Admitted);
    }

    let approvals = match state.ballots.get(&candidate) {
        Some(ballot) => {
            if ballot.name != name {
                return Err(RegistryError::CandidateNameMismatch {
                    candidate,
                    expected: ballot.name.clone(),
                    got: name.to_string(),
                });
            }
            if ballot.approvals.contains(sponsor) {
                return Err(RegistryError::DuplicateVote {
                    voter: *sponsor,
                    candidate,
                });
            }
            ballot.approvals.len() + 1
        }
        None => 1,
    };

    let threshold = admission_threshold(state.registered_count);
    if approvals as u64 >= threshold {
        admit(state, candidate, name.to_string())?;
        state.ballots.remove(&candidate);
        info!(
            candidate = %candidate.short(),
            approvals,
            threshold,
            registered = state.registered_count,
            "candidate admitted by vote"
        );
        return Ok(AdmissionOutcome::Admitted);
    }

    state
        .ballots
        .entry(candidate)
        .or_insert_with(|| AdmissionBallot::new(candidate, name.to_string()))
        .approvals
        .insert(*sponsor);
    debug!(
        candidate = %candidate.short(),
        voter = %sponsor.short(),
        approvals,
        threshold,
        "admission vote recorded"
    );

    Ok(AdmissionOutcome::Queued {
        approvals,
        threshold,
    })
}

/// Record `candidate` as a registered, unfunded member with nothing
/// contributed.
fn admit(state: &mut RegistryState, candidate: AccountId, name: String) -> RegistryResult<()> {
    let count = state
        .registered_count
        .checked_add(1)
        .ok_or(RegistryError::Overflow)?;
    state
        .members
        .insert(candidate, MemberAccount::admitted(candidate, name));
    state.registered_count = count;
    Ok(())
}
