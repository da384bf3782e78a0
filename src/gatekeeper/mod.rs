//! Gatekeeper: access preconditions for every mutating operation.
//!
//! - Operational: the global switch must be on
//! - Owner: only the deploying identity may flip the switch
//! - Registered / Funded: membership status of the caller
//!
//! Checks are evaluated operational → registered → funded so the most
//! fundamental failure is the one reported.

pub mod access;

pub use access::{
    require_funded, require_operational, require_owner, require_registered, set_operational,
};
