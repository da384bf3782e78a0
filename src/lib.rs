//! Flightsure - Permissioned Airline Registry and Flight Insurance Escrow
//!
//! Airlines join a registry by consensus among existing funded members, and
//! passengers buy premium-bounded policies against individual flights.
//!
//! Key principles:
//! - One owned store (`RegistryState`), passed explicitly to every operation
//! - Caller identity is an explicit argument, authenticated by the host
//! - Every operation commits fully or fails with no state change
//! - Funds movement goes through a host-supplied `Treasury`

pub mod config;
pub mod error;
pub mod escrow;
pub mod gatekeeper;
pub mod identity;
pub mod registry;
pub mod serialization;
pub mod treasury;

pub use config::{CustodyMode, RegistryConfig};
pub use error::{RegistryError, RegistryResult};
pub use escrow::{FlightId, FlightStatus, InsurancePolicy, PayoutStrategy};
pub use identity::AccountId;
pub use registry::{
    AdmissionOutcome, FlightRegistry, FundingOutcome, RegistryState, ResumeError,
};
pub use treasury::{LedgerTreasury, MockTreasury, Treasury};
