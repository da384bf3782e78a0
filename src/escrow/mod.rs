//! Insurance escrow: one premium per (flight, payer), and the payout hooks
//! that read from those records.

pub mod payout;
pub mod policy;

use crate::identity::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use payout::{credit_insurees, pay_insuree, PayoutStrategy};
pub use policy::{policy_amount, purchase_policy};

/// Opaque flight key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlightId(pub u64);

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A passenger's premium payment against one flight.
///
/// Written once; the premium never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub flight: FlightId,
    pub payer: AccountId,
    pub premium: u128,
}

/// Amount owed to an insuree after a flight is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub amount: u128,
    pub paid: bool,
}

/// Reported outcome of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightStatus {
    Unknown,
    OnTime,
    LateAirline,
    LateWeather,
    LateTechnical,
    LateOther,
}

impl FlightStatus {
    /// Numeric status code as reported by flight-status sources.
    pub fn code(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::OnTime => 10,
            Self::LateAirline => 20,
            Self::LateWeather => 30,
            Self::LateTechnical => 40,
            Self::LateOther => 50,
        }
    }

    /// Parse a status code. Unrecognised codes yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            10 => Some(Self::OnTime),
            20 => Some(Self::LateAirline),
            30 => Some(Self::LateWeather),
            40 => Some(Self::LateTechnical),
            50 => Some(Self::LateOther),
            _ => None,
        }
    }
}
