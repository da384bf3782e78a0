//! Registry parameters.
//!
//! `RegistryConfig` is supplied by the host on every start and is not stored
//! in the snapshot. The operator binary reads it from the `[parameters]`
//! section of its config file. Keep the parameters fixed for the life of a
//! registry: switching `custody` from `Retain` to `Forward` strands any
//! `escrow_balance`, which `flightsure verify` reports.

use serde::{Deserialize, Serialize};

/// One whole unit at 18 decimals.
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// Registry size below which a sponsor admits a candidate without a vote.
pub const BOOTSTRAP_MEMBER_LIMIT: u64 = 4;

/// Where incoming contributions and premiums go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustodyMode {
    /// Forward every incoming amount to the owner immediately. Payouts are
    /// drawn from a reserve outside the registry.
    #[default]
    Forward,

    /// Keep incoming amounts in the registry's escrow balance. Payouts debit
    /// that balance.
    Retain,
}

/// Registry parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Cumulative contribution at which a member becomes funded.
    #[serde(
        default = "default_funding_threshold",
        with = "crate::serialization::amount"
    )]
    pub funding_threshold: u128,

    /// Largest premium a single policy may carry.
    #[serde(default = "default_max_premium", with = "crate::serialization::amount")]
    pub max_premium: u128,

    /// Custody of incoming funds.
    #[serde(default)]
    pub custody: CustodyMode,
}

fn default_funding_threshold() -> u128 {
    10 * UNIT
}

fn default_max_premium() -> u128 {
    UNIT
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            funding_threshold: default_funding_threshold(),
            max_premium: default_max_premium(),
            custody: CustodyMode::default(),
        }
    }
}

/// Invalid registry parameters.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("funding_threshold must be greater than zero")]
    ZeroFundingThreshold,

    #[error("max_premium must be greater than zero")]
    ZeroMaxPremium,
}

impl RegistryConfig {
    /// Check the parameters describe a usable registry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.funding_threshold == 0 {
            return Err(ConfigError::ZeroFundingThreshold);
        }
        if self.max_premium == 0 {
            return Err(ConfigError::ZeroMaxPremium);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.funding_threshold, 10 * UNIT);
        assert_eq!(config.max_premium, UNIT);
        assert_eq!(config.custody, CustodyMode::Forward);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let config = RegistryConfig {
            funding_threshold: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFundingThreshold));

        let config = RegistryConfig {
            max_premium: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxPremium));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RegistryConfig = toml::from_str("custody = \"retain\"").unwrap();
        assert_eq!(config.custody, CustodyMode::Retain);
        assert_eq!(config.funding_threshold, 10 * UNIT);
        assert_eq!(config.max_premium, UNIT);
    }

    #[test]
    fn test_amounts_above_i64_survive_toml() {
        let config = RegistryConfig {
            funding_threshold: 50 * UNIT,
            max_premium: 2 * UNIT,
            custody: CustodyMode::Forward,
        };
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("\"50000000000000000000\""));

        let loaded: RegistryConfig = toml::from_str(&text).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_integer_amounts_accepted() {
        let config: RegistryConfig = toml::from_str("max_premium = 500").unwrap();
        assert_eq!(config.max_premium, 500);
    }
}
