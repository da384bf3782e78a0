//! Flightsure operator configuration file handling
//!
//! Provides default configuration generation and loading for the operator
//! CLI. Configuration files are TOML and live under the data directory by
//! default (`~/.local/share/flightsure/config.toml` on Linux).
//!
//! ## Operator vs Registry State
//!
//! This file names the owner identity, where the registry snapshot lives,
//! and the registry parameters (funding threshold, premium cap, custody).
//! Membership, ballots and policies are NOT here: they live in the snapshot
//! and change only through registry operations.

use flightsure::config::RegistryConfig;
use flightsure::identity::AccountId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default snapshot file name, adjacent to the config file
const SNAPSHOT_FILE: &str = "registry.cbor";

/// Operator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Registry identity
    pub registry: RegistrySection,

    /// Registry parameters
    #[serde(default)]
    pub parameters: RegistryConfig,

    /// Snapshot storage
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Who owns the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySection {
    /// Owner identity: 64 hex chars, or any other label (hashed into an id)
    pub owner: String,

    /// Display name of the seed member
    #[serde(default = "default_owner_name")]
    pub owner_name: String,
}

/// Snapshot storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the CBOR registry snapshot
    pub snapshot_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

fn default_owner_name() -> String {
    "Seed Airline".to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

impl RegistrySection {
    /// Resolve the configured owner to an identity.
    pub fn owner_id(&self) -> AccountId {
        self.owner
            .parse()
            .unwrap_or_else(|_| AccountId::from_label(&self.owner))
    }
}

impl OperatorConfig {
    /// Create a new configuration for `owner` storing its snapshot at `snapshot_path`
    #[allow(dead_code)]
    pub fn new(owner: String, snapshot_path: PathBuf) -> Self {
        Self {
            registry: RegistrySection {
                owner,
                owner_name: default_owner_name(),
            },
            parameters: RegistryConfig::default(),
            storage: StorageConfig { snapshot_path },
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: OperatorConfig = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        config
            .parameters
            .validate()
            .map_err(|e| format!("Invalid config file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    #[allow(dead_code)]
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(path, contents)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        Ok(())
    }

    /// Generate default configuration content as a string with comments
    pub fn generate_default_toml(owner: &str, snapshot_path: &Path) -> String {
        format!(
            r#"# Flightsure Registry Configuration (Operator Settings)
#
# Membership, admission ballots and insurance policies are NOT configured
# here. They live in the registry snapshot and change only through registry
# operations (admission votes, contributions, policy purchases).

[registry]
# Owner identity: 64 hex characters, or any stable label (hashed into an id).
# The owner is the seed member and the only caller allowed to pause the registry.
owner = "{owner}"
owner_name = "Seed Airline"

[parameters]
# Contribution (smallest units) at which a member becomes funded.
# Amounts are strings because they can exceed 64 bits.
funding_threshold = "10000000000000000000"

# Largest premium a single policy may carry.
max_premium = "1000000000000000000"

# Custody of incoming contributions and premiums. Keep this fixed once the
# registry holds funds: retained escrow is only paid out in "retain" mode.
#   "forward" - forward to the owner at once; payouts come from an external reserve
#   "retain"  - keep in the registry's escrow balance; payouts debit it
custody = "forward"

[storage]
# CBOR snapshot of registry state
snapshot_path = "{snapshot_path}"

[logging]
# Log level: trace, debug, info, warn, error (RUST_LOG overrides)
level = "info"

# Log file path (optional, logs to stderr if not specified)
# file = "/var/log/flightsure/flightsure.log"
"#,
            owner = owner,
            snapshot_path = snapshot_path.display()
        )
    }

    /// Create and save a default configuration file
    pub fn create_default(
        config_path: &Path,
        owner: &str,
        snapshot_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let contents = Self::generate_default_toml(owner, snapshot_path);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(config_path, contents).map_err(|e| {
            format!(
                "Failed to write config file '{}': {}",
                config_path.display(),
                e
            )
        })?;

        Ok(())
    }
}

/// Get the default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flightsure")
}

/// Get the default config file path
pub fn default_config_path() -> PathBuf {
    default_data_dir().join("config.toml")
}

/// Get the default snapshot path for a config file
///
/// The snapshot is stored adjacent to the config:
/// - Config: ~/.local/share/flightsure/config.toml
/// - Snapshot: ~/.local/share/flightsure/registry.cbor
pub fn default_snapshot_path(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(SNAPSHOT_FILE)
}

/// Use the given config path or fall back to the default
pub fn resolve_config_path(config_path: Option<String>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}
