use super::config::{default_snapshot_path, resolve_config_path, OperatorConfig};
use super::snapshot;
use flightsure::registry::RegistryState;
use tracing::info;

/// Initialize a registry
///
/// Writes a default config file and a fresh snapshot in which the owner is
/// the only member, registered and funded, with the registry operational.
///
/// Refuses to overwrite an existing config or snapshot unless `force` is set.
pub fn execute(
    config_path: Option<String>,
    owner: String,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = resolve_config_path(config_path);
    let snapshot_path = default_snapshot_path(&config_path);

    if !force {
        for existing in [&config_path, &snapshot_path] {
            if existing.exists() {
                return Err(format!(
                    "'{}' already exists. Use --force to overwrite.",
                    existing.display()
                )
                .into());
            }
        }
    }

    OperatorConfig::create_default(&config_path, &owner, &snapshot_path)?;
    let config = OperatorConfig::load(&config_path)?;
    super::init_logging(&config.logging)?;

    let owner_id = config.registry.owner_id();
    let state = RegistryState::new(owner_id, config.registry.owner_name.clone());
    snapshot::save(&config.storage.snapshot_path, &state)?;

    info!(owner = %owner_id.short(), "registry initialized");

    println!("✅ Registry initialized");
    println!("   Config:   {}", config_path.display());
    println!("   Snapshot: {}", config.storage.snapshot_path.display());
    println!("   Owner:    {}", owner_id);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightsure::identity::AccountId;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_config_and_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        execute(
            Some(config_path.to_string_lossy().to_string()),
            "seed-air".to_string(),
            false,
        )
        .unwrap();

        let config = OperatorConfig::load(&config_path).unwrap();
        let state = snapshot::load(&config.storage.snapshot_path).unwrap();
        let owner = AccountId::from_label("seed-air");

        assert_eq!(state.owner, owner);
        assert!(state.is_funded(&owner));
        assert_eq!(state.registered_count, 1);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let path = Some(config_path.to_string_lossy().to_string());

        execute(path.clone(), "seed-air".to_string(), false).unwrap();

        let err = execute(path.clone(), "other".to_string(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        execute(path, "other".to_string(), true).unwrap();
        let config = OperatorConfig::load(&config_path).unwrap();
        assert_eq!(config.registry.owner, "other");
    }
}
