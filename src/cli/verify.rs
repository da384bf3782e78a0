use super::config::{resolve_config_path, OperatorConfig};
use super::snapshot;
use flightsure::config::CustodyMode;

/// Verify the registry
///
/// Checks that:
/// - The config file parses and its parameters are valid
/// - The snapshot decodes
/// - The snapshot's owner matches the configured owner
/// - No escrow balance is stranded under `Forward` custody
/// - The snapshot's state invariants hold (funded ⇒ registered, member
///   count, owner seeded, no ballot for an existing member, policies filed
///   under their own flight and payer)
pub fn execute(config_path: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = resolve_config_path(config_path);

    println!("🔍 Verifying Flightsure registry...");
    println!();

    print!("  Config: ");
    let config = match OperatorConfig::load(&config_path) {
        Ok(config) => {
            println!("✅ {}", config_path.display());
            config
        }
        Err(e) => {
            println!("❌ {}", e);
            return Err("Verification failed".into());
        }
    };
    super::init_logging(&config.logging)?;

    print!("  Snapshot: ");
    let state = match snapshot::load(&config.storage.snapshot_path) {
        Ok(state) => {
            println!("✅ {}", config.storage.snapshot_path.display());
            state
        }
        Err(e) => {
            println!("❌ {}", e);
            return Err("Verification failed".into());
        }
    };

    let mut all_ok = true;

    print!("  Owner: ");
    if state.owner == config.registry.owner_id() {
        println!("✅ {}", state.owner.short());
    } else {
        println!(
            "❌ snapshot owner {} does not match configured owner {}",
            state.owner.short(),
            config.registry.owner_id().short()
        );
        all_ok = false;
    }

    print!("  Invariants: ");
    match state.check_invariants() {
        Ok(()) => println!(
            "✅ {} members, {} policies",
            state.registered_count,
            state.policy_count()
        ),
        Err(e) => {
            println!("❌ {}", e);
            all_ok = false;
        }
    }

    print!("  Custody: ");
    if config.parameters.custody == CustodyMode::Forward && state.escrow_balance > 0 {
        println!(
            "❌ {} held in escrow but custody is forward; switch back to retain to pay it out",
            state.escrow_balance
        );
        all_ok = false;
    } else {
        println!("✅ {:?}", config.parameters.custody);
    }

    println!();
    if all_ok {
        println!("✅ All checks passed");
        Ok(())
    } else {
        Err("Verification failed".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightsure::identity::AccountId;
    use flightsure::registry::RegistryState;
    use tempfile::TempDir;

    fn init(temp_dir: &TempDir) -> (std::path::PathBuf, Option<String>) {
        let config_path = temp_dir.path().join("config.toml");
        let path = Some(config_path.to_string_lossy().to_string());
        super::super::init::execute(path.clone(), "seed-air".to_string(), false).unwrap();
        (config_path, path)
    }

    #[test]
    fn test_verify_fresh_registry() {
        let temp_dir = TempDir::new().unwrap();
        let (_, path) = init(&temp_dir);

        assert!(execute(path).is_ok());
    }

    #[test]
    fn test_verify_detects_foreign_owner() {
        let temp_dir = TempDir::new().unwrap();
        let (config_path, path) = init(&temp_dir);
        let config = OperatorConfig::load(&config_path).unwrap();

        let other = RegistryState::new(AccountId::from_label("someone-else"), "Other");
        snapshot::save(&config.storage.snapshot_path, &other).unwrap();

        assert!(execute(path).is_err());
    }

    #[test]
    fn test_verify_detects_broken_invariant() {
        let temp_dir = TempDir::new().unwrap();
        let (config_path, path) = init(&temp_dir);
        let config = OperatorConfig::load(&config_path).unwrap();

        let mut state = snapshot::load(&config.storage.snapshot_path).unwrap();
        state.registered_count = 9;
        snapshot::save(&config.storage.snapshot_path, &state).unwrap();

        assert!(execute(path).is_err());
    }

    #[test]
    fn test_verify_detects_stranded_escrow() {
        let temp_dir = TempDir::new().unwrap();
        let (config_path, path) = init(&temp_dir);
        let config = OperatorConfig::load(&config_path).unwrap();

        // Funds retained under an earlier retain-custody run.
        let mut state = snapshot::load(&config.storage.snapshot_path).unwrap();
        state.escrow_balance = 500;
        snapshot::save(&config.storage.snapshot_path, &state).unwrap();

        assert!(execute(path.clone()).is_err());

        let retain = std::fs::read_to_string(&config_path)
            .unwrap()
            .replace("custody = \"forward\"", "custody = \"retain\"");
        std::fs::write(&config_path, retain).unwrap();
        assert!(execute(path).is_ok());
    }
}
