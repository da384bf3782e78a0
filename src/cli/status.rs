use super::config::{resolve_config_path, OperatorConfig};
use super::snapshot;
use flightsure::config::CustodyMode;
use serde::Serialize;

/// Registry counters read from the snapshot.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub owner: String,
    pub owner_name: String,
    pub operational: bool,
    pub registered_count: u64,
    pub funded_count: usize,
    pub pending_ballots: usize,
    pub flights: usize,
    pub policies: usize,
    #[serde(with = "flightsure::serialization::amount")]
    pub escrow_balance: u128,
    pub custody: CustodyMode,
}

impl StatusReport {
    pub fn collect(config: &OperatorConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let state = snapshot::load(&config.storage.snapshot_path)?;
        let owner_name = state
            .member(&state.owner)
            .map(|m| m.name.clone())
            .unwrap_or_default();

        Ok(Self {
            owner: state.owner.to_string(),
            owner_name,
            operational: state.operational,
            registered_count: state.registered_count,
            funded_count: state.members.values().filter(|m| m.funded).count(),
            pending_ballots: state.ballots.len(),
            flights: state.policies.len(),
            policies: state.policy_count(),
            escrow_balance: state.escrow_balance,
            custody: config.parameters.custody,
        })
    }
}

/// Show registry status
///
/// Displays the owner, operational flag, membership counts, pending
/// admission ballots, policy counts and the retained escrow balance.
pub fn execute(config_path: Option<String>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = OperatorConfig::load(&resolve_config_path(config_path))?;
    super::init_logging(&config.logging)?;

    let report = StatusReport::collect(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("📊 Flightsure Registry Status");
    println!();
    println!("  Owner: {} ({})", report.owner_name, report.owner);
    if report.operational {
        println!("  ✅ Operational");
    } else {
        println!("  ⏸️  Paused");
    }
    println!(
        "  Members: {} registered, {} funded",
        report.registered_count, report.funded_count
    );
    println!("  Pending ballots: {}", report.pending_ballots);
    println!(
        "  Policies: {} across {} flights",
        report.policies, report.flights
    );
    println!(
        "  Escrow balance: {} ({:?} custody)",
        report.escrow_balance, report.custody
    );

    Ok(())
}
