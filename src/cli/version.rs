use flightsure::registry::state::SCHEMA_VERSION;

/// Version banner lines: package version and the snapshot schema it writes.
pub fn banner() -> Vec<String> {
    vec![
        format!("flightsure {}", env!("CARGO_PKG_VERSION")),
        "Operator CLI for the Flightsure airline registry".to_string(),
        format!("Snapshot schema: v{}", SCHEMA_VERSION),
    ]
}

/// Display version information
pub fn execute() {
    for line in banner() {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_names_package_and_schema() {
        let lines = banner();
        assert_eq!(lines[0], format!("flightsure {}", env!("CARGO_PKG_VERSION")));
        assert!(lines[2].ends_with(&format!("v{}", SCHEMA_VERSION)));
    }
}
