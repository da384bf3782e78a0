//! Reading and writing the registry snapshot file.

use flightsure::registry::RegistryState;
use std::fs;
use std::path::Path;

/// Load a CBOR snapshot.
pub fn load(path: &Path) -> Result<RegistryState, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)
        .map_err(|e| format!("Failed to read snapshot '{}': {}", path.display(), e))?;
    let state = RegistryState::from_bytes(&bytes)
        .map_err(|e| format!("Failed to decode snapshot '{}': {}", path.display(), e))?;
    Ok(state)
}

/// Write a CBOR snapshot, creating parent directories.
pub fn save(path: &Path, state: &RegistryState) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = state.to_bytes()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create snapshot directory: {}", e))?;
    }

    fs::write(path, bytes)
        .map_err(|e| format!("Failed to write snapshot '{}': {}", path.display(), e))?;

    Ok(())
}
