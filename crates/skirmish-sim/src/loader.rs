//! Level and actor-catalog loaders. JSON on disk, read-only once loaded.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use skirmish_core::config::{ActorCatalog, LevelDetails};

/// Parse and validate level JSON.
pub fn parse_level_details(json: &str) -> Result<LevelDetails> {
    let details: LevelDetails = serde_json::from_str(json).context("parse level json")?;
    details
        .validate()
        .map_err(|reason| anyhow!("invalid level '{}': {reason}", details.name))?;
    Ok(details)
}

/// Read a level file.
pub fn load_level_details(path: impl AsRef<Path>) -> Result<LevelDetails> {
    let path = path.as_ref();
    let txt = fs::read_to_string(path).with_context(|| format!("read level: {}", path.display()))?;
    let details = parse_level_details(&txt).with_context(|| format!("load level: {}", path.display()))?;
    log::info!(
        "loaded level '{}' from {}: {} waves, {} spawns",
        details.name,
        path.display(),
        details.total_waves(),
        details.total_spawns()
    );
    Ok(details)
}

/// Read an actor catalog file.
pub fn load_actor_catalog(path: impl AsRef<Path>) -> Result<ActorCatalog> {
    let path = path.as_ref();
    let txt = fs::read_to_string(path).with_context(|| format!("read catalog: {}", path.display()))?;
    let catalog: ActorCatalog = serde_json::from_str(&txt).context("parse catalog json")?;
    log::info!("loaded {} actor templates from {}", catalog.templates.len(), path.display());
    Ok(catalog)
}
