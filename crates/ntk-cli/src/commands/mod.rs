//! Command handler modules for the `ntk` binary.
//!
//! Shared utilities used by multiple command paths live here.

pub mod config_hash;
pub mod replay;

use anyhow::Result;
use ntk_config::{load_layered_yaml, UnusedKeyPolicy};
use ntk_roster::RosterConfig;

/// Roster tuning plus the hash of the document it came from.
pub struct ResolvedConfig {
    pub roster: RosterConfig,
    pub config_hash: Option<String>,
}

/// Load and validate layered config. No paths means built-in defaults.
/// Unknown roster keys are logged, not fatal.
pub fn resolve_config(paths: &[String]) -> Result<ResolvedConfig> {
    if paths.is_empty() {
        return Ok(ResolvedConfig {
            roster: RosterConfig::default(),
            config_hash: None,
        });
    }

    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_layered_yaml(&path_refs)?;
    ntk_config::report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    let roster = loaded.roster()?;

    Ok(ResolvedConfig {
        roster,
        config_hash: Some(loaded.config_hash),
    })
}
