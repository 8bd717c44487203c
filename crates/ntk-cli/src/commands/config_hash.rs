//! `ntk config-hash`: print the hash and canonical JSON of layered config.

use anyhow::Result;

pub fn run(paths: &[String]) -> Result<()> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = ntk_config::load_layered_yaml(&path_refs)?;
    // Refuse to hash tuning that a replay would reject.
    loaded.roster()?;

    println!("config_hash={}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}
