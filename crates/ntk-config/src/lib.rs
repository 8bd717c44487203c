//! ntk-config
//!
//! Layered YAML configuration for roster tuning.
//!
//! Documents are merged in order (later layers override earlier ones, maps
//! merge recursively), canonicalized to JSON and hashed with SHA-256 so a
//! replay can say exactly which tuning produced it. The `roster` section is
//! extracted into [`RosterConfig`] and validated; keys under it that nothing
//! reads are reported or rejected by [`UnusedKeyPolicy`].

mod consumption;

use anyhow::{bail, Context, Result};
use ntk_roster::RosterConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use tracing::warn;

pub use consumption::{consumed_pointers, ROSTER_ROOT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Consumed JSON-pointer prefixes used for this analysis (sorted, unique)
    pub consumed_prefixes: Vec<String>,
    /// Unused leaf pointers under the roster section (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    /// Validated roster tuning from this document.
    pub fn roster(&self) -> Result<RosterConfig> {
        roster_config(&self.config_json)
    }
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        // An empty document parses as null; treat it as "no overrides".
        if !v_json.is_null() {
            merged = deep_merge(merged, v_json);
        }
    }

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Extract and validate the `roster` section. A missing section yields the
/// defaults; missing fields inside it take their default values.
pub fn roster_config(config_json: &Value) -> Result<RosterConfig> {
    let config = match config_json.pointer(ROSTER_ROOT) {
        None | Some(Value::Null) => RosterConfig::default(),
        Some(section) => serde_json::from_value(section.clone())
            .context("CONFIG_INVALID roster section does not parse")?,
    };
    validate_roster_config(&config)?;
    Ok(config)
}

pub fn validate_roster_config(config: &RosterConfig) -> Result<()> {
    if config.similarity_threshold > 100 {
        bail!(
            "CONFIG_INVALID roster.similarity_threshold={} (must be <= 100)",
            config.similarity_threshold
        );
    }
    if config.max_age_secs == 0 {
        bail!("CONFIG_INVALID roster.max_age_secs=0 (must be > 0)");
    }
    if config.max_length == 0 {
        bail!("CONFIG_INVALID roster.max_length=0 (must be > 0)");
    }
    Ok(())
}

/// Report leaves under the roster section that no code reads.
/// `Fail` turns a non-clean report into an error; `Warn` logs each leaf and
/// returns the report.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<String> = consumed_pointers()
        .iter()
        .map(|p| normalize_pointer(p))
        .collect();
    let consumed_prefixes: Vec<String> = consumed.into_iter().collect();

    let mut leaves: Vec<String> = Vec::new();
    if let Some(section) = config_json.pointer(ROSTER_ROOT) {
        collect_leaf_pointers(section, ROSTER_ROOT, &mut leaves);
    }

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|leaf| !consumed_prefixes.iter().any(|cp| is_prefix_pointer(cp, leaf)))
        .collect();
    unused.sort();
    unused.dedup();

    let report = UnusedKeyReport {
        consumed_prefixes,
        unused_leaf_pointers: unused,
    };

    if report.is_clean() {
        return Ok(report);
    }

    match policy {
        UnusedKeyPolicy::Fail => bail!(
            "CONFIG_UNUSED_KEYS: {} unused roster key(s) detected. \
            Remove them or update the consumed registry. First few: {}",
            report.unused_leaf_pointers.len(),
            preview_list(&report.unused_leaf_pointers, 12)
        ),
        UnusedKeyPolicy::Warn => {
            for leaf in &report.unused_leaf_pointers {
                warn!(pointer = %leaf, "unused roster config key");
            }
            Ok(report)
        }
    }
}

/// Normalize JSON pointer:
/// - must begin with "/"
/// - no trailing "/" unless it's just "/"
fn normalize_pointer(p: &str) -> String {
    let mut s = p.trim().to_string();
    if s.is_empty() {
        return "/".to_string();
    }
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    while s.ends_with('/') && s.len() > 1 {
        s.pop();
    }
    s
}

/// `"/a/b"` consumes `"/a/b"` and `"/a/b/c"` but not `"/a/bc"`.
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if prefix == "/" || leaf == prefix {
        return true;
    }
    leaf.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'))
}

fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) => {
            for (k, vv) in map.iter() {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        Value::Array(arr) => {
            for (i, vv) in arr.iter().enumerate() {
                let next = format!("{}/{}", prefix, i);
                collect_leaf_pointers(vv, &next, out);
            }
        }
        _ => {
            let p = if prefix.is_empty() {
                "/".to_string()
            } else {
                prefix.to_string()
            };
            out.push(p);
        }
    }
}

fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

fn preview_list(items: &[String], n: usize) -> String {
    let take = items.iter().take(n).cloned().collect::<Vec<_>>();
    format!("{:?}", take)
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

fn canonicalize_json(v: &Value) -> Result<String> {
    // serde_json::Map is key-sorted (no `preserve_order`), so source key
    // order never reaches the hash.
    serde_json::to_string(v).context("canonical json serialize failed")
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_prefix_respects_token_boundary() {
        assert!(is_prefix_pointer("/roster/max_length", "/roster/max_length"));
        assert!(is_prefix_pointer("/roster", "/roster/max_length"));
        assert!(!is_prefix_pointer("/roster/max_length", "/roster/max_lengths"));
        assert!(is_prefix_pointer("/", "/anything"));
    }

    #[test]
    fn pointers_are_normalized() {
        assert_eq!(normalize_pointer("roster/"), "/roster");
        assert_eq!(normalize_pointer(""), "/");
    }

    #[test]
    fn deep_merge_overrides_leaves_and_keeps_siblings() {
        let base = serde_json::json!({"roster": {"max_length": 12, "max_age_secs": 300}});
        let overlay = serde_json::json!({"roster": {"max_length": 20}});
        let merged = deep_merge(base, overlay);
        assert_eq!(
            merged,
            serde_json::json!({"roster": {"max_length": 20, "max_age_secs": 300}})
        );
    }
}
