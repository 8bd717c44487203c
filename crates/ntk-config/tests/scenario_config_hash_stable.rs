//! Config hash stability: identical tuning hashes identically regardless of
//! key order, and any value change moves the hash.

use ntk_config::load_layered_yaml_from_strings;

const BASE_YAML: &str = r#"
roster:
  max_length: 12
  max_age_secs: 300
  similarity_threshold: 80
capture:
  source: "scoreboard"
"#;

const BASE_YAML_REORDERED: &str = r#"
capture:
  source: "scoreboard"
roster:
  similarity_threshold: 80
  max_age_secs: 300
  max_length: 12
"#;

const OVERLAY_YAML: &str = r#"
roster:
  max_age_secs: 120
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let original = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let reordered = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();

    assert_eq!(
        original.config_hash, reordered.config_hash,
        "key order in the source must not change the hash"
    );
}

#[test]
fn different_values_produce_different_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();

    assert_ne!(a.config_hash, b.config_hash);
}

#[test]
fn overlay_overrides_base_and_keeps_siblings() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    let roster = loaded.roster().unwrap();

    assert_eq!(roster.max_age_secs, 120, "overlay wins");
    assert_eq!(roster.max_length, 12, "base value survives the merge");
    assert_eq!(roster.similarity_threshold, 80);
}

#[test]
fn hash_is_64_hex_chars() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(loaded.config_hash.len(), 64);
    assert!(loaded.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn empty_layer_is_a_no_op() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, ""]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
}
