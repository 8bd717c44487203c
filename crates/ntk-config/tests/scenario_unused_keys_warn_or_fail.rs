use ntk_config::{load_layered_yaml_from_strings, report_unused_keys, UnusedKeyPolicy};

const NOISY_YAML: &str = r#"
roster:
  max_length: 12
  max_lenght: 14
  ocr:
    engine: "tesseract"
capture:
  source: "scoreboard"
"#;

#[test]
fn warn_mode_reports_unused_keys_without_error() {
    let loaded = load_layered_yaml_from_strings(&[NOISY_YAML]).unwrap();

    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)
        .expect("warn mode must not error");

    assert_eq!(
        report.unused_leaf_pointers,
        vec!["/roster/max_lenght".to_string(), "/roster/ocr/engine".to_string()],
        "only keys under the roster section are checked, sorted"
    );
}

#[test]
fn fail_mode_errors_on_unused_keys() {
    let loaded = load_layered_yaml_from_strings(&[NOISY_YAML]).unwrap();

    let err = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("CONFIG_UNUSED_KEYS"), "{msg}");
    assert!(msg.contains("/roster/max_lenght"), "{msg}");
}

#[test]
fn known_keys_are_clean_in_fail_mode() {
    let yaml = r#"
roster:
  max_length: 12
  max_age_secs: 300
  similarity_threshold: 85
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();

    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail)
        .expect("fully consumed roster section must pass");
    assert!(report.is_clean());
}

#[test]
fn unused_keys_do_not_block_extraction() {
    let loaded = load_layered_yaml_from_strings(&[NOISY_YAML]).unwrap();
    assert_eq!(loaded.roster().unwrap().max_length, 12);
}
