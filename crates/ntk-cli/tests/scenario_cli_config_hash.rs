use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn config_hash_prints_hash_and_canonical_json() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let base = dir.path().join("base.yaml");
    let overlay = dir.path().join("overlay.yaml");
    fs::write(&base, "roster:\n  max_length: 12\n  max_age_secs: 300\n")?;
    fs::write(&overlay, "roster:\n  max_age_secs: 60\n")?;

    Command::cargo_bin("ntk")?
        .arg("config-hash")
        .arg(&base)
        .arg(&overlay)
        .assert()
        .success()
        .stdout(predicate::str::is_match("^config_hash=[0-9a-f]{64}\n")?)
        .stdout(predicate::str::contains(
            r#"{"roster":{"max_age_secs":60,"max_length":12}}"#,
        ));
    Ok(())
}

#[test]
fn config_hash_requires_a_path() -> anyhow::Result<()> {
    Command::cargo_bin("ntk")?
        .arg("config-hash")
        .assert()
        .failure();
    Ok(())
}
