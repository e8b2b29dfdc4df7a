use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write(dir: &Path, rel: &str, content: impl AsRef<str>) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content.as_ref()).unwrap();
}

fn make_vault(root: &Path) {
    write(root, "Index.md", "# Index\n\n[[Note A]] and [[Note A#Details]]\n");
    write(root, "Note A.md", "# Note A\n\n## Details\n\nSee [[Note B]].\n");
    write(root, "notes/Note B.md", "# Note B\n\nBack to [[Index]].\n");
}

/// Command isolated from the user's config and environment.
fn obs2prompt(config_home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("obs2prompt"));
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd.env_remove("OBSIDIAN_VAULT_PATH");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn writes_aggregate_to_default_output() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    make_vault(&vault);

    obs2prompt(tmp.path())
        .args(["Index.md", "--depth", "1", "--vault-path"])
        .arg(&vault)
        .assert()
        .success()
        .stdout(predicate::str::contains("Using vault path:"))
        .stdout(predicate::str::contains("- Total Files: 2"))
        .stdout(predicate::str::contains("Results saved to:"));

    let output = fs::read_to_string(vault.join("temp/aggregate_Index.txt")).unwrap();
    assert!(output.starts_with("# Content from Index.md\n"));
    assert!(output.contains("├── Index.md\n└── Note A.md"));
    assert!(output.contains("Path: `Note A.md`"));
    assert!(!output.contains("(heading: Details)"));
    assert!(output.contains("- Total Files: 2"));
}

#[test]
fn explicit_output_path_and_depth() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    make_vault(&vault);
    let out = tmp.path().join("out/result.txt");

    obs2prompt(tmp.path())
        .args(["Index", "--depth", "5", "--vault-path"])
        .arg(&vault)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("- Total Files: 3"));

    let output = fs::read_to_string(&out).unwrap();
    assert!(output.contains("Path: `notes/Note B.md`"));
}

#[test]
fn vault_path_from_environment() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    make_vault(&vault);

    obs2prompt(tmp.path())
        .env("OBSIDIAN_VAULT_PATH", &vault)
        .args(["Note A", "--depth", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Total Files: 1"));

    assert!(vault.join("temp/aggregate_Note A.txt").exists());
}

#[test]
fn missing_start_file_is_handled() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    make_vault(&vault);

    obs2prompt(tmp.path())
        .args(["Missing.md", "--vault-path"])
        .arg(&vault)
        .assert()
        .success()
        .stdout(predicate::str::contains("File not found: Missing.md"))
        .stdout(predicate::str::contains("- Total Files: 0"))
        .stdout(predicate::str::contains("Results saved to:"));

    let output = fs::read_to_string(vault.join("temp/aggregate_Missing.txt")).unwrap();
    assert_eq!(output, "File not found: Missing.md");
}

#[test]
fn clipboard_and_token_counter_failures_are_not_fatal() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    write(&vault, "Start.md", "one two three\nfour\n");
    let empty_bin = tmp.path().join("bin");
    fs::create_dir_all(&empty_bin).unwrap();

    obs2prompt(tmp.path())
        .env("PATH", &empty_bin)
        .args(["Start", "--depth", "0", "--clipboard", "--exact-tokens", "--vault-path"])
        .arg(&vault)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error copying to clipboard:"))
        .stdout(predicate::str::contains("- Total Tokens: 4\n"))
        .stdout(predicate::str::contains("Results saved to:"));

    assert!(vault.join("temp/aggregate_Start.txt").exists());
}

#[test]
fn json_summary() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    make_vault(&vault);

    let assert = obs2prompt(tmp.path())
        .args(["Index.md", "--depth", "1", "--json", "--vault-path"])
        .arg(&vault)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["found"], true);
    assert_eq!(json["file_count"], 2);
    assert!(json["output_path"].as_str().unwrap().ends_with("aggregate_Index.txt"));
}

#[test]
fn missing_vault_root_fails() {
    let tmp = tempdir().unwrap();

    obs2prompt(tmp.path())
        .args(["Index.md", "--vault-path"])
        .arg(tmp.path().join("no-such-vault"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn config_profile_supplies_vault_and_depth() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    make_vault(&vault);
    let config = format!(
        r#"
version = 1
profile = "notes"

[profiles.notes]
vault_root = "{}"
output_dir = "{{{{vault_root}}}}/exports"
depth = 0
"#,
        vault.display()
    );
    write(tmp.path(), "obs2prompt/config.toml", config);

    obs2prompt(tmp.path())
        .arg("Index")
        .assert()
        .success()
        .stdout(predicate::str::contains("- Total Files: 1"));

    assert!(vault.join("exports/aggregate_Index.txt").exists());
}

#[test]
fn missing_explicit_config_fails() {
    let tmp = tempdir().unwrap();

    obs2prompt(tmp.path())
        .args(["Index", "--config"])
        .arg(tmp.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
