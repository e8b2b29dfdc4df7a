use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn file_logging_records_processed_notes() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    fs::create_dir_all(&vault).unwrap();
    fs::write(vault.join("Start.md"), "[[Other]]\n").unwrap();
    fs::write(vault.join("Other.md"), "other\n").unwrap();

    let log_path = tmp.path().join("obs2prompt.log");
    let config_path = tmp.path().join("config.toml");
    let toml = format!(
        r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "{}"

[logging]
level = "warn"
file_level = "debug"
file = "{}"
"#,
        vault.display(),
        log_path.display()
    );
    fs::write(&config_path, toml).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("obs2prompt"));
    cmd.env_remove("OBSIDIAN_VAULT_PATH");
    cmd.env_remove("RUST_LOG");
    cmd.args(["Start", "--config"]).arg(&config_path);
    cmd.assert().success();

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("processing file"), "log was: {log}");
    assert!(log.contains("wrote aggregate"), "log was: {log}");
}

#[test]
fn debug_flag_logs_to_stdout() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    fs::create_dir_all(&vault).unwrap();
    fs::write(vault.join("Start.md"), "alone\n").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("obs2prompt"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.env_remove("OBSIDIAN_VAULT_PATH");
    cmd.env_remove("RUST_LOG");
    cmd.args(["Start", "--debug", "--vault-path"]).arg(&vault);

    let assert = cmd.assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("processing file"), "stdout was: {stdout}");
}
