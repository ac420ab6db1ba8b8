use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "ENCHLIMIT_LOG_LEVEL",
    "ENCHLIMIT_LOG_FORMAT",
    "ENCHLIMIT_STORE_PATH",
    "ENCHLIMIT_PERMISSION",
    "RUST_LOG",
];

/// Binary pointed at a config file inside `dir`
fn enchlimit(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("enchlimit").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(dir.join("config.toml"));
    cmd
}

fn limits_file(dir: &Path) -> PathBuf {
    dir.join("limits.toml")
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("enchlimit").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("enchlimit 0.1.0"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("enchlimit").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Enforce and configure per-enchantment level caps",
        ));
}

#[test]
fn test_cli_command_sets_limit() {
    let dir = TempDir::new().unwrap();

    enchlimit(dir.path())
        .args(["command", "sharpness", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Enchantment limit for sharpness set to 2.",
        ));

    let content = fs::read_to_string(limits_file(dir.path())).unwrap();
    assert!(content.contains("[enchantment-limits]"));
    assert!(content.contains("sharpness = 2"));

    enchlimit(dir.path())
        .arg("limits")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"sharpness\s+2").unwrap());
}

#[test]
fn test_cli_command_negative_clears_limit() {
    let dir = TempDir::new().unwrap();

    enchlimit(dir.path())
        .args(["command", "looting", "1"])
        .assert()
        .success();
    enchlimit(dir.path())
        .args(["command", "looting", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Enchantment limit for looting set to -1.",
        ));

    enchlimit(dir.path())
        .arg("limits")
        .assert()
        .success()
        .stdout(predicate::str::contains("No enchantment limits configured."));
}

#[test]
fn test_cli_command_invalid_name() {
    let dir = TempDir::new().unwrap();

    enchlimit(dir.path())
        .args(["command", "sharpnes", "2"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid enchantment name."));
    assert!(!limits_file(dir.path()).exists());
}

#[test]
fn test_cli_command_invalid_level() {
    let dir = TempDir::new().unwrap();

    enchlimit(dir.path())
        .args(["command", "sharpness", "max"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid level. Must be a number."));
}

#[test]
fn test_cli_command_usage() {
    let dir = TempDir::new().unwrap();

    enchlimit(dir.path())
        .args(["command", "sharpness"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Usage: /enchlimit <enchantment> <level>",
        ))
        .stdout(predicate::str::contains("Or: /enchlimit gui"));
}

#[test]
fn test_cli_command_gui_needs_player() {
    let dir = TempDir::new().unwrap();

    enchlimit(dir.path())
        .args(["command", "gui"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "This command can only be used by a player.",
        ));
}

#[test]
fn test_cli_catalog() {
    let dir = TempDir::new().unwrap();

    enchlimit(dir.path())
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("fire_aspect"))
        .stdout(predicate::str::contains("Fire Aspect"));
}

#[test]
fn test_cli_scan_prints_corrected_inventory() {
    let dir = TempDir::new().unwrap();
    enchlimit(dir.path())
        .args(["command", "sharpness", "2"])
        .assert()
        .success();

    let inventory = dir.path().join("inventory.json");
    fs::write(
        &inventory,
        r#"{
            "storage": [
                {"material": "DIAMOND_SWORD", "enchantments": [["sharpness", 4]]},
                {"material": "IRON_AXE", "enchantments": [["sharpness", 1], ["efficiency", 3]]}
            ]
        }"#,
    )
    .unwrap();

    enchlimit(dir.path())
        .arg("scan")
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Enchantment Sharpness was capped at level 2.",
        ))
        .stdout(predicate::str::contains("You cannot have Sharpness on an axe!"))
        .stdout(predicate::str::contains("\"efficiency\""));
}

#[test]
fn test_cli_scan_write_updates_file() {
    let dir = TempDir::new().unwrap();
    enchlimit(dir.path())
        .args(["command", "mending", "0"])
        .assert()
        .success();

    let inventory = dir.path().join("inventory.json");
    fs::write(
        &inventory,
        r#"{"off_hand": {"material": "ELYTRA", "enchantments": [["mending", 1], ["unbreaking", 3]]}}"#,
    )
    .unwrap();

    enchlimit(dir.path())
        .arg("scan")
        .arg(&inventory)
        .arg("--write")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 slot(s) corrected"));

    let content = fs::read_to_string(&inventory).unwrap();
    assert!(!content.contains("mending"));
    assert!(content.contains("unbreaking"));
}

#[test]
fn test_cli_scan_missing_file() {
    let dir = TempDir::new().unwrap();

    enchlimit(dir.path())
        .arg("scan")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read inventory"));
}

#[test]
fn test_cli_menu_sets_limit() {
    let dir = TempDir::new().unwrap();

    // Sharpness is entry 13 of the picker
    enchlimit(dir.path())
        .arg("menu")
        .write_stdin("13\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Select Level for Sharpness =="))
        .stdout(predicate::str::contains(
            "Enchantment limit for Sharpness set to 4.",
        ));

    let content = fs::read_to_string(limits_file(dir.path())).unwrap();
    assert!(content.contains("sharpness = 4"));
}

#[test]
fn test_cli_menu_quit_changes_nothing() {
    let dir = TempDir::new().unwrap();

    enchlimit(dir.path())
        .arg("menu")
        .write_stdin("13\nq\n")
        .assert()
        .success();
    assert!(!limits_file(dir.path()).exists());
}

#[test]
fn test_cli_invalid_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[logging]\nformat = \"xml\"\n").unwrap();

    enchlimit(dir.path())
        .arg("limits")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log format"));
}

#[test]
fn test_cli_custom_label_in_usage() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[command]\nlabel = \"el\"\n",
    )
    .unwrap();

    enchlimit(dir.path())
        .args(["command"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Usage: /el <enchantment> <level>"));
}
