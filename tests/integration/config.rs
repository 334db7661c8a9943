//! Integration tests for configuration lookup and errors.

use assert_cmd::Command;
use predicates::prelude::*;
use techtree_cli::test_utils::GameFixture;

use crate::common::techtree_with_config;

#[test]
fn test_missing_config_file() {
    let fixture = GameFixture::new();

    techtree_with_config(&fixture, &fixture.root().join("missing.toml"))
        .arg("cycles")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_missing_required_key() {
    let fixture = GameFixture::new();
    let config = fixture.root().join("partial.toml");
    std::fs::write(&config, "[paths]\nmod_folder_path = \"mods\"\n").unwrap();

    techtree_with_config(&fixture, &config)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("paths.base_game_path"));
}

#[test]
fn test_invalid_toml() {
    let fixture = GameFixture::new();
    let config = fixture.root().join("broken.toml");
    std::fs::write(&config, "[paths\nbase_game_path = ").unwrap();

    techtree_with_config(&fixture, &config)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("techtree")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("cycles"));
}
