//! Integration tests for `techtree cycles`.

use predicates::prelude::*;
use techtree_cli::test_utils::GameFixture;

use crate::common::{BASE_TECHS, sample_game, techtree};

#[test]
fn test_cycles_reports_loops_and_cycles() {
    let fixture = sample_game();

    let output = techtree(&fixture, "").arg("cycles").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "Found 2 circular dependencies:",
            "  Self-referencing technologies (1):",
            "    tech_mod_loop -> tech_mod_loop",
            "  Cycles (1):",
            "    Cycle 1: tech_mod_a -> tech_mod_b -> tech_mod_a",
        ]
    );
}

#[test]
fn test_cycles_clean_graph() {
    let fixture = GameFixture::new();
    fixture.base_tech("00_base.txt", BASE_TECHS);

    techtree(&fixture, "")
        .arg("cycles")
        .assert()
        .success()
        .stdout(predicate::str::contains("No circular dependencies found."));
}
