//! Integration tests for `techtree stats`.

use predicates::prelude::*;

use crate::common::{sample_game, techtree};

#[test]
fn test_stats_text() {
    let fixture = sample_game();

    techtree(&fixture, "")
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Technologies: 7"))
        .stdout(predicate::str::contains("  Base game: 4"))
        .stdout(predicate::str::contains("  Mods: 3"))
        .stdout(predicate::str::contains("Descriptions: 1 english, 1 simp_chinese"));
}

#[test]
fn test_stats_json() {
    let fixture = sample_game();

    let output = techtree(&fixture, "").args(["stats", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total"], 7);
    assert_eq!(stats["from_mods"], 3);
    assert_eq!(stats["per_area"]["physics"], 3);
    assert_eq!(stats["per_area"]["unknown"], 3);
    assert_eq!(stats["per_tier"]["3"], 2);
    assert_eq!(stats["oversized_roots"], 0);
    assert_eq!(stats["unreadable_files"], 0);
}

#[test]
fn test_stats_with_included_mods_only() {
    let fixture = sample_game();
    fixture.mod_tech("200", "extra.txt", "tech_extra = {\n tier = 1\n}\n");
    let extra = "[mod_filter]\nenable_mod_filter = true\nincluded_mods = [\"200\"]\n";

    techtree(&fixture, extra)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Technologies: 5"));
}
