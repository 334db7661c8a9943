//! Integration tests for `techtree tree`.

use predicates::prelude::*;

use crate::common::{sample_game, techtree, techtree_with_config};

#[test]
fn test_tree_prints_rendered_lines() {
    let fixture = sample_game();

    let output = techtree(&fixture, "").args(["tree", "tech_lasers_1"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "tech_lasers_1 (Tier:0)");
    assert_eq!(
        &lines[1..],
        [
            "    |--(1)['technology:tech_lasers_2', £physics£§W$tech_lasers_2$§!]",
            "        |--(2)['technology:tech_lasers_3', £physics£§W$tech_lasers_3$§!] [§RRequires§! (1)['technology:tech_power_plant_1', £engineering£§W$tech_power_plant_1$§!]]",
            "    |--(1)['technology:tech_power_plant_1', £engineering£§W$tech_power_plant_1$§!]",
            "        |--(2)['technology:tech_lasers_3', £physics£§W$tech_lasers_3$§!] [§RRequires§! (1)['technology:tech_lasers_2', £physics£§W$tech_lasers_2$§!]] §g(already shown above)§!",
        ]
    );
}

#[test]
fn test_tree_chinese_strings() {
    let fixture = sample_game();

    techtree(&fixture, "")
        .args(["tree", "tech_lasers_3", "--language", "simp-chinese"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tech_lasers_3 (级别:2)"))
        .stdout(predicate::str::contains("已达到顶级"));
}

#[test]
fn test_tree_self_loop_terminates() {
    let fixture = sample_game();

    techtree(&fixture, "")
        .args(["tree", "tech_mod_loop"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "    |--(4)['technology:tech_mod_loop', §W$tech_mod_loop$§!] §g(already shown above)§!",
        ));
}

#[test]
fn test_tree_oversized_root() {
    let fixture = sample_game();

    let config = fixture.root().join("small.toml");
    std::fs::write(
        &config,
        format!(
            "[paths]\nbase_game_path = {:?}\nmod_folder_path = {:?}\n\n[output]\nlong_tree_threshold = 1\n",
            fixture.base_path().display().to_string(),
            fixture.mods_path().display().to_string(),
        ),
    )
    .unwrap();

    techtree_with_config(&fixture, &config)
        .args(["tree", "tech_lasers_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Too many follow-up technologies"))
        .stdout(predicate::str::contains("|--").not());
}

#[test]
fn test_tree_unknown_technology() {
    let fixture = sample_game();

    techtree(&fixture, "")
        .args(["tree", "tech_nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Technology 'tech_nope' not found"));
}
