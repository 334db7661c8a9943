//! Shared helpers for integration tests.

use std::path::Path;

use assert_cmd::Command;
use techtree_cli::test_utils::GameFixture;

pub const BASE_TECHS: &str = r#"
# Base game sample
tech_lasers_1 = {
    area = physics
    tier = 0
    start_tech = yes
}

tech_lasers_2 = {
    area = physics
    tier = 1
    prerequisites = { "tech_lasers_1" }
}

tech_lasers_3 = {
    area = physics
    tier = 2
    prerequisites = { "tech_lasers_2" "tech_power_plant_1" }
}

tech_power_plant_1 = {
    area = engineering
    tier = 1
    prerequisites = { "tech_lasers_1" }
}
"#;

pub const MOD_TECHS: &str = r#"
tech_mod_a = {
    tier = 3
    prerequisites = { "tech_mod_b" }
}

tech_mod_b = {
    tier = 3
    prerequisites = { "tech_mod_a" }
}

tech_mod_loop = {
    tier = 4
    prerequisites = { "tech_mod_loop" }
}
"#;

/// A game with four base technologies and one mod that adds three cyclic ones.
pub fn sample_game() -> GameFixture {
    let fixture = GameFixture::new();
    fixture.base_tech("00_base.txt", BASE_TECHS);
    fixture.mod_tech("100", "techs.txt", MOD_TECHS);
    fixture.base_localisation(
        "english/technology_l_english.yml",
        "l_english:\n tech_lasers_1_desc:0 \"Focused light.\"\n",
    );
    fixture.base_localisation(
        "simp_chinese/technology_l_simp_chinese.yml",
        "l_simp_chinese:\n tech_lasers_1_desc:0 \"聚焦的光。\"\n",
    );
    fixture
}

/// `techtree` with progress disabled and the fixture's config written out.
pub fn techtree(fixture: &GameFixture, extra_config: &str) -> Command {
    let config = fixture.write_config(extra_config);
    techtree_with_config(fixture, &config)
}

/// `techtree` with progress disabled, reading `config`.
pub fn techtree_with_config(fixture: &GameFixture, config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("techtree").unwrap();
    cmd.current_dir(fixture.root())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--no-progress")
        .arg("--config")
        .arg(config);
    cmd
}
