//! Integration tests for `techtree generate`.

use predicates::prelude::*;

use crate::common::{sample_game, techtree};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[test]
fn test_generate_writes_all_fan_out_paths() {
    let fixture = sample_game();

    techtree(&fixture, "")
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 20 files"))
        .stdout(predicate::str::contains("Found 2 circular dependencies:"));

    let base = fixture.output_path().join("localisation");
    for dir in ["", "english", "replace", "english/replace", "zzz_tech_trees/replace"] {
        assert!(base.join(dir).join("zztechtreemain_l_english.yml").is_file(), "{dir}");
        assert!(base.join(dir).join("zztechtreereplaced_l_english.yml").is_file(), "{dir}");
    }
    for dir in ["simp_chinese", "simp_chinese/replace"] {
        assert!(base.join(dir).join("zztechtreemain_l_simp_chinese.yml").is_file(), "{dir}");
    }
}

#[test]
fn test_generate_main_file_content() {
    let fixture = sample_game();
    techtree(&fixture, "").arg("generate").assert().success();

    let bytes = std::fs::read(fixture.output_path().join("localisation/zztechtreemain_l_english.yml")).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));
    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "l_english:");
    assert_eq!(lines[1], " technology_tree_title:0 \"Technology Tree\"");
    assert_eq!(lines[2], " tech_tree_max_level:0 \"Maximum Level Reached\"");
    assert!(lines.contains(
        &r#" tech_lasers_3_techtree:0 "\n\n§H$technology_tree_title$§!\n§Y$tech_tree_max_level$§!""#
    ));

    let lasers_1 = lines.iter().find(|l| l.starts_with(" tech_lasers_1_techtree:0 ")).unwrap();
    assert!(lasers_1.contains(r"|--(1)['technology:tech_lasers_2', £physics£§W$tech_lasers_2$§!]"));
    assert!(lasers_1.contains("§g(already shown above)§!"));
}

#[test]
fn test_generate_replaced_descriptions() {
    let fixture = sample_game();
    techtree(&fixture, "").arg("generate").assert().success();

    let bytes =
        std::fs::read(fixture.output_path().join("localisation/zztechtreereplaced_l_simp_chinese.yml")).unwrap();
    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();

    assert!(text.starts_with("l_simp_chinese:\n"));
    assert!(text.contains(" tech_lasers_1_desc:0 \"聚焦的光。(级别:0)$tech_lasers_1_techtree$\""));
    assert!(text.contains(" tech_lasers_2_desc:0 \"(级别:1)$tech_lasers_2_techtree$\""));
}

#[test]
fn test_generate_output_override() {
    let fixture = sample_game();
    let custom = fixture.root().join("custom_out");

    techtree(&fixture, "")
        .arg("generate")
        .arg("--output")
        .arg(&custom)
        .assert()
        .success();

    assert!(custom.join("localisation/zztechtreemain_l_english.yml").is_file());
    assert!(!fixture.output_path().exists());
}

#[test]
fn test_generate_respects_mod_filter() {
    let fixture = sample_game();
    let extra = "[mod_filter]\nenable_mod_filter = true\nignored_mods = \"100\"\n";

    techtree(&fixture, extra)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("No circular dependencies found."));

    let text = std::fs::read_to_string(fixture.output_path().join("localisation/zztechtreemain_l_english.yml")).unwrap();
    assert!(!text.contains("tech_mod_a"));
}
