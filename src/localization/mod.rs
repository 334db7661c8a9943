//! Technology descriptions from localisation files.
//!
//! Paradox localisation files hold one entry per line:
//!
//! ```text
//! l_english:
//!  tech_lasers_1_desc:0 "Focused light can be used as a weapon."
//! ```
//!
//! Only `*_desc` keys of known technologies are kept. English and Chinese are
//! merged with different policies:
//!
//! - **English**: base game first, then mods; a later file overwrites. A mod's
//!   English text is also the Chinese fallback.
//! - **Chinese**: base game, then the configured centralized localisation
//!   mods in order, then every other scanned mod; the first hit wins and
//!   replaces any English fallback.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::graph::TechStore;
use crate::render::Language;
use crate::scan::SourceScanner;
use crate::script::read_source;

static DESCRIPTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*([a-z0-9_]+_desc):(?:\d+)?\s*"((?:[^"\\]|\\.)*)""#).expect("valid regex")
});
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

const DESC_SUFFIX_LEN: usize = "_desc".len();

/// Parse `(technology id, cleaned description)` pairs from localisation text.
///
/// Blank lines and `#` comments are skipped. The id is the key without its
/// `_desc` suffix.
pub fn parse_descriptions(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| DESCRIPTION_LINE.captures(line))
        .map(|caps| {
            let key = &caps[1];
            let id = key[..key.len() - DESC_SUFFIX_LEN].to_string();
            (id, clean_description(&caps[2]))
        })
        .collect()
}

/// Flatten a description to one line.
///
/// Escaped quotes are unescaped, `\n` and `\t` escapes become spaces and
/// whitespace runs collapse to a single space.
pub fn clean_description(raw: &str) -> String {
    let text = raw.replace("\\\"", "\"").replace("\\n", " ").replace("\\t", " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Descriptions per technology and language.
#[derive(Debug, Clone, Default)]
pub struct DescriptionIndex {
    english: HashMap<String, String>,
    chinese: HashMap<String, String>,
    chinese_found: HashSet<String>,
}

impl DescriptionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Description of `id`, or `""` when none was found.
    pub fn description(&self, id: &str, language: Language) -> &str {
        let map = match language {
            Language::English => &self.english,
            Language::SimpChinese => &self.chinese,
        };
        map.get(id).map(String::as_str).unwrap_or("")
    }

    /// Number of technologies with a description in `language`.
    pub fn count(&self, language: Language) -> usize {
        match language {
            Language::English => self.english.len(),
            Language::SimpChinese => self.chinese.len(),
        }
    }

    /// Merge one English file. Later calls overwrite earlier ones.
    ///
    /// Mod files (`from_base == false`) also set the Chinese fallback.
    /// Returns the number of descriptions recorded.
    pub fn merge_english(&mut self, text: &str, store: &TechStore, from_base: bool) -> usize {
        let mut recorded = 0;
        for (id, description) in parse_descriptions(text) {
            if !store.contains(&id) {
                continue;
            }
            if !from_base {
                self.chinese.insert(id.clone(), description.clone());
            }
            self.english.insert(id, description);
            recorded += 1;
        }
        recorded
    }

    /// Merge one Chinese file. The first Chinese description of a technology wins.
    ///
    /// Returns the number of new descriptions recorded.
    pub fn merge_chinese(&mut self, text: &str, store: &TechStore) -> usize {
        let mut recorded = 0;
        for (id, description) in parse_descriptions(text) {
            if !store.contains(&id) || self.chinese_found.contains(&id) {
                continue;
            }
            self.chinese.insert(id.clone(), description);
            self.chinese_found.insert(id);
            recorded += 1;
        }
        recorded
    }

    /// Build the index from every localisation source of the scanner.
    ///
    /// Unreadable files are logged and skipped.
    pub async fn load(scanner: &SourceScanner, store: &TechStore) -> Self {
        let mut index = Self::new();
        let filter = scanner.filter();
        let base = scanner.base_game_path();

        for path in SourceScanner::localisation_files(base, Language::English) {
            if let Some(text) = read_or_skip(&path).await {
                index.merge_english(&text, store, true);
            }
        }
        for mod_dir in scanner.included_mods() {
            for path in SourceScanner::localisation_files(&mod_dir.path, Language::English) {
                if let Some(text) = read_or_skip(&path).await {
                    index.merge_english(&text, store, false);
                }
            }
        }

        index.load_chinese_from(base, store).await;
        for id in filter.centralized() {
            match scanner.mod_dir(id) {
                None => warn!("Configured localisation mod {id} does not exist"),
                Some(_) if !filter.should_include(id) => {
                    info!("Configured localisation mod {id} is excluded by the mod filter");
                }
                Some(mod_dir) => {
                    let found = index.load_chinese_from(&mod_dir.path, store).await;
                    debug!("Localisation mod {id} provides {found} Chinese descriptions");
                }
            }
        }
        for mod_dir in scanner.mod_dirs() {
            if filter.should_scan_localization(&mod_dir.id) {
                index.load_chinese_from(&mod_dir.path, store).await;
            }
        }

        index
    }

    async fn load_chinese_from(&mut self, root: &Path, store: &TechStore) -> usize {
        let mut found = 0;
        for path in SourceScanner::localisation_files(root, Language::SimpChinese) {
            if let Some(text) = read_or_skip(&path).await {
                found += self.merge_chinese(&text, store);
            }
        }
        found
    }
}

async fn read_or_skip(path: &Path) -> Option<String> {
    match read_source(path).await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("{e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModFilter;
    use crate::graph::test_support::store_from;
    use crate::test_utils::GameFixture;

    #[test]
    fn test_parse_description_lines() {
        let text = "l_english:\n # comment\n tech_a_desc:0 \"Alpha\\n  text\"\n TECH_B_DESC: \"Beta \\\"quoted\\\"\"\n tech_c:0 \"Not a desc\"\n\n";
        let parsed = parse_descriptions(text);
        assert_eq!(
            parsed,
            vec![
                ("tech_a".to_string(), "Alpha text".to_string()),
                ("TECH_B".to_string(), "Beta \"quoted\"".to_string()),
            ]
        );
    }

    #[test]
    fn test_clean_description() {
        assert_eq!(clean_description("  a\\tb \\n\\n c  "), "a b c");
    }

    #[test]
    fn test_english_later_overwrites_and_sets_fallback() {
        let store = store_from(&[("tech_a", 0, &[]), ("tech_b", 0, &[])]);
        let mut index = DescriptionIndex::new();

        index.merge_english(" tech_a_desc:0 \"base\"\n tech_x_desc:0 \"unknown\"", &store, true);
        assert_eq!(index.description("tech_a", Language::English), "base");
        assert_eq!(index.description("tech_a", Language::SimpChinese), "");
        assert_eq!(index.description("tech_x", Language::English), "");

        index.merge_english(" tech_a_desc:0 \"mod\"", &store, false);
        assert_eq!(index.description("tech_a", Language::English), "mod");
        assert_eq!(index.description("tech_a", Language::SimpChinese), "mod");
        assert_eq!(index.count(Language::English), 1);
    }

    #[test]
    fn test_chinese_first_wins_over_fallback() {
        let store = store_from(&[("tech_a", 0, &[])]);
        let mut index = DescriptionIndex::new();

        index.merge_english(" tech_a_desc:0 \"english\"", &store, false);
        assert_eq!(index.merge_chinese(" tech_a_desc:0 \"第一\"", &store), 1);
        assert_eq!(index.merge_chinese(" tech_a_desc:0 \"第二\"", &store), 0);
        assert_eq!(index.description("tech_a", Language::SimpChinese), "第一");
    }

    #[tokio::test]
    async fn test_load_merge_order() {
        let fixture = GameFixture::new();
        fixture.base_tech("t.txt", "tech_a = {\n}\ntech_b = {\n}\ntech_c = {\n}\n");
        fixture.base_localisation("english/t_l_english.yml", "l_english:\n tech_a_desc:0 \"A base\"\n");
        fixture.mod_localisation("100", "english/m_l_english.yml", "l_english:\n tech_a_desc:0 \"A mod\"\n tech_b_desc:0 \"B mod\"\n");
        fixture.mod_localisation("100", "simp_chinese/m_l_simp_chinese.yml", "l_simp_chinese:\n tech_c_desc:0 \"丙 普通\"\n");
        fixture.mod_localisation("900", "simp_chinese/z_l_simp_chinese.yml", "l_simp_chinese:\n tech_c_desc:0 \"丙 汉化\"\n");

        let filter = ModFilter::new(None, false, vec![], vec![], vec!["900".to_string(), "404".to_string()]);
        let scanner = SourceScanner::new(fixture.base_path(), fixture.mods_path(), filter);
        let mut store = TechStore::new();
        scanner.scan_technologies(&crate::parser::TechParser::default(), &mut store).await;

        let index = DescriptionIndex::load(&scanner, &store).await;
        assert_eq!(index.description("tech_a", Language::English), "A mod");
        assert_eq!(index.description("tech_b", Language::SimpChinese), "B mod");
        // The centralized mod is read before mod "100" despite sorting after it.
        assert_eq!(index.description("tech_c", Language::SimpChinese), "丙 汉化");
        assert_eq!(index.description("tech_c", Language::English), "");
    }
}
