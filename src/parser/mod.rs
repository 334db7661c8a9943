//! Technology record parser.
//!
//! Technology scripts are sequences of top-level records:
//!
//! ```text
//! tech_lasers_2 = {
//!     area = physics
//!     tier = 1
//!     cost = @tier1cost2
//!     category = { particles }
//!     prerequisites = { "tech_lasers_1" }
//!     weight = @tier1weight2
//! }
//! ```
//!
//! The parser is deliberately tolerant. It does not understand the script
//! language; it recovers record boundaries with [`extract_block`] and pulls a
//! handful of known keys out of each body with loose token rules. Unknown keys
//! are ignored, unbalanced records are skipped, and only the first definition
//! of an identifier is kept.
//!
//! # Examples
//!
//! ```rust
//! use techtree_cli::graph::TechStore;
//! use techtree_cli::parser::{ParseRules, TechParser};
//!
//! let parser = TechParser::new(ParseRules::default());
//! let mut store = TechStore::new();
//! let added = parser.parse_source("tech_a = { tier = 2 prerequisites = { \"tech_b\" } }", &mut store);
//!
//! assert_eq!(added, 1);
//! assert_eq!(store.get("tech_a").unwrap().prerequisites, vec!["tech_b"]);
//! ```

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::TechTreeError;
use crate::graph::{TechStore, Technology};
use crate::script::{extract_block, strip_comments};

static RECORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(\w+)\s*=\s*\{").expect("valid regex"));
static AREA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\barea\s*=\s*(\w+)").expect("valid regex"));
static TIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btier\s*=\s*(\d+)").expect("valid regex"));
static PREREQUISITES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bprerequisites\s*=\s*\{").expect("valid regex"));
static START_TECH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bstart_tech\s*=\s*yes\b").expect("valid regex"));
static COST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bcost\s*=\s*([@\w]+)").expect("valid regex"));
static CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bcategory\s*=\s*\{").expect("valid regex"));
static POTENTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:potential|starting_potential)\s*=\s*\{").expect("valid regex")
});
static DANGEROUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bis_dangerous\s*=\s*yes\b").expect("valid regex"));
static REPEATABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bis_repeatable\s*=\s*yes\b").expect("valid regex"));
static TECH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"|(\w+)"#).expect("valid regex"));
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Identifier-based classification rules.
///
/// Some technologies are hazardous or repeatable by convention rather than
/// by an explicit marker in their body. These rules are configuration, see
/// the `[rules]` section of `techtree.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseRules {
    /// Identifiers always treated as hazardous.
    pub hazardous_ids: BTreeSet<String>,
    /// Substring that marks an identifier as repeatable.
    pub repeatable_marker: String,
}

impl Default for ParseRules {
    fn default() -> Self {
        let hazardous_ids = [
            "tech_synthetic_workers",
            "tech_sapient_ai",
            "tech_positronic_ai",
            "tech_mega_engineering",
            "tech_colossus",
            "tech_juggernaut",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            hazardous_ids,
            repeatable_marker: "repeatable".to_string(),
        }
    }
}

/// Parses technology records into a [`TechStore`].
#[derive(Debug, Clone, Default)]
pub struct TechParser {
    rules: ParseRules,
}

impl TechParser {
    /// Create a parser with the given classification rules.
    pub fn new(rules: ParseRules) -> Self {
        Self {
            rules,
        }
    }

    /// Parse every top-level record of a script source into `store`.
    ///
    /// Comments are stripped first. Records are found with a single forward
    /// scan; an accepted record consumes its whole body, so keys nested inside
    /// it are never mistaken for records. Records whose identifier is already
    /// in the store are skipped, as are records with unbalanced braces or an
    /// empty body.
    ///
    /// Returns the number of technologies added.
    pub fn parse_source(&self, text: &str, store: &mut TechStore) -> usize {
        let text = strip_comments(text);
        let mut added = 0;
        let mut pos = 0;

        while let Some(caps) = RECORD_START.captures_at(&text, pos) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let id = name.as_str();
            let body_start = whole.end();

            let Some(body) = extract_block(&text, body_start) else {
                debug!(
                    "{}",
                    TechTreeError::MalformedBlock {
                        name: id.to_string()
                    }
                );
                pos = body_start;
                continue;
            };
            pos = body_start + body.len() + 1;

            if body.is_empty() {
                debug!(
                    "{}",
                    TechTreeError::MalformedBlock {
                        name: id.to_string()
                    }
                );
                continue;
            }

            if store.contains(id) {
                trace!("{}", TechTreeError::DuplicateIdentifier { id: id.to_string() });
                continue;
            }

            if store.insert(self.parse_record(id, body)) {
                added += 1;
            }
        }

        added
    }

    /// Extract the known fields of one record body.
    pub fn parse_record(&self, id: &str, body: &str) -> Technology {
        let mut tech = Technology::new(id);

        if let Some(caps) = AREA.captures(body) {
            tech.area = caps[1].to_string();
        }

        if let Some(caps) = TIER.captures(body) {
            tech.tier = caps[1].parse().unwrap_or(0);
        }

        if let Some(block) = sub_block(&PREREQUISITES, body) {
            tech.prerequisites = TECH_TOKEN
                .captures_iter(block)
                .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
                .map(|m| m.as_str().to_string())
                .collect();
        }

        if START_TECH.is_match(body) {
            tech.is_start = true;
            tech.prerequisites.clear();
        }

        if let Some(caps) = COST.captures(body) {
            tech.cost = caps[1].to_string();
        }

        if let Some(block) = sub_block(&CATEGORY, body) {
            tech.categories = words(block);
        }

        if let Some(block) = sub_block(&POTENTIAL, body) {
            tech.unlock_conditions = words(block);
        }

        tech.is_dangerous = self.rules.hazardous_ids.contains(id) || DANGEROUS.is_match(body);
        tech.is_repeatable = (!self.rules.repeatable_marker.is_empty()
            && id.contains(&self.rules.repeatable_marker))
            || REPEATABLE.is_match(body);

        tech
    }
}

/// Body of the first block opened by `opener`, which must end with `{`.
fn sub_block<'a>(opener: &Regex, body: &'a str) -> Option<&'a str> {
    let open = opener.find(body)?;
    extract_block(body, open.end())
}

fn words(block: &str) -> Vec<String> {
    WORD.find_iter(block).map(|m| m.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LASERS: &str = r#"
# Lasers
@tier1cost2 = 480

tech_lasers_2 = {
    area = physics
    tier = 1
    cost = @tier1cost2
    category = { particles }
    prerequisites = { "tech_lasers_1" "tech_power_plant_1" }
    potential = { NOT = { has_authority = auth_machine_intelligence } }
    weight_modifier = {
        modifier = { factor = 1.25 research_leader = { area = society } }
    }
}

tech_lasers_1 = {
    area = physics
    tier = 0
    start_tech = yes
    prerequisites = { "tech_ancient_focus" }
}
"#;

    fn parse(text: &str) -> TechStore {
        let mut store = TechStore::new();
        TechParser::default().parse_source(text, &mut store);
        store
    }

    #[test]
    fn test_parse_full_record() {
        let store = parse(LASERS);
        assert_eq!(store.len(), 2);

        let tech = store.get("tech_lasers_2").unwrap();
        assert_eq!(tech.area, "physics");
        assert_eq!(tech.tier, 1);
        assert_eq!(tech.cost, "@tier1cost2");
        assert_eq!(tech.categories, vec!["particles"]);
        assert_eq!(tech.prerequisites, vec!["tech_lasers_1", "tech_power_plant_1"]);
        assert_eq!(
            tech.unlock_conditions,
            vec!["NOT", "has_authority", "auth_machine_intelligence"]
        );
        assert!(!tech.is_dangerous);
        assert!(!tech.is_repeatable);
        assert!(!tech.is_start);
    }

    #[test]
    fn test_nested_keys_are_not_records() {
        let store = parse(LASERS);
        assert!(store.get("weight_modifier").is_none());
        assert!(store.get("modifier").is_none());
        assert!(store.get("prerequisites").is_none());
        let ids: Vec<&str> = store.ids().collect();
        assert_eq!(ids, vec!["tech_lasers_2", "tech_lasers_1"]);
    }

    #[test]
    fn test_start_tech_clears_prerequisites() {
        let store = parse(LASERS);
        let tech = store.get("tech_lasers_1").unwrap();
        assert!(tech.is_start);
        assert!(tech.prerequisites.is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let store = parse("tech_bare = {\n}\n");
        let tech = store.get("tech_bare").unwrap();
        assert_eq!(tech.tier, 0);
        assert!(tech.area.is_empty());
        assert!(tech.prerequisites.is_empty());
        assert!(tech.cost.is_empty());
    }

    #[test]
    fn test_bare_word_prerequisites() {
        let store = parse("tech_a = { prerequisites = { tech_b \"tech c\" } }");
        assert_eq!(store.get("tech_a").unwrap().prerequisites, vec!["tech_b", "tech c"]);
    }

    #[test]
    fn test_explicit_flags() {
        let store = parse("tech_x = {\n tier = 3\n is_dangerous = yes\n is_repeatable = yes\n}");
        let tech = store.get("tech_x").unwrap();
        assert!(tech.is_dangerous);
        assert!(tech.is_repeatable);
    }

    #[test]
    fn test_identifier_based_flags() {
        let store = parse("tech_sapient_ai = {\n}\ntech_repeatable_weapon_cat = {\n}\n");
        assert!(store.get("tech_sapient_ai").unwrap().is_dangerous);
        assert!(store.get("tech_repeatable_weapon_cat").unwrap().is_repeatable);
    }

    #[test]
    fn test_custom_rules() {
        let rules = ParseRules {
            hazardous_ids: BTreeSet::from(["tech_grey_tempest".to_string()]),
            repeatable_marker: "_rep_".to_string(),
        };
        let mut store = TechStore::new();
        TechParser::new(rules).parse_source(
            "tech_grey_tempest = {\n}\ntech_rep_armor = {\n}\ntech_sapient_ai = {\n}\n",
            &mut store,
        );
        assert!(store.get("tech_grey_tempest").unwrap().is_dangerous);
        assert!(store.get("tech_rep_armor").unwrap().is_repeatable);
        assert!(!store.get("tech_sapient_ai").unwrap().is_dangerous);
    }

    #[test]
    fn test_duplicate_first_wins() {
        let store = parse("tech_a = {\n tier = 1\n}\ntech_a = {\n tier = 5\n}\n");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("tech_a").unwrap().tier, 1);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = TechParser::default();
        let mut store = TechStore::new();
        assert_eq!(parser.parse_source(LASERS, &mut store), 2);
        assert_eq!(parser.parse_source(LASERS, &mut store), 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_unbalanced_record_is_skipped() {
        let store = parse("tech_ok = {\n tier = 1\n}\ntech_broken = {\n tier = 2\n");
        assert!(store.get("tech_ok").is_some());
        assert!(store.get("tech_broken").is_none());
    }

    #[test]
    fn test_empty_record_is_skipped() {
        let mut store = TechStore::new();
        let parser = TechParser::default();

        assert_eq!(parser.parse_source("tech_a = {}\ntech_b = {\n tier = 1\n}\n", &mut store), 1);
        assert!(store.get("tech_a").is_none());
        assert_eq!(store.get("tech_b").unwrap().tier, 1);

        // A later real definition is not blocked by the empty one.
        assert_eq!(parser.parse_source("tech_a = {\n tier = 3\n}\n", &mut store), 1);
        assert_eq!(store.get("tech_a").unwrap().tier, 3);
    }

    #[test]
    fn test_unbalanced_record_does_not_hide_later_records() {
        // The unclosed `tech_broken` body would swallow everything after it,
        // so scanning resumes right after its opening brace.
        let store = parse("tech_broken = {\n{\ntech_after = {\n tier = 4\n}\n");
        assert!(store.get("tech_broken").is_none());
        assert_eq!(store.get("tech_after").unwrap().tier, 4);
    }

    #[test]
    fn test_indented_records_and_comments() {
        let text = "  tech_a = { # opens\n  tier = 2 # {\n  }\n# tech_b = { }\n";
        let store = parse(text);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("tech_a").unwrap().tier, 2);
    }

    #[test]
    fn test_word_boundaries() {
        let store = parse("tech_a = {\n subarea = engineering\n area = society\n}\n");
        assert_eq!(store.get("tech_a").unwrap().area, "society");
    }
}
