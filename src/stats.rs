//! Generation statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::graph::{OversizedRoots, TechStore};
use crate::localization::DescriptionIndex;
use crate::render::Language;
use crate::scan::TechScanSummary;

/// Counts reported after a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub total: usize,
    pub base_game: usize,
    pub from_mods: usize,
    pub dangerous: usize,
    pub repeatable: usize,
    /// Technologies per research area; records without one count as `unknown`.
    pub per_area: BTreeMap<String, usize>,
    pub per_tier: BTreeMap<u32, usize>,
    pub english_descriptions: usize,
    pub chinese_descriptions: usize,
    pub oversized_roots: usize,
    /// Source files that could not be read and contributed nothing.
    pub unreadable_files: usize,
}

impl GenerationStats {
    /// Collect statistics over a linked store and the scan that filled it.
    pub fn collect(
        store: &TechStore,
        scan: &TechScanSummary,
        descriptions: Option<&DescriptionIndex>,
        oversized: Option<&OversizedRoots>,
    ) -> Self {
        let mut stats = Self {
            total: store.len(),
            unreadable_files: scan.unreadable,
            ..Self::default()
        };

        for tech in store.iter() {
            if scan.base_ids.contains(&tech.id) {
                stats.base_game += 1;
            } else {
                stats.from_mods += 1;
            }
            if tech.is_dangerous {
                stats.dangerous += 1;
            }
            if tech.is_repeatable {
                stats.repeatable += 1;
            }
            *stats.per_area.entry(tech.area_or_unknown().to_string()).or_default() += 1;
            *stats.per_tier.entry(tech.tier).or_default() += 1;
        }

        if let Some(descriptions) = descriptions {
            stats.english_descriptions = descriptions.count(Language::English);
            stats.chinese_descriptions = descriptions.count(Language::SimpChinese);
        }
        stats.oversized_roots = oversized.map_or(0, OversizedRoots::len);

        stats
    }

    /// Operator-facing summary lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Technologies: {}", self.total),
            format!("  Base game: {}", self.base_game),
            format!("  Mods: {}", self.from_mods),
            format!("  Dangerous: {}", self.dangerous),
            format!("  Repeatable: {}", self.repeatable),
            "By area:".to_string(),
        ];
        lines.extend(self.per_area.iter().map(|(area, n)| format!("  {area}: {n}")));
        lines.push("By tier:".to_string());
        lines.extend(self.per_tier.iter().map(|(tier, n)| format!("  {tier}: {n}")));
        lines.push(format!(
            "Descriptions: {} english, {} simp_chinese",
            self.english_descriptions, self.chinese_descriptions
        ));
        lines.push(format!("Oversized trees: {}", self.oversized_roots));
        lines.push(format!("Unreadable files: {}", self.unreadable_files));
        lines
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::graph::Technology;

    fn sample_store() -> TechStore {
        let mut store = TechStore::new();
        let specs = [
            ("tech_a", "physics", 0, false, false),
            ("tech_b", "physics", 1, true, false),
            ("tech_c", "", 1, false, true),
            ("tech_d", "society", 5, false, false),
        ];
        for (id, area, tier, dangerous, repeatable) in specs {
            let mut tech = Technology::new(id);
            tech.area = area.to_string();
            tech.tier = tier;
            tech.is_dangerous = dangerous;
            tech.is_repeatable = repeatable;
            store.insert(tech);
        }
        store.link_successors();
        store
    }

    #[test]
    fn test_collect_counts() {
        let store = sample_store();
        let scan = TechScanSummary {
            base_ids: HashSet::from(["tech_a".to_string(), "tech_b".to_string()]),
            files_read: 3,
            unreadable: 2,
            mods_contributing: 1,
        };
        let stats = GenerationStats::collect(&store, &scan, None, None);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.base_game, 2);
        assert_eq!(stats.from_mods, 2);
        assert_eq!(stats.dangerous, 1);
        assert_eq!(stats.repeatable, 1);
        assert_eq!(stats.per_area["physics"], 2);
        assert_eq!(stats.per_area["unknown"], 1);
        assert_eq!(stats.per_tier[&1], 2);
        assert_eq!(stats.oversized_roots, 0);
        assert_eq!(stats.unreadable_files, 2);
    }

    #[test]
    fn test_lines_and_json() {
        let store = sample_store();
        let stats = GenerationStats::collect(&store, &TechScanSummary::default(), None, None);

        let lines = stats.lines();
        assert_eq!(lines[0], "Technologies: 4");
        assert!(lines.contains(&"  unknown: 1".to_string()));
        assert_eq!(lines.last().unwrap(), "Unreadable files: 0");

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total"], 4);
        assert_eq!(json["per_tier"]["5"], 1);
    }
}
