//! Mod inclusion policy.

use std::collections::BTreeSet;

/// Decides which mods are scanned for technologies and localisation.
///
/// The generator's own mod is never scanned. With filtering disabled every
/// other mod passes. With filtering enabled a non-empty whitelist decides;
/// otherwise a non-empty blacklist excludes; otherwise everything passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModFilter {
    own_mod_id: Option<String>,
    enabled: bool,
    included: BTreeSet<String>,
    ignored: BTreeSet<String>,
    centralized: Vec<String>,
}

impl ModFilter {
    pub fn new(
        own_mod_id: Option<String>,
        enabled: bool,
        included: impl IntoIterator<Item = String>,
        ignored: impl IntoIterator<Item = String>,
        centralized: Vec<String>,
    ) -> Self {
        Self {
            own_mod_id,
            enabled,
            included: included.into_iter().collect(),
            ignored: ignored.into_iter().collect(),
            centralized,
        }
    }

    /// Whether the mod's technologies and English localisation are scanned.
    pub fn should_include(&self, mod_id: &str) -> bool {
        if self.own_mod_id.as_deref() == Some(mod_id) {
            return false;
        }
        if !self.enabled {
            return true;
        }
        if !self.included.is_empty() {
            return self.included.contains(mod_id);
        }
        if !self.ignored.is_empty() {
            return !self.ignored.contains(mod_id);
        }
        true
    }

    /// Whether the mod is scanned in the general Chinese localisation pass.
    ///
    /// Centralized localisation mods are read in their own earlier pass, so
    /// they are excluded here.
    pub fn should_scan_localization(&self, mod_id: &str) -> bool {
        !self.is_centralized(mod_id) && self.should_include(mod_id)
    }

    pub fn is_centralized(&self, mod_id: &str) -> bool {
        self.centralized.iter().any(|m| m == mod_id)
    }

    /// Centralized localisation mods, in configured order.
    pub fn centralized(&self) -> &[String] {
        &self.centralized
    }

    /// Human-readable description of the active policy.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.enabled {
            lines.push("Mod filter: enabled".to_string());
            if !self.included.is_empty() {
                lines.push(format!("  Only scanning: {}", join(&self.included)));
            } else if !self.ignored.is_empty() {
                lines.push(format!("  Ignoring: {}", join(&self.ignored)));
            }
        } else {
            lines.push("Mod filter: disabled".to_string());
        }

        if self.centralized.is_empty() {
            lines.push("Localisation mods: none configured".to_string());
        } else {
            lines.push(format!("Localisation mods: {}", self.centralized.join(", ")));
        }
        lines
    }
}

fn join(ids: &BTreeSet<String>) -> String {
    ids.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
