//! Technology graph: entities, the entity store and successor derivation.
//!
//! Technologies are authored with *prerequisites* (the technologies they
//! require). The inverse relation, *successors*, is derived once all sources
//! have been parsed by [`TechStore::link_successors`] and is never authored
//! directly, so the two always agree:
//!
//! ```text
//! B ∈ successors(A)  ⇔  A ∈ prerequisites(B)  and both A and B are known
//! ```
//!
//! Prerequisites naming unknown technologies are kept for reference but
//! produce no edges. The graph is not guaranteed to be acyclic; see
//! [`cycles`] for diagnostics and [`reachability`] for subtree sizing.
//!
//! # Examples
//!
//! ```rust
//! use techtree_cli::graph::{TechStore, Technology};
//!
//! let mut store = TechStore::new();
//! store.insert(Technology::new("tech_a"));
//! let mut b = Technology::new("tech_b");
//! b.prerequisites = vec!["tech_a".to_string()];
//! store.insert(b);
//! store.link_successors();
//!
//! assert_eq!(store.get("tech_a").unwrap().successors(), ["tech_b".to_string()]);
//! ```

pub mod cycles;
pub mod reachability;

use std::collections::HashMap;

use serde::Serialize;

use crate::core::TechTreeError;

pub use cycles::{Cycle, CycleReport, find_cycles};
pub use reachability::{OversizedRoots, reachable_count};

/// A technology parsed from a script record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Technology {
    /// Unique identifier, the record name.
    pub id: String,
    /// Research area (`physics`, `society`, `engineering`); empty when absent.
    pub area: String,
    /// Tier, 0 when absent.
    pub tier: u32,
    /// Prerequisite identifiers in authored order, possibly dangling.
    pub prerequisites: Vec<String>,
    /// Hazardous technology (rendered red).
    pub is_dangerous: bool,
    /// Repeatable technology.
    pub is_repeatable: bool,
    /// Marked `start_tech = yes`; its prerequisites are always empty.
    pub is_start: bool,
    /// Raw cost token.
    pub cost: String,
    /// Category tags.
    pub categories: Vec<String>,
    /// Tokens from the `potential` / `starting_potential` block.
    pub unlock_conditions: Vec<String>,
    successors: Vec<String>,
}

impl Technology {
    /// Create a technology with default fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Technologies that list this one as a prerequisite, in discovery order.
    pub fn successors(&self) -> &[String] {
        &self.successors
    }

    /// Research area, or `"unknown"` when the record had none.
    pub fn area_or_unknown(&self) -> &str {
        if self.area.is_empty() { "unknown" } else { &self.area }
    }
}

/// Insertion-ordered map from identifier to [`Technology`].
///
/// The store is append-only: the first definition of an identifier wins and
/// later definitions are ignored. Iteration follows insertion order, which
/// makes graph building and cycle reporting deterministic for a given source
/// order.
#[derive(Debug, Default)]
pub struct TechStore {
    techs: Vec<Technology>,
    index: HashMap<String, usize>,
}

impl TechStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a technology unless its identifier is already known.
    ///
    /// Returns `false` and leaves the store untouched for duplicates.
    pub fn insert(&mut self, tech: Technology) -> bool {
        if self.index.contains_key(&tech.id) {
            tracing::trace!("Ignoring duplicate definition of {}", tech.id);
            return false;
        }
        self.index.insert(tech.id.clone(), self.techs.len());
        self.techs.push(tech);
        true
    }

    /// Look up a technology.
    pub fn get(&self, id: &str) -> Option<&Technology> {
        self.index.get(id).map(|&i| &self.techs[i])
    }

    /// Whether the identifier is known.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Technologies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Technology> {
        self.techs.iter()
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.techs.iter().map(|t| t.id.as_str())
    }

    /// Identifiers in lexicographic order, as used for output files.
    pub fn sorted_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.ids().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of technologies.
    pub fn len(&self) -> usize {
        self.techs.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.techs.is_empty()
    }

    /// Derive successor lists from prerequisite lists.
    ///
    /// For every technology `A` and every prerequisite `P` of `A` that names a
    /// known technology, `A` is appended to `P`'s successors unless already
    /// present. Existing successor lists are cleared first so that calling
    /// this again after more sources were parsed rebuilds the full relation.
    ///
    /// Returns the number of dangling prerequisite references skipped.
    pub fn link_successors(&mut self) -> usize {
        for tech in &mut self.techs {
            tech.successors.clear();
        }

        let mut edges: Vec<(usize, String)> = Vec::new();
        let mut dangling = 0;
        for tech in &self.techs {
            for prerequisite in &tech.prerequisites {
                match self.index.get(prerequisite) {
                    Some(&target) => edges.push((target, tech.id.clone())),
                    None => {
                        dangling += 1;
                        tracing::trace!(
                            "{}",
                            TechTreeError::DanglingReference {
                                id: tech.id.clone(),
                                prerequisite: prerequisite.clone(),
                            }
                        );
                    }
                }
            }
        }

        for (target, successor) in edges {
            let list = &mut self.techs[target].successors;
            if !list.contains(&successor) {
                list.push(successor);
            }
        }

        dangling
    }
}
