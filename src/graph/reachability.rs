//! Reachable-set sizing over successor edges.
//!
//! Used to keep rendered trees bounded: a root whose reachable set is larger
//! than the configured threshold is rendered as a short warning instead.

use std::collections::HashSet;

use super::TechStore;

/// Count the distinct technologies reachable from `root` via successor edges.
///
/// The root itself is never counted, even when a cycle leads back to it.
/// Unknown roots have a count of 0. The traversal uses an explicit stack and
/// a visited set, so deep or cyclic graphs are handled without recursion.
pub fn reachable_count(store: &TechStore, root: &str) -> usize {
    let Some(tech) = store.get(root) else {
        return 0;
    };

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(tech.id.as_str());
    let mut stack: Vec<&str> = tech.successors().iter().map(String::as_str).collect();

    while let Some(id) = stack.pop() {
        if visited.contains(id) {
            continue;
        }
        let Some(next) = store.get(id) else {
            continue;
        };
        visited.insert(next.id.as_str());
        stack.extend(next.successors().iter().map(String::as_str));
    }

    visited.len() - 1
}

/// Roots whose reachable set exceeds a threshold.
///
/// Computed once per generation run after successors are linked.
#[derive(Debug, Clone, Default)]
pub struct OversizedRoots {
    threshold: usize,
    ids: HashSet<String>,
}

impl OversizedRoots {
    /// Size every technology in the store and keep those above `threshold`.
    pub fn compute(store: &TechStore, threshold: usize) -> Self {
        let ids = store
            .ids()
            .filter(|id| reachable_count(store, id) > threshold)
            .map(str::to_string)
            .collect();
        Self {
            threshold,
            ids,
        }
    }

    /// Whether the root exceeds the threshold.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of oversized roots.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no root is oversized.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Threshold used for the computation.
    pub fn threshold(&self) -> usize {
        self.threshold
    }
}
