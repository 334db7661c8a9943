//! Cycle detection over successor edges.
//!
//! Cycles are reported to the operator but never block generation: the tree
//! renderer tolerates them structurally.

use std::collections::HashSet;
use std::fmt;

use super::TechStore;

/// One cycle, as an identifier sequence that ends where it began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle(Vec<String>);

impl Cycle {
    /// Identifiers along the cycle, first and last equal.
    pub fn nodes(&self) -> &[String] {
        &self.0
    }

    /// A technology that unlocks itself: `[X, X]`.
    pub fn is_self_loop(&self) -> bool {
        self.0.len() == 2 && self.0[0] == self.0[1]
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" -> "))
    }
}

struct Frame<'a> {
    id: &'a str,
    successors: &'a [String],
    next: usize,
}

/// Find cycles in the successor graph.
///
/// Depth-first search from every technology in store order, skipping roots
/// already visited from an earlier root. When an edge leads to a node on the
/// current path, the path slice from that node through the current node, plus
/// the node again, is recorded as a cycle.
pub fn find_cycles(store: &TechStore) -> Vec<Cycle> {
    let mut cycles = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();

    for root in store.iter() {
        if visited.contains(root.id.as_str()) {
            continue;
        }

        visited.insert(root.id.as_str());
        let mut on_path: HashSet<&str> = HashSet::from([root.id.as_str()]);
        let mut stack = vec![Frame {
            id: root.id.as_str(),
            successors: root.successors(),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let successors = frame.successors;
            let Some(child) = successors.get(frame.next) else {
                on_path.remove(frame.id);
                stack.pop();
                continue;
            };
            frame.next += 1;
            let child = child.as_str();

            if on_path.contains(child) {
                let start = stack.iter().position(|f| f.id == child).unwrap_or(0);
                let mut nodes: Vec<String> =
                    stack[start..].iter().map(|f| f.id.to_string()).collect();
                nodes.push(child.to_string());
                cycles.push(Cycle(nodes));
                continue;
            }

            if visited.contains(child) {
                continue;
            }
            let Some(tech) = store.get(child) else {
                continue;
            };

            visited.insert(tech.id.as_str());
            on_path.insert(tech.id.as_str());
            stack.push(Frame {
                id: tech.id.as_str(),
                successors: tech.successors(),
                next: 0,
            });
        }
    }

    cycles
}

/// Cycles split for the operator summary.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Technologies that unlock themselves.
    pub self_loops: Vec<String>,
    /// Cycles through two or more technologies.
    pub complex: Vec<Cycle>,
}

impl CycleReport {
    /// Split detected cycles into self-loops and longer cycles.
    pub fn from_cycles(cycles: Vec<Cycle>) -> Self {
        let mut report = Self::default();
        for cycle in cycles {
            if cycle.is_self_loop() {
                report.self_loops.push(cycle.0[0].clone());
            } else {
                report.complex.push(cycle);
            }
        }
        report
    }

    /// Total number of cycles.
    pub fn total(&self) -> usize {
        self.self_loops.len() + self.complex.len()
    }

    /// Whether the graph is acyclic.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Operator-facing lines, without colors.
    pub fn lines(&self) -> Vec<String> {
        if self.is_empty() {
            return vec!["No circular dependencies found.".to_string()];
        }

        let mut lines = vec![format!("Found {} circular dependencies:", self.total())];
        if !self.self_loops.is_empty() {
            lines.push(format!("  Self-referencing technologies ({}):", self.self_loops.len()));
            for id in &self.self_loops {
                lines.push(format!("    {id} -> {id}"));
            }
        }
        if !self.complex.is_empty() {
            lines.push(format!("  Cycles ({}):", self.complex.len()));
            for (i, cycle) in self.complex.iter().enumerate() {
                lines.push(format!("    Cycle {}: {}", i + 1, cycle));
            }
        }
        lines
    }
}
