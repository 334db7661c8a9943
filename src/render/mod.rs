//! Tree rendering.
//!
//! A technology's tree lists everything it transitively unlocks as indented
//! Paradox rich-text lines:
//!
//! ```text
//!     |--(1)['technology:tech_b', £physics£§W$tech_b$§!]
//!         |--(2)['technology:tech_d', §W$tech_d$§!] [§RRequires§! (1)['technology:tech_c', §W$tech_c$§!]]
//!     |--(1)['technology:tech_c', §W$tech_c$§!]
//!         |--(2)['technology:tech_d', §W$tech_d$§!] [§RRequires§! ...] §g(already shown above)§!
//! ```
//!
//! The walk is depth-first over successors, ordered by `(tier, id)`. Two sets
//! keep it finite and compact:
//!
//! - the *path* set holds the technologies on the active descent; reaching one
//!   of them again is a cycle and is not expanded
//! - the *expanded* set, scoped to one root, holds every technology whose
//!   subtree was already written; later encounters get a single annotated line
//!
//! Roots whose reachable set is oversized are never walked; they render as a
//! warning fragment instead.

pub mod style;

use std::collections::HashSet;

pub use style::{Language, LanguageStrings, TreeStyle, UiStrings};

use crate::constants::TREE_INDENT;
use crate::graph::{OversizedRoots, TechStore, Technology};

/// Heading shared by every fragment, a localisation reference to the title.
pub const FRAGMENT_HEADER: &str = r"\n\n§H$technology_tree_title$§!";

/// Line separator inside localisation strings.
pub const LINE_BREAK: &str = r"\n";

/// Localisation reference to the "maximum level" text.
pub const MAX_LEVEL_REF: &str = "$tech_tree_max_level$";

struct Frame<'a> {
    id: &'a str,
    children: Vec<&'a str>,
    next: usize,
    depth: usize,
}

/// Renders technology trees from a linked [`TechStore`].
///
/// The renderer only reads the store; every call allocates its own path and
/// expanded sets.
pub struct TreeRenderer<'a> {
    store: &'a TechStore,
    style: &'a TreeStyle,
    oversized: &'a OversizedRoots,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(store: &'a TechStore, style: &'a TreeStyle, oversized: &'a OversizedRoots) -> Self {
        Self {
            store,
            style,
            oversized,
        }
    }

    /// Whether `root` is rendered as the oversized warning.
    pub fn is_oversized(&self, root: &str) -> bool {
        self.oversized.contains(root)
    }

    /// Format one tree line for `id` at `depth`.
    ///
    /// `via` is the prerequisite the walk descended from. When the technology
    /// has more than one prerequisite, its other known prerequisites are
    /// listed in a "requires" clause. Returns `None` for unknown identifiers.
    pub fn format_entry(
        &self,
        id: &str,
        depth: usize,
        via: Option<&str>,
        language: Language,
    ) -> Option<String> {
        let tech = self.store.get(id)?;
        let mut entry = format!("{}|--{}", TREE_INDENT.repeat(depth), self.label(tech));

        if let Some(via) = via
            && tech.prerequisites.len() > 1
        {
            let others: Vec<String> = tech
                .prerequisites
                .iter()
                .filter(|p| p.as_str() != via)
                .filter_map(|p| self.store.get(p))
                .map(|p| self.label(p))
                .collect();

            if !others.is_empty() {
                let requires = &self.style.strings(language).requires;
                entry.push_str(&format!(" [§R{requires}§! {}]", others.join(" , ")));
            }
        }

        Some(entry)
    }

    /// Lines of the tree below `root`, without heading.
    ///
    /// Empty when the root is unknown or unlocks nothing. Oversized roots are
    /// not special-cased here; see [`TreeRenderer::render_fragment`].
    pub fn subtree_lines(&self, root: &str, language: Language) -> Vec<String> {
        let store = self.store;
        let Some(root) = store.get(root) else {
            return Vec::new();
        };
        let already_shown = &self.style.strings(language).already_shown;

        let mut lines = Vec::new();
        let mut path: HashSet<&str> = HashSet::from([root.id.as_str()]);
        let mut expanded: HashSet<&str> = HashSet::new();
        let mut stack = vec![Frame {
            id: root.id.as_str(),
            children: self.ordered_successors(root),
            next: 0,
            depth: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&child) = frame.children.get(frame.next) else {
                path.remove(frame.id);
                stack.pop();
                continue;
            };
            frame.next += 1;
            let parent = frame.id;
            let depth = frame.depth + 1;

            let Some(tech) = store.get(child) else {
                continue;
            };
            let Some(line) = self.format_entry(child, depth, Some(parent), language) else {
                continue;
            };

            if path.contains(child) || expanded.contains(child) {
                lines.push(format!("{line} §g({already_shown})§!"));
                continue;
            }

            lines.push(line);
            expanded.insert(tech.id.as_str());
            path.insert(tech.id.as_str());
            stack.push(Frame {
                id: tech.id.as_str(),
                children: self.ordered_successors(tech),
                next: 0,
                depth,
            });
        }

        lines
    }

    /// Complete localisation fragment for `root`.
    ///
    /// Unknown roots yield an empty string, oversized roots the warning,
    /// terminal roots the "maximum level" reference.
    pub fn render_fragment(&self, root: &str, language: Language) -> String {
        if !self.store.contains(root) {
            return String::new();
        }

        if self.is_oversized(root) {
            let skip = &self.style.strings(language).skip_long_tree;
            return format!("{FRAGMENT_HEADER}{LINE_BREAK}§R{skip}§!");
        }

        let lines = self.subtree_lines(root, language);
        if lines.is_empty() {
            return format!("{FRAGMENT_HEADER}{LINE_BREAK}§Y{MAX_LEVEL_REF}§!");
        }

        format!("{FRAGMENT_HEADER}{LINE_BREAK}{}", lines.join(LINE_BREAK))
    }

    fn label(&self, tech: &Technology) -> String {
        format!(
            "({})['technology:{}', {}§{}${}$§!]",
            tech.tier,
            tech.id,
            self.style.icon(&tech.area),
            color_code(tech),
            tech.id
        )
    }

    fn ordered_successors(&self, tech: &'a Technology) -> Vec<&'a str> {
        let store = self.store;
        let mut children: Vec<&'a str> = tech.successors().iter().map(String::as_str).collect();
        children.sort_by_key(|id| (store.get(id).map_or(0, |t| t.tier), *id));
        children
    }
}

/// Color of a technology label: hazardous, then high tier or repeatable.
fn color_code(tech: &Technology) -> char {
    if tech.is_dangerous {
        'R'
    } else if tech.tier >= 5 || tech.is_repeatable {
        'M'
    } else {
        'W'
    }
}
