//! techtree - Stellaris technology tree generator
//!
//! Reads the technology scripts of the base game and of installed mods,
//! builds the prerequisite graph, and writes localisation files that show,
//! inside every technology's description, the tree of technologies it
//! unlocks.
//!
//! # Architecture Overview
//!
//! The pipeline runs in one pass per invocation:
//!
//! ```text
//! techtree.toml ──► scan ──► script ──► parser ──► graph ──┬──► render ──► output
//!                     │                                    ├──► cycles (report)
//!                     └──► localization ───────────────────┴──► stats  (report)
//! ```
//!
//! # Core Modules
//!
//! ## Parsing
//! - [`script`] - comment stripping, brace-block extraction, tolerant decoding
//! - [`parser`] - technology records to [`graph::Technology`] values
//!
//! ## Graph
//! - [`graph`] - the technology store, successor linking, reachability sizing
//!   and cycle detection
//! - [`render`] - cycle-safe, deduplicating tree rendering
//!
//! ## Collaborators
//! - [`config`] - `techtree.toml` and the mod filter
//! - [`scan`] - deterministic enumeration of game and mod sources
//! - [`localization`] - description extraction and merging
//! - [`output`] - localisation file generation and fan-out
//! - [`stats`] - generation statistics
//! - [`generator`] - orchestration of a full run
//!
//! ## Supporting Modules
//! - [`cli`] - command-line interface
//! - [`core`] - error types and user-facing error reporting
//! - [`utils`] - atomic writes and progress indicators
//!
//! # Example
//!
//! ```rust
//! use techtree_cli::graph::{OversizedRoots, TechStore};
//! use techtree_cli::parser::TechParser;
//! use techtree_cli::render::{Language, TreeRenderer, TreeStyle};
//!
//! let source = r#"
//! tech_lasers_1 = { tier = 0 area = physics }
//! tech_lasers_2 = { tier = 1 area = physics prerequisites = { "tech_lasers_1" } }
//! "#;
//!
//! let mut store = TechStore::new();
//! TechParser::default().parse_source(source, &mut store);
//! store.link_successors();
//!
//! let style = TreeStyle::default();
//! let oversized = OversizedRoots::compute(&store, 100);
//! let renderer = TreeRenderer::new(&store, &style, &oversized);
//!
//! let lines = renderer.subtree_lines("tech_lasers_1", Language::English);
//! assert_eq!(lines, vec!["    |--(1)['technology:tech_lasers_2', £physics£§W$tech_lasers_2$§!]"]);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod generator;
pub mod graph;
pub mod localization;
pub mod output;
pub mod parser;
pub mod render;
pub mod scan;
pub mod script;
pub mod stats;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
