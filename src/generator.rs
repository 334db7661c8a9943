//! End-to-end generation.
//!
//! A run goes through these phases in order:
//!
//! 1. scan technology sources into a [`TechStore`]
//! 2. link successors
//! 3. collect descriptions
//! 4. size every root and mark the oversized ones
//! 5. detect cycles (reported, never fatal)
//! 6. collect statistics
//! 7. render every tree and write the localisation files

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::core::TechTreeError;
use crate::graph::{CycleReport, OversizedRoots, TechStore, find_cycles};
use crate::localization::DescriptionIndex;
use crate::output::{LocalisationWriter, WriteReport};
use crate::parser::TechParser;
use crate::render::TreeRenderer;
use crate::scan::{SourceScanner, TechScanSummary};
use crate::stats::GenerationStats;
use crate::utils::ProgressBar;
use crate::utils::progress::spinner_with_message;

/// A scanned and linked technology graph.
#[derive(Debug)]
pub struct LoadedGraph {
    pub store: TechStore,
    pub scan: TechScanSummary,
    /// Prerequisite references to unknown technologies.
    pub dangling: usize,
}

/// Everything a full run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub stats: GenerationStats,
    pub cycles: CycleReport,
    pub output: WriteReport,
}

/// Drives the generation phases for one configuration.
pub struct Generator {
    config: GeneratorConfig,
    parser: TechParser,
    scanner: SourceScanner,
    show_progress: bool,
}

impl Generator {
    pub fn new(config: GeneratorConfig, show_progress: bool) -> Self {
        let parser = TechParser::new(config.rules.clone());
        let scanner = SourceScanner::from_config(&config);
        Self {
            config,
            parser,
            scanner,
            show_progress,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn scanner(&self) -> &SourceScanner {
        &self.scanner
    }

    /// Scan every technology source and link successors.
    pub async fn load_graph(&self) -> LoadedGraph {
        let spinner = spinner_with_message("Scanning technology files", self.show_progress);

        let mut store = TechStore::new();
        let scan = self.scanner.scan_technologies(&self.parser, &mut store).await;
        let dangling = store.link_successors();

        spinner.finish_and_clear();
        info!(
            "Loaded {} technologies from {} files ({} from mods)",
            store.len(),
            scan.files_read,
            store.len() - scan.base_ids.len()
        );
        if scan.unreadable > 0 {
            warn!("{} technology files could not be read and were skipped", scan.unreadable);
        }
        if dangling > 0 {
            debug!("{dangling} prerequisite references name unknown technologies");
        }

        LoadedGraph {
            store,
            scan,
            dangling,
        }
    }

    /// Collect descriptions for the technologies in `store`.
    pub async fn load_descriptions(&self, store: &TechStore) -> DescriptionIndex {
        let spinner = spinner_with_message("Reading localisation", self.show_progress);
        let index = DescriptionIndex::load(&self.scanner, store).await;
        spinner.finish_and_clear();
        index
    }

    /// Roots whose trees are too large to render.
    pub fn oversized_roots(&self, store: &TechStore) -> OversizedRoots {
        OversizedRoots::compute(store, self.config.output.long_tree_threshold)
    }

    /// Detect cycles and log each one.
    pub fn cycle_report(store: &TechStore) -> CycleReport {
        let cycles = find_cycles(store);
        for cycle in &cycles {
            debug!(
                "{}",
                TechTreeError::CyclicDependency {
                    cycle: cycle.to_string()
                }
            );
        }
        CycleReport::from_cycles(cycles)
    }

    /// Run every phase and write the output below `output_dir`.
    ///
    /// # Errors
    ///
    /// Fails when the output cannot be written at all. Unreadable sources,
    /// cycles and single failed output paths are not errors.
    pub async fn run(&self, output_dir: &Path) -> Result<RunSummary> {
        for line in self.scanner.filter().summary_lines() {
            info!("{line}");
        }

        let graph = self.load_graph().await;
        let store = &graph.store;
        let descriptions = self.load_descriptions(store).await;
        let oversized = self.oversized_roots(store);
        if !oversized.is_empty() {
            info!(
                "{} technologies unlock more than {} others and are not rendered",
                oversized.len(),
                oversized.threshold()
            );
        }

        let cycles = Self::cycle_report(store);
        let stats =
            GenerationStats::collect(store, &graph.scan, Some(&descriptions), Some(&oversized));

        let style = &self.config.style;
        let renderer = TreeRenderer::new(store, style, &oversized);
        let writer = LocalisationWriter::new(output_dir, store, &renderer, &descriptions, style);
        let bar = ProgressBar::new(writer.path_count() as u64, self.show_progress);
        bar.set_prefix("Writing");
        let output = writer.with_progress(bar.clone()).write_all().await?;
        bar.finish_and_clear();

        info!("Wrote {} files to {}", output.written.len(), output_dir.display());

        Ok(RunSummary {
            stats,
            cycles,
            output,
        })
    }
}
