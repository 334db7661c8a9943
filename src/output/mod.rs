//! Localisation file generation.
//!
//! Two files are produced per language:
//!
//! - `zztechtreemain_l_<lang>.yml` defines `<id>_techtree` for every
//!   technology with the rendered tree fragment
//! - `zztechtreereplaced_l_<lang>.yml` redefines `<id>_desc` as the original
//!   description, the tier and a reference to `$<id>_techtree$`
//!
//! The game's load order for replacement files differs between setups, so the
//! same file is written to several locations below `<dir>/localisation/`.
//! Files are UTF-8 with a byte order mark, as the game requires.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::constants::{LOCALISATION_DIR, UTF8_BOM};
use crate::core::TechTreeError;
use crate::graph::TechStore;
use crate::localization::DescriptionIndex;
use crate::render::{Language, TreeRenderer, TreeStyle};
use crate::utils::{ProgressBar, atomic_write};

/// Name of the tree definition file for `language`.
pub fn main_file_name(language: Language) -> String {
    format!("zztechtreemain_l_{}.yml", language.code())
}

/// Name of the description replacement file for `language`.
pub fn replaced_file_name(language: Language) -> String {
    format!("zztechtreereplaced_l_{}.yml", language.code())
}

/// Every location that receives a copy of `file_name`.
pub fn fan_out_paths(out_dir: &Path, language: Language, file_name: &str) -> Vec<PathBuf> {
    let base = out_dir.join(LOCALISATION_DIR);
    let code = language.code();
    vec![
        base.join(file_name),
        base.join(code).join(file_name),
        base.join("replace").join(file_name),
        base.join(code).join("replace").join(file_name),
        base.join("zzz_tech_trees").join("replace").join(file_name),
    ]
}

/// Outcome of [`LocalisationWriter::write_all`].
#[derive(Debug, Clone, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    /// Technologies without a description, per language.
    pub missing_descriptions: Vec<(Language, usize)>,
}

/// Produces and writes the localisation files.
pub struct LocalisationWriter<'a> {
    out_dir: PathBuf,
    store: &'a TechStore,
    renderer: &'a TreeRenderer<'a>,
    descriptions: &'a DescriptionIndex,
    style: &'a TreeStyle,
    progress: Option<ProgressBar>,
}

impl<'a> LocalisationWriter<'a> {
    pub fn new(
        out_dir: impl Into<PathBuf>,
        store: &'a TechStore,
        renderer: &'a TreeRenderer<'a>,
        descriptions: &'a DescriptionIndex,
        style: &'a TreeStyle,
    ) -> Self {
        Self {
            out_dir: out_dir.into(),
            store,
            renderer,
            descriptions,
            style,
            progress: None,
        }
    }

    /// Advance `progress` by one for every path written or failed.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Number of paths [`LocalisationWriter::write_all`] attempts.
    pub fn path_count(&self) -> usize {
        Language::ALL
            .iter()
            .map(|&language| {
                fan_out_paths(&self.out_dir, language, &main_file_name(language)).len()
                    + fan_out_paths(&self.out_dir, language, &replaced_file_name(language)).len()
            })
            .sum()
    }

    /// Content of the tree definition file.
    pub fn main_file_content(&self, language: Language) -> String {
        let strings = self.style.strings(language);
        let mut lines = vec![
            format!("{}:", language.yml_key()),
            format!(" technology_tree_title:0 \"{}\"", strings.title),
            format!(" tech_tree_max_level:0 \"{}\"", strings.top_level),
        ];

        for id in self.store.sorted_ids() {
            let fragment = self.renderer.render_fragment(id, language);
            if !fragment.is_empty() {
                lines.push(format!(" {id}_techtree:0 \"{fragment}\""));
            }
        }

        lines.join("\n")
    }

    /// Content of the description replacement file and the number of
    /// technologies that had no description.
    pub fn replaced_file_content(&self, language: Language) -> (String, usize) {
        let tier_label = &self.style.strings(language).tier_label;
        let mut lines = vec![format!("{}:", language.yml_key())];
        let mut missing = 0;

        for id in self.store.sorted_ids() {
            let Some(tech) = self.store.get(id) else {
                continue;
            };
            let description = self.descriptions.description(id, language);
            if description.is_empty() {
                missing += 1;
            }
            lines.push(format!(
                " {id}_desc:0 \"{description}({tier_label}{tier})${id}_techtree$\"",
                tier = tech.tier
            ));
        }

        (lines.join("\n"), missing)
    }

    /// Write both files of every language to every fan-out path.
    ///
    /// A path that cannot be written is logged and skipped; the remaining
    /// paths are still written.
    ///
    /// # Errors
    ///
    /// Fails only when a background write task cannot be joined.
    pub async fn write_all(&self) -> Result<WriteReport> {
        let mut report = WriteReport::default();

        for language in Language::ALL {
            let main = self.main_file_content(language);
            self.write_copies(language, &main_file_name(language), main, &mut report).await?;

            let (replaced, missing) = self.replaced_file_content(language);
            if missing > 0 {
                warn!("{missing} technologies have no {language} description");
            }
            report.missing_descriptions.push((language, missing));
            self.write_copies(language, &replaced_file_name(language), replaced, &mut report)
                .await?;
        }

        Ok(report)
    }

    async fn write_copies(
        &self,
        language: Language,
        file_name: &str,
        content: String,
        report: &mut WriteReport,
    ) -> Result<()> {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(content.as_bytes());

        for path in fan_out_paths(&self.out_dir, language, file_name) {
            let target = path.clone();
            let data = bytes.clone();
            let result = tokio::task::spawn_blocking(move || atomic_write(&target, &data))
                .await
                .context("Failed to join output write task")?;
            if let Some(progress) = &self.progress {
                progress.inc(1);
            }

            match result {
                Ok(()) => {
                    debug!("Wrote {}", path.display());
                    report.written.push(path);
                }
                Err(e) => {
                    let error = TechTreeError::OutputWriteError {
                        path: path.display().to_string(),
                        reason: format!("{e:#}"),
                    };
                    warn!("{error}: {e:#}");
                    report.failed.push(path);
                }
            }
        }

        Ok(())
    }
}
