//! Discovery of game and mod sources.
//!
//! Sources are enumerated in a fixed order so that "first definition wins"
//! is reproducible across machines:
//!
//! 1. `<base_game>/common/technology/*.txt`
//! 2. for every mod directory, sorted by name and allowed by the
//!    [`ModFilter`], `<mod>/common/technology/*.txt`
//!
//! Files inside one directory are visited in file-name order. Localisation
//! files are found recursively below `localisation/`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{GeneratorConfig, ModFilter};
use crate::constants::{LOCALISATION_DIR, SCRIPT_EXTENSION, TECHNOLOGY_DIR};
use crate::graph::TechStore;
use crate::parser::TechParser;
use crate::render::Language;
use crate::script::read_source;

/// One directory below the mod folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModDir {
    /// Directory name, used as the mod id by the filter.
    pub id: String,
    pub path: PathBuf,
}

/// Result of scanning technology sources.
#[derive(Debug, Clone, Default)]
pub struct TechScanSummary {
    /// Technologies defined by the base game.
    pub base_ids: HashSet<String>,
    /// Files read successfully.
    pub files_read: usize,
    /// Files that could not be read and contributed nothing.
    pub unreadable: usize,
    /// Mods that added at least one technology.
    pub mods_contributing: usize,
}

/// Enumerates technology and localisation files of the game and its mods.
#[derive(Debug, Clone)]
pub struct SourceScanner {
    base_game_path: PathBuf,
    mod_folder_path: PathBuf,
    filter: ModFilter,
}

impl SourceScanner {
    pub fn new(base_game_path: impl Into<PathBuf>, mod_folder_path: impl Into<PathBuf>, filter: ModFilter) -> Self {
        Self {
            base_game_path: base_game_path.into(),
            mod_folder_path: mod_folder_path.into(),
            filter,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(
            config.paths.base_game_path.clone(),
            config.paths.mod_folder_path.clone(),
            config.mod_filter(),
        )
    }

    pub fn filter(&self) -> &ModFilter {
        &self.filter
    }

    pub fn base_game_path(&self) -> &Path {
        &self.base_game_path
    }

    /// Every mod directory, sorted by name, before filtering.
    ///
    /// A missing mod folder yields no mods.
    pub fn mod_dirs(&self) -> Vec<ModDir> {
        if !self.mod_folder_path.is_dir() {
            debug!("Mod folder {} does not exist", self.mod_folder_path.display());
            return Vec::new();
        }

        WalkDir::new(&self.mod_folder_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| ModDir {
                id: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
            })
            .collect()
    }

    /// A single mod directory by id, if it exists.
    pub fn mod_dir(&self, id: &str) -> Option<ModDir> {
        let path = self.mod_folder_path.join(id);
        path.is_dir().then(|| ModDir {
            id: id.to_string(),
            path,
        })
    }

    /// Mod directories whose technologies are scanned.
    pub fn included_mods(&self) -> Vec<ModDir> {
        self.mod_dirs().into_iter().filter(|m| self.filter.should_include(&m.id)).collect()
    }

    /// `*.txt` files directly inside `<root>/common/technology`, sorted.
    pub fn technology_files(root: &Path) -> Vec<PathBuf> {
        let dir = root.join(TECHNOLOGY_DIR);
        if !dir.is_dir() {
            return Vec::new();
        }

        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == SCRIPT_EXTENSION))
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    /// Localisation files of one language anywhere below `<root>/localisation`, sorted.
    ///
    /// A file belongs to a language when its name contains `l_<code>` and
    /// ends with `.yml`.
    pub fn localisation_files(root: &Path, language: Language) -> Vec<PathBuf> {
        let dir = root.join(LOCALISATION_DIR);
        if !dir.is_dir() {
            return Vec::new();
        }

        let marker = format!("l_{}", language.code());
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                let name = entry.file_name().to_string_lossy();
                name.contains(&marker) && name.ends_with(".yml")
            })
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    /// Parse every technology source into `store`, base game first.
    pub async fn scan_technologies(&self, parser: &TechParser, store: &mut TechStore) -> TechScanSummary {
        let mut summary = TechScanSummary::default();

        let added = parse_files(
            &Self::technology_files(&self.base_game_path),
            parser,
            store,
            &mut summary,
        )
        .await;
        debug!("Base game defines {added} technologies");
        summary.base_ids = store.ids().map(str::to_string).collect();

        for mod_dir in self.included_mods() {
            let files = Self::technology_files(&mod_dir.path);
            if files.is_empty() {
                continue;
            }
            let added = parse_files(&files, parser, store, &mut summary).await;
            if added > 0 {
                summary.mods_contributing += 1;
                debug!("Mod {} adds {added} technologies", mod_dir.id);
            }
        }

        summary
    }
}

async fn parse_files(
    files: &[PathBuf],
    parser: &TechParser,
    store: &mut TechStore,
    summary: &mut TechScanSummary,
) -> usize {
    let mut added = 0;
    for path in files {
        match read_source(path).await {
            Ok(text) => {
                summary.files_read += 1;
                let count = parser.parse_source(&text, store);
                debug!("Parsed {} technologies from {}", count, path.display());
                added += count;
            }
            Err(e) => {
                summary.unreadable += 1;
                warn!("{e}");
            }
        }
    }
    added
}
