//! Temporary game installations.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::GeneratorConfig;
use crate::constants::{CONFIG_FILE_NAME, LOCALISATION_DIR, TECHNOLOGY_DIR};

/// A temporary directory laid out like a game installation plus mod folder.
///
/// ```text
/// <root>/game/common/technology/...
/// <root>/game/localisation/...
/// <root>/mods/<mod id>/common/technology/...
/// <root>/mods/<mod id>/localisation/...
/// <root>/output/
/// ```
///
/// The directory is removed when the fixture is dropped.
pub struct GameFixture {
    dir: TempDir,
}

impl GameFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("game")).expect("Failed to create game dir");
        fs::create_dir_all(dir.path().join("mods")).expect("Failed to create mods dir");
        Self {
            dir,
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn base_path(&self) -> PathBuf {
        self.root().join("game")
    }

    pub fn mods_path(&self) -> PathBuf {
        self.root().join("mods")
    }

    pub fn output_path(&self) -> PathBuf {
        self.root().join("output")
    }

    /// Add a base game technology file, `relative` to `common/technology`.
    pub fn base_tech(&self, relative: &str, content: &str) -> PathBuf {
        write(&self.base_path().join(TECHNOLOGY_DIR).join(relative), content)
    }

    /// Add a base game localisation file, `relative` to `localisation`.
    pub fn base_localisation(&self, relative: &str, content: &str) -> PathBuf {
        write(&self.base_path().join(LOCALISATION_DIR).join(relative), content)
    }

    /// Add a technology file to a mod.
    pub fn mod_tech(&self, mod_id: &str, relative: &str, content: &str) -> PathBuf {
        write(&self.mods_path().join(mod_id).join(TECHNOLOGY_DIR).join(relative), content)
    }

    /// Add a localisation file to a mod.
    pub fn mod_localisation(&self, mod_id: &str, relative: &str, content: &str) -> PathBuf {
        write(&self.mods_path().join(mod_id).join(LOCALISATION_DIR).join(relative), content)
    }

    /// Configuration pointing at this fixture, with output in `<root>/output`.
    pub fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        config.paths.base_game_path = self.base_path();
        config.paths.mod_folder_path = self.mods_path();
        config.output.dir = self.output_path();
        config
    }

    /// Write `techtree.toml` for this fixture, appending `extra` TOML.
    ///
    /// `extra` may add any section except `[paths]` and `[output]`.
    pub fn write_config(&self, extra: &str) -> PathBuf {
        let content = format!(
            "[paths]\nbase_game_path = {:?}\nmod_folder_path = {:?}\n\n[output]\ndir = {:?}\n\n{extra}",
            self.base_path().display().to_string(),
            self.mods_path().display().to_string(),
            self.output_path().display().to_string(),
        );
        write(&self.root().join(CONFIG_FILE_NAME), &content)
    }
}

impl Default for GameFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn write(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(path, content).expect("Failed to write fixture file");
    path.to_path_buf()
}
