//! Filesystem and terminal helpers
//!
//! - [`fs`] - directory creation and atomic file writes
//! - [`progress`] - progress bars and spinners for long-running phases
//!
//! # Example
//!
//! ```rust,no_run
//! use techtree_cli::utils::{atomic_write, ensure_dir, ProgressBar};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("output/localisation"))?;
//! atomic_write(Path::new("output/localisation/example.yml"), b"l_english:")?;
//!
//! let spinner = ProgressBar::new_spinner(true);
//! spinner.set_message("Scanning technologies");
//! spinner.finish_and_clear();
//! # Ok(())
//! # }
//! ```

pub mod fs;
pub mod progress;

pub use fs::{atomic_write, ensure_dir};
pub use progress::ProgressBar;
