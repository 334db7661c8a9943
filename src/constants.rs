//! Global constants used throughout the techtree codebase.
//!
//! File layout conventions of the game, output naming and the size limit
//! for rendered trees live here so they are easy to find.

/// Roots whose reachable-successor count exceeds this are not rendered.
///
/// Very large trees make the in-game description tooltip unusable and can
/// crash the game, so they are replaced with a short warning.
pub const LONG_TREE_THRESHOLD: usize = 100;

/// Default configuration file name, looked up next to the executable first.
pub const CONFIG_FILE_NAME: &str = "techtree.toml";

/// Technology scripts relative to a game or mod root.
pub const TECHNOLOGY_DIR: &str = "common/technology";

/// Localisation root relative to a game or mod root.
pub const LOCALISATION_DIR: &str = "localisation";

/// Extension of technology script files.
pub const SCRIPT_EXTENSION: &str = "txt";

/// Default output root.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Indentation unit for one level of a rendered tree.
pub const TREE_INDENT: &str = "    ";

/// UTF-8 byte order mark; the game expects it on localisation files.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
