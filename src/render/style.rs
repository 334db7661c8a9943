//! Presentation data for rendered trees.
//!
//! Icons and UI strings are plain configuration. They can be overridden from
//! the `[style]` section of `techtree.toml`; every field falls back to the
//! stock tables below.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Output language of generated localisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    English,
    SimpChinese,
}

impl Language {
    /// Every supported language, in output order.
    pub const ALL: [Language; 2] = [Language::English, Language::SimpChinese];

    /// Language code used in file names and directories.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::SimpChinese => "simp_chinese",
        }
    }

    /// Top-level key of a localisation file.
    pub fn yml_key(self) -> &'static str {
        match self {
            Language::English => "l_english",
            Language::SimpChinese => "l_simp_chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Localised UI strings of one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiStrings {
    pub title: String,
    pub top_level: String,
    pub requires: String,
    pub tier_label: String,
    pub already_shown: String,
    pub skip_long_tree: String,
}

impl UiStrings {
    pub fn english() -> Self {
        Self {
            title: "Technology Tree".to_string(),
            top_level: "Maximum Level Reached".to_string(),
            requires: "Requires".to_string(),
            tier_label: "Tier:".to_string(),
            already_shown: "already shown above".to_string(),
            skip_long_tree: "Too many follow-up technologies. Not displayed for performance."
                .to_string(),
        }
    }

    pub fn simp_chinese() -> Self {
        Self {
            title: "科技树".to_string(),
            top_level: "已达到顶级".to_string(),
            requires: "还需".to_string(),
            tier_label: "级别:".to_string(),
            already_shown: "已在上方展示".to_string(),
            skip_long_tree: "后续科技太多，性能原因不做展示".to_string(),
        }
    }
}

/// UI strings for every language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageStrings {
    pub english: UiStrings,
    pub simp_chinese: UiStrings,
}

impl Default for LanguageStrings {
    fn default() -> Self {
        Self {
            english: UiStrings::english(),
            simp_chinese: UiStrings::simp_chinese(),
        }
    }
}

/// Icons and strings used by the tree renderer and the output writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeStyle {
    /// Research area to inline icon markup.
    pub area_icons: BTreeMap<String, String>,
    pub strings: LanguageStrings,
}

impl Default for TreeStyle {
    fn default() -> Self {
        let area_icons = [
            ("physics", "£physics£"),
            ("engineering", "£engineering£"),
            ("society", "£society£"),
        ]
        .into_iter()
        .map(|(area, icon)| (area.to_string(), icon.to_string()))
        .collect();

        Self {
            area_icons,
            strings: LanguageStrings::default(),
        }
    }
}

impl TreeStyle {
    /// Strings for `language`.
    pub fn strings(&self, language: Language) -> &UiStrings {
        match language {
            Language::English => &self.strings.english,
            Language::SimpChinese => &self.strings.simp_chinese,
        }
    }

    /// Icon for a research area, empty when the area has none.
    pub fn icon(&self, area: &str) -> &str {
        self.area_icons.get(area).map(String::as_str).unwrap_or("")
    }
}
