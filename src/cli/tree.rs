//! `techtree tree <TECH_ID>`

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;

use super::CliConfig;
use crate::core::TechTreeError;
use crate::generator::Generator;
use crate::render::{Language, TreeRenderer};

/// Language accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    English,
    SimpChinese,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::English => Language::English,
            LanguageArg::SimpChinese => Language::SimpChinese,
        }
    }
}

/// Print the tree of one technology.
///
/// Lines are printed exactly as they are written into the localisation files.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Technology identifier, e.g. `tech_lasers_1`
    tech_id: String,

    /// Language of the UI strings
    #[arg(short, long, value_enum, default_value_t = LanguageArg::English)]
    language: LanguageArg,
}

impl TreeCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config = cli.load_generator_config().await?;
        let generator = Generator::new(config, cli.show_progress());
        let graph = generator.load_graph().await;
        let store = &graph.store;

        let Some(tech) = store.get(&self.tech_id) else {
            return Err(TechTreeError::TechNotFound {
                id: self.tech_id,
            }
            .into());
        };

        let language = Language::from(self.language);
        let style = &generator.config().style;
        let strings = style.strings(language);
        let oversized = generator.oversized_roots(store);
        let renderer = TreeRenderer::new(store, style, &oversized);

        println!("{} ({}{})", tech.id.cyan().bold(), strings.tier_label, tech.tier);

        if renderer.is_oversized(&tech.id) {
            println!("{}", strings.skip_long_tree.red());
            return Ok(());
        }

        let lines = renderer.subtree_lines(&tech.id, language);
        if lines.is_empty() {
            println!("{}", strings.top_level.yellow());
        }
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }
}
