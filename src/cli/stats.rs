//! `techtree stats`

use anyhow::Result;
use clap::{Args, ValueEnum};

use super::CliConfig;
use crate::generator::Generator;
use crate::stats::GenerationStats;

/// Output format of the statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    Text,
    Json,
}

/// Print technology statistics.
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = StatsFormat::Text)]
    format: StatsFormat,
}

impl StatsCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config = cli.load_generator_config().await?;
        let generator = Generator::new(config, cli.show_progress());
        let graph = generator.load_graph().await;
        let descriptions = generator.load_descriptions(&graph.store).await;
        let oversized = generator.oversized_roots(&graph.store);

        let stats = GenerationStats::collect(
            &graph.store,
            &graph.scan,
            Some(&descriptions),
            Some(&oversized),
        );

        match self.format {
            StatsFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
            StatsFormat::Text => {
                for line in stats.lines() {
                    println!("{line}");
                }
            }
        }
        Ok(())
    }
}
