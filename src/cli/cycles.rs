//! `techtree cycles`

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use crate::generator::Generator;

/// Report circular prerequisite chains.
///
/// Cycles never stop generation; this command only makes them visible.
#[derive(Args, Debug)]
pub struct CyclesCommand {}

impl CyclesCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config = cli.load_generator_config().await?;
        let generator = Generator::new(config, cli.show_progress());
        let graph = generator.load_graph().await;
        let report = Generator::cycle_report(&graph.store);

        for (i, line) in report.lines().iter().enumerate() {
            match (i, report.is_empty()) {
                (0, true) => println!("{}", line.green()),
                (0, false) => println!("{}", line.yellow()),
                _ => println!("{line}"),
            }
        }
        Ok(())
    }
}
