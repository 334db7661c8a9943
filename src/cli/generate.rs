//! `techtree generate`

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use crate::core::TechTreeError;
use crate::generator::Generator;

/// Scan sources and write the localisation files.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Output directory, overriding `output.dir` from the configuration
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl GenerateCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config = cli.load_generator_config().await?;
        let output_dir = self.output.unwrap_or_else(|| config.output.dir.clone());

        let generator = Generator::new(config, cli.show_progress());
        let summary = generator.run(&output_dir).await?;

        let cycle_lines = summary.cycles.lines();
        for (i, line) in cycle_lines.iter().enumerate() {
            if i == 0 && !summary.cycles.is_empty() {
                println!("{}", line.yellow());
            } else {
                println!("{line}");
            }
        }
        println!();
        for line in summary.stats.lines() {
            println!("{line}");
        }
        println!();

        if summary.output.written.is_empty()
            && let Some(path) = summary.output.failed.first()
        {
            return Err(TechTreeError::OutputWriteError {
                path: path.display().to_string(),
                reason: "no output file could be written".to_string(),
            }
            .into());
        }

        if !summary.output.failed.is_empty() {
            println!(
                "{} {} output paths could not be written",
                "⚠".yellow(),
                summary.output.failed.len()
            );
        }
        println!(
            "{} Generated {} files in {}",
            "✓".green(),
            summary.output.written.len(),
            output_dir.display()
        );
        Ok(())
    }
}
