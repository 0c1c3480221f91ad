use super::*;
use anyhow::Context;
use std::fs;
use tracing::info;

use super::console::ConsoleGenerator;

pub struct Reporter {
    format: OutputFormat,
    output_path: Option<String>,
    color: bool,
}

impl Reporter {
    /// Without an `output_path` the report goes to stdout.
    pub fn new(format: &str, output_path: Option<&str>, color: bool) -> Self {
        let format = OutputFormat::from(format);
        let output_path = output_path.map(|path| super::add_file_extension(path, &format));

        Self {
            format,
            // Escape codes do not belong in a file.
            color: color && output_path.is_none(),
            output_path,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub async fn render(&mut self, report: &LeaderboardReport) -> Result<String> {
        match self.format {
            OutputFormat::Console => {
                let mut generator = ConsoleGenerator::new(self.color);
                generator.generate(report).await
            }
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        }
    }

    pub async fn generate_report(&mut self, report: &LeaderboardReport) -> Result<()> {
        let content = self.render(report).await?;

        match &self.output_path {
            Some(path) => {
                fs::write(path, content)
                    .with_context(|| format!("Failed to write report to {}", path))?;
                info!("Report saved to {}", path);
            }
            None => println!("{}", content),
        }
        Ok(())
    }
}
