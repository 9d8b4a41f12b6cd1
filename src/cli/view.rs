use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::debug;

use crate::{
    config::Config,
    render::{render, OutputFormat},
    storage::log_file::EventLog,
    timeline::report::read_report,
    utils::clock::Clock,
};

#[derive(Debug, Parser)]
pub struct ViewCommand {
    #[arg(long, short, default_value_t = OutputFormat::Html, help = "How to render the timeline")]
    pub(crate) format: OutputFormat,
    #[arg(
        long,
        short,
        value_name = "PATH",
        help = "Log to read instead of the configured one, - for stdin"
    )]
    pub(crate) input: Option<PathBuf>,
}

/// Command to process `view` command. Reads the whole log, builds the report and writes it to
/// stdout.
pub async fn process_view_command(
    ViewCommand { format, input }: ViewCommand,
    config: &Config,
    clock: &dyn Clock,
) -> Result<()> {
    let path = input.unwrap_or_else(|| config.log_file.clone());
    let report = if path.as_os_str() == "-" {
        read_report(tokio::io::stdin(), &Local, clock)
            .await
            .context("Failed to read the log from stdin")?
    } else {
        EventLog::new(path.clone())
            .read_report(&Local, clock)
            .await
            .with_context(|| format!("Failed to read {path:?}"))?
    };
    debug!("Rendering {} days as {format}", report.days().len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(format, &report, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use crate::{config::Config, render::OutputFormat, utils::clock::FixedClock};

    use super::{process_view_command, ViewCommand};

    #[tokio::test]
    async fn test_view_of_missing_input_creates_nothing() -> Result<()> {
        let dir = tempdir()?;
        let config = Config::resolve(Some(dir.path().join("state")), None)?;
        let input = dir.path().join("elsewhere").join("activities.log");
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap());
        let command = ViewCommand {
            format: OutputFormat::Json,
            input: Some(input),
        };

        process_view_command(command, &config, &clock).await?;

        assert!(!dir.path().join("elsewhere").exists());
        assert!(!config.log_file.exists());
        Ok(())
    }
}
