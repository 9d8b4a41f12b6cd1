use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, Local};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};
use tracing::info;

use crate::{config::Config, storage::log_file::EventLog, utils::clock::Clock};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct LogCommand {
    #[arg(
        long,
        help = "When the activity started, now by default. Like \"15 minutes ago\" or \"9:45\""
    )]
    at: Option<String>,
    #[arg(
        long,
        default_value_t = DateStyle::Uk,
        help = "Date order used during parsing. Uk is day/month/year, Us is month/day/year"
    )]
    date_style: DateStyle,
    #[arg(help = "Name of the activity. Leave it out to mark a stretch of no activity")]
    name: Vec<String>,
}

impl LogCommand {
    pub fn name(&self) -> String {
        self.name.join(" ")
    }
}

/// Command to process `log` command. Appends a single line to the activity log.
pub async fn process_log_command(
    command: LogCommand,
    config: &Config,
    clock: &dyn Clock,
) -> Result<()> {
    let moment = resolve_moment(command.at.as_deref(), command.date_style, clock)?;
    let name = command.name();

    EventLog::new(config.log_file.clone())
        .append(&name, &moment)
        .await?;
    info!("Logged {name:?} at {moment}");
    Ok(())
}

fn resolve_moment(
    at: Option<&str>,
    date_style: DateStyle,
    clock: &dyn Clock,
) -> Result<DateTime<Local>> {
    let now = clock.time().with_timezone(&Local);
    let Some(at) = at else {
        return Ok(now);
    };
    parse_date_string(at, now, date_style.into()).map_err(|e| {
        Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate time {e}"),
            )
            .into()
    })
}
