pub mod append;
pub mod view;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use append::{process_log_command, LogCommand};
use tracing::level_filters::LevelFilter;
use view::{process_view_command, ViewCommand};

use crate::{
    config::Config,
    utils::{
        clock::DefaultClock,
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Timestrip", version, long_about = None)]
#[command(about = "Turns a plain-text activity log into a day-by-day timeline", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. Defaults to $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(
        long = "log-file",
        global = true,
        help = "Activity log to read and append to. Defaults to timestrip.log in --dir"
    )]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Render the timeline of the activity log")]
    View {
        #[command(flatten)]
        command: ViewCommand,
    },
    #[command(about = "Record that an activity has started")]
    Log {
        #[command(flatten)]
        command: LogCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();
    let config = Config::resolve(args.dir, args.log_file)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &config.app_dir, logging_level, args.log)?;

    match args.commands {
        Commands::View { command } => process_view_command(command, &config, &DefaultClock).await,
        Commands::Log { command } => process_log_command(command, &config, &DefaultClock).await,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::render::OutputFormat;

    use super::{Args, Commands};

    #[test]
    fn test_parse_view() {
        let args =
            Args::try_parse_from(["timestrip", "view", "--format", "json", "--log-file", "a.log"])
                .unwrap();
        assert_eq!(args.log_file, Some(PathBuf::from("a.log")));
        let Commands::View { command } = args.commands else {
            panic!("Expected view command");
        };
        assert_eq!(command.format, OutputFormat::Json);
        assert_eq!(command.input, None);
    }

    #[test]
    fn test_parse_view_input() {
        let args = Args::try_parse_from(["timestrip", "view", "--input", "-"]).unwrap();
        let Commands::View { command } = args.commands else {
            panic!("Expected view command");
        };
        assert_eq!(command.input, Some(PathBuf::from("-")));

        let args = Args::try_parse_from(["timestrip", "view", "-i", "other.log"]).unwrap();
        let Commands::View { command } = args.commands else {
            panic!("Expected view command");
        };
        assert_eq!(command.input, Some(PathBuf::from("other.log")));
    }

    #[test]
    fn test_view_defaults_to_html() {
        let args = Args::try_parse_from(["timestrip", "view"]).unwrap();
        let Commands::View { command } = args.commands else {
            panic!("Expected view command");
        };
        assert_eq!(command.format, OutputFormat::Html);
    }

    #[test]
    fn test_parse_log() {
        let args = Args::try_parse_from(["timestrip", "--log", "log", "team", "meeting"]).unwrap();
        assert!(args.log);
        let Commands::Log { command } = args.commands else {
            panic!("Expected log command");
        };
        assert_eq!(command.name(), "team meeting");
    }

    #[test]
    fn test_unknown_format() {
        assert!(Args::try_parse_from(["timestrip", "view", "--format", "pdf"]).is_err());
    }
}
