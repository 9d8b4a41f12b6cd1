use std::path::PathBuf;

use anyhow::Result;

use crate::utils::dir::create_application_default_path;

const DEFAULT_LOG_FILE: &str = "timestrip.log";

/// Everything the commands need to know about their environment. Built once from the command
/// line and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory for the application's own logs.
    pub app_dir: PathBuf,
    /// The activity log.
    pub log_file: PathBuf,
}

impl Config {
    /// Fills in whatever wasn't given with the platform defaults.
    pub fn resolve(app_dir: Option<PathBuf>, log_file: Option<PathBuf>) -> Result<Self> {
        let app_dir = app_dir.map_or_else(create_application_default_path, Ok)?;
        let log_file = log_file.unwrap_or_else(|| app_dir.join(DEFAULT_LOG_FILE));
        Ok(Self { app_dir, log_file })
    }
}
