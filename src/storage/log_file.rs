use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{bail, Result};
use chrono::{DateTime, TimeZone};
use fs4::tokio::AsyncFileExt;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::debug;

use crate::{
    timeline::report::{build_report, read_report, Report},
    utils::{clock::Clock, time::to_log_timestamp},
};

/// The activity log on disk. Reads take a shared lock and appends an exclusive one, so a reader
/// never sees half of a line.
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Builds a report of the whole log. A log that doesn't exist yet is empty.
    pub async fn read_report<Tz: TimeZone>(
        &self,
        tz: &Tz,
        clock: &dyn Clock,
    ) -> Result<Report<Tz>> {
        debug!("Reading {:?}", self.path);
        let mut file = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(build_report(vec![], tz, clock));
            }
            Err(e) => Err(e)?,
        };

        file.lock_shared()?;
        let report = read_report(&mut file, tz, clock).await;
        file.unlock_async().await?;

        Ok(report?)
    }

    /// Appends an entry stating that `name` started at `moment`.
    pub async fn append<Tz: TimeZone>(&self, name: &str, moment: &DateTime<Tz>) -> Result<()>
    where
        Tz::Offset: std::fmt::Display,
    {
        if name.contains(['\n', '\r']) {
            bail!("Activity name can't span several lines: {name:?}");
        }
        let line = format!("{} {name}\n", to_log_timestamp(moment));

        if let Some(parent) = self.path.parent().filter(|v| !v.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = File::options()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        // Semi-safe acquire-release for a file
        file.lock_exclusive()?;
        let result = Self::append_with_file(&mut file, &line).await;
        file.unlock_async().await?;
        debug!("Appended {line:?} to {:?}", self.path);
        result
    }

    async fn append_with_file(file: &mut File, line: &str) -> Result<()> {
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
