//! Turns a finished [Report] into something a person can look at.

pub mod html;
pub mod json;
pub mod text;

use std::{fmt::Display, io::Write};

use anyhow::Result;
use chrono::TimeZone;
use clap::ValueEnum;

use crate::timeline::report::Report;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone page with one column per day
    #[default]
    Html,
    /// Colored strip for the terminal
    Text,
    /// Machine readable report
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn render<Tz: TimeZone>(
    format: OutputFormat,
    report: &Report<Tz>,
    out: &mut impl Write,
) -> Result<()>
where
    Tz::Offset: Display,
{
    match format {
        OutputFormat::Html => html::render_html(report, out),
        OutputFormat::Text => text::render_text(report, out),
        OutputFormat::Json => json::render_json(report, out),
    }
}
