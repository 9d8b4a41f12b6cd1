use std::{fmt::Display, io::Write};

use anyhow::Result;
use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::timeline::{aggregate::ActivityTotal, report::Report};

#[derive(Debug, Serialize)]
struct JsonReport {
    day_width: f64,
    days: Vec<JsonDay>,
    totals: Vec<ActivityTotal>,
}

#[derive(Debug, Serialize)]
struct JsonDay {
    date: NaiveDate,
    today: bool,
    events: Vec<JsonEvent>,
}

/// Durations are whole seconds.
#[derive(Debug, Serialize)]
struct JsonEvent {
    name: String,
    start: String,
    duration: i64,
    original_duration: i64,
    total_duration: i64,
    color: String,
    description: String,
    height: f64,
}

pub fn render_json<Tz: TimeZone>(report: &Report<Tz>, out: &mut impl Write) -> Result<()>
where
    Tz::Offset: Display,
{
    let days = report
        .days()
        .iter()
        .map(|day| JsonDay {
            date: day.date(),
            today: day.is_today(),
            events: day
                .events()
                .iter()
                .map(|event| JsonEvent {
                    name: event.name.clone(),
                    start: event.start.to_rfc3339(),
                    duration: event.duration.num_seconds(),
                    original_duration: event.original_duration.num_seconds(),
                    total_duration: event.total_duration.num_seconds(),
                    color: event.color(),
                    description: event.duration_description(),
                    height: event.height(),
                })
                .collect(),
        })
        .collect();

    let json = JsonReport {
        day_width: report.day_width(),
        days,
        totals: report.totals(),
    };
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}
