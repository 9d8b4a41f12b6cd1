use std::{fmt::Display, io::Write};

use ansi_term::{Colour, Style};
use anyhow::Result;
use chrono::TimeZone;

use crate::timeline::{
    present::{describe_duration, rgb_of},
    report::Report,
};

/// Characters a whole day takes, one per half an hour.
const BAR_WIDTH: f64 = 48.;

/// Prints every day as a list of colored bars followed by the totals of every activity. Empty
/// fragments and the midnight filler are skipped.
pub fn render_text<Tz: TimeZone>(report: &Report<Tz>, out: &mut impl Write) -> Result<()>
where
    Tz::Offset: Display,
{
    for day in report.days() {
        let header = day.date().format("%a %Y-%m-%d").to_string();
        if day.is_today() {
            writeln!(out, "{} (today)", Style::new().bold().paint(header))?;
        } else {
            writeln!(out, "{}", Style::new().bold().paint(header))?;
        }

        for event in day.events() {
            if event.is_filler() || event.duration <= chrono::Duration::zero() {
                continue;
            }
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                event.start.format("%H:%M"),
                bar(&event.name, event.height()),
                event.name,
                event.duration_description()
            )?;
        }
        writeln!(out)?;
    }

    let totals = report.totals();
    if !totals.is_empty() {
        writeln!(out, "{}", Style::new().bold().paint("Totals"))?;
        for total in totals {
            writeln!(out, "{}\t{}", describe_duration(total.duration), total.name)?;
        }
    }
    Ok(())
}

fn bar(name: &str, height: f64) -> String {
    let (r, g, b) = rgb_of(name);
    let width = ((height * BAR_WIDTH / 100.).round() as usize).max(1);
    Style::new()
        .on(Colour::RGB(r, g, b))
        .paint(" ".repeat(width))
        .to_string()
}
