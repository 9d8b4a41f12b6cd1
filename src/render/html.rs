use std::{fmt::Display, io::Write};

use anyhow::Result;
use chrono::TimeZone;

use crate::timeline::report::Report;

const STYLE: &str = "body{margin:0;font-family:sans-serif}\
.days{display:flex;height:100vh}\
.day{display:flex;flex-direction:column;border-right:1px solid #ddd;overflow:hidden}\
.day.today{background:#f8f8f0}\
.day h2{margin:0;font-size:small;text-align:center}\
.event{overflow:hidden;font-size:x-small;color:white}";

/// Writes a standalone page: one column per day, one block per event, block heights
/// proportional to the event duration.
pub fn render_html<Tz: TimeZone>(report: &Report<Tz>, out: &mut impl Write) -> Result<()>
where
    Tz::Offset: Display,
{
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html><head><meta charset=\"utf-8\"><title>Timeline</title>")?;
    writeln!(out, "<style>{STYLE}</style></head><body>")?;
    writeln!(out, "<div class=\"days\">")?;

    let width = report.day_width();
    for day in report.days() {
        let class = if day.is_today() { "day today" } else { "day" };
        writeln!(out, "<div class=\"{class}\" style=\"width:{width:.4}%\">")?;
        writeln!(out, "<h2>{}</h2>", day.date().format("%a %Y-%m-%d"))?;
        for event in day.events() {
            write!(
                out,
                "<div class=\"event\" style=\"height:{:.4}%;background:{}\"",
                event.height(),
                event.color(),
            )?;
            writeln!(
                out,
                " title=\"{} {}: {}\">{}</div>",
                event.start.format("%H:%M"),
                escape(&event.name),
                event.duration_description(),
                escape(&event.name),
            )?;
        }
        writeln!(out, "</div>")?;
    }

    writeln!(out, "</div></body></html>")?;
    Ok(())
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
