use chrono::{NaiveDate, TimeZone};
use tokio::io::AsyncRead;
use tracing::{debug, instrument};

use crate::utils::clock::Clock;

use super::{
    aggregate::{calculate_total_durations, sorted_totals, ActivityTotal},
    day::{split_by_day, Day},
    duration::calculate_durations,
    error::Result,
    event::RawEvent,
    parse::read_log,
};

/// Finished timeline handed to the renderers. It can't be changed once built.
#[derive(Debug, Clone)]
pub struct Report<Tz: TimeZone> {
    days: Vec<Day<Tz>>,
}

impl<Tz: TimeZone> Report<Tz> {
    fn new(mut days: Vec<Day<Tz>>, today: NaiveDate) -> Self {
        for day in days.iter_mut() {
            day.is_today = day.date == today;
        }
        Self { days }
    }

    pub fn days(&self) -> &[Day<Tz>] {
        &self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Width of a single day column, in percent. An empty report has no columns.
    pub fn day_width(&self) -> f64 {
        if self.days.is_empty() {
            0.
        } else {
            100. / self.days.len() as f64
        }
    }

    /// Time spent on every activity, longest first.
    pub fn totals(&self) -> Vec<ActivityTotal> {
        sorted_totals(self.days.iter().flat_map(|v| v.events()))
    }
}

/// Runs the whole pipeline over already parsed events. The clock is asked twice: once to close
/// the last event and once to find today's column.
#[instrument(skip_all)]
pub fn build_report<Tz: TimeZone>(
    events: Vec<RawEvent<Tz>>,
    tz: &Tz,
    clock: &dyn Clock,
) -> Report<Tz> {
    let now = clock.time().with_timezone(tz);
    let events = calculate_durations(events, now);
    let mut days = split_by_day(events);
    calculate_total_durations(&mut days);

    let today = clock.time().with_timezone(tz).date_naive();
    debug!("Built a report of {} days", days.len());
    Report::new(days, today)
}

/// Reads a log and builds its report. Any malformed line fails the whole report.
pub async fn read_report<Tz: TimeZone>(
    reader: impl AsyncRead + Unpin,
    tz: &Tz,
    clock: &dyn Clock,
) -> Result<Report<Tz>> {
    let events = read_log(reader, tz).await?;
    Ok(build_report(events, tz, clock))
}
