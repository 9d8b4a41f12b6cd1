use chrono::{Duration, NaiveDate, TimeZone};
use tracing::{instrument, trace};

use crate::utils::time::{start_of_day, start_of_next_day};

use super::event::Event;

/// Events that happened during a single local calendar day.
#[derive(Debug, Clone)]
pub struct Day<Tz: TimeZone> {
    pub(crate) date: NaiveDate,
    pub(crate) is_today: bool,
    pub(crate) events: Vec<Event<Tz>>,
}

impl<Tz: TimeZone> Day<Tz> {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            is_today: false,
            events: vec![],
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_today(&self) -> bool {
        self.is_today
    }

    pub fn events(&self) -> &[Event<Tz>] {
        &self.events
    }

    /// Sum of all fragment durations in the day.
    pub fn duration(&self) -> Duration {
        self.events
            .iter()
            .fold(Duration::zero(), |ac, next| ac + next.duration)
    }
}

/// Splits events into days. Events crossing midnight are cut into fragments, one per day, so
/// every fragment lies within one day. Days appear in the order they are first seen, and the
/// first day is backfilled from midnight with an empty event.
#[instrument(skip_all)]
pub fn split_by_day<Tz: TimeZone>(events: Vec<Event<Tz>>) -> Vec<Day<Tz>> {
    let mut days: Vec<Day<Tz>> = vec![];

    for event in events {
        let mut rest = Some(event);
        while let Some(event) = rest.take() {
            let fragment = if crosses_midnight(&event) {
                let split = start_of_next_day(&event.start);
                trace!("Splitting {:?} at {split:?}", event.name);
                let (before, after) = event.split_at(split);
                rest = Some(after);
                before
            } else {
                event
            };
            push_fragment(&mut days, fragment);
        }
    }

    if let Some(first) = days.first_mut() {
        backfill_first_day(first);
    }
    days
}

/// Negative durations never cross midnight, they can only end before they start.
fn crosses_midnight<Tz: TimeZone>(event: &Event<Tz>) -> bool {
    event.end().date_naive() > event.start.date_naive()
}

fn push_fragment<Tz: TimeZone>(days: &mut Vec<Day<Tz>>, fragment: Event<Tz>) {
    let date = fragment.start.date_naive();
    match days.last_mut() {
        Some(day) if day.date == date => day.events.push(fragment),
        _ => {
            let mut day = Day::new(date);
            day.events.push(fragment);
            days.push(day);
        }
    }
}

/// Stuffs an empty event at the beginning of the day so it starts at midnight.
fn backfill_first_day<Tz: TimeZone>(day: &mut Day<Tz>) {
    let Some(first) = day.events.first() else {
        return;
    };
    let midnight = start_of_day(&first.start);
    let filler = Event::filler(midnight.clone(), first.start.clone() - midnight);
    day.events.insert(0, filler);
}
