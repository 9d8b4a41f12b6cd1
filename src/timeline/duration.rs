use std::iter;

use chrono::{DateTime, TimeZone};

use super::event::{Event, RawEvent};

/// The duration of an event is the difference between its start and the start of the following
/// event. The last event lasts until `now`.
///
/// Events are expected in chronological order but it's not enforced: an event followed by an
/// earlier one gets a negative duration.
pub fn calculate_durations<Tz: TimeZone>(
    events: Vec<RawEvent<Tz>>,
    now: DateTime<Tz>,
) -> Vec<Event<Tz>> {
    let ends = events
        .iter()
        .skip(1)
        .map(|v| v.start.clone())
        .chain(iter::once(now))
        .collect::<Vec<_>>();

    events
        .into_iter()
        .zip(ends)
        .map(|(RawEvent { name, start }, end)| {
            let duration = end - start.clone();
            Event::new(name, start, duration)
        })
        .collect()
}
