use std::collections::HashMap;

use chrono::{Duration, TimeZone};
use serde::Serialize;

use super::{day::Day, event::Event};

/// Overall time spent on a single activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityTotal {
    pub name: String,
    #[serde(rename = "seconds", serialize_with = "serialize_seconds")]
    pub duration: Duration,
}

fn serialize_seconds<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_seconds())
}

/// Sums fragment durations per activity name. Nameless events are left out so they never count
/// towards a real activity.
pub fn totals_by_name<'a, Tz: TimeZone + 'a>(
    events: impl Iterator<Item = &'a Event<Tz>>,
) -> HashMap<String, Duration> {
    let mut totals = HashMap::<String, Duration>::new();
    for event in events.filter(|v| !v.is_filler()) {
        *totals.entry(event.name.clone()).or_insert_with(Duration::zero) += event.duration;
    }
    totals
}

/// Stores the total of every activity on each of its fragments. Nameless events total their own
/// original duration.
pub fn calculate_total_durations<Tz: TimeZone>(days: &mut [Day<Tz>]) {
    let totals = totals_by_name(days.iter().flat_map(|v| v.events.iter()));
    for event in days.iter_mut().flat_map(|v| v.events.iter_mut()) {
        event.total_duration = totals
            .get(&event.name)
            .copied()
            .unwrap_or(event.original_duration);
    }
}

/// Returns activities ordered from the longest to the shortest.
pub fn sorted_totals<'a, Tz: TimeZone + 'a>(
    events: impl Iterator<Item = &'a Event<Tz>>,
) -> Vec<ActivityTotal> {
    let mut totals = totals_by_name(events)
        .into_iter()
        .map(|(name, duration)| ActivityTotal { name, duration })
        .collect::<Vec<_>>();
    totals.sort_by(|a, b| b.duration.cmp(&a.duration).then_with(|| a.name.cmp(&b.name)));
    totals
}
