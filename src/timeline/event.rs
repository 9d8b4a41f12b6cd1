use chrono::{DateTime, Duration, TimeZone};

/// A single line of the log. The name is kept verbatim, including inner spaces.
#[derive(Debug, Clone)]
pub struct RawEvent<Tz: TimeZone> {
    pub name: String,
    pub start: DateTime<Tz>,
}

impl<Tz: TimeZone> RawEvent<Tz> {
    pub fn new(name: impl Into<String>, start: DateTime<Tz>) -> Self {
        Self {
            name: name.into(),
            start,
        }
    }
}

/// The working unit of the timeline. Before day splitting an event covers a whole log entry,
/// afterwards it's a fragment confined to a single local day.
#[derive(Debug, Clone)]
pub struct Event<Tz: TimeZone> {
    /// Empty name means "no activity". The filler at the start of the first day uses it.
    pub name: String,
    pub start: DateTime<Tz>,
    /// Length of the whole log entry before it was split by days.
    pub original_duration: Duration,
    /// Length of this fragment.
    pub duration: Duration,
    /// Sum of all fragments with the same name across the whole log.
    pub total_duration: Duration,
}

impl<Tz: TimeZone> Event<Tz> {
    pub fn new(name: impl Into<String>, start: DateTime<Tz>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            start,
            original_duration: duration,
            duration,
            total_duration: duration,
        }
    }

    /// Creates the empty event used to align a timeline to midnight.
    pub fn filler(start: DateTime<Tz>, duration: Duration) -> Self {
        Self::new(String::new(), start, duration)
    }

    pub fn is_filler(&self) -> bool {
        self.name.is_empty()
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.start.clone() + self.duration
    }

    /// Splits an event into 2 halves, 1 before `at`, 1 from `at` onwards. Both halves keep the
    /// original duration. `at` is expected to lie within the event, the end included, in which
    /// case the second half is empty.
    pub fn split_at(self, at: DateTime<Tz>) -> (Event<Tz>, Event<Tz>) {
        let end = self.end();
        let before = Event {
            name: self.name.clone(),
            start: self.start.clone(),
            original_duration: self.original_duration,
            duration: at.clone() - self.start,
            total_duration: self.total_duration,
        };
        let after = Event {
            name: self.name,
            duration: end - at.clone(),
            start: at,
            original_duration: self.original_duration,
            total_duration: self.total_duration,
        };
        (before, after)
    }

    #[cfg(test)]
    pub(crate) fn with_duration(self, duration: Duration) -> Self {
        Self { duration, ..self }
    }

    #[cfg(test)]
    pub(crate) fn with_start(self, start: DateTime<Tz>) -> Self {
        Self { start, ..self }
    }
}
