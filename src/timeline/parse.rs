use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, instrument};

use crate::utils::time::localize;

use super::{
    error::{Result, TimelineError},
    event::RawEvent,
};

/// Year, month, day, hour, minute and second precede the name on every line.
const NUMERIC_FIELDS: usize = 6;

/// Reads the whole log. Lines look like `2024 01 31 09 45 00 name of the activity`. The first
/// broken line aborts reading, nothing is skipped.
#[instrument(skip_all)]
pub async fn read_log<Tz: TimeZone>(
    reader: impl AsyncRead + Unpin,
    tz: &Tz,
) -> Result<Vec<RawEvent<Tz>>> {
    let mut lines = BufReader::new(reader).lines();
    let mut events = vec![];
    let mut line_number = 0;
    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        events.push(parse_line(&line, line_number, tz)?);
    }
    debug!("Read {} events", events.len());
    Ok(events)
}

/// Parses a single line. `line_number` is 1-based and only used for errors.
pub fn parse_line<Tz: TimeZone>(line: &str, line_number: usize, tz: &Tz) -> Result<RawEvent<Tz>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = line.splitn(NUMERIC_FIELDS + 1, ' ');

    let mut numbers = [0i64; NUMERIC_FIELDS];
    for (field, number) in numbers.iter_mut().enumerate() {
        let text = fields.next().ok_or(TimelineError::MissingField {
            line: line_number,
            field,
        })?;
        *number = text.parse().map_err(|source| TimelineError::Parse {
            line: line_number,
            field,
            source,
        })?;
    }
    let name = fields.next().ok_or(TimelineError::MissingField {
        line: line_number,
        field: NUMERIC_FIELDS,
    })?;

    let local = to_local_time(numbers)
        .ok_or(TimelineError::InvalidTimestamp { line: line_number })?;
    let start = localize(tz, &local);

    Ok(RawEvent::new(name, start))
}

fn to_local_time(
    [year, month, day, hour, minute, second]: [i64; NUMERIC_FIELDS],
) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(
        year.try_into().ok()?,
        month.try_into().ok()?,
        day.try_into().ok()?,
    )?;
    let time = NaiveTime::from_hms_opt(
        hour.try_into().ok()?,
        minute.try_into().ok()?,
        second.try_into().ok()?,
    )?;
    Some(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Offset, TimeZone, Timelike, Utc};
    use chrono_tz::America::New_York;

    use crate::{
        timeline::error::TimelineError,
        utils::logging::TEST_LOGGING,
    };

    use super::{parse_line, read_log};

    #[tokio::test]
    async fn test_read_log_basic() -> Result<()> {
        *TEST_LOGGING;
        let log = "2024 01 01 09 00 00 started coding\n\
                   2024 01 01 09 45 00 meeting\n";

        let events = read_log(log.as_bytes(), &Utc).await?;

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "started coding");
        assert_eq!(
            events[0].start,
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(events[1].name, "meeting");
        assert_eq!(
            events[1].start,
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 45, 0).unwrap()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_read_log_empty() -> Result<()> {
        let events = read_log("".as_bytes(), &Utc).await?;
        assert!(events.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_read_log_reports_line_number() {
        let log = "2024 01 01 09 00 00 a\n\
                   2024 01 01 09 xx 00 b\n";

        let error = read_log(log.as_bytes(), &Utc).await.unwrap_err();

        assert!(matches!(error, TimelineError::Parse { line: 2, field: 4, .. }));
        assert_eq!(error.to_string().split(':').next(), Some("Field 4 on line 2 is not numeric"));
    }

    #[tokio::test]
    async fn test_read_log_windows_line_endings() -> Result<()> {
        let log = "2024 01 01 09 00 00 a\r\n2024 01 01 10 00 00 b\r\n";
        let events = read_log(log.as_bytes(), &Utc).await?;
        assert_eq!(events[0].name, "a");
        assert_eq!(events[1].name, "b");
        Ok(())
    }

    #[test]
    fn test_non_numeric_field() {
        let error = parse_line("2024 01 AA 00 00 00 x", 1, &Utc).unwrap_err();
        assert_eq!(error.field(), Some(2));
        assert_eq!(error.line(), Some(1));
    }

    #[test]
    fn test_name_keeps_spaces() {
        let event = parse_line("2024 01 01 00 00 00 a  name with   spaces ", 1, &Utc).unwrap();
        assert_eq!(event.name, "a  name with   spaces ");
    }

    #[test]
    fn test_missing_name() {
        let error = parse_line("2024 01 01 00 00 00", 3, &Utc).unwrap_err();
        assert!(matches!(
            error,
            TimelineError::MissingField { line: 3, field: 6 }
        ));
    }

    #[test]
    fn test_empty_name_is_allowed() {
        let event = parse_line("2024 01 01 00 00 00 ", 1, &Utc).unwrap();
        assert!(event.name.is_empty());
    }

    #[test]
    fn test_blank_line() {
        let error = parse_line("", 7, &Utc).unwrap_err();
        assert!(matches!(error, TimelineError::Parse { line: 7, field: 0, .. }));
    }

    #[test]
    fn test_impossible_date() {
        let error = parse_line("2024 13 01 00 00 00 x", 1, &Utc).unwrap_err();
        assert!(matches!(error, TimelineError::InvalidTimestamp { line: 1 }));

        let error = parse_line("2024 02 30 00 00 00 x", 1, &Utc).unwrap_err();
        assert!(matches!(error, TimelineError::InvalidTimestamp { line: 1 }));

        let error = parse_line("2024 01 01 -1 00 00 x", 1, &Utc).unwrap_err();
        assert!(matches!(error, TimelineError::InvalidTimestamp { line: 1 }));
    }

    #[tokio::test]
    async fn test_skipped_hour_is_read() -> Result<()> {
        // New York skipped 02:00 to 03:00 on this night.
        let log = "2024 03 10 01 45 00 reading\n\
                   2024 03 10 02 30 00 x\n";

        let events = read_log(log.as_bytes(), &New_York).await?;

        assert_eq!(
            events[1].start,
            Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap()
        );
        assert_eq!(events[1].start.hour(), 3);
        assert_eq!(
            events[1].start.clone() - events[0].start.clone(),
            chrono::Duration::minutes(45)
        );
        Ok(())
    }

    #[test]
    fn test_repeated_hour_is_the_earlier_one() {
        let event = parse_line("2024 11 03 01 30 00 x", 1, &New_York).unwrap();
        assert_eq!(
            event.start,
            Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap()
        );
        assert_eq!(event.start.offset().fix().local_minus_utc(), -4 * 3600);
    }
}
