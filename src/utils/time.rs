use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
};

/// Longest stretch of local time a DST transition is expected to skip.
const MAX_DST_GAP_MINUTES: i64 = 180;

/// How far back a repeated wall clock time can be shown again, longest first.
const DST_FOLD_MINUTES: [i64; 3] = [120, 60, 30];

/// This is the standard way of converting a moment into a log line prefix in timestrip.
pub fn to_log_timestamp<Tz: TimeZone>(moment: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    moment.format("%Y %m %d %H %M %S").to_string()
}

/// Places a wall clock time into `tz`. A time shown twice because clocks were turned back
/// resolves to the earlier instant. A time skipped because clocks were turned forward is read
/// with the offset in effect before the jump, so 02:30 on a 02:00 → 03:00 night becomes 03:30.
pub fn localize<Tz: TimeZone>(tz: &Tz, local: &NaiveDateTime) -> DateTime<Tz> {
    let found = match tz.from_local_datetime(local) {
        LocalResult::Single(v) => v,
        LocalResult::Ambiguous(a, b) => {
            if a <= b {
                a
            } else {
                b
            }
        }
        LocalResult::None => return across_gap(tz, local),
    };

    // Some zones only ever report one of the two instants of a repeated time.
    let earlier = DST_FOLD_MINUTES
        .iter()
        .map(|minutes| found.clone() - Duration::minutes(*minutes))
        .find(|v| v.naive_local() == *local);
    earlier.unwrap_or(found)
}

fn across_gap<Tz: TimeZone>(tz: &Tz, local: &NaiveDateTime) -> DateTime<Tz> {
    let before = tz
        .from_local_datetime(&(*local - Duration::minutes(MAX_DST_GAP_MINUTES)))
        .earliest();
    let offset = before.map_or(0, |v| v.offset().fix().local_minus_utc());
    tz.from_utc_datetime(&(*local - Duration::seconds(i64::from(offset))))
}

/// Returns the first instant of `date` in `tz`. When midnight is skipped by a DST transition the
/// day starts at the first minute that exists.
pub fn day_start<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    localize(tz, &date.and_time(NaiveTime::MIN))
}

/// Returns start of the day `moment` belongs to.
pub fn start_of_day<Tz: TimeZone>(moment: &DateTime<Tz>) -> DateTime<Tz> {
    day_start(&moment.timezone(), moment.date_naive())
}

/// Returns start of the next day.
pub fn start_of_next_day<Tz: TimeZone>(moment: &DateTime<Tz>) -> DateTime<Tz> {
    let next = moment
        .date_naive()
        .succ_opt()
        .expect("End of time should never happen");
    day_start(&moment.timezone(), next)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};
    use chrono_tz::America::{New_York, Santiago};

    use super::{day_start, localize, start_of_day, start_of_next_day, to_log_timestamp};

    fn wall_clock(y: i32, m: u32, d: u32, h: u32, min: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_skipped_time_moves_forward() {
        // Clocks went from 02:00 to 03:00.
        let moment = localize(&New_York, &wall_clock(2024, 3, 10, 2, 30));
        assert_eq!(
            moment.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap()
        );
        assert_eq!(moment.hour(), 3);
        assert_eq!(moment.minute(), 30);
    }

    #[test]
    fn test_repeated_time_is_the_earlier_one() {
        // 01:30 happened twice, first at -04:00 and then at -05:00.
        let moment = localize(&New_York, &wall_clock(2024, 11, 3, 1, 30));
        assert_eq!(
            moment.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_regular_time_is_untouched() {
        let moment = localize(&New_York, &wall_clock(2024, 7, 1, 9, 15));
        assert_eq!(
            moment.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 7, 1, 13, 15, 0).unwrap()
        );
    }

    #[test]
    fn test_skipped_midnight() {
        // Clocks went from 00:00 to 01:00.
        let date = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
        let start = day_start(&Santiago, date);
        assert_eq!(start.date_naive(), date);
        assert_eq!(start.hour(), 1);
        assert_eq!(
            start.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 9, 8, 4, 0, 0).unwrap()
        );
        assert_eq!(start_of_next_day(&start) - start, Duration::hours(23));
    }

    #[test]
    fn test_day_lengths_around_transitions() {
        let spring = day_start(&New_York, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(start_of_next_day(&spring) - spring, Duration::hours(23));
        let autumn = day_start(&New_York, NaiveDate::from_ymd_opt(2024, 11, 3).unwrap());
        assert_eq!(start_of_next_day(&autumn) - autumn, Duration::hours(25));
    }

    #[test]
    fn test_start_of_day() {
        let moment = Utc.with_ymd_and_hms(2024, 3, 5, 17, 42, 3).unwrap();
        assert_eq!(
            start_of_day(&moment),
            Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
        );
        assert_eq!(
            start_of_next_day(&moment),
            Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_next_day_crosses_month_and_year() {
        let moment = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            start_of_next_day(&moment),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_day_start_keeps_offset() {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let start = day_start(&tz, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(start.hour(), 0);
        assert_eq!(
            start.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 6, 30, 21, 0, 0).unwrap()
        );
        assert_eq!(start_of_next_day(&start) - start, Duration::days(1));
    }

    #[test]
    fn test_log_timestamp_format() {
        let moment = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(to_log_timestamp(&moment), "2024 01 02 03 04 05");
    }
}
