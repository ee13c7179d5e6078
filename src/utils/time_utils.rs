use chrono::{DateTime, Local, NaiveDate, Offset, TimeZone};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
}

/// Formats an epoch-millisecond timestamp as a UTC calendar date (`YYYY-MM-DD`).
/// Returns `None` for timestamps chrono cannot represent.
pub fn epoch_ms_to_utc(epoch_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|dt| dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string())
}

/// Minutes to add to local time to reach UTC (positive west of Greenwich).
pub fn timezone_offset_minutes<Tz: TimeZone>(date: &DateTime<Tz>) -> i64 {
    -(date.offset().fix().local_minus_utc() as i64) / 60
}

/// Canonical calendar-date string for an analytics lookup.
///
/// Shifts the instant by the local timezone offset before slicing the UTC date,
/// so the string always matches the day the user picked regardless of where
/// the client runs.
pub fn normalize_selected_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    let offset_minutes = timezone_offset_minutes(date);
    let shifted_ms = date.timestamp_millis() - offset_minutes * TimeUtils::MS_IN_MIN;
    // Shifting by at most a day can't leave chrono's range for a valid DateTime
    epoch_ms_to_utc(shifted_ms).unwrap_or_else(|| date.naive_local().date().to_string())
}

pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), TimeUtils::STANDARD_TIME_FORMAT).ok()
}

/// Local midnight of a calendar day. Falls back to the earliest valid instant
/// when midnight falls in a DST gap.
pub fn local_midnight(day: NaiveDate) -> Option<DateTime<Local>> {
    let midnight = day.and_hms_opt(0, 0, 0)?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(midnight + chrono::Duration::hours(1))).earliest())
}

/// Start-up date: the persisted one if the source still has it, else the
/// newest available, else `today`. `available` is newest first.
pub fn initial_date(persisted: Option<NaiveDate>, available: &[NaiveDate], today: NaiveDate) -> NaiveDate {
    match persisted {
        Some(day) if available.contains(&day) => day,
        _ => available.first().copied().unwrap_or(today),
    }
}

/// Moves `day` by `days` calendar days, saturating at chrono's limits.
pub fn step_day(day: NaiveDate, days: i64) -> NaiveDate {
    day.checked_add_signed(chrono::Duration::days(days)).unwrap_or(day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn local_date(offset_secs_east: i32, y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_secs_east)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
    }

    #[test]
    fn offset_is_positive_west_of_utc() {
        let new_york = local_date(-5 * 3600, 2023, 3, 1, 0);
        assert_eq!(timezone_offset_minutes(&new_york), 300);

        let tokyo = local_date(9 * 3600, 2023, 3, 1, 0);
        assert_eq!(timezone_offset_minutes(&tokyo), -540);
    }

    #[test]
    fn positive_offset_keeps_the_selected_day() {
        // Midnight in UTC-5 is 05:00Z, still the 1st; late evening would roll into the 2nd in UTC.
        assert_eq!(normalize_selected_date(&local_date(-5 * 3600, 2023, 3, 1, 0)), "2023-03-01");
        assert_eq!(normalize_selected_date(&local_date(-5 * 3600, 2023, 3, 1, 23)), "2023-03-01");
    }

    #[test]
    fn negative_offset_keeps_the_selected_day() {
        // Midnight in UTC+9 is the previous day in UTC.
        assert_eq!(normalize_selected_date(&local_date(9 * 3600, 2023, 3, 1, 0)), "2023-03-01");
    }

    #[test]
    fn utc_dates_are_unchanged() {
        let utc = local_date(0, 2024, 2, 29, 12);
        assert_eq!(normalize_selected_date(&utc), "2024-02-29");
    }

    #[test]
    fn epoch_formatting() {
        assert_eq!(epoch_ms_to_utc(0).as_deref(), Some("1970-01-01"));
        assert_eq!(epoch_ms_to_utc(1_677_628_800_000).as_deref(), Some("2023-03-01"));
        assert_eq!(epoch_ms_to_utc(i64::MAX), None);
    }

    #[test]
    fn parses_calendar_dates() {
        assert_eq!(parse_calendar_date(" 2023-03-01 "), NaiveDate::from_ymd_opt(2023, 3, 1));
        assert_eq!(parse_calendar_date("03/01/2023"), None);
    }

    #[test]
    fn initial_date_prefers_persisted_then_newest() {
        let d = |day| NaiveDate::from_ymd_opt(2023, 3, day).unwrap();
        let available = [d(3), d(2), d(1)];

        assert_eq!(initial_date(Some(d(2)), &available, d(9)), d(2));
        assert_eq!(initial_date(Some(d(7)), &available, d(9)), d(3));
        assert_eq!(initial_date(None, &available, d(9)), d(3));
        assert_eq!(initial_date(Some(d(2)), &[], d(9)), d(9));
    }

    #[test]
    fn steps_across_month_ends() {
        let feb_28 = NaiveDate::from_ymd_opt(2023, 2, 28).unwrap();
        assert_eq!(step_day(feb_28, 1), NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
        assert_eq!(step_day(NaiveDate::MAX, 1), NaiveDate::MAX);
    }
}
