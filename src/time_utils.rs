use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// UTC instant for a millisecond timestamp; out-of-range values clamp to the epoch.
pub fn utc_datetime(timestamp: u64) -> DateTime<Utc> {
    i64::try_from(timestamp)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default()
}

/// Calendar date at `offset_minutes` east of UTC. Invalid offsets read as UTC.
pub fn calendar_date(timestamp: u64, offset_minutes: i32) -> NaiveDate {
    let instant = utc_datetime(timestamp);
    match FixedOffset::east_opt(offset_minutes.saturating_mul(60)) {
        Some(offset) => instant.with_timezone(&offset).date_naive(),
        None => instant.date_naive(),
    }
}

/// `M/D/YYYY`
pub fn display_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// `YYYY-MM-DD`
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `HH:MM:SS.mmm` (UTC) for log lines.
pub fn format_clock_time(timestamp: u64) -> String {
    utc_datetime(timestamp).format("%H:%M:%S%.3f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2024-06-04T02:00:00Z
    const JUNE_4_2AM_UTC: u64 = 1_717_466_400_000;

    #[test]
    fn epoch_is_first_of_january_1970() {
        let date = calendar_date(0, 0);
        assert_eq!(iso_date(date), "1970-01-01");
        assert_eq!(display_date(date), "1/1/1970");
    }

    #[test]
    fn leap_day() {
        // 2024-02-29T12:00:00Z
        assert_eq!(iso_date(calendar_date(1_709_208_000_000, 0)), "2024-02-29");
    }

    #[test]
    fn offset_shifts_the_calendar_day() {
        assert_eq!(display_date(calendar_date(JUNE_4_2AM_UTC, 0)), "6/4/2024");
        assert_eq!(display_date(calendar_date(JUNE_4_2AM_UTC, -5 * 60)), "6/3/2024");
        assert_eq!(display_date(calendar_date(JUNE_4_2AM_UTC, i32::MAX)), "6/4/2024");
    }

    #[test]
    fn clock_time() {
        assert_eq!(format_clock_time(3_723_004), "01:02:03.004");
    }
}
