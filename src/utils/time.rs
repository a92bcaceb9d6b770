use chrono::{DateTime, FixedOffset, TimeZone};
use chrono_english::{parse_date_string, DateError, Dialect};
use now::DateTimeNow;

/// Resolves the start of a report relative to `now`. Without `start` the report begins at
/// midnight of the current day in the timezone of `now`. `treat_as_day` snaps a given start to
/// the beginning of its day.
pub fn report_start<Tz: TimeZone>(
    start: Option<&str>,
    now: DateTime<Tz>,
    dialect: Dialect,
    treat_as_day: bool,
) -> Result<DateTime<FixedOffset>, DateError>
where
    Tz::Offset: Copy,
{
    let start = match start {
        Some(text) => {
            let start = parse_date_string(text, now, dialect)?;
            if treat_as_day {
                start.beginning_of_day()
            } else {
                start
            }
        }
        None => now.beginning_of_day(),
    };
    Ok(start.fixed_offset())
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};
    use chrono_english::Dialect;

    use super::report_start;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn test_default_start_is_midnight_in_offset() {
        // 14:00 in UTC+9, 05:00 in UTC.
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 5, 0, 0).unwrap().with_timezone(&jst());
        let start = report_start(None, now, Dialect::Uk, false).unwrap();
        assert_eq!(start, jst().with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        assert_eq!(start.offset(), &jst());

        // Still 30 April in UTC, but already 1 May in UTC+9.
        let now = Utc.with_ymd_and_hms(2024, 4, 30, 20, 0, 0).unwrap().with_timezone(&jst());
        let start = report_start(None, now, Dialect::Uk, false).unwrap();
        assert_eq!(
            start.date_naive(),
            jst().with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap().date_naive()
        );
    }

    #[test]
    fn test_explicit_day_start() {
        let now = jst().with_ymd_and_hms(2025, 3, 20, 12, 30, 0).unwrap();
        let start = report_start(Some("15/03/2025"), now, Dialect::Uk, true).unwrap();
        assert_eq!(start, jst().with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap());

        let start = report_start(Some("03/15/2025"), now, Dialect::Us, true).unwrap();
        assert_eq!(start, jst().with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_invalid_start() {
        let now = jst().with_ymd_and_hms(2025, 3, 20, 12, 30, 0).unwrap();
        assert!(report_start(Some("not a date at all"), now, Dialect::Uk, false).is_err());
    }
}
