//! Human-friendly labels for timestamps.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Relative age label for a report timestamp, e.g. "Today" or "2 weeks ago".
/// Unparseable stamps fall back to the date portion of the raw string.
pub fn relative_date(created_at: &str) -> String {
    let Ok(stamp) = OffsetDateTime::parse(created_at, &Rfc3339) else {
        return created_at.split('T').next().unwrap_or(created_at).to_string();
    };
    relative_to(stamp, OffsetDateTime::now_utc())
}

fn relative_to(stamp: OffsetDateTime, now: OffsetDateTime) -> String {
    let days = (now - stamp).whole_days();

    match days {
        d if d <= 0 => "Today".to_string(),
        1 => "1 day ago".to_string(),
        d if d < 7 => format!("{d} days ago"),
        d if d < 14 => "1 week ago".to_string(),
        d => format!("{} weeks ago", d / 7),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn now() -> OffsetDateTime {
        OffsetDateTime::parse("2026-08-23T12:00:00Z", &Rfc3339).unwrap()
    }

    #[test]
    fn same_day_is_today() {
        assert_eq!(relative_to(now() - Duration::hours(3), now()), "Today");
    }

    #[test]
    fn day_and_week_buckets() {
        assert_eq!(relative_to(now() - Duration::days(1), now()), "1 day ago");
        assert_eq!(relative_to(now() - Duration::days(4), now()), "4 days ago");
        assert_eq!(relative_to(now() - Duration::days(8), now()), "1 week ago");
        assert_eq!(relative_to(now() - Duration::days(21), now()), "3 weeks ago");
    }

    #[test]
    fn unparseable_stamp_falls_back_to_date_part() {
        assert_eq!(relative_date("2026-08-01 10:00"), "2026-08-01 10:00");
        assert_eq!(relative_date("garbageTmore"), "garbage");
    }
}
