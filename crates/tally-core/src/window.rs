//! Reporting date window.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeDelta, TimeZone, Utc};

use crate::errors::WindowError;

/// Half-open window `[since, until)` of time entries to report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl DateWindow {
    /// Resolve the window from optional `YYYY-MM-DD` strings.
    ///
    /// A missing `since` means `now`, a missing `until` means `now` plus one
    /// day. Given dates denote midnight in `now`'s time zone.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError`] if a date does not parse, its local midnight
    /// does not exist, or the resulting window is empty.
    pub fn resolve<Tz: TimeZone>(
        since: Option<&str>,
        until: Option<&str>,
        now: &DateTime<Tz>,
    ) -> Result<Self, WindowError> {
        let tz = now.timezone();
        let now_utc = now.with_timezone(&Utc);

        let since = match since {
            Some(value) => local_midnight(&tz, value)?,
            None => now_utc,
        };
        let until = match until {
            Some(value) => local_midnight(&tz, value)?,
            None => now_utc + TimeDelta::days(1),
        };

        if until <= since {
            return Err(WindowError::Empty {
                since: since.to_rfc3339(),
                until: until.to_rfc3339(),
            });
        }

        Ok(Self { since, until })
    }

    /// Window start as sent to the time-tracking API (`2024-01-01T00:00:00.000Z`).
    #[must_use]
    pub fn start_param(&self) -> String {
        self.since.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Window end as sent to the time-tracking API.
    #[must_use]
    pub fn end_param(&self) -> String {
        self.until.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, value: &str) -> Result<DateTime<Utc>, WindowError> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| {
        WindowError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })?;
    tz.from_local_datetime(&date.and_time(chrono::NaiveTime::MIN))
        .earliest()
        .map(|midnight| midnight.with_timezone(&Utc))
        .ok_or(WindowError::NonexistentLocalTime { date })
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn defaults_to_now_through_tomorrow() {
        let now = utc("2024-03-10T15:30:00Z");
        let window = DateWindow::resolve(None, None, &now).unwrap();
        assert_eq!(window.since, now);
        assert_eq!(window.until, utc("2024-03-11T15:30:00Z"));
    }

    #[test]
    fn explicit_dates_are_local_midnight() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = utc("2024-03-10T15:30:00Z").with_timezone(&tz);
        let window = DateWindow::resolve(Some("2024-01-01"), Some("2024-01-08"), &now).unwrap();
        assert_eq!(window.since, utc("2023-12-31T22:00:00Z"));
        assert_eq!(window.until, utc("2024-01-07T22:00:00Z"));
    }

    #[test]
    fn only_since_keeps_default_until() {
        let now = utc("2024-03-10T15:30:00Z");
        let window = DateWindow::resolve(Some("2024-03-01"), None, &now).unwrap();
        assert_eq!(window.since, utc("2024-03-01T00:00:00Z"));
        assert_eq!(window.until, utc("2024-03-11T15:30:00Z"));
    }

    #[test]
    fn rejects_malformed_date() {
        let now = utc("2024-03-10T15:30:00Z");
        let err = DateWindow::resolve(Some("01/02/2024"), None, &now).unwrap_err();
        assert!(matches!(err, WindowError::InvalidDate { ref value, .. } if value == "01/02/2024"));
    }

    #[test]
    fn rejects_empty_window() {
        let now = utc("2024-03-10T15:30:00Z");
        let err =
            DateWindow::resolve(Some("2024-01-05"), Some("2024-01-05"), &now).unwrap_err();
        assert!(matches!(err, WindowError::Empty { .. }));
    }

    #[test]
    fn future_since_without_until_is_empty() {
        let now = utc("2024-03-10T15:30:00Z");
        let err = DateWindow::resolve(Some("2024-03-20"), None, &now).unwrap_err();
        assert!(matches!(err, WindowError::Empty { .. }));

        let window = DateWindow::resolve(Some("2024-03-20"), Some("2024-03-21"), &now).unwrap();
        assert_eq!(window.since, utc("2024-03-20T00:00:00Z"));
    }

    #[test]
    fn params_use_millisecond_utc_timestamps() {
        let now = utc("2024-03-10T15:30:00Z");
        let window = DateWindow::resolve(Some("2024-01-01"), Some("2024-01-02"), &now).unwrap();
        assert_eq!(window.start_param(), "2024-01-01T00:00:00.000Z");
        assert_eq!(window.end_param(), "2024-01-02T00:00:00.000Z");
    }
}
