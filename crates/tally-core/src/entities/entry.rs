use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use super::ProjectId;

/// One recorded interval of work, as returned by the Toggl time entries API.
///
/// Fields the report does not use (`id`, `wid`, `stop`, `tags`, ...) are
/// ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawTimeEntry {
    /// Free-text description. Entries sharing it form one task.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub pid: Option<ProjectId>,
    /// Start timestamp, kept in the offset the API reported it in.
    pub start: DateTime<FixedOffset>,
    /// Duration in seconds. Negative while the timer is still running.
    pub duration: i64,
}

impl RawTimeEntry {
    /// The referenced project, if any. A `0` pid counts as none.
    #[must_use]
    pub fn project_id(&self) -> Option<ProjectId> {
        self.pid.filter(|pid| pid.is_set())
    }

    /// Full English weekday name of the start timestamp as seen in `tz`.
    ///
    /// Toggl reports timestamps in UTC; pass the zone the reporting window
    /// was resolved in so an entry inside a local Monday reads as Monday.
    #[must_use]
    pub fn weekday_in<Tz: TimeZone>(&self, tz: &Tz) -> &'static str {
        weekday_name(self.start.with_timezone(tz).weekday())
    }
}

/// Full English name of a weekday (`Monday`, `Tuesday`, ...).
#[must_use]
const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::window::DateWindow;

    #[test]
    fn deserializes_toggl_entry_and_ignores_extra_fields() {
        let entry: RawTimeEntry = serde_json::from_str(
            r##"{
                "id": 436694100,
                "wid": 777,
                "pid": 193791,
                "billable": false,
                "start": "2024-01-01T09:00:00+00:00",
                "stop": "2024-01-01T10:00:00+00:00",
                "duration": 3600,
                "description": "#1 A",
                "tags": ["billed"]
            }"##,
        )
        .unwrap();

        assert_eq!(entry.description, "#1 A");
        assert_eq!(entry.project_id(), Some(ProjectId(193_791)));
        assert_eq!(entry.duration, 3600);
        assert_eq!(entry.weekday_in(&Utc), "Monday");
    }

    #[test]
    fn null_description_and_missing_pid() {
        let entry: RawTimeEntry = serde_json::from_str(
            r#"{"description": null, "start": "2024-01-02T09:00:00Z", "duration": -1704186000}"#,
        )
        .unwrap();

        assert_eq!(entry.description, "");
        assert_eq!(entry.project_id(), None);
        assert!(entry.duration < 0);
    }

    #[test]
    fn zero_pid_counts_as_no_project() {
        let entry: RawTimeEntry = serde_json::from_str(
            r#"{"description": "x", "pid": 0, "start": "2024-01-02T09:00:00Z", "duration": 60}"#,
        )
        .unwrap();

        assert_eq!(entry.pid, Some(ProjectId(0)));
        assert_eq!(entry.project_id(), None);
    }

    fn starting(start: &str) -> RawTimeEntry {
        RawTimeEntry {
            description: String::new(),
            pid: None,
            start: DateTime::parse_from_rfc3339(start).unwrap(),
            duration: 0,
        }
    }

    #[rstest]
    #[case("2024-01-01T23:30:00+00:00", 0, "Monday")]
    #[case("2024-01-02T01:00:00+00:00", -5, "Monday")]
    #[case("2024-01-01T23:30:00+00:00", 2, "Tuesday")]
    #[case("2024-01-07T12:00:00Z", 0, "Sunday")]
    fn weekday_follows_reporting_zone(
        #[case] start: &str,
        #[case] offset_hours: i32,
        #[case] expected: &str,
    ) {
        let tz = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        assert_eq!(starting(start).weekday_in(&tz), expected);
    }

    #[test]
    fn entry_inside_local_monday_window_reads_monday() {
        // New York in winter
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let window = DateWindow::resolve(Some("2024-01-01"), Some("2024-01-02"), &now).unwrap();

        let entry = starting("2024-01-02T01:00:00+00:00");
        let start = entry.start.with_timezone(&Utc);
        assert!(window.since <= start && start < window.until);
        assert_eq!(entry.weekday_in(&tz), "Monday");
        assert_eq!(entry.weekday_in(&Utc), "Tuesday");
    }
}
