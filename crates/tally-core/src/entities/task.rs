use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FieldError;
use crate::value::FieldValue;

/// One aggregated task: every time entry sharing a description, reduced to a
/// single report row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// The shared entry description.
    pub name: String,
    /// Distinct weekday names in first-seen order, joined with `", "`.
    pub days_worked: String,
    /// Total tracked time in hours.
    pub duration: f64,
    /// Name of the project of the first entry in the group.
    #[serde(rename = "type")]
    pub task_type: Option<String>,
    pub owner: String,
    pub estimate: Option<f64>,
    pub url: Option<String>,
    /// Always empty; left for the report reader to fill in.
    pub notes: String,
}

impl TaskRecord {
    /// Read a field for tabular output. `None` means the field is absent.
    #[must_use]
    pub fn field(&self, field: TaskField) -> Option<FieldValue> {
        match field {
            TaskField::Duration => Some(FieldValue::Number(self.duration)),
            TaskField::Type => self.task_type.as_deref().map(FieldValue::from),
            TaskField::Owner => Some(FieldValue::from(self.owner.as_str())),
            TaskField::Estimate => self.estimate.map(FieldValue::Number),
            TaskField::Url => self.url.as_deref().map(FieldValue::from),
            TaskField::Name => Some(FieldValue::from(self.name.as_str())),
            TaskField::Notes => Some(FieldValue::from(self.notes.as_str())),
            TaskField::DaysWorked => Some(FieldValue::from(self.days_worked.as_str())),
        }
    }
}

/// Projectable columns of a [`TaskRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskField {
    Duration,
    Type,
    Owner,
    Estimate,
    Url,
    Name,
    Notes,
    DaysWorked,
}

impl TaskField {
    /// Default column order of the exported sheet.
    pub const DEFAULT_ORDER: [Self; 8] = [
        Self::Duration,
        Self::Type,
        Self::Owner,
        Self::Estimate,
        Self::Url,
        Self::Name,
        Self::Notes,
        Self::DaysWorked,
    ];

    /// Field name as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::Type => "type",
            Self::Owner => "owner",
            Self::Estimate => "estimate",
            Self::Url => "url",
            Self::Name => "name",
            Self::Notes => "notes",
            Self::DaysWorked => "daysWorked",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldError::Unknown(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record() -> TaskRecord {
        TaskRecord {
            name: "#1 A".into(),
            days_worked: "Monday, Tuesday".into(),
            duration: 3.0,
            task_type: Some("Website".into()),
            owner: "Ada".into(),
            estimate: None,
            url: Some("http://x/1".into()),
            notes: String::new(),
        }
    }

    #[test]
    fn field_names_roundtrip_through_from_str() {
        for field in TaskField::DEFAULT_ORDER {
            assert_eq!(field.as_str().parse::<TaskField>().unwrap(), field);
        }
    }

    #[test]
    fn unknown_field_name_is_rejected() {
        let err = "days_worked".parse::<TaskField>().unwrap_err();
        assert!(matches!(err, FieldError::Unknown(name) if name == "days_worked"));
    }

    #[test]
    fn absent_fields_read_as_none() {
        let record = record();
        assert_eq!(record.field(TaskField::Estimate), None);
        assert_eq!(
            record.field(TaskField::Type),
            Some(FieldValue::Text("Website".into()))
        );
        assert_eq!(record.field(TaskField::Duration), Some(FieldValue::Number(3.0)));
        assert_eq!(record.field(TaskField::Notes), Some(FieldValue::Text(String::new())));
    }

    #[test]
    fn serializes_with_report_field_names() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["type"], "Website");
        assert_eq!(json["daysWorked"], "Monday, Tuesday");
        assert!(json["estimate"].is_null());
    }
}
