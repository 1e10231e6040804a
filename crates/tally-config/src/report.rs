//! Report output configuration.

use serde::{Deserialize, Serialize};
use tally_core::entities::TaskField;

use crate::{ConfigError, require};

fn default_output_path() -> String {
    String::from("toggl-export.xlsx")
}

fn default_sheet_name() -> String {
    String::from("Toggl Export")
}

fn default_fields() -> Vec<String> {
    TaskField::DEFAULT_ORDER
        .iter()
        .map(|field| field.as_str().to_string())
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Name written into the `owner` column of every row.
    #[serde(default)]
    pub owner: String,

    /// Where the workbook is written.
    #[serde(default = "default_output_path")]
    pub output_path: String,

    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Column order. The first column gets the thousands-separator format
    /// when it is numeric.
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    /// Write date cells as 1904-system serials.
    #[serde(default)]
    pub date1904: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            output_path: default_output_path(),
            sheet_name: default_sheet_name(),
            fields: default_fields(),
            date1904: false,
        }
    }
}

impl ReportConfig {
    /// Parse the configured column list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty list, an unknown
    /// field name, or a field listed twice.
    pub fn task_fields(&self) -> Result<Vec<TaskField>, ConfigError> {
        if self.fields.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.fields".into(),
                reason: "at least one field is required".into(),
            });
        }

        let mut parsed: Vec<TaskField> = Vec::with_capacity(self.fields.len());
        for name in &self.fields {
            let field = name
                .trim()
                .parse::<TaskField>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: "report.fields".into(),
                    reason: e.to_string(),
                })?;
            if parsed.contains(&field) {
                return Err(ConfigError::InvalidValue {
                    field: "report.fields".into(),
                    reason: format!("'{field}' is listed more than once"),
                });
            }
            parsed.push(field);
        }
        Ok(parsed)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        require("report.owner", &self.owner)?;
        require("report.output_path", &self.output_path)?;
        require("report.sheet_name", &self.sheet_name)?;
        self.task_fields().map(|_| ())
    }
}
