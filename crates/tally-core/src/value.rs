//! Loosely typed field values read out of a record for tabular output.

use chrono::NaiveDateTime;

/// A single field value, as handed to the tabular serializer.
///
/// The serializer infers the cell type from the variant; an absent field is
/// represented by `None` at the call site rather than by a variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Boolean(bool),
    Date(NaiveDateTime),
    Text(String),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
