use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue-tracker id embedded at the start of a task description.
///
/// A description references an issue when it starts with `#`; the id runs up
/// to the first space (`"#123 Fix bug"` → `123`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueRef(String);

impl IssueRef {
    /// Parse the issue reference out of a task description.
    ///
    /// Returns `None` when the description does not start with `#` or the id
    /// between `#` and the first space is empty.
    #[must_use]
    pub fn from_description(description: &str) -> Option<Self> {
        let rest = description.strip_prefix('#')?;
        let id = rest.split(' ').next().unwrap_or_default();
        if id.is_empty() {
            return None;
        }
        Some(Self(id.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supplementary issue metadata merged into a task record.
///
/// Empty for tasks without an [`IssueRef`] and for tasks whose lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    /// Story point estimate.
    #[serde(default)]
    pub estimate: Option<f64>,
    /// Canonical browser URL of the issue.
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("#123 Fix bug", Some("123"))]
    #[case("#123", Some("123"))]
    #[case("#1 A", Some("1"))]
    #[case("#abc-9  double space", Some("abc-9"))]
    #[case("Fix bug #123", None)]
    #[case(" #123 leading space", None)]
    #[case("#", None)]
    #[case("# heading", None)]
    #[case("", None)]
    fn parses_issue_ref(#[case] description: &str, #[case] expected: Option<&str>) {
        let parsed = IssueRef::from_description(description);
        assert_eq!(parsed.as_ref().map(IssueRef::as_str), expected);
    }
}
