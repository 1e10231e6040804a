//! Pivotal Tracker configuration.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, require, string_or_int};

/// Default Tracker REST API v5 base URL.
fn default_base_url() -> String {
    String::from("https://www.pivotaltracker.com/services/v5")
}

/// Default prefix of human-facing story links.
fn default_story_url_base() -> String {
    String::from("https://www.pivotaltracker.com/story/show")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PivotalConfig {
    /// API token sent in the `X-TrackerToken` header.
    #[serde(default)]
    pub api_token: String,

    /// Tracker project that owns the referenced stories.
    #[serde(default, deserialize_with = "string_or_int")]
    pub project_id: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Story links in the report are `{story_url_base}/{story_id}`.
    #[serde(default = "default_story_url_base")]
    pub story_url_base: String,
}

impl Default for PivotalConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            project_id: String::new(),
            base_url: default_base_url(),
            story_url_base: default_story_url_base(),
        }
    }
}

impl PivotalConfig {
    /// Check if enrichment can run.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_token.is_empty() && !self.project_id.is_empty()
    }

    /// One credential set without the other, most likely a typo.
    #[must_use]
    pub fn is_partially_configured(&self) -> bool {
        self.api_token.is_empty() != self.project_id.is_empty()
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        require("pivotal.api_token", &self.api_token)?;
        require("pivotal.project_id", &self.project_id)
    }

    /// Browser URL of a story.
    #[must_use]
    pub fn story_url(&self, story_id: &str) -> String {
        format!("{}/{story_id}", self.story_url_base.trim_end_matches('/'))
    }
}
