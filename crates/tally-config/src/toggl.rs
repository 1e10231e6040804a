//! Toggl time-tracking API configuration.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, require, string_or_int};

/// Default Toggl API v8 base URL.
fn default_base_url() -> String {
    String::from("https://api.track.toggl.com/api/v8")
}

/// Default `user_agent` query parameter Toggl asks integrations to send.
fn default_user_agent() -> String {
    String::from("tally")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TogglConfig {
    /// Personal API token (sent as the basic-auth user, password `api_token`).
    #[serde(default)]
    pub api_token: String,

    /// Workspace whose time entries are exported.
    #[serde(default, deserialize_with = "string_or_int")]
    pub workspace_id: String,

    /// API base URL, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for TogglConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            workspace_id: String::new(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl TogglConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        require("toggl.api_token", &self.api_token)?;
        require("toggl.workspace_id", &self.workspace_id)?;
        require("toggl.base_url", &self.base_url)
    }
}
