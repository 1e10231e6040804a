//! Toggl API v8 client.

use reqwest::header::CONTENT_TYPE;
use tally_config::TogglConfig;
use tally_core::entities::{Project, ProjectId, RawTimeEntry};
use tally_core::window::DateWindow;

use crate::{
    ProjectSource, TimeEntrySource,
    error::SourceError,
    http::read_json,
};

/// Toggl answers the basic-auth challenge with the token as user and this
/// literal as password.
const TOKEN_PASSWORD: &str = "api_token";

/// `GET /projects/{id}` wraps the project in a `data` envelope.
#[derive(serde::Deserialize)]
struct ProjectEnvelope {
    data: Project,
}

/// HTTP client for the Toggl time entries and projects endpoints.
#[derive(Clone)]
pub struct TogglClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
    workspace_id: String,
    user_agent: String,
}

impl TogglClient {
    /// Create a client from the `[toggl]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client` fails
    /// to build.
    pub fn new(config: &TogglConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("{}/{}", config.user_agent, env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            workspace_id: config.workspace_id.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    fn time_entries_url(&self, window: &DateWindow) -> String {
        format!(
            "{}/time_entries?user_agent={}&workspace_id={}&start_date={}&end_date={}",
            self.base_url,
            urlencoding::encode(&self.user_agent),
            urlencoding::encode(&self.workspace_id),
            urlencoding::encode(&window.start_param()),
            urlencoding::encode(&window.end_param()),
        )
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .basic_auth(&self.api_token, Some(TOKEN_PASSWORD))
            .header(CONTENT_TYPE, "application/json")
    }
}

impl TimeEntrySource for TogglClient {
    async fn fetch_time_entries(
        &self,
        window: &DateWindow,
    ) -> Result<Vec<RawTimeEntry>, SourceError> {
        let url = self.time_entries_url(window);
        tracing::debug!(since = %window.start_param(), until = %window.end_param(), "fetching toggl time entries");
        let resp = self.get(&url).send().await?;
        read_json(resp, "toggl time entries").await
    }
}

impl ProjectSource for TogglClient {
    async fn fetch_project(&self, id: ProjectId) -> Result<Project, SourceError> {
        let url = format!("{}/projects/{id}", self.base_url);
        tracing::debug!(project = %id, "fetching toggl project");
        let resp = self.get(&url).send().await?;
        let envelope: ProjectEnvelope = read_json(resp, "toggl project").await?;
        Ok(envelope.data)
    }
}
