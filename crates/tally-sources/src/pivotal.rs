//! Pivotal Tracker API v5 client.

use reqwest::header::CONTENT_TYPE;
use tally_config::PivotalConfig;
use tally_core::entities::{Enrichment, IssueRef};

use crate::{EnrichmentSource, error::SourceError, http::read_json};

const TOKEN_HEADER: &str = "X-TrackerToken";

#[derive(serde::Deserialize)]
struct Story {
    #[serde(default)]
    estimate: Option<f64>,
}

/// HTTP client for Tracker story lookups.
#[derive(Clone)]
pub struct PivotalClient {
    http: reqwest::Client,
    config: PivotalConfig,
}

impl PivotalClient {
    /// Create a client from the `[pivotal]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client` fails
    /// to build.
    pub fn new(config: &PivotalConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tally/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    fn story_api_url(&self, issue: &IssueRef) -> String {
        format!(
            "{}/projects/{}/stories/{}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.config.project_id),
            urlencoding::encode(issue.as_str()),
        )
    }
}

impl EnrichmentSource for PivotalClient {
    async fn fetch_enrichment(&self, issue: &IssueRef) -> Result<Enrichment, SourceError> {
        let url = self.story_api_url(issue);
        tracing::debug!(story = %issue, "fetching tracker story");
        let resp = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.config.api_token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let story: Story = read_json(resp, "tracker story").await?;

        Ok(Enrichment {
            estimate: story.estimate,
            url: Some(self.config.story_url(issue.as_str())),
        })
    }
}

/// The configured issue tracker, or none.
///
/// With no tracker configured every reference resolves to an empty
/// [`Enrichment`] without touching the network.
#[derive(Clone)]
pub enum IssueTracker {
    Pivotal(PivotalClient),
    Disabled,
}

impl IssueTracker {
    /// Build the tracker from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client fails to build.
    pub fn from_config(config: &PivotalConfig) -> Result<Self, SourceError> {
        if config.is_configured() {
            Ok(Self::Pivotal(PivotalClient::new(config)?))
        } else {
            Ok(Self::Disabled)
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Pivotal(_))
    }
}

impl EnrichmentSource for IssueTracker {
    async fn fetch_enrichment(&self, issue: &IssueRef) -> Result<Enrichment, SourceError> {
        match self {
            Self::Pivotal(client) => client.fetch_enrichment(issue).await,
            Self::Disabled => Ok(Enrichment::default()),
        }
    }
}
